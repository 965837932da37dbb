// crates/access-gate-config/src/lib.rs
// ============================================================================
// Module: Access Gate Config Library
// Description: Canonical grants model, validation, and example generation.
// Purpose: Single source of truth for access-gate.toml semantics.
// Dependencies: access-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `access-gate-config` defines the canonical grants configuration for Access
//! Gate deployments that run from a static file: instance administrators,
//! per-workspace permission grants, and the resource-to-workspace bindings
//! the resolver answers from. It provides strict, fail-closed validation and
//! builds ready-to-use in-memory collaborators for the access checker.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod examples;
pub mod grants;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use examples::grants_toml_example;
pub use grants::*;
