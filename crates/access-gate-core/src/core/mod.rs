// crates/access-gate-core/src/core/mod.rs
// ============================================================================
// Module: Access Gate Core Types
// Description: Canonical scope, identifier, permission, and problem types.
// Purpose: Provide stable, serializable types for authorization checks.
// Dependencies: serde, thiserror, uuid
// ============================================================================

//! ## Overview
//! Core types define the vocabulary of an authorization check: the scope a
//! request is anchored to, the identifiers of workspaces and principals, the
//! permission tokens a caller accepts, and the problem kinds surfaced at the
//! boundary. These types are the canonical source of truth for any derived
//! API surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod permission;
pub mod problem;
pub mod scope;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::PrincipalId;
pub use identifiers::WorkspaceId;
pub use permission::PermissionType;
pub use problem::Problem;
pub use problem::ProblemKind;
pub use scope::CONNECTION_ID_KEY;
pub use scope::DESTINATION_ID_KEY;
pub use scope::JOB_ID_KEY;
pub use scope::SOURCE_ID_KEY;
pub use scope::Scope;
pub use scope::WORKSPACE_IDS_KEY;
