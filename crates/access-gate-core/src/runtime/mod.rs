// crates/access-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Access Gate Runtime
// Description: Access checker, audit trail, and in-memory collaborators.
// Purpose: Evaluate access requests against resolution and evaluation backends.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! Runtime modules implement the access check itself: the checker that
//! validates identifiers, resolves workspaces, and evaluates permissions; the
//! audit trail recording every decision; and in-memory collaborators used by
//! tests and demos.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod checker;
pub mod memory;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AccessAuditEvent;
pub use audit::AccessAuditSink;
pub use audit::AuditReason;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use checker::AccessChecker;
pub use checker::AccessRequest;
pub use checker::CheckError;
pub use checker::CheckOutcome;
pub use memory::FixedCurrentPrincipal;
pub use memory::InMemoryPermissionEvaluator;
pub use memory::InMemoryWorkspaceResolver;
