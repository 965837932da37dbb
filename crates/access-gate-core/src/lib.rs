// crates/access-gate-core/src/lib.rs
// ============================================================================
// Module: Access Gate Core Library
// Description: Public API surface for the Access Gate core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Access Gate core decides whether a principal may act on a set of scoped
//! resource identifiers. The checker validates the identifier list for the
//! request scope, resolves the identifiers to owning workspaces, and grants
//! access when any resolved workspace carries any of the required permission
//! types. It is backend-agnostic and integrates through explicit interfaces
//! rather than embedding into a membership store.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::CONNECTION_ID_KEY;
pub use crate::core::DESTINATION_ID_KEY;
pub use crate::core::JOB_ID_KEY;
pub use crate::core::PermissionType;
pub use crate::core::PrincipalId;
pub use crate::core::Problem;
pub use crate::core::ProblemKind;
pub use crate::core::SOURCE_ID_KEY;
pub use crate::core::Scope;
pub use crate::core::WORKSPACE_IDS_KEY;
pub use crate::core::WorkspaceId;
pub use interfaces::CurrentPrincipal;
pub use interfaces::EvaluatorError;
pub use interfaces::PermissionEvaluator;
pub use interfaces::PermissionVerdict;
pub use interfaces::PrincipalError;
pub use interfaces::ResolutionProperties;
pub use interfaces::ResolverError;
pub use interfaces::WorkspaceResolver;
pub use runtime::AccessAuditEvent;
pub use runtime::AccessAuditSink;
pub use runtime::AccessChecker;
pub use runtime::AccessRequest;
pub use runtime::AuditReason;
pub use runtime::CheckError;
pub use runtime::CheckOutcome;
pub use runtime::FixedCurrentPrincipal;
pub use runtime::InMemoryPermissionEvaluator;
pub use runtime::InMemoryWorkspaceResolver;
pub use runtime::NoopAuditSink;
pub use runtime::StderrAuditSink;
