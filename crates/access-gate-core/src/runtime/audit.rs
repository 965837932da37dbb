// crates/access-gate-core/src/runtime/audit.rs
// ============================================================================
// Module: Access Gate Decision Audit
// Description: Audit events and sinks for access decisions.
// Purpose: Record every allow and deny decision with stable reason labels.
// Dependencies: crate::{core, runtime}, serde, serde_json
// ============================================================================

//! ## Overview
//! Every access decision, allow and deny alike, is recorded through a
//! pluggable audit sink before the checker returns. Events carry stable
//! reason labels so downstream pipelines aggregate without parsing message
//! text. Collaborator faults are not decisions and are never recorded here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use serde::Serialize;

use crate::core::identifiers::PrincipalId;
use crate::core::permission::PermissionType;
use crate::runtime::checker::AccessRequest;

// ============================================================================
// SECTION: Audit Reasons
// ============================================================================

/// Stable reason labels for access decisions.
///
/// # Invariants
/// - Labels are stable for programmatic handling; they never change meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditReason {
    /// Empty workspace-set request passed through without evaluation.
    WorkspaceSetPassThrough,
    /// Principal is an instance administrator.
    InstanceAdmin,
    /// A requested permission type was granted.
    PermissionGranted,
    /// No resource identifiers were provided for a scope that requires them.
    NoIds,
    /// Multiple identifiers were provided under a single-resource scope.
    MultipleIds,
    /// Identifiers did not resolve to any workspace.
    Unresolved,
    /// No requested permission type was granted.
    PermissionsDenied,
}

impl AuditReason {
    /// Returns the stable label for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkspaceSetPassThrough => "workspace_set_passthrough",
            Self::InstanceAdmin => "instance_admin",
            Self::PermissionGranted => "permission_granted",
            Self::NoIds => "no_ids",
            Self::MultipleIds => "multiple_ids",
            Self::Unresolved => "unresolved",
            Self::PermissionsDenied => "permissions_denied",
        }
    }
}

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// Access decision audit event payload.
#[derive(Debug, Serialize)]
pub struct AccessAuditEvent {
    /// Event identifier.
    event: &'static str,
    /// Decision outcome.
    decision: &'static str,
    /// Stable decision reason label.
    reason: &'static str,
    /// Scope label for the checked resources.
    scope: &'static str,
    /// Raw resource identifiers from the request.
    resource_ids: Vec<String>,
    /// Acting principal (when known at decision time).
    principal: Option<String>,
    /// Granted permission type label (allow events only).
    permission: Option<&'static str>,
    /// Denial detail (deny events only).
    message: Option<String>,
}

impl AccessAuditEvent {
    /// Builds an allow event.
    #[must_use]
    pub fn allowed(
        request: &AccessRequest,
        principal: Option<PrincipalId>,
        reason: AuditReason,
        permission: Option<PermissionType>,
    ) -> Self {
        Self {
            event: "access_check",
            decision: "allow",
            reason: reason.as_str(),
            scope: request.scope().as_str(),
            resource_ids: request.resource_ids().to_vec(),
            principal: principal.map(|id| id.to_string()),
            permission: permission.map(PermissionType::as_str),
            message: None,
        }
    }

    /// Builds a deny event.
    #[must_use]
    pub fn denied(
        request: &AccessRequest,
        principal: Option<PrincipalId>,
        reason: AuditReason,
        message: &str,
    ) -> Self {
        Self {
            event: "access_check",
            decision: "deny",
            reason: reason.as_str(),
            scope: request.scope().as_str(),
            resource_ids: request.resource_ids().to_vec(),
            principal: principal.map(|id| id.to_string()),
            permission: None,
            message: Some(message.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Audit Sinks
// ============================================================================

/// Audit sink for access decisions.
pub trait AccessAuditSink: Send + Sync {
    /// Records an access audit event.
    fn record(&self, event: &AccessAuditEvent);
}

/// Audit sink that writes JSON lines to stderr.
pub struct StderrAuditSink;

impl AccessAuditSink for StderrAuditSink {
    fn record(&self, event: &AccessAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let mut stderr = std::io::stderr();
            let _ = writeln!(&mut stderr, "{payload}");
        }
    }
}

/// No-op audit sink for tests.
pub struct NoopAuditSink;

impl AccessAuditSink for NoopAuditSink {
    fn record(&self, _event: &AccessAuditEvent) {}
}
