// crates/access-gate-core/src/runtime/checker.rs
// ============================================================================
// Module: Access Gate Checker
// Description: Scope resolution and permission evaluation orchestration.
// Purpose: Decide access requests deterministically and fail closed.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The access checker is the single canonical decision path for the gate.
//! Checks run in a fixed order: identifier validation, instance-admin
//! short-circuit, workspace resolution, then permission evaluation with OR
//! semantics over the requested permission types. Any path that does not
//! positively grant access ends in [`CheckError::Forbidden`]; collaborator
//! faults propagate unchanged so callers can keep "denied" and "broken"
//! apart.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::PrincipalId;
use crate::core::permission::PermissionType;
use crate::core::problem::Problem;
use crate::core::scope::Scope;
use crate::interfaces::CurrentPrincipal;
use crate::interfaces::EvaluatorError;
use crate::interfaces::PermissionEvaluator;
use crate::interfaces::PermissionVerdict;
use crate::interfaces::PrincipalError;
use crate::interfaces::ResolutionProperties;
use crate::interfaces::ResolverError;
use crate::interfaces::WorkspaceResolver;
use crate::runtime::audit::AccessAuditEvent;
use crate::runtime::audit::AccessAuditSink;
use crate::runtime::audit::AuditReason;
use crate::runtime::audit::NoopAuditSink;

// ============================================================================
// SECTION: Access Request
// ============================================================================

/// Authorization check request.
///
/// # Invariants
/// - `required_permissions` preserves first-occurrence order with duplicates
///   removed, so evaluation order is deterministic and observable.
/// - `resource_ids` are raw boundary values; the gate performs no parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    /// Raw resource identifiers as received at the boundary.
    resource_ids: Vec<String>,
    /// Resource scope the identifiers belong to.
    scope: Scope,
    /// Acting principal, when already known to the caller.
    principal: Option<PrincipalId>,
    /// Acceptable permission types; any one of them grants access.
    required_permissions: Vec<PermissionType>,
}

impl AccessRequest {
    /// Creates a request for the given identifiers, scope, and permissions.
    ///
    /// Duplicate permission types are dropped; first-occurrence order is
    /// kept as the evaluation order.
    #[must_use]
    pub fn new(
        resource_ids: Vec<String>,
        scope: Scope,
        required_permissions: Vec<PermissionType>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let mut permissions = Vec::with_capacity(required_permissions.len());
        for permission in required_permissions {
            if seen.insert(permission) {
                permissions.push(permission);
            }
        }
        Self {
            resource_ids,
            scope,
            principal: None,
            required_permissions: permissions,
        }
    }

    /// Attaches an explicitly known acting principal.
    ///
    /// When set, the checker skips the current-principal lookup.
    #[must_use]
    pub fn with_principal(mut self, principal: PrincipalId) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Returns the raw resource identifiers.
    #[must_use]
    pub fn resource_ids(&self) -> &[String] {
        &self.resource_ids
    }

    /// Returns the resource scope.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the explicitly supplied principal, if any.
    #[must_use]
    pub const fn principal(&self) -> Option<PrincipalId> {
        self.principal
    }

    /// Returns the acceptable permission types in evaluation order.
    #[must_use]
    pub fn required_permissions(&self) -> &[PermissionType] {
        &self.required_permissions
    }
}

// ============================================================================
// SECTION: Check Outcome
// ============================================================================

/// Successful authorization outcome.
///
/// # Invariants
/// - Variants are stable and exhaustive for authorization outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Empty workspace-set request passed through without evaluation.
    ///
    /// This is a deliberate pass-through for callers that interpret an
    /// empty workspace set themselves, not a permission grant.
    WorkspaceSetPassThrough,
    /// Principal is an instance administrator.
    InstanceAdmin,
    /// A requested permission type was granted.
    PermissionGranted {
        /// Permission type that satisfied the request.
        permission: PermissionType,
    },
}

// ============================================================================
// SECTION: Check Errors
// ============================================================================

/// Access check errors.
///
/// # Invariants
/// - `Forbidden` is the single denial kind for every denial path; callers
///   branch on the kind, never on message text.
/// - Remaining variants are collaborator faults passed through unchanged.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Request was denied by the authorization policy.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Human-readable denial detail.
        message: String,
    },
    /// Workspace resolver failure.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
    /// Permission evaluator failure.
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),
    /// Current-principal lookup failure.
    #[error(transparent)]
    Principal(#[from] PrincipalError),
}

impl CheckError {
    /// Maps a denial to its boundary problem.
    ///
    /// Collaborator faults map to `None`; they are infrastructure failures,
    /// not part of the caller-facing problem vocabulary.
    #[must_use]
    pub fn problem(&self) -> Option<Problem> {
        match self {
            Self::Forbidden {
                message,
            } => Some(Problem::Forbidden(message.clone())),
            Self::Resolver(_) | Self::Evaluator(_) | Self::Principal(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Access Checker
// ============================================================================

/// Access checker orchestrating scope resolution and permission evaluation.
pub struct AccessChecker<R, E, C> {
    /// Workspace resolver implementation.
    resolver: R,
    /// Permission evaluator implementation.
    evaluator: E,
    /// Current-principal source implementation.
    principal_source: C,
    /// Audit sink receiving every decision.
    audit: Arc<dyn AccessAuditSink>,
}

impl<R, E, C> AccessChecker<R, E, C>
where
    R: WorkspaceResolver,
    E: PermissionEvaluator,
    C: CurrentPrincipal,
{
    /// Creates a new access checker with a no-op audit sink.
    #[must_use]
    pub fn new(resolver: R, evaluator: E, principal_source: C) -> Self {
        Self {
            resolver,
            evaluator,
            principal_source,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink receiving allow and deny decisions.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn AccessAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Checks whether the acting principal may access the requested
    /// resources with any of the requested permission types.
    ///
    /// The decision order is fixed: empty-identifier validation (with the
    /// workspace-set pass-through), single-resource arity validation,
    /// instance-admin short-circuit, workspace resolution, then one
    /// aggregate permission query per requested type until the first grant.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Forbidden`] when the request is denied, and the
    /// collaborator error kinds unchanged when resolution, evaluation, or
    /// principal lookup infrastructure fails.
    pub fn check_permissions(&self, request: &AccessRequest) -> Result<CheckOutcome, CheckError> {
        if request.resource_ids().is_empty() {
            if request.scope() == Scope::WorkspaceSet {
                self.audit.record(&AccessAuditEvent::allowed(
                    request,
                    request.principal(),
                    AuditReason::WorkspaceSetPassThrough,
                    None,
                ));
                return Ok(CheckOutcome::WorkspaceSetPassThrough);
            }
            return Err(self.deny(
                request,
                request.principal(),
                AuditReason::NoIds,
                format!("no ids provided for scope {}", request.scope()),
            ));
        }

        if !request.scope().takes_id_list() && request.resource_ids().len() > 1 {
            return Err(self.deny(
                request,
                request.principal(),
                AuditReason::MultipleIds,
                format!(
                    "expected a single id for scope {}, got {}",
                    request.scope(),
                    request.resource_ids().len()
                ),
            ));
        }

        let principal = match request.principal() {
            Some(principal) => principal,
            None => self.principal_source.current()?,
        };

        if self.evaluator.is_instance_admin(&principal)? {
            self.audit.record(&AccessAuditEvent::allowed(
                request,
                Some(principal),
                AuditReason::InstanceAdmin,
                None,
            ));
            return Ok(CheckOutcome::InstanceAdmin);
        }

        let properties = lookup_properties(request);
        let workspace_ids = self.resolver.resolve_workspaces(&properties)?;
        if workspace_ids.is_empty() {
            return Err(self.deny(
                request,
                Some(principal),
                AuditReason::Unresolved,
                format!(
                    "unable to resolve a workspace for ids [{}] in scope {}",
                    format_ids(request.resource_ids()),
                    request.scope()
                ),
            ));
        }

        for permission in request.required_permissions().iter().copied() {
            let verdict =
                self.evaluator.any_workspace_grants(permission, &principal, &workspace_ids)?;
            if verdict == PermissionVerdict::Granted {
                self.audit.record(&AccessAuditEvent::allowed(
                    request,
                    Some(principal),
                    AuditReason::PermissionGranted,
                    Some(permission),
                ));
                return Ok(CheckOutcome::PermissionGranted {
                    permission,
                });
            }
        }

        Err(self.deny(
            request,
            Some(principal),
            AuditReason::PermissionsDenied,
            format!(
                "principal does not have the required permissions for ids [{}] in scope {}",
                format_ids(request.resource_ids()),
                request.scope()
            ),
        ))
    }

    /// Records a deny audit event and builds the denial error.
    fn deny(
        &self,
        request: &AccessRequest,
        principal: Option<PrincipalId>,
        reason: AuditReason,
        message: String,
    ) -> CheckError {
        self.audit.record(&AccessAuditEvent::denied(request, principal, reason, &message));
        CheckError::Forbidden {
            message,
        }
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Builds the single-entry lookup properties for the request scope.
///
/// List scopes carry the full identifier list as a JSON-encoded array;
/// single-resource scopes carry the one raw identifier value.
fn lookup_properties(request: &AccessRequest) -> ResolutionProperties {
    let value = if request.scope().takes_id_list() {
        serde_json::Value::from(request.resource_ids().to_vec()).to_string()
    } else {
        request.resource_ids().first().cloned().unwrap_or_default()
    };
    ResolutionProperties::single(request.scope().lookup_key(), value)
}

/// Formats raw resource identifiers for denial messages.
fn format_ids(ids: &[String]) -> String {
    ids.join(", ")
}
