// crates/access-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Access Gate Interfaces
// Description: Backend-agnostic contracts for resolution and evaluation.
// Purpose: Define the collaborator surfaces the access checker orchestrates.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the gate integrates with the systems that own
//! resource-to-workspace mappings, permission grants, and request identity,
//! without embedding backend-specific details. Implementations must be
//! deterministic and fail closed on missing or invalid data: an identifier
//! that cannot be resolved is an empty answer, never an error. Errors are
//! reserved for infrastructure faults so callers can keep "denied" and
//! "broken" apart.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::PrincipalId;
use crate::core::identifiers::WorkspaceId;
use crate::core::permission::PermissionType;

// ============================================================================
// SECTION: Resolution Properties
// ============================================================================

/// Lookup properties handed to a workspace resolver.
///
/// # Invariants
/// - Keys are the stable lookup keys from [`crate::core::scope`].
/// - Values are opaque to the gate; list-valued entries are JSON-encoded
///   arrays, single-valued entries are raw identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolutionProperties(BTreeMap<String, String>);

impl ResolutionProperties {
    /// Creates an empty property map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates a property map holding a single entry.
    #[must_use]
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut properties = Self::new();
        properties.insert(key, value);
        properties
    }

    /// Inserts a property, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns whether the property map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// SECTION: Workspace Resolver
// ============================================================================

/// Workspace resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Unresolvable identifiers are an empty result, never an error.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Resolution backend reported an error.
    #[error("workspace resolution error: {0}")]
    Backend(String),
}

/// Resolves scoped resource identifiers to their owning workspaces.
pub trait WorkspaceResolver {
    /// Resolves lookup properties to owning workspace identifiers.
    ///
    /// An empty result means the identifiers could not be resolved to any
    /// workspace; unknown or malformed identifiers must not produce an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the resolution backend fails.
    fn resolve_workspaces(
        &self,
        properties: &ResolutionProperties,
    ) -> Result<Vec<WorkspaceId>, ResolverError>;
}

// ============================================================================
// SECTION: Permission Evaluator
// ============================================================================

/// Permission evaluation verdict.
///
/// # Invariants
/// - Variants are stable and exhaustive for evaluation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionVerdict {
    /// The permission is held on at least one queried workspace.
    Granted,
    /// The permission is held on none of the queried workspaces.
    Denied,
}

/// Permission evaluation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// Evaluation backend reported an error.
    #[error("permission evaluation error: {0}")]
    Backend(String),
}

/// Evaluates permission grants for principals over workspaces.
pub trait PermissionEvaluator {
    /// Returns whether the principal is an instance administrator.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the evaluation backend fails.
    fn is_instance_admin(&self, principal: &PrincipalId) -> Result<bool, EvaluatorError>;

    /// Returns whether the principal holds the permission on any of the
    /// given workspaces.
    ///
    /// This is a single aggregate query over the full workspace list; the
    /// gate never iterates workspaces itself.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the evaluation backend fails.
    fn any_workspace_grants(
        &self,
        permission: PermissionType,
        principal: &PrincipalId,
        workspace_ids: &[WorkspaceId],
    ) -> Result<PermissionVerdict, EvaluatorError>;
}

// ============================================================================
// SECTION: Current Principal
// ============================================================================

/// Current-principal lookup errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PrincipalError {
    /// No principal is attached to the current request context.
    #[error("no principal attached to the current request")]
    Missing,
    /// Principal lookup backend reported an error.
    #[error("principal lookup error: {0}")]
    Lookup(String),
}

/// Supplies the acting principal for the current request.
///
/// This is an explicit injected collaborator rather than ambient process
/// state, so checks stay testable and reentrant.
pub trait CurrentPrincipal {
    /// Returns the acting principal.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalError`] when no principal is attached or the
    /// lookup backend fails.
    fn current(&self) -> Result<PrincipalId, PrincipalError>;
}
