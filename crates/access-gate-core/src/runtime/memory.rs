// crates/access-gate-core/src/runtime/memory.rs
// ============================================================================
// Module: Access Gate In-Memory Collaborators
// Description: Simple in-memory resolver and evaluator for tests and demos.
// Purpose: Provide deterministic collaborator implementations without external deps.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! This module provides in-memory implementations of [`WorkspaceResolver`],
//! [`PermissionEvaluator`], and [`CurrentPrincipal`] for tests and local
//! demos. They are lookup tables with the contract semantics of the real
//! interfaces (unknown identifiers resolve to nothing, never to an error)
//! and are not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::identifiers::PrincipalId;
use crate::core::identifiers::WorkspaceId;
use crate::core::permission::PermissionType;
use crate::core::scope::WORKSPACE_IDS_KEY;
use crate::interfaces::CurrentPrincipal;
use crate::interfaces::EvaluatorError;
use crate::interfaces::PermissionEvaluator;
use crate::interfaces::PermissionVerdict;
use crate::interfaces::PrincipalError;
use crate::interfaces::ResolutionProperties;
use crate::interfaces::ResolverError;
use crate::interfaces::WorkspaceResolver;

// ============================================================================
// SECTION: In-Memory Resolver
// ============================================================================

/// In-memory workspace resolver for tests and demos.
///
/// Single-valued lookups match exact `(key, value)` bindings. The
/// workspace-ids key is list-valued: its JSON-encoded array is decoded and
/// filtered against the registered workspace set, so unknown or malformed
/// entries silently resolve to nothing.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWorkspaceResolver {
    /// Exact lookup bindings protected by a mutex.
    bindings: Arc<Mutex<BTreeMap<(String, String), Vec<WorkspaceId>>>>,
    /// Workspace identifiers known to exist, for list-valued lookups.
    known_workspaces: Arc<Mutex<BTreeSet<WorkspaceId>>>,
}

impl InMemoryWorkspaceResolver {
    /// Creates an empty in-memory resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver from prebuilt bindings and known workspaces.
    #[must_use]
    pub fn with_entries(
        bindings: BTreeMap<(String, String), Vec<WorkspaceId>>,
        known_workspaces: BTreeSet<WorkspaceId>,
    ) -> Self {
        Self {
            bindings: Arc::new(Mutex::new(bindings)),
            known_workspaces: Arc::new(Mutex::new(known_workspaces)),
        }
    }

    /// Registers a workspace as existing for workspace-ids lookups.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the internal lock is poisoned.
    pub fn register_workspace(&self, workspace_id: WorkspaceId) -> Result<(), ResolverError> {
        self.known_workspaces
            .lock()
            .map_err(|_| ResolverError::Backend("resolver mutex poisoned".to_string()))?
            .insert(workspace_id);
        Ok(())
    }

    /// Binds a scoped resource identifier to its owning workspaces.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the internal lock is poisoned.
    pub fn bind(
        &self,
        key: &str,
        raw_id: &str,
        workspace_ids: Vec<WorkspaceId>,
    ) -> Result<(), ResolverError> {
        self.bindings
            .lock()
            .map_err(|_| ResolverError::Backend("resolver mutex poisoned".to_string()))?
            .insert((key.to_string(), raw_id.to_string()), workspace_ids);
        Ok(())
    }

    /// Resolves a JSON-encoded workspace identifier list against known
    /// workspaces; malformed input resolves to nothing.
    fn resolve_workspace_list(&self, value: &str) -> Result<Vec<WorkspaceId>, ResolverError> {
        let Ok(raw_ids) = serde_json::from_str::<Vec<String>>(value) else {
            return Ok(Vec::new());
        };
        let known = self
            .known_workspaces
            .lock()
            .map_err(|_| ResolverError::Backend("resolver mutex poisoned".to_string()))?;
        Ok(raw_ids
            .iter()
            .filter_map(|raw| WorkspaceId::parse(raw))
            .filter(|workspace_id| known.contains(workspace_id))
            .collect())
    }

    /// Resolves one exact binding; missing bindings resolve to nothing.
    fn resolve_binding(&self, key: &str, value: &str) -> Result<Vec<WorkspaceId>, ResolverError> {
        let guard = self
            .bindings
            .lock()
            .map_err(|_| ResolverError::Backend("resolver mutex poisoned".to_string()))?;
        Ok(guard.get(&(key.to_string(), value.to_string())).cloned().unwrap_or_default())
    }
}

impl WorkspaceResolver for InMemoryWorkspaceResolver {
    fn resolve_workspaces(
        &self,
        properties: &ResolutionProperties,
    ) -> Result<Vec<WorkspaceId>, ResolverError> {
        let mut resolved = Vec::new();
        for (key, value) in properties.iter() {
            if key == WORKSPACE_IDS_KEY {
                resolved.extend(self.resolve_workspace_list(value)?);
            } else {
                resolved.extend(self.resolve_binding(key, value)?);
            }
        }
        resolved.sort_unstable();
        resolved.dedup();
        Ok(resolved)
    }
}

// ============================================================================
// SECTION: In-Memory Evaluator
// ============================================================================

/// In-memory permission evaluator for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPermissionEvaluator {
    /// Instance administrator principals protected by a mutex.
    admins: Arc<Mutex<BTreeSet<PrincipalId>>>,
    /// Permission grants keyed by principal and workspace.
    grants: Arc<Mutex<BTreeMap<(PrincipalId, WorkspaceId), BTreeSet<PermissionType>>>>,
}

impl InMemoryPermissionEvaluator {
    /// Creates an empty in-memory evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator from prebuilt admin and grant tables.
    #[must_use]
    pub fn with_entries(
        admins: BTreeSet<PrincipalId>,
        grants: BTreeMap<(PrincipalId, WorkspaceId), BTreeSet<PermissionType>>,
    ) -> Self {
        Self {
            admins: Arc::new(Mutex::new(admins)),
            grants: Arc::new(Mutex::new(grants)),
        }
    }

    /// Marks a principal as an instance administrator.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the internal lock is poisoned.
    pub fn add_instance_admin(&self, principal: PrincipalId) -> Result<(), EvaluatorError> {
        self.admins
            .lock()
            .map_err(|_| EvaluatorError::Backend("evaluator mutex poisoned".to_string()))?
            .insert(principal);
        Ok(())
    }

    /// Grants a permission type to a principal in a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the internal lock is poisoned.
    pub fn grant(
        &self,
        principal: PrincipalId,
        workspace_id: WorkspaceId,
        permission: PermissionType,
    ) -> Result<(), EvaluatorError> {
        self.grants
            .lock()
            .map_err(|_| EvaluatorError::Backend("evaluator mutex poisoned".to_string()))?
            .entry((principal, workspace_id))
            .or_default()
            .insert(permission);
        Ok(())
    }
}

impl PermissionEvaluator for InMemoryPermissionEvaluator {
    fn is_instance_admin(&self, principal: &PrincipalId) -> Result<bool, EvaluatorError> {
        let guard = self
            .admins
            .lock()
            .map_err(|_| EvaluatorError::Backend("evaluator mutex poisoned".to_string()))?;
        Ok(guard.contains(principal))
    }

    fn any_workspace_grants(
        &self,
        permission: PermissionType,
        principal: &PrincipalId,
        workspace_ids: &[WorkspaceId],
    ) -> Result<PermissionVerdict, EvaluatorError> {
        let guard = self
            .grants
            .lock()
            .map_err(|_| EvaluatorError::Backend("evaluator mutex poisoned".to_string()))?;
        for workspace_id in workspace_ids {
            let granted = guard
                .get(&(*principal, *workspace_id))
                .is_some_and(|permissions| permissions.contains(&permission));
            if granted {
                return Ok(PermissionVerdict::Granted);
            }
        }
        Ok(PermissionVerdict::Denied)
    }
}

// ============================================================================
// SECTION: Fixed Principal Source
// ============================================================================

/// Current-principal source returning one configured principal.
#[derive(Debug, Clone, Copy)]
pub struct FixedCurrentPrincipal {
    /// Principal returned for every request, when attached.
    principal: Option<PrincipalId>,
}

impl FixedCurrentPrincipal {
    /// Creates a source returning the given principal.
    #[must_use]
    pub const fn new(principal: PrincipalId) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Creates a source with no attached principal.
    ///
    /// Useful for reproducing the missing-principal fault in tests.
    #[must_use]
    pub const fn unattached() -> Self {
        Self {
            principal: None,
        }
    }
}

impl CurrentPrincipal for FixedCurrentPrincipal {
    fn current(&self) -> Result<PrincipalId, PrincipalError> {
        self.principal.ok_or(PrincipalError::Missing)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
