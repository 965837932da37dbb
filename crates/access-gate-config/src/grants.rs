// crates/access-gate-config/src/grants.rs
// ============================================================================
// Module: Access Gate Grants Configuration
// Description: Grants loading and validation for Access Gate.
// Purpose: Provide strict, fail-closed grants parsing with hard limits.
// Dependencies: access-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Grants are loaded from a TOML file with strict size and path limits.
//! The file names the workspaces that exist, the permission grants each
//! workspace carries, the instance administrators, and the single-resource
//! bindings (connections, sources, destinations, jobs) that map raw
//! identifiers to their owning workspace. Missing or invalid grants fail
//! closed: a config that does not validate never becomes a collaborator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use access_gate_core::CONNECTION_ID_KEY;
use access_gate_core::DESTINATION_ID_KEY;
use access_gate_core::InMemoryPermissionEvaluator;
use access_gate_core::InMemoryWorkspaceResolver;
use access_gate_core::JOB_ID_KEY;
use access_gate_core::PermissionType;
use access_gate_core::PrincipalId;
use access_gate_core::SOURCE_ID_KEY;
use access_gate_core::WorkspaceId;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default grants filename when no path is specified.
const DEFAULT_GRANTS_NAME: &str = "access-gate.toml";
/// Environment variable used to override the grants path.
pub(crate) const GRANTS_ENV_VAR: &str = "ACCESS_GATE_CONFIG";
/// Supported grants schema version.
pub(crate) const GRANTS_SCHEMA_VERSION: u32 = 1;
/// Maximum grants file size in bytes.
pub(crate) const MAX_GRANTS_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of instance administrators.
pub(crate) const MAX_INSTANCE_ADMINS: usize = 256;
/// Maximum number of workspace entries.
pub(crate) const MAX_WORKSPACES: usize = 4096;
/// Maximum number of grants per workspace.
pub(crate) const MAX_GRANTS_PER_WORKSPACE: usize = 1024;
/// Maximum number of resource bindings per resource kind.
pub(crate) const MAX_RESOURCES_PER_KIND: usize = 65_536;
/// Maximum length of a raw resource identifier.
pub(crate) const MAX_RESOURCE_ID_LENGTH: usize = 256;

// ============================================================================
// SECTION: Grants Types
// ============================================================================

/// Access Gate grants configuration.
///
/// # Invariants
/// - A validated config references only workspaces declared in `workspaces`.
/// - Resource identifiers are unique within their kind.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantsConfig {
    /// Grants schema version; must match the supported version.
    pub schema_version: u32,
    /// Instance-wide settings.
    #[serde(default)]
    pub instance: InstanceConfig,
    /// Workspaces and their permission grants.
    #[serde(default)]
    pub workspaces: Vec<WorkspaceConfig>,
    /// Connection bindings to owning workspaces.
    #[serde(default)]
    pub connections: Vec<ResourceConfig>,
    /// Source bindings to owning workspaces.
    #[serde(default)]
    pub sources: Vec<ResourceConfig>,
    /// Destination bindings to owning workspaces.
    #[serde(default)]
    pub destinations: Vec<ResourceConfig>,
    /// Job bindings to owning workspaces.
    #[serde(default)]
    pub jobs: Vec<ResourceConfig>,
}

/// Instance-wide grants settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceConfig {
    /// Principals holding instance administrator rights.
    #[serde(default)]
    pub admins: Vec<PrincipalId>,
}

/// One workspace and the permission grants it carries.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    /// Workspace identifier.
    pub id: WorkspaceId,
    /// Permission grants in this workspace.
    #[serde(default)]
    pub grants: Vec<GrantConfig>,
}

/// Permission grant for one principal in one workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantConfig {
    /// Principal receiving the grant.
    pub principal: PrincipalId,
    /// Permission types granted; must not be empty.
    pub permissions: Vec<PermissionType>,
}

/// Binding from one raw resource identifier to its owning workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    /// Raw resource identifier as callers present it.
    pub id: String,
    /// Owning workspace; must be declared in `workspaces`.
    pub workspace_id: WorkspaceId,
}

impl GrantsConfig {
    /// Loads grants from disk using the default resolution rules.
    ///
    /// When no path is given, the `ACCESS_GATE_CONFIG` environment variable
    /// is consulted before falling back to `access-gate.toml` in the working
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`GrantsError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, GrantsError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| GrantsError::Io(err.to_string()))?;
        if bytes.len() > MAX_GRANTS_FILE_SIZE {
            return Err(GrantsError::Invalid("grants file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| GrantsError::Invalid("grants file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates grants from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`GrantsError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, GrantsError> {
        let config: Self =
            toml::from_str(content).map_err(|err| GrantsError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the grants for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`GrantsError`] when grants are invalid.
    pub fn validate(&self) -> Result<(), GrantsError> {
        if self.schema_version != GRANTS_SCHEMA_VERSION {
            return Err(GrantsError::Invalid(format!(
                "unsupported schema_version {}, expected {GRANTS_SCHEMA_VERSION}",
                self.schema_version
            )));
        }
        if self.instance.admins.len() > MAX_INSTANCE_ADMINS {
            return Err(GrantsError::Invalid("instance.admins exceeds max entries".to_string()));
        }
        let mut admins = BTreeSet::new();
        for admin in &self.instance.admins {
            if !admins.insert(*admin) {
                return Err(GrantsError::Invalid(format!("duplicate instance admin {admin}")));
            }
        }
        if self.workspaces.len() > MAX_WORKSPACES {
            return Err(GrantsError::Invalid("workspaces exceeds max entries".to_string()));
        }
        let mut workspace_ids = BTreeSet::new();
        for workspace in &self.workspaces {
            if !workspace_ids.insert(workspace.id) {
                return Err(GrantsError::Invalid(format!("duplicate workspace {}", workspace.id)));
            }
            workspace.validate()?;
        }
        validate_resources("connections", &self.connections, &workspace_ids)?;
        validate_resources("sources", &self.sources, &workspace_ids)?;
        validate_resources("destinations", &self.destinations, &workspace_ids)?;
        validate_resources("jobs", &self.jobs, &workspace_ids)?;
        Ok(())
    }

    /// Builds the workspace resolver backed by these grants.
    ///
    /// Workspaces answer the workspace-ids list lookup; every resource
    /// binding answers the exact lookup under its kind's key.
    #[must_use]
    pub fn build_resolver(&self) -> InMemoryWorkspaceResolver {
        let mut known_workspaces = BTreeSet::new();
        for workspace in &self.workspaces {
            known_workspaces.insert(workspace.id);
        }
        let mut bindings = BTreeMap::new();
        let kinds = [
            (CONNECTION_ID_KEY, &self.connections),
            (SOURCE_ID_KEY, &self.sources),
            (DESTINATION_ID_KEY, &self.destinations),
            (JOB_ID_KEY, &self.jobs),
        ];
        for (key, resources) in kinds {
            for resource in resources {
                bindings.insert(
                    (key.to_string(), resource.id.clone()),
                    vec![resource.workspace_id],
                );
            }
        }
        InMemoryWorkspaceResolver::with_entries(bindings, known_workspaces)
    }

    /// Builds the permission evaluator backed by these grants.
    #[must_use]
    pub fn build_evaluator(&self) -> InMemoryPermissionEvaluator {
        let mut admins = BTreeSet::new();
        for admin in &self.instance.admins {
            admins.insert(*admin);
        }
        let mut grants: BTreeMap<(PrincipalId, WorkspaceId), BTreeSet<PermissionType>> =
            BTreeMap::new();
        for workspace in &self.workspaces {
            for grant in &workspace.grants {
                let entry = grants.entry((grant.principal, workspace.id)).or_default();
                for permission in &grant.permissions {
                    entry.insert(*permission);
                }
            }
        }
        InMemoryPermissionEvaluator::with_entries(admins, grants)
    }
}

impl WorkspaceConfig {
    /// Validates the grants carried by this workspace.
    fn validate(&self) -> Result<(), GrantsError> {
        if self.grants.len() > MAX_GRANTS_PER_WORKSPACE {
            return Err(GrantsError::Invalid(format!(
                "workspace {} grants exceed max entries",
                self.id
            )));
        }
        let mut principals = BTreeSet::new();
        for grant in &self.grants {
            if !principals.insert(grant.principal) {
                return Err(GrantsError::Invalid(format!(
                    "duplicate grant for principal {} in workspace {}",
                    grant.principal, self.id
                )));
            }
            if grant.permissions.is_empty() {
                return Err(GrantsError::Invalid(format!(
                    "empty permission list for principal {} in workspace {}",
                    grant.principal, self.id
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Grants loading or validation errors.
#[derive(Debug, Error)]
pub enum GrantsError {
    /// I/O failure while reading grants.
    #[error("grants io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("grants parse error: {0}")]
    Parse(String),
    /// Invalid grants data.
    #[error("invalid grants: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the grants path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, GrantsError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(GRANTS_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(GrantsError::Invalid("grants path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_GRANTS_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), GrantsError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(GrantsError::Invalid("grants path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(GrantsError::Invalid("grants path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates one resource kind against declared workspaces.
fn validate_resources(
    kind: &str,
    resources: &[ResourceConfig],
    workspaces: &BTreeSet<WorkspaceId>,
) -> Result<(), GrantsError> {
    if resources.len() > MAX_RESOURCES_PER_KIND {
        return Err(GrantsError::Invalid(format!("{kind} exceeds max entries")));
    }
    let mut ids = BTreeSet::new();
    for resource in resources {
        if resource.id.is_empty() {
            return Err(GrantsError::Invalid(format!("{kind} entry has an empty id")));
        }
        if resource.id.len() > MAX_RESOURCE_ID_LENGTH {
            return Err(GrantsError::Invalid(format!("{kind} id too long: {}", resource.id)));
        }
        if !ids.insert(resource.id.as_str()) {
            return Err(GrantsError::Invalid(format!("duplicate {kind} id {}", resource.id)));
        }
        if !workspaces.contains(&resource.workspace_id) {
            return Err(GrantsError::Invalid(format!(
                "{kind} id {} references unknown workspace {}",
                resource.id, resource.workspace_id
            )));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn resolve_path_prefers_explicit_path() {
        let explicit = Path::new("custom/grants.toml");
        let resolved = resolve_path(Some(explicit)).expect("explicit path resolves");
        assert_eq!(resolved, PathBuf::from("custom/grants.toml"));
    }

    #[test]
    fn validate_path_accepts_normal_paths() {
        assert!(validate_path(Path::new("conf/access-gate.toml")).is_ok());
    }

    #[test]
    fn validate_path_rejects_over_long_component() {
        let component = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        let path = PathBuf::from(component);
        let result = validate_path(&path);
        assert!(result.is_err(), "over-long component should fail");
        assert!(result.unwrap_err().to_string().contains("component too long"));
    }

    #[test]
    fn validate_path_rejects_over_long_total_path() {
        let mut long = PathBuf::new();
        for _ in 0 .. (MAX_TOTAL_PATH_LENGTH / MAX_PATH_COMPONENT_LENGTH + 2) {
            long.push("a".repeat(MAX_PATH_COMPONENT_LENGTH));
        }
        let result = validate_path(&long);
        assert!(result.is_err(), "over-long path should fail");
        assert!(result.unwrap_err().to_string().contains("exceeds max length"));
    }
}
