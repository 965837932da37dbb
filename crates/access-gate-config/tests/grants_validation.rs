//! Grants validation tests for access-gate-config.
// crates/access-gate-config/tests/grants_validation.rs
// =============================================================================
// Module: Grants Validation Tests
// Description: Comprehensive tests for grants limit and consistency checks.
// Purpose: Ensure invalid grants fail closed with actionable messages.
// =============================================================================

use access_gate_config::GrantConfig;
use access_gate_config::GrantsConfig;
use access_gate_config::GrantsError;
use access_gate_config::InstanceConfig;
use access_gate_config::ResourceConfig;
use access_gate_config::WorkspaceConfig;
use access_gate_core::PermissionType;
use access_gate_core::PrincipalId;
use access_gate_core::WorkspaceId;

type TestResult = Result<(), String>;

// Test constants (from grants.rs)
const GRANTS_SCHEMA_VERSION: u32 = 1;
const MAX_INSTANCE_ADMINS: usize = 256;
const MAX_WORKSPACES: usize = 4096;
const MAX_GRANTS_PER_WORKSPACE: usize = 1024;
const MAX_RESOURCES_PER_KIND: usize = 65_536;
const MAX_RESOURCE_ID_LENGTH: usize = 256;

/// Assert that a validation result is an error containing a specific substring.
fn assert_invalid(result: Result<(), GrantsError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(()) => Err("expected invalid grants".to_string()),
    }
}

/// Builds an empty grants config at the supported schema version.
fn minimal_grants() -> GrantsConfig {
    GrantsConfig {
        schema_version: GRANTS_SCHEMA_VERSION,
        instance: InstanceConfig::default(),
        workspaces: Vec::new(),
        connections: Vec::new(),
        sources: Vec::new(),
        destinations: Vec::new(),
        jobs: Vec::new(),
    }
}

/// Builds a workspace entry without grants.
fn workspace(id: WorkspaceId) -> WorkspaceConfig {
    WorkspaceConfig {
        id,
        grants: Vec::new(),
    }
}

// ============================================================================
// SECTION: Schema Version
// ============================================================================

#[test]
fn minimal_grants_pass_validation() -> TestResult {
    minimal_grants().validate().map_err(|err| err.to_string())
}

#[test]
fn unsupported_schema_version_rejected() -> TestResult {
    let mut config = minimal_grants();
    config.schema_version = GRANTS_SCHEMA_VERSION + 1;
    assert_invalid(config.validate(), "unsupported schema_version")
}

// ============================================================================
// SECTION: Instance Admins
// ============================================================================

#[test]
fn instance_admins_at_max_256() -> TestResult {
    let mut config = minimal_grants();
    config.instance.admins = (0 .. MAX_INSTANCE_ADMINS).map(|_| PrincipalId::random()).collect();
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn instance_admins_exceeds_max_257() -> TestResult {
    let mut config = minimal_grants();
    config.instance.admins =
        (0 .. MAX_INSTANCE_ADMINS + 1).map(|_| PrincipalId::random()).collect();
    assert_invalid(config.validate(), "instance.admins exceeds max entries")
}

#[test]
fn duplicate_instance_admins_rejected() -> TestResult {
    let admin = PrincipalId::random();
    let mut config = minimal_grants();
    config.instance.admins = vec![admin, admin];
    assert_invalid(config.validate(), "duplicate instance admin")
}

// ============================================================================
// SECTION: Workspaces and Grants
// ============================================================================

#[test]
fn workspaces_at_max_4096() -> TestResult {
    let mut config = minimal_grants();
    config.workspaces = (0 .. MAX_WORKSPACES).map(|_| workspace(WorkspaceId::random())).collect();
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn workspaces_exceeds_max_4097() -> TestResult {
    let mut config = minimal_grants();
    config.workspaces =
        (0 .. MAX_WORKSPACES + 1).map(|_| workspace(WorkspaceId::random())).collect();
    assert_invalid(config.validate(), "workspaces exceeds max entries")
}

#[test]
fn duplicate_workspace_rejected() -> TestResult {
    let id = WorkspaceId::random();
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(id), workspace(id)];
    assert_invalid(config.validate(), "duplicate workspace")
}

#[test]
fn grants_at_max_per_workspace_1024() -> TestResult {
    let mut entry = workspace(WorkspaceId::random());
    entry.grants = (0 .. MAX_GRANTS_PER_WORKSPACE)
        .map(|_| GrantConfig {
            principal: PrincipalId::random(),
            permissions: vec![PermissionType::WorkspaceReader],
        })
        .collect();
    let mut config = minimal_grants();
    config.workspaces = vec![entry];
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn grants_exceeds_max_per_workspace_1025() -> TestResult {
    let mut entry = workspace(WorkspaceId::random());
    entry.grants = (0 .. MAX_GRANTS_PER_WORKSPACE + 1)
        .map(|_| GrantConfig {
            principal: PrincipalId::random(),
            permissions: vec![PermissionType::WorkspaceReader],
        })
        .collect();
    let mut config = minimal_grants();
    config.workspaces = vec![entry];
    assert_invalid(config.validate(), "grants exceed max entries")
}

#[test]
fn duplicate_grant_principal_rejected() -> TestResult {
    let principal = PrincipalId::random();
    let mut entry = workspace(WorkspaceId::random());
    entry.grants = vec![
        GrantConfig {
            principal,
            permissions: vec![PermissionType::WorkspaceReader],
        },
        GrantConfig {
            principal,
            permissions: vec![PermissionType::WorkspaceEditor],
        },
    ];
    let mut config = minimal_grants();
    config.workspaces = vec![entry];
    assert_invalid(config.validate(), "duplicate grant for principal")
}

#[test]
fn empty_permission_list_rejected() -> TestResult {
    let mut entry = workspace(WorkspaceId::random());
    entry.grants = vec![GrantConfig {
        principal: PrincipalId::random(),
        permissions: Vec::new(),
    }];
    let mut config = minimal_grants();
    config.workspaces = vec![entry];
    assert_invalid(config.validate(), "empty permission list")
}

// ============================================================================
// SECTION: Resource Bindings
// ============================================================================

#[test]
fn resource_with_empty_id_rejected() -> TestResult {
    let id = WorkspaceId::random();
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(id)];
    config.connections = vec![ResourceConfig {
        id: String::new(),
        workspace_id: id,
    }];
    assert_invalid(config.validate(), "connections entry has an empty id")
}

#[test]
fn resource_id_at_max_length_256() -> TestResult {
    let id = WorkspaceId::random();
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(id)];
    config.sources = vec![ResourceConfig {
        id: "a".repeat(MAX_RESOURCE_ID_LENGTH),
        workspace_id: id,
    }];
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn resource_id_exceeds_max_length_257() -> TestResult {
    let id = WorkspaceId::random();
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(id)];
    config.sources = vec![ResourceConfig {
        id: "a".repeat(MAX_RESOURCE_ID_LENGTH + 1),
        workspace_id: id,
    }];
    assert_invalid(config.validate(), "sources id too long")
}

#[test]
fn duplicate_resource_id_within_kind_rejected() -> TestResult {
    let id = WorkspaceId::random();
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(id)];
    config.destinations = vec![
        ResourceConfig {
            id: "dst-1".to_string(),
            workspace_id: id,
        },
        ResourceConfig {
            id: "dst-1".to_string(),
            workspace_id: id,
        },
    ];
    assert_invalid(config.validate(), "duplicate destinations id")
}

#[test]
fn same_resource_id_across_kinds_allowed() -> TestResult {
    let id = WorkspaceId::random();
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(id)];
    config.connections = vec![ResourceConfig {
        id: "shared-1".to_string(),
        workspace_id: id,
    }];
    config.sources = vec![ResourceConfig {
        id: "shared-1".to_string(),
        workspace_id: id,
    }];
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn resource_with_unknown_workspace_rejected() -> TestResult {
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(WorkspaceId::random())];
    config.jobs = vec![ResourceConfig {
        id: "job-1".to_string(),
        workspace_id: WorkspaceId::random(),
    }];
    assert_invalid(config.validate(), "references unknown workspace")
}

#[test]
fn resources_exceeds_max_per_kind_rejected() -> TestResult {
    let id = WorkspaceId::random();
    let mut config = minimal_grants();
    config.workspaces = vec![workspace(id)];
    config.jobs = (0 .. MAX_RESOURCES_PER_KIND + 1)
        .map(|i| ResourceConfig {
            id: format!("job-{i}"),
            workspace_id: id,
        })
        .collect();
    assert_invalid(config.validate(), "jobs exceeds max entries")
}
