//! Collaborator build tests for access-gate-config.
// crates/access-gate-config/tests/grants_build.rs
// =============================================================================
// Module: Grants Collaborator Tests
// Description: End-to-end tests for collaborators built from grants.
// Purpose: Ensure grants-backed resolution and evaluation drive the checker.
// =============================================================================

use access_gate_config::GrantsConfig;
use access_gate_config::grants_toml_example;
use access_gate_core::AccessChecker;
use access_gate_core::AccessRequest;
use access_gate_core::CheckOutcome;
use access_gate_core::FixedCurrentPrincipal;
use access_gate_core::InMemoryPermissionEvaluator;
use access_gate_core::InMemoryWorkspaceResolver;
use access_gate_core::PermissionType;
use access_gate_core::PrincipalId;
use access_gate_core::Scope;
use access_gate_core::WorkspaceId;

const ADMIN_PRINCIPAL: &str = "0dd7c81c-9776-459c-8bbb-f8f3310001a3";
const OWNER_PRINCIPAL: &str = "a81acbfa-3d53-4a8b-9a81-5fb8e22c1dd2";
const EDITOR_PRINCIPAL: &str = "c96cf4cd-54b0-45f2-9546-4eeb76f33c21";
const FIRST_WORKSPACE: &str = "7e2f3a24-5c4b-4dc0-9e85-3390aa556677";
const SECOND_WORKSPACE: &str = "b3b87335-3a9f-43b7-a59b-8c3c5f20ab11";

type TestResult = Result<(), String>;

type ExampleChecker =
    AccessChecker<InMemoryWorkspaceResolver, InMemoryPermissionEvaluator, FixedCurrentPrincipal>;

fn example_checker() -> Result<ExampleChecker, String> {
    let config = GrantsConfig::from_toml(&grants_toml_example()).map_err(|err| err.to_string())?;
    Ok(AccessChecker::new(
        config.build_resolver(),
        config.build_evaluator(),
        FixedCurrentPrincipal::unattached(),
    ))
}

fn principal(raw: &str) -> Result<PrincipalId, String> {
    PrincipalId::parse(raw).ok_or_else(|| format!("bad principal literal: {raw}"))
}

#[test]
fn workspace_owner_may_administer_bound_connection() -> TestResult {
    let checker = example_checker()?;
    let request = AccessRequest::new(
        vec!["conn-orders-sync".to_string()],
        Scope::Connection,
        vec![PermissionType::WorkspaceAdmin],
    )
    .with_principal(principal(OWNER_PRINCIPAL)?);

    let outcome = checker.check_permissions(&request).map_err(|err| err.to_string())?;
    let expected = CheckOutcome::PermissionGranted {
        permission: PermissionType::WorkspaceAdmin,
    };
    if outcome != expected {
        return Err(format!("expected admin grant, got {outcome:?}"));
    }
    Ok(())
}

#[test]
fn editor_lacks_admin_but_keeps_editor_rights() -> TestResult {
    let checker = example_checker()?;
    let denied = AccessRequest::new(
        vec!["dst-warehouse".to_string()],
        Scope::Destination,
        vec![PermissionType::WorkspaceAdmin],
    )
    .with_principal(principal(EDITOR_PRINCIPAL)?);
    if checker.check_permissions(&denied).is_ok() {
        return Err("editor must not hold workspace_admin".to_string());
    }

    let allowed = AccessRequest::new(
        vec!["dst-warehouse".to_string()],
        Scope::Destination,
        vec![PermissionType::WorkspaceAdmin, PermissionType::WorkspaceEditor],
    )
    .with_principal(principal(EDITOR_PRINCIPAL)?);
    let outcome = checker.check_permissions(&allowed).map_err(|err| err.to_string())?;
    let expected = CheckOutcome::PermissionGranted {
        permission: PermissionType::WorkspaceEditor,
    };
    if outcome != expected {
        return Err(format!("expected editor grant, got {outcome:?}"));
    }
    Ok(())
}

#[test]
fn instance_admin_bypasses_resource_bindings() -> TestResult {
    let checker = example_checker()?;
    let request = AccessRequest::new(
        vec!["conn-unbound".to_string()],
        Scope::Connection,
        vec![PermissionType::WorkspaceReader],
    )
    .with_principal(principal(ADMIN_PRINCIPAL)?);

    let outcome = checker.check_permissions(&request).map_err(|err| err.to_string())?;
    if outcome != CheckOutcome::InstanceAdmin {
        return Err(format!("expected instance-admin outcome, got {outcome:?}"));
    }
    Ok(())
}

#[test]
fn workspace_lists_resolve_against_declared_workspaces() -> TestResult {
    let checker = example_checker()?;
    let unknown = WorkspaceId::random().to_string();

    let mixed = AccessRequest::new(
        vec![
            FIRST_WORKSPACE.to_string(),
            SECOND_WORKSPACE.to_string(),
            unknown.clone(),
        ],
        Scope::Workspace,
        vec![PermissionType::WorkspaceReader],
    )
    .with_principal(principal(OWNER_PRINCIPAL)?);
    let outcome = checker.check_permissions(&mixed).map_err(|err| err.to_string())?;
    let expected = CheckOutcome::PermissionGranted {
        permission: PermissionType::WorkspaceReader,
    };
    if outcome != expected {
        return Err(format!("expected reader grant, got {outcome:?}"));
    }

    let unresolved = AccessRequest::new(
        vec![unknown],
        Scope::Workspace,
        vec![PermissionType::WorkspaceReader],
    )
    .with_principal(principal(OWNER_PRINCIPAL)?);
    if checker.check_permissions(&unresolved).is_ok() {
        return Err("unknown workspace list must fail closed".to_string());
    }
    Ok(())
}

#[test]
fn unbound_resource_ids_fail_closed() -> TestResult {
    let checker = example_checker()?;
    let request = AccessRequest::new(
        vec!["job-999999".to_string()],
        Scope::Job,
        vec![PermissionType::WorkspaceAdmin],
    )
    .with_principal(principal(OWNER_PRINCIPAL)?);

    if checker.check_permissions(&request).is_ok() {
        return Err("unbound job id must fail closed".to_string());
    }
    Ok(())
}
