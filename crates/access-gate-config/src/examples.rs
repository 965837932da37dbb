// crates/access-gate-config/src/examples.rs
// ============================================================================
// Module: Grants Examples
// Description: Canonical example grants payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical examples for Access Gate grants configuration. Outputs are
//! deterministic and kept valid under the current schema version.

/// Returns a canonical example `access-gate.toml` grants file.
#[must_use]
pub fn grants_toml_example() -> String {
    String::from(
        r#"schema_version = 1

[instance]
admins = ["0dd7c81c-9776-459c-8bbb-f8f3310001a3"]

[[workspaces]]
id = "7e2f3a24-5c4b-4dc0-9e85-3390aa556677"

[[workspaces.grants]]
principal = "a81acbfa-3d53-4a8b-9a81-5fb8e22c1dd2"
permissions = ["workspace_admin"]

[[workspaces]]
id = "b3b87335-3a9f-43b7-a59b-8c3c5f20ab11"

[[workspaces.grants]]
principal = "a81acbfa-3d53-4a8b-9a81-5fb8e22c1dd2"
permissions = ["workspace_reader"]

[[workspaces.grants]]
principal = "c96cf4cd-54b0-45f2-9546-4eeb76f33c21"
permissions = ["workspace_editor", "workspace_runner"]

[[connections]]
id = "conn-orders-sync"
workspace_id = "7e2f3a24-5c4b-4dc0-9e85-3390aa556677"

[[sources]]
id = "src-orders-db"
workspace_id = "7e2f3a24-5c4b-4dc0-9e85-3390aa556677"

[[destinations]]
id = "dst-warehouse"
workspace_id = "b3b87335-3a9f-43b7-a59b-8c3c5f20ab11"

[[jobs]]
id = "job-000123"
workspace_id = "b3b87335-3a9f-43b7-a59b-8c3c5f20ab11"
"#,
    )
}
