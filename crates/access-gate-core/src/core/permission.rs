// crates/access-gate-core/src/core/permission.rs
// ============================================================================
// Module: Access Gate Permissions
// Description: Closed vocabulary of permission type tokens.
// Purpose: Provide stable permission labels the gate treats as opaque.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Permission types are opaque tokens inside the gate: the checker compares
//! them for equality and iterates over them, but never interprets ordering
//! or implication between levels. Which level suffices for which operation
//! is the caller's decision; whether a principal holds a level is the
//! permission evaluator's.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Permission Types
// ============================================================================

/// Permission type token granted to principals.
///
/// # Invariants
/// - Variants are stable for programmatic handling; labels never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionType {
    /// Instance-wide administrator; bypasses workspace-scoped checks.
    InstanceAdmin,
    /// Full control over a workspace.
    WorkspaceAdmin,
    /// Edit rights within a workspace.
    WorkspaceEditor,
    /// Run rights within a workspace.
    WorkspaceRunner,
    /// Read-only rights within a workspace.
    WorkspaceReader,
}

impl PermissionType {
    /// Returns the stable label used in grants documents and audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InstanceAdmin => "instance_admin",
            Self::WorkspaceAdmin => "workspace_admin",
            Self::WorkspaceEditor => "workspace_editor",
            Self::WorkspaceRunner => "workspace_runner",
            Self::WorkspaceReader => "workspace_reader",
        }
    }
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
