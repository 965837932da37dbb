// crates/access-gate-core/src/core/scope.rs
// ============================================================================
// Module: Access Gate Scopes
// Description: Closed enumeration of resource kinds an access check anchors to.
// Purpose: Map each resource kind to its resolver lookup key in one place.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A scope names the kind of resource an authorization check is anchored to.
//! Every scope maps to exactly one lookup key used to query the workspace
//! resolver, and declares whether request identifiers travel as a JSON list
//! or as a single raw value. Adding a resource kind is one variant plus one
//! row in each mapping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Lookup Keys
// ============================================================================

/// Lookup key carrying a JSON-encoded list of workspace identifiers.
pub const WORKSPACE_IDS_KEY: &str = "x-workspace-ids";
/// Lookup key carrying a single connection identifier.
pub const CONNECTION_ID_KEY: &str = "x-connection-id";
/// Lookup key carrying a single source identifier.
pub const SOURCE_ID_KEY: &str = "x-source-id";
/// Lookup key carrying a single destination identifier.
pub const DESTINATION_ID_KEY: &str = "x-destination-id";
/// Lookup key carrying a single job identifier.
pub const JOB_ID_KEY: &str = "x-job-id";

// ============================================================================
// SECTION: Scope
// ============================================================================

/// Resource kind an authorization check is anchored to.
///
/// # Invariants
/// - Variants are stable and exhaustive for authorization anchoring.
/// - `Workspace` and `WorkspaceSet` share the workspace-ids lookup key; the
///   set form additionally permits an empty identifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// One or more workspaces addressed directly.
    Workspace,
    /// A caller-assembled set of workspaces, possibly empty.
    WorkspaceSet,
    /// A connection owned by a workspace.
    Connection,
    /// A source owned by a workspace.
    Source,
    /// A destination owned by a workspace.
    Destination,
    /// A job owned by a workspace.
    Job,
}

impl Scope {
    /// Returns the resolver lookup key for this scope.
    #[must_use]
    pub const fn lookup_key(self) -> &'static str {
        match self {
            Self::Workspace | Self::WorkspaceSet => WORKSPACE_IDS_KEY,
            Self::Connection => CONNECTION_ID_KEY,
            Self::Source => SOURCE_ID_KEY,
            Self::Destination => DESTINATION_ID_KEY,
            Self::Job => JOB_ID_KEY,
        }
    }

    /// Returns whether request identifiers travel as a JSON-encoded list.
    ///
    /// Scopes without list form carry exactly one raw identifier value.
    #[must_use]
    pub const fn takes_id_list(self) -> bool {
        matches!(self, Self::Workspace | Self::WorkspaceSet)
    }

    /// Returns the stable label used in problem messages and audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::WorkspaceSet => "workspace_set",
            Self::Connection => "connection",
            Self::Source => "source",
            Self::Destination => "destination",
            Self::Job => "job",
        }
    }

    /// Returns all scopes in declaration order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Workspace,
            Self::WorkspaceSet,
            Self::Connection,
            Self::Source,
            Self::Destination,
            Self::Job,
        ]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
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
    fn workspace_scopes_share_the_list_key() {
        assert_eq!(Scope::Workspace.lookup_key(), WORKSPACE_IDS_KEY);
        assert_eq!(Scope::WorkspaceSet.lookup_key(), WORKSPACE_IDS_KEY);
        assert!(Scope::Workspace.takes_id_list());
        assert!(Scope::WorkspaceSet.takes_id_list());
    }

    #[test]
    fn single_resource_scopes_have_distinct_keys() {
        let keys = [
            Scope::Connection.lookup_key(),
            Scope::Source.lookup_key(),
            Scope::Destination.lookup_key(),
            Scope::Job.lookup_key(),
        ];
        for (index, key) in keys.iter().enumerate() {
            assert!(!Scope::all()[index + 2].takes_id_list());
            for other in keys.iter().skip(index + 1) {
                assert_ne!(key, other, "lookup keys must be distinct");
            }
        }
    }

    #[test]
    fn scope_labels_are_stable() {
        let labels: Vec<&str> = Scope::all().iter().map(|scope| scope.as_str()).collect();
        assert_eq!(
            labels,
            vec!["workspace", "workspace_set", "connection", "source", "destination", "job"]
        );
    }

    #[test]
    fn scope_serializes_as_snake_case_label() {
        let encoded = serde_json::to_string(&Scope::WorkspaceSet).unwrap();
        assert_eq!(encoded, "\"workspace_set\"");
        let decoded: Scope = serde_json::from_str("\"destination\"").unwrap();
        assert_eq!(decoded, Scope::Destination);
    }
}
