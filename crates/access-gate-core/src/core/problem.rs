// crates/access-gate-core/src/core/problem.rs
// ============================================================================
// Module: Access Gate Problems
// Description: Boundary problem vocabulary raised toward API callers.
// Purpose: Provide stable problem kinds with HTTP-equivalent severity tiers.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Problems are the caller-facing failure vocabulary of the gate: pure data
//! carrying a stable machine-readable kind, a human-readable message, an
//! HTTP-equivalent severity tier, and a documentation anchor. Rendering a
//! problem onto a concrete transport stays outside this crate. Callers must
//! branch on [`ProblemKind`], never on message text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base URI for published problem documentation anchors.
const PROBLEM_DOC_BASE: &str = "https://docs.access-gate.dev/reference/errors";

// ============================================================================
// SECTION: Problem Kinds
// ============================================================================

/// Machine-readable problem category.
///
/// # Invariants
/// - Variants, labels, and status tiers are stable for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    /// Request was understood but is not allowed.
    Forbidden,
    /// Referenced entity does not exist.
    NotFound,
    /// Request conflicts with concurrent state.
    Conflict,
    /// Request is well-formed but semantically unusable.
    UnprocessableInput,
}

impl ProblemKind {
    /// Returns the stable kind label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::NotFound => "not-found",
            Self::Conflict => "conflict",
            Self::UnprocessableInput => "unprocessable-input",
        }
    }

    /// Returns the HTTP-equivalent severity tier for the kind.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::UnprocessableInput => 422,
        }
    }

    /// Returns the documentation anchor URI for the kind.
    #[must_use]
    pub fn doc_uri(self) -> String {
        format!("{PROBLEM_DOC_BASE}#{}", self.as_str())
    }
}

// ============================================================================
// SECTION: Problems
// ============================================================================

/// Boundary problem raised toward callers.
///
/// # Invariants
/// - Messages are diagnostic detail only; the kind is the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    /// Request was understood but is not allowed.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Request conflicts with concurrent state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Request is well-formed but semantically unusable.
    #[error("unprocessable input: {0}")]
    UnprocessableInput(String),
}

impl Problem {
    /// Returns the machine-readable kind for this problem.
    #[must_use]
    pub const fn kind(&self) -> ProblemKind {
        match self {
            Self::Forbidden(_) => ProblemKind::Forbidden,
            Self::NotFound(_) => ProblemKind::NotFound,
            Self::Conflict(_) => ProblemKind::Conflict,
            Self::UnprocessableInput(_) => ProblemKind::UnprocessableInput,
        }
    }

    /// Returns the HTTP-equivalent severity tier for this problem.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.kind().status()
    }

    /// Returns the documentation anchor URI for this problem.
    #[must_use]
    pub fn doc_uri(&self) -> String {
        self.kind().doc_uri()
    }

    /// Returns the human-readable message detail.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::UnprocessableInput(message) => message,
        }
    }
}
