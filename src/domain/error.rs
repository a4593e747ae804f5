//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Level;

/// Domain errors represent violations of the classification's structure.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("line {line}: malformed identifier '{id}': {reason}")]
    MalformedIdentifier {
        line: u64,
        id: String,
        reason: String,
    },

    #[error("line {line}: {level} '{id}' has no parent at {path} (rows must list parents before children)")]
    MissingAncestor {
        line: u64,
        id: String,
        level: Level,
        path: String,
    },

    #[error("line {line}: required column '{field}' is missing")]
    MissingField { line: u64, field: &'static str },
}

impl DomainError {
    /// Source line the error refers to.
    pub fn line(&self) -> u64 {
        match self {
            DomainError::MalformedIdentifier { line, .. }
            | DomainError::MissingAncestor { line, .. }
            | DomainError::MissingField { line, .. } => *line,
        }
    }
}
