//! Error types for quest domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain quest values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuestDomainError {
    /// The workspace identifier is empty after trimming.
    #[error("workspace identifier must not be empty")]
    EmptyWorkspace,

    /// A backend task record carried a lifecycle status outside the known
    /// set.
    #[error("unknown quest status: {0}")]
    UnknownStatus(String),

    /// A backend task record carried an empty identifier.
    #[error("backend task identifier must not be empty")]
    EmptyTaskId,
}
