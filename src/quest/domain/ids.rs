//! Identifier types for the quest domain.

use super::QuestDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display prefix reserved for synthetic quest identifiers.
pub const SYNTHETIC_ID_PREFIX: &str = "synthetic-";

/// Tenant scope under which quests are partitioned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Creates a validated workspace identifier.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::EmptyWorkspace`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, QuestDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestDomainError::EmptyWorkspace);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WorkspaceId {
    type Error = QuestDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkspaceId> for String {
    fn from(value: WorkspaceId) -> Self {
        value.0
    }
}

impl AsRef<str> for WorkspaceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quest identifier tagged with its origin.
///
/// The variant is fixed when the quest is built: mapped backend records get
/// [`QuestId::Backend`], placeholder quests get [`QuestId::Synthetic`]. Ids
/// of different variants never compare equal, even when their display
/// strings coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "origin", content = "value", rename_all = "snake_case")]
pub enum QuestId {
    /// Identifier issued by the backend task service.
    Backend(String),
    /// Ordinal of a client-side placeholder quest.
    Synthetic(u16),
}

impl QuestId {
    /// Creates a backend-issued quest identifier.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::EmptyTaskId`] when the value is empty
    /// after trimming.
    pub fn backend(value: impl Into<String>) -> Result<Self, QuestDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestDomainError::EmptyTaskId);
        }
        Ok(Self::Backend(trimmed.to_owned()))
    }

    /// Creates a synthetic quest identifier.
    #[must_use]
    pub const fn synthetic(ordinal: u16) -> Self {
        Self::Synthetic(ordinal)
    }

    /// Returns `true` for placeholder quests that are never persisted.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }

    /// Returns the backend identifier, or `None` for synthetic quests.
    #[must_use]
    pub fn backend_id(&self) -> Option<&str> {
        match self {
            Self::Backend(value) => Some(value),
            Self::Synthetic(_) => None,
        }
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(value) => write!(f, "{value}"),
            Self::Synthetic(ordinal) => write!(f, "{SYNTHETIC_ID_PREFIX}{ordinal}"),
        }
    }
}
