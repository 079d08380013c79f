//! Quest lifecycle status and the user-driven advancement targets.

use super::{QuestDomainError, mapper};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authoritative quest lifecycle state, as reported by the task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
    /// Not yet available to the user; quests in this state are locked.
    #[serde(rename = "Backlog")]
    Backlog,
    /// Accepted but not started.
    #[serde(rename = "To Do")]
    ToDo,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Submitted and awaiting review.
    #[serde(rename = "In Review")]
    InReview,
    /// Completed.
    #[serde(rename = "Done")]
    Done,
}

impl QuestStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Backlog,
        Self::ToDo,
        Self::InProgress,
        Self::InReview,
        Self::Done,
    ];

    /// Returns the backend wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "In Review",
            Self::Done => "Done",
        }
    }

    /// Returns the completion percentage shown for this status.
    #[must_use]
    pub const fn progress(self) -> u8 {
        mapper::progress_for(self)
    }

    /// Returns `true` when the quest cannot be advanced by the user.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Backlog)
    }

    /// Returns the status a user action advances this one to, if any.
    ///
    /// Only `To Do -> In Progress` and `In Progress -> In Review` are user
    /// actions; every other status has no user-reachable successor.
    #[must_use]
    pub const fn next_user_step(self) -> Option<TransitionTarget> {
        match self {
            Self::ToDo => Some(TransitionTarget::InProgress),
            Self::InProgress => Some(TransitionTarget::InReview),
            Self::Backlog | Self::InReview | Self::Done => None,
        }
    }
}

impl TryFrom<&str> for QuestStatus {
    type Error = QuestDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "to do" | "todo" => Ok(Self::ToDo),
            "in progress" => Ok(Self::InProgress),
            "in review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            _ => Err(QuestDomainError::UnknownStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status a user may advance a quest to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionTarget {
    /// "Begin": `To Do -> In Progress`.
    #[serde(rename = "In Progress")]
    InProgress,
    /// "Continue": `In Progress -> In Review`.
    #[serde(rename = "In Review")]
    InReview,
}

impl TransitionTarget {
    /// Returns the lifecycle status this target sets.
    #[must_use]
    pub const fn status(self) -> QuestStatus {
        match self {
            Self::InProgress => QuestStatus::InProgress,
            Self::InReview => QuestStatus::InReview,
        }
    }

    /// Returns the backend wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.status().as_str()
    }

    /// Past-tense verb used in user-facing confirmations.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::InProgress => "started",
            Self::InReview => "submitted for review",
        }
    }
}

impl From<TransitionTarget> for QuestStatus {
    fn from(value: TransitionTarget) -> Self {
        value.status()
    }
}

impl fmt::Display for TransitionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
