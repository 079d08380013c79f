//! Quest view-model and its construction from backend records.

use super::{Difficulty, QuestDomainError, QuestId, QuestStatus, RawTask, mapper};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Effort estimate shown when the backend omits one.
pub const DEFAULT_ESTIMATED_TIME: &str = "30 min";

/// Category shown when the backend omits one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Client-facing quest.
///
/// Progress and lock state are derived from [`QuestStatus`] on every read
/// and are never stored, so they always agree with the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    id: QuestId,
    title: String,
    description: String,
    category: String,
    difficulty: Difficulty,
    status: QuestStatus,
    reward: u32,
    participants: u32,
    estimated_time: String,
    planet: Option<String>,
    link: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

/// Parameter object for building a quest from already-mapped values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestData {
    /// Quest identifier.
    pub id: QuestId,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Display category.
    pub category: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Lifecycle status.
    pub status: QuestStatus,
    /// Points granted on completion.
    pub reward: u32,
    /// Display-only participant count.
    pub participants: u32,
    /// Effort estimate.
    pub estimated_time: String,
    /// Optional themed grouping.
    pub planet: Option<String>,
    /// Optional learning-material link.
    pub link: Option<String>,
    /// Optional creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

impl Quest {
    /// Builds a quest from mapped values.
    #[must_use]
    pub fn from_data(data: QuestData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            difficulty: data.difficulty,
            status: data.status,
            reward: data.reward,
            participants: data.participants,
            estimated_time: data.estimated_time,
            planet: data.planet,
            link: data.link,
            created_at: data.created_at,
        }
    }

    /// Maps a backend task record into a quest.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::EmptyTaskId`] for a blank identifier and
    /// [`QuestDomainError::UnknownStatus`] for an unrecognised status label.
    pub fn from_raw(raw: RawTask) -> Result<Self, QuestDomainError> {
        let id = QuestId::backend(raw.id)?;
        let status = QuestStatus::try_from(raw.status.as_str())?;
        let difficulty = mapper::difficulty_for(raw.priority.as_deref());

        Ok(Self::from_data(QuestData {
            id,
            title: raw.title,
            description: raw.description,
            category: raw
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
            difficulty,
            status,
            reward: mapper::reward_for(raw.stars_earned, difficulty),
            participants: raw.participants.unwrap_or_default(),
            estimated_time: raw
                .estimated_time
                .unwrap_or_else(|| DEFAULT_ESTIMATED_TIME.to_owned()),
            planet: raw.planet,
            link: raw.link,
            created_at: raw.created_at,
        }))
    }

    /// Returns the quest identifier.
    #[must_use]
    pub const fn id(&self) -> &QuestId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the difficulty tier.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> QuestStatus {
        self.status
    }

    /// Returns the completion percentage derived from the status.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.status.progress()
    }

    /// Returns `true` when the quest is in the backlog and cannot be
    /// advanced.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.status.is_locked()
    }

    /// Returns `true` when progress has reached 100%.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.progress() == 100
    }

    /// Returns `true` for placeholder quests.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.id.is_synthetic()
    }

    /// Returns the completion reward.
    #[must_use]
    pub const fn reward(&self) -> u32 {
        self.reward
    }

    /// Returns the display-only participant count.
    #[must_use]
    pub const fn participants(&self) -> u32 {
        self.participants
    }

    /// Returns the effort estimate.
    #[must_use]
    pub fn estimated_time(&self) -> &str {
        &self.estimated_time
    }

    /// Returns the themed grouping, if any.
    #[must_use]
    pub fn planet(&self) -> Option<&str> {
        self.planet.as_deref()
    }

    /// Returns the learning-material link, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Returns the creation timestamp, if the backend supplied one.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns a copy of this quest moved to `status`.
    #[must_use]
    pub fn with_status(&self, status: QuestStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Returns the presentation shape consumed by the UI layer.
    #[must_use]
    pub fn to_view(&self) -> QuestView {
        QuestView {
            id: self.id.to_string(),
            synthetic: self.is_synthetic(),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
            progress: self.progress(),
            is_locked: self.is_locked(),
            reward: self.reward,
            status: self.status,
            participants: self.participants,
            estimated_time: self.estimated_time.clone(),
            planet: self.planet.clone(),
            link: self.link.clone(),
        }
    }

    /// Repository presentation order: unlocked first, then difficulty
    /// ascending, then title, then identifier.
    #[must_use]
    pub fn board_order(&self, other: &Self) -> Ordering {
        self.is_locked()
            .cmp(&other.is_locked())
            .then_with(|| self.difficulty.cmp(&other.difficulty))
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Serialized quest as rendered by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestView {
    /// Display identifier.
    pub id: String,
    /// Whether the quest is placeholder data.
    pub synthetic: bool,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Display category.
    pub category: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Completion percentage.
    pub progress: u8,
    /// Lock overlay flag.
    pub is_locked: bool,
    /// Completion reward.
    pub reward: u32,
    /// Lifecycle status.
    pub status: QuestStatus,
    /// Participant count.
    pub participants: u32,
    /// Effort estimate.
    pub estimated_time: String,
    /// Themed grouping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Learning-material link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
