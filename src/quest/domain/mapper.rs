//! Pure mappings from backend task fields to quest presentation values.

use super::{Difficulty, QuestStatus};

// Rewards granted when the backend does not report `starsEarned`.
const DEFAULT_REWARD_BEGINNER: u32 = 50;
const DEFAULT_REWARD_INTERMEDIATE: u32 = 100;
const DEFAULT_REWARD_ADVANCED: u32 = 150;

/// Returns the completion percentage for a lifecycle status.
///
/// This is a fixed lookup: accepted work already shows 25% and work awaiting
/// review shows 90%.
#[must_use]
pub const fn progress_for(status: QuestStatus) -> u8 {
    match status {
        QuestStatus::Done => 100,
        QuestStatus::InReview => 90,
        QuestStatus::InProgress => 50,
        QuestStatus::ToDo => 25,
        QuestStatus::Backlog => 0,
    }
}

/// Returns the difficulty for a backend priority value.
///
/// Total over all inputs: anything other than `high` or `medium`
/// (case-insensitive, surrounding whitespace ignored), including an absent
/// priority, maps to [`Difficulty::Beginner`].
#[must_use]
pub fn difficulty_for(priority: Option<&str>) -> Difficulty {
    let Some(raw) = priority else {
        return Difficulty::Beginner;
    };
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("high") {
        Difficulty::Advanced
    } else if trimmed.eq_ignore_ascii_case("medium") {
        Difficulty::Intermediate
    } else {
        Difficulty::Beginner
    }
}

/// Returns the reward for a quest, preferring the backend's star count.
#[must_use]
pub const fn reward_for(stars_earned: Option<u32>, difficulty: Difficulty) -> u32 {
    match stars_earned {
        Some(stars) => stars,
        None => match difficulty {
            Difficulty::Beginner => DEFAULT_REWARD_BEGINNER,
            Difficulty::Intermediate => DEFAULT_REWARD_INTERMEDIATE,
            Difficulty::Advanced => DEFAULT_REWARD_ADVANCED,
        },
    }
}
