//! Domain model for the quest workflow.
//!
//! Quests are mapped from backend task records or synthesized locally when
//! the backend cannot supply any. All types here are pure and free of
//! infrastructure concerns.

mod difficulty;
mod error;
mod ids;
pub mod mapper;
mod quest;
mod raw;
mod status;
pub mod synthesizer;

pub use difficulty::Difficulty;
pub use error::QuestDomainError;
pub use ids::{QuestId, SYNTHETIC_ID_PREFIX, WorkspaceId};
pub use quest::{DEFAULT_CATEGORY, DEFAULT_ESTIMATED_TIME, Quest, QuestData, QuestView};
pub use raw::RawTask;
pub use status::{QuestStatus, TransitionTarget};
