//! Application services for the quest workflow.

mod board;
mod repository;
mod transition;

pub use board::{
    BoardFilter, BoardQuery, BoardQueryError, BoardSort, BoardStats, QuestBoardController,
    QuestBoardView, StatSample,
};
pub use repository::{DEGRADED_NOTICE, QuestError, QuestRepository, QuestResult};
pub use transition::{
    GENERIC_FAILURE_NOTICE, QuestTransitionService, TransitionError, TransitionRejection,
    TransitionResult,
};
