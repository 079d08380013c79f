//! Quest board controller: filtered and sorted views plus aggregate stats.

use crate::quest::{
    cache::CacheEvent,
    domain::{Quest, QuestId, TransitionTarget},
    ports::{Notifier, TaskApi},
    services::{QuestRepository, QuestResult, QuestTransitionService, TransitionResult},
};
use mockable::Clock;
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Error returned when parsing a board filter or sort key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardQueryError {
    /// Unknown filter key.
    #[error("unknown board filter: {0}")]
    UnknownFilter(String),
    /// Unknown sort key.
    #[error("unknown board sort: {0}")]
    UnknownSort(String),
}

/// Status bucket a board view is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BoardFilter {
    /// Every quest.
    #[default]
    All,
    /// Not started and not locked.
    Available,
    /// Started but not complete.
    InProgress,
    /// Complete.
    Completed,
}

impl BoardFilter {
    /// Returns `true` when a quest with the given progress and lock state
    /// falls into this bucket.
    #[must_use]
    pub const fn accepts(self, progress: u8, locked: bool) -> bool {
        match self {
            Self::All => true,
            Self::Available => progress == 0 && !locked,
            Self::InProgress => progress > 0 && progress < 100,
            Self::Completed => progress == 100,
        }
    }

    /// Returns `true` when `quest` falls into this bucket.
    #[must_use]
    pub const fn matches(self, quest: &Quest) -> bool {
        self.accepts(quest.progress(), quest.is_locked())
    }
}

impl TryFrom<&str> for BoardFilter {
    type Error = BoardQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(BoardQueryError::UnknownFilter(value.to_owned())),
        }
    }
}

/// Ordering applied to a board view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BoardSort {
    /// Most recently created first; quests without a timestamp last.
    #[default]
    Newest,
    /// Easiest first.
    Difficulty,
    /// Highest reward first.
    Reward,
    /// Most progressed first.
    Progress,
}

impl BoardSort {
    /// Compares two quests under this ordering.
    #[must_use]
    pub fn compare(self, left: &Quest, right: &Quest) -> Ordering {
        match self {
            Self::Newest => right.created_at().cmp(&left.created_at()),
            Self::Difficulty => left.difficulty().cmp(&right.difficulty()),
            Self::Reward => right.reward().cmp(&left.reward()),
            Self::Progress => right.progress().cmp(&left.progress()),
        }
    }
}

impl TryFrom<&str> for BoardSort {
    type Error = BoardQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "difficulty" => Ok(Self::Difficulty),
            "reward" => Ok(Self::Reward),
            "progress" => Ok(Self::Progress),
            _ => Err(BoardQueryError::UnknownSort(value.to_owned())),
        }
    }
}

/// User-controlled board view parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    /// Case-insensitive text matched against title, description and
    /// category. Blank matches everything.
    pub search: String,
    /// Status bucket.
    pub filter: BoardFilter,
    /// Ordering.
    pub sort: BoardSort,
}

impl BoardQuery {
    /// Creates a query with the given search text and default filter/sort.
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: BoardFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the sort.
    #[must_use]
    pub fn with_sort(mut self, sort: BoardSort) -> Self {
        self.sort = sort;
        self
    }
}

fn matches_search(quest: &Quest, needle: &str) -> bool {
    needle.is_empty()
        || [quest.title(), quest.description(), quest.category()]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Inputs to [`BoardStats`] for one quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatSample {
    /// Completion percentage.
    pub progress: u8,
    /// Lock state.
    pub locked: bool,
    /// Completion reward.
    pub reward: u32,
}

impl From<&Quest> for StatSample {
    fn from(quest: &Quest) -> Self {
        Self {
            progress: quest.progress(),
            locked: quest.is_locked(),
            reward: quest.reward(),
        }
    }
}

/// Aggregate figures over a loaded quest collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardStats {
    /// Quests at 100%.
    pub completed: usize,
    /// Quests strictly between 0% and 100%.
    pub in_progress: usize,
    /// Unlocked quests at 0%.
    pub available: usize,
    /// Sum of rewards over completed quests.
    pub total_stars: u64,
    /// Mean progress over all quests, `0.0` when there are none.
    pub average_progress: f64,
}

impl BoardStats {
    /// Tallies stats over a collection of samples.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "average progress is a fractional presentation value"
    )]
    pub fn tally(samples: impl IntoIterator<Item = StatSample>) -> Self {
        let mut stats = Self::default();
        let mut count: u32 = 0;
        let mut progress_sum: u32 = 0;
        for sample in samples {
            count = count.saturating_add(1);
            progress_sum = progress_sum.saturating_add(u32::from(sample.progress));
            if BoardFilter::Completed.accepts(sample.progress, sample.locked) {
                stats.completed += 1;
                stats.total_stars = stats.total_stars.saturating_add(u64::from(sample.reward));
            } else if BoardFilter::InProgress.accepts(sample.progress, sample.locked) {
                stats.in_progress += 1;
            } else if BoardFilter::Available.accepts(sample.progress, sample.locked) {
                stats.available += 1;
            }
        }
        if count > 0 {
            stats.average_progress = f64::from(progress_sum) / f64::from(count);
        }
        stats
    }

    /// Tallies stats over quests.
    #[must_use]
    pub fn for_quests(quests: &[Quest]) -> Self {
        Self::tally(quests.iter().map(StatSample::from))
    }
}

/// Filtered, sorted quests together with stats over the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestBoardView {
    /// Quests matching the query, in query order.
    pub quests: Vec<Quest>,
    /// Stats over every loaded quest, independent of the query.
    pub stats: BoardStats,
}

impl QuestBoardView {
    /// Derives the view for `query` from a loaded collection.
    ///
    /// Sorting is stable, so quests that compare equal keep the repository
    /// order.
    #[must_use]
    pub fn derive(quests: &[Quest], query: &BoardQuery) -> Self {
        let needle = query.search.trim().to_lowercase();
        let mut visible: Vec<Quest> = quests
            .iter()
            .filter(|quest| query.filter.matches(quest) && matches_search(quest, &needle))
            .cloned()
            .collect();
        visible.sort_by(|left, right| query.sort.compare(left, right));
        Self {
            quests: visible,
            stats: BoardStats::for_quests(quests),
        }
    }
}

/// Orchestrates loading, view derivation and user-driven transitions.
///
/// The controller never mutates quests itself; every change goes through
/// [`QuestTransitionService`].
pub struct QuestBoardController<A, N, C>
where
    A: TaskApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    repository: Arc<QuestRepository<A, N, C>>,
    transitions: QuestTransitionService<A, N, C>,
}

impl<A, N, C> QuestBoardController<A, N, C>
where
    A: TaskApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a controller over `repository`.
    #[must_use]
    pub fn new(repository: Arc<QuestRepository<A, N, C>>) -> Self {
        let transitions = QuestTransitionService::new(Arc::clone(&repository));
        Self {
            repository,
            transitions,
        }
    }

    /// Returns the transition service used for user actions.
    #[must_use]
    pub const fn transitions(&self) -> &QuestTransitionService<A, N, C> {
        &self.transitions
    }

    /// Subscribes to cache change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.repository.cache().subscribe()
    }

    /// Loads (or reuses cached) quests and derives the board view.
    ///
    /// # Errors
    ///
    /// Returns [`super::QuestError::InvalidArgument`] when `workspace` is
    /// empty.
    pub async fn board(&self, workspace: &str, query: &BoardQuery) -> QuestResult<QuestBoardView> {
        let quests = self.repository.quests(workspace).await?;
        Ok(QuestBoardView::derive(&quests, query))
    }

    /// "Begin": moves a quest from To Do to In Progress.
    ///
    /// # Errors
    ///
    /// See [`QuestTransitionService::transition`].
    pub async fn begin(&self, workspace: &str, quest_id: &QuestId) -> TransitionResult<Quest> {
        self.transitions
            .transition(workspace, quest_id, TransitionTarget::InProgress)
            .await
    }

    /// "Continue": submits an in-progress quest for review.
    ///
    /// # Errors
    ///
    /// See [`QuestTransitionService::transition`].
    pub async fn submit_for_review(
        &self,
        workspace: &str,
        quest_id: &QuestId,
    ) -> TransitionResult<Quest> {
        self.transitions
            .transition(workspace, quest_id, TransitionTarget::InReview)
            .await
    }

    /// Refetches one workspace.
    ///
    /// # Errors
    ///
    /// Returns [`super::QuestError::InvalidArgument`] when `workspace` is
    /// empty.
    pub async fn refresh(&self, workspace: &str) -> QuestResult<Vec<Quest>> {
        self.repository.refresh(workspace).await
    }

    /// Invalidates every cached workspace (page-level refresh).
    pub fn refresh_all(&self) {
        self.repository.refresh_all();
    }
}
