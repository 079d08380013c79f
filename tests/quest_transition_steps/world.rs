//! Shared world state for quest transition BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use questboard::quest::{
    adapters::memory::{InMemoryTaskApi, RecordingNotifier},
    cache::QuestCache,
    config::QuestBoardConfig,
    domain::{Quest, WorkspaceId},
    services::{QuestBoardController, QuestRepository, TransitionError},
};
use rstest::fixture;

/// Controller type used by the BDD world.
pub type TestController = QuestBoardController<InMemoryTaskApi, RecordingNotifier, DefaultClock>;

/// Scenario world for quest transition behaviour tests.
pub struct QuestWorld {
    pub api: InMemoryTaskApi,
    pub notifier: RecordingNotifier,
    pub cache: QuestCache,
    pub controller: TestController,
    pub workspace: Option<WorkspaceId>,
    pub board: Vec<Quest>,
    pub last_transition_result: Option<Result<Quest, TransitionError>>,
}

impl QuestWorld {
    /// Creates a world with in-memory adapters and no workspace.
    #[must_use]
    pub fn new() -> Self {
        let api = InMemoryTaskApi::new();
        let notifier = RecordingNotifier::new();
        let cache = QuestCache::new();
        let repository = Arc::new(QuestRepository::new(
            Arc::new(api.clone()),
            Arc::new(notifier.clone()),
            Arc::new(DefaultClock),
            cache.clone(),
            QuestBoardConfig::immediate(),
        ));

        Self {
            api,
            notifier,
            cache,
            controller: QuestBoardController::new(repository),
            workspace: None,
            board: Vec::new(),
            last_transition_result: None,
        }
    }

    /// Returns the scenario workspace.
    ///
    /// # Errors
    ///
    /// Returns an error when no workspace has been set up.
    pub fn workspace(&self) -> Result<&WorkspaceId, eyre::Report> {
        self.workspace
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing workspace in scenario world"))
    }
}

impl Default for QuestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> QuestWorld {
    QuestWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
