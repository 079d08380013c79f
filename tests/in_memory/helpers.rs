//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use questboard::quest::{
    adapters::memory::{InMemoryTaskApi, RecordingNotifier},
    cache::QuestCache,
    config::QuestBoardConfig,
    domain::{RawTask, WorkspaceId},
    services::{QuestBoardController, QuestRepository},
};
use rstest::fixture;
use std::sync::Arc;

/// Controller type wired to in-memory adapters.
pub type TestController = QuestBoardController<InMemoryTaskApi, RecordingNotifier, DefaultClock>;

/// In-memory adapters plus the controller built over them.
pub struct Board {
    /// Scripted task service.
    pub api: InMemoryTaskApi,
    /// Recorded notices.
    pub notifier: RecordingNotifier,
    /// Shared cache.
    pub cache: QuestCache,
    /// Controller under test.
    pub controller: TestController,
    /// Workspace seeded by the fixture.
    pub workspace: WorkspaceId,
}

/// Provides a board with a seeded workspace.
#[fixture]
pub fn board() -> Board {
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
    let workspace = WorkspaceId::new("cohort-7").expect("valid workspace");
    api.seed(&workspace, curriculum())
        .expect("seeding should succeed");

    Board {
        api,
        notifier,
        cache,
        controller: QuestBoardController::new(repository),
        workspace,
    }
}

/// Backend records for a small curriculum.
#[must_use]
pub fn curriculum() -> Vec<RawTask> {
    vec![
        RawTask::new("q-closures", "Closures", "To Do")
            .with_priority("medium")
            .with_category("Rust")
            .with_description("Capture environments by reference and by move"),
        RawTask::new("q-lifetimes", "Lifetimes", "Backlog")
            .with_priority("high")
            .with_category("Rust"),
        RawTask::new("q-cargo", "Cargo workspaces", "Done")
            .with_category("Tooling")
            .with_stars(30),
        RawTask::new("q-iterators", "Iterators", "In Progress")
            .with_priority("medium")
            .with_category("Rust")
            .with_stars(60),
    ]
}
