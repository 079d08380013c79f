//! Unit tests for the quest workflow.


use crate::quest::{
    adapters::memory::{InMemoryTaskApi, RecordingNotifier},
    cache::QuestCache,
    config::QuestBoardConfig,
    domain::{RawTask, TransitionTarget, WorkspaceId},
    ports::{Envelope, TaskApi, TaskApiResult, TaskList},
    services::{QuestRepository, QuestTransitionService},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub(super) struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub(super) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(super) fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(super) type TestRepository = QuestRepository<InMemoryTaskApi, RecordingNotifier, ManualClock>;
pub(super) type TestTransitions =
    QuestTransitionService<InMemoryTaskApi, RecordingNotifier, ManualClock>;

/// Wires the in-memory adapters into a repository and transition service.
pub(super) struct Harness {
    pub api: InMemoryTaskApi,
    pub notifier: RecordingNotifier,
    pub clock: ManualClock,
    pub repository: Arc<TestRepository>,
    pub transitions: TestTransitions,
    pub workspace: WorkspaceId,
}

impl Harness {
    pub(super) fn with_config(config: QuestBoardConfig) -> Self {
        let api = InMemoryTaskApi::new();
        let notifier = RecordingNotifier::new();
        let clock = ManualClock::starting_at(fixed_now());
        let repository = Arc::new(QuestRepository::new(
            Arc::new(api.clone()),
            Arc::new(notifier.clone()),
            Arc::new(clock.clone()),
            QuestCache::new(),
            config,
        ));
        let transitions = QuestTransitionService::new(Arc::clone(&repository));
        Self {
            api,
            notifier,
            clock,
            repository,
            transitions,
            workspace: WorkspaceId::new("ws-academy").expect("valid workspace"),
        }
    }

    pub(super) fn seed(&self, tasks: Vec<RawTask>) {
        self.api
            .seed(&self.workspace, tasks)
            .expect("seeding should succeed");
    }
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
pub(super) fn harness() -> Harness {
    Harness::with_config(QuestBoardConfig::immediate())
}

/// Mixed backend records covering every lifecycle status.
pub(super) fn sample_tasks() -> Vec<RawTask> {
    vec![
        RawTask::new("t-review", "Write a parser", "In Review").with_priority("high"),
        RawTask::new("t-locked", "Build a compiler", "Backlog").with_priority("high"),
        RawTask::new("t-todo", "Read the book", "To Do")
            .with_priority("low")
            .with_category("Reading")
            .with_stars(40),
        RawTask::new("t-done", "Hello world", "Done").with_stars(10),
        RawTask::new("t-progress", "Borrow checker drills", "In Progress")
            .with_priority("medium"),
    ]
}

/// Task service that never answers within any sensible timeout.
pub(super) struct StalledTaskApi;

#[async_trait]
impl TaskApi for StalledTaskApi {
    async fn list_tasks(&self, _workspace: &WorkspaceId) -> TaskApiResult<Envelope<TaskList>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Envelope::success(TaskList::default()))
    }

    async fn change_status(
        &self,
        _workspace: &WorkspaceId,
        _task_id: &str,
        _target: TransitionTarget,
    ) -> TaskApiResult<Envelope<RawTask>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Envelope::error(None))
    }
}
