//! Fetch-and-normalize layer over the backend task service.

use crate::quest::{
    cache::QuestCache,
    config::QuestBoardConfig,
    domain::{Quest, QuestDomainError, WorkspaceId, synthesizer},
    ports::{Notice, Notifier, TaskApi, TaskApiError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Notice shown once per load that falls back to placeholder quests.
pub const DEGRADED_NOTICE: &str = "Quest service unavailable, showing sample quests";

/// Errors returned by quest loading.
///
/// Backend failures never surface here; they degrade to placeholder data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuestError {
    /// The caller supplied an invalid argument, such as an empty workspace.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] QuestDomainError),
}

/// Result type for quest loading.
pub type QuestResult<T> = Result<T, QuestError>;

#[derive(Debug, Error)]
enum LoadFailure {
    #[error(transparent)]
    Api(#[from] TaskApiError),
    #[error("task list is empty")]
    Empty,
    #[error("no task record could be mapped")]
    Unmappable,
}

/// Loads, normalizes and caches quest collections per workspace.
pub struct QuestRepository<A, N, C>
where
    A: TaskApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    notifier: Arc<N>,
    clock: Arc<C>,
    cache: QuestCache,
    config: QuestBoardConfig,
}

impl<A, N, C> QuestRepository<A, N, C>
where
    A: TaskApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a repository writing into `cache`.
    #[must_use]
    pub const fn new(
        api: Arc<A>,
        notifier: Arc<N>,
        clock: Arc<C>,
        cache: QuestCache,
        config: QuestBoardConfig,
    ) -> Self {
        Self {
            api,
            notifier,
            clock,
            cache,
            config,
        }
    }

    /// Returns the cache this repository writes into.
    #[must_use]
    pub const fn cache(&self) -> &QuestCache {
        &self.cache
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &QuestBoardConfig {
        &self.config
    }

    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    pub(crate) fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Fetches the quests of a workspace, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`] when `workspace` is empty. No
    /// backend call is made in that case.
    pub async fn load(&self, workspace: &str) -> QuestResult<Vec<Quest>> {
        let workspace_id = WorkspaceId::new(workspace)?;
        Ok(self.load_workspace(&workspace_id).await)
    }

    /// Returns the cached quests of a workspace when fresh, else fetches.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`] when `workspace` is empty.
    pub async fn quests(&self, workspace: &str) -> QuestResult<Vec<Quest>> {
        let workspace_id = WorkspaceId::new(workspace)?;
        let now = self.clock.utc();
        if let Some(quests) = self
            .cache
            .fresh(&workspace_id, now, self.config.freshness_window)
        {
            debug!(workspace = %workspace_id, "serving quests from cache");
            return Ok(quests);
        }
        Ok(self.load_workspace(&workspace_id).await)
    }

    /// Invalidates and refetches the quests of a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`] when `workspace` is empty.
    pub async fn refresh(&self, workspace: &str) -> QuestResult<Vec<Quest>> {
        let workspace_id = WorkspaceId::new(workspace)?;
        Ok(self.refresh_workspace(&workspace_id).await)
    }

    /// Invalidates every cached workspace.
    pub fn refresh_all(&self) {
        info!("invalidating all cached quest collections");
        self.cache.invalidate_all();
    }

    pub(crate) async fn refresh_workspace(&self, workspace: &WorkspaceId) -> Vec<Quest> {
        self.cache.invalidate(workspace);
        self.load_workspace(workspace).await
    }

    /// Fetches, maps and caches the quests of a validated workspace.
    ///
    /// Falls back to placeholder quests on any backend failure and notifies
    /// the user once.
    pub async fn load_workspace(&self, workspace: &WorkspaceId) -> Vec<Quest> {
        match self.fetch(workspace).await {
            Ok(quests) => {
                let generation = self
                    .cache
                    .store(workspace, quests.clone(), false, self.clock.utc());
                debug!(%workspace, generation, count = quests.len(), "loaded quests");
                quests
            }
            Err(failure) => {
                warn!(%workspace, error = %failure, "falling back to sample quests");
                let quests = synthesizer::synthesize();
                self.cache
                    .store(workspace, quests.clone(), true, self.clock.utc());
                self.notifier.notify(Notice::info(DEGRADED_NOTICE));
                quests
            }
        }
    }

    async fn fetch(&self, workspace: &WorkspaceId) -> Result<Vec<Quest>, LoadFailure> {
        let envelope = tokio::time::timeout(
            self.config.request_timeout,
            self.api.list_tasks(workspace),
        )
        .await
        .map_err(|_| TaskApiError::Timeout)??;
        let tasks = envelope
            .into_success()?
            .map(|list| list.tasks)
            .unwrap_or_default();
        if tasks.is_empty() {
            return Err(LoadFailure::Empty);
        }

        let mut quests: Vec<Quest> = tasks
            .into_iter()
            .filter_map(|raw| {
                let task_id = raw.id.clone();
                Quest::from_raw(raw)
                    .inspect_err(|err| {
                        warn!(%workspace, task_id = %task_id, error = %err, "skipping task");
                    })
                    .ok()
            })
            .collect();
        if quests.is_empty() {
            return Err(LoadFailure::Unmappable);
        }
        quests.sort_by(Quest::board_order);
        Ok(quests)
    }
}
