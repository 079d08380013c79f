//! Optimistic quest status transitions with rollback.

use crate::quest::{
    cache::QuestCache,
    domain::{Quest, QuestDomainError, QuestId, QuestStatus, TransitionTarget, WorkspaceId},
    ports::{Notice, Notifier, TaskApi, TaskApiError},
    services::QuestRepository,
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Notice text used when the backend gives no reason for a failure.
pub const GENERIC_FAILURE_NOTICE: &str = "Could not update quest status";

/// Reasons a transition is refused before any backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionRejection {
    /// Another transition for the same quest has not resolved yet.
    #[error("a transition for this quest is already in flight")]
    InFlight,
    /// The quest is not part of the cached collection.
    #[error("quest is not loaded")]
    UnknownQuest,
    /// The quest is locked in the backlog.
    #[error("quest is locked")]
    Locked,
    /// The quest is already complete.
    #[error("quest is already complete")]
    AlreadyComplete,
    /// The requested status is not one user step away.
    #[error("cannot advance quest from {from} to {to}")]
    NotReachable {
        /// Current status.
        from: QuestStatus,
        /// Requested status.
        to: TransitionTarget,
    },
}

/// Errors returned by quest transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The caller supplied an invalid argument, such as an empty workspace.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] QuestDomainError),
    /// A precondition failed; nothing was changed and nobody was notified.
    #[error("transition rejected: {0}")]
    PreconditionFailed(TransitionRejection),
    /// The backend refused or could not be reached. The optimistic change
    /// has been rolled back and the user notified.
    #[error("transition failed: {message}")]
    MutationFailed {
        /// Message shown to the user.
        message: String,
    },
}

/// Result type for quest transitions.
pub type TransitionResult<T> = Result<T, TransitionError>;

type InFlightKey = (WorkspaceId, QuestId);

/// Marks a quest as having a transition in flight until dropped.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<InFlightKey>>>,
    key: InFlightKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        set.remove(&self.key);
    }
}

/// State held for the lifetime of one transition call.
///
/// Dropped before the backend call resolves (the caller abandoned the
/// future), it restores the snapshot so the unconfirmed patch is not served
/// as fresh data.
struct PendingTransition {
    cache: QuestCache,
    workspace: WorkspaceId,
    snapshot: Quest,
    patched: Quest,
    target: TransitionTarget,
    settled: bool,
    _guard: InFlightGuard,
}

impl Drop for PendingTransition {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let generation = self.cache.restore(&self.workspace, self.snapshot.clone());
        warn!(
            workspace = %self.workspace,
            quest_id = %self.snapshot.id(),
            generation,
            "abandoned quest transition restored"
        );
    }
}

/// Advances quests with an optimistic cache update and full rollback on
/// failure.
pub struct QuestTransitionService<A, N, C>
where
    A: TaskApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    repository: Arc<QuestRepository<A, N, C>>,
    in_flight: Arc<Mutex<HashSet<InFlightKey>>>,
}

impl<A, N, C> Clone for QuestTransitionService<A, N, C>
where
    A: TaskApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<A, N, C> QuestTransitionService<A, N, C>
where
    A: TaskApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a transition service over `repository` and its cache.
    #[must_use]
    pub fn new(repository: Arc<QuestRepository<A, N, C>>) -> Self {
        Self {
            repository,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Returns `true` while a transition for the quest is unresolved.
    #[must_use]
    pub fn is_in_flight(&self, workspace: &WorkspaceId, quest_id: &QuestId) -> bool {
        let set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        set.contains(&(workspace.clone(), quest_id.clone()))
    }

    /// Advances a cached quest to `target`.
    ///
    /// The cache reflects the new status before the backend is contacted.
    /// Synthetic quests are never sent to the backend; they succeed after the
    /// configured simulated delay. On success backend quests are reconciled
    /// by refetching the workspace; on failure the pre-transition snapshot is
    /// restored. Dropping the returned future before the backend answers
    /// also restores the snapshot, silently. The in-flight marker is released
    /// on every path.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidArgument`] for an empty workspace,
    /// [`TransitionError::PreconditionFailed`] when the quest cannot be
    /// advanced (no backend call, no notice), and
    /// [`TransitionError::MutationFailed`] after a rollback.
    pub async fn transition(
        &self,
        workspace: &str,
        quest_id: &QuestId,
        target: TransitionTarget,
    ) -> TransitionResult<Quest> {
        let workspace_id = WorkspaceId::new(workspace)?;
        let mut pending = self
            .begin(workspace_id, quest_id, target)
            .map_err(TransitionError::PreconditionFailed)?;

        let outcome = self.submit(&pending).await;
        pending.settled = true;
        match outcome {
            Ok(()) => Ok(self.commit(&pending).await),
            Err(err) => Err(self.rollback(&pending, &err)),
        }
    }

    fn cache(&self) -> &QuestCache {
        self.repository.cache()
    }

    /// Checks preconditions, claims the in-flight marker and applies the
    /// optimistic patch. Never suspends.
    fn begin(
        &self,
        workspace: WorkspaceId,
        quest_id: &QuestId,
        target: TransitionTarget,
    ) -> Result<PendingTransition, TransitionRejection> {
        let key = (workspace, quest_id.clone());
        let mut set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let checked = if set.contains(&key) {
            Err(TransitionRejection::InFlight)
        } else {
            self.cache()
                .find(&key.0, quest_id)
                .ok_or(TransitionRejection::UnknownQuest)
                .and_then(|quest| check_advance(&quest, target).map(|()| quest))
        };
        let snapshot = match checked {
            Ok(quest) => quest,
            Err(rejection) => {
                debug!(workspace = %key.0, %quest_id, %rejection, "transition rejected");
                return Err(rejection);
            }
        };
        set.insert(key.clone());
        drop(set);

        let guard = InFlightGuard {
            set: Arc::clone(&self.in_flight),
            key,
        };
        let workspace = guard.key.0.clone();
        let patched = snapshot.with_status(target.status());
        let generation = self.cache().patch(&workspace, patched.clone());
        debug!(%workspace, %quest_id, ?generation, %target, "applied optimistic patch");

        Ok(PendingTransition {
            cache: self.cache().clone(),
            workspace,
            snapshot,
            patched,
            target,
            settled: false,
            _guard: guard,
        })
    }

    async fn submit(&self, pending: &PendingTransition) -> Result<(), TaskApiError> {
        let config = self.repository.config();
        match pending.snapshot.id() {
            QuestId::Synthetic(_) => {
                tokio::time::sleep(config.synthetic_delay).await;
                Ok(())
            }
            QuestId::Backend(task_id) => {
                let envelope = tokio::time::timeout(
                    config.request_timeout,
                    self.repository
                        .api()
                        .change_status(&pending.workspace, task_id, pending.target),
                )
                .await
                .map_err(|_| TaskApiError::Timeout)??;
                envelope.into_success().map(|_| ())
            }
        }
    }

    async fn commit(&self, pending: &PendingTransition) -> Quest {
        let workspace = &pending.workspace;
        let quest_id = pending.snapshot.id();
        let quest = if quest_id.is_synthetic() {
            let generation = self.cache().commit(workspace);
            debug!(%workspace, %quest_id, generation, "committed synthetic transition");
            pending.patched.clone()
        } else {
            self.repository.refresh_workspace(workspace).await;
            self.cache()
                .find(workspace, quest_id)
                .unwrap_or_else(|| pending.patched.clone())
        };

        info!(%workspace, %quest_id, target = %pending.target, "quest transition committed");
        self.repository.notifier().notify(Notice::success(format!(
            "Quest \"{}\" {}",
            pending.snapshot.title(),
            pending.target.verb()
        )));
        quest
    }

    fn rollback(&self, pending: &PendingTransition, err: &TaskApiError) -> TransitionError {
        let workspace = &pending.workspace;
        let quest_id = pending.snapshot.id();
        let generation = self.cache().restore(workspace, pending.snapshot.clone());
        warn!(%workspace, %quest_id, generation, error = %err, "quest transition rolled back");

        let message = err
            .server_message()
            .map_or_else(|| GENERIC_FAILURE_NOTICE.to_owned(), str::to_owned);
        self.repository
            .notifier()
            .notify(Notice::error(message.clone()));
        TransitionError::MutationFailed { message }
    }
}

/// Checks that a user may advance `quest` to `target` in one step.
fn check_advance(quest: &Quest, target: TransitionTarget) -> Result<(), TransitionRejection> {
    if quest.is_locked() {
        return Err(TransitionRejection::Locked);
    }
    if quest.is_complete() {
        return Err(TransitionRejection::AlreadyComplete);
    }
    if quest.status().next_user_step() != Some(target) {
        return Err(TransitionRejection::NotReachable {
            from: quest.status(),
            to: target,
        });
    }
    Ok(())
}
