//! Scripted in-memory task service for tests and offline demos.

use crate::quest::{
    domain::{RawTask, TransitionTarget, WorkspaceId},
    ports::{Envelope, TaskApi, TaskApiError, TaskApiResult, TaskList},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Semaphore;

/// Failure the in-memory service answers with instead of serving a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// Transport-level error with a diagnostic.
    Transport(String),
    /// Non-success envelope with an optional server message.
    Rejected(Option<String>),
    /// Request timeout.
    Timeout,
}

impl ScriptedFailure {
    fn into_result<T>(self) -> TaskApiResult<Envelope<T>> {
        match self {
            Self::Transport(reason) => Err(TaskApiError::transport(std::io::Error::other(reason))),
            Self::Rejected(message) => Ok(Envelope::error(message)),
            Self::Timeout => Err(TaskApiError::Timeout),
        }
    }
}

/// Recorded `change_status` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeCall {
    /// Workspace the call targeted.
    pub workspace: WorkspaceId,
    /// Backend task identifier.
    pub task_id: String,
    /// Requested status.
    pub target: TransitionTarget,
}

/// In-memory task service.
///
/// Serves seeded task records per workspace, applies status changes to
/// them, and can be scripted to fail or to hold status changes until
/// released.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskApi {
    state: Arc<RwLock<InMemoryTaskApiState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskApiState {
    tasks: HashMap<WorkspaceId, Vec<RawTask>>,
    list_failure: Option<ScriptedFailure>,
    change_failure: Option<ScriptedFailure>,
    list_calls: usize,
    change_calls: Vec<StatusChangeCall>,
    gate: Option<Arc<Semaphore>>,
}

impl InMemoryTaskApi {
    /// Creates a service with no workspaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskApiResult<RwLockReadGuard<'_, InMemoryTaskApiState>> {
        self.state
            .read()
            .map_err(|err| TaskApiError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskApiResult<RwLockWriteGuard<'_, InMemoryTaskApiState>> {
        self.state
            .write()
            .map_err(|err| TaskApiError::transport(std::io::Error::other(err.to_string())))
    }

    /// Replaces the task records of a workspace.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn seed(&self, workspace: &WorkspaceId, tasks: Vec<RawTask>) -> TaskApiResult<()> {
        self.write()?.tasks.insert(workspace.clone(), tasks);
        Ok(())
    }

    /// Makes every listing answer with `failure`, or serve normally when
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_listing(&self, failure: Option<ScriptedFailure>) -> TaskApiResult<()> {
        self.write()?.list_failure = failure;
        Ok(())
    }

    /// Makes every status change answer with `failure`, or succeed when
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_changes(&self, failure: Option<ScriptedFailure>) -> TaskApiResult<()> {
        self.write()?.change_failure = failure;
        Ok(())
    }

    /// Holds every subsequent status change until released.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn hold_changes(&self) -> TaskApiResult<()> {
        self.write()?.gate = Some(Arc::new(Semaphore::new(0)));
        Ok(())
    }

    /// Lets `count` held status changes proceed.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn release_changes(&self, count: usize) -> TaskApiResult<()> {
        if let Some(gate) = self.read()?.gate.as_ref() {
            gate.add_permits(count);
        }
        Ok(())
    }

    /// Returns the task records of a workspace.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn tasks(&self, workspace: &WorkspaceId) -> TaskApiResult<Vec<RawTask>> {
        Ok(self
            .read()?
            .tasks
            .get(workspace)
            .cloned()
            .unwrap_or_default())
    }

    /// Returns how many listings were requested.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn list_calls(&self) -> TaskApiResult<usize> {
        Ok(self.read()?.list_calls)
    }

    /// Returns every status change requested so far.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn change_calls(&self) -> TaskApiResult<Vec<StatusChangeCall>> {
        Ok(self.read()?.change_calls.clone())
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_tasks(&self, workspace: &WorkspaceId) -> TaskApiResult<Envelope<TaskList>> {
        let mut state = self.write()?;
        state.list_calls += 1;
        if let Some(failure) = state.list_failure.clone() {
            return failure.into_result();
        }
        let tasks = state.tasks.get(workspace).cloned().unwrap_or_default();
        Ok(Envelope::success(TaskList::new(tasks)))
    }

    async fn change_status(
        &self,
        workspace: &WorkspaceId,
        task_id: &str,
        target: TransitionTarget,
    ) -> TaskApiResult<Envelope<RawTask>> {
        let gate = {
            let mut state = self.write()?;
            state.change_calls.push(StatusChangeCall {
                workspace: workspace.clone(),
                task_id: task_id.to_owned(),
                target,
            });
            state.gate.clone()
        };
        if let Some(gate) = gate {
            gate.acquire()
                .await
                .map_err(TaskApiError::transport)?
                .forget();
        }

        let mut state = self.write()?;
        if let Some(failure) = state.change_failure.clone() {
            return failure.into_result();
        }
        let record = state
            .tasks
            .get_mut(workspace)
            .and_then(|tasks| tasks.iter_mut().find(|task| task.id == task_id));
        match record {
            Some(task) => {
                task.status = target.as_str().to_owned();
                Ok(Envelope::success(task.clone()))
            }
            None => Ok(Envelope::error(Some(format!("Task {task_id} not found")))),
        }
    }
}
