//! Backend task service port and its response envelope.

use crate::quest::domain::{RawTask, TransitionTarget, WorkspaceId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task service calls.
pub type TaskApiResult<T> = Result<T, TaskApiError>;

/// Outcome label carried by every backend response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The request was accepted.
    Success,
    /// The request was rejected.
    Error,
}

/// Fixed response envelope of the task service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Outcome label.
    pub status: EnvelopeStatus,
    /// Payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable server message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Creates a success envelope carrying `data`.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    /// Creates an error envelope with an optional server message.
    #[must_use]
    pub const fn error(message: Option<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            message,
        }
    }

    /// Returns the payload of a success envelope.
    ///
    /// # Errors
    ///
    /// Returns [`TaskApiError::Rejected`] carrying the server message when
    /// the envelope status is not `success`.
    pub fn into_success(self) -> TaskApiResult<Option<T>> {
        match self.status {
            EnvelopeStatus::Success => Ok(self.data),
            EnvelopeStatus::Error => Err(TaskApiError::Rejected {
                message: self.message,
            }),
        }
    }
}

/// Payload of the task-listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Tasks in the workspace.
    #[serde(default)]
    pub tasks: Vec<RawTask>,
}

impl TaskList {
    /// Creates a task list.
    #[must_use]
    pub const fn new(tasks: Vec<RawTask>) -> Self {
        Self { tasks }
    }
}

/// Backend task service contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists the tasks of a workspace.
    async fn list_tasks(&self, workspace: &WorkspaceId) -> TaskApiResult<Envelope<TaskList>>;

    /// Advances a task to `target`.
    ///
    /// On success the envelope carries the updated record.
    async fn change_status(
        &self,
        workspace: &WorkspaceId,
        task_id: &str,
        target: TransitionTarget,
    ) -> TaskApiResult<Envelope<RawTask>>;
}

/// Errors returned by task service adapters.
#[derive(Debug, Clone, Error)]
pub enum TaskApiError {
    /// The backend answered with a non-success envelope.
    #[error("task service rejected the request: {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// Server-provided message, if any.
        message: Option<String>,
    },

    /// The request did not complete within the configured timeout.
    #[error("task service request timed out")]
    Timeout,

    /// Transport-layer failure.
    #[error("task service transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskApiError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the server-provided message, when the backend sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty()),
            Self::Timeout | Self::Transport(_) => None,
        }
    }
}
