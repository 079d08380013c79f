//! Port contracts for the quest workflow.
//!
//! Ports define the boundaries the quest services talk through: the backend
//! task service and the user-facing notification channel.

pub mod notifier;
pub mod task_api;

pub use notifier::{Notice, NoticeKind, Notifier};
pub use task_api::{Envelope, EnvelopeStatus, TaskApi, TaskApiError, TaskApiResult, TaskList};

#[cfg(test)]
pub use task_api::MockTaskApi;
