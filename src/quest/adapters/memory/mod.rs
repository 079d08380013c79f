//! In-memory adapters for tests and offline use.

mod notifier;
mod task_api;

pub use notifier::RecordingNotifier;
pub use task_api::{InMemoryTaskApi, ScriptedFailure, StatusChangeCall};
