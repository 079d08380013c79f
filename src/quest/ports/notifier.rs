//! User-facing notification port.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Informational, e.g. placeholder data is shown.
    Info,
    /// A user action succeeded.
    Success,
    /// A user action failed and was rolled back.
    Error,
}

/// Transient, dismissable message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Message text.
    pub text: String,
}

impl Notice {
    /// Creates an informational notice.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    /// Creates a success notice.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Notification channel towards the UI layer.
pub trait Notifier: Send + Sync {
    /// Publishes a notice. Delivery is best effort and never fails.
    fn notify(&self, notice: Notice);
}
