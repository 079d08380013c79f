//! Notifier that forwards notices to `tracing`.

use crate::quest::ports::{Notice, NoticeKind, Notifier};
use tracing::{info, warn};

/// Notifier for headless use: every notice becomes a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info | NoticeKind::Success => {
                info!(kind = ?notice.kind, text = %notice.text, "notice");
            }
            NoticeKind::Error => warn!(text = %notice.text, "notice"),
        }
    }
}
