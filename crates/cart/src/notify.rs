//! User-facing notices (toasts).
//!
//! Notices are fire-and-forget: the manager hands one to its [`Notifier`] and
//! moves on. Nothing is acknowledged and nothing blocks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use rocketshoes_core::ProductId;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational or success message.
    Info,
    /// An operation did not complete.
    Error,
}

/// A message meant for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the shopper.
    pub message: String,
    /// Product the notice is about, if any.
    pub product_id: Option<ProductId>,
    /// When the notice was raised.
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    /// An error notice about `product_id`.
    #[must_use]
    pub fn error(message: impl Into<String>, product_id: ProductId) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            product_id: Some(product_id),
            raised_at: Utc::now(),
        }
    }

    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            product_id: None,
            raised_at: Utc::now(),
        }
    }
}

/// Surface that shows notices to the shopper.
pub trait Notifier: Send + Sync {
    /// Show `notice`. Must not block.
    fn notify(&self, notice: Notice);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Notifier that only writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => {
                tracing::info!(product_id = ?notice.product_id, "{}", notice.message);
            }
            NoticeLevel::Error => {
                tracing::warn!(product_id = ?notice.product_id, "{}", notice.message);
            }
        }
    }
}

/// Notifier that keeps every notice in memory.
///
/// Clones share the same buffer, so a UI layer can poll and drain it while
/// the manager owns another clone.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every notice recorded so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    /// Messages recorded so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    /// Remove and return every recorded notice.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_buffer_between_clones() {
        let recorder = RecordingNotifier::new();
        let handle = recorder.clone();

        recorder.notify(Notice::error("Failed to add product", ProductId::new(1)));
        recorder.notify(Notice::info("Cart restored"));

        assert_eq!(
            handle.messages(),
            vec!["Failed to add product", "Cart restored"]
        );
    }

    #[test]
    fn test_drain_empties_buffer() {
        let recorder = RecordingNotifier::new();
        recorder.notify(Notice::info("hello"));

        let drained = recorder.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained.first().map(|n| n.level), Some(NoticeLevel::Info));
        assert!(recorder.notices().is_empty());
    }

    #[test]
    fn test_error_notice_carries_product() {
        let notice = Notice::error("Requested quantity is out of stock", ProductId::new(4));
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.product_id, Some(ProductId::new(4)));
    }
}
