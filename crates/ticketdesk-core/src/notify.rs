//! User-facing notification sink.
//!
//! The store reports outcomes ("Ticket created successfully", ...) through a
//! [`Notifier`]. Delivery is fire-and-forget: nothing the sink does can fail
//! or alter a store operation.

use serde::Serialize;
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Receives notices emitted by the store.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Forwards notices to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Error => tracing::warn!("{}", notice.message),
        }
    }
}

/// Buffers notices so a front end can render them after an operation.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far.
    pub fn drain(&self) -> Vec<Notice> {
        self.notices.take()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_log_collects_in_order_and_drains() {
        let log = NoticeLog::new();
        log.notify(Notice::success("one"));
        log.notify(Notice::error("two"));
        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Notice::success("one"));
        assert_eq!(drained[1].level, NoticeLevel::Error);
        assert!(log.drain().is_empty());
    }

    #[test]
    fn borrowed_notifier_forwards() {
        let log = NoticeLog::new();
        let by_ref: &NoticeLog = &log;
        Notifier::notify(&by_ref, Notice::success("via ref"));
        assert_eq!(log.drain(), vec![Notice::success("via ref")]);
    }
}
