//! Transient, user-facing notifications
//!
//! Every remote-call error is caught where it happens and turned into a [`Notice`];
//! none of them propagate further up. The presentation layer periodically drains the
//! pending notices and displays them as auto-dismissing toasts.

use std::fmt::{Display, Formatter};

/// How a notice should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A short, transient message for the user
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "{}", self.message),
            NoticeLevel::Warning => write!(f, "warning: {}", self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Collects notices for the presentation layer, mirroring each one to the log
#[derive(Debug, Default)]
pub struct Feedback {
    pending: Vec<Notice>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a successful operation
    pub fn success(&mut self, text: &str) {
        log::info!("{}", text);
        self.push(NoticeLevel::Success, text);
    }
    /// Report something worth the user's attention, that is not a failure
    pub fn warning(&mut self, text: &str) {
        log::warn!("{}", text);
        self.push(NoticeLevel::Warning, text);
    }
    /// Report a failed operation
    pub fn error(&mut self, text: &str) {
        log::error!("{}", text);
        self.push(NoticeLevel::Error, text);
    }

    fn push(&mut self, level: NoticeLevel, text: &str) {
        self.pending.push(Notice { level, message: text.to_string() });
    }

    /// Hands the pending notices over to the caller, leaving none behind
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
