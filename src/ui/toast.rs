//! Toast notifications.
//!
//! The session raises notices through the [`Notifier`] trait and never waits
//! on them. [`ConsoleToast`] prints them for the terminal client;
//! [`NoticeLog`] records them for callers that inspect notices afterwards.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Notification sink for the search session.
pub trait Notifier {
    /// A page arrived; `count` is the total number of results shown.
    fn notify_ok(&mut self, count: usize);

    /// There is nothing more to load for the current query.
    fn notify_end(&mut self, count: usize);
}

/// A notice as raised by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Ok(usize),
    End(usize),
}

impl Notice {
    /// Human-readable toast text.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Ok(count) => format!("Found {count} images"),
            Self::End(0) => "No images found".to_string(),
            Self::End(count) => format!("That's all: {count} images"),
        }
    }
}

/// Prints notices to a writer (stdout by default).
pub struct ConsoleToast<W: Write> {
    out: W,
}

impl ConsoleToast<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write> ConsoleToast<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    fn show(&mut self, notice: Notice) {
        if let Err(e) = writeln!(self.out, "  >> {}", notice.message()) {
            tracing::debug!(error = %e, "failed to print toast");
        }
    }
}

impl<W: Write> Notifier for ConsoleToast<W> {
    fn notify_ok(&mut self, count: usize) {
        self.show(Notice::Ok(count));
    }

    fn notify_end(&mut self, count: usize) {
        self.show(Notice::End(count));
    }
}

/// Shared, cloneable record of raised notices.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices raised so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    fn push(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

impl Notifier for NoticeLog {
    fn notify_ok(&mut self, count: usize) {
        self.push(Notice::Ok(count));
    }

    fn notify_end(&mut self, count: usize) {
        self.push(Notice::End(count));
    }
}
