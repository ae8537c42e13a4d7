//! Transient user notices
//!
//! The session pushes a notice for every user-visible outcome (validation
//! failures, degraded network calls, confirmations). The caller drains and
//! displays them. When the board is full the oldest notice is dropped.

use parking_lot::Mutex;
use std::collections::VecDeque;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation or neutral information
    Info,
    /// Something failed but the session continues
    Error,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Short heading
    pub title: String,
    /// Detail line
    pub description: String,
}

impl Notice {
    /// Informational notice
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Error notice
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

/// Bounded queue of undrained notices
#[derive(Debug)]
pub struct NoticeBoard {
    capacity: usize,
    queue: Mutex<VecDeque<Notice>>,
}

impl NoticeBoard {
    /// Board keeping at most `capacity` notices
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Add a notice
    pub fn push(&self, notice: Notice) {
        let mut queue = self.queue.lock();
        if queue.len() == self.capacity {
            queue.pop_front();
        }
        queue.push_back(notice);
    }

    /// Remove and return every notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        self.queue.lock().drain(..).collect()
    }

    /// Number of waiting notices
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Whether no notices are waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let board = NoticeBoard::new(2);
        board.push(Notice::error("one"));
        board.push(Notice::error("two"));
        board.push(Notice::info("Deleted", "three"));

        let drained = board.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].description, "two");
        assert_eq!(drained[1].level, NoticeLevel::Info);
        assert!(board.is_empty());
    }
}
