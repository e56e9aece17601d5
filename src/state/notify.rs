/// Transient user notifications
///
/// View logic reports outcomes through the `Notifier` trait instead of a
/// global toast system, so it can be exercised without a window. The app's
/// implementation is `Toasts`, a bounded queue whose entries expire on their own.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// Sink for user-visible notifications
pub trait Notifier {
    fn notify(&mut self, kind: ToastKind, message: &str);
}

/// A single on-screen notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    created_at: Instant,
}

/// Queue of visible toasts with auto-dismiss
#[derive(Debug)]
pub struct Toasts {
    items: VecDeque<Toast>,
    next_id: u64,
    timeout: Duration,
    capacity: usize,
}

impl Toasts {
    /// Create an empty queue.
    /// `capacity` is clamped to at least one toast.
    pub fn new(timeout: Duration, capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            next_id: 0,
            timeout,
            capacity: capacity.max(1),
        }
    }

    /// Push a toast created at `now`, dropping the oldest when full
    pub fn push_at(&mut self, kind: ToastKind, message: &str, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        if self.items.len() == self.capacity {
            self.items.pop_front();
        }

        self.items.push_back(Toast {
            id,
            kind,
            message: message.to_string(),
            created_at: now,
        });

        id
    }

    /// Drop every toast older than the timeout.
    /// Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        let timeout = self.timeout;
        self.items
            .retain(|toast| now.saturating_duration_since(toast.created_at) < timeout);
        before - self.items.len()
    }

    /// Remove a toast the user closed
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => tracing::info!(toast = message, "notification"),
            ToastKind::Failure => tracing::warn!(toast = message, "notification"),
        }
        self.push_at(kind, message, Instant::now());
    }
}
