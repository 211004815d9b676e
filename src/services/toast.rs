//! Bounded queue of expiring notifications
//!
//! Toasts carry an explicit expiry instant. The owner calls [`ToastQueue::prune`]
//! from its tick loop; there are no per-toast timers.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default number of toasts kept at once
pub const DEFAULT_CAPACITY: usize = 5;

/// Default display time
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Newest-first toast queue
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    capacity: usize,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl ToastQueue {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Add a toast, evicting the oldest when full
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        if self.toasts.len() >= self.capacity {
            self.toasts.pop_back();
        }
        self.toasts.push_front(Toast {
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        self.toasts.len() != before
    }

    /// Remove the newest toast
    pub fn dismiss(&mut self) -> Option<Toast> {
        self.toasts.pop_front()
    }

    /// Toasts, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
