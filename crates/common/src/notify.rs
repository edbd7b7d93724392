use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

/// How long a toast stays on screen.
pub const TOAST_DWELL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    created: Instant,
}

impl Toast {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= TOAST_DWELL
    }
}

/// Transient, auto-dismissing user-visible messages.
///
/// Concurrent notifications stack rather than replace. `notify` cannot
/// fail; with no display surface attached the queue simply drains
/// unseen, which is logged and nothing more.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        debug!(?severity, %message, "toast");
        self.queue.push_back(Toast {
            message,
            severity,
            created: Instant::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// Drops expired toasts and returns the ones still visible,
    /// oldest first.
    pub fn visible(&mut self) -> Vec<Toast> {
        let now = Instant::now();
        while matches!(self.queue.front(), Some(t) if t.expired(now)) {
            self.queue.pop_front();
        }
        self.queue.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_stack_in_order() {
        let mut n = Notifier::new();
        n.success("salvo");
        n.warning("atenção");
        let visible = n.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].message, "salvo");
        assert_eq!(visible[1].severity, Severity::Warning);
    }

    #[test]
    fn expired_toasts_are_dropped() {
        let mut n = Notifier::new();
        n.info("velho");
        // Force expiry instead of sleeping through the dwell time.
        n.queue.front_mut().unwrap().created = Instant::now() - TOAST_DWELL;
        assert!(n.visible().is_empty());
        assert!(n.is_empty());
    }
}
