use std::time::{Duration, Instant};

pub const AUTO_DISMISS: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient message. Only one exists at a time; raising a new one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            raised_at: Instant::now(),
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < AUTO_DISMISS
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        AUTO_DISMISS.saturating_sub(now.saturating_duration_since(self.raised_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_four_seconds() {
        let note = Notification::new("Status: Running", Severity::Info);
        let start = note.raised_at;

        assert!(note.is_visible(start));
        assert!(note.is_visible(start + Duration::from_millis(3999)));
        assert!(!note.is_visible(start + AUTO_DISMISS));
        assert_eq!(note.remaining(start + Duration::from_secs(10)), Duration::ZERO);
    }
}
