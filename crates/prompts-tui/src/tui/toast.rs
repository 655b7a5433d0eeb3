//! Transient notification shown below the results

use std::time::{Duration, Instant};

/// How long a toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Toast notification state
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self::shown_at(message, duration, Instant::now())
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            is_error: true,
            ..Self::new(message, duration)
        }
    }

    pub fn shown_at(message: impl Into<String>, duration: Duration, now: Instant) -> Self {
        Self {
            message: message.into(),
            expires_at: now + duration,
            is_error: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_duration() {
        let t0 = Instant::now();
        let toast = Toast::shown_at("Copied to clipboard!", TOAST_DURATION, t0);
        assert!(!toast.is_expired_at(t0));
        assert!(!toast.is_expired_at(t0 + Duration::from_millis(1999)));
        assert!(toast.is_expired_at(t0 + Duration::from_millis(2000)));
        assert!(toast.is_expired_at(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_error_toast() {
        let toast = Toast::error("Clipboard not available", TOAST_DURATION);
        assert!(toast.is_error);
        assert!(!toast.is_expired());
    }
}
