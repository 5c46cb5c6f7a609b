//! Toast notification types.

use std::time::{Duration, Instant};

/// Severity of a toast, which drives its title and colour.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

/// Temporary notification shown over the current tab.
#[derive(Clone, Debug)]
pub struct Toast {
    /// Message to display.
    pub message: String,
    /// Severity.
    pub toast_type: ToastType,
    /// When the toast should disappear.
    pub expires: Instant,
}

impl Toast {
    /// Build a toast that expires `ttl` after `now`.
    #[must_use]
    pub fn new(message: String, toast_type: ToastType, now: Instant, ttl: Duration) -> Self {
        Self {
            message,
            toast_type,
            expires: now + ttl,
        }
    }

    /// Whether the toast should be dismissed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let now = Instant::now();
        let toast = Toast::new("hi".into(), ToastType::Info, now, Duration::from_secs(3));
        assert!(!toast.is_expired(now));
        assert!(toast.is_expired(now + Duration::from_secs(3)));
    }
}
