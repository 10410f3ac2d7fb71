//! Short-lived status messages. Last write wins, there is no queue.

use log::info;
use std::time::{Duration, Instant};

pub const DEFAULT_NOTIFY_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug)]
pub struct Notifier {
    duration: Duration,
    current: Option<(String, Instant)>,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    /// Replaces whatever is showing and restarts the hide timer
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        info!("Notice: {}", message);
        self.current = Some((message, now));
    }

    pub fn visible(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((message, shown_at)) if now.duration_since(*shown_at) < self.duration => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFY_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_for_exactly_duration() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show("Connected", start);

        assert_eq!(notifier.visible(start), Some("Connected"));
        assert_eq!(
            notifier.visible(start + Duration::from_millis(1999)),
            Some("Connected")
        );
        assert_eq!(notifier.visible(start + Duration::from_millis(2000)), None);
    }

    #[test]
    fn test_second_message_replaces_and_restarts() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(2));
        notifier.show("first", start);

        let later = start + Duration::from_millis(1500);
        notifier.show("second", later);

        assert_eq!(notifier.visible(later), Some("second"));
        assert_eq!(
            notifier.visible(start + Duration::from_millis(3000)),
            Some("second")
        );
        assert_eq!(notifier.visible(later + Duration::from_secs(2)), None);
    }

    #[test]
    fn test_nothing_shown_initially() {
        let notifier = Notifier::default();
        assert_eq!(notifier.visible(Instant::now()), None);
    }
}
