// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::{Mutex, PoisonError};
use tokio::time::{Duration, Instant};

/// Leading-edge throttle.
///
/// The first call in a burst is let through and opens a window of `window`;
/// every call arriving while that window is open is dropped. Dropped calls
/// never extend the window and are never replayed.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    last_fire: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fire: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Try to open a window at `now`. Returns `false` if the call must be dropped.
    pub fn try_acquire(&self, now: Instant) -> bool {
        let mut last = self
            .last_fire
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(last_instant) = *last {
            let elapsed = now.saturating_duration_since(last_instant);
            if elapsed < self.window {
                tracing::trace!(
                    target: "musicbrainz",
                    "throttled: window closes in {:?}",
                    self.window - elapsed
                );
                return false;
            }
        }

        *last = Some(now);
        true
    }

    /// [`try_acquire`](Self::try_acquire) against the runtime clock.
    pub fn acquire_now(&self) -> bool {
        self.try_acquire(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_fires() {
        let throttle = Throttle::new(Duration::from_millis(500));
        assert!(throttle.try_acquire(Instant::now()));
    }

    #[test]
    fn test_calls_inside_window_are_dropped() {
        let throttle = Throttle::new(Duration::from_millis(500));
        let start = Instant::now();

        assert!(throttle.try_acquire(start));
        let fired = (1..=10)
            .map(|i| start + Duration::from_millis(i * 49))
            .filter(|t| throttle.try_acquire(*t))
            .count();
        assert_eq!(fired, 0);
    }

    #[test]
    fn test_window_reopens_at_boundary() {
        let throttle = Throttle::new(Duration::from_millis(500));
        let start = Instant::now();

        assert!(throttle.try_acquire(start));
        assert!(!throttle.try_acquire(start + Duration::from_millis(499)));
        assert!(throttle.try_acquire(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_dropped_calls_do_not_extend_window() {
        let throttle = Throttle::new(Duration::from_millis(500));
        let start = Instant::now();

        assert!(throttle.try_acquire(start));
        assert!(!throttle.try_acquire(start + Duration::from_millis(300)));
        assert!(!throttle.try_acquire(start + Duration::from_millis(450)));
        // A debounce would still be closed here.
        assert!(throttle.try_acquire(start + Duration::from_millis(600)));
    }

    #[test]
    fn test_zero_window_never_drops() {
        let throttle = Throttle::new(Duration::ZERO);
        let now = Instant::now();
        assert!(throttle.try_acquire(now));
        assert!(throttle.try_acquire(now));
    }

    #[test]
    fn test_earlier_instant_is_dropped() {
        let throttle = Throttle::new(Duration::from_millis(500));
        let start = Instant::now() + Duration::from_secs(1);
        assert!(throttle.try_acquire(start));
        assert!(!throttle.try_acquire(start - Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_now_follows_runtime_clock() {
        let throttle = Throttle::new(Duration::from_millis(500));

        assert!(throttle.acquire_now());
        assert!(!throttle.acquire_now());

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(throttle.acquire_now());
    }
}
