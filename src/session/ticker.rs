use std::time::Duration;

use tokio::time::Instant;

use crate::utils::clock::Clock;

/// Repeating timer that can be switched on and off. A stopped ticker never fires, so stopping
/// it from the same loop that awaits [Ticker::wait] guarantees no further ticks.
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Schedules the first tick one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }

    /// Resolves on the next tick. Pending forever while the ticker is stopped. Dropping the
    /// returned future before it resolves leaves the schedule untouched.
    pub async fn wait(&mut self, clock: &dyn Clock) {
        let Some(next) = self.next else {
            return std::future::pending().await;
        };
        clock.sleep_until(next).await;
        self.next = Some(next + self.period);
    }
}
