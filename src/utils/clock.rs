use async_trait::async_trait;
use tokio::time::Instant;

/// Source of time for the session. Abstracted so the stopwatch can be driven by tokio's paused
/// clock in tests.
#[async_trait]
pub trait Clock: Sync + Send + 'static {
    fn instant(&self) -> Instant;

    async fn sleep_until(&self, instant: Instant);
}

pub struct DefaultClock;

#[async_trait]
impl Clock for DefaultClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, instant: Instant) {
        tokio::time::sleep_until(instant).await;
    }
}
