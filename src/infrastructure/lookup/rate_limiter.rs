use std::time::Duration;
use tokio::{sync::Mutex, time::Instant};

/// Spaces calls to one upstream endpoint at least `min_interval` apart.
///
/// The lock is held across the wait, so concurrent callers are admitted one at
/// a time and each sees the stamp left by the previous one.
pub struct RateLimiter {
    name: &'static str,
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(name: &'static str, min_interval: Duration) -> Self {
        Self {
            name,
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the interval since the previous call has elapsed, then
    /// records the current call.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::trace!(limiter = self.name, wait_ms = wait.as_millis() as u64, "throttling");
                tokio::time::sleep(wait).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}
