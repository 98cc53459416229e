/// Shared HTTP plumbing for provider clients
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

/// Bounds concurrent requests and spaces them out
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    last_request: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(max_concurrent: usize, max_per_minute: usize) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };

        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            last_request: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    /// Wait until a request may be sent; the permit is held by the returned guard
    pub async fn acquire(&self) -> Result<RateLimitGuard, String> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| format!("Failed to acquire rate limiter permit: {}", e))?;

        if !self.min_interval.is_zero() {
            let mut last = self.last_request.lock().await;
            if let Some(last_time) = *last {
                let elapsed = last_time.elapsed();
                if elapsed < self.min_interval {
                    tokio::time::sleep(self.min_interval - elapsed).await;
                }
            }
            *last = Some(Instant::now());
        }

        Ok(RateLimitGuard { _permit: permit })
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// RAII guard returned by [`RateLimiter::acquire`]
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}
