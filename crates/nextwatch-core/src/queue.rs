use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs async tasks strictly one after another with a pause between them,
/// keeping bursts of metadata lookups under the provider's rate limits.
#[derive(Debug, Clone, Copy)]
pub struct RequestQueue {
    delay: Duration,
}

impl RequestQueue {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Results come back in submission order. A task only starts after the
    /// previous one has finished and the delay has elapsed.
    pub async fn run<I, T, F, Fut>(&self, items: I, mut task: F) -> Vec<T>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = T>,
    {
        let mut results = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            results.push(task(item).await);
        }
        debug!(tasks = results.len(), "Request queue drained");
        results
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}
