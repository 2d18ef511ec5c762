//! Trailing-edge debouncer driven by a generation counter.
//!
//! Each `trigger` bumps the generation and spawns a timer. When a timer
//! elapses it runs its action only if no newer trigger arrived meanwhile.
//! Once an action has started it is never cancelled.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Quiet period before a suggestions request is issued.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedules `action` after the quiet period, superseding any pending one.
    /// The returned handle completes when the timer has elapsed and the action
    /// (if still current) has finished.
    pub fn trigger<F, Fut>(&self, action: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != ticket {
                trace!("Debounce generation {ticket} superseded");
                return;
            }
            action().await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn bump(count: &Arc<AtomicUsize>) -> impl FnOnce() -> std::future::Ready<()> + Send + 'static {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let debouncer = Debouncer::default();
        let count = counter();

        let handle = debouncer.trigger(bump(&count));
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        handle.await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_trigger() {
        let debouncer = Debouncer::default();
        let count = counter();

        let mut handles = Vec::new();
        for _ in 0..5 {
            handles.push(debouncer.trigger(bump(&count)));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_triggers_each_fire() {
        let debouncer = Debouncer::default();
        let count = counter();

        debouncer.trigger(bump(&count)).await.unwrap();
        debouncer.trigger(bump(&count)).await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_action_is_not_cancelled() {
        let debouncer = Debouncer::default();
        let count = counter();

        let slow = {
            let count = Arc::clone(&count);
            move || async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                count.fetch_add(1, Ordering::SeqCst);
            }
        };
        let first = debouncer.trigger(slow);
        tokio::time::sleep(Duration::from_millis(400)).await;

        // A newer trigger arrives while the first action is in flight
        let second = debouncer.trigger(bump(&count));
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
