//! Debounced save scheduling
//!
//! Every `touch()` supersedes the previous pending run. Pending runs are
//! tagged with a generation number; a timer whose generation is stale when it
//! wakes does nothing. Once a run has started it is detached from the pending
//! slot, so later touches never abort a save that is already talking to the
//! store. Runs are serialized by a gate.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Work performed when the quiet period elapses
#[async_trait]
pub trait DebouncedAction: Send + Sync + 'static {
    /// Run the action
    async fn fire(&self);
}

#[derive(Debug, Default)]
struct Pending {
    generation: u64,
    handle: Option<JoinHandle<()>>,
    closed: bool,
}

/// Trailing-edge debouncer around a [`DebouncedAction`]
pub struct SaveScheduler {
    delay: Duration,
    action: Arc<dyn DebouncedAction>,
    pending: Arc<Mutex<Pending>>,
    gate: Arc<tokio::sync::Mutex<()>>,
    runtime: Handle,
}

impl std::fmt::Debug for SaveScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveScheduler")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl SaveScheduler {
    /// Scheduler spawning its timers on `runtime`
    #[must_use]
    pub fn new(delay: Duration, action: Arc<dyn DebouncedAction>, runtime: Handle) -> Self {
        Self {
            delay,
            action,
            pending: Arc::new(Mutex::new(Pending::default())),
            gate: Arc::new(tokio::sync::Mutex::new(())),
            runtime,
        }
    }

    /// Quiet period
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet period
    pub fn touch(&self) {
        let mut pending = self.pending.lock();
        if pending.closed {
            return;
        }
        pending.generation += 1;
        let generation = pending.generation;
        if let Some(previous) = pending.handle.take() {
            previous.abort();
        }

        let delay = self.delay;
        let action = Arc::clone(&self.action);
        let slot = Arc::clone(&self.pending);
        let gate = Arc::clone(&self.gate);
        pending.handle = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut slot = slot.lock();
                if slot.generation != generation || slot.closed {
                    return;
                }
                // Detach so a later touch cannot abort the run below.
                slot.handle = None;
            }
            debug!(generation, "debounced save firing");
            let _gate = gate.lock().await;
            action.fire().await;
        }));
    }

    /// Whether a run is waiting for its quiet period
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.lock().handle.is_some()
    }

    /// Wait for any running action to finish and hold off new runs
    ///
    /// Store writes that must not interleave with a save (deleting a key the
    /// save may still be upserting) run while the returned guard is alive.
    pub async fn exclusive(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    /// Cancel the pending run and perform the action now
    pub async fn flush(&self) {
        {
            let mut pending = self.pending.lock();
            if pending.closed {
                return;
            }
            pending.generation += 1;
            if let Some(handle) = pending.handle.take() {
                handle.abort();
            }
        }
        let _gate = self.gate.lock().await;
        self.action.fire().await;
    }

    /// Drop the pending run and refuse further touches
    pub fn close(&self) {
        let mut pending = self.pending.lock();
        pending.closed = true;
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.lock().handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    #[async_trait]
    impl DebouncedAction for Counter {
        async fn fire(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn scheduler(ms: u64) -> (SaveScheduler, Arc<Counter>) {
        let counter = Arc::new(Counter::default());
        let action: Arc<dyn DebouncedAction> = counter.clone();
        (
            SaveScheduler::new(Duration::from_millis(ms), action, Handle::current()),
            counter,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once() {
        let (scheduler, counter) = scheduler(1000);
        for _ in 0..5 {
            scheduler.touch();
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
        assert!(scheduler.is_pending());

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn separated_touches_fire_separately() {
        let (scheduler, counter) = scheduler(100);
        scheduler.touch();
        tokio::time::sleep(Duration::from_millis(150)).await;
        scheduler.touch();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_runs_immediately_and_cancels_timer() {
        let (scheduler, counter) = scheduler(1000);
        scheduler.touch();
        scheduler.flush().await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    struct Slow(AtomicUsize);

    #[async_trait]
    impl DebouncedAction for Slow {
        async fn fire(&self) {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exclusive_waits_for_running_action() {
        let slow = Arc::new(Slow(AtomicUsize::new(0)));
        let action: Arc<dyn DebouncedAction> = slow.clone();
        let scheduler = SaveScheduler::new(Duration::from_millis(10), action, Handle::current());

        scheduler.touch();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(slow.0.load(Ordering::SeqCst), 0);

        let _guard = scheduler.exclusive().await;
        assert_eq!(slow.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn close_drops_pending_and_ignores_touches() {
        let (scheduler, counter) = scheduler(100);
        scheduler.touch();
        scheduler.close();
        scheduler.touch();
        scheduler.flush().await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }
}
