//! Single-slot scheduler for delayed coach output.
//!
//! At most one playback task is in flight. `cancel` aborts it and bumps the epoch;
//! tasks compare the epoch they were started with before writing anything, so output
//! from a cancelled run never lands.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ReplyScheduler {
    task: Option<JoinHandle<()>>,
    epoch: u64,
}

impl ReplyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch of the current run. Changes on every `cancel`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Spawns `task` in the single slot, cancelling anything still running there.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_pending() {
            self.cancel();
        }
        self.task = Some(tokio::spawn(task));
    }

    /// Aborts the in-flight task, if any. Returns whether one was still running.
    pub fn cancel(&mut self) -> bool {
        self.epoch += 1;
        match self.task.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                debug!(epoch = self.epoch, "Cancelled pending reply playback");
                true
            }
            _ => false,
        }
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn delayed_flag(flag: Arc<AtomicBool>, after: Duration) -> impl Future<Output = ()> {
        async move {
            tokio::time::sleep(after).await;
            flag.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_task_runs_and_finishes() {
        let mut scheduler = ReplyScheduler::new();
        let flag = Arc::new(AtomicBool::new(false));

        scheduler.schedule(delayed_flag(flag.clone(), Duration::from_millis(500)));
        assert!(scheduler.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(flag.load(Ordering::SeqCst));
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_output() {
        let mut scheduler = ReplyScheduler::new();
        let flag = Arc::new(AtomicBool::new(false));

        scheduler.schedule(delayed_flag(flag.clone(), Duration::from_millis(500)));
        assert!(scheduler.cancel());
        assert!(!scheduler.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_bumps_epoch_even_when_idle() {
        let mut scheduler = ReplyScheduler::new();
        assert_eq!(scheduler.epoch(), 0);
        assert!(!scheduler.cancel());
        assert_eq!(scheduler.epoch(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_replaces_pending_task() {
        let mut scheduler = ReplyScheduler::new();
        let first = Arc::new(AtomicBool::new(false));
        let second = Arc::new(AtomicBool::new(false));

        scheduler.schedule(delayed_flag(first.clone(), Duration::from_millis(500)));
        scheduler.schedule(delayed_flag(second.clone(), Duration::from_millis(500)));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!first.load(Ordering::SeqCst));
        assert!(second.load(Ordering::SeqCst));
    }
}
