//! Deferred task execution.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// A unit of deferred work
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Trait for running a task after a delay
///
/// No handle is returned; scheduled tasks cannot be cancelled.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task);
}

/// Runs each task on its own sleeping thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let spawned = thread::Builder::new()
            .name("reveal-timer".to_string())
            .spawn(move || {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                task();
            });

        if let Err(e) = spawned {
            tracing::error!(error = %e, "Failed to spawn reveal timer");
        }
    }
}

struct Pending {
    due: Duration,
    order: u64,
    task: Task,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_order: u64,
    pending: Vec<Pending>,
}

/// Scheduler driven by a virtual clock
///
/// Tasks run only when the caller advances time past their due point,
/// in due order (ties in scheduling order).
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks not yet run
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).pending.len()
    }

    /// Advance the virtual clock by `by` and run every task now due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let mut due = {
            let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.now += by;
            let now = queue.now;
            let (due, waiting): (Vec<_>, Vec<_>) =
                queue.pending.drain(..).partition(|p| p.due <= now);
            queue.pending = waiting;
            due
        };

        due.sort_by_key(|p| (p.due, p.order));
        let count = due.len();
        for pending in due {
            (pending.task)();
        }
        count
    }

    /// Run everything currently scheduled, however far in the future
    pub fn run_pending(&self) -> usize {
        let horizon = {
            let queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            queue
                .pending
                .iter()
                .map(|p| p.due.saturating_sub(queue.now))
                .max()
                .unwrap_or(Duration::ZERO)
        };
        self.advance(horizon)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        let due = queue.now + delay;
        let order = queue.next_order;
        queue.next_order += 1;
        queue.pending.push(Pending { due, order, task });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};

    #[test]
    fn manual_scheduler_waits_for_due_time() {
        let scheduler = ManualScheduler::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&ran);
        scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(99)), 0);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn manual_scheduler_runs_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [("slow", 300), ("fast", 100), ("mid", 200)] {
            let order = Arc::clone(&order);
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || order.lock().unwrap().push(label)),
            );
        }

        assert_eq!(scheduler.run_pending(), 3);
        assert_eq!(*order.lock().unwrap(), ["fast", "mid", "slow"]);
    }

    #[test]
    fn thread_scheduler_runs_task() {
        let (tx, rx) = mpsc::channel();

        ThreadScheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                tx.send("fired").unwrap();
            }),
        );

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "fired");
    }
}
