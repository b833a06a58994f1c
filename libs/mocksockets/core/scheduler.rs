//! Deferred one-shot task queue
//!
//! Stands in for the browser's "run this after the current synchronous
//! frame" scheduling. A socket constructor enqueues its connection attempt
//! here, which guarantees every listener the caller registers immediately
//! after construction is in place before the first event fires.
//!
//! Tasks are run-once and non-cancelable: once deferred, a connection
//! attempt cannot be aborted. Nothing runs until the queue is pumped, so a
//! test chooses exactly when "the network" happens and observes a fully
//! deterministic event order.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::debug;

/// A deferred run-once task
pub(crate) type Task = Box<dyn FnOnce() + Send>;

/// Unbounded FIFO of deferred tasks
///
/// Enqueueing never blocks. Draining happens on the caller's thread, in
/// enqueue order; tasks deferred while a drain is in progress are picked up
/// by the same drain, matching microtask semantics.
pub struct TaskQueue {
    tx: Sender<Task>,
    rx: Receiver<Task>,
}

impl TaskQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Enqueue a task to run on the next pump
    pub fn defer<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Send only fails when every receiver is gone, which cannot happen
        // while the queue itself is alive.
        let _ = self.tx.send(Box::new(task));
    }

    /// Run every pending task, including tasks deferred by tasks
    ///
    /// Returns the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let mut executed = 0;
        loop {
            match self.rx.try_recv() {
                Ok(task) => {
                    task();
                    executed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if executed > 0 {
            debug!("ran {} deferred task(s)", executed);
        }
        executed
    }

    /// Number of tasks currently waiting
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_nothing_runs_until_pumped() {
        let queue = TaskQueue::new();
        let ran = Arc::new(Mutex::new(false));

        let ran_clone = Arc::clone(&ran);
        queue.defer(move || *ran_clone.lock() = true);

        assert_eq!(queue.pending(), 1);
        assert!(!*ran.lock());

        assert_eq!(queue.run_pending(), 1);
        assert!(*ran.lock());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_tasks_run_in_enqueue_order_exactly_once() {
        let queue = TaskQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let order = Arc::clone(&order);
            queue.defer(move || order.lock().push(n));
        }

        queue.run_pending();
        queue.run_pending();
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_tasks_deferred_during_pump_run_in_same_pump() {
        let queue = Arc::new(TaskQueue::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let queue_clone = Arc::clone(&queue);
        let order_outer = Arc::clone(&order);
        queue.defer(move || {
            order_outer.lock().push("outer");
            let order_inner = Arc::clone(&order_outer);
            queue_clone.defer(move || order_inner.lock().push("inner"));
        });

        assert_eq!(queue.run_pending(), 2);
        assert_eq!(*order.lock(), vec!["outer", "inner"]);
    }
}
