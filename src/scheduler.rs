//! Fixed worker pool with a shared FIFO task queue
//!
//! Generation and meshing run here so the control thread never blocks on
//! them. Completion is not reported back through the pool; callers observe
//! it through the state of the data the task touched.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Decrements the in-flight counter even if the task unwinds.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

pub struct TaskScheduler {
    sender: Option<Sender<Task>>,
    workers: Vec<JoinHandle<()>>,
    in_flight: Arc<AtomicUsize>,
}

impl TaskScheduler {
    pub fn new(worker_count: usize) -> io::Result<Self> {
        let worker_count = worker_count.max(1);
        let (sender, receiver) = unbounded::<Task>();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let rx = receiver.clone();
            let in_flight = Arc::clone(&in_flight);
            let handle = thread::Builder::new()
                .name(format!("world-worker-{}", worker_id))
                .spawn(move || Self::run_worker(rx, in_flight))?;
            workers.push(handle);
        }

        tracing::info!("Task scheduler started with {} workers", worker_count);
        Ok(TaskScheduler {
            sender: Some(sender),
            workers,
            in_flight,
        })
    }

    fn run_worker(rx: Receiver<Task>, in_flight: Arc<AtomicUsize>) {
        // recv only fails once the sender is gone and the queue is drained
        while let Ok(task) = rx.recv() {
            let _guard = InFlightGuard(&in_flight);
            task();
        }
    }

    /// Queues a task; one idle worker picks it up. Ignored after shutdown.
    pub fn add_task<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(sender) = &self.sender else {
            tracing::warn!("Task submitted after scheduler shutdown");
            return;
        };
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        if sender.send(Box::new(task)).is_err() {
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
        }
    }

    /// Tasks queued or currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight() == 0
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stops intake, lets workers drain the queue, then joins them.
    pub fn shutdown(&mut self) {
        if self.sender.take().is_none() {
            return;
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::error!("World worker panicked");
            }
        }
        tracing::info!("Task scheduler stopped");
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    #[test]
    fn test_single_worker_runs_fifo() {
        let mut scheduler = TaskScheduler::new(1).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..32 {
            let order = Arc::clone(&order);
            scheduler.add_task(move || order.lock().push(i));
        }
        scheduler.shutdown();
        assert_eq!(*order.lock(), (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let mut scheduler = TaskScheduler::new(3).unwrap();
        let done = Arc::new(AtomicUsize::new(0));
        for _ in 0..100 {
            let done = Arc::clone(&done);
            scheduler.add_task(move || {
                thread::sleep(Duration::from_micros(50));
                done.fetch_add(1, Ordering::SeqCst);
            });
        }
        scheduler.shutdown();
        assert_eq!(done.load(Ordering::SeqCst), 100);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_tasks_after_shutdown_are_dropped() {
        let mut scheduler = TaskScheduler::new(2).unwrap();
        scheduler.shutdown();
        let ran = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&ran);
        scheduler.add_task(move || {
            flag.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.in_flight(), 0);
        assert_eq!(scheduler.worker_count(), 0);
    }
}
