// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred work executed on the rendering thread.
//!
//! [`DeferredTasks`] is a cheaply clonable handle (Arc bump) to an ordered
//! queue of one-shot tasks. Any thread may [`push`](DeferredTasks::push); the
//! rendering thread drains the queue once per frame, before the render
//! callback, so enqueued work is guaranteed to run exactly once within a
//! valid frame.
//!
//! Draining swaps the queue out under the lock and executes the snapshot
//! outside it: tasks enqueued while the snapshot runs (including by the
//! tasks themselves) land in the fresh queue and run next frame, which
//! bounds a single frame's task-execution time.

use core::fmt;
use std::mem;
use std::sync::{Arc, Mutex, PoisonError};

type Task = Box<dyn FnOnce() + Send>;

/// A thread-shared, ordered queue of one-shot tasks for the rendering thread.
#[derive(Clone, Default)]
pub struct DeferredTasks {
    queue: Arc<Mutex<Vec<Task>>>,
}

impl DeferredTasks {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task. Callable from any thread; order of tasks pushed from
    /// the same thread is preserved.
    pub fn push(&self, task: impl FnOnce() + Send + 'static) {
        self.lock().push(Box::new(task));
    }

    /// Executes every currently queued task in enqueue order and empties the
    /// queue. Returns the number of tasks executed.
    ///
    /// Only the rendering thread calls this. The queue lock is not held
    /// while tasks run.
    pub fn run_pending(&self) -> usize {
        let snapshot = mem::take(&mut *self.lock());
        let count = snapshot.len();
        for task in snapshot {
            task();
        }
        count
    }

    /// Returns the number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no tasks are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Task>> {
        // A panicking task poisons the lock; the queue itself is still
        // consistent, so keep going.
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for DeferredTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredTasks")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn tasks_run_once_in_enqueue_order() {
        let tasks = DeferredTasks::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let log = Arc::clone(&log);
            tasks.push(move || log.lock().unwrap().push(i));
        }

        assert_eq!(tasks.run_pending(), 3);
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
        assert!(tasks.is_empty(), "queue must be empty after a drain");

        // Nothing left to run.
        assert_eq!(tasks.run_pending(), 0);
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[test]
    fn tasks_enqueued_during_drain_run_next_frame() {
        let tasks = DeferredTasks::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let inner_tasks = tasks.clone();
        let inner_ran = Arc::clone(&ran);
        tasks.push(move || {
            inner_ran.fetch_add(1, Ordering::SeqCst);
            let ran = Arc::clone(&inner_ran);
            inner_tasks.push(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            });
        });

        assert_eq!(tasks.run_pending(), 1, "only the snapshot runs this frame");
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(tasks.len(), 1, "the re-enqueued task waits for next frame");

        assert_eq!(tasks.run_pending(), 1);
        assert_eq!(ran.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn pushes_from_other_threads_are_visible() {
        let tasks = DeferredTasks::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tasks = tasks.clone();
                let ran = Arc::clone(&ran);
                thread::spawn(move || {
                    tasks.push(move || {
                        ran.fetch_add(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tasks.run_pending(), 4);
        assert_eq!(ran.load(Ordering::SeqCst), 4);
    }
}
