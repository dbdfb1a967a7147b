//! Deferred task queue.
//!
//! Asynchronous collaborators (the clipboard, for one) deliver their results
//! by posting a task here. The host event loop drains the queue on the UI
//! thread with [`TaskQueue::process_all`], so callbacks never run inside the
//! call that requested them.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// A FIFO queue of deferred closures.
///
/// Shared by reference; every method takes `&self`.
pub struct TaskQueue {
    tasks: Mutex<VecDeque<TaskData>>,
}

impl TaskQueue {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
        }
    }

    /// Post a task to run on the next drain.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.lock().push_back(TaskData {
            id,
            task: Box::new(task),
        });
        tracing::trace!(target: "horizon_entry_core::task", task_id = id.as_u64(), "posted task");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.lock();
        if let Some(pos) = tasks.iter().position(|t| t.id == id) {
            tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.lock().is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run all pending tasks, including any posted while draining.
    ///
    /// The queue lock is released while each task runs. Returns the number
    /// of tasks processed.
    pub fn process_all(&self) -> usize {
        let mut count = 0;
        loop {
            let next = self.tasks.lock().pop_front();
            let Some(task_data) = next else { break };
            tracing::trace!(target: "horizon_entry_core::task", task_id = task_data.id.as_u64(), "running task");
            (task_data.task)();
            count += 1;
        }
        if count > 0 {
            tracing::debug!(target: "horizon_entry_core::task", count, "drained task queue");
        }
        count
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_post_and_process() {
        let queue = TaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let log = log.clone();
            queue.post(move || log.lock().push(n));
        }

        assert_eq!(queue.pending_count(), 3);
        assert!(log.lock().is_empty());
        assert_eq!(queue.process_all(), 3);
        assert_eq!(*log.lock(), vec![0, 1, 2]);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_cancel() {
        let queue = TaskQueue::new();
        let ran = Arc::new(Mutex::new(false));

        let ran_clone = ran.clone();
        let id = queue.post(move || *ran_clone.lock() = true);
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));

        assert_eq!(queue.process_all(), 0);
        assert!(!*ran.lock());
    }

    #[test]
    fn test_task_may_post_follow_up() {
        let queue = Arc::new(TaskQueue::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_queue = queue.clone();
        let inner_log = log.clone();
        queue.post(move || {
            inner_log.lock().push("first");
            let log = inner_log.clone();
            inner_queue.post(move || log.lock().push("second"));
        });

        assert_eq!(queue.process_all(), 2);
        assert_eq!(*log.lock(), vec!["first", "second"]);
    }
}
