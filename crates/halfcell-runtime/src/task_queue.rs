#![forbid(unsafe_code)]

//! Cooperative queue of deferred tasks.
//!
//! Listener callbacks never run inside the call that schedules them. They are
//! pushed here and run later by [`TaskQueue::run_pending`], one at a time.
//! Each task is its own failure domain: a panicking task is logged and the
//! queue moves on to the next one.

use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

/// Shared FIFO of deferred tasks. Clones share the same queue.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run on the next drain.
    pub fn push(&self, task: impl FnOnce() + 'static) {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks waiting.
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Whether no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run every pending task, including tasks queued while draining.
    ///
    /// Returns the number of tasks run, panicked ones included.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the borrow before running so tasks can push more work.
            let next = self.tasks.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            ran += 1;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
                tracing::error!(
                    panic = %panic_message(payload.as_ref()),
                    "listener task panicked"
                );
            }
        }
        ran
    }

    /// Drop every pending task without running it.
    pub fn clear(&self) -> usize {
        let mut tasks = self.tasks.borrow_mut();
        let dropped = tasks.len();
        tasks.clear();
        dropped
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn tasks_run_in_push_order() {
        let queue = TaskQueue::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let seen = seen.clone();
            queue.push(move || seen.borrow_mut().push(i));
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn tasks_may_schedule_more_tasks() {
        let queue = TaskQueue::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner_queue = queue.clone();
        let inner_seen = seen.clone();
        queue.push(move || {
            inner_seen.borrow_mut().push("outer");
            let seen = inner_seen.clone();
            inner_queue.push(move || seen.borrow_mut().push("inner"));
        });
        assert_eq!(queue.run_pending(), 2);
        assert_eq!(*seen.borrow(), vec!["outer", "inner"]);
    }

    #[traced_test]
    #[test]
    fn panicking_task_is_isolated_and_logged() {
        let queue = TaskQueue::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let before = seen.clone();
        queue.push(move || before.borrow_mut().push(1));
        queue.push(|| panic!("listener exploded"));
        let after = seen.clone();
        queue.push(move || after.borrow_mut().push(3));

        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*seen.borrow(), vec![1, 3]);
        assert!(logs_contain("listener task panicked"));
        assert!(logs_contain("listener exploded"));
    }

    #[test]
    fn clear_drops_without_running() {
        let queue = TaskQueue::new();
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();
        queue.push(move || *flag.borrow_mut() = true);
        assert_eq!(queue.clear(), 1);
        assert_eq!(queue.run_pending(), 0);
        assert!(!*ran.borrow());
    }
}
