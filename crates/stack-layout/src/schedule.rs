//! Deferred, coalesced layout recomputation.
//!
//! Mutations do not lay out immediately. Each one bumps the stack's
//! generation and enqueues a task tagged with the new value on a
//! single-threaded [`TaskQueue`] owned by the host. When the host drains the
//! queue, only the task carrying the latest tag recomputes; older tasks see
//! a stale tag and do nothing.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// FIFO queue of deferred tasks, drained on the owning thread.
///
/// A task that finds its target busy can [`defer`](TaskQueue::defer) itself.
/// Deferred tasks wait until the outermost [`run_pending`](TaskQueue::run_pending)
/// call has drained everything else, then run again.
#[derive(Default)]
pub struct TaskQueue {
    tasks: RefCell<VecDeque<Task>>,
    parked: RefCell<VecDeque<Task>>,
    depth: Cell<usize>,
}

impl TaskQueue {
    /// Create a shared queue.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn enqueue(&self, task: impl FnOnce() + 'static) {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Park a task until the outermost drain finishes its current work.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.parked.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks waiting to run, parked ones included.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len() + self.parked.borrow().len()
    }

    /// Run tasks until the queue is empty, including tasks enqueued by the
    /// tasks themselves. Returns the number of tasks run.
    ///
    /// Only the outermost call retries parked tasks. It stops once a retry
    /// round does nothing but park the same tasks again.
    pub fn run_pending(&self) -> usize {
        self.depth.set(self.depth.get() + 1);
        let outermost = self.depth.get() == 1;
        let mut ran = 0;
        let mut retried = if outermost { self.unpark() } else { 0 };
        let mut ran_in_round = 0;
        loop {
            // Release the borrow before running so tasks can enqueue more work
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                    ran_in_round += 1;
                }
                None => {
                    let stalled = retried > 0
                        && ran_in_round == retried
                        && self.parked.borrow().len() == retried;
                    if !outermost || stalled {
                        break;
                    }
                    retried = self.unpark();
                    ran_in_round = 0;
                    if retried == 0 {
                        break;
                    }
                }
            }
        }
        self.depth.set(self.depth.get() - 1);
        ran
    }

    fn unpark(&self) -> usize {
        let mut parked = self.parked.borrow_mut();
        let moved = parked.len();
        self.tasks.borrow_mut().extend(parked.drain(..));
        moved
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending())
            .field("depth", &self.depth.get())
            .finish()
    }
}

/// Monotonic generation counter for layout invalidation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutScheduler {
    generation: u64,
}

impl LayoutScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the current layout stale and return the new generation tag.
    pub fn invalidate(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a task tagged `tag` is still the latest.
    pub fn is_current(&self, tag: u64) -> bool {
        self.generation == tag
    }
}
