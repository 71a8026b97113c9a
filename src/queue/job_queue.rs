use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// FIFO job queue with task-acknowledgment drain semantics.
///
/// `join` returns only once every pushed item has been popped *and*
/// acknowledged via `task_done`, not merely when the queue runs empty, so
/// the driver cannot outrun an in-flight job.
pub struct JobQueue<T> {
    state: Mutex<QueueState<T>>,
    items_available: Condvar,
    all_acknowledged: Condvar,
}

struct QueueState<T> {
    items: VecDeque<T>,
    unacknowledged: usize,
}

impl<T> JobQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                unacknowledged: 0,
            }),
            items_available: Condvar::new(),
            all_acknowledged: Condvar::new(),
        }
    }

    pub fn push(&self, item: T) {
        let mut state = self.state.lock().expect("job queue mutex poisoned");
        state.items.push_back(item);
        state.unacknowledged += 1;
        self.items_available.notify_one();
    }

    /// Pop the next item, waiting up to `timeout` for one to appear.
    /// `None` means the queue stayed empty for the whole window.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock().expect("job queue mutex poisoned");

        loop {
            if let Some(item) = state.items.pop_front() {
                return Some(item);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _) = self
                .items_available
                .wait_timeout(state, deadline - now)
                .expect("job queue mutex poisoned");
            state = guard;
        }
    }

    /// Acknowledge that one previously popped item has been fully processed.
    pub fn task_done(&self) {
        let mut state = self.state.lock().expect("job queue mutex poisoned");
        state.unacknowledged = state.unacknowledged.saturating_sub(1);
        if state.unacknowledged == 0 {
            self.all_acknowledged.notify_all();
        }
    }

    /// Block until every pushed item has been acknowledged.
    pub fn join(&self) {
        let mut state = self.state.lock().expect("job queue mutex poisoned");
        while state.unacknowledged > 0 {
            state = self
                .all_acknowledged
                .wait(state)
                .expect("job queue mutex poisoned");
        }
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .expect("job queue mutex poisoned")
            .items
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for JobQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
