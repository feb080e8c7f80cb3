//! Deferred task queue with cancellation.
//!
//! Delayed behaviors (navigation after logout, notification dismissal) are
//! modeled as explicit deferred actions rather than fire-and-forget timers.
//! The host advances the queue with its notion of now; due actions come
//! back in deadline order for the caller to apply. Every scheduled action
//! carries a [`TaskHandle`] so a superseded action can be cancelled before
//! it fires.

/// Handle to a scheduled action, usable for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    deadline_ms: u64,
    seq: u64,
    action: T,
}

/// Deadline-ordered queue of deferred actions.
#[derive(Debug)]
pub struct TaskQueue<T> {
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire at `deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, action: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        let seq = self.next_id;
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            deadline_ms,
            seq,
            action,
        });
        handle
    }

    /// Cancel a pending action. Returns false when the action already
    /// fired or was cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.handle != handle);
        self.pending.len() != before
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return every action due at `now_ms`, ordered by deadline
    /// then by scheduling order.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<T> {
        let mut due: Vec<Scheduled<T>> = Vec::new();
        let mut rest: Vec<Scheduled<T>> = Vec::new();
        for task in self.pending.drain(..) {
            if task.deadline_ms <= now_ms {
                due.push(task);
            } else {
                rest.push(task);
            }
        }
        self.pending = rest;
        due.sort_by_key(|task| (task.deadline_ms, task.seq));
        due.into_iter().map(|task| task.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_actions_fire_in_deadline_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(300, "c");
        queue.schedule(100, "a");
        queue.schedule(200, "b");
        assert_eq!(queue.advance_to(250), vec!["a", "b"]);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.advance_to(300), vec!["c"]);
    }

    #[test]
    fn cancelled_actions_do_not_fire() {
        let mut queue = TaskQueue::new();
        let keep = queue.schedule(100, "keep");
        let drop = queue.schedule(100, "drop");
        assert!(queue.cancel(drop));
        assert_eq!(queue.advance_to(100), vec!["keep"]);
        assert!(!queue.cancel(keep));
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(100, 1);
        queue.schedule(100, 2);
        queue.schedule(100, 3);
        assert_eq!(queue.advance_to(100), vec![1, 2, 3]);
    }

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut queue = TaskQueue::new();
        queue.schedule(100, ());
        assert!(queue.advance_to(99).is_empty());
        assert_eq!(queue.pending(), 1);
    }
}
