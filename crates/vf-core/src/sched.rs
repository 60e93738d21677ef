//! Cooperative Timer Scheduler
//!
//! Single-threaded, virtual-time task scheduler. All timed behavior in a
//! claim session (the step sequence, the reward rollup frames, the coupon
//! debounce, the ambient market intervals) runs as tasks on one scheduler
//! owned by the session, so teardown can cancel everything in one place.
//!
//! Time is virtual: the host drives it with [`Scheduler::advance`], which
//! makes every timing property exactly testable without sleeping.
//!
//! Tasks receive both the host context and the scheduler itself, so a
//! running task may schedule follow-up tasks or cancel others.

use std::collections::{BTreeMap, HashMap};

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw id value
    #[inline]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Task callback type
///
/// Receives the host context and the scheduler (for nested scheduling).
pub type Task<C> = Box<dyn FnMut(&mut C, &mut Scheduler<C>)>;

struct Entry<C> {
    id: TaskId,
    task: Task<C>,
    /// Re-arm interval for repeating tasks
    repeat_ms: Option<u64>,
}

/// Single-threaded virtual-time scheduler
pub struct Scheduler<C> {
    now_ms: u64,
    next_seq: u64,
    /// (due_ms, seq) -> entry; seq breaks ties FIFO
    queue: BTreeMap<(u64, u64), Entry<C>>,
    /// id -> queue key, for O(log n) cancellation
    index: HashMap<TaskId, (u64, u64)>,
    /// Task currently executing inside `advance`
    running: Option<TaskId>,
    /// Set when the running task cancels itself (suppresses re-arm)
    cancel_running: bool,
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            index: HashMap::new(),
            running: None,
            cancel_running: false,
        }
    }

    /// Current virtual time in milliseconds
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether a task is still scheduled (or currently running)
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.index.contains_key(&id) || (self.running == Some(id) && !self.cancel_running)
    }

    /// Schedule a one-shot task after `delay_ms`
    pub fn schedule(&mut self, delay_ms: u64, task: Task<C>) -> TaskId {
        self.insert(delay_ms, task, None)
    }

    /// Schedule a repeating task; first fire after `interval_ms`
    ///
    /// A zero interval is clamped to 1ms so a repeating task can never
    /// starve `advance`.
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: Task<C>) -> TaskId {
        let interval = interval_ms.max(1);
        self.insert(interval, task, Some(interval))
    }

    /// Cancel a scheduled task; cancelling an unknown or completed id is a no-op
    pub fn cancel(&mut self, id: TaskId) {
        if self.running == Some(id) {
            self.cancel_running = true;
            return;
        }
        if let Some(key) = self.index.remove(&id) {
            self.queue.remove(&key);
        }
    }

    /// Cancel every pending task
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.index.clear();
        if self.running.is_some() {
            self.cancel_running = true;
        }
    }

    /// Advance virtual time by `dt_ms`, running every task that comes due
    ///
    /// Tasks run in (due time, schedule order) order. While a task runs,
    /// `now_ms` equals its due time, so delays computed from "now" inside
    /// a task are relative to its own firing instant.
    pub fn advance(&mut self, ctx: &mut C, dt_ms: u64) {
        let target = self.now_ms + dt_ms;
        self.advance_to(ctx, target);
    }

    /// Advance virtual time to an absolute instant
    pub fn advance_to(&mut self, ctx: &mut C, target_ms: u64) {
        let target = target_ms.max(self.now_ms);

        loop {
            match self.queue.keys().next() {
                Some(&(due, _)) if due <= target => {}
                _ => break,
            }
            let Some((key, mut entry)) = self.queue.pop_first() else {
                break;
            };
            self.index.remove(&entry.id);

            self.now_ms = key.0;
            self.running = Some(entry.id);
            self.cancel_running = false;

            (entry.task)(ctx, self);

            let cancelled = self.cancel_running;
            self.running = None;
            self.cancel_running = false;

            if let Some(interval) = entry.repeat_ms {
                if !cancelled {
                    let next_due = key.0 + interval;
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.index.insert(entry.id, (next_due, seq));
                    self.queue.insert((next_due, seq), entry);
                }
            }
        }

        self.now_ms = target;
    }

    fn insert(&mut self, delay_ms: u64, task: Task<C>, repeat_ms: Option<u64>) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TaskId(seq);
        let key = (self.now_ms + delay_ms, seq);
        self.index.insert(id, key);
        self.queue.insert(
            key,
            Entry {
                id,
                task,
                repeat_ms,
            },
        );
        id
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
