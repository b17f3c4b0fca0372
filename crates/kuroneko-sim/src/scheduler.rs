//! Deferred single-shot tasks.
//!
//! Replaces suspended waits (reload, attack cooldown, death removal) with
//! explicit due-time entries drained once per tick. Nothing is cancellable:
//! a task runs even if its target no longer cares, and handlers must
//! tolerate targets that have since disappeared.

use hecs::Entity;

/// Slack for accumulated floating-point tick time.
const DUE_EPSILON: f64 = 1e-9;

/// Work the session resumes after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Clear an enemy's attack cooldown.
    ResetAttack(Entity),
    /// Remove a dead enemy from the world.
    RemoveEnemy(Entity),
    /// Refill a weapon's magazine and leave the reloading state.
    FinishReload(Entity),
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_at: f64,
    seq: u64,
    task: T,
}

/// Time-ordered queue of deferred tasks.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    pending: Vec<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay_secs` have passed since `now`.
    pub fn schedule_after(&mut self, now: f64, delay_secs: f32, task: T) {
        self.schedule_at(now + f64::from(delay_secs.max(0.0)), task);
    }

    pub fn schedule_at(&mut self, due_at: f64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { due_at, seq, task });
    }

    /// Remove and return every task due at `now`, earliest first.
    /// Tasks due at the same time come out in scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.due_at <= now + DUE_EPSILON);
        self.pending = rest;
        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|s| s.due_at)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
