//! Virtual-clock timer queue.
//!
//! # Responsibility
//! - Model every suspension point ("run this after D ms") as data.
//! - Provide explicit cancellation per timer and per owner group.
//!
//! # Invariants
//! - Timers fire in deadline order; equal deadlines fire in scheduling order.
//! - Popping a timer advances the queue clock to its deadline, so timers
//!   scheduled from inside a callback are relative to the firing time.
//! - The queue clock never moves backwards.
//! - A cancelled timer is never returned by `pop_due`.

use std::collections::BTreeMap;
use uuid::Uuid;

/// Handle of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Owner token shared by timers that must be cancelled together.
pub type TimerGroup = Uuid;

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    group: Option<TimerGroup>,
    task: T,
}

/// Timer that reached its deadline.
#[derive(Debug, PartialEq, Eq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    pub deadline_ms: u64,
    pub task: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_seq: u64,
    entries: BTreeMap<(u64, u64), Entry<T>>,
    deadlines: BTreeMap<TimerId, u64>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            entries: BTreeMap::new(),
            deadlines: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue whose clock starts at `now_ms`.
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `task` to fire `delay_ms` after the current queue clock.
    pub fn schedule(&mut self, delay_ms: u64, group: Option<TimerGroup>, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TimerId(seq);
        let deadline = self.now_ms.saturating_add(delay_ms);
        self.entries.insert((deadline, seq), Entry { id, group, task });
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancels one timer. Returns `false` when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(deadline) = self.deadlines.remove(&id) else {
            return false;
        };
        self.entries.remove(&(deadline, id.0)).is_some()
    }

    /// Cancels every pending timer owned by `group`; returns how many were dropped.
    pub fn cancel_group(&mut self, group: TimerGroup) -> usize {
        let doomed: Vec<TimerId> = self
            .entries
            .values()
            .filter(|entry| entry.group == Some(group))
            .map(|entry| entry.id)
            .collect();
        doomed.into_iter().filter(|id| self.cancel(*id)).count()
    }

    /// Number of pending timers owned by `group`.
    pub fn pending_in_group(&self, group: TimerGroup) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.group == Some(group))
            .count()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns the earliest timer due at `now_ms`, if any.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<FiredTimer<T>> {
        let key = *self.entries.keys().next()?;
        if key.0 > now_ms {
            return None;
        }
        let entry = self.entries.remove(&key)?;
        self.deadlines.remove(&entry.id);
        self.now_ms = self.now_ms.max(key.0);
        Some(FiredTimer {
            id: entry.id,
            deadline_ms: key.0,
            task: entry.task,
        })
    }

    /// Moves the queue clock forward to `now_ms` once due timers are drained.
    pub fn settle(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;
    use uuid::Uuid;

    #[test]
    fn fires_in_deadline_then_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(200, None, "late");
        queue.schedule(100, None, "first");
        queue.schedule(100, None, "second");

        assert!(queue.pop_due(99).is_none());
        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(500))
            .map(|timer| timer.task)
            .collect();
        assert_eq!(fired, vec!["first", "second", "late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn nested_schedule_is_relative_to_firing_time() {
        let mut queue = TimerQueue::new();
        queue.schedule(100, None, 1);

        let fired = queue.pop_due(1_000).expect("timer should be due");
        assert_eq!(fired.deadline_ms, 100);
        assert_eq!(queue.now_ms(), 100);

        queue.schedule(50, None, 2);
        assert_eq!(queue.next_deadline(), Some(150));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(10, None, "x");
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.pop_due(100).is_none());
    }

    #[test]
    fn cancel_group_only_touches_its_owner() {
        let mut queue = TimerQueue::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        queue.schedule(10, Some(owner), "a");
        queue.schedule(20, Some(owner), "b");
        queue.schedule(30, Some(other), "c");

        assert_eq!(queue.cancel_group(owner), 2);
        assert_eq!(queue.pending_in_group(owner), 0);
        assert_eq!(queue.pop_due(100).map(|timer| timer.task), Some("c"));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut queue: TimerQueue<()> = TimerQueue::starting_at(500);
        queue.settle(100);
        assert_eq!(queue.now_ms(), 500);
        queue.schedule(10, None, ());
        assert_eq!(queue.next_deadline(), Some(510));
    }
}
