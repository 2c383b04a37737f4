//! Virtual-clock timer queue.
//!
//! The host feeds elapsed wall time in; due actions come out in due order,
//! ties broken by scheduling order. Every entry remembers the generation it
//! was scheduled under. [`Scheduler::invalidate`] bumps the generation, so
//! anything queued before it is discarded instead of fired.

use std::time::Duration;

#[derive(Debug)]
struct Pending<A> {
    due: Duration,
    seq: u64,
    generation: u64,
    action: A,
}

#[derive(Debug)]
pub struct Scheduler<A> {
    now: Duration,
    generation: u64,
    next_seq: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            generation: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queues `action` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, action: A) {
        self.pending.push(Pending {
            due: self.now + delay,
            seq: self.next_seq,
            generation: self.generation,
            action,
        });
        self.next_seq += 1;
    }

    /// Makes every queued action stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Removes and returns the earliest live action due at or before
    /// `until`, moving the clock to its due time. Stale entries met on the
    /// way are dropped.
    pub fn pop_due(&mut self, until: Duration) -> Option<A> {
        let generation = self.generation;
        self.pending.retain(|p| p.generation == generation);

        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.seq))?;

        let entry = self.pending.swap_remove(idx);
        self.now = self.now.max(entry.due);
        Some(entry.action)
    }

    /// Moves the clock forward to `until` once nothing more is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Number of live queued actions.
    pub fn pending(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| p.generation == self.generation)
            .count()
    }

    /// Time until the next live action, if any.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending
            .iter()
            .filter(|p| p.generation == self.generation)
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }
}
