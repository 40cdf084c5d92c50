//! # Rate Governor
//!
//! Sliding-window pacer for outbound messages.
//!
//! ## Algorithm
//!
//! - At most `capacity` messages are scheduled per `window`.
//! - Accepted messages are spaced at least `window / capacity` apart, so a
//!   burst is spread evenly across the window instead of sent at once.
//! - When the window is full, the oldest message still waiting is evicted
//!   and the newcomer joins the back of the queue: under overload the
//!   newest data wins. Eviction reuses the evicted message's slot, so the
//!   schedule never grows past `capacity` per window.
//! - When the window is full and nothing is waiting (everything was already
//!   sent), the newcomer is rejected.
//!
//! The governor never reads the clock itself; callers pass `now`, which
//! keeps it deterministic under test.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Outcome of [`RateGovernor::offer`].
#[derive(Debug, PartialEq, Eq)]
pub enum Admission<T> {
    /// Scheduled without displacing anything.
    Accepted,
    /// Scheduled; the returned older message was dropped to make room.
    Evicted(T),
    /// Window already spent; the offered message is handed back.
    Rejected(T),
}

/// Sliding-window rate governor, generic over the message type.
#[derive(Debug)]
pub struct RateGovernor<T> {
    capacity: usize,
    window: Duration,
    spacing: Duration,
    /// Slot of every message scheduled in the current window, sent or not.
    scheduled: VecDeque<Instant>,
    /// Slots of messages not yet released, front = next.
    pending_slots: VecDeque<Instant>,
    /// Messages not yet released, in arrival order.
    pending: VecDeque<T>,
    last_slot: Option<Instant>,
}

impl<T> RateGovernor<T> {
    /// Create a governor allowing `capacity` messages per `window`.
    ///
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize, window: Duration) -> Self {
        let capacity = capacity.max(1);
        // Round up so `capacity` slots never fit in less than one window
        let spacing_nanos = window.as_nanos().div_ceil(capacity as u128);
        let spacing = Duration::from_nanos(u64::try_from(spacing_nanos).unwrap_or(u64::MAX));

        Self {
            capacity,
            window,
            spacing,
            scheduled: VecDeque::with_capacity(capacity),
            pending_slots: VecDeque::with_capacity(capacity),
            pending: VecDeque::with_capacity(capacity),
            last_slot: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Minimum gap between two released messages.
    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Messages waiting for their slot.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Offer a message at time `now`.
    pub fn offer(&mut self, now: Instant, message: T) -> Admission<T> {
        self.purge(now);

        if self.scheduled.len() >= self.capacity {
            return match self.pending.pop_front() {
                Some(evicted) => {
                    // Remaining messages move up one slot; the newcomer takes the last
                    self.pending.push_back(message);
                    Admission::Evicted(evicted)
                }
                None => Admission::Rejected(message),
            };
        }

        let slot = match self.last_slot {
            Some(last) => now.max(last + self.spacing),
            None => now,
        };
        self.scheduled.push_back(slot);
        self.pending_slots.push_back(slot);
        self.pending.push_back(message);
        self.last_slot = Some(slot);
        Admission::Accepted
    }

    /// Release the next message if its slot has arrived.
    pub fn pop_ready(&mut self, now: Instant) -> Option<T> {
        match self.pending_slots.front() {
            Some(slot) if *slot <= now => {
                self.pending_slots.pop_front();
                self.pending.pop_front()
            }
            _ => None,
        }
    }

    /// Slot of the next pending message.
    pub fn next_ready_at(&self) -> Option<Instant> {
        self.pending_slots.front().copied()
    }

    /// Re-space waiting messages after a stall.
    ///
    /// `released_at` is when the previous message actually went out. Every
    /// pending slot is pushed to at least one spacing after its predecessor,
    /// so slots that passed while the caller was blocked are not all due at
    /// once. Slots already far enough out are left alone.
    pub fn restart_pending(&mut self, released_at: Instant) {
        let Some(first) = self.pending_slots.front().copied() else {
            return;
        };

        let mut previous = released_at;
        for slot in self.pending_slots.iter_mut() {
            *slot = (*slot).max(previous + self.spacing);
            previous = *slot;
        }

        self.scheduled.retain(|slot| *slot < first);
        self.scheduled.extend(self.pending_slots.iter().copied());
        self.last_slot = Some(previous);
    }

    /// Forget slots that fell out of the window ending at `now`.
    fn purge(&mut self, now: Instant) {
        let Some(horizon) = now.checked_sub(self.window) else {
            return;
        };
        while self.scheduled.front().is_some_and(|slot| *slot < horizon) {
            self.scheduled.pop_front();
        }
    }
}
