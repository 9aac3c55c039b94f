//! Deadline timers for gesture recognizers.
//!
//! Recognizers arm one-shot timers (long-press delay) and must be able to
//! cancel them on any terminal transition. Cancellation is modeled the same
//! way frame callbacks are cancelled elsewhere in the stack: the handle
//! owns an `Option`-wrapped cancellation flag that is taken on first
//! cancel, so a second cancel (or a drop after an explicit cancel) is a
//! silent no-op. A timer whose handle was cancelled before its deadline is
//! skipped when the queue advances past it.

use rustc_hash::FxHashMap;
use std::cell::Cell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::rc::Rc;

pub type TimerId = u64;

/// Min-heap of pending deadlines plus the cancellation flags shared with
/// outstanding [`TimerHandle`]s.
///
/// Timestamps are monotonic milliseconds, the same clock the touch samples
/// carry. The queue never reads a wall clock; the host advances it.
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(u64, TimerId)>>,
    live: FxHashMap<TimerId, Rc<Cell<bool>>>,
    next_id: TimerId,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Arms a one-shot timer that fires once `advance` is called with a
    /// time at or past `deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let cancelled = Rc::new(Cell::new(false));
        self.live.insert(id, cancelled.clone());
        self.heap.push(Reverse((deadline_ms, id)));
        TimerHandle {
            id,
            cancelled: Some(cancelled),
        }
    }

    /// Pops every timer due at `now_ms` and returns the ids that are still
    /// live. Cancelled timers are dropped silently here — a stale handle
    /// firing after its gesture resolved must be a no-op, not an event.
    pub fn advance(&mut self, now_ms: u64) -> Vec<TimerId> {
        let mut fired = Vec::new();
        while let Some(&Reverse((deadline, id))) = self.heap.peek() {
            if deadline > now_ms {
                break;
            }
            self.heap.pop();
            if let Some(flag) = self.live.remove(&id) {
                if !flag.get() {
                    fired.push(id);
                }
            }
        }
        fired
    }

    /// Drops every pending timer. Outstanding handles observe the
    /// cancellation through their shared flag.
    pub fn clear(&mut self) {
        for flag in self.live.values() {
            flag.set(true);
        }
        self.live.clear();
        self.heap.clear();
    }

    /// Number of scheduled timers that have not fired or been cancelled.
    pub fn pending(&self) -> usize {
        self.live.values().filter(|flag| !flag.get()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner-side handle for a scheduled timer.
///
/// Dropping the handle cancels the timer, so storing it inside a
/// recognizer's tracking state gives cancel-on-state-transition for free.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    cancelled: Option<Rc<Cell<bool>>>,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancels the timer. Idempotent: the flag is taken on first call.
    pub fn cancel(mut self) {
        self.release();
    }

    pub fn is_cancelled(&self) -> bool {
        match &self.cancelled {
            Some(flag) => flag.get(),
            None => true,
        }
    }

    fn release(&mut self) {
        if let Some(flag) = self.cancelled.take() {
            flag.set(true);
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release();
    }
}
