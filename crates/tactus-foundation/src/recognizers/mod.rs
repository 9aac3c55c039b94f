//! Gesture recognizer state machines.
//!
//! Every recognizer consumes the same [`TouchBatch`] stream and keeps
//! private state; the engine fans batches out unconditionally and each
//! recognizer decides relevance itself (a pinch ignores single-contact
//! batches, a swipe cancels when a second finger lands).

pub mod long_press;
pub mod pan;
pub mod pinch;
pub mod pull_to_refresh;
pub mod swipe;

pub use long_press::LongPressRecognizer;
pub use pan::PanRecognizer;
pub use pinch::PinchRecognizer;
pub use pull_to_refresh::{
    PullToRefreshRecognizer, RefreshCallback, RefreshError, RefreshFailureListener, RefreshFuture,
    ScrollOffsetProbe,
};
pub use swipe::SwipeRecognizer;

use crate::events::{GestureEvent, GestureKind};
use crate::haptics::{HapticIntensity, HapticSink};
use crate::touch::TouchBatch;
use std::collections::VecDeque;
use tactus_core::{TimerHandle, TimerId, TimerQueue};

/// Coarse view of a recognizer's state, mostly for tests and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecognizerPhase {
    Idle,
    Tracking,
    Resolved,
    Cancelled,
}

/// The per-gesture state machine skeleton. `T` is the recognizer's private
/// accumulation while a gesture sequence is open (start sample, last
/// sample, timer handle).
///
/// `Resolved` and `Cancelled` are transient: the owning recognizer
/// normalizes them back to `Idle` via [`RecognizerState::settle`] as soon
/// as any emission has been extracted, so a recognizer is ready for the
/// next sequence immediately.
#[derive(Debug)]
pub enum RecognizerState<T> {
    Idle,
    Tracking(T),
    Resolved,
    Cancelled,
}

// Hand-written so `mem::take` works without a `T: Default` bound.
impl<T> Default for RecognizerState<T> {
    fn default() -> Self {
        RecognizerState::Idle
    }
}

impl<T> RecognizerState<T> {
    pub fn phase(&self) -> RecognizerPhase {
        match self {
            RecognizerState::Idle => RecognizerPhase::Idle,
            RecognizerState::Tracking(_) => RecognizerPhase::Tracking,
            RecognizerState::Resolved => RecognizerPhase::Resolved,
            RecognizerState::Cancelled => RecognizerPhase::Cancelled,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, RecognizerState::Tracking(_))
    }

    /// Collapses a terminal state back to `Idle`.
    pub fn settle(&mut self) {
        if matches!(self, RecognizerState::Resolved | RecognizerState::Cancelled) {
            *self = RecognizerState::Idle;
        }
    }
}

/// Everything a recognizer may touch while processing one input event:
/// the shared timer queue, the outgoing event buffer, and the optional
/// haptic sink. Handed in by the engine per dispatch, so recognizers never
/// own engine resources.
pub struct RecognizerContext<'a> {
    now_ms: u64,
    timers: &'a mut TimerQueue,
    events: &'a mut VecDeque<GestureEvent>,
    haptics: Option<&'a HapticSink>,
}

impl<'a> RecognizerContext<'a> {
    pub fn new(
        now_ms: u64,
        timers: &'a mut TimerQueue,
        events: &'a mut VecDeque<GestureEvent>,
        haptics: Option<&'a HapticSink>,
    ) -> Self {
        Self {
            now_ms,
            timers,
            events,
            haptics,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arms a one-shot timer `delay_ms` from the current event time.
    pub fn schedule_timer(&mut self, delay_ms: u64) -> TimerHandle {
        self.timers.schedule(self.now_ms + delay_ms)
    }

    pub fn emit(&mut self, event: GestureEvent) {
        self.events.push_back(event);
    }

    /// Fire-and-forget haptic request; a no-op when no sink is installed.
    pub fn request_haptic(&self, intensity: HapticIntensity) {
        if let Some(sink) = self.haptics {
            sink(intensity);
        }
    }
}

pub trait Recognizer {
    fn kind(&self) -> GestureKind;

    fn phase(&self) -> RecognizerPhase;

    /// Processes one input event. State mutation is synchronous; any
    /// emission goes through the context.
    fn on_batch(&mut self, batch: &TouchBatch, ctx: &mut RecognizerContext<'_>);

    /// Called for every timer that fired; recognizers that did not arm
    /// `timer` ignore the call.
    fn on_timer(&mut self, _timer: TimerId, _ctx: &mut RecognizerContext<'_>) {}

    /// Called between input events so recognizers can observe settled
    /// asynchronous work (the pull-to-refresh future).
    fn on_tick(&mut self, _ctx: &mut RecognizerContext<'_>) {}

    /// Forces the recognizer to `Idle`, cancelling any outstanding timer
    /// or in-flight task. Must be safe to call at any time, repeatedly.
    fn reset(&mut self);
}
