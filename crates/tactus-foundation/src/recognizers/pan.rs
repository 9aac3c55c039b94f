//! Pan: continuous drag tracking with slop suppression.

use super::{Recognizer, RecognizerContext, RecognizerPhase, RecognizerState};
use crate::config::PanConfig;
use crate::events::{Direction, GestureEvent, GestureKind};
use crate::geometry;
use crate::touch::{TouchBatch, TouchPhase, TouchSample};

#[derive(Clone, Copy, Debug)]
pub struct PanTracking {
    start: TouchSample,
    last: TouchSample,
    past_slop: bool,
}

/// Emits on every qualifying move, not just at contact-end. Movement
/// within the slop radius of the press position is suppressed as jitter;
/// once exceeded the pan latches for the rest of the sequence.
///
/// Deltas are measured from the start sample; velocities from the sample
/// of the previous emission. `last` only advances on emission, so the
/// first post-slop velocity spans the whole suppressed run.
pub struct PanRecognizer {
    config: PanConfig,
    state: RecognizerState<PanTracking>,
}

impl PanRecognizer {
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
        }
    }

    /// Pure transition: `(state, batch) -> (state, emission)`.
    fn step(
        state: RecognizerState<PanTracking>,
        batch: &TouchBatch,
        config: &PanConfig,
    ) -> (RecognizerState<PanTracking>, Option<GestureEvent>) {
        match state {
            RecognizerState::Idle => match (batch.phase, batch.primary()) {
                (TouchPhase::Start, Some(sample)) if batch.contact_count() == 1 => (
                    RecognizerState::Tracking(PanTracking {
                        start: *sample,
                        last: *sample,
                        past_slop: false,
                    }),
                    None,
                ),
                _ => (RecognizerState::Idle, None),
            },
            RecognizerState::Tracking(tracking) => {
                if batch.contact_count() != 1 {
                    return (RecognizerState::Cancelled, None);
                }
                match (batch.phase, batch.primary()) {
                    (TouchPhase::Start, Some(sample)) => (
                        RecognizerState::Tracking(PanTracking {
                            start: *sample,
                            last: *sample,
                            past_slop: false,
                        }),
                        None,
                    ),
                    (TouchPhase::Move, Some(current)) => {
                        Self::track_move(tracking, current, config)
                    }
                    (TouchPhase::End, _) => (RecognizerState::Resolved, None),
                    _ => (RecognizerState::Cancelled, None),
                }
            }
            other => (other, None),
        }
    }

    fn track_move(
        tracking: PanTracking,
        current: &TouchSample,
        config: &PanConfig,
    ) -> (RecognizerState<PanTracking>, Option<GestureEvent>) {
        let total = geometry::distance(tracking.start.position(), current.position());
        if !tracking.past_slop && total < config.threshold {
            return (RecognizerState::Tracking(tracking), None);
        }

        let elapsed = current.t.saturating_sub(tracking.last.t);
        let velocity_x = geometry::velocity(current.x - tracking.last.x, elapsed);
        let velocity_y = geometry::velocity(current.y - tracking.last.y, elapsed);
        let delta_x = current.x - tracking.start.x;
        let delta_y = current.y - tracking.start.y;
        let event = GestureEvent::Pan {
            delta_x,
            delta_y,
            velocity_x,
            velocity_y,
            direction: Direction::from_delta(delta_x, delta_y),
        };
        (
            RecognizerState::Tracking(PanTracking {
                start: tracking.start,
                last: *current,
                past_slop: true,
            }),
            Some(event),
        )
    }
}

impl Recognizer for PanRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Pan
    }

    fn phase(&self) -> RecognizerPhase {
        self.state.phase()
    }

    fn on_batch(&mut self, batch: &TouchBatch, ctx: &mut RecognizerContext<'_>) {
        let state = std::mem::take(&mut self.state);
        let (next, event) = Self::step(state, batch, &self.config);
        if let Some(event) = event {
            ctx.emit(event);
        }
        self.state = next;
        self.state.settle();
    }

    fn reset(&mut self) {
        self.state = RecognizerState::Idle;
    }
}
