//! Pinch: two-finger scale tracking around the contact midpoint.

use super::{Recognizer, RecognizerContext, RecognizerPhase, RecognizerState};
use crate::config::PinchConfig;
use crate::events::{GestureEvent, GestureKind};
use crate::geometry;
use crate::touch::{TouchBatch, TouchPhase};

#[derive(Clone, Copy, Debug)]
pub struct PinchTracking {
    distance0: f64,
}

/// Requires exactly two simultaneous contacts. Scale is the ratio of the
/// current inter-contact distance to the distance at two-contact start;
/// emissions are gated on `|scale - 1|` exceeding the threshold so resting
/// finger drift stays silent.
pub struct PinchRecognizer {
    config: PinchConfig,
    state: RecognizerState<PinchTracking>,
}

impl PinchRecognizer {
    pub fn new(config: PinchConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
        }
    }

    /// Pure transition: `(state, batch) -> (state, emission)`.
    fn step(
        state: RecognizerState<PinchTracking>,
        batch: &TouchBatch,
        config: &PinchConfig,
    ) -> (RecognizerState<PinchTracking>, Option<GestureEvent>) {
        if matches!(batch.phase, TouchPhase::End | TouchPhase::Cancel) {
            let next = match state {
                RecognizerState::Tracking(_) => RecognizerState::Resolved,
                other => other,
            };
            return (next, None);
        }

        let Some((a, b)) = batch.pair() else {
            // Contact count is not two: resolve without emission.
            let next = match state {
                RecognizerState::Tracking(_) => RecognizerState::Resolved,
                other => other,
            };
            return (next, None);
        };

        let distance = geometry::distance(a.position(), b.position());
        match state {
            RecognizerState::Idle => {
                if distance > 0.0 {
                    (
                        RecognizerState::Tracking(PinchTracking {
                            distance0: distance,
                        }),
                        None,
                    )
                } else {
                    (RecognizerState::Idle, None)
                }
            }
            RecognizerState::Tracking(tracking) => {
                let scale = distance / tracking.distance0;
                let event = if (scale - 1.0).abs() > config.scale_threshold {
                    Some(GestureEvent::Pinch {
                        scale,
                        center: geometry::midpoint(a.position(), b.position()),
                        distance,
                    })
                } else {
                    None
                };
                (RecognizerState::Tracking(tracking), event)
            }
            other => (other, None),
        }
    }
}

impl Recognizer for PinchRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
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
