//! Swipe: a fast, directional flick resolved at contact-end.

use super::{Recognizer, RecognizerContext, RecognizerPhase, RecognizerState};
use crate::config::SwipeConfig;
use crate::events::{Direction, GestureEvent, GestureKind};
use crate::geometry;
use crate::touch::{TouchBatch, TouchPhase, TouchSample};

#[derive(Clone, Copy, Debug)]
pub struct SwipeTracking {
    start: TouchSample,
}

/// Classifies a single-contact sequence at contact-end: total displacement
/// and average velocity against the configured thresholds, direction by
/// dominant axis. Below-threshold sequences resolve silently (a tap).
pub struct SwipeRecognizer {
    config: SwipeConfig,
    state: RecognizerState<SwipeTracking>,
}

impl SwipeRecognizer {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
        }
    }

    /// Pure transition: `(state, batch) -> (state, emission)`.
    fn step(
        state: RecognizerState<SwipeTracking>,
        batch: &TouchBatch,
        config: &SwipeConfig,
    ) -> (RecognizerState<SwipeTracking>, Option<GestureEvent>) {
        match state {
            RecognizerState::Idle => match (batch.phase, batch.primary()) {
                (TouchPhase::Start, Some(sample)) if batch.contact_count() == 1 => (
                    RecognizerState::Tracking(SwipeTracking { start: *sample }),
                    None,
                ),
                _ => (RecognizerState::Idle, None),
            },
            RecognizerState::Tracking(tracking) => {
                if batch.contact_count() != 1 {
                    return (RecognizerState::Cancelled, None);
                }
                match batch.phase {
                    TouchPhase::Start => match batch.primary() {
                        Some(sample) => (
                            RecognizerState::Tracking(SwipeTracking { start: *sample }),
                            None,
                        ),
                        None => (RecognizerState::Cancelled, None),
                    },
                    TouchPhase::Move => (RecognizerState::Tracking(tracking), None),
                    TouchPhase::End => {
                        let end = batch.contact(tracking.start.id).or_else(|| batch.primary());
                        let event = end.and_then(|end| Self::classify(&tracking, end, config));
                        (RecognizerState::Resolved, event)
                    }
                    TouchPhase::Cancel => (RecognizerState::Cancelled, None),
                }
            }
            other => (other, None),
        }
    }

    fn classify(
        tracking: &SwipeTracking,
        end: &TouchSample,
        config: &SwipeConfig,
    ) -> Option<GestureEvent> {
        let start = tracking.start;
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let distance = geometry::distance(start.position(), end.position());
        let duration_ms = end.t.saturating_sub(start.t);
        let velocity = geometry::velocity(distance, duration_ms);
        if distance < config.distance_threshold || velocity < config.velocity_threshold {
            return None;
        }
        let direction = Direction::from_delta(dx, dy)?;
        if !config.axis.allows(direction) {
            return None;
        }
        Some(GestureEvent::Swipe {
            direction,
            distance,
            velocity,
            duration_ms,
        })
    }
}

impl Recognizer for SwipeRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Swipe
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Axis;
    use crate::recognizers::test_support::TestDispatch;

    fn batch(phase: TouchPhase, t: u64, x: f64, y: f64) -> TouchBatch {
        TouchBatch::new(phase, t, [TouchSample::new(0, x, y, t)])
    }

    #[test]
    fn fast_long_swipe_emits_right() {
        let mut recognizer = SwipeRecognizer::new(SwipeConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 0.0, 0.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::Move, 50, 60.0, 5.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 100, 120.0, 10.0));

        let events = dispatch.drain();
        assert_eq!(events.len(), 1);
        match events[0] {
            GestureEvent::Swipe {
                direction,
                distance,
                velocity,
                duration_ms,
            } => {
                assert_eq!(direction, Direction::Right);
                assert!((distance - 120.416).abs() < 1e-3);
                assert!((velocity - 1.204).abs() < 1e-3);
                assert_eq!(duration_ms, 100);
            }
            other => panic!("expected swipe, got {other:?}"),
        }
        assert_eq!(recognizer.phase(), RecognizerPhase::Idle);
    }

    #[test]
    fn short_displacement_is_a_tap() {
        let mut recognizer = SwipeRecognizer::new(SwipeConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 0.0, 0.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 50, 40.0, 0.0));

        assert!(dispatch.drain().is_empty());
    }

    #[test]
    fn slow_drag_does_not_swipe() {
        let mut recognizer = SwipeRecognizer::new(SwipeConfig::default());
        let mut dispatch = TestDispatch::new();

        // 100px in a full second: 0.1 px/ms, well under the 0.3 floor.
        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 0.0, 0.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 1_000, 100.0, 0.0));

        assert!(dispatch.drain().is_empty());
    }

    #[test]
    fn vertical_dominant_delta_classifies_vertical() {
        let mut recognizer = SwipeRecognizer::new(SwipeConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 0.0, 100.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 100, 10.0, 0.0));

        let events = dispatch.drain();
        assert!(matches!(
            events.as_slice(),
            [GestureEvent::Swipe {
                direction: Direction::Up,
                ..
            }]
        ));
    }

    #[test]
    fn second_finger_cancels_sequence() {
        let mut recognizer = SwipeRecognizer::new(SwipeConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 0.0, 0.0));
        dispatch.feed(
            &mut recognizer,
            &TouchBatch::new(
                TouchPhase::Start,
                20,
                [
                    TouchSample::new(0, 10.0, 0.0, 20),
                    TouchSample::new(1, 50.0, 50.0, 20),
                ],
            ),
        );
        dispatch.feed(
            &mut recognizer,
            &TouchBatch::new(
                TouchPhase::End,
                100,
                [
                    TouchSample::new(0, 120.0, 0.0, 100),
                    TouchSample::new(1, 50.0, 50.0, 100),
                ],
            ),
        );

        assert!(dispatch.drain().is_empty());
        assert_eq!(recognizer.phase(), RecognizerPhase::Idle);
    }

    #[test]
    fn axis_restriction_filters_off_axis_swipes() {
        let mut recognizer = SwipeRecognizer::new(SwipeConfig {
            axis: Axis::Horizontal,
            ..SwipeConfig::default()
        });
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 0.0, 0.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 100, 10.0, 120.0));
        assert!(dispatch.drain().is_empty());

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 200, 0.0, 0.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 300, 120.0, 10.0));
        assert!(matches!(
            dispatch.drain().as_slice(),
            [GestureEvent::Swipe {
                direction: Direction::Right,
                ..
            }]
        ));
    }

    #[test]
    fn contact_cancel_emits_nothing() {
        let mut recognizer = SwipeRecognizer::new(SwipeConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 0.0, 0.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::Cancel, 100, 120.0, 0.0));

        assert!(dispatch.drain().is_empty());
    }
}
