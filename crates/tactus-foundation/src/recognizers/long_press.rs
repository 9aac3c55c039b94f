//! Long-press: a one-shot timer armed on contact-start.

use super::{Recognizer, RecognizerContext, RecognizerPhase, RecognizerState};
use crate::config::LongPressConfig;
use crate::events::{GestureEvent, GestureKind};
use crate::haptics::HapticIntensity;
use crate::touch::{TouchBatch, TouchPhase};
use tactus_core::{TimerHandle, TimerId};

#[derive(Debug)]
pub struct LongPressTracking {
    timer: Option<TimerHandle>,
}

/// Arms a timer on single-contact start; emits `LongPress` when the timer
/// fires before contact-end/cancel. Dropping the tracking state cancels
/// the armed timer, so every terminal transition clears it exactly once
/// and a second clear is a no-op.
pub struct LongPressRecognizer {
    config: LongPressConfig,
    state: RecognizerState<LongPressTracking>,
}

impl LongPressRecognizer {
    pub fn new(config: LongPressConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
        }
    }
}

impl Recognizer for LongPressRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::LongPress
    }

    fn phase(&self) -> RecognizerPhase {
        self.state.phase()
    }

    fn on_batch(&mut self, batch: &TouchBatch, ctx: &mut RecognizerContext<'_>) {
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            RecognizerState::Idle => {
                if batch.phase == TouchPhase::Start && batch.contact_count() == 1 {
                    let timer = ctx.schedule_timer(self.config.delay_ms);
                    RecognizerState::Tracking(LongPressTracking { timer: Some(timer) })
                } else {
                    RecognizerState::Idle
                }
            }
            RecognizerState::Tracking(tracking) => {
                if batch.contact_count() != 1 {
                    RecognizerState::Cancelled
                } else {
                    match batch.phase {
                        TouchPhase::Start => {
                            // Restart: the old handle drops and cancels.
                            let timer = ctx.schedule_timer(self.config.delay_ms);
                            RecognizerState::Tracking(LongPressTracking { timer: Some(timer) })
                        }
                        TouchPhase::Move => RecognizerState::Tracking(tracking),
                        TouchPhase::End => RecognizerState::Resolved,
                        TouchPhase::Cancel => RecognizerState::Cancelled,
                    }
                }
            }
            other => other,
        };
        self.state.settle();
    }

    fn on_timer(&mut self, timer: TimerId, ctx: &mut RecognizerContext<'_>) {
        let armed = match &self.state {
            RecognizerState::Tracking(tracking) => {
                tracking.timer.as_ref().map(TimerHandle::id) == Some(timer)
            }
            _ => false,
        };
        if armed {
            ctx.emit(GestureEvent::LongPress);
            ctx.request_haptic(HapticIntensity::Medium);
            self.state = RecognizerState::Resolved;
            self.state.settle();
        }
    }

    fn reset(&mut self) {
        self.state = RecognizerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::test_support::TestDispatch;
    use crate::touch::TouchSample;

    fn batch(phase: TouchPhase, t: u64, x: f64, y: f64) -> TouchBatch {
        TouchBatch::new(phase, t, [TouchSample::new(0, x, y, t)])
    }

    #[test]
    fn fires_after_delay() {
        let mut recognizer = LongPressRecognizer::new(LongPressConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 10.0, 10.0));
        dispatch.tick(&mut recognizer, 500);

        assert_eq!(dispatch.drain(), vec![GestureEvent::LongPress]);
        assert_eq!(
            dispatch.haptics.borrow().as_slice(),
            &[HapticIntensity::Medium]
        );
        assert_eq!(recognizer.phase(), RecognizerPhase::Idle);
    }

    #[test]
    fn release_at_499_never_fires() {
        let mut recognizer = LongPressRecognizer::new(LongPressConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 10.0, 10.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 499, 10.0, 10.0));
        dispatch.tick(&mut recognizer, 1_000);

        assert!(dispatch.drain().is_empty());
        assert_eq!(dispatch.timers.pending(), 0);
    }

    #[test]
    fn release_after_fire_adds_nothing() {
        let mut recognizer = LongPressRecognizer::new(LongPressConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 10.0, 10.0));
        dispatch.tick(&mut recognizer, 500);
        dispatch.feed(&mut recognizer, &batch(TouchPhase::End, 600, 10.0, 10.0));

        assert_eq!(dispatch.drain(), vec![GestureEvent::LongPress]);
    }

    #[test]
    fn contact_cancel_disarms() {
        let mut recognizer = LongPressRecognizer::new(LongPressConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 10.0, 10.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::Cancel, 100, 10.0, 10.0));
        dispatch.tick(&mut recognizer, 1_000);

        assert!(dispatch.drain().is_empty());
    }

    #[test]
    fn second_finger_disarms() {
        let mut recognizer = LongPressRecognizer::new(LongPressConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 10.0, 10.0));
        dispatch.feed(
            &mut recognizer,
            &TouchBatch::new(
                TouchPhase::Start,
                100,
                [
                    TouchSample::new(0, 10.0, 10.0, 100),
                    TouchSample::new(1, 50.0, 50.0, 100),
                ],
            ),
        );
        dispatch.tick(&mut recognizer, 1_000);

        assert!(dispatch.drain().is_empty());
        assert_eq!(dispatch.timers.pending(), 0);
    }

    #[test]
    fn reset_disarms_and_is_repeatable() {
        let mut recognizer = LongPressRecognizer::new(LongPressConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 10.0, 10.0));
        recognizer.reset();
        recognizer.reset();
        dispatch.tick(&mut recognizer, 1_000);

        assert!(dispatch.drain().is_empty());
        assert_eq!(dispatch.timers.pending(), 0);
        assert_eq!(recognizer.phase(), RecognizerPhase::Idle);
    }

    #[test]
    fn movement_does_not_disarm() {
        let mut recognizer = LongPressRecognizer::new(LongPressConfig::default());
        let mut dispatch = TestDispatch::new();

        dispatch.feed(&mut recognizer, &batch(TouchPhase::Start, 0, 10.0, 10.0));
        dispatch.feed(&mut recognizer, &batch(TouchPhase::Move, 200, 14.0, 12.0));
        dispatch.tick(&mut recognizer, 500);

        assert_eq!(dispatch.drain(), vec![GestureEvent::LongPress]);
    }
}
