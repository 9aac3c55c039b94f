//! Pull-to-refresh: a damped downward drag at the scroll top that hands
//! off to an asynchronous refresh exactly once per qualifying release.

use super::{Recognizer, RecognizerContext, RecognizerPhase, RecognizerState};
use crate::config::PullToRefreshConfig;
use crate::events::{GestureEvent, GestureKind, PullPhase};
use crate::haptics::HapticIntensity;
use crate::touch::{TouchBatch, TouchPhase, TouchSample};
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tactus_core::task::{spawn_local, TaskHandle};

/// Reads the owning scrollable's current offset; the pull only activates
/// while the surface sits at its top edge (`offset <= 0`).
pub type ScrollOffsetProbe = Rc<dyn Fn() -> f64>;

pub type RefreshFuture = Pin<Box<dyn Future<Output = Result<(), RefreshError>>>>;

/// Produces the host's refresh future. Invoked exactly once per qualifying
/// release; never while a previous refresh is still in flight.
pub type RefreshCallback = Rc<dyn Fn() -> RefreshFuture>;

/// Receives the error of a failed refresh so the UI can surface it. The
/// recognizer itself neither logs nor retries; it just resets.
pub type RefreshFailureListener = Rc<dyn Fn(&RefreshError)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshError {
    message: String,
}

impl RefreshError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refresh failed: {}", self.message)
    }
}

impl std::error::Error for RefreshError {}

#[derive(Debug)]
pub struct PullTracking {
    start: TouchSample,
    can_refresh: bool,
    emitted: bool,
}

struct InFlightRefresh {
    task: TaskHandle,
    outcome: Rc<RefCell<Option<Result<(), RefreshError>>>>,
}

/// State machine `Idle -> Pulling -> { Refreshing -> Idle | Idle }`.
///
/// The raw downward delta is damped (`raw * resistance`, capped at
/// `max_pull_distance`) before threshold comparison, so the indicator does
/// not track the finger 1:1. While a refresh future is in flight no new
/// pull cycle starts; the settle path always returns to `Idle`, success or
/// failure.
pub struct PullToRefreshRecognizer {
    config: PullToRefreshConfig,
    scroll_offset: ScrollOffsetProbe,
    on_refresh: RefreshCallback,
    on_failure: Option<RefreshFailureListener>,
    state: RecognizerState<PullTracking>,
    in_flight: Option<InFlightRefresh>,
}

impl PullToRefreshRecognizer {
    pub fn new(
        config: PullToRefreshConfig,
        scroll_offset: ScrollOffsetProbe,
        on_refresh: RefreshCallback,
    ) -> Self {
        Self {
            config,
            scroll_offset,
            on_refresh,
            on_failure: None,
            state: RecognizerState::Idle,
            in_flight: None,
        }
    }

    pub fn with_failure_listener(mut self, listener: RefreshFailureListener) -> Self {
        self.on_failure = Some(listener);
        self
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.is_some()
    }

    fn begin_refresh(&mut self) {
        let outcome = Rc::new(RefCell::new(None));
        let future = (self.on_refresh)();
        let task = spawn_local(Box::pin({
            let outcome = outcome.clone();
            async move {
                *outcome.borrow_mut() = Some(future.await);
            }
        }));
        self.in_flight = Some(InFlightRefresh { task, outcome });
    }

    fn idle_phase() -> GestureEvent {
        GestureEvent::PullToRefresh {
            phase: PullPhase::Idle,
        }
    }
}

impl Recognizer for PullToRefreshRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::PullToRefresh
    }

    fn phase(&self) -> RecognizerPhase {
        self.state.phase()
    }

    fn on_batch(&mut self, batch: &TouchBatch, ctx: &mut RecognizerContext<'_>) {
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            RecognizerState::Idle => match (batch.phase, batch.primary()) {
                (TouchPhase::Start, Some(sample)) if batch.contact_count() == 1 => {
                    if self.in_flight.is_some() {
                        log::debug!("pull ignored: refresh already in flight");
                        RecognizerState::Idle
                    } else {
                        RecognizerState::Tracking(PullTracking {
                            start: *sample,
                            can_refresh: false,
                            emitted: false,
                        })
                    }
                }
                _ => RecognizerState::Idle,
            },
            RecognizerState::Tracking(mut tracking) => {
                if batch.contact_count() != 1 {
                    if tracking.emitted {
                        ctx.emit(Self::idle_phase());
                    }
                    RecognizerState::Cancelled
                } else {
                    match batch.phase {
                        TouchPhase::Move => {
                            if let Some(current) = batch.primary() {
                                let raw = current.y - tracking.start.y;
                                if raw > 0.0 && (self.scroll_offset)() <= 0.0 {
                                    let distance = (raw * self.config.resistance)
                                        .min(self.config.max_pull_distance);
                                    let can_refresh = distance >= self.config.refresh_threshold;
                                    if can_refresh && !tracking.can_refresh {
                                        ctx.request_haptic(HapticIntensity::Light);
                                    }
                                    tracking.can_refresh = can_refresh;
                                    tracking.emitted = true;
                                    ctx.emit(GestureEvent::PullToRefresh {
                                        phase: PullPhase::Pulling {
                                            distance,
                                            can_refresh,
                                        },
                                    });
                                }
                            }
                            RecognizerState::Tracking(tracking)
                        }
                        TouchPhase::End => {
                            if tracking.can_refresh && self.in_flight.is_none() {
                                ctx.emit(GestureEvent::PullToRefresh {
                                    phase: PullPhase::Refreshing,
                                });
                                ctx.request_haptic(HapticIntensity::Medium);
                                self.begin_refresh();
                            } else if tracking.emitted {
                                ctx.emit(Self::idle_phase());
                            }
                            RecognizerState::Resolved
                        }
                        TouchPhase::Cancel => {
                            if tracking.emitted {
                                ctx.emit(Self::idle_phase());
                            }
                            RecognizerState::Cancelled
                        }
                        TouchPhase::Start => RecognizerState::Tracking(tracking),
                    }
                }
            }
            other => other,
        };
        self.state.settle();
    }

    fn on_tick(&mut self, ctx: &mut RecognizerContext<'_>) {
        let settled = self
            .in_flight
            .as_ref()
            .and_then(|in_flight| in_flight.outcome.borrow_mut().take());
        if let Some(result) = settled {
            self.in_flight = None;
            if let Err(error) = &result {
                if let Some(listener) = &self.on_failure {
                    listener(error);
                }
            }
            ctx.emit(Self::idle_phase());
        }
    }

    fn reset(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.cancel();
        }
        self.state = RecognizerState::Idle;
    }
}
