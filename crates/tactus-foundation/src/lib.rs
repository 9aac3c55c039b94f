//! Touch input model and gesture recognizers for tactus.
//!
//! A [`touch::TouchBatch`] goes in, a [`events::GestureEvent`] comes out.
//! Each recognizer is an independent state machine over the same input
//! stream; they share no mutable state with each other.

pub mod config;
pub mod constants;
pub mod events;
pub mod geometry;
pub mod haptics;
pub mod recognizers;
pub mod touch;

pub use config::{Axis, LongPressConfig, PanConfig, PinchConfig, PullToRefreshConfig, SwipeConfig};
pub use events::{Direction, GestureEvent, GestureFamilies, GestureKind, PullPhase};
pub use geometry::Point;
pub use haptics::{HapticIntensity, HapticSink};
pub use recognizers::{
    LongPressRecognizer, PanRecognizer, PinchRecognizer, PullToRefreshRecognizer, Recognizer,
    RecognizerContext, RecognizerPhase, RecognizerState, SwipeRecognizer,
};
pub use touch::{ContactId, TouchBatch, TouchPhase, TouchSample};
