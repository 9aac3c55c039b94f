//! Per-recognizer configuration records.
//!
//! Unset fields use the defaults from [`crate::constants`]; every recognizer
//! takes its config by value at construction.

use crate::constants::{
    LONG_PRESS_DELAY_MS, PAN_DISTANCE_THRESHOLD, PINCH_SCALE_THRESHOLD, PULL_MAX_DISTANCE,
    PULL_REFRESH_THRESHOLD, PULL_RESISTANCE, SWIPE_DISTANCE_THRESHOLD, SWIPE_VELOCITY_THRESHOLD,
};
use crate::events::Direction;

/// Which movement axes a swipe recognizer reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Axis {
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl Axis {
    pub fn allows(&self, direction: Direction) -> bool {
        match self {
            Axis::Horizontal => direction.is_horizontal(),
            Axis::Vertical => direction.is_vertical(),
            Axis::Both => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    /// Minimum total displacement in logical pixels.
    pub distance_threshold: f64,
    /// Minimum average velocity in px/ms.
    pub velocity_threshold: f64,
    pub axis: Axis,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            distance_threshold: SWIPE_DISTANCE_THRESHOLD,
            velocity_threshold: SWIPE_VELOCITY_THRESHOLD,
            axis: Axis::Both,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanConfig {
    /// Slop radius in logical pixels; movement inside it never emits.
    pub threshold: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            threshold: PAN_DISTANCE_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchConfig {
    /// Minimum `|scale - 1|` before emitting.
    pub scale_threshold: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            scale_threshold: PINCH_SCALE_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongPressConfig {
    pub delay_ms: u64,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            delay_ms: LONG_PRESS_DELAY_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullToRefreshConfig {
    /// Damping multiplier applied to the raw downward delta.
    pub resistance: f64,
    /// Ceiling on the damped pull distance.
    pub max_pull_distance: f64,
    /// Damped distance at which a release triggers the refresh.
    pub refresh_threshold: f64,
}

impl Default for PullToRefreshConfig {
    fn default() -> Self {
        Self {
            resistance: PULL_RESISTANCE,
            max_pull_distance: PULL_MAX_DISTANCE,
            refresh_threshold: PULL_REFRESH_THRESHOLD,
        }
    }
}
