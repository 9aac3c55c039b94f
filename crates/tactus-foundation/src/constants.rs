//! Default gesture thresholds.
//!
//! These values are in logical pixels (and px/ms for velocities). They are
//! the per-recognizer config defaults; every knob can be overridden per
//! instance through the types in [`crate::config`].
//!
//! # DPI Considerations
//!
//! For very high-density touch screens, consider scaling the distance
//! thresholds by the device's DPI factor before building configs. The
//! defaults work well for typical phone/tablet displays.

/// Minimum total displacement for a swipe, in logical pixels.
///
/// Below this a released contact is treated as a tap/no-op rather than a
/// directional swipe.
pub const SWIPE_DISTANCE_THRESHOLD: f64 = 50.0;

/// Minimum average velocity for a swipe, in px/ms.
///
/// A slow 60px drag-and-release is a positioning gesture, not a swipe;
/// requiring velocity as well as distance separates the two.
pub const SWIPE_VELOCITY_THRESHOLD: f64 = 0.3;

/// Pan slop in logical pixels.
///
/// Movement within this radius of the press position is suppressed as
/// hand-tremor jitter. Once exceeded, the pan latches and every subsequent
/// move emits.
pub const PAN_DISTANCE_THRESHOLD: f64 = 10.0;

/// Minimum `|scale - 1|` before a pinch emits.
///
/// Two resting fingers drift a few pixels constantly; without this gate a
/// pinch would fire on sub-perceptible distance noise.
pub const PINCH_SCALE_THRESHOLD: f64 = 0.1;

/// Long-press delay in milliseconds.
pub const LONG_PRESS_DELAY_MS: u64 = 500;

/// Damping multiplier applied to raw pull distance.
///
/// The pull indicator deliberately does not track the finger 1:1; half the
/// raw delta reads as a rubber-band.
pub const PULL_RESISTANCE: f64 = 0.5;

/// Ceiling on the damped pull distance, in logical pixels.
pub const PULL_MAX_DISTANCE: f64 = 200.0;

/// Damped pull distance at which releasing triggers a refresh.
pub const PULL_REFRESH_THRESHOLD: f64 = 100.0;
