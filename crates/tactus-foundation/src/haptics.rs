//! Haptic feedback side-channel.
//!
//! The engine never talks to haptic hardware; it forwards a symbolic
//! intensity request to an injected sink and does not block on or observe
//! the result.

use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticIntensity {
    Light,
    Medium,
    Heavy,
}

/// Fire-and-forget haptic request sink, supplied by the host platform.
pub type HapticSink = Rc<dyn Fn(HapticIntensity)>;
