//! Lifecycle management and dispatch for tactus recognizers.
//!
//! The engine owns zero or more attached recognizers per input surface,
//! fans every incoming [`tactus_foundation::TouchBatch`] out to all of
//! them, and guarantees that `detach` synchronously clears timers, cancels
//! in-flight work, and resets every recognizer before returning. It holds
//! no gesture-interpretation logic of its own.

pub mod clock;
pub mod engine;
pub mod surface;

pub use clock::MonotonicClock;
pub use engine::{GestureEngine, SubscriptionId, SurfaceId};
pub use surface::{BatchSink, InputSubscription, InputSurface};
