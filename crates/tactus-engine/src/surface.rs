//! Input surface abstraction.
//!
//! The engine never touches a platform event API; it only requires a
//! source it can subscribe to for [`TouchBatch`]es. Native touch events,
//! pointer events, or a synthetic test harness all satisfy the same
//! contract.

use std::rc::Rc;
use tactus_foundation::touch::TouchBatch;

pub type BatchSink = Rc<dyn Fn(&TouchBatch)>;

pub trait InputSurface {
    /// Registers a sink for this surface's batch stream. The returned
    /// subscription unsubscribes on `cancel` or drop.
    fn subscribe(&self, sink: BatchSink) -> InputSubscription;
}

/// Active subscription to an input surface. Cancellation is idempotent:
/// the teardown closure is taken on first cancel, so a drop after an
/// explicit cancel is a no-op.
pub struct InputSubscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl InputSubscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A subscription that owns nothing; cancelling it does nothing.
    pub fn inert() -> Self {
        Self { teardown: None }
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
