//! Hand-driven surfaces, recording subscribers, and a controllable
//! refresh future.

use std::cell::RefCell;
use std::rc::Rc;
use std::task::{Poll, Waker};
use tactus_engine::{BatchSink, InputSubscription, InputSurface};
use tactus_foundation::events::GestureEvent;
use tactus_foundation::haptics::{HapticIntensity, HapticSink};
use tactus_foundation::recognizers::{RefreshCallback, RefreshError};
use tactus_foundation::touch::TouchBatch;

/// An input surface the test drives by hand via [`TestSurface::emit`].
#[derive(Clone, Default)]
pub struct TestSurface {
    inner: Rc<RefCell<TestSurfaceInner>>,
}

#[derive(Default)]
struct TestSurfaceInner {
    sinks: Vec<(u64, BatchSink)>,
    next_id: u64,
}

impl TestSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, batch: &TouchBatch) {
        let sinks: Vec<BatchSink> = self
            .inner
            .borrow()
            .sinks
            .iter()
            .map(|(_, sink)| sink.clone())
            .collect();
        for sink in sinks {
            sink(batch);
        }
    }

    pub fn emit_all(&self, batches: &[TouchBatch]) {
        for batch in batches {
            self.emit(batch);
        }
    }

    /// Live subscriptions; zero once every attached engine has detached.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().sinks.len()
    }
}

impl InputSurface for TestSurface {
    fn subscribe(&self, sink: BatchSink) -> InputSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.sinks.push((id, sink));
            id
        };
        let inner = Rc::downgrade(&self.inner);
        InputSubscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .borrow_mut()
                    .sinks
                    .retain(|(existing, _)| *existing != id);
            }
        })
    }
}

/// Subscriber that records every gesture event it receives.
#[derive(Clone, Default)]
pub struct GestureRecorder {
    events: Rc<RefCell<Vec<GestureEvent>>>,
}

impl GestureRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> Rc<dyn Fn(&GestureEvent)> {
        let events = self.events.clone();
        Rc::new(move |event| events.borrow_mut().push(*event))
    }

    pub fn events(&self) -> Vec<GestureEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<GestureEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

/// Records haptic requests in arrival order.
#[derive(Clone, Default)]
pub struct HapticRecorder {
    requests: Rc<RefCell<Vec<HapticIntensity>>>,
}

impl HapticRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> HapticSink {
        let requests = self.requests.clone();
        Rc::new(move |intensity| requests.borrow_mut().push(intensity))
    }

    pub fn requests(&self) -> Vec<HapticIntensity> {
        self.requests.borrow().clone()
    }
}

/// A refresh callback whose future the test settles by hand, so the
/// pull-to-refresh async boundary is fully deterministic.
#[derive(Clone, Default)]
pub struct ControlledRefresh {
    inner: Rc<RefCell<ControlledRefreshInner>>,
}

#[derive(Default)]
struct ControlledRefreshInner {
    outcome: Option<Result<(), RefreshError>>,
    waker: Option<Waker>,
    invocations: usize,
}

impl ControlledRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> RefreshCallback {
        let inner = self.inner.clone();
        Rc::new(move || {
            inner.borrow_mut().invocations += 1;
            let inner = inner.clone();
            Box::pin(std::future::poll_fn(move |cx| {
                let mut inner = inner.borrow_mut();
                match inner.outcome.take() {
                    Some(result) => Poll::Ready(result),
                    None => {
                        inner.waker = Some(cx.waker().clone());
                        Poll::Pending
                    }
                }
            }))
        })
    }

    /// Settles the in-flight future. The stored waker polls the task
    /// inline, so the recognizer observes the outcome on its next tick.
    pub fn complete(&self, result: Result<(), RefreshError>) {
        let waker = {
            let mut inner = self.inner.borrow_mut();
            inner.outcome = Some(result);
            inner.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// How many times the refresh callback has been invoked.
    pub fn invocation_count(&self) -> usize {
        self.inner.borrow().invocations
    }
}
