//! The gesture engine: per-surface recognizer ownership and dispatch.

use crate::surface::{BatchSink, InputSubscription, InputSurface};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tactus_core::TimerQueue;
use tactus_foundation::events::{GestureEvent, GestureFamilies};
use tactus_foundation::haptics::HapticSink;
use tactus_foundation::recognizers::{Recognizer, RecognizerContext};
use tactus_foundation::touch::{TouchBatch, TouchSample};

pub type SurfaceId = u64;
pub type SubscriptionId = u64;

/// Pure dispatch plus resource ownership.
///
/// `attach` subscribes to a surface's batch stream and fans every batch
/// out to all of that surface's recognizers unconditionally; each
/// recognizer decides relevance itself. `detach` is the hard cancellation
/// boundary: it synchronously cancels the input subscription, clears all
/// timers, cancels in-flight refresh tasks, and resets every recognizer to
/// idle before returning, so no recognizer outlives its surface.
///
/// Install a haptic sink before attaching; each surface captures the sink
/// current at attach time.
pub struct GestureEngine {
    surfaces: IndexMap<SurfaceId, SurfaceSlot>,
    haptics: Option<HapticSink>,
    next_surface_id: SurfaceId,
}

struct SurfaceSlot {
    core: Rc<RefCell<SurfaceCore>>,
    input: Option<InputSubscription>,
}

#[derive(Clone)]
struct Subscriber {
    families: GestureFamilies,
    callback: Rc<dyn Fn(&GestureEvent)>,
}

struct SurfaceCore {
    recognizers: Vec<Box<dyn Recognizer>>,
    timers: TimerQueue,
    subscribers: FxHashMap<SubscriptionId, Subscriber>,
    next_subscription_id: SubscriptionId,
    pending: VecDeque<GestureEvent>,
    last_t: Option<u64>,
    haptics: Option<HapticSink>,
}

impl SurfaceCore {
    fn new(recognizers: Vec<Box<dyn Recognizer>>, haptics: Option<HapticSink>) -> Self {
        Self {
            recognizers,
            timers: TimerQueue::new(),
            subscribers: FxHashMap::default(),
            next_subscription_id: 1,
            pending: VecDeque::new(),
            last_t: None,
            haptics,
        }
    }

    fn process_batch(&mut self, batch: &TouchBatch) {
        let now_ms = match self.last_t {
            Some(last) if batch.t < last => {
                log::warn!(
                    "touch batch timestamp ran backwards ({} < {}); clamping",
                    batch.t,
                    last
                );
                last
            }
            _ => batch.t,
        };
        let clamped;
        let batch = if now_ms != batch.t {
            clamped = clamp_batch(batch, now_ms);
            &clamped
        } else {
            batch
        };

        self.service(now_ms);

        let Self {
            recognizers,
            timers,
            pending,
            haptics,
            ..
        } = self;
        let mut ctx = RecognizerContext::new(now_ms, timers, pending, haptics.as_ref());
        for recognizer in recognizers.iter_mut() {
            recognizer.on_batch(batch, &mut ctx);
        }
        self.last_t = Some(now_ms);
    }

    /// Fires due timers and lets recognizers observe settled async work.
    fn service(&mut self, now_ms: u64) {
        let fired = self.timers.advance(now_ms);
        let Self {
            recognizers,
            timers,
            pending,
            haptics,
            ..
        } = self;
        let mut ctx = RecognizerContext::new(now_ms, timers, pending, haptics.as_ref());
        for id in fired {
            for recognizer in recognizers.iter_mut() {
                recognizer.on_timer(id, &mut ctx);
            }
        }
        for recognizer in recognizers.iter_mut() {
            recognizer.on_tick(&mut ctx);
        }
    }

    fn reset(&mut self) {
        for recognizer in self.recognizers.iter_mut() {
            recognizer.reset();
        }
        self.timers.clear();
        self.pending.clear();
    }
}

fn clamp_batch(batch: &TouchBatch, floor_ms: u64) -> TouchBatch {
    TouchBatch::new(
        batch.phase,
        floor_ms,
        batch.contacts.iter().map(|sample| TouchSample {
            t: sample.t.max(floor_ms),
            ..*sample
        }),
    )
}

impl GestureEngine {
    pub fn new() -> Self {
        Self {
            surfaces: IndexMap::new(),
            haptics: None,
            next_surface_id: 1,
        }
    }

    /// Installs the haptic side-channel. Only surfaces attached afterwards
    /// see it.
    pub fn set_haptic_sink(&mut self, sink: HapticSink) {
        self.haptics = Some(sink);
    }

    /// Subscribes to `surface` and begins dispatching its batches to
    /// `recognizers`.
    pub fn attach(
        &mut self,
        surface: &dyn InputSurface,
        recognizers: Vec<Box<dyn Recognizer>>,
    ) -> SurfaceId {
        let id = self.next_surface_id;
        self.next_surface_id += 1;

        let core = Rc::new(RefCell::new(SurfaceCore::new(
            recognizers,
            self.haptics.clone(),
        )));
        let sink: BatchSink = {
            let core = Rc::downgrade(&core);
            Rc::new(move |batch| {
                if let Some(core) = core.upgrade() {
                    Self::dispatch_to(&core, batch);
                }
            })
        };
        let input = surface.subscribe(sink);
        self.surfaces.insert(
            id,
            SurfaceSlot {
                core,
                input: Some(input),
            },
        );
        id
    }

    /// Unsubscribes and forces every recognizer of the surface to idle,
    /// clearing outstanding timers and in-flight tasks. Detaching an
    /// unknown or already-detached surface is a no-op.
    pub fn detach(&mut self, id: SurfaceId) {
        if let Some(mut slot) = self.surfaces.shift_remove(&id) {
            if let Some(input) = slot.input.take() {
                input.cancel();
            }
            slot.core.borrow_mut().reset();
        }
    }

    pub fn detach_all(&mut self) {
        let ids: Vec<SurfaceId> = self.surfaces.keys().copied().collect();
        for id in ids {
            self.detach(id);
        }
    }

    pub fn is_attached(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    pub fn attached_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Dispatches one batch directly, bypassing the surface subscription.
    /// Test harnesses and pull-based hosts use this.
    pub fn dispatch(&mut self, id: SurfaceId, batch: &TouchBatch) {
        if let Some(slot) = self.surfaces.get(&id) {
            Self::dispatch_to(&slot.core, batch);
        }
    }

    /// Drives time forward between input events: fires due timers and
    /// delivers settled refresh outcomes on every attached surface.
    pub fn advance(&mut self, now_ms: u64) {
        for slot in self.surfaces.values() {
            slot.core.borrow_mut().service(now_ms);
            Self::flush(&slot.core);
        }
    }

    /// Registers a gesture event subscriber for `surface`, filtered to
    /// `families`. Returns `None` if the surface is not attached.
    pub fn subscribe(
        &mut self,
        surface: SurfaceId,
        families: GestureFamilies,
        callback: Rc<dyn Fn(&GestureEvent)>,
    ) -> Option<SubscriptionId> {
        let slot = self.surfaces.get(&surface)?;
        let mut core = slot.core.borrow_mut();
        let id = core.next_subscription_id;
        core.next_subscription_id += 1;
        core.subscribers.insert(
            id,
            Subscriber {
                families,
                callback,
            },
        );
        Some(id)
    }

    pub fn unsubscribe(&mut self, surface: SurfaceId, subscription: SubscriptionId) {
        if let Some(slot) = self.surfaces.get(&surface) {
            slot.core.borrow_mut().subscribers.remove(&subscription);
        }
    }

    /// Timers currently armed on the surface; zero after detach and after
    /// every fully resolved gesture sequence.
    pub fn pending_timer_count(&self, id: SurfaceId) -> usize {
        self.surfaces
            .get(&id)
            .map_or(0, |slot| slot.core.borrow().timers.pending())
    }

    fn dispatch_to(core: &Rc<RefCell<SurfaceCore>>, batch: &TouchBatch) {
        core.borrow_mut().process_batch(batch);
        Self::flush(core);
    }

    /// Delivers pending events to subscribers. Events and subscriber
    /// clones are drained out first so callbacks never run under the core
    /// borrow.
    fn flush(core: &Rc<RefCell<SurfaceCore>>) {
        let (events, subscribers) = {
            let mut core = core.borrow_mut();
            if core.pending.is_empty() {
                return;
            }
            let events: Vec<GestureEvent> = core.pending.drain(..).collect();
            let subscribers: Vec<Subscriber> = core.subscribers.values().cloned().collect();
            (events, subscribers)
        };
        for event in &events {
            for subscriber in &subscribers {
                if subscriber.families.contains(event.kind()) {
                    (subscriber.callback)(event);
                }
            }
        }
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}
