//! Cooperative driving of host-supplied futures.
//!
//! The only asynchronous boundary in tactus is the pull-to-refresh
//! callback: the host hands the recognizer a future, and the recognizer
//! must observe its completion without any executor dependency. Tasks live
//! in a thread-local registry keyed by id so wakers (which must be
//! `'static`) can find them; waking polls the task inline, with an
//! `is_polling`/`needs_poll` pair guarding against re-entrant polls.
//!
//! Completed and cancelled tasks are removed from the registry immediately,
//! so an attach → gesture → detach round trip leaves no process-wide state
//! behind. `active_task_count` exists so tests can assert exactly that.

use futures_task::{waker, ArcWake};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::Context;

pub type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;

thread_local! {
    static TASKS: RefCell<FxHashMap<u64, Rc<TaskInner>>> = RefCell::new(FxHashMap::default());
}

/// Spawns a future onto the thread-local registry and polls it once.
pub fn spawn_local(future: LocalFuture) -> TaskHandle {
    static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);
    let id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    let inner = Rc::new(TaskInner::new(future));
    TASKS.with(|registry| {
        registry.borrow_mut().insert(id, inner.clone());
    });
    inner.request_poll(id);
    TaskHandle { id }
}

/// Number of tasks currently registered (pending, mid-poll, or awaiting a
/// wake). Zero once every spawned future has completed or been cancelled.
pub fn active_task_count() -> usize {
    TASKS.with(|registry| registry.borrow().len())
}

/// Handle to a spawned task. Cancelling drops the future; dropping the
/// handle cancels, so the task cannot outlive its owner.
pub struct TaskHandle {
    id: u64,
}

impl TaskHandle {
    /// Drops the task's future and removes it from the registry.
    /// Idempotent, and a no-op for tasks that already completed.
    pub fn cancel(&self) {
        let inner = TASKS.with(|registry| registry.borrow_mut().remove(&self.id));
        if let Some(inner) = inner {
            inner.future.borrow_mut().take();
        }
    }

    /// True once the future has completed or been cancelled.
    pub fn is_finished(&self) -> bool {
        TASKS.with(|registry| !registry.borrow().contains_key(&self.id))
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct TaskInner {
    future: RefCell<Option<LocalFuture>>,
    is_polling: Cell<bool>,
    needs_poll: Cell<bool>,
}

impl TaskInner {
    fn new(future: LocalFuture) -> Self {
        Self {
            future: RefCell::new(Some(future)),
            is_polling: Cell::new(false),
            needs_poll: Cell::new(false),
        }
    }

    fn request_poll(&self, task_id: u64) {
        if self.is_polling.replace(true) {
            // A wake arrived while this task is mid-poll (its own waker
            // fired synchronously). Flag it; the outer loop re-polls.
            self.needs_poll.set(true);
            return;
        }
        loop {
            self.needs_poll.set(false);
            let waker = waker(Arc::new(TaskWaker { task_id }));
            let mut cx = Context::from_waker(&waker);
            let mut future_slot = self.future.borrow_mut();
            let completed = match future_slot.as_mut() {
                Some(future) => future.as_mut().poll(&mut cx).is_ready(),
                None => true,
            };
            if completed {
                future_slot.take();
                drop(future_slot);
                TASKS.with(|registry| {
                    registry.borrow_mut().remove(&task_id);
                });
                break;
            }
            drop(future_slot);
            if !self.needs_poll.get() {
                break;
            }
        }
        self.is_polling.set(false);
    }
}

struct TaskWaker {
    task_id: u64,
}

impl ArcWake for TaskWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        // Clone the task out before polling so the registry borrow is not
        // held across the poll (completion removes the registry entry).
        let task = TASKS.with(|registry| registry.borrow().get(&arc_self.task_id).cloned());
        match task {
            Some(task) => task.request_poll(arc_self.task_id),
            None => log::trace!("wake for finished task {}", arc_self.task_id),
        }
    }
}
