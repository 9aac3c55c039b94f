//! Core runtime services for the tactus gesture engine.
//!
//! Everything here is single-threaded and cooperatively driven: the host
//! pumps time into [`TimerQueue::advance`] and futures are polled inline
//! when their wakers fire. No threads are spawned anywhere in tactus.

pub mod task;
pub mod timer;

pub use task::{active_task_count, spawn_local, LocalFuture, TaskHandle};
pub use timer::{TimerHandle, TimerId, TimerQueue};
