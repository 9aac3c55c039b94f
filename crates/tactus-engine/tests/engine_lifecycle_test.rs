//! Attach/detach lifecycle: idempotence, timer cleanup, and the
//! no-leftover-state round-trip guarantee.

use std::rc::Rc;
use tactus_engine::GestureEngine;
use tactus_foundation::config::{LongPressConfig, PullToRefreshConfig, SwipeConfig};
use tactus_foundation::events::GestureFamilies;
use tactus_foundation::recognizers::{
    LongPressRecognizer, PullToRefreshRecognizer, SwipeRecognizer,
};
use tactus_testing::prelude::*;

#[test]
fn detach_clears_armed_timers_and_unsubscribes() {
    let surface = TestSurface::new();
    let mut engine = GestureEngine::new();

    let id = engine.attach(
        &surface,
        vec![Box::new(LongPressRecognizer::new(LongPressConfig::default()))],
    );
    assert_eq!(surface.subscriber_count(), 1);

    surface.emit_all(&SequenceBuilder::new().down(0, 10.0, 10.0).build());
    assert_eq!(engine.pending_timer_count(id), 1);

    engine.detach(id);
    assert!(!engine.is_attached(id));
    assert_eq!(surface.subscriber_count(), 0);
    assert_eq!(engine.pending_timer_count(id), 0);
}

#[test]
fn detach_twice_equals_detach_once() {
    let surface = TestSurface::new();
    let mut engine = GestureEngine::new();

    let id = engine.attach(
        &surface,
        vec![Box::new(LongPressRecognizer::new(LongPressConfig::default()))],
    );
    surface.emit_all(&SequenceBuilder::new().down(0, 10.0, 10.0).build());

    engine.detach(id);
    engine.detach(id);

    assert!(!engine.is_attached(id));
    assert_eq!(surface.subscriber_count(), 0);
    assert_eq!(engine.attached_count(), 0);
}

#[test]
fn detach_of_never_attached_surface_is_a_no_op() {
    let mut engine = GestureEngine::new();
    engine.detach(12_345);
    assert_eq!(engine.attached_count(), 0);
}

#[test]
fn stale_events_after_detach_do_not_fire_gestures() {
    let surface = TestSurface::new();
    let recorder = GestureRecorder::new();
    let mut engine = GestureEngine::new();

    let id = engine.attach(
        &surface,
        vec![Box::new(LongPressRecognizer::new(LongPressConfig::default()))],
    );
    engine.subscribe(id, GestureFamilies::ALL, recorder.callback());

    surface.emit_all(&SequenceBuilder::new().down(0, 10.0, 10.0).build());
    engine.detach(id);

    // The long-press deadline passing after detach must be inert.
    engine.advance(1_000);
    surface.emit_all(&SequenceBuilder::new().down(1_100, 10.0, 10.0).build());

    assert!(recorder.is_empty());
}

#[test]
fn round_trip_leaves_no_process_wide_state() {
    let surface = TestSurface::new();
    let refresh = ControlledRefresh::new();
    let recorder = GestureRecorder::new();
    let mut engine = GestureEngine::new();

    let id = engine.attach(
        &surface,
        vec![
            Box::new(SwipeRecognizer::new(SwipeConfig::default())),
            Box::new(LongPressRecognizer::new(LongPressConfig::default())),
            Box::new(PullToRefreshRecognizer::new(
                PullToRefreshConfig::default(),
                Rc::new(|| 0.0),
                refresh.callback(),
            )),
        ],
    );
    engine.subscribe(id, GestureFamilies::ALL, recorder.callback());

    // A qualifying pull leaves a refresh future in flight...
    surface.emit_all(
        &SequenceBuilder::new()
            .down(0, 50.0, 0.0)
            .move_to(50, 50.0, 300.0)
            .up(100)
            .build(),
    );
    assert_eq!(refresh.invocation_count(), 1);
    assert_eq!(tactus_core::active_task_count(), 1);

    // ...and a fresh press leaves a long-press timer armed.
    surface.emit_all(&SequenceBuilder::new().down(200, 10.0, 10.0).build());
    assert_eq!(engine.pending_timer_count(id), 1);

    engine.detach(id);

    assert_eq!(tactus_core::active_task_count(), 0);
    assert_eq!(surface.subscriber_count(), 0);
    assert_eq!(engine.attached_count(), 0);

    // Settling the orphaned refresh after detach must be inert.
    let before = recorder.len();
    refresh.complete(Ok(()));
    engine.advance(2_000);
    assert_eq!(recorder.len(), before);
}

#[test]
fn surfaces_are_independent() {
    let first_surface = TestSurface::new();
    let second_surface = TestSurface::new();
    let first = GestureRecorder::new();
    let second = GestureRecorder::new();
    let mut engine = GestureEngine::new();

    let first_id = engine.attach(
        &first_surface,
        vec![Box::new(SwipeRecognizer::new(SwipeConfig::default()))],
    );
    let second_id = engine.attach(
        &second_surface,
        vec![Box::new(SwipeRecognizer::new(SwipeConfig::default()))],
    );
    engine.subscribe(first_id, GestureFamilies::ALL, first.callback());
    engine.subscribe(second_id, GestureFamilies::ALL, second.callback());

    let swipe = SequenceBuilder::new()
        .down(0, 0.0, 0.0)
        .move_to(100, 120.0, 0.0)
        .up(100)
        .build();
    first_surface.emit_all(&swipe);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());

    engine.detach(first_id);
    assert!(engine.is_attached(second_id));

    second_surface.emit_all(&swipe);
    assert_eq!(second.len(), 1);
}

#[test]
fn detach_all_resets_every_surface() {
    let first_surface = TestSurface::new();
    let second_surface = TestSurface::new();
    let mut engine = GestureEngine::new();

    engine.attach(
        &first_surface,
        vec![Box::new(LongPressRecognizer::new(LongPressConfig::default()))],
    );
    engine.attach(
        &second_surface,
        vec![Box::new(LongPressRecognizer::new(LongPressConfig::default()))],
    );
    first_surface.emit_all(&SequenceBuilder::new().down(0, 0.0, 0.0).build());
    second_surface.emit_all(&SequenceBuilder::new().down(0, 0.0, 0.0).build());

    engine.detach_all();

    assert_eq!(engine.attached_count(), 0);
    assert_eq!(first_surface.subscriber_count(), 0);
    assert_eq!(second_surface.subscriber_count(), 0);
}
