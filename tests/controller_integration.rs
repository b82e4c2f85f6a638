use kurbo::{Point, Vec2};
use lamco_synthetic_gesture::controller::SyntheticGestureController;
use lamco_synthetic_gesture::gesture::{
    GestureResult, GestureSourceType, PinchParams, SmoothScrollParams, SyntheticGesture, TapParams,
};
use lamco_synthetic_gesture::input::{SyntheticInputEvent, TouchEventKind};
use lamco_synthetic_gesture::target::{RecordingTarget, SyntheticGestureTarget, TargetCalibration};
use lamco_synthetic_gesture::time::Timestamp;
use mockall::mock;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

mock! {
    Target {}

    impl SyntheticGestureTarget for Target {
        fn dispatch_input_event_to_platform(&mut self, event: SyntheticInputEvent);
        fn set_needs_flush(&mut self);
        fn default_synthetic_gesture_source_type(&self) -> GestureSourceType;
        fn pointer_assumed_stopped_time(&self) -> Duration;
        fn touch_slop_in_dips(&self) -> f64;
        fn min_scaling_span_in_dips(&self) -> f64;
    }
}

type Log = Rc<RefCell<Vec<(usize, GestureResult)>>>;

fn queue_logged<T: SyntheticGestureTarget>(
    controller: &mut SyntheticGestureController<T>,
    log: &Log,
    index: usize,
    gesture: SyntheticGesture,
) {
    let log = Rc::clone(log);
    controller.queue_synthetic_gesture(gesture, move |result| {
        log.borrow_mut().push((index, result));
    });
}

/// Host loop: flush every 16ms and acknowledge immediately
fn drive(controller: &mut SyntheticGestureController<RecordingTarget>) -> Timestamp {
    let mut now = Timestamp::ZERO;
    while !controller.is_idle() {
        controller.flush(now);
        if controller.target_mut().take_flush_request() {
            controller.on_did_flush_input();
        }
        if !controller.is_idle() {
            now += Duration::from_millis(16);
        }
    }
    now
}

fn tap(duration_ms: u64) -> SyntheticGesture {
    SyntheticGesture::new(
        TapParams::new(Point::new(5.0, 5.0), duration_ms)
            .unwrap()
            .into(),
    )
}

#[test]
fn test_gestures_complete_in_fifo_order() {
    let log: Log = Rc::default();
    let mut controller = SyntheticGestureController::new(RecordingTarget::default());

    let scroll = SmoothScrollParams::new(Point::new(50.0, 50.0), vec![Vec2::new(0.0, 200.0)], 800.0)
        .unwrap();
    let pinch = PinchParams::new(Point::new(50.0, 50.0), 1.0, 500.0).unwrap();

    queue_logged(&mut controller, &log, 0, SyntheticGesture::new(scroll.into()));
    queue_logged(&mut controller, &log, 1, tap(0));
    queue_logged(&mut controller, &log, 2, SyntheticGesture::new(pinch.into()));
    queue_logged(&mut controller, &log, 3, tap(40));

    drive(&mut controller);

    let order: Vec<_> = log.borrow().iter().map(|(i, _)| *i).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    assert!(log.borrow().iter().all(|(_, r)| *r == GestureResult::Finished));
}

#[test]
fn test_later_gesture_starts_after_earlier_callback() {
    let log: Log = Rc::default();
    let mut controller = SyntheticGestureController::new(RecordingTarget::default());
    queue_logged(&mut controller, &log, 0, tap(30));
    queue_logged(&mut controller, &log, 1, tap(30));

    let mut now = Timestamp::ZERO;
    loop {
        controller.flush(now);
        let touches = controller.target().events().len();
        // The second tap's press (event #3) never precedes the first callback
        if touches >= 3 {
            assert_eq!(log.borrow().len(), 1);
        }
        if controller.target_mut().take_flush_request() {
            controller.on_did_flush_input();
        }
        if controller.is_idle() {
            break;
        }
        now += Duration::from_millis(16);
    }
    assert_eq!(controller.target().events().len(), 4);
}

#[test]
fn test_exactly_one_callback_despite_extra_calls() {
    let count = Rc::new(RefCell::new(0));
    let mut controller = SyntheticGestureController::new(RecordingTarget::default());
    let counter = Rc::clone(&count);
    controller.queue_synthetic_gesture(tap(20), move |_| *counter.borrow_mut() += 1);

    let mut now = Timestamp::ZERO;
    for _ in 0..20 {
        controller.flush(now);
        controller.flush(now);
        controller.on_did_flush_input();
        controller.on_did_flush_input();
        now += Duration::from_millis(8);
    }
    assert_eq!(*count.borrow(), 1);
    assert!(controller.is_idle());
}

#[test]
fn test_completion_on_ack_boundary() {
    let log: Log = Rc::default();
    let mut controller = SyntheticGestureController::new(RecordingTarget::default());
    queue_logged(&mut controller, &log, 0, tap(10));

    controller.flush(Timestamp::ZERO);
    controller.on_did_flush_input();
    controller.flush(Timestamp::from_millis(16));
    assert!(log.borrow().is_empty());

    // No further flush between the release and its acknowledgment
    controller.on_did_flush_input();
    assert_eq!(*log.borrow(), vec![(0, GestureResult::Finished)]);
}

#[test]
fn test_tap_interval_observed_by_controller() {
    let mut controller = SyntheticGestureController::new(RecordingTarget::default());
    controller.queue_synthetic_gesture(tap(123), |_| {});
    let elapsed = drive(&mut controller);

    let events = controller.into_target().take_events();
    assert_eq!(
        events[1]
            .timestamp()
            .saturating_duration_since(events[0].timestamp()),
        Duration::from_millis(123)
    );
    assert!(elapsed >= Timestamp::from_millis(123));
}

#[test]
fn test_prevent_fling_controls_elapsed_time() {
    let calibration = TargetCalibration {
        pointer_assumed_stopped_time: Duration::from_millis(500),
        ..TargetCalibration::default()
    };

    let run = |prevent_fling: bool| {
        let mut controller = SyntheticGestureController::new(RecordingTarget::new(calibration));
        let scroll = SmoothScrollParams::new(Point::ZERO, vec![Vec2::new(0.0, 20.0)], 800.0)
            .unwrap()
            .with_source_type(GestureSourceType::Touch)
            .with_prevent_fling(prevent_fling);
        controller.queue_synthetic_gesture(SyntheticGesture::new(scroll.into()), |_| {});
        drive(&mut controller)
    };

    assert!(run(true) >= Timestamp::from_millis(500));
    assert!(run(false) <= Timestamp::from_millis(500));
}

#[test]
fn test_scroll_touch_displacement_includes_slop() {
    let mut controller = SyntheticGestureController::new(RecordingTarget::default());
    let scroll = SmoothScrollParams::new(Point::new(0.0, 100.0), vec![Vec2::new(0.0, 250.0)], 800.0)
        .unwrap()
        .with_source_type(GestureSourceType::Touch);
    controller.queue_synthetic_gesture(SyntheticGesture::new(scroll.into()), |_| {});
    drive(&mut controller);

    let touches: Vec<_> = controller
        .target()
        .events()
        .iter()
        .filter_map(|e| e.as_touch())
        .collect();
    assert_eq!(touches.first().unwrap().kind, TouchEventKind::Start);
    let last_move = touches
        .iter()
        .filter(|t| t.kind == TouchEventKind::Move)
        .last()
        .unwrap();
    assert!((last_move.points[0].y - 100.0 - 257.0).abs() < 1e-9);
}

#[test]
fn test_zero_distance_scroll_dispatches_nothing() {
    let log: Log = Rc::default();
    let mut controller = SyntheticGestureController::new(RecordingTarget::default());
    let scroll = SmoothScrollParams::new(Point::ZERO, vec![Vec2::ZERO], 800.0).unwrap();
    queue_logged(&mut controller, &log, 0, SyntheticGesture::new(scroll.into()));

    controller.flush(Timestamp::ZERO);
    assert_eq!(*log.borrow(), vec![(0, GestureResult::Finished)]);
    assert!(controller.target().events().is_empty());
    assert_eq!(controller.target().flush_requests(), 0);
}

#[test]
fn test_default_source_resolved_through_target() {
    let mut target = MockTarget::new();
    target
        .expect_default_synthetic_gesture_source_type()
        .times(1)
        .returning(|| GestureSourceType::Mouse);
    target
        .expect_dispatch_input_event_to_platform()
        .withf(|event| event.as_mouse().is_some())
        .times(2)
        .returning(|_| ());
    target.expect_set_needs_flush().times(1).returning(|| ());

    let log: Log = Rc::default();
    let mut controller = SyntheticGestureController::new(target);
    queue_logged(&mut controller, &log, 0, tap(0));

    controller.flush(Timestamp::ZERO);
    controller.on_did_flush_input();
    assert_eq!(*log.borrow(), vec![(0, GestureResult::Finished)]);
}

#[test]
fn test_unresolvable_source_reported_without_flush() {
    let mut target = MockTarget::new();
    target
        .expect_default_synthetic_gesture_source_type()
        .returning(|| GestureSourceType::Default);
    target.expect_dispatch_input_event_to_platform().never();
    target.expect_set_needs_flush().never();

    let log: Log = Rc::default();
    let mut controller = SyntheticGestureController::new(target);
    queue_logged(&mut controller, &log, 0, tap(10));

    controller.flush(Timestamp::ZERO);
    assert_eq!(
        *log.borrow(),
        vec![(0, GestureResult::SourceTypeNotImplemented)]
    );
    assert!(!controller.awaiting_flush_ack());
}
