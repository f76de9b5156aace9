use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::types::PointerId;

fn event(kind: GestureKind) -> GestureEvent {
    GestureEvent::single(kind, 0, Pointer::new(PointerId(0)))
}

#[test]
fn listeners_run_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bus = EventBus::new();

    for name in ["first", "second", "third"] {
        let log = Rc::clone(&log);
        bus.subscribe(move |e: &GestureEvent| log.borrow_mut().push((name, e.kind)));
    }

    bus.publish(&event(GestureKind::Tap));

    assert_eq!(
        *log.borrow(),
        vec![
            ("first", GestureKind::Tap),
            ("second", GestureKind::Tap),
            ("third", GestureKind::Tap)
        ]
    );
}

#[test]
fn filtered_listener_only_sees_its_kind() {
    let taps = Rc::new(RefCell::new(0u32));
    let mut bus = EventBus::new();
    {
        let taps = Rc::clone(&taps);
        bus.subscribe_to(GestureKind::DoubleTap, move |_: &GestureEvent| {
            *taps.borrow_mut() += 1
        });
    }

    bus.publish(&event(GestureKind::Tap));
    bus.publish(&event(GestureKind::DoubleTap));
    bus.publish(&event(GestureKind::SlideBegin));

    assert_eq!(*taps.borrow(), 1);
}

#[test]
fn unsubscribe_removes_only_that_listener() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut bus = EventBus::new();

    let a = {
        let seen = Rc::clone(&seen);
        bus.subscribe(move |_: &GestureEvent| seen.borrow_mut().push('a'))
    };
    {
        let seen = Rc::clone(&seen);
        bus.subscribe(move |_: &GestureEvent| seen.borrow_mut().push('b'));
    }

    assert!(bus.unsubscribe(a));
    assert!(!bus.unsubscribe(a));
    assert_eq!(bus.listener_count(), 1);

    bus.publish(&event(GestureKind::Flick));
    assert_eq!(*seen.borrow(), vec!['b']);
}

#[test]
fn logging_listener_accepts_every_kind() {
    let mut listener = LoggingListener;
    let first = Pointer::new(PointerId(0));
    let second = Pointer::new(PointerId(1));
    listener.on_gesture(&GestureEvent::pair(GestureKind::PinchBegin, 5, first, second));
    listener.on_gesture(&event(GestureKind::SuspiciousBehavior));
    listener.on_gesture(&event(GestureKind::LongPressCancel));
}
