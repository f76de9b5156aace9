use log::debug;

use crate::types::Pointer;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    SuspiciousBehavior,
    TouchBegin,
    TouchEnd,
    Tap,
    DoubleTap,
    MultiTap,
    Flick,
    Swipe,
    LongPressBegin,
    LongPressActive,
    LongPressEnd,
    LongPressCancel,
    SlideBegin,
    SlideActive,
    SlideEnd,
    SlideCancel,
    PinchBegin,
    PinchActive,
    PinchEnd,
}

impl GestureKind {
    pub const fn label(self) -> &'static str {
        match self {
            GestureKind::SuspiciousBehavior => "suspicious_behavior",
            GestureKind::TouchBegin => "touch_begin",
            GestureKind::TouchEnd => "touch_end",
            GestureKind::Tap => "tap",
            GestureKind::DoubleTap => "double_tap",
            GestureKind::MultiTap => "multi_tap",
            GestureKind::Flick => "flick",
            GestureKind::Swipe => "swipe",
            GestureKind::LongPressBegin => "long_press_begin",
            GestureKind::LongPressActive => "long_press_active",
            GestureKind::LongPressEnd => "long_press_end",
            GestureKind::LongPressCancel => "long_press_cancel",
            GestureKind::SlideBegin => "slide_begin",
            GestureKind::SlideActive => "slide_active",
            GestureKind::SlideEnd => "slide_end",
            GestureKind::SlideCancel => "slide_cancel",
            GestureKind::PinchBegin => "pinch_begin",
            GestureKind::PinchActive => "pinch_active",
            GestureKind::PinchEnd => "pinch_end",
        }
    }

    pub const fn is_pinch(self) -> bool {
        matches!(
            self,
            GestureKind::PinchBegin | GestureKind::PinchActive | GestureKind::PinchEnd
        )
    }
}

/// One emitted gesture.
///
/// `primary` and `secondary` are snapshots taken at emission time; only pinch
/// events carry a `secondary` pointer.
#[derive(Clone, Copy, Debug)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub t_ms: u64,
    pub primary: Pointer,
    pub secondary: Option<Pointer>,
}

impl GestureEvent {
    pub(crate) fn single(kind: GestureKind, t_ms: u64, pointer: Pointer) -> Self {
        Self {
            kind,
            t_ms,
            primary: pointer,
            secondary: None,
        }
    }

    pub(crate) fn pair(kind: GestureKind, t_ms: u64, first: Pointer, second: Pointer) -> Self {
        Self {
            kind,
            t_ms,
            primary: first,
            secondary: Some(second),
        }
    }
}

pub trait GestureListener {
    fn on_gesture(&mut self, event: &GestureEvent);
}

impl<F> GestureListener for F
where
    F: FnMut(&GestureEvent),
{
    fn on_gesture(&mut self, event: &GestureEvent) {
        self(event)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Subscription {
    id: ListenerId,
    filter: Option<GestureKind>,
    listener: Box<dyn GestureListener>,
}

/// Synchronous fan-out of gesture events, in registration order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for every gesture kind.
    pub fn subscribe(&mut self, listener: impl GestureListener + 'static) -> ListenerId {
        self.register(None, Box::new(listener))
    }

    /// Registers a listener that only sees `kind`.
    pub fn subscribe_to(
        &mut self,
        kind: GestureKind,
        listener: impl GestureListener + 'static,
    ) -> ListenerId {
        self.register(Some(kind), Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn publish(&mut self, event: &GestureEvent) {
        for subscription in &mut self.subscriptions {
            if subscription.filter.is_some_and(|kind| kind != event.kind) {
                continue;
            }
            subscription.listener.on_gesture(event);
        }
    }

    fn register(
        &mut self,
        filter: Option<GestureKind>,
        listener: Box<dyn GestureListener>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            listener,
        });
        id
    }
}

/// Writes every gesture to the `log` facade at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingListener;

impl GestureListener for LoggingListener {
    fn on_gesture(&mut self, event: &GestureEvent) {
        let p = &event.primary;
        match event.kind {
            GestureKind::SuspiciousBehavior => {
                debug!("gesture suspicious_behavior id={} press_ms={}", p.id.index(), p.press_ms())
            }
            GestureKind::Tap | GestureKind::DoubleTap | GestureKind::MultiTap => debug!(
                "gesture {} id={} tap_count={}",
                event.kind.label(),
                p.id.index(),
                p.tap_count
            ),
            GestureKind::Flick | GestureKind::SlideBegin | GestureKind::SlideEnd => debug!(
                "gesture {} id={} delta=({:.1},{:.1})",
                event.kind.label(),
                p.id.index(),
                p.delta_position.x,
                p.delta_position.y
            ),
            GestureKind::Swipe => debug!(
                "gesture swipe id={} start_to_end=({:.1},{:.1})",
                p.id.index(),
                p.start_to_end_delta.x,
                p.start_to_end_delta.y
            ),
            GestureKind::LongPressBegin => {
                debug!("gesture long_press_begin id={} start_ms={}", p.id.index(), p.start_ms)
            }
            GestureKind::LongPressEnd => {
                debug!("gesture long_press_end id={} end_ms={}", p.id.index(), p.end_ms)
            }
            kind if kind.is_pinch() => debug!(
                "gesture {} ids=({},{})",
                kind.label(),
                p.id.index(),
                event.secondary.map_or(usize::MAX, |s| s.id.index())
            ),
            kind => debug!("gesture {} id={}", kind.label(), p.id.index()),
        }
    }
}
