use crate::types::{ObjectRef, ScreenPoint};

/// Maps a screen position to whatever the host places beneath it.
///
/// Called synchronously from inside a tick; implementations must not block.
pub trait HitTester {
    fn probe(&mut self, position: ScreenPoint) -> Option<ObjectRef>;
}

/// Hit tester for hosts that do not track objects under pointers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHitTesting;

impl HitTester for NoHitTesting {
    fn probe(&mut self, _position: ScreenPoint) -> Option<ObjectRef> {
        None
    }
}

impl<F> HitTester for F
where
    F: FnMut(ScreenPoint) -> Option<ObjectRef>,
{
    fn probe(&mut self, position: ScreenPoint) -> Option<ObjectRef> {
        self(position)
    }
}
