use core::ops::{Add, Sub};

/// Screen coordinate in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// Placeholder for a slot that has never seen a contact.
    pub const UNSET: Self = Self { x: -1.0, y: -1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenPoint;

    fn sub(self, rhs: Self) -> Self::Output {
        ScreenPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for ScreenPoint {
    type Output = ScreenPoint;

    fn add(self, rhs: Self) -> Self::Output {
        ScreenPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Slot index of a pointer. Stable for the life of the engine that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub(crate) u16);

impl PointerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle returned by a [`crate::HitTester`] for the object under a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContactType {
    #[default]
    Direct,
    Indirect,
    Stylus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Stationary,
    Moved,
    Ended,
    #[default]
    Canceled,
}

impl TouchPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Canceled)
    }
}

/// Tracked state of one pointer slot.
///
/// Slots are allocated once and reused: a released pointer is reset, never
/// dropped. Two pointers compare equal when they share an id, whatever their
/// other fields say.
#[derive(Clone, Copy, Debug)]
pub struct Pointer {
    pub id: PointerId,
    pub is_down: bool,
    pub phase: TouchPhase,
    pub contact: ContactType,
    pub screen_position: ScreenPoint,
    pub delta_position: ScreenPoint,
    /// Release position minus acquisition position. Set on the finalization tick.
    pub start_to_end_delta: ScreenPoint,
    pub start_ms: u64,
    pub end_ms: u64,
    pub tap_count: u32,
    pub last_hit: Option<ObjectRef>,
    pub(crate) last_position: ScreenPoint,
    pub(crate) start_position: ScreenPoint,
    pub(crate) slot_hint: Option<u32>,
}

impl Pointer {
    pub(crate) fn new(id: PointerId) -> Self {
        Self {
            id,
            is_down: false,
            phase: TouchPhase::Canceled,
            contact: ContactType::Direct,
            screen_position: ScreenPoint::UNSET,
            delta_position: ScreenPoint::ZERO,
            start_to_end_delta: ScreenPoint::ZERO,
            start_ms: 0,
            end_ms: 0,
            tap_count: 0,
            last_hit: None,
            last_position: ScreenPoint::UNSET,
            start_position: ScreenPoint::UNSET,
            slot_hint: None,
        }
    }

    /// Time between acquisition and release. Only meaningful once released.
    pub fn press_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Pointer {}
