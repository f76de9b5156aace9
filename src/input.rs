use crate::types::{ContactType, ScreenPoint};

/// Edge reported by the raw source. Everything between the two edges is
/// classified by the engine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawTransition {
    Began,
    Ended,
}

/// One contact as reported by the input source for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawSample {
    /// Per-device identifier reused across frames for the same physical contact.
    pub slot_hint: u32,
    pub position: ScreenPoint,
    pub transition: Option<RawTransition>,
    pub contact: ContactType,
}

impl RawSample {
    pub const fn began(slot_hint: u32, position: ScreenPoint) -> Self {
        Self {
            slot_hint,
            position,
            transition: Some(RawTransition::Began),
            contact: ContactType::Direct,
        }
    }

    pub const fn held(slot_hint: u32, position: ScreenPoint) -> Self {
        Self {
            slot_hint,
            position,
            transition: None,
            contact: ContactType::Direct,
        }
    }

    pub const fn ended(slot_hint: u32, position: ScreenPoint) -> Self {
        Self {
            slot_hint,
            position,
            transition: Some(RawTransition::Ended),
            contact: ContactType::Direct,
        }
    }

    pub const fn with_contact(mut self, contact: ContactType) -> Self {
        self.contact = contact;
        self
    }
}

/// Turns primary mouse button state into touch-like raw samples.
///
/// A mouse only ever produces one contact, so every sample carries the same
/// slot hint. The release sample keeps the last pressed position.
#[derive(Clone, Copy, Debug)]
pub struct MouseSource {
    slot_hint: u32,
    was_down: bool,
    last_position: ScreenPoint,
}

impl Default for MouseSource {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MouseSource {
    pub const fn new(slot_hint: u32) -> Self {
        Self {
            slot_hint,
            was_down: false,
            last_position: ScreenPoint::UNSET,
        }
    }

    pub fn frame(&mut self, button_down: bool, position: ScreenPoint) -> Option<RawSample> {
        let sample = match (self.was_down, button_down) {
            (false, true) => {
                self.last_position = position;
                Some(RawSample::began(self.slot_hint, position))
            }
            (true, true) => {
                self.last_position = position;
                Some(RawSample::held(self.slot_hint, position))
            }
            (true, false) => Some(RawSample::ended(self.slot_hint, self.last_position)),
            (false, false) => None,
        };
        self.was_down = button_down;
        sample.map(|s| s.with_contact(ContactType::Indirect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_press_hold_release_maps_to_edges() {
        let mut mouse = MouseSource::new(7);
        assert_eq!(mouse.frame(false, ScreenPoint::new(1.0, 1.0)), None);

        let press = mouse.frame(true, ScreenPoint::new(10.0, 20.0)).unwrap();
        assert_eq!(press.transition, Some(RawTransition::Began));
        assert_eq!(press.slot_hint, 7);
        assert_eq!(press.contact, ContactType::Indirect);

        let held = mouse.frame(true, ScreenPoint::new(12.0, 20.0)).unwrap();
        assert_eq!(held.transition, None);
        assert_eq!(held.position, ScreenPoint::new(12.0, 20.0));

        let release = mouse.frame(false, ScreenPoint::new(90.0, 90.0)).unwrap();
        assert_eq!(release.transition, Some(RawTransition::Ended));
        assert_eq!(release.position, ScreenPoint::new(12.0, 20.0));

        assert_eq!(mouse.frame(false, ScreenPoint::new(90.0, 90.0)), None);
    }
}
