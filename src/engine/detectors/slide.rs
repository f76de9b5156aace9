use statig::prelude::*;

use super::{DetectorEvent, PointerContext};
use crate::{config::GestureConfig, event_bus::GestureKind, types::Pointer};

pub(crate) struct SlideDetector {
    config: GestureConfig,
    pub(crate) active: bool,
    started_tick: u64,
}

impl SlideDetector {
    pub(crate) fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: false,
            started_tick: 0,
        }
    }

    /// A finished slide counts as a swipe when it was quick and travelled far enough.
    fn is_swipe(&self, pointer: &Pointer) -> bool {
        pointer.press_ms() < self.config.max_swipe_ms
            && pointer.start_to_end_delta.length_squared() >= self.config.min_swipe_distance_sq()
    }
}

#[state_machine(initial = "State::idle()")]
impl SlideDetector {
    #[state]
    fn idle(&mut self, context: &mut PointerContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => {
                self.started_tick = context.tick;
                self.active = true;
                context.emit(GestureKind::SlideBegin);
                Transition(State::active())
            }
            DetectorEvent::Cancel | DetectorEvent::Resume => Handled,
        }
    }

    #[state]
    fn active(&mut self, context: &mut PointerContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => Handled,
            DetectorEvent::Cancel => {
                context.emit(GestureKind::SlideCancel);
                self.active = false;
                Transition(State::idle())
            }
            DetectorEvent::Resume => {
                if context.tick == self.started_tick {
                    return Handled;
                }
                if context.pointer.is_down {
                    context.emit(GestureKind::SlideActive);
                    return Handled;
                }
                context.emit(GestureKind::SlideEnd);
                if self.is_swipe(&context.pointer) {
                    context.emit(GestureKind::Swipe);
                }
                self.active = false;
                Transition(State::idle())
            }
        }
    }
}
