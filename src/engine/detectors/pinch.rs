use log::debug;
use statig::prelude::*;

use super::{DetectorEvent, PairContext};
use crate::{event_bus::GestureKind, types::PointerId};

/// Two-pointer gesture formed by promoting a pair of slides. One per engine.
#[derive(Default)]
pub(crate) struct PinchDetector {
    pub(crate) pair: Option<(PointerId, PointerId)>,
    started_tick: u64,
}

impl PinchDetector {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[state_machine(initial = "State::idle()")]
impl PinchDetector {
    #[state]
    fn idle(&mut self, context: &mut PairContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => {
                let [first, second] = context.pointers;
                debug!(
                    "pinch: begin ids=({},{})",
                    first.id.index(),
                    second.id.index()
                );
                self.pair = Some((first.id, second.id));
                self.started_tick = context.tick;
                context.emit(GestureKind::PinchBegin);
                Transition(State::active())
            }
            DetectorEvent::Cancel | DetectorEvent::Resume => Handled,
        }
    }

    #[state]
    fn active(&mut self, context: &mut PairContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            // Ends only when both pointers lift; there is no separate cancel path.
            DetectorEvent::Start | DetectorEvent::Cancel => Handled,
            DetectorEvent::Resume => {
                if context.tick == self.started_tick {
                    return Handled;
                }
                if context.pointers.iter().any(|p| p.is_down) {
                    context.emit(GestureKind::PinchActive);
                    return Handled;
                }
                context.emit(GestureKind::PinchEnd);
                self.pair = None;
                Transition(State::idle())
            }
        }
    }
}
