use log::trace;
use statig::prelude::*;

use super::{DetectorEvent, PointerContext};
use crate::{config::GestureConfig, event_bus::GestureKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LongPressPhase {
    #[default]
    Idle,
    /// Started on acquisition; not yet visible to listeners.
    Armed,
    /// `LongPressBegin` has been emitted.
    Active,
}

pub(crate) struct LongPressDetector {
    config: GestureConfig,
    pub(crate) phase: LongPressPhase,
    started_tick: u64,
    fire_at_ms: u64,
}

impl LongPressDetector {
    pub(crate) fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: LongPressPhase::Idle,
            started_tick: 0,
            fire_at_ms: 0,
        }
    }

    fn arm(&mut self, context: &PointerContext) -> Outcome<State> {
        self.started_tick = context.tick;
        self.fire_at_ms = context.now_ms.saturating_add(self.config.max_tap_ms);
        self.phase = LongPressPhase::Armed;
        Transition(State::armed())
    }

    fn finish(&mut self) -> Outcome<State> {
        self.phase = LongPressPhase::Idle;
        Transition(State::idle())
    }
}

#[state_machine(initial = "State::idle()")]
impl LongPressDetector {
    #[state]
    fn idle(&mut self, context: &mut PointerContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => self.arm(context),
            DetectorEvent::Cancel | DetectorEvent::Resume => Handled,
        }
    }

    #[state]
    fn armed(&mut self, context: &mut PointerContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => self.arm(context),
            // Nothing was emitted yet, so cancelling is silent.
            DetectorEvent::Cancel => self.finish(),
            DetectorEvent::Resume => {
                if context.tick == self.started_tick || context.now_ms < self.fire_at_ms {
                    return Handled;
                }
                if !context.pointer.is_down {
                    trace!(
                        "long_press: released early id={}",
                        context.pointer.id.index()
                    );
                    return self.finish();
                }
                context.emit(GestureKind::LongPressBegin);
                self.phase = LongPressPhase::Active;
                Transition(State::active())
            }
        }
    }

    #[state]
    fn active(&mut self, context: &mut PointerContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => {
                context.emit(GestureKind::LongPressCancel);
                self.arm(context)
            }
            DetectorEvent::Cancel => {
                context.emit(GestureKind::LongPressCancel);
                self.finish()
            }
            DetectorEvent::Resume => {
                if context.pointer.is_down {
                    context.emit(GestureKind::LongPressActive);
                    Handled
                } else {
                    context.emit(GestureKind::LongPressEnd);
                    self.finish()
                }
            }
        }
    }
}
