use log::trace;
use statig::prelude::*;

use super::{DetectorEvent, PointerContext};
use crate::{config::GestureConfig, event_bus::GestureKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TapPhase {
    #[default]
    Idle,
    /// Armed on acquisition, waiting for the release.
    Waiting,
    /// Released as a tap; waiting out the consecutive-tap window.
    Resolving,
}

pub(crate) struct TapDetector {
    config: GestureConfig,
    pub(crate) phase: TapPhase,
    started_tick: u64,
    resolve_at_ms: u64,
}

impl TapDetector {
    pub(crate) fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: TapPhase::Idle,
            started_tick: 0,
            resolve_at_ms: 0,
        }
    }

    fn arm(&mut self, context: &PointerContext) -> Outcome<State> {
        self.started_tick = context.tick;
        self.phase = TapPhase::Waiting;
        Transition(State::waiting())
    }

    fn abort(&mut self, context: &PointerContext) -> Outcome<State> {
        trace!(
            "tap: aborted id={} phase={:?}",
            context.pointer.id.index(),
            self.phase
        );
        self.phase = TapPhase::Idle;
        Transition(State::idle())
    }

    fn sequence_kind(tap_count: u32) -> GestureKind {
        match tap_count {
            1 => GestureKind::Tap,
            2 => GestureKind::DoubleTap,
            _ => GestureKind::MultiTap,
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl TapDetector {
    #[state]
    fn idle(&mut self, context: &mut PointerContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => self.arm(context),
            DetectorEvent::Cancel | DetectorEvent::Resume => Handled,
        }
    }

    #[state]
    fn waiting(&mut self, context: &mut PointerContext, event: &DetectorEvent) -> Outcome<State> {
        match event {
            DetectorEvent::Start => self.arm(context),
            DetectorEvent::Cancel => self.abort(context),
            DetectorEvent::Resume => {
                if context.tick == self.started_tick || context.pointer.is_down {
                    return Handled;
                }

                let press_ms = context.pointer.press_ms();
                // Advisory only: the tap still resolves normally.
                if press_ms < self.config.suspicious_tap_ms {
                    context.emit(GestureKind::SuspiciousBehavior);
                }

                if press_ms < self.config.max_tap_ms {
                    context.pointer.tap_count = context.pointer.tap_count.saturating_add(1);
                    self.resolve_at_ms = context
                        .now_ms
                        .saturating_add(self.config.max_consecutive_tap_gap_ms);
                    self.phase = TapPhase::Resolving;
                    Transition(State::resolving())
                } else {
                    // Held too long; the long-press detector owns this press.
                    context.pointer.tap_count = 0;
                    self.phase = TapPhase::Idle;
                    Transition(State::idle())
                }
            }
        }
    }

    #[state]
    fn resolving(
        &mut self,
        context: &mut PointerContext,
        event: &DetectorEvent,
    ) -> Outcome<State> {
        match event {
            DetectorEvent::Start => self.arm(context),
            DetectorEvent::Cancel => self.abort(context),
            DetectorEvent::Resume => {
                if context.now_ms < self.resolve_at_ms {
                    return Handled;
                }
                context.emit(Self::sequence_kind(context.pointer.tap_count));
                context.pointer.tap_count = 0;
                self.phase = TapPhase::Idle;
                Transition(State::idle())
            }
        }
    }
}
