//! Per-gesture state machines.
//!
//! Each detector is driven by the engine with [`DetectorEvent`]s. `Start` and
//! `Cancel` arrive during ingest; `Resume` arrives once per tick afterwards. A
//! detector never resumes on the tick it was started.

mod long_press;
mod pinch;
mod slide;
mod tap;

pub use long_press::LongPressPhase;
pub use tap::TapPhase;

pub(crate) use long_press::LongPressDetector;
pub(crate) use pinch::PinchDetector;
pub(crate) use slide::SlideDetector;
pub(crate) use tap::TapDetector;

use crate::{
    event_bus::{GestureEvent, GestureKind},
    types::Pointer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DetectorEvent {
    Start,
    Cancel,
    Resume,
}

/// Dispatch context for detectors bound to a single pointer.
///
/// The engine copies the slot in, runs the handler, then copies it back, so
/// detectors may update pointer bookkeeping such as `tap_count`.
pub(crate) struct PointerContext {
    pub(crate) now_ms: u64,
    pub(crate) tick: u64,
    pub(crate) pointer: Pointer,
    pub(crate) events: Vec<GestureEvent>,
}

impl PointerContext {
    pub(crate) fn new(now_ms: u64, tick: u64, pointer: Pointer, events: Vec<GestureEvent>) -> Self {
        Self {
            now_ms,
            tick,
            pointer,
            events,
        }
    }

    pub(crate) fn emit(&mut self, kind: GestureKind) {
        self.events
            .push(GestureEvent::single(kind, self.now_ms, self.pointer));
    }
}

/// Dispatch context for the pinch detector, which owns two pointers.
pub(crate) struct PairContext {
    pub(crate) now_ms: u64,
    pub(crate) tick: u64,
    pub(crate) pointers: [Pointer; 2],
    pub(crate) events: Vec<GestureEvent>,
}

impl PairContext {
    pub(crate) fn new(
        now_ms: u64,
        tick: u64,
        pointers: [Pointer; 2],
        events: Vec<GestureEvent>,
    ) -> Self {
        Self {
            now_ms,
            tick,
            pointers,
            events,
        }
    }

    pub(crate) fn emit(&mut self, kind: GestureKind) {
        self.events.push(GestureEvent::pair(
            kind,
            self.now_ms,
            self.pointers[0],
            self.pointers[1],
        ));
    }
}
