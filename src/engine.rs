use std::{collections::BTreeSet, mem, sync::Mutex};

use log::{info, warn};
use statig::blocking::{IntoStateMachineExt as _, StateMachine};

mod detectors;
mod ingest;

pub use detectors::{LongPressPhase, TapPhase};

use detectors::{
    DetectorEvent, LongPressDetector, PairContext, PinchDetector, PointerContext, SlideDetector,
    TapDetector,
};

use crate::{
    clock::GestureClock,
    config::GestureConfig,
    error::EngineError,
    event_bus::{EventBus, GestureEvent},
    hit_test::{HitTester, NoHitTesting},
    input::RawSample,
    types::{Pointer, PointerId},
};

/// Identifies the raw input source an engine consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub u32);

static BOUND_SOURCES: Mutex<BTreeSet<u32>> = Mutex::new(BTreeSet::new());

/// Exclusive claim on a [`SourceId`], released on drop.
#[derive(Debug)]
struct SourceBinding(SourceId);

impl SourceBinding {
    fn claim(source: SourceId) -> Result<Self, EngineError> {
        let mut bound = BOUND_SOURCES.lock().unwrap_or_else(|e| e.into_inner());
        if !bound.insert(source.0) {
            warn!(
                "gesture engine: source {} already has an engine; refusing a second one",
                source.0
            );
            return Err(EngineError::SourceAlreadyBound(source.0));
        }
        Ok(Self(source))
    }
}

impl Drop for SourceBinding {
    fn drop(&mut self) {
        let mut bound = BOUND_SOURCES.lock().unwrap_or_else(|e| e.into_inner());
        bound.remove(&self.0 .0);
    }
}

struct PointerDetectors {
    tap: StateMachine<TapDetector>,
    long_press: StateMachine<LongPressDetector>,
    slide: StateMachine<SlideDetector>,
}

impl PointerDetectors {
    fn new(config: GestureConfig) -> Self {
        Self {
            tap: TapDetector::new(config).state_machine(),
            long_press: LongPressDetector::new(config).state_machine(),
            slide: SlideDetector::new(config).state_machine(),
        }
    }
}

/// Turns per-frame raw pointer samples into gesture events.
///
/// Single-threaded and tick-driven: call [`GestureEngine::tick`] once per
/// frame. Events are delivered to the [`EventBus`] synchronously at the end of
/// the tick, in emission order.
pub struct GestureEngine<H: HitTester = NoHitTesting> {
    config: GestureConfig,
    hit_tester: H,
    bus: EventBus,
    pointers: Vec<Pointer>,
    detectors: Vec<PointerDetectors>,
    pinch: StateMachine<PinchDetector>,
    live_count: usize,
    last_pointer: Option<PointerId>,
    now_ms: u64,
    tick: u64,
    emitted: Vec<GestureEvent>,
    binding: SourceBinding,
}

impl GestureEngine<NoHitTesting> {
    pub fn without_hit_testing(
        config: GestureConfig,
        source: SourceId,
    ) -> Result<Self, EngineError> {
        Self::new(config, source, NoHitTesting)
    }
}

impl<H: HitTester> GestureEngine<H> {
    /// Builds an engine bound to `source`.
    ///
    /// Fails if the configuration is invalid or another live engine already
    /// consumes the same source.
    pub fn new(config: GestureConfig, source: SourceId, hit_tester: H) -> Result<Self, EngineError> {
        config.validate()?;
        let binding = SourceBinding::claim(source)?;

        let pointers = (0..config.max_pointers)
            .map(|index| Pointer::new(PointerId(index as u16)))
            .collect();
        let detectors = (0..config.max_pointers)
            .map(|_| PointerDetectors::new(config))
            .collect();

        info!(
            "gesture engine: bound source={} slots={} minimal_hit_testing={}",
            source.0, config.max_pointers, config.minimal_hit_testing
        );

        Ok(Self {
            config,
            hit_tester,
            bus: EventBus::new(),
            pointers,
            detectors,
            pinch: PinchDetector::new().state_machine(),
            live_count: 0,
            last_pointer: None,
            now_ms: 0,
            tick: 0,
            emitted: Vec::new(),
            binding,
        })
    }

    /// Advances the engine by one frame and returns the events it emitted.
    pub fn tick(&mut self, now_ms: u64, samples: &[RawSample]) -> &[GestureEvent] {
        self.tick += 1;
        self.now_ms = now_ms.max(self.now_ms);
        self.emitted.clear();

        self.finalize_released();
        self.ingest_samples(samples);
        self.classify_movement();
        if !self.config.minimal_hit_testing {
            self.probe_live_pointers();
        }
        self.resume_detectors();

        for event in &self.emitted {
            self.bus.publish(event);
        }
        &self.emitted
    }

    /// Same as [`GestureEngine::tick`], reading the timestamp from `clock`.
    pub fn update(
        &mut self,
        clock: &mut impl GestureClock,
        samples: &[RawSample],
    ) -> &[GestureEvent] {
        let now_ms = clock.now_ms();
        self.tick(now_ms, samples)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn source(&self) -> SourceId {
        self.binding.0
    }

    pub fn hit_tester_mut(&mut self) -> &mut H {
        &mut self.hit_tester
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    pub fn pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.get(id.index())
    }

    /// Number of contacts currently held down.
    pub fn live_pointer_count(&self) -> usize {
        self.live_count
    }

    /// The pointer that most recently received a sample.
    pub fn last_pointer(&self) -> Option<&Pointer> {
        self.last_pointer.and_then(|id| self.pointer(id))
    }

    /// Tap count of [`GestureEngine::last_pointer`].
    pub fn tap_count(&self) -> u32 {
        self.last_pointer().map_or(0, |p| p.tap_count)
    }

    pub fn tap_phase(&self, id: PointerId) -> Option<TapPhase> {
        self.detectors.get(id.index()).map(|d| d.tap.inner().phase)
    }

    pub fn long_press_phase(&self, id: PointerId) -> Option<LongPressPhase> {
        self.detectors
            .get(id.index())
            .map(|d| d.long_press.inner().phase)
    }

    pub fn slide_active(&self, id: PointerId) -> bool {
        self.detectors
            .get(id.index())
            .is_some_and(|d| d.slide.inner().active)
    }

    /// Pointers owned by the running pinch, if any.
    pub fn pinch_pair(&self) -> Option<(PointerId, PointerId)> {
        self.pinch.inner().pair
    }

    fn pinch_active(&self) -> bool {
        self.pinch_pair().is_some()
    }

    fn resume_detectors(&mut self) {
        for index in 0..self.pointers.len() {
            self.dispatch_tap(index, DetectorEvent::Resume);
            self.dispatch_long_press(index, DetectorEvent::Resume);
            self.dispatch_slide(index, DetectorEvent::Resume);
        }
        if let Some((first, second)) = self.pinch_pair() {
            self.dispatch_pinch(first.index(), second.index(), DetectorEvent::Resume);
        }
    }

    fn pointer_context(&mut self, index: usize) -> PointerContext {
        PointerContext::new(
            self.now_ms,
            self.tick,
            self.pointers[index],
            mem::take(&mut self.emitted),
        )
    }

    fn restore_pointer_context(&mut self, index: usize, context: PointerContext) {
        self.pointers[index] = context.pointer;
        self.emitted = context.events;
    }

    fn dispatch_tap(&mut self, index: usize, event: DetectorEvent) {
        let mut context = self.pointer_context(index);
        self.detectors[index]
            .tap
            .handle_with_context(&event, &mut context);
        self.restore_pointer_context(index, context);
    }

    fn dispatch_long_press(&mut self, index: usize, event: DetectorEvent) {
        let mut context = self.pointer_context(index);
        self.detectors[index]
            .long_press
            .handle_with_context(&event, &mut context);
        self.restore_pointer_context(index, context);
    }

    fn dispatch_slide(&mut self, index: usize, event: DetectorEvent) {
        let mut context = self.pointer_context(index);
        self.detectors[index]
            .slide
            .handle_with_context(&event, &mut context);
        self.restore_pointer_context(index, context);
    }

    fn dispatch_pinch(&mut self, first: usize, second: usize, event: DetectorEvent) {
        let mut context = PairContext::new(
            self.now_ms,
            self.tick,
            [self.pointers[first], self.pointers[second]],
            mem::take(&mut self.emitted),
        );
        self.pinch.handle_with_context(&event, &mut context);
        self.emitted = context.events;
    }
}
