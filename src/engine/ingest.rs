use log::{debug, trace};

use super::{detectors::DetectorEvent, GestureEngine};
use crate::{
    event_bus::{GestureEvent, GestureKind},
    hit_test::HitTester,
    input::{RawSample, RawTransition},
    types::{PointerId, ScreenPoint, TouchPhase},
};

impl<H: HitTester> GestureEngine<H> {
    /// Finalizes pointers released on the previous tick and settles `Began`.
    pub(super) fn finalize_released(&mut self) {
        for index in 0..self.pointers.len() {
            if self.pointers[index].phase == TouchPhase::Ended {
                self.finalize_pointer(index);
            }
            let pointer = &mut self.pointers[index];
            if pointer.phase == TouchPhase::Began {
                pointer.phase = TouchPhase::Stationary;
            }
        }
    }

    fn finalize_pointer(&mut self, index: usize) {
        let now_ms = self.now_ms;
        let pointer = &mut self.pointers[index];
        pointer.end_ms = now_ms;
        pointer.phase = TouchPhase::Canceled;
        pointer.start_to_end_delta = pointer.screen_position - pointer.start_position;
        pointer.is_down = false;
        pointer.slot_hint = None;
        self.live_count = self.live_count.saturating_sub(1);

        self.probe(index);

        let pointer = self.pointers[index];
        trace!(
            "ingest: release id={} press_ms={}",
            pointer.id.index(),
            pointer.press_ms()
        );
        self.push_event(GestureKind::TouchEnd, index);
        if !pointer.delta_position.is_zero() {
            self.push_event(GestureKind::Flick, index);
        }
    }

    /// Maps this tick's raw samples onto pointer slots.
    pub(super) fn ingest_samples(&mut self, samples: &[RawSample]) {
        for sample in samples {
            let index = match self.find_live_slot(sample.slot_hint) {
                Some(index) => index,
                None => match self.first_free_slot() {
                    Some(index) => {
                        self.acquire(index, sample);
                        index
                    }
                    None => {
                        debug!(
                            "ingest: dropping contact hint={} (all {} slots down)",
                            sample.slot_hint,
                            self.pointers.len()
                        );
                        continue;
                    }
                },
            };

            let pointer = &mut self.pointers[index];
            pointer.screen_position = sample.position;
            pointer.contact = sample.contact;
            // Only the edges are imported; Stationary/Moved are computed locally.
            match sample.transition {
                Some(RawTransition::Began) => pointer.phase = TouchPhase::Began,
                Some(RawTransition::Ended) => pointer.phase = TouchPhase::Ended,
                None => {}
            }
            self.last_pointer = Some(PointerId(index as u16));
        }
    }

    fn find_live_slot(&self, slot_hint: u32) -> Option<usize> {
        self.pointers
            .iter()
            .position(|p| p.is_down && p.slot_hint == Some(slot_hint))
    }

    fn first_free_slot(&self) -> Option<usize> {
        self.pointers.iter().position(|p| !p.is_down)
    }

    fn acquire(&mut self, index: usize, sample: &RawSample) {
        let now_ms = self.now_ms;
        let pointer = &mut self.pointers[index];
        pointer.is_down = true;
        pointer.slot_hint = Some(sample.slot_hint);
        pointer.start_ms = now_ms;
        pointer.phase = TouchPhase::Began;
        pointer.contact = sample.contact;
        pointer.screen_position = sample.position;
        pointer.delta_position = ScreenPoint::ZERO;
        self.begin_touch(index);
    }

    /// Touch acquisition: re-arms the tap and long-press detectors for the slot.
    fn begin_touch(&mut self, index: usize) {
        self.live_count += 1;
        let pointer = &mut self.pointers[index];
        pointer.start_position = pointer.screen_position;
        trace!(
            "ingest: acquire id={} at ({:.1},{:.1})",
            pointer.id.index(),
            pointer.screen_position.x,
            pointer.screen_position.y
        );

        self.probe(index);

        self.dispatch_tap(index, DetectorEvent::Cancel);
        self.dispatch_long_press(index, DetectorEvent::Cancel);
        self.push_event(GestureKind::TouchBegin, index);
        self.dispatch_tap(index, DetectorEvent::Start);
        self.dispatch_long_press(index, DetectorEvent::Start);
    }

    /// Classifies per-tick motion and starts slides for pointers that move.
    pub(super) fn classify_movement(&mut self) {
        let radius_sq = self.config.stationary_radius_sq();
        for index in 0..self.pointers.len() {
            let pointer = self.pointers[index];
            if pointer.phase.is_terminal() || pointer.screen_position == pointer.last_position {
                continue;
            }

            let delta = pointer.screen_position - pointer.last_position;
            if pointer.phase == TouchPhase::Began || delta.length_squared() <= radius_sq {
                let pointer = &mut self.pointers[index];
                pointer.phase = TouchPhase::Stationary;
                pointer.delta_position = ScreenPoint::ZERO;
            } else {
                let pointer = &mut self.pointers[index];
                pointer.phase = TouchPhase::Moved;
                pointer.delta_position = delta;
                if !self.slide_active(PointerId(index as u16)) {
                    self.start_slide(index);
                }
            }

            let pointer = &mut self.pointers[index];
            pointer.last_position = pointer.screen_position;
        }
    }

    /// Moves a pointer into slide, or promotes it into a pinch with another
    /// sliding pointer.
    fn start_slide(&mut self, index: usize) {
        self.dispatch_tap(index, DetectorEvent::Cancel);
        // A moving pointer breaks any pending tap sequence on its slot.
        self.pointers[index].tap_count = 0;
        self.dispatch_long_press(index, DetectorEvent::Cancel);

        if self.pinch_active() {
            return;
        }

        let partner = (0..self.pointers.len()).find(|&other| {
            other != index
                && self.pointers[other].is_down
                && self.slide_active(PointerId(other as u16))
        });
        match partner {
            Some(other) => {
                self.dispatch_slide(other, DetectorEvent::Cancel);
                self.dispatch_pinch(other, index, DetectorEvent::Start);
            }
            None => self.dispatch_slide(index, DetectorEvent::Start),
        }
    }

    pub(super) fn probe_live_pointers(&mut self) {
        for index in 0..self.pointers.len() {
            if self.pointers[index].is_down {
                self.probe(index);
            }
        }
    }

    fn probe(&mut self, index: usize) {
        let position = self.pointers[index].screen_position;
        self.pointers[index].last_hit = self.hit_tester.probe(position);
    }

    fn push_event(&mut self, kind: GestureKind, index: usize) {
        self.emitted
            .push(GestureEvent::single(kind, self.now_ms, self.pointers[index]));
    }
}
