// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-contact drag.

use crate::geometry::{angle, direction_between};
use crate::session::{Session, SessionFlags};
use crate::history::TouchHistory;
use crate::types::{DragEvent, GestureEvent, GestureKind, Release, TouchId, TouchPoint};

use super::Recognizer;

/// Tracks one moving contact and reports a terminal drag on release.
#[derive(Debug, Default)]
pub(crate) struct Drag {
    last: Option<DragEvent>,
    /// Contact that produced the latest drag.
    touch: Option<TouchId>,
}

impl Recognizer for Drag {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn moved(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        let [touch] = touches else {
            return None;
        };
        if session.flags.contains(SessionFlags::PINCHED) {
            return None;
        }
        let position = session.history.local(touch.position);
        let previous = session.history.previous_reference(&[touch.id], session.start);
        let start = session.start;
        let initial = *session
            .initial_direction
            .get_or_insert_with(|| direction_between(start, position));
        let event = DragEvent {
            position,
            start,
            step: session.history.step_speed(),
            speed: session
                .history
                .get(touch.id)
                .map_or(0.0, TouchHistory::speed),
            angle: angle(previous, position),
            initial_direction: Some(initial),
            release: None,
        };
        self.last = Some(event.clone());
        self.touch = Some(touch.id);
        Some(GestureEvent::Drag(event))
    }

    fn end(
        &mut self,
        session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        if !session.is_moving() || session.frame_active != Some(GestureKind::Drag) {
            return None;
        }
        let history = match self.touch.take() {
            Some(id) => session.history.get(id)?,
            None => session.history.first()?,
        };
        let end = history.last().position;
        let speed = history.speed();
        let final_direction = history
            .from_end(1)
            .map(|prev| direction_between(prev.position, end));
        let mut event = self.last.take().unwrap_or(DragEvent {
            position: end,
            start: session.start,
            step: 0.0,
            speed,
            angle: angle(history.first().position, end),
            initial_direction: None,
            release: None,
        });
        event.position = end;
        event.speed = speed;
        event.initial_direction = session.initial_direction;
        event.release = Some(Release {
            end,
            final_direction,
            flick: speed >= session.config.flick_threshold,
        });
        Some(GestureEvent::Drag(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    use crate::geometry::Direction;
    use crate::recognizers::test_util::*;

    fn drag_right(s: &mut Session, d: &mut Drag) -> Vec<GestureEvent> {
        begin(s, &touches(&[(1, 100.0, 100.0)]), 0.0);
        let mut out = Vec::new();
        for i in 1..=10 {
            let f = f64::from(i);
            let t = touches(&[(1, 100.0 + 10.0 * f, 100.0)]);
            step(s, &t, 20.0 * f);
            out.extend(d.moved(s, &t, 20.0 * f));
            s.active = Some(GestureKind::Drag);
        }
        out
    }

    #[test]
    fn drag_reports_motion_and_locks_direction() {
        let mut s = session();
        let mut d = Drag::default();
        let events = drag_right(&mut s, &mut d);
        assert_eq!(events.len(), 10);
        let GestureEvent::Drag(last) = &events[9] else {
            panic!("expected a drag");
        };
        assert_eq!(last.position, pt(200.0, 100.0));
        assert_eq!(last.start, pt(100.0, 100.0));
        assert_eq!(last.step, 10.0);
        assert!((last.angle - 90.0).abs() < 1e-9);
        assert_eq!(last.initial_direction, Some(Direction::Right));
        assert!(last.release.is_none());
    }

    #[test]
    fn terminal_drag_carries_release() {
        let mut s = session();
        let mut d = Drag::default();
        drag_right(&mut s, &mut d);
        s.frame_active = s.active;
        let Some(GestureEvent::Drag(end)) = d.end(&mut s, &[], 220.0) else {
            panic!("expected a terminal drag");
        };
        let release = end.release.expect("terminal payload");
        assert_eq!(release.end, pt(200.0, 100.0));
        assert_eq!(release.final_direction, Some(Direction::Right));
        // 40 px over 80 time units.
        assert!((end.speed - 0.5).abs() < 1e-12);
        assert!(!release.flick);
    }

    #[test]
    fn fast_release_is_a_flick() {
        let mut s = session();
        let mut d = Drag::default();
        begin(&mut s, &touches(&[(1, 0.0, 0.0)]), 0.0);
        for i in 1..=5 {
            let f = f64::from(i);
            let t = touches(&[(1, 0.0, -20.0 * f)]);
            step(&mut s, &t, 10.0 * f);
            d.moved(&mut s, &t, 10.0 * f);
        }
        s.frame_active = Some(GestureKind::Drag);
        let Some(GestureEvent::Drag(end)) = d.end(&mut s, &[], 60.0) else {
            panic!("expected a terminal drag");
        };
        let release = end.release.expect("terminal payload");
        assert!(release.flick);
        assert_eq!(release.final_direction, Some(Direction::Top));
    }

    #[test]
    fn no_drag_after_pinch_or_with_two_contacts() {
        let mut s = session();
        let mut d = Drag::default();
        begin(&mut s, &touches(&[(1, 0.0, 0.0), (2, 50.0, 0.0)]), 0.0);
        let two = touches(&[(1, 1.0, 0.0), (2, 51.0, 0.0)]);
        step(&mut s, &two, 10.0);
        assert_eq!(d.moved(&mut s, &two, 10.0), None);

        s.flags.insert(SessionFlags::PINCHED);
        let one = touches(&[(1, 2.0, 0.0)]);
        step(&mut s, &one, 20.0);
        assert_eq!(d.moved(&mut s, &one, 20.0), None);
    }

    #[test]
    fn release_without_an_active_drag_is_silent() {
        let mut s = session();
        let mut d = Drag::default();
        drag_right(&mut s, &mut d);
        s.frame_active = Some(GestureKind::Rotate);
        assert_eq!(d.end(&mut s, &[], 220.0), None);
    }
}
