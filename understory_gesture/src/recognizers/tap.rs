// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap, double-tap, and two-finger tap.

use crate::session::{Session, SessionFlags};
use crate::types::{GestureEvent, GestureKind, PointEvent, TouchPoint, TwoFingerTapEvent};

use super::Recognizer;

/// Single-contact tap; chains into a double tap inside the window.
#[derive(Debug)]
pub(crate) struct Tap;

impl Recognizer for Tap {
    fn moved(
        &mut self,
        session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        session.press_timer.cancel();
        None
    }

    fn end(
        &mut self,
        session: &mut Session,
        _touches: &[TouchPoint],
        time: f64,
    ) -> Option<GestureEvent> {
        if session.history.len() != 1
            || session.is_moving()
            || session.elapsed(time) >= session.config.press_time
            || session.frame_active == Some(GestureKind::LongPress)
        {
            return None;
        }
        session.press_timer.cancel();
        let payload = PointEvent {
            position: session.start,
        };
        if session.within_double_tap(time) {
            // A third tap starts a new chain.
            session.tap_release = None;
            Some(GestureEvent::DoubleTap(payload))
        } else {
            session.tap_release = Some(time);
            Some(GestureEvent::Tap(payload))
        }
    }
}

/// Two contacts released together without moving.
#[derive(Debug)]
pub(crate) struct TwoFingerTap;

impl Recognizer for TwoFingerTap {
    fn end(
        &mut self,
        session: &mut Session,
        _touches: &[TouchPoint],
        time: f64,
    ) -> Option<GestureEvent> {
        if session.history.len() != 2
            || session.is_moving()
            || session.elapsed(time) >= session.config.press_time
            || session.flags.contains(SessionFlags::TWO_FINGER_TAPPED)
        {
            return None;
        }
        let mut initial = session.history.iter().map(|h| h.first().position);
        let (a, b) = (initial.next()?, initial.next()?);
        session.flags.insert(SessionFlags::TWO_FINGER_TAPPED);
        Some(GestureEvent::TwoFingerTap(TwoFingerTapEvent {
            position: a.midpoint(b),
            touches: [a, b],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::test_util::*;

    fn tap_once(s: &mut Session, down: f64, up: f64) -> Option<GestureEvent> {
        s.clear();
        begin(s, &touches(&[(1, 100.0, 100.0)]), down);
        s.frame_active = s.active;
        let out = Tap.end(s, &[], up);
        s.active = out.as_ref().map(GestureEvent::kind);
        out
    }

    #[test]
    fn tap_then_double_tap_then_tap() {
        let mut s = session();
        let tap = |s: &mut Session, d, u| tap_once(s, d, u).map(|e| e.kind());
        assert_eq!(tap(&mut s, 0.0, 80.0), Some(GestureKind::Tap));
        assert_eq!(tap(&mut s, 150.0, 230.0), Some(GestureKind::DoubleTap));
        assert_eq!(s.tap_release, None);
        assert_eq!(tap(&mut s, 300.0, 380.0), Some(GestureKind::Tap));
    }

    #[test]
    fn slow_or_moving_release_is_not_a_tap() {
        let mut s = session();
        assert_eq!(tap_once(&mut s, 0.0, 350.0), None);

        s.clear();
        begin(&mut s, &touches(&[(1, 0.0, 0.0)]), 0.0);
        step(&mut s, &touches(&[(1, 4.0, 0.0)]), 10.0);
        assert_eq!(Tap.end(&mut s, &[], 20.0), None);
    }

    #[test]
    fn tap_needs_exactly_one_tracked_contact() {
        let mut s = session();
        begin(&mut s, &touches(&[(1, 0.0, 0.0), (2, 10.0, 0.0)]), 0.0);
        assert_eq!(Tap.end(&mut s, &[], 50.0), None);
    }

    #[test]
    fn two_finger_tap_reports_midpoint_once() {
        let mut s = session();
        begin(&mut s, &touches(&[(1, 0.0, 0.0)]), 0.0);
        begin(&mut s, &touches(&[(1, 0.0, 0.0), (2, 100.0, 40.0)]), 10.0);
        let remaining = touches(&[(2, 100.0, 40.0)]);
        assert_eq!(
            TwoFingerTap.end(&mut s, &remaining, 60.0),
            Some(GestureEvent::TwoFingerTap(TwoFingerTapEvent {
                position: pt(50.0, 20.0),
                touches: [pt(0.0, 0.0), pt(100.0, 40.0)],
            }))
        );
        assert_eq!(TwoFingerTap.end(&mut s, &[], 70.0), None);
    }
}
