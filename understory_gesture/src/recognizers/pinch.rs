// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-contact pinch and spread.

use crate::geometry::{distance, scale};
use crate::session::{Session, SessionFlags};
use crate::types::{GestureEvent, GestureKind, PinchEvent, TouchId, TouchPoint};

use super::{Recognizer, local_pair, pair_ids};

/// Reports the distance between two contacts relative to where they started.
///
/// Only evaluated while someone subscribes to pinch-spread, so an unobserved
/// pinch never takes over the active gesture from rotate.
#[derive(Debug, Default)]
pub(crate) struct PinchSpread {
    start_distance: Option<f64>,
    /// Contacts `start_distance` was measured between.
    pair: Option<[TouchId; 2]>,
    last: Option<PinchEvent>,
}

impl Recognizer for PinchSpread {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn start(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        if let Some([a, b]) = local_pair(session, touches) {
            self.start_distance = Some(distance(a, b));
            self.pair = pair_ids(touches);
        }
        None
    }

    fn moved(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        if !session.subscribed.has(GestureKind::PinchSpread) {
            return None;
        }
        let [a, b] = local_pair(session, touches)?;
        let ids = pair_ids(touches)?;
        if self.pair != Some(ids) {
            self.pair = Some(ids);
            self.start_distance = None;
        }
        let d = distance(a, b);
        let start = *self.start_distance.get_or_insert(d);
        let event = PinchEvent {
            touches: [a, b],
            distance: d,
            scale: scale(start, d),
            end: false,
        };
        session.flags.insert(SessionFlags::PINCHED);
        self.last = Some(event);
        Some(GestureEvent::PinchSpread(event))
    }

    fn end(
        &mut self,
        session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        if session.frame_active != Some(GestureKind::PinchSpread)
            || !session.is_moving()
            || session.is_idle()
        {
            return None;
        }
        let event = self.last.take()?;
        Some(GestureEvent::PinchSpread(PinchEvent { end: true, ..event }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::test_util::*;
    use crate::types::GestureSet;

    fn spread(s: &mut Session, p: &mut PinchSpread) -> Option<GestureEvent> {
        let down = touches(&[(1, 50.0, 100.0), (2, 150.0, 100.0)]);
        begin(s, &down, 0.0);
        p.start(s, &down, 0.0);
        let apart = touches(&[(1, 0.0, 100.0), (2, 200.0, 100.0)]);
        step(s, &apart, 16.0);
        p.moved(s, &apart, 16.0)
    }

    #[test]
    fn spread_doubles_scale() {
        let mut s = session();
        let mut p = PinchSpread::default();
        let Some(GestureEvent::PinchSpread(e)) = spread(&mut s, &mut p) else {
            panic!("expected a pinch-spread");
        };
        assert_eq!(e.distance, 200.0);
        assert_eq!(e.scale, 2.0);
        assert!(!e.end);
        assert!(s.flags.contains(SessionFlags::PINCHED));

        s.frame_active = Some(GestureKind::PinchSpread);
        let Some(GestureEvent::PinchSpread(end)) = p.end(&mut s, &[], 30.0) else {
            panic!("expected a terminal pinch-spread");
        };
        assert!(end.end);
        assert_eq!(end.scale, 2.0);
    }

    #[test]
    fn unobserved_pinch_is_not_evaluated() {
        let mut s = session();
        s.subscribed = GestureSet::ROTATE;
        let mut p = PinchSpread::default();
        assert_eq!(spread(&mut s, &mut p), None);
        assert!(!s.flags.contains(SessionFlags::PINCHED));
    }

    #[test]
    fn new_pair_measures_from_its_own_distance() {
        let mut s = session();
        let mut p = PinchSpread::default();
        let down = touches(&[(1, 100.0, 100.0), (2, 110.0, 100.0)]);
        begin(&mut s, &down, 0.0);
        p.start(&mut s, &down, 0.0);
        let third = touches(&[(3, 300.0, 100.0)]);
        begin(&mut s, &third, 10.0);
        p.start(&mut s, &third, 10.0);

        let rest = touches(&[(2, 110.0, 100.0), (3, 300.0, 100.0)]);
        step(&mut s, &rest, 20.0);
        let Some(GestureEvent::PinchSpread(e)) = p.moved(&mut s, &rest, 20.0) else {
            panic!("expected a pinch-spread");
        };
        assert_eq!(e.distance, 190.0);
        assert_eq!(e.scale, 1.0);
    }

    #[test]
    fn coincident_start_reports_neutral_scale() {
        let mut s = session();
        let mut p = PinchSpread::default();
        let down = touches(&[(1, 10.0, 10.0), (2, 10.0, 10.0)]);
        begin(&mut s, &down, 0.0);
        p.start(&mut s, &down, 0.0);
        let apart = touches(&[(1, 0.0, 10.0), (2, 20.0, 10.0)]);
        step(&mut s, &apart, 16.0);
        let Some(GestureEvent::PinchSpread(e)) = p.moved(&mut s, &apart, 16.0) else {
            panic!("expected a pinch-spread");
        };
        assert_eq!(e.scale, 1.0);
    }
}
