// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-contact rotation.

use crate::geometry::angle;
use crate::session::Session;
use crate::types::{GestureEvent, RotateEvent, TouchId, TouchPoint};

use super::{Recognizer, local_pair, pair_ids};

/// Feeds the angle between two contacts through the session's accumulator.
#[derive(Debug, Default)]
pub(crate) struct Rotate {
    /// Continuous angle when the gesture started.
    baseline: Option<f64>,
    /// Contacts the baseline was measured between.
    pair: Option<[TouchId; 2]>,
}

impl Recognizer for Rotate {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn start(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        self.baseline = local_pair(session, touches)
            .map(|[a, b]| session.rotation.seed(angle(a, b)));
        self.pair = pair_ids(touches);
        None
    }

    fn moved(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        let [a, b] = local_pair(session, touches)?;
        let ids = pair_ids(touches)?;
        let absolute = angle(a, b);
        // A pair other than the measured one, e.g. after a third contact joined and another lifted.
        let same_pair = self.pair == Some(ids) && session.rotation.previous().is_some();
        let baseline = match self.baseline {
            Some(baseline) if same_pair => baseline,
            _ => {
                self.pair = Some(ids);
                *self.baseline.insert(session.rotation.seed(absolute))
            }
        };
        let continuous = session.rotation.push(absolute)?;
        Some(GestureEvent::Rotate(RotateEvent {
            touches: [a, b],
            angle_absolute: absolute,
            angle_relative: continuous,
            rotation: continuous - baseline,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::{Point, Vec2};

    use crate::recognizers::test_util::*;

    /// Contacts on a circle of radius 50 around (100, 100), at `deg` from the +x axis.
    fn pair(deg: f64) -> Vec<TouchPoint> {
        let c = Point::new(100.0, 100.0);
        let r = Vec2::from_angle(deg.to_radians()) * 50.0;
        let (a, b) = (c - r, c + r);
        touches(&[(1, a.x, a.y), (2, b.x, b.y)])
    }

    fn rotation(event: Option<GestureEvent>) -> f64 {
        match event {
            Some(GestureEvent::Rotate(r)) => r.rotation,
            other => panic!("expected a rotate, got {other:?}"),
        }
    }

    #[test]
    fn quarter_turn_converges_to_90() {
        let mut s = session();
        let mut r = Rotate::default();
        let down = pair(0.0);
        begin(&mut s, &down, 0.0);
        r.start(&mut s, &down, 0.0);

        let mut seen = Vec::new();
        for i in 1..=10 {
            let t = pair(9.0 * f64::from(i));
            step(&mut s, &t, 16.0 * f64::from(i));
            seen.push(rotation(r.moved(&mut s, &t, 0.0)));
        }
        assert!(seen.windows(2).all(|w| w[1] > w[0]), "{seen:?}");
        assert!((seen[9] - 90.0).abs() < 1e-6, "{seen:?}");
    }

    #[test]
    fn full_turn_past_zero_keeps_counting() {
        let mut s = session();
        let mut r = Rotate::default();
        // Start pointing up-left so the absolute angle wraps through 0° early.
        let down = pair(200.0);
        begin(&mut s, &down, 0.0);
        r.start(&mut s, &down, 0.0);
        let mut last = 0.0;
        for i in 1..=36 {
            let t = pair(200.0 + 10.0 * f64::from(i));
            last = rotation(r.moved(&mut s, &t, 0.0));
        }
        assert!((last - 360.0).abs() < 1e-6, "{last}");
    }

    #[test]
    fn new_pair_starts_from_zero() {
        let mut s = session();
        let mut r = Rotate::default();
        let down = pair(0.0);
        begin(&mut s, &down, 0.0);
        r.start(&mut s, &down, 0.0);
        let t = pair(5.0);
        step(&mut s, &t, 16.0);
        assert!((rotation(r.moved(&mut s, &t, 16.0)) - 5.0).abs() < 1e-9);

        // Contact 3 joins on a move frame, then contact 1 lifts.
        let mut three = t.clone();
        three.push(TouchPoint::new(3, 100.0, 200.0));
        step(&mut s, &three, 32.0);
        assert!(r.moved(&mut s, &three, 32.0).is_none());

        let rest = three[1..].to_vec();
        step(&mut s, &rest, 48.0);
        assert_eq!(rotation(r.moved(&mut s, &rest, 48.0)), 0.0);
        step(&mut s, &rest, 64.0);
        assert_eq!(rotation(r.moved(&mut s, &rest, 64.0)), 0.0);
    }

    #[test]
    fn baseline_is_seeded_when_missing() {
        let mut s = session();
        let mut r = Rotate::default();
        let t = pair(30.0);
        assert_eq!(rotation(r.moved(&mut s, &t, 0.0)), 0.0);
        assert!(r.moved(&mut s, &touches(&[(1, 0.0, 0.0)]), 0.0).is_none());
    }
}
