// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap followed by a press that drags.

use kurbo::Point;

use crate::session::Session;
use crate::types::{DoubleTapDragEvent, GestureEvent, TouchPoint};

use super::Recognizer;

/// Armed when a single contact lands inside the double-tap window.
#[derive(Debug, Default)]
pub(crate) struct DoubleTapDrag {
    anchor: Option<Point>,
}

impl Recognizer for DoubleTapDrag {
    fn reset(&mut self) {
        self.anchor = None;
    }

    fn start(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        time: f64,
    ) -> Option<GestureEvent> {
        if let [touch] = touches {
            self.anchor = session
                .within_double_tap(time)
                .then(|| session.history.local(touch.position));
        }
        None
    }

    fn moved(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        let anchor = self.anchor?;
        let [touch] = touches else {
            return None;
        };
        let position = session.history.local(touch.position);
        let delta = position - anchor;
        let distance = delta.hypot();
        (distance > session.config.double_tap_drag_threshold).then_some(
            GestureEvent::DoubleTapAndDrag(DoubleTapDragEvent {
                position,
                start: anchor,
                delta,
                distance,
            }),
        )
    }

    fn end(
        &mut self,
        _session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        self.anchor = None;
        None
    }
}
