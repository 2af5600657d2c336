// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press and long-press.

use crate::session::Session;
use crate::types::{GestureEvent, PointEvent, TouchPoint};

use super::Recognizer;

/// Emits immediately when a single contact goes down.
#[derive(Debug)]
pub(crate) struct Press;

impl Recognizer for Press {
    fn start(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        (touches.len() == 1).then(|| {
            GestureEvent::Press(PointEvent {
                position: session.start,
            })
        })
    }
}

/// Arms the session's press timer; the engine fires it once it is due.
#[derive(Debug)]
pub(crate) struct LongPress;

impl Recognizer for LongPress {
    fn start(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        time: f64,
    ) -> Option<GestureEvent> {
        if touches.len() == 1 {
            let deadline = time + session.config.press_time;
            session.press_timer.arm(deadline, session.start);
        } else {
            session.press_timer.cancel();
        }
        None
    }

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
        _time: f64,
    ) -> Option<GestureEvent> {
        session.press_timer.cancel();
        None
    }
}
