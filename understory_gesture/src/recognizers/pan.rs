// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-contact pan.

use alloc::vec::Vec;

use kurbo::Point;

use crate::geometry::{angle, direction_between};
use crate::history::average;
use crate::session::Session;
use crate::types::{GestureEvent, PanEvent, Release, TouchId, TouchPoint};

use super::{Recognizer, local_positions};

/// Averages two or more moving contacts.
#[derive(Debug, Default)]
pub(crate) struct Pan {
    start: Option<Point>,
    last_position: Option<Point>,
}

impl Recognizer for Pan {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn start(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        if touches.len() >= 2 {
            self.start = average(local_positions(session, touches));
        }
        None
    }

    fn moved(
        &mut self,
        session: &mut Session,
        touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        if touches.len() < 2 {
            return None;
        }
        let positions = local_positions(session, touches);
        let position = average(positions.iter().copied())?;
        let start = self.start.unwrap_or(session.start);
        let ids: Vec<TouchId> = touches.iter().map(|t| t.id).collect();
        let previous = session.history.previous_reference(&ids, start);
        let initial = *session
            .initial_direction
            .get_or_insert_with(|| direction_between(start, position));
        self.last_position = Some(position);
        Some(GestureEvent::Pan(PanEvent {
            touches: positions,
            position,
            start,
            step: session.history.step_speed(),
            speed: session.history.speed(),
            angle: angle(previous, position),
            initial_direction: Some(initial),
            release: None,
        }))
    }

    fn end(
        &mut self,
        session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        if session.history.len() < 2 || !session.is_moving() {
            return None;
        }
        let finals: Vec<Point> = session.history.iter().map(|h| h.last().position).collect();
        let end = average(finals.iter().copied())?;
        let start = self.start.unwrap_or(session.start);
        let previous = session
            .history
            .lagged_average()
            .or(self.last_position)
            .unwrap_or(start);
        let speed = session.history.speed();
        Some(GestureEvent::Pan(PanEvent {
            touches: finals,
            position: end,
            start,
            step: session.history.step_speed(),
            speed,
            angle: angle(previous, end),
            initial_direction: session.initial_direction,
            release: Some(Release {
                end,
                final_direction: Some(direction_between(start, end)),
                flick: speed >= session.config.flick_threshold,
            }),
        }))
    }
}
