// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture recognizers.
//!
//! Every recognizer sees every frame through the same three hooks and decides
//! on its own whether to emit. Recognizers never look at each other; they only
//! share the [`Session`].

mod double_tap_drag;
mod drag;
mod pan;
mod pinch;
mod press;
mod rotate;
mod tap;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::session::Session;
use crate::types::{GestureEvent, TouchId, TouchPoint};

pub(crate) use double_tap_drag::DoubleTapDrag;
pub(crate) use drag::Drag;
pub(crate) use pan::Pan;
pub(crate) use pinch::PinchSpread;
pub(crate) use press::{LongPress, Press};
pub(crate) use rotate::Rotate;
pub(crate) use tap::{Tap, TwoFingerTap};

/// One gesture family's reaction to start, move, and end frames.
///
/// `touches` are the contacts reported by the frame (for end frames, those
/// remaining down) in raw input coordinates; `time` is the frame timestamp.
pub(crate) trait Recognizer: core::fmt::Debug {
    /// Forget per-session state; called when a new session begins.
    fn reset(&mut self) {}

    fn start(
        &mut self,
        _session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        None
    }

    fn moved(
        &mut self,
        _session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        None
    }

    fn end(
        &mut self,
        _session: &mut Session,
        _touches: &[TouchPoint],
        _time: f64,
    ) -> Option<GestureEvent> {
        None
    }
}

/// The fixed, ordered recognizer list every engine runs.
pub(crate) fn default_set() -> Vec<Box<dyn Recognizer>> {
    let set: [Box<dyn Recognizer>; 9] = [
        Box::new(Press),
        Box::new(Tap),
        Box::new(TwoFingerTap),
        Box::new(LongPress),
        Box::new(Drag::default()),
        Box::new(Pan::default()),
        Box::new(Rotate::default()),
        Box::new(PinchSpread::default()),
        Box::new(DoubleTapDrag::default()),
    ];
    set.into()
}

/// Element-local positions of the frame's contacts.
fn local_positions(session: &Session, touches: &[TouchPoint]) -> Vec<kurbo::Point> {
    touches
        .iter()
        .map(|t| session.history.local(t.position))
        .collect()
}

/// Element-local positions of exactly two contacts.
fn local_pair(session: &Session, touches: &[TouchPoint]) -> Option<[kurbo::Point; 2]> {
    match touches {
        [a, b] => Some([
            session.history.local(a.position),
            session.history.local(b.position),
        ]),
        _ => None,
    }
}

/// Identifiers of exactly two contacts, in frame order.
fn pair_ids(touches: &[TouchPoint]) -> Option<[TouchId; 2]> {
    match touches {
        [a, b] => Some([a.id, b.id]),
        _ => None,
    }
}
