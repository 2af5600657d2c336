// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-engine session state shared by the recognizers.

use kurbo::Point;

use crate::geometry::Direction;
use crate::history::HistoryTracker;
use crate::rotation::RotationAccumulator;
use crate::types::{GestureConfig, GestureKind, GestureSet};

bitflags::bitflags! {
    /// Facts established so far in the current session.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct SessionFlags: u8 {
        /// A move frame arrived since the last start or end frame.
        const MOVING            = 0b0000_0001;
        /// A pinch-spread was recognized this session.
        const PINCHED           = 0b0000_0010;
        /// The two-finger tap already fired this session.
        const TWO_FINGER_TAPPED = 0b0000_0100;
    }
}

/// Deferred long-press, driven by frame timestamps and
/// [`GestureEngine::advance`](crate::engine::GestureEngine::advance).
///
/// At most one timer is outstanding per session; cancelling is idempotent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct PressTimer {
    deadline: Option<f64>,
    position: Point,
}

impl PressTimer {
    pub(crate) fn arm(&mut self, deadline: f64, position: Point) {
        self.deadline = Some(deadline);
        self.position = position;
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    pub(crate) fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Disarm and return the press position if the deadline has been reached.
    pub(crate) fn take_due(&mut self, now: f64) -> Option<Point> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.position)
            }
            _ => None,
        }
    }
}

/// Mutable state owned by one engine.
///
/// Everything except `tap_release` and `last_timestamp` is scoped to a single
/// session and reset when the next one begins.
#[derive(Clone, Debug, Default)]
pub(crate) struct Session {
    pub(crate) config: GestureConfig,
    pub(crate) history: HistoryTracker,
    pub(crate) flags: SessionFlags,
    /// Timestamp of the latest start frame.
    pub(crate) start_time: f64,
    /// Local position of the most recently seen new contact.
    pub(crate) start: Point,
    /// Kind of the last gesture emitted.
    pub(crate) active: Option<GestureKind>,
    /// Value of `active` when the current frame arrived.
    pub(crate) frame_active: Option<GestureKind>,
    /// Motion angle of the last drag or pan, cleared by other motion gestures.
    pub(crate) last_angle: Option<f64>,
    pub(crate) rotation: RotationAccumulator,
    pub(crate) initial_direction: Option<Direction>,
    pub(crate) press_timer: PressTimer,
    /// Release time of the last single tap, carried across sessions.
    pub(crate) tap_release: Option<f64>,
    /// Kinds that currently have a subscriber.
    pub(crate) subscribed: GestureSet,
    pub(crate) last_timestamp: Option<f64>,
}

impl Session {
    pub(crate) fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.history.is_empty()
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.flags.contains(SessionFlags::MOVING)
    }

    /// Time since the latest start frame.
    pub(crate) fn elapsed(&self, now: f64) -> f64 {
        now - self.start_time
    }

    /// Whether `now` falls inside the double-tap window of the last tap release.
    pub(crate) fn within_double_tap(&self, now: f64) -> bool {
        self.tap_release
            .is_some_and(|release| now < release + self.config.double_tap_window())
    }

    /// Forget all per-session state, keeping the tap release marker and subscriptions.
    pub(crate) fn clear(&mut self) {
        self.history.clear();
        self.flags = SessionFlags::empty();
        self.rotation.reset();
        self.initial_direction = None;
        self.press_timer.cancel();
    }
}
