// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the gesture engine: touch frames, gesture kinds, payloads, and configuration.
//!
//! ## Overview
//!
//! Hosts feed [`TouchFrame`] values into
//! [`GestureEngine::handle`](crate::engine::GestureEngine::handle) and receive
//! [`GestureEvent`] values through subscriptions keyed by [`GestureKind`].
//! All positions in payloads are element-local (relative to the tracked
//! element's bounding box origin at session start).

use alloc::vec::Vec;
use core::str::FromStr;

use kurbo::{Point, Vec2};

use crate::error::{FrameError, GestureError};
use crate::geometry::Direction;

/// Stable identifier of one physical contact for its lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TouchId(pub u64);

/// One active contact as reported by the input source.
///
/// `position` is in the input source's coordinate space (for example client
/// coordinates); the engine converts it to element-local space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Identifier of the contact.
    pub id: TouchId,
    /// Absolute position in the input source's coordinate space.
    pub position: Point,
}

impl TouchPoint {
    /// Create a touch point from raw coordinates.
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: TouchId(id),
            position: Point::new(x, y),
        }
    }
}

/// Kind of touch frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FramePhase {
    /// One or more contacts went down.
    Start,
    /// One or more contacts moved.
    Move,
    /// One or more contacts lifted.
    End,
}

/// One batch of active contacts at a moment in time.
///
/// For [`FramePhase::End`] frames, `touches` lists the contacts that remain
/// down after the lift; an end frame with no touches ends the session.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchFrame {
    /// Frame kind.
    pub phase: FramePhase,
    /// Contacts currently down, in input order.
    pub touches: Vec<TouchPoint>,
    /// Monotonic timestamp, in the same unit as the [`GestureConfig`] durations.
    pub timestamp: f64,
}

impl TouchFrame {
    /// Create a frame.
    pub fn new(phase: FramePhase, timestamp: f64, touches: Vec<TouchPoint>) -> Self {
        Self {
            phase,
            touches,
            timestamp,
        }
    }

    /// Create a start frame.
    pub fn start(timestamp: f64, touches: Vec<TouchPoint>) -> Self {
        Self::new(FramePhase::Start, timestamp, touches)
    }

    /// Create a move frame.
    pub fn moved(timestamp: f64, touches: Vec<TouchPoint>) -> Self {
        Self::new(FramePhase::Move, timestamp, touches)
    }

    /// Create an end frame listing the contacts that remain down.
    pub fn end(timestamp: f64, remaining: Vec<TouchPoint>) -> Self {
        Self::new(FramePhase::End, timestamp, remaining)
    }

    /// Check that the frame is well formed.
    ///
    /// `previous` is the timestamp of the last accepted frame, if any; frames
    /// may not travel back in time.
    pub fn validate(&self, previous: Option<f64>) -> Result<(), FrameError> {
        if !self.timestamp.is_finite() {
            return Err(FrameError::NonFiniteTimestamp);
        }
        if let Some(previous) = previous
            && self.timestamp < previous
        {
            return Err(FrameError::OutOfOrder {
                previous,
                timestamp: self.timestamp,
            });
        }
        if self.phase != FramePhase::End && self.touches.is_empty() {
            return Err(FrameError::NoContacts(self.phase));
        }
        for (i, t) in self.touches.iter().enumerate() {
            if !t.position.is_finite() {
                return Err(FrameError::NonFiniteCoordinate { id: t.id });
            }
            if self.touches[..i].iter().any(|o| o.id == t.id) {
                return Err(FrameError::DuplicateContact { id: t.id });
            }
        }
        Ok(())
    }
}

/// The gesture kinds the engine can recognize.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum GestureKind {
    /// Short single-contact touch without movement.
    Tap,
    /// Second tap shortly after a tap.
    DoubleTap,
    /// Single contact went down.
    Press,
    /// Single contact held without movement for the press time.
    LongPress,
    /// Two contacts twisting around each other.
    Rotate,
    /// Two contacts moving closer or apart.
    PinchSpread,
    /// Single contact moving.
    Drag,
    /// Two or more contacts moving together.
    Pan,
    /// Two contacts tapping together.
    TwoFingerTap,
    /// Tap followed by a press that drags.
    DoubleTapAndDrag,
}

impl GestureKind {
    /// Every kind, in a fixed order.
    pub const ALL: [Self; 10] = [
        Self::Tap,
        Self::DoubleTap,
        Self::Press,
        Self::LongPress,
        Self::Rotate,
        Self::PinchSpread,
        Self::Drag,
        Self::Pan,
        Self::TwoFingerTap,
        Self::DoubleTapAndDrag,
    ];

    /// Canonical gesture name, e.g. `"double-tap"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::DoubleTap => "double-tap",
            Self::Press => "press",
            Self::LongPress => "long-press",
            Self::Rotate => "rotate",
            Self::PinchSpread => "pinch-spread",
            Self::Drag => "drag",
            Self::Pan => "pan",
            Self::TwoFingerTap => "two-finger-tap",
            Self::DoubleTapAndDrag => "double-tap-and-drag",
        }
    }

    /// The single-kind [`GestureSet`] for this kind.
    pub const fn set(self) -> GestureSet {
        match self {
            Self::Tap => GestureSet::TAP,
            Self::DoubleTap => GestureSet::DOUBLE_TAP,
            Self::Press => GestureSet::PRESS,
            Self::LongPress => GestureSet::LONG_PRESS,
            Self::Rotate => GestureSet::ROTATE,
            Self::PinchSpread => GestureSet::PINCH_SPREAD,
            Self::Drag => GestureSet::DRAG,
            Self::Pan => GestureSet::PAN,
            Self::TwoFingerTap => GestureSet::TWO_FINGER_TAP,
            Self::DoubleTapAndDrag => GestureSet::DOUBLE_TAP_AND_DRAG,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureKind {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GestureError::UnknownGesture(s.into()))
    }
}

bitflags::bitflags! {
    /// A set of gesture kinds.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureSet: u16 {
        /// [`GestureKind::Tap`].
        const TAP                 = 1 << 0;
        /// [`GestureKind::DoubleTap`].
        const DOUBLE_TAP          = 1 << 1;
        /// [`GestureKind::Press`].
        const PRESS               = 1 << 2;
        /// [`GestureKind::LongPress`].
        const LONG_PRESS          = 1 << 3;
        /// [`GestureKind::Rotate`].
        const ROTATE              = 1 << 4;
        /// [`GestureKind::PinchSpread`].
        const PINCH_SPREAD        = 1 << 5;
        /// [`GestureKind::Drag`].
        const DRAG                = 1 << 6;
        /// [`GestureKind::Pan`].
        const PAN                 = 1 << 7;
        /// [`GestureKind::TwoFingerTap`].
        const TWO_FINGER_TAP      = 1 << 8;
        /// [`GestureKind::DoubleTapAndDrag`].
        const DOUBLE_TAP_AND_DRAG = 1 << 9;
    }
}

impl GestureSet {
    /// Whether `kind` is in the set.
    pub const fn has(self, kind: GestureKind) -> bool {
        self.contains(kind.set())
    }
}

impl From<GestureKind> for GestureSet {
    fn from(kind: GestureKind) -> Self {
        kind.set()
    }
}

/// Payload carrying a single position: tap, double-tap, press, long-press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointEvent {
    /// Where the contact went down.
    pub position: Point,
}

/// Payload of a two-finger tap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TwoFingerTapEvent {
    /// Midpoint of the two initial positions.
    pub position: Point,
    /// Initial positions of both contacts, in first-seen order.
    pub touches: [Point; 2],
}

/// Terminal fields attached to the last drag or pan of a session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Release {
    /// Final position.
    pub end: Point,
    /// Direction of the last step, when there is one.
    pub final_direction: Option<Direction>,
    /// Whether the release speed reached the flick threshold.
    pub flick: bool,
}

/// Payload of a single-contact drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent {
    /// Current position.
    pub position: Point,
    /// Session start position.
    pub start: Point,
    /// Absolute x delta of the last step of the first tracked contact.
    pub step: f64,
    /// Rolling speed in px per time unit.
    pub speed: f64,
    /// Angle of motion in degrees, `0°` = up.
    pub angle: f64,
    /// Direction locked on the first move of the session.
    pub initial_direction: Option<Direction>,
    /// Present on the terminal event emitted when the contact lifts.
    pub release: Option<Release>,
}

/// Payload of a multi-contact pan.
#[derive(Clone, Debug, PartialEq)]
pub struct PanEvent {
    /// Per-contact positions.
    pub touches: Vec<Point>,
    /// Average position of all contacts.
    pub position: Point,
    /// Average start position.
    pub start: Point,
    /// Absolute x delta of the last step of the first tracked contact.
    pub step: f64,
    /// Rolling speed in px per time unit.
    pub speed: f64,
    /// Angle of motion in degrees, `0°` = up.
    pub angle: f64,
    /// Direction locked on the first move of the session.
    pub initial_direction: Option<Direction>,
    /// Present on the terminal event.
    pub release: Option<Release>,
}

/// Payload of a two-contact rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RotateEvent {
    /// Positions of both contacts, in frame order.
    pub touches: [Point; 2],
    /// Absolute angle from the first contact to the second, in `[0, 360)`.
    pub angle_absolute: f64,
    /// Continuous (unwrapped) angle.
    pub angle_relative: f64,
    /// Rotation since the gesture started, in degrees; positive is clockwise.
    pub rotation: f64,
}

/// Payload of a two-contact pinch or spread.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinchEvent {
    /// Positions of both contacts, in frame order.
    pub touches: [Point; 2],
    /// Current distance between the contacts.
    pub distance: f64,
    /// Current distance over start distance.
    pub scale: f64,
    /// Set on the terminal event.
    pub end: bool,
}

/// Payload of a double-tap-and-drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DoubleTapDragEvent {
    /// Current position.
    pub position: Point,
    /// Anchor where the second tap went down.
    pub start: Point,
    /// Displacement from the anchor.
    pub delta: Vec2,
    /// Length of `delta`.
    pub distance: f64,
}

/// A recognized gesture and its payload.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// See [`GestureKind::Tap`].
    Tap(PointEvent),
    /// See [`GestureKind::DoubleTap`].
    DoubleTap(PointEvent),
    /// See [`GestureKind::Press`].
    Press(PointEvent),
    /// See [`GestureKind::LongPress`].
    LongPress(PointEvent),
    /// See [`GestureKind::Rotate`].
    Rotate(RotateEvent),
    /// See [`GestureKind::PinchSpread`].
    PinchSpread(PinchEvent),
    /// See [`GestureKind::Drag`].
    Drag(DragEvent),
    /// See [`GestureKind::Pan`].
    Pan(PanEvent),
    /// See [`GestureKind::TwoFingerTap`].
    TwoFingerTap(TwoFingerTapEvent),
    /// See [`GestureKind::DoubleTapAndDrag`].
    DoubleTapAndDrag(DoubleTapDragEvent),
}

impl GestureEvent {
    /// Kind of this event.
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Tap(_) => GestureKind::Tap,
            Self::DoubleTap(_) => GestureKind::DoubleTap,
            Self::Press(_) => GestureKind::Press,
            Self::LongPress(_) => GestureKind::LongPress,
            Self::Rotate(_) => GestureKind::Rotate,
            Self::PinchSpread(_) => GestureKind::PinchSpread,
            Self::Drag(_) => GestureKind::Drag,
            Self::Pan(_) => GestureKind::Pan,
            Self::TwoFingerTap(_) => GestureKind::TwoFingerTap,
            Self::DoubleTapAndDrag(_) => GestureKind::DoubleTapAndDrag,
        }
    }

    /// Motion angle carried by drag and pan payloads.
    pub fn angle(&self) -> Option<f64> {
        match self {
            Self::Drag(d) => Some(d.angle),
            Self::Pan(p) => Some(p.angle),
            _ => None,
        }
    }

    /// Whether this is the last event of its gesture in the session.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Drag(d) => d.release.is_some(),
            Self::Pan(p) => p.release.is_some(),
            Self::PinchSpread(p) => p.end,
            Self::Rotate(_) | Self::DoubleTapAndDrag(_) => false,
            _ => true,
        }
    }
}

/// Whether a gesture kind suppresses the host's default action (e.g. scrolling).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SuppressDefault {
    /// Always suppress while the gesture is active.
    Always,
    /// Suppress when the last motion angle points left or right.
    Horizontal,
    /// Suppress when the last motion angle points up or down.
    Vertical,
}

impl SuppressDefault {
    /// Decide for the given last motion angle.
    ///
    /// Quadrant bounds are exclusive, so exact diagonals never suppress for
    /// the axis-bound policies.
    pub fn applies(self, angle: Option<f64>) -> bool {
        match (self, angle) {
            (Self::Always, _) => true,
            (_, None) => false,
            (_, Some(a)) if a.is_nan() => false,
            (Self::Horizontal, Some(a)) => (a > 45.0 && a < 135.0) || (a > 225.0 && a < 315.0),
            (Self::Vertical, Some(a)) => a > 315.0 || a < 45.0 || (a > 135.0 && a < 225.0),
        }
    }
}

/// What the host should do after a frame was handled.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameOutcome {
    /// Whether the host should prevent its default handling of the input.
    pub suppress_default: bool,
    /// Gesture kinds recognized while handling the frame.
    pub recognized: GestureSet,
}

/// Tunable thresholds.
///
/// Durations share the unit of [`TouchFrame::timestamp`] (milliseconds for
/// the defaults); distances are in px; speeds in px per time unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Releases sooner than this count as taps; holds this long are long presses.
    pub press_time: f64,
    /// Maximum gap between a tap release and the next tap to chain a double tap.
    pub double_tap_interval: f64,
    /// Release speed at or above which a drag or pan is a flick.
    pub flick_threshold: f64,
    /// Displacement required before a double-tap-and-drag is confirmed.
    pub double_tap_drag_threshold: f64,
    /// Suppress the host's default action for every frame.
    pub suppress_all_defaults: bool,
}

impl GestureConfig {
    /// Window after a tap release during which the next tap chains.
    pub fn double_tap_window(&self) -> f64 {
        self.double_tap_interval + self.press_time
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            press_time: 350.0,
            double_tap_interval: 250.0,
            flick_threshold: 0.75,
            double_tap_drag_threshold: 5.0,
            suppress_all_defaults: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn gesture_names_round_trip() {
        for kind in GestureKind::ALL {
            assert_eq!(kind.as_str().parse::<GestureKind>(), Ok(kind));
        }
        assert_eq!(GestureKind::DoubleTapAndDrag.to_string(), "double-tap-and-drag");
    }

    #[test]
    fn unknown_gesture_name_is_rejected() {
        let err = "swipe".parse::<GestureKind>().unwrap_err();
        assert_eq!(err, GestureError::UnknownGesture("swipe".into()));
    }

    #[test]
    fn gesture_sets_are_distinct() {
        let mut all = GestureSet::empty();
        for kind in GestureKind::ALL {
            assert!(!all.has(kind), "{kind} shares a bit");
            all |= kind.into();
        }
        assert_eq!(all, GestureSet::all());
        assert_eq!(GestureKind::Pan.index(), 7);
    }

    #[test]
    fn validate_rejects_malformed_frames() {
        let ok = TouchFrame::start(10.0, vec![TouchPoint::new(1, 0.0, 0.0)]);
        assert_eq!(ok.validate(None), Ok(()));
        assert_eq!(ok.validate(Some(20.0)), Err(FrameError::OutOfOrder {
            previous: 20.0,
            timestamp: 10.0
        }));

        let nan = TouchFrame::moved(f64::NAN, vec![TouchPoint::new(1, 0.0, 0.0)]);
        assert_eq!(nan.validate(None), Err(FrameError::NonFiniteTimestamp));

        let empty = TouchFrame::moved(1.0, vec![]);
        assert_eq!(empty.validate(None), Err(FrameError::NoContacts(FramePhase::Move)));

        let bad = TouchFrame::moved(1.0, vec![TouchPoint::new(4, f64::INFINITY, 0.0)]);
        assert_eq!(bad.validate(None), Err(FrameError::NonFiniteCoordinate {
            id: TouchId(4)
        }));

        let dup = TouchFrame::moved(
            1.0,
            vec![TouchPoint::new(2, 0.0, 0.0), TouchPoint::new(2, 1.0, 1.0)],
        );
        assert_eq!(dup.validate(None), Err(FrameError::DuplicateContact {
            id: TouchId(2)
        }));

        let last_lift = TouchFrame::end(2.0, vec![]);
        assert_eq!(last_lift.validate(Some(2.0)), Ok(()));
    }

    #[test]
    fn suppression_quadrants() {
        use SuppressDefault::*;
        assert!(Always.applies(None));
        assert!(Horizontal.applies(Some(90.0)));
        assert!(Horizontal.applies(Some(270.0)));
        assert!(!Horizontal.applies(Some(0.0)));
        assert!(!Horizontal.applies(Some(45.0)));
        assert!(Vertical.applies(Some(0.0)));
        assert!(Vertical.applies(Some(180.0)));
        assert!(!Vertical.applies(Some(90.0)));
        assert!(!Vertical.applies(None));
        assert!(!Vertical.applies(Some(f64::NAN)));
    }

    #[test]
    fn terminal_events() {
        let tap = GestureEvent::Tap(PointEvent {
            position: Point::ZERO,
        });
        assert!(tap.is_terminal());
        assert_eq!(tap.kind(), GestureKind::Tap);
        assert_eq!(tap.angle(), None);
    }
}
