// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric primitives shared by the recognizers.
//!
//! ## Conventions
//!
//! Positions are in element-local screen space: x grows to the right and
//! y grows downward. Angles are expressed in degrees in `[0, 360)`, measured
//! clockwise with `0°` pointing up, so a pointer moving straight right has an
//! angle of `90°` and one moving straight down has an angle of `180°`.

use kurbo::Point;

/// Coarse direction bucket derived from an angle.
///
/// See [`direction`] for how the four quadrants are resolved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// `[315, 360) ∪ [0, 45)`.
    Top,
    /// `[45, 135)`.
    Right,
    /// `[135, 225)`.
    Bottom,
    /// `[225, 315)`.
    Left,
}

impl Direction {
    /// Lowercase name of the direction, matching the gesture payload vocabulary.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Whether this direction lies on the horizontal axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Angle of the segment `from → to` in degrees, normalized into `[0, 360)` with `0°` = up.
///
/// A zero-length segment yields `90°` (the angle of `atan2(0, 0)` rotated by a quarter turn).
pub fn angle(from: Point, to: Point) -> f64 {
    let mut deg = (to - from).atan2().to_degrees() + 90.0;
    if deg < 0.0 {
        deg += 360.0;
    }
    if deg >= 360.0 {
        deg -= 360.0;
    }
    deg
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Ratio of `distance` to `start_distance`.
///
/// A degenerate start distance (zero, negative, or non-finite) reports a
/// neutral scale of `1.0` rather than propagating an infinity or NaN.
pub fn scale(start_distance: f64, distance: f64) -> f64 {
    if start_distance > 0.0 && start_distance.is_finite() && distance.is_finite() {
        distance / start_distance
    } else {
        1.0
    }
}

/// Direction bucket for an angle in `[0, 360)`.
///
/// Lower bounds are inclusive: `45°` is [`Direction::Right`], `135°` is
/// [`Direction::Bottom`], `225°` is [`Direction::Left`] and `315°` is
/// [`Direction::Top`]. Angles outside the range are wrapped first.
pub fn direction(angle: f64) -> Direction {
    let a = wrap_degrees(angle);
    if !(45.0..315.0).contains(&a) {
        Direction::Top
    } else if a < 135.0 {
        Direction::Right
    } else if a < 225.0 {
        Direction::Bottom
    } else {
        Direction::Left
    }
}

/// Direction bucket of the segment `from → to`.
pub fn direction_between(from: Point, to: Point) -> Direction {
    direction(angle(from, to))
}

fn wrap_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    a
}
