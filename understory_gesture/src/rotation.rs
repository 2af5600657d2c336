// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous rotation tracking.
//!
//! ## Overview
//!
//! [`geometry::angle`](crate::geometry::angle) reports absolute angles in `[0, 360)`.
//! A twist gesture that crosses `0°`/`360°` would otherwise jump by a full turn,
//! so [`RotationAccumulator`] unwraps the sequence of absolute angles into a
//! continuous angle that keeps counting past `360°` (or below `0°`).
//!
//! A step of `180°` or more between consecutive samples is treated as a wrap:
//! - a step `≤ -180°` (e.g. `350° → 10°`) crossed `0°` going clockwise;
//! - a step `> 180°` (e.g. `10° → 350°`) crossed `0°` going counter-clockwise.
//!
//! A step of exactly `+180°` is ambiguous and resolves to the clockwise branch.
//!
//! ## Example
//!
//! ```
//! use understory_gesture::rotation::RotationAccumulator;
//!
//! let mut acc = RotationAccumulator::new();
//! acc.seed(350.0);
//! assert_eq!(acc.push(10.0), Some(370.0));
//! assert_eq!(acc.push(350.0), Some(350.0));
//! assert_eq!(acc.push(10.0), Some(370.0));
//! ```

/// Unwraps absolute angles into a continuous angle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RotationAccumulator {
    previous: Option<f64>,
    revolutions: i32,
    negative_pending: bool,
    continuous: Option<f64>,
}

impl RotationAccumulator {
    /// Create an empty accumulator with no previous angle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all revolutions and the previous angle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reset and use `angle` as the baseline sample.
    ///
    /// Returns the continuous value of the baseline, which is `angle` itself.
    pub fn seed(&mut self, angle: f64) -> f64 {
        self.reset();
        self.previous = Some(angle);
        self.continuous = Some(angle);
        angle
    }

    /// Feed the next absolute angle.
    ///
    /// Returns `None` for the first sample after a [`reset`](Self::reset) since
    /// there is nothing to unwrap against yet; after that, the continuous angle.
    pub fn push(&mut self, angle: f64) -> Option<f64> {
        let Some(previous) = self.previous else {
            self.previous = Some(angle);
            return None;
        };

        let step = angle - previous;
        if step <= -180.0 || step == 180.0 {
            if self.negative_pending && self.revolutions >= 0 {
                self.revolutions = 0;
                self.negative_pending = false;
            } else {
                self.revolutions += 1;
            }
        } else if step > 180.0 {
            if self.revolutions == 0 && !self.negative_pending {
                self.negative_pending = true;
            } else {
                self.revolutions -= 1;
            }
        }

        let mut continuous = 360.0 * f64::from(self.revolutions) + angle;
        if self.negative_pending || self.revolutions < 0 {
            continuous -= 360.0;
        }

        self.previous = Some(angle);
        self.continuous = Some(continuous);
        Some(continuous)
    }

    /// Last absolute angle fed to the accumulator.
    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// Last continuous angle produced, if any.
    pub fn continuous(&self) -> Option<f64> {
        self.continuous
    }

    /// Signed count of completed revolutions.
    pub fn revolutions(&self) -> i32 {
        self.revolutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const EPS: f64 = 1e-9;

    fn sweep(start: f64, step: f64, count: usize) -> Vec<f64> {
        (0..=count)
            .map(|i| {
                let mut a = (start + step * i as f64) % 360.0;
                if a < 0.0 {
                    a += 360.0;
                }
                a
            })
            .collect()
    }

    fn total(angles: &[f64]) -> f64 {
        let mut acc = RotationAccumulator::new();
        let first = acc.seed(angles[0]);
        let mut last = first;
        for &a in &angles[1..] {
            last = acc.push(a).unwrap();
        }
        last - first
    }

    #[test]
    fn first_push_has_no_relative_angle() {
        let mut acc = RotationAccumulator::new();
        assert_eq!(acc.push(42.0), None);
        assert_eq!(acc.previous(), Some(42.0));
        assert_eq!(acc.push(50.0), Some(50.0));
    }

    #[test]
    fn one_clockwise_revolution_is_360() {
        let angles = sweep(90.0, 10.0, 36);
        assert!((total(&angles) - 360.0).abs() < EPS, "{}", total(&angles));
    }

    #[test]
    fn reversed_revolution_is_minus_360() {
        let mut angles = sweep(90.0, 10.0, 36);
        angles.reverse();
        assert!((total(&angles) + 360.0).abs() < EPS, "{}", total(&angles));
    }

    #[test]
    fn counter_clockwise_from_near_zero() {
        let angles = sweep(10.0, -10.0, 36);
        assert!((total(&angles) + 360.0).abs() < EPS, "{}", total(&angles));
    }

    #[test]
    fn multiple_revolutions_accumulate() {
        let cw = sweep(0.0, 15.0, 24 * 3);
        assert!((total(&cw) - 1080.0).abs() < EPS);
        let ccw = sweep(0.0, -15.0, 24 * 3);
        assert!((total(&ccw) + 1080.0).abs() < EPS);
    }

    #[test]
    fn unwinding_after_two_negative_turns_is_continuous() {
        // Two turns counter-clockwise, then one back clockwise.
        let mut angles = sweep(30.0, -20.0, 36);
        let back = sweep(30.0, 20.0, 18);
        angles.extend_from_slice(&back[1..]);
        assert!((total(&angles) + 360.0).abs() < EPS, "{}", total(&angles));
    }

    #[test]
    fn back_and_forth_across_zero() {
        let mut acc = RotationAccumulator::new();
        acc.seed(350.0);
        assert_eq!(acc.push(10.0), Some(370.0));
        assert_eq!(acc.revolutions(), 1);
        assert_eq!(acc.push(350.0), Some(350.0));
        assert_eq!(acc.revolutions(), 0);
        assert_eq!(acc.push(340.0), Some(340.0));
    }

    #[test]
    fn exact_half_turn_steps_resolve_clockwise() {
        let mut acc = RotationAccumulator::new();
        acc.seed(0.0);
        assert_eq!(acc.push(180.0), Some(540.0));
        let mut acc = RotationAccumulator::new();
        acc.seed(270.0);
        assert_eq!(acc.push(90.0), Some(450.0));
    }

    #[test]
    fn reset_clears_everything() {
        let mut acc = RotationAccumulator::new();
        acc.seed(350.0);
        acc.push(10.0);
        acc.reset();
        assert_eq!(acc, RotationAccumulator::default());
        assert_eq!(acc.continuous(), None);
    }
}
