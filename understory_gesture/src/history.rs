// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-contact sample history for the current session.
//!
//! ## Overview
//!
//! [`HistoryTracker`] keeps one [`TouchHistory`] per contact, in the order the
//! contacts first appeared. Samples are element-local: the tracker subtracts
//! the origin recorded when the session began.
//!
//! Histories are append-only for the lifetime of a session and are dropped
//! together when the last contact lifts.
//!
//! ## Derived measures
//!
//! - [`HistoryTracker::step_speed`]: last x step of the first contact with at least two samples.
//! - [`HistoryTracker::speed`]: distance over time across the last five samples of the first contact.
//! - [`HistoryTracker::previous_reference`]: a lagging "previous position" used for motion angles.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::types::{TouchId, TouchPoint};

/// Samples kept in the speed window and the lag used for reference positions.
const WINDOW: usize = 5;

/// One element-local sample of a contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// Element-local position.
    pub position: Point,
    /// Frame timestamp.
    pub time: f64,
}

/// Ordered samples of one contact.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchHistory {
    id: TouchId,
    samples: Vec<TouchSample>,
}

impl TouchHistory {
    fn new(id: TouchId, first: TouchSample) -> Self {
        Self {
            id,
            samples: alloc::vec![first],
        }
    }

    /// Contact identifier.
    pub fn id(&self) -> TouchId {
        self.id
    }

    /// All samples, oldest first. Never empty.
    pub fn samples(&self) -> &[TouchSample] {
        &self.samples
    }

    /// First sample of the contact.
    pub fn first(&self) -> TouchSample {
        self.samples[0]
    }

    /// Latest sample of the contact.
    pub fn last(&self) -> TouchSample {
        self.samples[self.samples.len() - 1]
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples; a tracked contact always has its seed sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample `back` positions before the latest one (`0` is the latest).
    pub fn from_end(&self, back: usize) -> Option<TouchSample> {
        let n = self.samples.len();
        (back < n).then(|| self.samples[n - 1 - back])
    }

    /// Distance over time across the last five samples.
    ///
    /// Returns `0.0` with fewer than two samples or when no time elapsed.
    pub fn speed(&self) -> f64 {
        let n = self.samples.len().min(WINDOW);
        if n < 2 {
            return 0.0;
        }
        let window = &self.samples[self.samples.len() - n..];
        let (first, last) = (window[0], window[n - 1]);
        let elapsed = last.time - first.time;
        if elapsed <= 0.0 {
            return 0.0;
        }
        first.position.distance(last.position) / elapsed
    }

    /// Position lagging [`WINDOW`] samples behind, if the history is long enough.
    fn lagged(&self) -> Option<Point> {
        self.from_end(WINDOW - 1).map(|s| s.position)
    }
}

/// Session-scoped sample histories for every contact seen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryTracker {
    origin: Point,
    histories: Vec<TouchHistory>,
}

impl HistoryTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin subtracted from raw positions (the element's top-left at session start).
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Record the coordinate origin for a new session.
    pub(crate) fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Convert a raw position to element-local space.
    pub fn local(&self, raw: Point) -> Point {
        raw - self.origin.to_vec2()
    }

    /// Number of contacts tracked this session.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Whether no contact is tracked.
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// History of one contact.
    pub fn get(&self, id: TouchId) -> Option<&TouchHistory> {
        self.histories.iter().find(|h| h.id == id)
    }

    /// Histories in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &TouchHistory> {
        self.histories.iter()
    }

    /// Contact identifiers in first-seen order.
    pub fn sequence(&self) -> impl Iterator<Item = TouchId> + '_ {
        self.histories.iter().map(|h| h.id)
    }

    /// History of the earliest-started contact.
    pub fn first(&self) -> Option<&TouchHistory> {
        self.histories.first()
    }

    /// Seed histories for contacts not seen yet this session.
    ///
    /// Returns the local position of the last newly seen contact, if any.
    pub(crate) fn track_new(&mut self, touches: &[TouchPoint], time: f64) -> Option<Point> {
        let mut latest = None;
        for t in touches {
            if self.get(t.id).is_some() {
                continue;
            }
            let position = self.local(t.position);
            self.histories
                .push(TouchHistory::new(t.id, TouchSample { position, time }));
            latest = Some(position);
        }
        latest
    }

    /// Append a sample for every contact in the frame.
    ///
    /// Contacts that appear for the first time mid-session are seeded instead.
    /// Returns the local position of the last newly seen contact, if any.
    pub(crate) fn record(&mut self, touches: &[TouchPoint], time: f64) -> Option<Point> {
        let mut latest = None;
        for t in touches {
            let position = self.local(t.position);
            let sample = TouchSample { position, time };
            match self.histories.iter_mut().find(|h| h.id == t.id) {
                Some(h) => h.samples.push(sample),
                None => {
                    self.histories.push(TouchHistory::new(t.id, sample));
                    latest = Some(position);
                }
            }
        }
        latest
    }

    /// Drop every history.
    pub(crate) fn clear(&mut self) {
        self.histories.clear();
    }

    /// Absolute x delta between the last two samples of the first contact
    /// (in first-seen order) that has at least two samples.
    pub fn step_speed(&self) -> f64 {
        self.histories
            .iter()
            .find_map(|h| {
                let last = h.from_end(0)?;
                let prev = h.from_end(1)?;
                Some((last.position.x - prev.position.x).abs())
            })
            .unwrap_or(0.0)
    }

    /// Speed of the earliest-started contact over its last five samples.
    ///
    /// Returns `0.0` with fewer than two samples or when no time elapsed.
    pub fn speed(&self) -> f64 {
        self.first().map_or(0.0, TouchHistory::speed)
    }

    /// Lagging reference position for computing a motion angle.
    ///
    /// - One active contact: its fifth-from-last sample when it has five,
    ///   otherwise its first sample, otherwise `default`.
    /// - Several active contacts: the average fifth-from-last sample over the
    ///   contacts that have five, otherwise the average first sample, otherwise
    ///   `default`.
    pub fn previous_reference(&self, active: &[TouchId], default: Point) -> Point {
        match active {
            [] => default,
            [id] => self
                .get(*id)
                .map(|h| h.lagged().unwrap_or(h.first().position))
                .unwrap_or(default),
            _ => {
                let histories = || active.iter().filter_map(|id| self.get(*id));
                average(histories().filter_map(TouchHistory::lagged))
                    .or_else(|| average(histories().map(|h| h.first().position)))
                    .unwrap_or(default)
            }
        }
    }

    /// Average over every tracked contact of its lagged sample, if any has one.
    pub(crate) fn lagged_average(&self) -> Option<Point> {
        average(self.histories.iter().filter_map(TouchHistory::lagged))
    }
}

/// Mean of a set of points, `None` when empty.
pub(crate) fn average(points: impl IntoIterator<Item = Point>) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut count = 0_u32;
    for p in points {
        sum += p.to_vec2();
        count += 1;
    }
    (count > 0).then(|| (sum / f64::from(count)).to_point())
}
