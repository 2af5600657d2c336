// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: a frame-driven, `no_std` touch gesture recognizer.
//!
//! ## Overview
//!
//! This crate turns raw multi-contact touch frames into ten named gestures:
//! `tap`, `double-tap`, `press`, `long-press`, `rotate`, `pinch-spread`,
//! `drag`, `pan`, `two-finger-tap` and `double-tap-and-drag`.
//! It does not read input devices or own a clock.
//! Instead, feed it [`TouchFrame`](crate::types::TouchFrame) values (start, move, end) and it invokes the
//! callbacks subscribed to each [`GestureKind`](crate::types::GestureKind).
//!
//! ## Sessions
//!
//! A session runs from the first contact going down to the last contact lifting.
//! When it begins, the engine reads the tracked element's bounding box once through
//! [`TrackedElement`](crate::engine::TrackedElement) and reports every position relative to its origin.
//! Per-contact histories ([`HistoryTracker`](crate::history::HistoryTracker)) grow during the session and are
//! handed to subscribers alongside each gesture.
//!
//! ## Recognition
//!
//! All recognizers observe every frame independently, so one frame may yield several
//! gestures (a two-contact move typically produces `pan`, `rotate` and `pinch-spread`).
//! The last gesture emitted becomes the active gesture, which drives default-action
//! suppression through the subscription's [`SuppressDefault`](crate::types::SuppressDefault) policy.
//!
//! Rotation is unwrapped by a [`RotationAccumulator`](crate::rotation::RotationAccumulator) so twists past a full
//! turn keep counting. Angles follow [`geometry`](crate::geometry) conventions: degrees, `0°` up, clockwise.
//!
//! ## Time
//!
//! Timestamps are plain `f64` values in the host's unit (milliseconds for the
//! default [`GestureConfig`](crate::types::GestureConfig)). Long-press is the only deferred gesture; the host calls
//! [`GestureEngine::advance`](crate::engine::GestureEngine::advance) once
//! [`GestureEngine::next_deadline`](crate::engine::GestureEngine::next_deadline) has passed.
//!
//! ## Workflow
//!
//! 1) Construct a [`GestureEngine`](crate::engine::GestureEngine) for the element you track.
//! 2) Subscribe to the gestures you care about, optionally with a suppression policy.
//! 3) Forward every touch frame to [`handle`](crate::engine::GestureEngine::handle) and honor
//!    [`FrameOutcome::suppress_default`](crate::types::FrameOutcome::suppress_default).
//!
//! ```
//! use kurbo::Rect;
//! use understory_gesture::engine::GestureEngine;
//! use understory_gesture::types::{GestureEvent, GestureKind, SuppressDefault, TouchFrame, TouchPoint};
//!
//! let mut engine = GestureEngine::new(Rect::new(0.0, 0.0, 320.0, 480.0));
//! engine.subscribe_with(GestureKind::Drag, SuppressDefault::Horizontal, |event, _| {
//!     if let GestureEvent::Drag(drag) = event {
//!         let _ = (drag.position, drag.angle);
//!     }
//! });
//!
//! engine.handle(&TouchFrame::start(0.0, vec![TouchPoint::new(7, 10.0, 200.0)])).unwrap();
//! let outcome = engine
//!     .handle(&TouchFrame::moved(16.0, vec![TouchPoint::new(7, 40.0, 200.0)]))
//!     .unwrap();
//! // A horizontal drag: the host should not scroll.
//! assert!(outcome.suppress_default);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod engine;
pub mod error;
pub mod geometry;
pub mod history;
pub mod rotation;
pub mod subscription;
pub mod types;

mod recognizers;
mod session;

pub use engine::{GestureEngine, TrackedElement};
pub use error::{FrameError, GestureError};
pub use types::{GestureEvent, GestureKind, TouchFrame, TouchPoint};
