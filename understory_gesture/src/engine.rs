// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame dispatch.
//!
//! ## Overview
//!
//! A [`GestureEngine`] owns one tracked element, its session state, and the
//! fixed list of recognizers. Hosts feed it one [`TouchFrame`] at a time:
//!
//! - Start frames reset per-frame scalars, seed histories for new contacts,
//!   then run every recognizer's start hook.
//! - Move frames mark the session as moving, append samples, then run every
//!   recognizer's move hook.
//! - End frames run every recognizer's end hook; when no contacts remain the
//!   session is cleared.
//!
//! Every recognizer runs on every frame. Each emitted gesture becomes the
//! active gesture and is delivered to its subscriber, if any, together with the
//! per-contact history. Several gestures may be emitted by one frame.
//!
//! ## Timers
//!
//! Long-press is the only deferred gesture. The engine has no clock of its
//! own: hosts call [`GestureEngine::advance`] when [`GestureEngine::next_deadline`]
//! is reached, and every frame also fires a timer that has come due before
//! the frame itself is handled.
//!
//! ## Suppression
//!
//! [`GestureEngine::handle`] returns a [`FrameOutcome`] telling the host
//! whether to prevent its default handling of the input, based on the
//! [`SuppressDefault`] policy of the active gesture's subscription.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use understory_gesture::engine::GestureEngine;
//! use understory_gesture::types::{GestureKind, TouchFrame, TouchPoint};
//!
//! let mut engine = GestureEngine::new(Rect::new(0.0, 0.0, 300.0, 300.0));
//! engine.subscribe(GestureKind::Tap, |event, _history| {
//!     assert_eq!(event.kind(), GestureKind::Tap);
//! });
//!
//! engine
//!     .handle(&TouchFrame::start(0.0, vec![TouchPoint::new(1, 20.0, 30.0)]))
//!     .unwrap();
//! let outcome = engine.handle(&TouchFrame::end(80.0, vec![])).unwrap();
//! assert!(outcome.recognized.has(GestureKind::Tap));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Rect;
use log::{debug, trace, warn};

use crate::error::GestureError;
use crate::history::HistoryTracker;
use crate::recognizers::{self, Recognizer};
use crate::session::{Session, SessionFlags};
use crate::subscription::Subscriptions;
use crate::types::{
    FrameOutcome, FramePhase, GestureConfig, GestureEvent, GestureKind, GestureSet, PointEvent,
    SuppressDefault, TouchFrame, TouchPoint,
};

/// Something whose bounding box defines the engine's local coordinate space.
///
/// Queried once when a session begins; the box's origin is subtracted from
/// every contact position for the rest of that session.
pub trait TrackedElement {
    /// Current bounding box in the input source's coordinate space.
    fn bounding_box(&self) -> Rect;
}

impl TrackedElement for Rect {
    fn bounding_box(&self) -> Rect {
        *self
    }
}

impl<T: TrackedElement + ?Sized> TrackedElement for &T {
    fn bounding_box(&self) -> Rect {
        (**self).bounding_box()
    }
}

/// Gesture recognition engine for one tracked element.
///
/// ## Usage
///
/// - Construct with [`GestureEngine::new`] or [`GestureEngine::with_config`].
/// - Register callbacks with [`GestureEngine::subscribe`],
///   [`GestureEngine::subscribe_with`] or [`GestureEngine::subscribe_named`].
/// - Call [`GestureEngine::handle`] for every touch frame, and
///   [`GestureEngine::advance`] when [`GestureEngine::next_deadline`] passes.
/// - [`GestureEngine::detach`] stops recognition until [`GestureEngine::attach`].
pub struct GestureEngine<E: TrackedElement = Rect> {
    element: E,
    session: Session,
    recognizers: Vec<Box<dyn Recognizer>>,
    subscriptions: Subscriptions,
    attached: bool,
}

impl<E: TrackedElement> core::fmt::Debug for GestureEngine<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureEngine")
            .field("attached", &self.attached)
            .field("config", &self.session.config)
            .field("active", &self.session.active)
            .field("subscribed", &self.subscriptions.kinds())
            .finish_non_exhaustive()
    }
}

impl<E: TrackedElement> GestureEngine<E> {
    /// Create an attached engine with the default configuration.
    pub fn new(element: E) -> Self {
        Self::with_config(element, GestureConfig::default())
    }

    /// Create an attached engine with an explicit configuration.
    pub fn with_config(element: E, config: GestureConfig) -> Self {
        Self {
            element,
            session: Session::new(config),
            recognizers: recognizers::default_set(),
            subscriptions: Subscriptions::new(),
            attached: true,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.session.config
    }

    /// Replace the configuration; takes effect from the next frame.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.session.config = config;
    }

    /// The tracked element.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Mutable access to the tracked element; a new bounding box is picked up
    /// when the next session begins.
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Per-contact history of the current session.
    pub fn history(&self) -> &HistoryTracker {
        &self.session.history
    }

    /// Kind of the last gesture emitted, cleared by every start frame.
    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.session.active
    }

    /// Whether `kind` has a subscriber.
    pub fn is_subscribed(&self, kind: GestureKind) -> bool {
        self.subscriptions.is_subscribed(kind)
    }

    /// Subscribe to `kind` without suppressing default actions.
    ///
    /// Replaces any previous subscriber; returns `true` if one was replaced.
    pub fn subscribe(
        &mut self,
        kind: GestureKind,
        callback: impl FnMut(&GestureEvent, &HistoryTracker) + 'static,
    ) -> bool {
        self.subscribe_inner(kind, None, callback)
    }

    /// Subscribe to `kind` and suppress the host's default action according to `suppress`
    /// while `kind` is the active gesture.
    pub fn subscribe_with(
        &mut self,
        kind: GestureKind,
        suppress: SuppressDefault,
        callback: impl FnMut(&GestureEvent, &HistoryTracker) + 'static,
    ) -> bool {
        self.subscribe_inner(kind, Some(suppress), callback)
    }

    /// Subscribe by gesture name, e.g. `"pinch-spread"`.
    pub fn subscribe_named(
        &mut self,
        name: &str,
        suppress: Option<SuppressDefault>,
        callback: impl FnMut(&GestureEvent, &HistoryTracker) + 'static,
    ) -> Result<bool, GestureError> {
        let kind = name.parse()?;
        Ok(self.subscribe_inner(kind, suppress, callback))
    }

    /// Remove the subscriber for `kind`. Returns `true` if there was one.
    pub fn unsubscribe(&mut self, kind: GestureKind) -> bool {
        let removed = self.subscriptions.unsubscribe(kind);
        self.session.subscribed = self.subscriptions.kinds();
        debug!("unsubscribed from {kind}");
        removed
    }

    /// Remove a subscriber by gesture name.
    pub fn unsubscribe_named(&mut self, name: &str) -> Result<bool, GestureError> {
        let kind = name.parse()?;
        Ok(self.unsubscribe(kind))
    }

    fn subscribe_inner(
        &mut self,
        kind: GestureKind,
        suppress: Option<SuppressDefault>,
        callback: impl FnMut(&GestureEvent, &HistoryTracker) + 'static,
    ) -> bool {
        let replaced = self.subscriptions.subscribe(kind, suppress, callback);
        self.session.subscribed = self.subscriptions.kinds();
        debug!("subscribed to {kind} (suppress: {suppress:?}, replaced: {replaced})");
        replaced
    }

    /// Whether the engine is processing frames.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Resume processing frames after [`detach`](Self::detach).
    pub fn attach(&mut self) {
        if !self.attached {
            debug!("gesture engine attached");
        }
        self.attached = true;
    }

    /// Stop processing frames.
    ///
    /// Cancels the pending long-press and drops the session; no callback
    /// fires until the engine is attached again. Subscriptions are kept.
    pub fn detach(&mut self) {
        let subscribed = self.session.subscribed;
        self.session = Session::new(self.session.config);
        self.session.subscribed = subscribed;
        for r in &mut self.recognizers {
            r.reset();
        }
        if self.attached {
            debug!("gesture engine detached");
        }
        self.attached = false;
    }

    /// When the pending long-press falls due, if one is armed.
    pub fn next_deadline(&self) -> Option<f64> {
        if self.attached {
            self.session.press_timer.deadline()
        } else {
            None
        }
    }

    /// Fire the long-press timer if `now` has reached its deadline.
    ///
    /// Returns the kinds recognized, which is either empty or long-press.
    pub fn advance(&mut self, now: f64) -> GestureSet {
        let mut recognized = GestureSet::empty();
        if self.attached {
            self.fire_due(now, &mut recognized);
        }
        recognized
    }

    /// Handle one touch frame.
    ///
    /// A malformed frame is rejected before any state changes, so the session
    /// continues as if it never arrived. Detached engines ignore frames.
    pub fn handle(&mut self, frame: &TouchFrame) -> Result<FrameOutcome, GestureError> {
        if !self.attached {
            return Ok(FrameOutcome::default());
        }
        if let Err(err) = frame.validate(self.session.last_timestamp) {
            warn!("dropping malformed {:?} frame: {err}", frame.phase);
            return Err(err.into());
        }

        let time = frame.timestamp;
        self.session.last_timestamp = Some(time);

        let mut recognized = GestureSet::empty();
        self.fire_due(time, &mut recognized);
        self.session.frame_active = self.session.active;

        match frame.phase {
            FramePhase::Start => self.on_start(&frame.touches, time, &mut recognized),
            FramePhase::Move => self.on_move(&frame.touches, time, &mut recognized),
            FramePhase::End => self.on_end(&frame.touches, time, &mut recognized),
        }

        Ok(FrameOutcome {
            suppress_default: self.suppresses(),
            recognized,
        })
    }

    fn begin_session(&mut self) {
        let origin = self.element.bounding_box().origin();
        self.session.clear();
        self.session.last_angle = None;
        self.session.history.set_origin(origin);
        for r in &mut self.recognizers {
            r.reset();
        }
        debug!("gesture session started, origin {origin:?}");
    }

    fn on_start(&mut self, touches: &[TouchPoint], time: f64, recognized: &mut GestureSet) {
        if self.session.is_idle() {
            self.begin_session();
        }
        let s = &mut self.session;
        s.start_time = time;
        s.rotation.reset();
        s.active = None;
        s.flags.remove(SessionFlags::MOVING);
        if let Some(start) = s.history.track_new(touches, time) {
            s.start = start;
        }
        self.run(FramePhase::Start, touches, time, recognized);
    }

    fn on_move(&mut self, touches: &[TouchPoint], time: f64, recognized: &mut GestureSet) {
        if self.session.is_idle() {
            // Contacts that were already down when the engine attached.
            self.begin_session();
            let s = &mut self.session;
            s.start_time = time;
            if let Some(start) = s.history.track_new(touches, time) {
                s.start = start;
            }
        } else {
            self.session.history.record(touches, time);
        }
        self.session.flags.insert(SessionFlags::MOVING);
        self.run(FramePhase::Move, touches, time, recognized);
    }

    fn on_end(&mut self, remaining: &[TouchPoint], time: f64, recognized: &mut GestureSet) {
        self.run(FramePhase::End, remaining, time, recognized);
        let s = &mut self.session;
        if remaining.is_empty() && !s.is_idle() {
            s.clear();
            debug!("gesture session ended at {time}");
        }
        s.flags.remove(SessionFlags::MOVING);
        s.initial_direction = None;
    }

    fn run(
        &mut self,
        phase: FramePhase,
        touches: &[TouchPoint],
        time: f64,
        recognized: &mut GestureSet,
    ) {
        for r in &mut self.recognizers {
            let session = &mut self.session;
            let event = match phase {
                FramePhase::Start => r.start(session, touches, time),
                FramePhase::Move => r.moved(session, touches, time),
                FramePhase::End => r.end(session, touches, time),
            };
            if let Some(event) = event {
                deliver(
                    &mut self.session,
                    &mut self.subscriptions,
                    &event,
                    time,
                    recognized,
                );
            }
        }
    }

    fn fire_due(&mut self, now: f64, recognized: &mut GestureSet) {
        if let Some(position) = self.session.press_timer.take_due(now) {
            debug!("long-press timer fired at {now}");
            let event = GestureEvent::LongPress(PointEvent { position });
            deliver(
                &mut self.session,
                &mut self.subscriptions,
                &event,
                now,
                recognized,
            );
        }
    }

    fn suppresses(&self) -> bool {
        if self.session.config.suppress_all_defaults {
            return true;
        }
        self.session
            .active
            .and_then(|kind| self.subscriptions.policy(kind))
            .is_some_and(|policy| policy.applies(self.session.last_angle))
    }
}

/// Make `event` the active gesture and hand it to its subscriber.
fn deliver(
    session: &mut Session,
    subscriptions: &mut Subscriptions,
    event: &GestureEvent,
    time: f64,
    recognized: &mut GestureSet,
) {
    let kind = event.kind();
    session.active = Some(kind);
    match event.angle() {
        Some(angle) => session.last_angle = Some(angle),
        None if matches!(
            kind,
            GestureKind::LongPress
                | GestureKind::Rotate
                | GestureKind::PinchSpread
                | GestureKind::DoubleTapAndDrag
        ) =>
        {
            session.last_angle = None;
        }
        None => {}
    }
    recognized.insert(kind.set());
    trace!("recognized {kind} at {time}");
    // Nothing is delivered once the session's histories are gone.
    if !session.is_idle() {
        subscriptions.notify(event, &session.history);
    }
}
