// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subscriptions and default-action suppression.
//!
//! ## Overview
//!
//! Each [`GestureKind`] has at most one subscriber. Subscribing again replaces
//! the previous callback and policy; unsubscribing an empty slot is a no-op.
//!
//! A subscription may carry a [`SuppressDefault`] policy. After each frame the
//! engine asks the policy of the currently active gesture whether the host
//! should prevent its default handling of the input.

use alloc::boxed::Box;

use crate::history::HistoryTracker;
use crate::types::{GestureEvent, GestureKind, GestureSet, SuppressDefault};

/// Subscriber callback: the recognized gesture and the session's per-contact history.
pub type Callback = Box<dyn FnMut(&GestureEvent, &HistoryTracker)>;

struct Subscription {
    callback: Callback,
    suppress: Option<SuppressDefault>,
}

/// One subscriber slot per gesture kind.
pub struct Subscriptions {
    slots: [Option<Subscription>; GestureKind::ALL.len()],
    kinds: GestureSet,
}

impl core::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("kinds", &self.kinds)
            .finish_non_exhaustive()
    }
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriptions {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: [const { None }; GestureKind::ALL.len()],
            kinds: GestureSet::empty(),
        }
    }

    /// Register `callback` for `kind`, replacing any previous subscriber.
    ///
    /// Returns `true` if a previous subscriber was replaced.
    pub fn subscribe(
        &mut self,
        kind: GestureKind,
        suppress: Option<SuppressDefault>,
        callback: impl FnMut(&GestureEvent, &HistoryTracker) + 'static,
    ) -> bool {
        self.kinds.insert(kind.set());
        let callback: Callback = Box::new(callback);
        self.slots[kind.index()]
            .replace(Subscription { callback, suppress })
            .is_some()
    }

    /// Remove the subscriber for `kind`. Returns `true` if there was one.
    pub fn unsubscribe(&mut self, kind: GestureKind) -> bool {
        self.kinds.remove(kind.set());
        self.slots[kind.index()].take().is_some()
    }

    /// Whether `kind` has a subscriber.
    pub fn is_subscribed(&self, kind: GestureKind) -> bool {
        self.kinds.has(kind)
    }

    /// Every kind that currently has a subscriber.
    pub fn kinds(&self) -> GestureSet {
        self.kinds
    }

    /// Suppression policy registered for `kind`, if any.
    pub fn policy(&self, kind: GestureKind) -> Option<SuppressDefault> {
        self.slots[kind.index()].as_ref().and_then(|s| s.suppress)
    }

    /// Invoke the subscriber for the event's kind, if any.
    ///
    /// Returns `true` if a callback ran.
    pub fn notify(&mut self, event: &GestureEvent, history: &HistoryTracker) -> bool {
        match &mut self.slots[event.kind().index()] {
            Some(sub) => {
                (sub.callback)(event, history);
                true
            }
            None => false,
        }
    }
}
