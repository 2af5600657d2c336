// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the gesture engine.

use alloc::string::String;

use crate::types::{FramePhase, TouchId};

/// Why a frame was rejected.
///
/// A rejected frame is skipped in full: no session state is touched.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameError {
    /// A start or move frame carried no contacts.
    NoContacts(FramePhase),
    /// The timestamp is NaN or infinite.
    NonFiniteTimestamp,
    /// A contact position is NaN or infinite.
    NonFiniteCoordinate {
        /// Offending contact.
        id: TouchId,
    },
    /// The same identifier appears twice in one frame.
    DuplicateContact {
        /// Offending contact.
        id: TouchId,
    },
    /// The frame is older than the last accepted one.
    OutOfOrder {
        /// Timestamp of the last accepted frame.
        previous: f64,
        /// Timestamp of the rejected frame.
        timestamp: f64,
    },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoContacts(phase) => write!(f, "{phase:?} frame has no contacts"),
            Self::NonFiniteTimestamp => f.write_str("frame timestamp is not finite"),
            Self::NonFiniteCoordinate { id } => {
                write!(f, "contact {} has a non-finite position", id.0)
            }
            Self::DuplicateContact { id } => write!(f, "contact {} appears twice", id.0),
            Self::OutOfOrder {
                previous,
                timestamp,
            } => write!(f, "frame at {timestamp} arrived after frame at {previous}"),
        }
    }
}

impl core::error::Error for FrameError {}

/// Errors surfaced by the public API.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureError {
    /// A gesture name did not match any [`GestureKind`](crate::types::GestureKind).
    UnknownGesture(String),
    /// A frame was rejected and skipped.
    MalformedFrame(FrameError),
}

impl core::fmt::Display for GestureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownGesture(name) => write!(f, "unknown gesture `{name}`"),
            Self::MalformedFrame(e) => write!(f, "malformed frame: {e}"),
        }
    }
}

impl core::error::Error for GestureError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::MalformedFrame(e) => Some(e),
            Self::UnknownGesture(_) => None,
        }
    }
}

impl From<FrameError> for GestureError {
    fn from(e: FrameError) -> Self {
        Self::MalformedFrame(e)
    }
}
