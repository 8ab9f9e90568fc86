// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds surfaced to a client over the wire, and the framing
//! errors that never make it that far.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of an `Error` response, so a client can branch on it
/// without string-matching `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The requested job id is not known to the daemon.
    NotFound,
    /// The job is not `Running` — either it hasn't started yet or it
    /// has already reached a terminal status.
    NotRunning,
    /// Delivering a stop signal to the child process failed.
    SignalFailed,
    /// The request could not be decoded or was malformed.
    BadRequest,
    /// An attached subscriber's connection was lost mid-stream.
    SubscriberGone,
    /// Anything else.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not_found",
            Self::NotRunning => "not_running",
            Self::SignalFailed => "signal_failed",
            Self::BadRequest => "bad_request",
            Self::SubscriberGone => "subscriber_gone",
            Self::Internal => "internal",
        })
    }
}

/// Failure to read or write a length-prefixed frame.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The declared frame length exceeds [`crate::MAX_FRAME_LEN`].
    #[error("frame of {0} bytes exceeds the {max} byte limit", max = crate::MAX_FRAME_LEN)]
    FrameTooLarge(u32),

    /// The connection closed before a full frame was read.
    #[error("connection closed mid-frame")]
    Truncated,

    /// The payload did not decode as valid JSON for the expected type.
    #[error("malformed frame payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
