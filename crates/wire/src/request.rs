// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Requests sent from a client to the daemon.

use jw_core::JobId;
use serde::{Deserialize, Serialize};

/// A request frame sent to the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Protocol handshake, sent once at the start of a connection.
    Hello { version: String },

    /// Spawn a new job.
    Start { command: String, args: Vec<String> },

    /// Look up a job's current status.
    Status { id: JobId },

    /// Request that a job stop.
    Stop { id: JobId },

    /// Attach to a job's combined output stream. Holds the connection
    /// open: the daemon replies with `OutputChunk` frames followed by
    /// `EndOfStream`.
    Attach { id: JobId },
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
