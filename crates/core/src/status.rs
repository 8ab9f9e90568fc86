// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle status.

use serde::{Deserialize, Serialize};

/// Where a job stands in its lifecycle.
///
/// `Initializing` and `Running` are transient; `Done`, `Stopped`, and
/// `Error` are terminal — once reached, a job's status never changes
/// again. `NotFound` is a sentinel returned by lookups for an identifier
/// the manager has never seen or has since evicted; it is never stored
/// on a job itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted, the child process has not yet been spawned.
    Initializing,
    /// The child process is running.
    Running,
    /// The child exited with status code 0 and was not stopped.
    Done,
    /// The job was stopped by request before the child exited on its own.
    Stopped,
    /// The child exited with a nonzero status, was killed by a signal it
    /// did not request, or failed to spawn at all.
    Error,
    /// No job with the requested identifier is known to the manager.
    NotFound,
}

impl JobStatus {
    /// Whether this status is final — no further transition will occur.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Stopped | Self::Error)
    }
}

crate::simple_display! {
    JobStatus {
        Initializing => "initializing",
        Running => "running",
        Done => "done",
        Stopped => "stopped",
        Error => "error",
        NotFound => "not_found",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
