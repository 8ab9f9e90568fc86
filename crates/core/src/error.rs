// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by job and manager operations.

use crate::id::JobId;

/// Failure to stop a job.
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// No job with this id is known to the manager.
    #[error("job {0} not found")]
    NotFound(JobId),

    /// The job is not `Running` — either it hasn't been spawned yet
    /// (`Initializing`) or it has already reached a terminal status.
    /// There is nothing to signal either way.
    #[error("job {0} is not running")]
    NotRunning(JobId),

    /// The signal could not be delivered to the child process.
    #[error("failed to signal job {id}: {source}")]
    Signal {
        id: JobId,
        #[source]
        source: jw_shell::SignalError,
    },
}

/// Failure to attach to a job's output stream.
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    /// No job with this id is known to the manager.
    #[error("job {0} not found")]
    NotFound(JobId),
}
