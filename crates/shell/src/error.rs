// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while spawning or signalling a child process.

/// Failure to spawn a child process.
#[derive(Debug, thiserror::Error)]
#[error("failed to spawn `{command}`: {source}")]
pub struct SpawnError {
    pub command: String,
    #[source]
    pub source: std::io::Error,
}

/// Failure delivering a POSIX signal to a running child.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// The child has no known pid (already reaped, or never started).
    #[error("process has no pid")]
    NoPid,

    /// The OS refused to deliver the signal.
    #[error("signal delivery failed: {0}")]
    Delivery(#[from] nix::Error),
}
