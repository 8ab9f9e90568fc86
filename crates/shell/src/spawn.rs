// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child process spawning.
//!
//! Commands are never interpreted by a shell: `command` is resolved via the
//! host's `PATH` lookup rules and `args` are passed verbatim as separate
//! argv entries. Working directory and environment are inherited from this
//! process. No stdin is wired up to the child.

use std::process::{ExitStatus, Stdio};

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use crate::error::{SignalError, SpawnError};

/// A running (or already-exited) child process.
///
/// Owns the `tokio::process::Child` handle. Stdout/stderr pipes are taken
/// once by the caller (the output reader) and the handle itself is kept
/// around so the supervisor can `wait()` on it and signal it.
pub struct ChildHandle {
    child: Child,
    pid: Option<u32>,
}

impl ChildHandle {
    /// Take the child's stdout pipe. Returns `None` if already taken.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Take the child's stderr pipe. Returns `None` if already taken.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// OS process id, if the child is (or was) running.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Send `SIGTERM` to the child. Idempotent at the OS level — a second
    /// call after the process has already exited surfaces as an error from
    /// the kernel, which callers should treat as "already gone", not fatal.
    pub fn terminate(&self) -> Result<(), SignalError> {
        send_signal(self.pid, Signal::SIGTERM)
    }

    /// Wait for the child to exit, reaping it.
    pub async fn wait(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait().await
    }
}

fn send_signal(pid: Option<u32>, signal: Signal) -> Result<(), SignalError> {
    let pid = pid.ok_or(SignalError::NoPid)?;
    signal::kill(Pid::from_raw(pid as i32), signal).map_err(SignalError::Delivery)
}

/// Send `SIGTERM` to a process by pid, independent of any `ChildHandle`.
///
/// Used by callers that only have the pid on hand (the supervisor task owns
/// the `ChildHandle` itself; the stop path signals it by id instead).
pub fn terminate_pid(pid: u32) -> Result<(), SignalError> {
    send_signal(Some(pid), Signal::SIGTERM)
}

/// Send `SIGKILL` to a process by pid, independent of any `ChildHandle`.
pub fn kill_pid(pid: u32) -> Result<(), SignalError> {
    send_signal(Some(pid), Signal::SIGKILL)
}

/// Spawn `command` with `args`, piping stdout and stderr for capture.
pub fn spawn(command: &str, args: &[String]) -> Result<ChildHandle, SpawnError> {
    let mut process = Command::new(command);
    process.args(args);
    process.stdin(Stdio::null());
    process.stdout(Stdio::piped());
    process.stderr(Stdio::piped());

    let child = process.spawn().map_err(|source| SpawnError {
        command: command.to_string(),
        source,
    })?;
    let pid = child.id();

    Ok(ChildHandle { child, pid })
}
