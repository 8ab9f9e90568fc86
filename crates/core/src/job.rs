// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single running (or finished) job: the process supervisor, its
//! output fan-out, and the stop/attach/status surface built on top.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::AsyncReadExt;
use tokio::process::{ChildStderr, ChildStdout};
use tokio::sync::{mpsc, Notify};

use crate::error::StopError;
use crate::fanout::{Chunk, JobState, StreamEvent, DEFAULT_QUEUE_BOUND};
use crate::id::JobId;
use crate::status::JobStatus;
use crate::subscriber::Subscriber;

/// Default grace period between a requested `SIGTERM` and an escalating
/// `SIGKILL` for a job that has not exited on its own.
pub const DEFAULT_KILL_TIMEOUT: Duration = Duration::from_secs(10);

struct JobInner {
    state: Mutex<JobState>,
    completed: Notify,
    kill_timeout: Duration,
}

/// A job: one spawned child process, its combined output, and the
/// bookkeeping needed to report status and stream output to any number
/// of attachers.
///
/// Always held behind an `Arc` once started — the supervisor task,
/// every attached subscriber's forwarding loop, and the manager's
/// registry all share ownership.
pub struct Job {
    id: JobId,
    inner: Arc<JobInner>,
}

impl Job {
    /// Spawn `command` with `args` and return a handle to the new job
    /// immediately; the child process is launched on a background task,
    /// so a job is briefly `Initializing` even on success.
    pub fn start(command: String, args: Vec<String>, backlog_cap: usize, kill_timeout: Duration) -> Arc<Self> {
        let job = Arc::new(Self {
            id: JobId::new(),
            inner: Arc::new(JobInner {
                state: Mutex::new(JobState::new(backlog_cap)),
                completed: Notify::new(),
                kill_timeout,
            }),
        });

        let supervisor = Arc::clone(&job);
        tokio::spawn(async move { supervisor.run(command, args).await });

        job
    }

    /// This job's identifier.
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Current status, read under the job's lock.
    pub fn status(&self) -> JobStatus {
        self.inner.state.lock().status
    }

    /// Resolve once this job reaches a terminal status, returning it.
    ///
    /// `finish()` signals completion with `notify_waiters()`, which (unlike
    /// `notify_one()`) stores no permit — it only wakes futures already
    /// registered in the waiter list. A `Notified` future doesn't register
    /// until its first poll, so merely creating it before the status check
    /// is not enough to avoid a missed wakeup; it must be `enable()`d (which
    /// registers it immediately) before the check runs.
    pub async fn wait_until_terminal(&self) -> JobStatus {
        loop {
            let notified = self.inner.completed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let state = self.inner.state.lock();
                if state.status.is_terminal() {
                    return state.status;
                }
            }

            notified.await;
        }
    }

    /// Request that this job stop. Fails with [`StopError::NotRunning`]
    /// unless the job is currently `Running` — this covers both
    /// `Initializing` (nothing has been spawned to signal yet) and any
    /// terminal status, matching it makes Stop idempotent: once a job is
    /// terminal, every subsequent call returns the same error. Idempotent
    /// in the other direction too — a second call while the first
    /// `SIGTERM` is still pending returns `Ok(())` without resending.
    pub fn stop(self: &Arc<Self>) -> Result<(), StopError> {
        let (pid, already_requested) = {
            let mut state = self.inner.state.lock();
            if state.status != JobStatus::Running {
                return Err(StopError::NotRunning(self.id));
            }
            let already_requested = state.stop_requested;
            state.stop_requested = true;
            (state.pid, already_requested)
        };

        if already_requested {
            return Ok(());
        }

        if let Some(pid) = pid {
            jw_shell::terminate_pid(pid).map_err(|source| StopError::Signal { id: self.id, source })?;
            self.spawn_kill_escalation(pid);
        }

        Ok(())
    }

    /// Snapshot the backlog, deliver it, then stream subsequent output
    /// to `subscriber` until the job ends. Runs until the subscriber has
    /// seen `end()` — callers that want attach to not block the caller
    /// should spawn this as its own task.
    pub async fn attach(self: &Arc<Self>, mut subscriber: Box<dyn Subscriber>) {
        let (backlog, already_terminal, mut rx) = {
            let mut state = self.inner.state.lock();
            let backlog = state.backlog.clone();
            let already_terminal = state.status.is_terminal();
            let rx = if already_terminal {
                None
            } else {
                let (tx, rx) = mpsc::channel(DEFAULT_QUEUE_BOUND);
                state.register(tx);
                Some(rx)
            };
            (backlog, already_terminal, rx)
        };

        if !backlog.is_empty() && subscriber.send(&backlog).await.is_err() {
            // Transport already gone before we even finished the
            // snapshot reply; drop `rx` (if any) and stop — there is
            // no `end()` call for a subscriber that never got to see
            // one, per the contract.
            return;
        }

        let Some(rx) = rx.as_mut() else {
            subscriber.end().await;
            return;
        };

        // The channel closing without an explicit `End` ever arriving
        // (e.g. it was dropped for being full right as the job finished)
        // must still surface as end-of-stream, so `end()` is called
        // once unconditionally after the loop rather than only on the
        // `End` branch.
        while let Some(event) = rx.recv().await {
            match event {
                StreamEvent::Data(chunk) => {
                    if subscriber.send(&chunk).await.is_err() {
                        return;
                    }
                }
                StreamEvent::End => break,
            }
        }
        subscriber.end().await;
    }

    async fn run(self: Arc<Self>, command: String, args: Vec<String>) {
        let mut child = match jw_shell::spawn(&command, &args) {
            Ok(child) => child,
            Err(error) => {
                tracing::warn!(job_id = %self.id, %error, "job failed to spawn");
                self.finish(JobStatus::Error);
                return;
            }
        };

        let pid = child.pid();
        {
            let mut state = self.inner.state.lock();
            state.pid = pid;
            state.status = JobStatus::Running;
        }

        let stdout = child.take_stdout();
        let stderr = child.take_stderr();
        self.read_output(stdout, stderr).await;

        let exit = child.wait().await;

        let status = {
            let state = self.inner.state.lock();
            if state.stop_requested {
                JobStatus::Stopped
            } else {
                match exit {
                    Ok(exit_status) if exit_status.success() => JobStatus::Done,
                    _ => JobStatus::Error,
                }
            }
        };
        self.finish(status);
    }

    /// Read stdout and stderr concurrently, publishing each chunk as it
    /// arrives, in whatever order the two streams produce it. Each arm
    /// reads into its own buffer — sharing one buffer across both
    /// `select!` branches would require two simultaneous mutable
    /// borrows of it.
    async fn read_output(&self, mut stdout: Option<ChildStdout>, mut stderr: Option<ChildStderr>) {
        let mut out_buf = [0u8; 4096];
        let mut err_buf = [0u8; 4096];

        loop {
            if stdout.is_none() && stderr.is_none() {
                break;
            }

            tokio::select! {
                chunk = read_chunk(&mut stdout, &mut out_buf), if stdout.is_some() => {
                    match chunk {
                        Some(chunk) => self.publish(chunk),
                        None => stdout = None,
                    }
                }
                chunk = read_chunk(&mut stderr, &mut err_buf), if stderr.is_some() => {
                    match chunk {
                        Some(chunk) => self.publish(chunk),
                        None => stderr = None,
                    }
                }
            }
        }
    }

    fn publish(&self, chunk: Chunk) {
        let mut state = self.inner.state.lock();
        state.push_backlog(&chunk);
        state.fan_out(&chunk);
    }

    fn finish(&self, status: JobStatus) {
        {
            let mut state = self.inner.state.lock();
            state.status = status;
            state.fan_out_end();
        }
        self.inner.completed.notify_waiters();
    }

    fn spawn_kill_escalation(self: &Arc<Self>, pid: u32) {
        let job = Arc::clone(self);
        let timeout = job.inner.kill_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let terminal = job.inner.state.lock().status.is_terminal();
            if !terminal {
                if let Err(error) = jw_shell::kill_pid(pid) {
                    tracing::warn!(job_id = %job.id, %error, "failed to escalate stop to SIGKILL");
                }
            }
        });
    }
}

async fn read_chunk<R>(stream: &mut Option<R>, buf: &mut [u8]) -> Option<Chunk>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let reader = stream.as_mut()?;
    match reader.read(buf).await {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(buf[..n].to_vec()),
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
