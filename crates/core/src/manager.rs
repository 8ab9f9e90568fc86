// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job registry: looks jobs up by id and owns their lifetime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::{AttachError, StopError};
use crate::fanout::DEFAULT_BACKLOG_CAP_BYTES;
use crate::id::JobId;
use crate::job::{Job, DEFAULT_KILL_TIMEOUT};
use crate::status::JobStatus;
use crate::subscriber::Subscriber;

struct Entry {
    job: Arc<Job>,
    /// Set once the job reaches a terminal status, used by the retention
    /// sweep to decide what's old enough to evict.
    terminal_since: Option<Instant>,
}

/// Registry of jobs keyed by id.
///
/// Holds one lock across map operations only — never across a job's own
/// lock or any `.await` point, so a slow attacher or a stuck child
/// process can never stall a lookup of an unrelated job.
pub struct JobManager {
    entries: Arc<Mutex<HashMap<JobId, Entry>>>,
    backlog_cap: usize,
    kill_timeout: Duration,
    retention: Option<Duration>,
}

impl JobManager {
    /// A manager with the default backlog cap and kill timeout, and no
    /// retention policy — terminal jobs are kept until the process
    /// exits or [`JobManager::sweep_terminal`] is called explicitly.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            backlog_cap: DEFAULT_BACKLOG_CAP_BYTES,
            kill_timeout: DEFAULT_KILL_TIMEOUT,
            retention: None,
        }
    }

    // `retention`: evict terminal jobs whose completion predates this
    // window, checked lazily by `sweep_terminal`.
    // `backlog_cap`: override the per-job output backlog cap.
    crate::setters! {
        option {
            retention: Duration,
        }
        set {
            backlog_cap: usize,
        }
    }

    /// Start a new job, registering it under a fresh id.
    ///
    /// Opportunistically sweeps evictable terminal jobs first, so a
    /// retention policy bounds registry growth without a background
    /// timer task.
    pub fn start(&self, command: String, args: Vec<String>) -> JobId {
        self.sweep_terminal();

        let job = Job::start(command, args, self.backlog_cap, self.kill_timeout);
        let id = job.id();

        let tracked = Arc::clone(&job);
        let entries = Arc::clone(&self.entries);
        tokio::spawn(async move {
            tracked.wait_until_terminal().await;
            if let Some(entry) = entries.lock().get_mut(&tracked.id()) {
                entry.terminal_since = Some(Instant::now());
            }
        });

        self.entries.lock().insert(
            id,
            Entry {
                job,
                terminal_since: None,
            },
        );
        id
    }

    /// Status of a job, or [`JobStatus::NotFound`] if `id` is unknown.
    ///
    /// Infallible by design — this mirrors the sentinel treatment of
    /// `NotFound` as just another status value, rather than an error,
    /// since a lookup has no other failure mode.
    pub fn status(&self, id: JobId) -> JobStatus {
        match self.entries.lock().get(&id) {
            Some(entry) => entry.job.status(),
            None => JobStatus::NotFound,
        }
    }

    /// Request that a job stop.
    pub fn stop(&self, id: JobId) -> Result<(), StopError> {
        let job = self.lookup_for_stop(id)?;
        job.stop()
    }

    /// Attach to a job's output. Resolves once the subscriber has
    /// received the backlog, any live output, and the end-of-stream
    /// signal — callers that must not block should spawn this.
    pub async fn attach(&self, id: JobId, subscriber: Box<dyn Subscriber>) -> Result<(), AttachError> {
        let job = {
            let entries = self.entries.lock();
            entries.get(&id).map(|entry| Arc::clone(&entry.job))
        }
        .ok_or(AttachError::NotFound(id))?;

        job.attach(subscriber).await;
        Ok(())
    }

    /// Stop every non-terminal job and wait for each to reach a
    /// terminal status, bounded by `deadline`. Jobs still alive past the
    /// deadline are logged and left running; the caller (the daemon's
    /// shutdown path) decides what to do about that.
    pub async fn shutdown(&self, deadline: Duration) {
        let jobs: Vec<Arc<Job>> = self.entries.lock().values().map(|entry| Arc::clone(&entry.job)).collect();

        for job in &jobs {
            match job.stop() {
                Ok(()) | Err(StopError::NotRunning(_)) => {}
                Err(error) => tracing::warn!(job_id = %job.id(), %error, "failed to stop job during shutdown"),
            }
        }

        let drain = async {
            for job in &jobs {
                job.wait_until_terminal().await;
            }
        };

        if tokio::time::timeout(deadline, drain).await.is_err() {
            for job in &jobs {
                if !job.status().is_terminal() {
                    tracing::warn!(job_id = %job.id(), "job still running past shutdown deadline");
                }
            }
        }
    }

    /// Remove terminal jobs whose completion predates the retention
    /// window. A no-op if no retention policy was configured.
    pub fn sweep_terminal(&self) {
        let Some(retention) = self.retention else {
            return;
        };

        let now = Instant::now();
        self.entries.lock().retain(|_, entry| match entry.terminal_since {
            Some(since) => now.duration_since(since) < retention,
            None => true,
        });
    }

    fn lookup_for_stop(&self, id: JobId) -> Result<Arc<Job>, StopError> {
        self.entries
            .lock()
            .get(&id)
            .map(|entry| Arc::clone(&entry.job))
            .ok_or(StopError::NotFound(id))
    }
}

impl Default for JobManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
