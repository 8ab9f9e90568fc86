// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared state behind a [`crate::Job`]'s lock, and the bookkeeping used
//! to fan a single output stream out to many subscribers.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::status::JobStatus;

/// One chunk of combined stdout/stderr output.
pub type Chunk = Vec<u8>;

/// Default bound on a subscriber's outgoing queue.
///
/// Chosen to absorb a burst of output between two reads of a slow
/// consumer without growing unbounded; once full, further chunks for
/// that subscriber are dropped rather than blocking the job.
pub const DEFAULT_QUEUE_BOUND: usize = 32;

/// Default cap, in bytes, on how much backlog a job retains for
/// late attachers.
pub const DEFAULT_BACKLOG_CAP_BYTES: usize = 8 * 1024 * 1024;

/// An event pushed down a subscriber's channel.
pub(crate) enum StreamEvent {
    /// A chunk of output.
    Data(Chunk),
    /// The job has reached a terminal status; no further `Data` follows.
    End,
}

/// Mutable state shared by a job's supervisor task and every caller
/// that reads its status or attaches to its output.
///
/// Guarded by a single `parking_lot::Mutex` in [`crate::Job`] so that a
/// new subscriber's backlog snapshot and its registration happen under
/// one critical section — the invariant that makes attach gap-free and
/// duplicate-free.
pub(crate) struct JobState {
    pub status: JobStatus,
    pub backlog: Vec<u8>,
    pub backlog_cap: usize,
    pub subscribers: HashMap<u64, mpsc::Sender<StreamEvent>>,
    pub next_handle: u64,
    pub stop_requested: bool,
    /// OS pid of the spawned child, set once the supervisor has spawned
    /// it. `None` while `Initializing` and also after the child has been
    /// reaped — the last observed pid is enough for signal delivery, so
    /// it is never cleared on exit.
    pub pid: Option<u32>,
}

impl JobState {
    pub fn new(backlog_cap: usize) -> Self {
        Self {
            status: JobStatus::Initializing,
            backlog: Vec::new(),
            backlog_cap,
            subscribers: HashMap::new(),
            next_handle: 0,
            stop_requested: false,
            pid: None,
        }
    }

    /// Append to the backlog, truncating from the front if it would
    /// exceed the cap. Subscribers already registered keep whatever
    /// they were already queued; this only affects what a *future*
    /// attacher sees as history.
    pub fn push_backlog(&mut self, chunk: &[u8]) {
        self.backlog.extend_from_slice(chunk);
        if self.backlog.len() > self.backlog_cap {
            let excess = self.backlog.len() - self.backlog_cap;
            self.backlog.drain(..excess);
        }
    }

    /// Register a subscriber channel. No handle is returned: cleanup is
    /// automatic — once a subscriber's receiver is dropped, the next
    /// `fan_out` observes its sender as closed and drops it from the
    /// map, without ever walking the backlog.
    pub fn register(&mut self, sender: mpsc::Sender<StreamEvent>) {
        self.next_handle += 1;
        self.subscribers.insert(self.next_handle, sender);
    }

    /// Push a chunk to every registered subscriber, dropping it for
    /// any whose queue is full rather than blocking.
    pub fn fan_out(&mut self, chunk: &Chunk) {
        self.subscribers
            .retain(|_, tx| tx.try_send(StreamEvent::Data(chunk.clone())).is_ok() || !tx.is_closed());
    }

    /// Notify every subscriber that the stream has ended, then drop
    /// them all — no further fan-out will occur for this job.
    pub fn fan_out_end(&mut self) {
        for (_, tx) in self.subscribers.drain() {
            let _ = tx.try_send(StreamEvent::End);
        }
    }
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
