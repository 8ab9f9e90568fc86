// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The push side of output fan-out.

use async_trait::async_trait;

/// Receives a job's combined stdout/stderr stream, chunk by chunk.
///
/// Implementations are the transport side of an attached client (a TLS
/// connection in the daemon, an in-memory collector in tests). `send`
/// is called for every backlog chunk at registration time and for every
/// chunk produced afterward; `end` is called exactly once, when the job
/// reaches a terminal status, after which no further `send` calls occur.
///
/// `send` returning `Err` means the downstream is gone (the transport
/// was torn down) — the job stops delivering to this subscriber and
/// never calls `end` on it. This is the only unregistration path
/// besides the job itself reaching a terminal status.
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// Deliver one chunk of output. An `Err` return unregisters this
    /// subscriber; no further calls follow.
    async fn send(&mut self, chunk: &[u8]) -> Result<(), SubscriberGone>;

    /// Signal that the job has finished and no more chunks will arrive.
    async fn end(&mut self);
}

/// The subscriber's transport is gone; stop delivering to it.
///
/// Carries no detail — the daemon logs the underlying I/O error itself
/// before returning this, and the core only needs to know to stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriberGone;
