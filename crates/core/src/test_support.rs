// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only [`Subscriber`] implementation and proptest strategies,
//! gated behind `cfg(test)` or the `test-support` feature so other
//! crates' tests can reuse them without pulling test code into release
//! builds.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::subscriber::{Subscriber, SubscriberGone};

/// Captures every chunk delivered to it, plus whether `end()` was
/// called, for assertion after the fact.
#[derive(Clone, Default)]
pub struct CollectingSubscriber {
    inner: Arc<Mutex<Collected>>,
}

#[derive(Default)]
struct Collected {
    chunks: Vec<Vec<u8>>,
    ended: bool,
}

impl CollectingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// All chunks received so far, concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).chunks.concat()
    }

    /// Whether `end()` has been called yet.
    pub fn is_ended(&self) -> bool {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).ended
    }
}

#[async_trait]
impl Subscriber for CollectingSubscriber {
    async fn send(&mut self, chunk: &[u8]) -> Result<(), SubscriberGone> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).chunks.push(chunk.to_vec());
        Ok(())
    }

    async fn end(&mut self) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).ended = true;
    }
}

/// A subscriber whose `send` always fails, simulating a transport that
/// is gone before it ever receives a byte.
#[derive(Clone, Default)]
pub struct GoneSubscriber;

#[async_trait]
impl Subscriber for GoneSubscriber {
    async fn send(&mut self, _chunk: &[u8]) -> Result<(), SubscriberGone> {
        Err(SubscriberGone)
    }

    async fn end(&mut self) {}
}
