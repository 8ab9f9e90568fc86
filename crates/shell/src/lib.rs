// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-shell: child-process spawning primitives for the job runtime.
//!
//! Deliberately does not interpret its input as a shell script — no AST,
//! no lexer, no word splitting or globbing. `command` is an executable
//! name/path resolved via `PATH`, `args` are passed through verbatim.

mod error;
mod spawn;

pub use error::{SignalError, SpawnError};
pub use spawn::{kill_pid, spawn, terminate_pid, ChildHandle};

#[cfg(test)]
mod spawn_tests;
