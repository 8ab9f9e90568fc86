// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IPC protocol between `jw-cli` and `jw-daemon`.
//!
//! Wire format: a 4-byte big-endian length prefix followed by exactly
//! that many bytes of JSON payload.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod framing;
mod request;
mod response;

pub use error::{ErrorKind, WireError};
pub use framing::{read_request, read_response, write_request, write_response, MAX_FRAME_LEN};
pub use request::Request;
pub use response::Response;
