// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Responses sent from the daemon back to a client.

use jw_core::{JobId, JobStatus};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// A response frame sent back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Handshake acknowledgement.
    Hello { version: String },

    /// Generic success with no payload.
    Ok,

    /// A newly started job's id.
    Started { id: JobId },

    /// A job's current status.
    StatusReport { status: JobStatus },

    /// One chunk of a job's combined output, base64-encoded so it
    /// survives the JSON payload unchanged regardless of content.
    OutputChunk {
        #[serde(with = "base64_bytes")]
        bytes: Vec<u8>,
    },

    /// No further `OutputChunk` frames will follow for this attach.
    EndOfStream,

    /// The request failed.
    Error { kind: ErrorKind, message: String },
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
