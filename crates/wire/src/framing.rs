// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed JSON framing: a 4-byte big-endian length prefix
//! followed by exactly that many bytes of JSON payload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::WireError;
use crate::request::Request;
use crate::response::Response;

/// Largest frame this implementation will read, guarding against a
/// misbehaving or hostile peer claiming an unreasonable payload size.
pub const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

/// Serialize `value` to JSON and write it as one length-prefixed frame.
pub async fn write_frame<W, T>(writer: &mut W, value: &T) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = serde_json::to_vec(value)?;
    let len = u32::try_from(payload.len()).map_err(|_| WireError::FrameTooLarge(u32::MAX))?;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed frame and deserialize it as JSON.
pub async fn read_frame<R, T>(reader: &mut R) -> Result<T, WireError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_bytes = [0u8; 4];
    match reader.read_exact(&mut len_bytes).await {
        Ok(_) => {}
        Err(error) if error.kind() == std::io::ErrorKind::UnexpectedEof => return Err(WireError::Truncated),
        Err(error) => return Err(WireError::Io(error)),
    }
    let len = u32::from_be_bytes(len_bytes);
    if len > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge(len));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await.map_err(|error| {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            WireError::Truncated
        } else {
            WireError::Io(error)
        }
    })?;

    Ok(serde_json::from_slice(&payload)?)
}

/// Read one [`Request`] frame.
pub async fn read_request<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Request, WireError> {
    read_frame(reader).await
}

/// Write one [`Response`] frame.
pub async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<(), WireError> {
    write_frame(writer, response).await
}

/// Read one [`Response`] frame.
pub async fn read_response<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Response, WireError> {
    read_frame(reader).await
}

/// Write one [`Request`] frame.
pub async fn write_request<W: AsyncWrite + Unpin>(writer: &mut W, request: &Request) -> Result<(), WireError> {
    write_frame(writer, request).await
}

#[cfg(test)]
#[path = "framing_tests.rs"]
mod tests;
