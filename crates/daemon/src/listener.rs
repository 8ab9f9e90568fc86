// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accepts mTLS connections and adapts each client request into a
//! [`jw_core::JobManager`] call — the "RPC Surface" component from the
//! core specification, made concrete.

use std::sync::Arc;

use async_trait::async_trait;
use jw_core::{AttachError, JobManager, Subscriber, SubscriberGone};
use jw_wire::{ErrorKind, Request, Response, WireError};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex as AsyncMutex;
use tokio_rustls::TlsAcceptor;
use tokio_util::sync::CancellationToken;

/// Protocol version advertised in the `Hello` handshake.
pub use crate::env::PROTOCOL_VERSION;

/// Accepts TCP connections on a bound socket, TLS-wraps each one, and
/// spawns a task per connection to serve it against a shared
/// [`JobManager`].
pub struct Listener {
    tcp: TcpListener,
    acceptor: TlsAcceptor,
    manager: Arc<JobManager>,
}

impl Listener {
    /// Bind `addr` and wrap it with `acceptor` for every accepted
    /// connection.
    pub async fn bind(addr: &str, acceptor: TlsAcceptor, manager: Arc<JobManager>) -> std::io::Result<Self> {
        let tcp = TcpListener::bind(addr).await?;
        Ok(Self { tcp, acceptor, manager })
    }

    /// Accept connections until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("listener shutting down");
                    return;
                }
                accepted = self.tcp.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(pair) => pair,
                        Err(error) => {
                            tracing::warn!(%error, "accept failed");
                            continue;
                        }
                    };

                    let acceptor = self.acceptor.clone();
                    let manager = Arc::clone(&self.manager);
                    tokio::spawn(async move {
                        let tls_stream = match acceptor.accept(stream).await {
                            Ok(stream) => stream,
                            Err(error) => {
                                tracing::warn!(%peer, %error, "TLS handshake failed");
                                return;
                            }
                        };
                        tracing::debug!(%peer, "connection established");
                        serve_connection(tls_stream, manager).await;
                        tracing::debug!(%peer, "connection closed");
                    });
                }
            }
        }
    }
}

/// Serve one connection: read length-prefixed [`Request`] frames,
/// dispatch each against `manager`, and write back [`Response`]
/// frames, until the client disconnects.
///
/// An `Attach` request takes over the connection for the rest of its
/// lifetime — no further requests are read on it — matching §6's "holds
/// the connection open" contract.
pub async fn serve_connection<S>(stream: S, manager: Arc<JobManager>)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut reader, writer) = tokio::io::split(stream);
    let writer = Arc::new(AsyncMutex::new(writer));

    loop {
        let request = match jw_wire::read_request(&mut reader).await {
            Ok(request) => request,
            Err(WireError::Truncated) => return,
            Err(error) => {
                tracing::debug!(%error, "malformed request frame");
                let _ = respond(&writer, &Response::Error {
                    kind: ErrorKind::BadRequest,
                    message: error.to_string(),
                })
                .await;
                return;
            }
        };

        match request {
            Request::Hello { .. } => {
                let response = Response::Hello {
                    version: PROTOCOL_VERSION.to_string(),
                };
                if respond(&writer, &response).await.is_err() {
                    return;
                }
            }

            Request::Start { command, args } => {
                let id = manager.start(command, args);
                if respond(&writer, &Response::Started { id }).await.is_err() {
                    return;
                }
            }

            Request::Status { id } => {
                let status = manager.status(id);
                if respond(&writer, &Response::StatusReport { status }).await.is_err() {
                    return;
                }
            }

            Request::Stop { id } => {
                let response = match manager.stop(id) {
                    Ok(()) => Response::Ok,
                    Err(error) => error_response(&error),
                };
                if respond(&writer, &response).await.is_err() {
                    return;
                }
            }

            Request::Attach { id } => {
                let subscriber = WireSubscriber {
                    writer: Arc::clone(&writer),
                };
                if let Err(AttachError::NotFound(id)) = manager.attach(id, Box::new(subscriber)).await {
                    let _ = respond(&writer, &Response::Error {
                        kind: ErrorKind::NotFound,
                        message: format!("job {id} not found"),
                    })
                    .await;
                }
                // Attach owns the rest of the connection's lifetime,
                // whether it streamed to completion or failed fast.
                return;
            }
        }
    }
}

fn error_response(error: &jw_core::StopError) -> Response {
    let kind = match error {
        jw_core::StopError::NotFound(_) => ErrorKind::NotFound,
        jw_core::StopError::NotRunning(_) => ErrorKind::NotRunning,
        jw_core::StopError::Signal { .. } => ErrorKind::SignalFailed,
    };
    Response::Error {
        kind,
        message: error.to_string(),
    }
}

async fn respond<W>(writer: &Arc<AsyncMutex<W>>, response: &Response) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    let mut guard = writer.lock().await;
    jw_wire::write_response(&mut *guard, response).await
}

/// Adapts a connection's write half into the core [`Subscriber`]
/// contract: each chunk becomes an `OutputChunk` frame, end-of-stream
/// becomes `EndOfStream`, and a write failure (the client went away)
/// is reported back to the job as [`SubscriberGone`] so it stops
/// delivering to it — per §6/§7's `SubscriberGone` handling.
struct WireSubscriber<W> {
    writer: Arc<AsyncMutex<W>>,
}

#[async_trait]
impl<W> Subscriber for WireSubscriber<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, chunk: &[u8]) -> Result<(), SubscriberGone> {
        let response = Response::OutputChunk { bytes: chunk.to_vec() };
        respond(&self.writer, &response).await.map_err(|error| {
            tracing::debug!(%error, "subscriber transport gone");
            SubscriberGone
        })
    }

    async fn end(&mut self) {
        if respond(&self.writer, &Response::EndOfStream).await.is_err() {
            return;
        }
        let mut guard = self.writer.lock().await;
        let _ = guard.shutdown().await;
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
