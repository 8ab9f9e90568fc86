// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `DaemonClient`: dials the daemon's mTLS listener and exchanges
//! length-prefixed [`jw_wire::Request`]/[`jw_wire::Response`] frames.

use std::path::Path;
use std::sync::Arc;

use jw_core::{JobId, JobStatus};
use jw_wire::{read_response, write_request, Request, Response};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

/// Failure talking to the daemon.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid TLS client configuration: {0}")]
    Tls(#[from] TlsClientConfigError),

    #[error("could not connect to daemon at {addr}: {source}")]
    Connect { addr: String, source: std::io::Error },

    #[error("TLS handshake with daemon failed: {0}")]
    Handshake(#[source] std::io::Error),

    #[error("wire protocol error: {0}")]
    Wire(#[from] jw_wire::WireError),

    #[error("daemon reported an error ({kind}): {message}")]
    Daemon { kind: jw_wire::ErrorKind, message: String },

    #[error("daemon sent an unexpected response for this request")]
    UnexpectedResponse,
}

impl ClientError {
    /// A distinct process exit code this failure warrants, beyond the
    /// CLI's default of 1 — so a caller scripting `jw` can branch on
    /// "job doesn't exist" vs. "job isn't running" without parsing
    /// stderr. `None` for failures that don't need their own code.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ClientError::Daemon { kind, .. } => match kind {
                jw_wire::ErrorKind::NotFound => Some(2),
                jw_wire::ErrorKind::NotRunning => Some(3),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A connection to `jwd`, authenticated via a client certificate.
pub struct DaemonClient {
    stream: TlsStream<TcpStream>,
}

impl DaemonClient {
    /// Dial `addr` and complete the mTLS handshake, presenting
    /// `client_cert`/`client_key` and trusting `server_ca`.
    pub async fn connect(
        addr: &str,
        server_name: &str,
        client_cert: &Path,
        client_key: &Path,
        server_ca: &Path,
    ) -> Result<Self, ClientError> {
        let connector = client_connector(client_cert, client_key, server_ca)?;

        let tcp = TcpStream::connect(addr).await.map_err(|source| ClientError::Connect {
            addr: addr.to_string(),
            source,
        })?;

        let server_name = ServerName::try_from(server_name.to_string())
            .map_err(|error| ClientError::Handshake(std::io::Error::new(std::io::ErrorKind::InvalidInput, error)))?;

        let stream = connector.connect(server_name, tcp).await.map_err(ClientError::Handshake)?;

        Ok(Self { stream })
    }

    /// Start a new job and return its id.
    pub async fn start(&mut self, command: String, args: Vec<String>) -> Result<JobId, ClientError> {
        match self.roundtrip(&Request::Start { command, args }).await? {
            Response::Started { id } => Ok(id),
            Response::Error { kind, message } => Err(ClientError::Daemon { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Look up a job's current status.
    pub async fn status(&mut self, id: JobId) -> Result<JobStatus, ClientError> {
        match self.roundtrip(&Request::Status { id }).await? {
            Response::StatusReport { status } => Ok(status),
            Response::Error { kind, message } => Err(ClientError::Daemon { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Request that a job stop.
    pub async fn stop(&mut self, id: JobId) -> Result<(), ClientError> {
        match self.roundtrip(&Request::Stop { id }).await? {
            Response::Ok => Ok(()),
            Response::Error { kind, message } => Err(ClientError::Daemon { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Attach to a job's output, invoking `on_chunk` for every byte
    /// chunk received until the daemon signals end-of-stream.
    pub async fn attach(&mut self, id: JobId, mut on_chunk: impl FnMut(&[u8])) -> Result<(), ClientError> {
        write_request(&mut self.stream, &Request::Attach { id }).await?;

        loop {
            match read_response(&mut self.stream).await? {
                Response::OutputChunk { bytes } => on_chunk(&bytes),
                Response::EndOfStream => return Ok(()),
                Response::Error { kind, message } => return Err(ClientError::Daemon { kind, message }),
                _ => return Err(ClientError::UnexpectedResponse),
            }
        }
    }

    async fn roundtrip(&mut self, request: &Request) -> Result<Response, ClientError> {
        write_request(&mut self.stream, request).await?;
        Ok(read_response(&mut self.stream).await?)
    }
}

/// Failure building the client's TLS configuration.
#[derive(Debug, thiserror::Error)]
pub enum TlsClientConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} contains no usable certificates")]
    NoCertificates { path: String },

    #[error("{path} contains no usable private key")]
    NoPrivateKey { path: String },

    #[error("invalid TLS configuration: {0}")]
    Rustls(#[from] rustls::Error),
}

fn client_connector(cert_path: &Path, key_path: &Path, server_ca_path: &Path) -> Result<TlsConnector, TlsClientConfigError> {
    let certs = load_certs(cert_path)?;
    let key = load_private_key(key_path)?;

    let mut server_roots = RootCertStore::empty();
    for cert in load_certs(server_ca_path)? {
        let _ = server_roots.add(cert);
    }

    let config = ClientConfig::builder()
        .with_root_certificates(server_roots)
        .with_client_auth_cert(certs, key)?;

    Ok(TlsConnector::from(Arc::new(config)))
}

fn load_certs(path: &Path) -> Result<Vec<rustls::pki_types::CertificateDer<'static>>, TlsClientConfigError> {
    let bytes = std::fs::read(path).map_err(|source| TlsClientConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let certs: Vec<_> = rustls_pemfile::certs(&mut bytes.as_slice()).filter_map(Result::ok).collect();
    if certs.is_empty() {
        return Err(TlsClientConfigError::NoCertificates {
            path: path.display().to_string(),
        });
    }
    Ok(certs)
}

fn load_private_key(path: &Path) -> Result<rustls::pki_types::PrivateKeyDer<'static>, TlsClientConfigError> {
    let bytes = std::fs::read(path).map_err(|source| TlsClientConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    rustls_pemfile::private_key(&mut bytes.as_slice())
        .ok()
        .flatten()
        .ok_or_else(|| TlsClientConfigError::NoPrivateKey {
            path: path.display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_not_running_get_their_own_exit_code() {
        let not_found = ClientError::Daemon {
            kind: jw_wire::ErrorKind::NotFound,
            message: "job not found".to_string(),
        };
        let not_running = ClientError::Daemon {
            kind: jw_wire::ErrorKind::NotRunning,
            message: "job not running".to_string(),
        };
        assert_eq!(not_found.exit_code(), Some(2));
        assert_eq!(not_running.exit_code(), Some(3));
    }

    #[test]
    fn other_daemon_failures_use_the_default_exit_code() {
        let signal_failed = ClientError::Daemon {
            kind: jw_wire::ErrorKind::SignalFailed,
            message: "kill(2) failed".to_string(),
        };
        assert_eq!(signal_failed.exit_code(), None);
    }

    #[test]
    fn connection_failures_use_the_default_exit_code() {
        let err = ClientError::Connect {
            addr: "127.0.0.1:7620".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(err.exit_code(), None);
    }
}
