// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

/// Protocol version advertised in the `Hello` handshake.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the daemon listens on. Defaults to all interfaces, port 7620.
pub fn listen_addr() -> String {
    std::env::var("JW_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:7620".to_string())
}

/// Path to the server's TLS certificate chain (PEM).
pub fn tls_cert_path() -> Result<PathBuf, EnvError> {
    std::env::var("JW_TLS_CERT").map(PathBuf::from).map_err(|_| EnvError::Missing("JW_TLS_CERT"))
}

/// Path to the server's TLS private key (PEM).
pub fn tls_key_path() -> Result<PathBuf, EnvError> {
    std::env::var("JW_TLS_KEY").map(PathBuf::from).map_err(|_| EnvError::Missing("JW_TLS_KEY"))
}

/// Path to the CA bundle used to verify client certificates (mTLS).
pub fn tls_client_ca_path() -> Result<PathBuf, EnvError> {
    std::env::var("JW_TLS_CLIENT_CA")
        .map(PathBuf::from)
        .map_err(|_| EnvError::Missing("JW_TLS_CLIENT_CA"))
}

/// How long a terminal job's output backlog is retained before the
/// retention sweep evicts it. `None` disables eviction entirely.
pub fn job_retention() -> Option<Duration> {
    std::env::var("JW_JOB_RETENTION_SECS").ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_secs)
}

/// Per-job output backlog cap in bytes.
pub fn backlog_cap_bytes() -> usize {
    std::env::var("JW_BACKLOG_CAP_BYTES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(jw_core::DEFAULT_BACKLOG_CAP_BYTES)
}

/// Bounded deadline for draining running jobs on shutdown.
pub fn drain_timeout() -> Duration {
    std::env::var("JW_DRAIN_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}

/// Optional path to a rolling log file. Stderr is always logged to in
/// addition to this.
pub fn log_file() -> Option<PathBuf> {
    std::env::var("JW_LOG_FILE").ok().map(PathBuf::from)
}

/// A required environment variable was not set.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
}
