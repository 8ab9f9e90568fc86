// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for connecting to `jwd`.

use std::path::PathBuf;

/// `host:port` of the daemon to connect to.
pub fn daemon_addr() -> String {
    std::env::var("JW_DAEMON_ADDR").unwrap_or_else(|_| "127.0.0.1:7620".to_string())
}

/// The name verified against the daemon's certificate (SNI + hostname
/// verification). Defaults to the host half of [`daemon_addr`].
pub fn server_name() -> String {
    std::env::var("JW_SERVER_NAME").unwrap_or_else(|_| {
        daemon_addr().rsplit_once(':').map(|(host, _)| host.to_string()).unwrap_or_else(|| "localhost".to_string())
    })
}

/// Path to this client's certificate (PEM), presented during the mTLS
/// handshake.
pub fn client_cert_path() -> Result<PathBuf, EnvError> {
    std::env::var("JW_TLS_CLIENT_CERT").map(PathBuf::from).map_err(|_| EnvError::Missing("JW_TLS_CLIENT_CERT"))
}

/// Path to this client's private key (PEM).
pub fn client_key_path() -> Result<PathBuf, EnvError> {
    std::env::var("JW_TLS_CLIENT_KEY").map(PathBuf::from).map_err(|_| EnvError::Missing("JW_TLS_CLIENT_KEY"))
}

/// Path to the CA bundle used to verify the daemon's certificate.
pub fn server_ca_path() -> Result<PathBuf, EnvError> {
    std::env::var("JW_TLS_SERVER_CA").map(PathBuf::from).map_err(|_| EnvError::Missing("JW_TLS_SERVER_CA"))
}

/// A required environment variable was not set.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
}
