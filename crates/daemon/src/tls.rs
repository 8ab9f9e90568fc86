// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mTLS server configuration: the daemon only accepts connections from
//! clients presenting a certificate signed by the configured CA.

use std::path::Path;
use std::sync::Arc;

use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use tokio_rustls::TlsAcceptor;

/// Failure building the server's TLS configuration.
#[derive(Debug, thiserror::Error)]
pub enum TlsConfigError {
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

    #[error("invalid client verifier configuration: {0}")]
    Verifier(#[from] rustls::server::VerifierBuilderError),
}

/// Build a [`TlsAcceptor`] that requires client certificate
/// authentication against `client_ca_path`.
pub fn server_acceptor(cert_path: &Path, key_path: &Path, client_ca_path: &Path) -> Result<TlsAcceptor, TlsConfigError> {
    let certs = load_certs(cert_path)?;
    let key = load_private_key(key_path)?;

    let mut client_roots = RootCertStore::empty();
    for cert in load_certs(client_ca_path)? {
        client_roots.add(cert)?;
    }
    let client_verifier = WebPkiClientVerifier::builder(Arc::new(client_roots)).build()?;

    let config = ServerConfig::builder()
        .with_client_cert_verifier(client_verifier)
        .with_single_cert(certs, key)?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

fn load_certs(path: &Path) -> Result<Vec<rustls::pki_types::CertificateDer<'static>>, TlsConfigError> {
    let bytes = std::fs::read(path).map_err(|source| TlsConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let certs: Vec<_> = rustls_pemfile::certs(&mut bytes.as_slice()).filter_map(Result::ok).collect();
    if certs.is_empty() {
        return Err(TlsConfigError::NoCertificates {
            path: path.display().to_string(),
        });
    }
    Ok(certs)
}

fn load_private_key(path: &Path) -> Result<rustls::pki_types::PrivateKeyDer<'static>, TlsConfigError> {
    let bytes = std::fs::read(path).map_err(|source| TlsConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    rustls_pemfile::private_key(&mut bytes.as_slice())
        .ok()
        .flatten()
        .ok_or_else(|| TlsConfigError::NoPrivateKey {
            path: path.display().to_string(),
        })
}
