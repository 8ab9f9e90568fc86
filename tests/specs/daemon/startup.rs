//! `jwd` refuses to start without a complete TLS configuration.

use crate::prelude::jwd;

#[test]
fn missing_tls_cert_path_fails_fast() {
    let assert = jwd().assert().failure().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("JW_TLS_CERT"), "stderr: {stderr}");
}

#[test]
fn missing_tls_key_path_fails_fast() {
    let assert = jwd()
        .env("JW_TLS_CERT", "/nonexistent/cert.pem")
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("JW_TLS_KEY"), "stderr: {stderr}");
}

#[test]
fn nonexistent_cert_file_fails_fast() {
    jwd()
        .env("JW_TLS_CERT", "/nonexistent/cert.pem")
        .env("JW_TLS_KEY", "/nonexistent/key.pem")
        .env("JW_TLS_CLIENT_CA", "/nonexistent/ca.pem")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn log_file_is_created_even_when_startup_later_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("daemon.log");

    jwd().env("JW_LOG_FILE", &log_path).assert().failure().code(1);

    assert!(log_path.exists(), "expected {log_path:?} to have been created before the TLS config error");
}
