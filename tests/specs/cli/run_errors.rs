//! `jw run` fails cleanly when connection configuration is missing.

use crate::prelude::jw;

#[test]
fn run_without_tls_config_fails_with_context() {
    let assert = jw().args(["run", "echo", "hi"]).assert().failure().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();

    assert!(stderr.contains("connecting to daemon"), "stderr: {stderr}");
    assert!(stderr.contains("JW_TLS_CLIENT_CERT"), "stderr: {stderr}");
}

#[test]
fn status_without_tls_config_fails() {
    let id = "0123456789abcdef0123456789abcdef";
    jw().args(["status", id]).assert().failure().code(1);
}

#[test]
fn status_rejects_malformed_job_id() {
    jw().args(["status", "not-a-job-id"]).assert().failure();
}
