// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::io::AsyncReadExt;

#[tokio::test]
async fn spawns_and_captures_stdout() {
    let mut child = spawn("echo", &["Hello, world!".to_string()]).expect("spawn should succeed");
    let mut stdout = child.take_stdout().expect("stdout should be piped");

    let mut buf = Vec::new();
    stdout.read_to_end(&mut buf).await.expect("read should succeed");
    assert_eq!(buf, b"Hello, world!\n");

    let status = child.wait().await.expect("wait should succeed");
    assert!(status.success());
}

#[tokio::test]
async fn unknown_executable_fails_to_spawn() {
    let result = spawn("definitely-not-a-real-executable-xyz", &[]);
    assert!(result.is_err());
}

#[tokio::test]
async fn terminate_sends_sigterm_to_running_child() {
    let mut child = spawn("sleep", &["30".to_string()]).expect("spawn should succeed");
    child.terminate().expect("signal delivery should succeed");

    let status = child.wait().await.expect("wait should succeed");
    assert!(!status.success());
}

#[tokio::test]
async fn signal_after_exit_surfaces_as_error_not_panic() {
    let mut child = spawn("true", &[]).expect("spawn should succeed");
    let _ = child.wait().await.expect("wait should succeed");

    // The pid may already have been reaped by the OS; either outcome (Ok or
    // Err) is acceptable, this just must not panic.
    let _ = child.terminate();
}
