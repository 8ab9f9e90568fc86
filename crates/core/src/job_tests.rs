// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::*;
use crate::fanout::DEFAULT_BACKLOG_CAP_BYTES;
use crate::test_support::{CollectingSubscriber, GoneSubscriber};

fn start(command: &str, args: &[&str]) -> Arc<Job> {
    Job::start(
        command.to_string(),
        args.iter().map(|s| s.to_string()).collect(),
        DEFAULT_BACKLOG_CAP_BYTES,
        DEFAULT_KILL_TIMEOUT,
    )
}

#[tokio::test]
async fn completes_with_done_on_success() {
    let job = start("sh", &["-c", "echo hello"]);
    let status = job.wait_until_terminal().await;
    assert_eq!(status, JobStatus::Done);
}

#[tokio::test]
async fn completes_with_error_on_nonzero_exit() {
    let job = start("sh", &["-c", "exit 7"]);
    let status = job.wait_until_terminal().await;
    assert_eq!(status, JobStatus::Error);
}

#[tokio::test]
async fn unspawnable_command_is_error() {
    let job = start("definitely-not-a-real-executable-xyz", &[]);
    let status = job.wait_until_terminal().await;
    assert_eq!(status, JobStatus::Error);
}

#[tokio::test]
async fn stop_before_exit_yields_stopped() {
    let job = start("sleep", &["30"]);
    // give the supervisor a moment to spawn and observe Running
    tokio::time::sleep(Duration::from_millis(50)).await;
    job.stop().expect("stop should succeed while running");
    let status = job.wait_until_terminal().await;
    assert_eq!(status, JobStatus::Stopped);
}

#[tokio::test]
async fn stop_on_already_terminal_job_errors() {
    let job = start("sh", &["-c", "exit 0"]);
    job.wait_until_terminal().await;
    let result = job.stop();
    assert!(matches!(result, Err(StopError::NotRunning(_))));
}

#[tokio::test]
async fn repeated_stop_on_terminal_job_is_always_not_running() {
    let job = start("sh", &["-c", "exit 0"]);
    job.wait_until_terminal().await;
    assert!(matches!(job.stop(), Err(StopError::NotRunning(_))));
    assert!(matches!(job.stop(), Err(StopError::NotRunning(_))));
}

#[tokio::test]
async fn stop_while_initializing_errors_not_running() {
    // Job::start spawns the supervisor onto the runtime but returns
    // without yielding, so the job is still `Initializing` here.
    let job = start("sleep", &["1"]);
    assert_eq!(job.status(), JobStatus::Initializing);
    assert!(matches!(job.stop(), Err(StopError::NotRunning(_))));
    job.wait_until_terminal().await;
}

#[tokio::test]
async fn repeated_stop_is_idempotent() {
    let job = start("sleep", &["30"]);
    tokio::time::sleep(Duration::from_millis(50)).await;
    job.stop().expect("first stop succeeds");
    job.stop().expect("second stop is a no-op, not an error");
    job.wait_until_terminal().await;
}

#[tokio::test]
async fn attach_after_completion_replays_full_backlog_and_ends() {
    let job = start("sh", &["-c", "printf 'abc'"]);
    job.wait_until_terminal().await;

    let subscriber = CollectingSubscriber::new();
    job.attach(Box::new(subscriber.clone())).await;

    assert_eq!(subscriber.bytes(), b"abc");
    assert!(subscriber.is_ended());
}

#[tokio::test]
async fn attach_while_running_sees_live_output_then_end() {
    let job = start("sh", &["-c", "sleep 0.05; printf 'late'"]);

    let subscriber = CollectingSubscriber::new();
    let attached = Arc::clone(&job);
    let collector = subscriber.clone();
    let attach_task = tokio::spawn(async move { attached.attach(Box::new(collector)).await });

    job.wait_until_terminal().await;
    attach_task.await.expect("attach task should not panic");

    assert_eq!(subscriber.bytes(), b"late");
    assert!(subscriber.is_ended());
}

#[tokio::test]
async fn attach_returns_promptly_when_subscriber_transport_is_gone() {
    // A subscriber whose first `send` fails (transport torn down) must
    // cause attach() to return without ever calling `end()`, and must
    // not hang waiting for the job to finish.
    let job = start("sh", &["-c", "printf 'abc'"]);
    tokio::time::timeout(Duration::from_secs(5), job.attach(Box::new(GoneSubscriber)))
        .await
        .expect("attach must return promptly once the subscriber is gone");
    job.wait_until_terminal().await;
}

/// A script that emits 5 lines 50ms apart, matching the shape of the
/// spec's S2/S6 scenarios (slow enough that an early attacher observes
/// the job still `Running` before a later attacher joins).
const FIVE_LINES_SCRIPT: &str = "for i in 1 2 3 4 5; do printf 'Line %d: Hello\\n' \"$i\"; sleep 0.05; done";

#[tokio::test]
async fn two_subscribers_staggered_attach_both_receive_the_full_stream_in_order() {
    let job = start("sh", &["-c", FIVE_LINES_SCRIPT]);

    let early = CollectingSubscriber::new();
    let early_attached = Arc::clone(&job);
    let early_collector = early.clone();
    let early_task = tokio::spawn(async move { early_attached.attach(Box::new(early_collector)).await });

    // Let the job get partway through before a second subscriber joins,
    // so it has to be served from backlog-plus-live rather than
    // backlog-only.
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(job.status(), JobStatus::Running);

    let late = CollectingSubscriber::new();
    let late_attached = Arc::clone(&job);
    let late_collector = late.clone();
    let late_task = tokio::spawn(async move { late_attached.attach(Box::new(late_collector)).await });

    job.wait_until_terminal().await;
    early_task.await.expect("early attach task should not panic");
    late_task.await.expect("late attach task should not panic");

    let expected = b"Line 1: Hello\nLine 2: Hello\nLine 3: Hello\nLine 4: Hello\nLine 5: Hello\n".to_vec();
    assert_eq!(early.bytes(), expected, "early subscriber must see every byte, gap-free");
    assert_eq!(late.bytes(), expected, "late subscriber must see the same full stream as the early one");
    assert!(early.is_ended());
    assert!(late.is_ended());
}

#[tokio::test]
async fn twenty_concurrent_subscribers_all_receive_byte_equal_streams() {
    let job = start("sh", &["-c", FIVE_LINES_SCRIPT]);

    let subscribers: Vec<CollectingSubscriber> = (0..20).map(|_| CollectingSubscriber::new()).collect();
    let tasks: Vec<_> = subscribers
        .iter()
        .cloned()
        .map(|subscriber| {
            let job = Arc::clone(&job);
            tokio::spawn(async move { job.attach(Box::new(subscriber)).await })
        })
        .collect();

    for task in tasks {
        task.await.expect("attach task should not panic");
    }

    let expected = b"Line 1: Hello\nLine 2: Hello\nLine 3: Hello\nLine 4: Hello\nLine 5: Hello\n".to_vec();
    for (index, subscriber) in subscribers.iter().enumerate() {
        assert_eq!(subscriber.bytes(), expected, "subscriber {index} diverged from the expected stream");
        assert!(subscriber.is_ended(), "subscriber {index} never saw end-of-stream");
    }
}

#[tokio::test]
async fn subscribers_of_different_jobs_never_cross_contaminate() {
    let job_a = start("sh", &["-c", "printf 'A-ONLY'"]);
    let job_b = start("sh", &["-c", "printf 'B-ONLY'"]);

    job_a.wait_until_terminal().await;
    job_b.wait_until_terminal().await;

    let subscriber_a = CollectingSubscriber::new();
    let subscriber_b = CollectingSubscriber::new();
    job_a.attach(Box::new(subscriber_a.clone())).await;
    job_b.attach(Box::new(subscriber_b.clone())).await;

    assert_eq!(subscriber_a.bytes(), b"A-ONLY");
    assert_eq!(subscriber_b.bytes(), b"B-ONLY");
}
