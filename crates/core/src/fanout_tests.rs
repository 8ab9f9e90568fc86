// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use proptest::prelude::*;

use super::*;

#[test]
fn backlog_under_cap_is_kept_whole() {
    let mut state = JobState::new(1024);
    state.push_backlog(b"hello");
    state.push_backlog(b" world");
    assert_eq!(state.backlog, b"hello world");
}

#[test]
fn backlog_over_cap_truncates_from_front() {
    let mut state = JobState::new(4);
    state.push_backlog(b"ab");
    state.push_backlog(b"cdef");
    assert_eq!(state.backlog, b"cdef");
}

proptest! {
    #[test]
    fn backlog_never_exceeds_its_cap(cap in 1usize..64, chunks in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..16), 0..32)) {
        let mut state = JobState::new(cap);
        for chunk in &chunks {
            state.push_backlog(chunk);
        }
        prop_assert!(state.backlog.len() <= cap);
    }

    #[test]
    fn backlog_always_holds_the_most_recent_bytes(cap in 8usize..64, chunks in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..16), 1..32)) {
        let mut state = JobState::new(cap);
        let mut expected = Vec::new();
        for chunk in &chunks {
            state.push_backlog(chunk);
            expected.extend_from_slice(chunk);
        }
        if expected.len() > cap {
            expected.drain(..expected.len() - cap);
        }
        prop_assert_eq!(state.backlog, expected);
    }
}
