// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ids_are_unique() {
    let a = JobId::new();
    let b = JobId::new();
    assert_ne!(a, b);
}

#[test]
fn display_is_32_char_lowercase_hex() {
    let id = JobId::new();
    let rendered = id.to_string();
    assert_eq!(rendered.len(), 32);
    assert!(rendered.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn round_trips_through_display_and_from_str() {
    let id = JobId::new();
    let parsed: JobId = id.to_string().parse().expect("should parse");
    assert_eq!(id, parsed);
}

#[test]
fn rejects_garbage() {
    assert!("not-a-job-id".parse::<JobId>().is_err());
}

#[test]
fn serde_round_trip() {
    let id = JobId::new();
    let json = serde_json::to_string(&id).expect("serialize");
    let parsed: JobId = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(id, parsed);
}
