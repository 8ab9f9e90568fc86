//! Test helpers for behavioral specifications.

#![allow(dead_code)]

use assert_cmd::Command;

/// A `jw` invocation with a clean environment, so stray `JW_*` variables
/// from the host shell never leak into a test.
pub fn jw() -> Command {
    let mut cmd = Command::cargo_bin("jw").expect("jw binary should be built by cargo test");
    clear_jw_env(&mut cmd);
    cmd
}

/// A `jwd` invocation with a clean environment.
pub fn jwd() -> Command {
    let mut cmd = Command::cargo_bin("jwd").expect("jwd binary should be built by cargo test");
    clear_jw_env(&mut cmd);
    cmd
}

fn clear_jw_env(cmd: &mut Command) {
    for (key, _) in std::env::vars() {
        if key.starts_with("JW_") {
            cmd.env_remove(key);
        }
    }
}
