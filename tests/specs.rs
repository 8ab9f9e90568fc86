//! Behavioral specifications for the jw CLI and jwd daemon.
//!
//! These tests are black-box: they invoke the compiled binaries and check
//! stdout, stderr, and exit codes. They never start a real mTLS listener —
//! the repository has no certificate fixtures to exercise that path, so
//! coverage here is limited to argument parsing and configuration errors.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli/help.rs"]
mod cli_help;
#[path = "specs/cli/run_errors.rs"]
mod cli_run_errors;

#[path = "specs/daemon/startup.rs"]
mod daemon_startup;
