//! `jw --help` / `jw <subcommand> --help`

use crate::prelude::jw;

#[test]
fn top_level_help_lists_all_subcommands() {
    let assert = jw().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    for subcommand in ["run", "status", "stop", "attach"] {
        assert!(stdout.contains(subcommand), "help text missing '{subcommand}':\n{stdout}");
    }
}

#[test]
fn run_help_documents_trailing_arguments() {
    let assert = jw().args(["run", "--help"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    assert!(stdout.contains("command"));
    assert!(stdout.contains("args"));
}

#[test]
fn no_subcommand_fails_with_usage() {
    jw().assert().failure();
}

#[test]
fn unknown_subcommand_fails() {
    jw().arg("bogus").assert().failure();
}
