// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting shared across commands.

use clap::ValueEnum;
use jw_core::{JobId, JobStatus};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct StartedJson {
    id: String,
}

/// Print the result of `jw run`.
pub fn print_started(id: JobId, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let payload = StartedJson { id: id.to_string() };
            println!("{}", serde_json::to_string(&payload).unwrap_or_else(|_| format!("{{\"id\":\"{id}\"}}")));
        }
        OutputFormat::Text => println!("{id}"),
    }
}

#[derive(Serialize)]
struct StatusJson {
    id: String,
    status: JobStatus,
}

/// Print the result of `jw status`.
pub fn print_status(id: JobId, status: JobStatus, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let payload = StatusJson { id: id.to_string(), status };
            match serde_json::to_string(&payload) {
                Ok(text) => println!("{text}"),
                Err(_) => println!("{status}"),
            }
        }
        OutputFormat::Text => println!("{status}"),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
