// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jw - client for the job-execution daemon

mod client;
mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use jw_core::JobId;

use client::DaemonClient;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "jw", version, about = "Client for the job-execution daemon")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new job
    Run {
        /// The command to execute
        command: String,

        /// Arguments passed to the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Show a job's current status
    Status {
        /// Job id, as printed by `jw run`
        id: JobId,
    },
    /// Request that a running job stop
    Stop {
        /// Job id, as printed by `jw run`
        id: JobId,
    },
    /// Stream a job's output to stdout
    Attach {
        /// Job id, as printed by `jw run`
        id: JobId,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        let code = err.downcast_ref::<exit_error::ExitError>().map_or(1, |e| e.code);
        eprintln!("Error: {}", format_error(&err));
        std::process::exit(code);
    }
}

/// Render an anyhow error, including its cause chain unless the
/// top-level message already restates it (common with `#[from]`
/// thiserror variants).
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err.chain().skip(1).all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut rendered = top;
    for cause in err.chain().skip(1) {
        rendered.push_str(&format!("\n\nCaused by:\n    {cause}"));
    }
    rendered
}

async fn run() -> Result<()> {
    let matches = Cli::command().styles(color::styles()).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let client = connect().await.context("connecting to daemon")?;

    let result = match cli.command {
        Commands::Run { command, args } => commands::run::handle(client, command, args, cli.output).await,
        Commands::Status { id } => commands::status::handle(client, id, cli.output).await,
        Commands::Stop { id } => commands::stop::handle(client, id).await,
        Commands::Attach { id } => commands::attach::handle(client, id).await,
    };

    result.map_err(sharpen_exit_code)
}

/// Give a daemon-reported failure its own exit code (`NotFound`,
/// `NotRunning`) instead of the default 1, so scripts driving `jw` can
/// branch without parsing stderr.
fn sharpen_exit_code(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<client::ClientError>().and_then(client::ClientError::exit_code) {
        Some(code) => {
            let message = err.to_string();
            exit_error::ExitError::new(code, message).into()
        }
        None => err,
    }
}

async fn connect() -> Result<DaemonClient> {
    let addr = env::daemon_addr();
    let server_name = env::server_name();
    let cert = env::client_cert_path()?;
    let key = env::client_key_path()?;
    let ca = env::server_ca_path()?;

    Ok(DaemonClient::connect(&addr, &server_name, &cert, &key, &ca).await?)
}
