// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw run` - submit a new job

use anyhow::Result;

use crate::client::DaemonClient;
use crate::output::{print_started, OutputFormat};

pub async fn handle(mut client: DaemonClient, command: String, args: Vec<String>, format: OutputFormat) -> Result<()> {
    let id = client.start(command, args).await?;
    print_started(id, format);
    Ok(())
}
