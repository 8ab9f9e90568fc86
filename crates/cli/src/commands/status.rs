// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw status` - report a job's current state

use anyhow::Result;
use jw_core::JobId;

use crate::client::DaemonClient;
use crate::output::{print_status, OutputFormat};

pub async fn handle(mut client: DaemonClient, id: JobId, format: OutputFormat) -> Result<()> {
    let status = client.status(id).await?;
    print_status(id, status, format);
    Ok(())
}
