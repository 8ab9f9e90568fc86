// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw stop` - request that a running job terminate

use anyhow::Result;
use jw_core::JobId;

use crate::client::DaemonClient;

pub async fn handle(mut client: DaemonClient, id: JobId) -> Result<()> {
    client.stop(id).await?;
    Ok(())
}
