// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw attach` - stream a job's output to stdout

use std::io::Write;

use anyhow::Result;
use jw_core::JobId;

use crate::client::DaemonClient;

pub async fn handle(mut client: DaemonClient, id: JobId) -> Result<()> {
    let stdout = std::io::stdout();
    client
        .attach(id, |chunk| {
            let mut lock = stdout.lock();
            let _ = lock.write_all(chunk);
            let _ = lock.flush();
        })
        .await?;
    Ok(())
}
