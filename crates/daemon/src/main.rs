// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jwd`: the job-execution daemon. Accepts mTLS connections, spawns and
//! supervises child processes on behalf of authenticated clients, and
//! streams their combined output back to any number of attachers.

use std::sync::Arc;

use jw_core::JobManager;
use jw_daemon::{env, tls, Listener};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging();

    let mut manager = JobManager::new().backlog_cap(env::backlog_cap_bytes());
    if let Some(retention) = env::job_retention() {
        manager = manager.retention(retention);
    }
    let manager = Arc::new(manager);

    let acceptor = tls::server_acceptor(&env::tls_cert_path()?, &env::tls_key_path()?, &env::tls_client_ca_path()?)?;

    let addr = env::listen_addr();
    let listener = Listener::bind(&addr, acceptor, Arc::clone(&manager)).await?;
    tracing::info!(%addr, "jwd listening");

    let shutdown = CancellationToken::new();
    let serve = tokio::spawn(listener.run(shutdown.clone()));

    wait_for_shutdown_signal().await?;
    tracing::info!("shutdown requested, draining jobs");
    shutdown.cancel();

    manager.shutdown(env::drain_timeout()).await;
    let _ = serve.await;

    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {}
        _ = sigint.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}

/// Install a `tracing` subscriber writing to stderr, plus an optional
/// rolling file appender when `JW_LOG_FILE` is set. The returned guard
/// must be held for the file writer to flush on drop.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match env::log_file() {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "jwd.log".to_string());
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt().with_env_filter(filter).with_writer(non_blocking).init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}
