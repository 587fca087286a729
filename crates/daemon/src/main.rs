// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calwatch Daemon (calwatchd)
//!
//! Background process that polls the configured calendars and fires
//! triggers on event boundaries and detected changes.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;

use std::path::PathBuf;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

use crate::lifecycle::LifecycleError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        std::env::current_dir()?.join("calwatch.toml")
    };

    let paths = lifecycle::Paths::resolve()?;

    // Set up logging
    let _log_guard = setup_logging(&paths)?;

    info!("Starting calwatchd with config: {}", config_path.display());

    // Start daemon
    let mut daemon = match lifecycle::startup(&paths, &config_path) {
        Ok(d) => d,
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&paths, &e);
            error!("Failed to start daemon: {}", e);
            return Err(e.into());
        }
    };

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;

    info!(
        poll_interval_secs = daemon.settings.poll_interval.as_secs(),
        "Daemon ready"
    );

    // Signal ready for parent process
    println!("READY");

    let mut ticks = tokio::time::interval(daemon.settings.poll_interval);
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // Main poll loop
    loop {
        tokio::select! {
            _ = ticks.tick() => {
                let report = daemon.poller.run_cycle().await;
                for e in &report.errors {
                    warn!(error = %e, "cycle error");
                }
                if !report.firings.is_empty() || !report.skipped.is_empty() {
                    info!(
                        firings = report.firings.len(),
                        skipped = report.skipped.len(),
                        "cycle complete"
                    );
                }
            }

            // Reload rules without restarting
            _ = sighup.recv() => {
                info!("Received SIGHUP, reloading rules...");
                daemon.reload_rules();
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                daemon.shutdown();
                break;
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                daemon.shutdown();
                break;
            }
        }
    }

    info!("Daemon stopped");
    Ok(())
}

/// Write startup error synchronously to log file.
fn write_startup_error(paths: &lifecycle::Paths, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    paths: &lifecycle::Paths,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = paths.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Set up file appender
    let file_appender = tracing_appender::rolling::never(
        paths.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        paths
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
