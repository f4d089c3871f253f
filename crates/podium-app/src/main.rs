//! Operator console for the Podium speaker timer.
//!
//! Wires together the countdown engine, the console display, and the
//! mobile sync endpoint. The operator drives the timer with one-line
//! commands on stdin while phones on the venue network poll
//! `GET /timer_state`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `podium.yaml`
//! 3. Create the shared snapshot store
//! 4. Spawn the sync server (a bind failure costs only the endpoint)
//! 5. Build the roster and tick scheduler, register the console sink
//! 6. Run the operator input loop
//! 7. Tear down: scheduler first, then the sync server with a bounded
//!    shutdown timeout

mod commands;
mod display;
mod error;

use std::path::PathBuf;
use std::time::Duration;

use podium_core::{AppConfig, Command, SharedStateStore, SpeakerRoster, TickScheduler};
use podium_sync::{ServerConfig, SyncHandle, spawn_sync};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{HELP_TEXT, Input};
use crate::display::ConsoleDisplay;
use crate::error::AppError;

/// Environment variable naming an alternate configuration file.
const CONFIG_ENV: &str = "PODIUM_CONFIG";

/// Default configuration file next to the binary.
const CONFIG_FILE: &str = "podium.yaml";

/// How long teardown waits for the sync server before proceeding.
const SYNC_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Application entry point for the operator console.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("podium starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        warning_threshold_seconds = config.timer.warning_threshold_seconds,
        tick_interval_ms = config.timer.tick_interval_ms,
        speaker_count = config.speakers.len(),
        "configuration loaded"
    );

    // 3. Create the shared snapshot store.
    let store = SharedStateStore::new();

    // 4. Spawn the sync server. A bind failure is reported once and
    //    costs only the mobile endpoint; the timer keeps running.
    let sync_handle = start_sync(&config, &store).await;

    // 5. Build the roster and scheduler.
    let roster = SpeakerRoster::from_speakers(config.speakers.clone());
    let tick_interval = Duration::from_millis(config.timer.tick_interval_ms.max(1));
    let mut scheduler = TickScheduler::new(
        config.timer.warning_threshold_seconds,
        roster,
        store,
    )
    .with_tick_interval(tick_interval);
    scheduler.register_sink(Box::new(ConsoleDisplay::new()));

    let (tx, rx) = mpsc::channel(16);
    let scheduler_task = tokio::spawn(scheduler.run(rx));

    // 6. Operator input loop.
    println!("{HELP_TEXT}");
    run_input_loop(&tx).await?;

    // 7. Teardown.
    let _ = tx.send(Command::Shutdown).await;
    drop(tx);
    if let Err(e) = scheduler_task.await {
        warn!(error = %e, "scheduler task ended abnormally");
    }
    if let Some(handle) = sync_handle {
        handle.shutdown(SYNC_SHUTDOWN_TIMEOUT).await;
    }

    info!("podium stopped");
    Ok(())
}

/// Load configuration from `PODIUM_CONFIG` or `podium.yaml`, falling
/// back to defaults when no file exists.
fn load_config() -> Result<AppConfig, AppError> {
    let path = std::env::var(CONFIG_ENV)
        .map_or_else(|_| PathBuf::from(CONFIG_FILE), PathBuf::from);
    if path.exists() {
        info!(path = %path.display(), "loading configuration");
        Ok(AppConfig::from_file(&path)?)
    } else {
        info!(path = %path.display(), "no configuration file, using defaults");
        Ok(AppConfig::default())
    }
}

/// Start the sync server when enabled, surfacing a bind failure as a
/// one-time warning rather than an error.
async fn start_sync(config: &AppConfig, store: &SharedStateStore) -> Option<SyncHandle> {
    if !config.sync.enabled {
        info!("mobile sync disabled in configuration");
        return None;
    }
    let server_config = ServerConfig {
        host: config.sync.host.clone(),
        port: config.sync.port,
    };
    match spawn_sync(&server_config, store.clone()).await {
        Ok(handle) => {
            if let Some(addr) = handle.local_addr() {
                println!("mobile sync: poll http://{addr}/timer_state from the venue network");
            }
            Some(handle)
        }
        Err(err) => {
            warn!(%err, "sync server unavailable, continuing without mobile sync");
            None
        }
    }
}

/// Read operator commands from stdin until `quit` or end of input.
async fn run_input_loop(tx: &mpsc::Sender<Command>) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match commands::parse(&line) {
            Some(Input::Timer(command)) => {
                if tx.send(command).await.is_err() {
                    // Scheduler gone; nothing left to drive.
                    break;
                }
            }
            Some(Input::Help) => println!("{HELP_TEXT}"),
            Some(Input::Quit) => break,
            None => {
                if !line.trim().is_empty() {
                    println!("unrecognized input: {}", line.trim());
                    println!("{HELP_TEXT}");
                }
            }
        }
    }
    Ok(())
}
