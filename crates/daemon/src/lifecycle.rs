// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, reload,
//! shutdown.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cw_adapters::{
    IcsDirSource, LogHostDispatch, ProcessScriptRunner, TracedCalendarSource, TracedHostDispatch,
};
use cw_core::{SystemClock, UuidIdGen};
use cw_engine::{Dispatcher, Poller, PollerConfig};
use cw_rules::{parse_rules, validate, RuleSet, RuleSetHandle};
use fs2::FileExt;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Daemon poller with concrete adapter types (wrapped with tracing)
pub type DaemonPoller = Poller<
    TracedCalendarSource<IcsDirSource>,
    TracedHostDispatch<LogHostDispatch>,
    ProcessScriptRunner,
    UuidIdGen,
    SystemClock,
>;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Config file not found at {0}: {1}")]
    ConfigNotFound(PathBuf, std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    #[error("Rule parse error: {0}")]
    Rules(#[from] cw_rules::ParseError),

    #[error("Config must set engine.source_root (the calendar directory)")]
    MissingSourceRoot,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The `[engine]` table of the config file. Trigger rules live in the
/// same file as `[[event]]` and `[[change]]` tables.
#[derive(Debug, Clone, Deserialize, Default)]
struct EngineSection {
    poll_interval_secs: Option<u64>,
    read_timeout_secs: Option<u64>,
    script_timeout_secs: Option<u64>,
    calendars: Option<Vec<String>>,
    source_root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineSection,
}

/// Resolved daemon settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub poll_interval: Duration,
    pub read_timeout: Duration,
    pub script_timeout: Duration,
    pub calendars: Option<Vec<String>>,
    pub source_root: PathBuf,
}

/// Filesystem locations for daemon state
#[derive(Debug, Clone)]
pub struct Paths {
    pub lock_path: PathBuf,
    pub log_path: PathBuf,
}

impl Paths {
    pub fn resolve() -> Result<Self, LifecycleError> {
        let state_dir = state_dir()?;
        Ok(Self {
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
        })
    }
}

/// Load settings and rules from one config file
pub fn load_config(path: &Path) -> Result<(Settings, RuleSet), LifecycleError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LifecycleError::ConfigNotFound(path.to_path_buf(), e))?;

    let file: ConfigFile = toml::from_str(&content)?;
    let engine = file.engine;
    let settings = Settings {
        poll_interval: Duration::from_secs(engine.poll_interval_secs.unwrap_or(10)),
        read_timeout: Duration::from_secs(engine.read_timeout_secs.unwrap_or(30)),
        script_timeout: Duration::from_secs(engine.script_timeout_secs.unwrap_or(60)),
        calendars: engine.calendars,
        source_root: engine.source_root.ok_or(LifecycleError::MissingSourceRoot)?,
    };

    let rules = parse_rules(&content)?;
    Ok((settings, rules))
}

/// Log what a loaded rule set looks like: disabled rules once, then
/// any lint warnings.
pub fn report_rules(rules: &RuleSet) {
    for disabled in &rules.disabled {
        warn!(rule = %disabled.name, error = %disabled.error, "rule disabled");
    }
    for warning in validate(rules) {
        warn!("{}", warning);
    }
    if rules.is_empty() {
        warn!("no enabled rules; the daemon will poll but never fire");
    }
    info!(
        events = rules.events.len(),
        changes = rules.changes.len(),
        disabled = rules.disabled.len(),
        "rules loaded"
    );
}

/// Daemon state during operation
pub struct DaemonState {
    pub paths: Paths,
    pub settings: Settings,
    pub config_path: PathBuf,
    pub rules_handle: RuleSetHandle,
    pub poller: DaemonPoller,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
}

impl DaemonState {
    /// Re-read the config file and stage the new rules for the next
    /// cycle. A broken file leaves the running rules untouched.
    pub fn reload_rules(&self) {
        match load_config(&self.config_path) {
            Ok((_, rules)) => {
                report_rules(&rules);
                self.rules_handle.replace(rules);
                info!("rule reload staged");
            }
            Err(e) => {
                warn!(error = %e, "rule reload failed; keeping current rules");
            }
        }
    }

    /// Shutdown the daemon gracefully
    pub fn shutdown(&self) {
        info!("Shutting down daemon...");
        if self.paths.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.paths.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }
        // Lock released when self.lock_file is dropped
        info!("Daemon shutdown complete");
    }
}

/// Start the daemon
pub fn startup(paths: &Paths, config_path: &Path) -> Result<DaemonState, LifecycleError> {
    match startup_inner(paths, config_path) {
        Ok(state) => Ok(state),
        Err(e) => {
            cleanup_on_failure(paths);
            Err(e)
        }
    }
}

fn startup_inner(paths: &Paths, config_path: &Path) -> Result<DaemonState, LifecycleError> {
    // 1. State directory, then the lock file FIRST - prevents races
    if let Some(parent) = paths.lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let lock_file = File::create(&paths.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    use std::io::Write;
    let mut lock_file = lock_file;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 2. Load config and rules (fail fast before anything else runs)
    let (settings, rules) = load_config(config_path)?;
    report_rules(&rules);

    let rules_handle = RuleSetHandle::new();
    rules_handle.replace(rules);

    // 3. Wire up adapters (wrapped with tracing for observability)
    let source = TracedCalendarSource::new(IcsDirSource::new(settings.source_root.clone()));
    let host = TracedHostDispatch::new(LogHostDispatch);
    let scripts = ProcessScriptRunner::new();

    let dispatcher = Dispatcher::new(host, scripts, UuidIdGen, settings.script_timeout);
    let poller = Poller::new(
        source,
        dispatcher,
        SystemClock,
        rules_handle.clone(),
        PollerConfig {
            calendars: settings.calendars.clone(),
            read_timeout: settings.read_timeout,
        },
    );

    info!(
        source_root = %settings.source_root.display(),
        poll_interval_secs = settings.poll_interval.as_secs(),
        "Daemon started"
    );

    Ok(DaemonState {
        paths: paths.clone(),
        settings,
        config_path: config_path.to_path_buf(),
        rules_handle,
        poller,
        lock_file,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(paths: &Paths) {
    if paths.lock_path.exists() {
        let _ = std::fs::remove_file(&paths.lock_path);
    }
}

/// Get the state directory for calwatch
fn state_dir() -> Result<PathBuf, LifecycleError> {
    // Use XDG_STATE_HOME or default to ~/.local/state
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("calwatch"));
    }
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .map(|d| d.join("calwatch"))
        .ok_or(LifecycleError::NoStateDir)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
