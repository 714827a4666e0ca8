// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Installs a console layer (text or JSON) filtered by the configured level
//! and per-crate debug flags. With the `file-logging` feature and a
//! `file_path`, also writes a JSON log into a timestamped run folder:
//! ```text
//! <file_path>/
//!   └── run_20250101_120000/
//!       └── neatfn.log.2025-01-01
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::{parse_debug_flags, CrateDebugFlags};
use crate::config::{LogFormat, LoggingConfig};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed when it is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` for a config and set of debug flags
pub fn build_filter(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string_with_default(&config.level.to_ascii_lowercase());
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Initialize the global subscriber
///
/// # Errors
/// Invalid level, unwritable log directory, or a subscriber already set.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    if !config.has_valid_level() {
        bail!("Invalid log level '{}'", config.level);
    }

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(build_filter(config, debug_flags)?)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(build_filter(config, debug_flags)?)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &config.file_path {
        Some(base_log_dir) => {
            let (layer, guard, run_folder) = file_layer(config, debug_flags, base_log_dir)?;
            layers.push(layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    #[cfg(not(feature = "file-logging"))]
    {
        if let Some(path) = &config.file_path {
            tracing::warn!(
                target: "neatfn",
                "Ignoring log file path {}: built without the file-logging feature",
                path.display()
            );
        }
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize logging from defaults plus process args and `NEATFN_DEBUG`
pub fn init_logging_default() -> Result<LoggingGuard> {
    init_logging(&LoggingConfig::default(), &parse_debug_flags())
}

#[cfg(feature = "file-logging")]
fn file_layer(
    config: &LoggingConfig,
    debug_flags: &CrateDebugFlags,
    base_log_dir: &Path,
) -> Result<(BoxedLayer, tracing_appender::non_blocking::WorkerGuard, PathBuf)> {
    let now = Utc::now();
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, now.format(RUN_TIMESTAMP_FORMAT)));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_logs(base_log_dir, config.retention_days, config.retention_runs, now)?;

    let appender = tracing_appender::rolling::daily(&run_folder, "neatfn.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_filter(config, debug_flags)?)
        .boxed();

    Ok((layer, guard, run_folder))
}

/// Remove old `run_*` folders under `base_log_dir`
///
/// Folders older than `retention_days` go first; then the oldest are removed
/// until at most `retention_runs` remain. The newest run is always kept.
/// Returns the number of folders removed.
pub fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: u64,
    retention_runs: usize,
    now: DateTime<Utc>,
) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    // Capped so the subtraction cannot overflow
    let cutoff = now - Duration::days(retention_days.min(36_500) as i64);

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)
        .with_context(|| format!("Failed to read log directory: {}", base_log_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(started) = started {
            runs.push((path, started.and_utc()));
        }
    }

    // Newest first
    runs.sort_by(|a, b| b.1.cmp(&a.1));

    let keep = retention_runs.max(1);
    let mut removed = 0;
    for (index, (path, started)) in runs.iter().enumerate() {
        let expired = index > 0 && *started < cutoff;
        if index >= keep || expired {
            match std::fs::remove_dir_all(path) {
                Ok(()) => removed += 1,
                Err(e) => eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e),
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_run(base: &Path, stamp: &str) -> PathBuf {
        let path = base.join(format!("run_{}", stamp));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_build_filter() {
        let config = LoggingConfig {
            level: "WARN".to_string(),
            ..Default::default()
        };
        let flags = CrateDebugFlags::from_args(vec!["--debug-neatfn-registry".to_string()]);
        let filter = build_filter(&config, &flags).unwrap();
        let rendered = filter.to_string().to_ascii_lowercase();
        assert!(rendered.contains("neatfn-registry=debug"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn test_cleanup_by_age_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let ancient = make_run(base, "20240101_000000");
        let recent: Vec<PathBuf> = (1..=4)
            .map(|day| make_run(base, &format!("202505{:02}_000000", 27 + day)))
            .collect();
        std::fs::create_dir_all(base.join("not_a_run")).unwrap();
        std::fs::write(base.join("run_file.txt"), "x").unwrap();

        let removed = cleanup_old_logs(base, 30, 3, now).unwrap();
        assert_eq!(removed, 2);
        assert!(!ancient.exists());
        assert!(!recent[0].exists());
        assert!(recent[1..].iter().all(|p| p.exists()));
        assert!(base.join("not_a_run").exists());
    }

    #[test]
    fn test_cleanup_keeps_newest_run() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let only = make_run(dir.path(), "20200101_000000");

        assert_eq!(cleanup_old_logs(dir.path(), 1, 0, now).unwrap(), 0);
        assert!(only.exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 30, 10, Utc::now()).unwrap(), 0);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(init_logging(&config, &CrateDebugFlags::default()).is_err());
    }
}
