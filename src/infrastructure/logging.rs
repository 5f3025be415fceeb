//! Logging system configuration and initialization
//!
//! This module provides the logging setup with:
//! - Console output and an optional log file
//! - Configuration based log level control, overridable with `RUST_LOG`
//! - Structured JSON logging for the file (optional)
//! - Local timezone timestamps

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

// Re-export LoggingConfig from config module
pub use crate::infrastructure::config::LoggingConfig;

// Global guard to keep the log file writer alive
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> =
        Mutex::new(Vec::new());
}

/// Dependency targets that are only interesting at TRACE level
const QUIET_DIRECTIVES: &[&str] = &[
    "headless_chrome=warn",
    "tungstenite=warn",
    "html5ever=warn",
    "selectors=warn",
    "config=info",
];

/// Timestamps in the local timezone
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %:z"))
    }
}

/// Get the log directory: configured, or `logs/` next to the executable
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Initialize logging with custom configuration
///
/// `RUST_LOG` replaces the configured filter entirely:
/// ```bash
/// RUST_LOG="debug,headless_chrome=debug" match-crawler list
/// ```
/// Without it, the configured level applies to this crate and noisy
/// dependencies are held at `warn` unless the level is `trace`.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.file_output && !config.console_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from_config(config)?,
    };

    let file_layer = if config.file_output {
        let log_dir = get_log_directory(config);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let file_appender = rolling::never(&log_dir, &config.file_name);
        let (file_writer, file_guard) = non_blocking(file_appender);

        // Store the guard globally to prevent it from being dropped
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(file_guard);

        let layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_timer(LocalTimeFormatter)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(file_writer)
                .with_timer(LocalTimeFormatter)
                .with_target(false)
                .with_ansi(false)
                .boxed()
        };
        Some(layer)
    } else {
        None
    };

    let console_layer = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_timer(LocalTimeFormatter)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_output {
        info!(
            "Log file: {}",
            get_log_directory(config).join(&config.file_name).display()
        );
    }
    if config.level.to_lowercase().contains("trace") {
        info!("TRACE level active - dependency logs are not suppressed");
    }

    Ok(())
}

/// Build the filter from configuration alone, ignoring `RUST_LOG`
fn filter_from_config(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    if !config.level.to_lowercase().contains("trace") {
        for directive in QUIET_DIRECTIVES {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    for (module, level) in &config.module_filters {
        let directive = format!("{module}={level}");
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid module filter: {directive}"))?,
        );
    }

    Ok(filter)
}

/// Log system information for diagnostics
pub fn log_system_info() {
    info!("=== match-crawler system information ===");
    info!("Application version: {}", env!("CARGO_PKG_VERSION"));
    info!("Operating system: {}", std::env::consts::OS);
    info!("Architecture: {}", std::env::consts::ARCH);

    if let Ok(current_dir) = std::env::current_dir() {
        info!("Working directory: {:?}", current_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.level.is_empty());
        assert!(config.console_output);
        assert!(!config.file_output);
    }

    #[test]
    fn test_log_directory() {
        let config = LoggingConfig::default();
        assert!(get_log_directory(&config).to_string_lossy().ends_with("logs"));

        let configured = LoggingConfig {
            log_dir: Some(PathBuf::from("/tmp/crawler-logs")),
            ..LoggingConfig::default()
        };
        assert_eq!(get_log_directory(&configured), PathBuf::from("/tmp/crawler-logs"));
    }

    #[test]
    fn test_filter_accepts_module_filters() {
        let mut config = LoggingConfig::default();
        config
            .module_filters
            .insert("match_crawler::infrastructure::browser".to_string(), "debug".to_string());
        assert!(filter_from_config(&config).is_ok());
    }

    #[test]
    fn test_filter_rejects_bad_module_filter() {
        let mut config = LoggingConfig::default();
        config
            .module_filters
            .insert("match_crawler".to_string(), "loud".to_string());
        assert!(filter_from_config(&config).is_err());
    }

    #[test]
    fn test_no_output_is_an_error() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(init_logging_with_config(&config).is_err());
    }
}
