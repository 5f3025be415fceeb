//! Configuration infrastructure
//!
//! Configuration is layered with the `config` crate:
//! 1. Built-in defaults (every struct is `#[serde(default)]`)
//! 2. An optional config file (`config/crawler.{toml,json,yaml}` or `--config`)
//! 3. Environment overrides, e.g. `MATCH_CRAWLER__BROWSER__HEADLESS=false`

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

use crate::domain::constants::{browser, site};
use crate::infrastructure::parsing::ParsingConfig;

/// Complete crawler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Path of the listing page, joined onto `parsing.base_url`
    pub list_path: String,

    /// Site markers and selectors
    pub parsing: ParsingConfig,

    /// Headless browser settings
    pub browser: BrowserConfig,

    /// Output file settings
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            list_path: site::LIST_PATH.to_string(),
            parsing: ParsingConfig::default(),
            browser: BrowserConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CrawlerConfig {
    /// Absolute URL of the listing page
    pub fn list_url(&self) -> Result<String> {
        let base = Url::parse(&self.parsing.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.parsing.base_url))?;
        let list_url = base
            .join(&self.list_path)
            .with_context(|| format!("Invalid list path: {}", self.list_path))?;
        Ok(list_url.to_string())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.parsing
            .validate()
            .context("Invalid parsing configuration")?;
        self.list_url()?;

        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(anyhow!("browser window size must be non-zero"));
        }
        if self.browser.user_agent.trim().is_empty() {
            return Err(anyhow!("browser user agent must not be empty"));
        }
        if self.output.matches_path.as_os_str().is_empty() {
            return Err(anyhow!("output path must not be empty"));
        }
        Ok(())
    }
}

/// Headless browser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run Chrome without a window
    pub headless: bool,

    /// Chrome sandbox; usually off inside containers
    pub sandbox: bool,

    /// Fixed user agent presented to the site
    pub user_agent: String,

    pub window_width: u32,
    pub window_height: u32,

    /// Unconditional wait after navigation
    pub settle_delay_ms: u64,

    /// Bound on the wait for match links to appear; expiry is logged, not fatal
    pub ready_timeout_secs: u64,

    /// Selector awaited before extraction; defaults to the anchor selector
    pub ready_selector: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: false,
            user_agent: browser::USER_AGENT.to_string(),
            window_width: browser::WINDOW_WIDTH,
            window_height: browser::WINDOW_HEIGHT,
            settle_delay_ms: browser::SETTLE_DELAY_MS,
            ready_timeout_secs: browser::READY_TIMEOUT_SECS,
            ready_selector: None,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination of the match list JSON
    pub matches_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            matches_path: PathBuf::from(defaults::MATCHES_FILE),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    /// Log file name inside `log_dir`
    pub file_name: String,

    /// Module-specific log level filters (e.g., "headless_chrome": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: HashMap::new(),
        }
    }
}

/// Load configuration from defaults, an optional file, and the environment.
///
/// With `path == None` the default file `config/crawler` is used when it
/// exists. An explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<CrawlerConfig> {
    load_config_with_env(path, None)
}

/// Same as [`load_config`] with an explicit environment map instead of the
/// process environment.
pub fn load_config_with_env(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<CrawlerConfig> {
    let file_source = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(defaults::CONFIG_FILE).required(false),
    };

    let config = build_config(file_source, env)?;
    match path {
        Some(path) => info!("Loaded configuration from: {:?}", path),
        None => info!("Loaded configuration (defaults, optional {}.*)", defaults::CONFIG_FILE),
    }
    Ok(config)
}

/// Defaults, then `file_source`, then the environment; validated
fn build_config(
    file_source: config::File<config::FileSourceFile, config::FileFormat>,
    env: Option<config::Map<String, String>>,
) -> Result<CrawlerConfig> {
    let settings = config::Config::builder()
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix(defaults::ENV_PREFIX)
                .separator(defaults::ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to read configuration sources")?;

    let config: CrawlerConfig = settings
        .try_deserialize()
        .context("Failed to parse configuration")?;
    config.validate()?;
    Ok(config)
}

/// Configuration defaults
pub mod defaults {
    /// Config file looked up when no `--config` is given (extension optional)
    pub const CONFIG_FILE: &str = "config/crawler";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "MATCH_CRAWLER";

    /// Separator between prefix and nested keys
    pub const ENV_SEPARATOR: &str = "__";

    /// Default JSON output file
    pub const MATCHES_FILE: &str = "matches.json";

    // Logging defaults
    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "match-crawler.log";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Optional file source that never exists, whatever the working directory
    fn absent_file(
        dir: &tempfile::TempDir,
    ) -> config::File<config::FileSourceFile, config::FileFormat> {
        config::File::with_name(&dir.path().join("crawler").to_string_lossy()).required(false)
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = build_config(absent_file(&dir), Some(config::Map::new())).unwrap();
        assert_eq!(config, CrawlerConfig::default());
        assert_eq!(config.list_url().unwrap(), "https://st.90phut27.com/home");
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        let mut env = config::Map::new();
        env.insert("MATCH_CRAWLER__BROWSER__HEADLESS".to_string(), "false".to_string());
        env.insert("MATCH_CRAWLER__BROWSER__READY_TIMEOUT_SECS".to_string(), "4".to_string());
        env.insert("MATCH_CRAWLER__LOGGING__LEVEL".to_string(), "debug".to_string());

        let dir = tempfile::tempdir().unwrap();
        let config = build_config(absent_file(&dir), Some(env)).unwrap();
        assert!(!config.browser.headless);
        assert_eq!(config.browser.ready_timeout_secs, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.parsing, ParsingConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "list_path": "/lich-thi-dau", "output": {{ "matches_path": "out/m.json" }} }}"#
        )
        .unwrap();

        let config = load_config_with_env(Some(file.path()), Some(config::Map::new())).unwrap();
        assert_eq!(config.list_path, "/lich-thi-dau");
        assert_eq!(config.output.matches_path, PathBuf::from("out/m.json"));
        assert_eq!(config.browser, BrowserConfig::default());
    }

    #[test]
    fn test_sample_file_matches_defaults() {
        let sample = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/crawler.toml");
        let config = load_config_with_env(Some(&sample), Some(config::Map::new())).unwrap();
        assert_eq!(config, CrawlerConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config_with_env(
            Some(Path::new("does/not/exist.toml")),
            Some(config::Map::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let mut config = CrawlerConfig::default();
        config.browser.window_width = 0;
        assert!(config.validate().is_err());
    }
}
