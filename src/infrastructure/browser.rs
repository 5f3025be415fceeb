//! Headless Chrome session
//!
//! One browser process and one tab, used for every page of a run. The
//! driver is blocking, so callers inside an async runtime should move the
//! whole session into `spawn_blocking`.

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::infrastructure::config::BrowserConfig;
use crate::infrastructure::crawl_error::{CrawlError, CrawlResult};

/// Source of rendered page HTML
pub trait PageSource {
    /// Load `url` and return the rendered document.
    ///
    /// When `ready_selector` is given, waits a bounded time for it to appear;
    /// a timeout is logged and the current DOM is returned anyway.
    fn load_page(&self, url: &str, ready_selector: Option<&str>) -> CrawlResult<String>;
}

/// Browser process plus the tab used for navigation.
///
/// Dropping the session shuts the browser down, on success and error paths alike.
pub struct BrowserSession {
    // Declared before `browser` so the tab is released first.
    tab: Arc<Tab>,
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Launch Chrome and open the working tab
    pub fn launch(config: &BrowserConfig) -> CrawlResult<Self> {
        let launch_options = LaunchOptions {
            headless: config.headless,
            sandbox: config.sandbox,
            window_size: Some((config.window_width, config.window_height)),
            args: vec![
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-gpu"),
            ],
            ..Default::default()
        };

        info!(
            "Launching browser (headless: {}, window: {}x{})",
            config.headless, config.window_width, config.window_height
        );
        let browser = Browser::new(launch_options).map_err(|e| CrawlError::BrowserLaunch {
            reason: format!("{e:#}"),
        })?;

        let tab = browser.new_tab().map_err(|e| CrawlError::BrowserLaunch {
            reason: format!("Failed to create new tab: {e:#}"),
        })?;

        tab.set_user_agent(&config.user_agent, None, None)
            .map_err(|e| CrawlError::BrowserLaunch {
                reason: format!("Failed to set user agent: {e:#}"),
            })?;

        Ok(Self {
            tab,
            browser,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Chrome version string, for diagnostics
    pub fn version(&self) -> Option<String> {
        self.browser.get_version().ok().map(|v| v.product)
    }
}

impl PageSource for BrowserSession {
    fn load_page(&self, url: &str, ready_selector: Option<&str>) -> CrawlResult<String> {
        debug!("Navigating to: {}", url);
        self.tab
            .navigate_to(url)
            .map_err(|e| CrawlError::navigation(url, &e))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| CrawlError::navigation(url, &e))?;

        // Scripts keep filling the list after the load event.
        std::thread::sleep(Duration::from_millis(self.config.settle_delay_ms));

        if let Some(selector) = ready_selector {
            let timeout = Duration::from_secs(self.config.ready_timeout_secs);
            match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
                Ok(_) => debug!("Ready marker '{}' present on {}", selector, url),
                Err(e) => warn!(
                    "Ready marker '{}' not found on {} within {:?}, continuing with current DOM: {}",
                    selector, url, timeout, e
                ),
            }
        }

        self.tab.get_content().map_err(|e| CrawlError::Snapshot {
            url: url.to_string(),
            reason: format!("{e:#}"),
        })
    }
}
