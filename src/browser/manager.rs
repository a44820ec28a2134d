use super::config::BrowserConfig;
use super::scraper::BrowserScraper;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

/// One browser process with a single tab, torn down on drop
pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch Chrome and open the tab the session works in
    pub fn launch(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let args = config.launch_args();
        let launch_options = Self::build_launch_options(config, &args)?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;

        // Bounds navigate_to / wait_until_navigated
        tab.set_default_timeout(config.navigation_timeout());

        log::debug!("Browser session started (pid {:?})", browser.get_process_id());

        Ok(Self { browser, tab })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        args: &'a [String],
    ) -> Result<LaunchOptions<'a>, BrowserError> {
        LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .idle_browser_timeout(config.navigation_timeout() + config.render_timeout())
            .args(args.iter().map(OsStr::new).collect())
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))
    }

    /// Scraper bound to this session's tab
    pub fn scraper(&self, render_timeout: std::time::Duration) -> BrowserScraper {
        BrowserScraper::with_timeout(self.tab.clone(), render_timeout)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(false) {
            log::debug!("Tab close failed during teardown: {}", e);
        }
        // Dropping `browser` kills the Chrome process
        log::debug!(
            "Browser session closed (pid {:?})",
            self.browser.get_process_id()
        );
    }
}

/// Run `operation` against a fresh browser session.
///
/// The session is released on every exit path: normal return, an error from
/// the operation, or a panic unwinding through it.
pub fn with_session<T, E, F>(config: &BrowserConfig, operation: F) -> Result<T, E>
where
    F: FnOnce(&BrowserScraper) -> Result<T, E>,
    E: From<BrowserError>,
{
    let session = BrowserSession::launch(config)?;
    let scraper = session.scraper(config.render_timeout());
    operation(&scraper)
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    JavaScriptError(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),
}
