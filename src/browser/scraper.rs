use super::manager::BrowserError;
use headless_chrome::Tab;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Navigation and explicit-wait primitives for a browser tab
pub struct BrowserScraper {
    tab: Arc<Tab>,
    render_timeout: Duration,
}

impl BrowserScraper {
    /// Create a new scraper with a custom render timeout
    pub fn with_timeout(tab: Arc<Tab>, render_timeout: Duration) -> Self {
        Self {
            tab,
            render_timeout,
        }
    }

    /// Navigate to a URL and wait for the document load.
    /// Bounded by the tab's default timeout.
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        log::info!("Browser navigating to: {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for an element matching the given CSS selector, using the render timeout
    pub fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        self.wait_for_selector_with_timeout(selector, self.render_timeout)
    }

    /// Poll the DOM until `selector` matches or `timeout` elapses.
    ///
    /// Content on the catalog pages is injected after the load event, so the
    /// document being navigated says nothing about the containers existing yet.
    /// A single `evaluate` is only bounded by the browser idle timeout, so the
    /// polling runs on a worker and the wait gives up at `timeout` regardless.
    pub fn wait_for_selector_with_timeout(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = selector_script(selector)?;
        let tab = Arc::clone(&self.tab);
        let logged = selector.to_string();
        let start = Instant::now();

        let found = poll_until(
            move || match tab.evaluate(&script, false) {
                Ok(result) => result.value.and_then(|v| v.as_bool()) == Some(true),
                Err(e) => {
                    log::debug!("Selector poll for '{}' failed: {}", logged, e);
                    false
                }
            },
            timeout,
        );

        if found {
            log::debug!("Selector '{}' appeared after {:?}", selector, start.elapsed());
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "Waiting for selector: {}",
                selector
            )))
        }
    }

    /// Get the HTML content of the page
    pub fn get_html(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }
}

/// Run `check` on a worker thread every [`POLL_INTERVAL`] until it returns
/// true. Gives up after `timeout` even when `check` is stuck in a call; the
/// worker then stops at its next iteration.
fn poll_until<F>(mut check: F, timeout: Duration) -> bool
where
    F: FnMut() -> bool + Send + 'static,
{
    let (found_tx, found_rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));
    let worker_stop = Arc::clone(&stop);

    thread::spawn(move || {
        while !worker_stop.load(Ordering::Relaxed) {
            if check() {
                let _ = found_tx.send(());
                return;
            }
            thread::sleep(POLL_INTERVAL);
        }
    });

    let found = found_rx.recv_timeout(timeout).is_ok();
    stop.store(true, Ordering::Relaxed);
    found
}

/// JavaScript expression that is `true` once `selector` matches something
fn selector_script(selector: &str) -> Result<String, BrowserError> {
    let literal = serde_json::to_string(selector)
        .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;
    Ok(format!("document.querySelector({}) !== null", literal))
}
