//! Error types for catalog operations.
//!
//! [`ScrapeError`] aborts a whole operation. [`ExtractionError`] only ever
//! describes a single container and is recovered by dropping that entry.

use crate::browser::BrowserError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("'{selector}' did not render on {url} within {timeout:?}")]
    RenderTimeout {
        url: String,
        selector: String,
        timeout: Duration,
    },

    #[error("Navigation to {url} failed: {reason}")]
    NavigationFailure { url: String, reason: String },

    #[error("Browser session error: {0}")]
    Session(#[from] BrowserError),

    #[error("Invalid CSS selector '{0}'")]
    InvalidSelector(String),

    #[error("Invalid link pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl ScrapeError {
    /// Attach the page being scraped to a session-level failure
    pub fn from_browser(err: BrowserError, url: &str, selector: &str, timeout: Duration) -> Self {
        match err {
            BrowserError::Timeout(_) => ScrapeError::RenderTimeout {
                url: url.to_string(),
                selector: selector.to_string(),
                timeout,
            },
            BrowserError::NavigationError(reason) => ScrapeError::NavigationFailure {
                url: url.to_string(),
                reason,
            },
            other => ScrapeError::Session(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("missing required element '{0}'")]
    MissingElement(&'static str),

    #[error("element '{selector}' has no '{attribute}' attribute")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },

    #[error("element '{0}' has no text")]
    EmptyText(&'static str),

    #[error("element '{selector}' links to '{href}', which is not a page")]
    UnusableLink { selector: &'static str, href: String },
}
