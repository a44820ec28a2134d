//! Browser automation for the JavaScript-rendered catalog pages
//!
//! Every catalog operation runs in its own short-lived Chrome session: the
//! session is launched, navigated, waited on and torn down inside
//! [`with_session`].
//!
//! # Example
//!
//! ```no_run
//! use manga_catalog_scraper::browser::{with_session, BrowserConfig, BrowserError};
//!
//! # fn main() -> Result<(), BrowserError> {
//! let config = BrowserConfig::default();
//!
//! let html = with_session(&config, |scraper| {
//!     scraper.navigate("https://mangadex.org/titles/latest")?;
//!     scraper.wait_for_selector(".chapter-feed__container")?;
//!     scraper.get_html()
//! })?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod scraper;

pub use config::BrowserConfig;
pub use manager::{with_session, BrowserError, BrowserSession};
pub use scraper::BrowserScraper;
