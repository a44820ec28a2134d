// Library interface for manga_catalog_scraper
// The binary in main.rs is a thin HTTP layer over `catalog::Catalog`.

pub mod api;
pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod models;
pub mod urls;

pub use catalog::{Catalog, HeadlessRenderer, Renderer};
pub use error::{ExtractionError, ScrapeError};
