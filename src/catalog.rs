//! Catalog operations: latest updates, title listings, search and tags.
//!
//! Every operation renders its page through a [`Renderer`] (one browser
//! session per call with [`HeadlessRenderer`]), then locates the containers
//! for that page shape and extracts them one by one. Entries that cannot be
//! read are dropped and logged; session-level failures fail the call.

use crate::browser::{with_session, BrowserConfig, BrowserError};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::extract::card::{self, CardExtractor};
use crate::extract::feed::{self, FeedExtractor};
use crate::extract::tags::{self, TagExtractor};
use crate::extract::{collect_entries, locate_containers, Extraction};
use crate::metrics::{MetricsTracker, OperationMetrics};
use crate::models::{CategoryList, CategoryTag, ListingEntry, ResultPage, UpdateEntry};
use crate::urls::{clamp_page, CatalogRequest, SiteUrls};
use scraper::Html;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Produces the rendered DOM of a page once `wait_selector` is present
pub trait Renderer: Send + Sync {
    fn render(&self, url: &str, wait_selector: &str) -> Result<String, ScrapeError>;
}

/// Renders pages in a fresh headless Chrome session per call
pub struct HeadlessRenderer {
    config: BrowserConfig,
}

impl HeadlessRenderer {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&self, url: &str, wait_selector: &str) -> Result<String, ScrapeError> {
        let timeout = self.config.render_timeout();

        with_session(&self.config, |scraper| {
            scraper.navigate(url)?;
            scraper.wait_for_selector(wait_selector)?;
            scraper.get_html()
        })
        .map_err(|e: BrowserError| ScrapeError::from_browser(e, url, wait_selector, timeout))
    }
}

/// Lowercased tag name -> tag id. The first tag seen with a name wins.
pub fn category_map(tags: &[CategoryTag]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for tag in tags {
        map.entry(tag.name.trim().to_lowercase())
            .or_insert_with(|| tag.id.clone());
    }
    map
}

type CategoryMap = Arc<HashMap<String, String>>;

/// Name -> id map shared between calls for `ttl`. A zero ttl disables it.
struct CategoryCache {
    ttl: Duration,
    entry: Mutex<Option<(Instant, CategoryMap)>>,
}

impl CategoryCache {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    fn get(&self) -> Option<CategoryMap> {
        if self.ttl.is_zero() {
            return None;
        }
        let entry = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        match &*entry {
            Some((stored_at, map)) if stored_at.elapsed() < self.ttl => Some(map.clone()),
            _ => None,
        }
    }

    fn store(&self, map: HashMap<String, String>) -> CategoryMap {
        let map = Arc::new(map);
        if !self.ttl.is_zero() {
            let mut entry = self.entry.lock().unwrap_or_else(|p| p.into_inner());
            *entry = Some((Instant::now(), map.clone()));
        }
        map
    }
}

pub struct Catalog {
    renderer: Arc<dyn Renderer>,
    urls: SiteUrls,
    categories: CategoryCache,
    metrics: MetricsTracker,
}

impl Catalog {
    pub fn new(renderer: Arc<dyn Renderer>, urls: SiteUrls) -> Self {
        Self {
            renderer,
            urls,
            categories: CategoryCache::new(Duration::ZERO),
            metrics: MetricsTracker::new(),
        }
    }

    /// Headless Chrome catalog for the configured site
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(HeadlessRenderer::new(config.browser.clone())),
            SiteUrls::new(&config.site.base_url),
        )
        .with_category_cache(config.categories.cache_ttl())
    }

    pub fn with_category_cache(mut self, ttl: Duration) -> Self {
        self.categories = CategoryCache::new(ttl);
        self
    }

    pub fn metrics(&self) -> Vec<OperationMetrics> {
        self.metrics.get_all_metrics()
    }

    pub fn get_latest_updates(&self, page: u32) -> Result<ResultPage<UpdateEntry>, ScrapeError> {
        let page = clamp_page(page);
        let url = self.urls.build_url(CatalogRequest::Latest, page);

        let records = self.track("latest", || {
            let extractor = FeedExtractor::new(&self.urls)?;
            let html = self.renderer.render(&url, feed::CONTAINER)?;
            let document = Html::parse_document(&html);
            let containers = locate_containers(&document, feed::CONTAINER)?;
            Ok(collect_entries(containers, "chapter-feed", |c| extractor.extract(c)))
        })?;

        Ok(ResultPage::new(page, records))
    }

    pub fn get_recent_listings(&self, page: u32) -> Result<ResultPage<ListingEntry>, ScrapeError> {
        let page = clamp_page(page);
        let url = self.urls.build_url(CatalogRequest::Recent, page);

        let records = self.track("recent", || self.scrape_cards(&url))?;
        Ok(ResultPage::new(page, records))
    }

    /// All titles, optionally narrowed to one category given by display name.
    ///
    /// An unknown category yields an empty page with an `error` message and
    /// the listing itself is never fetched.
    pub fn get_all_listings(
        &self,
        page: u32,
        category: Option<&str>,
    ) -> Result<ResultPage<ListingEntry>, ScrapeError> {
        let page = clamp_page(page);
        let category = category.map(str::trim).filter(|c| !c.is_empty());

        let category_id = match category {
            Some(name) => match self.resolve_category_id(name)? {
                Some(id) => Some(id),
                None => {
                    log::info!("Category '{}' not found, skipping listing", name);
                    return Ok(ResultPage::failed(page, format!("Category '{}' not found", name))
                        .with_category(Some(name)));
                }
            },
            None => None,
        };

        let url = self.urls.build_url(
            CatalogRequest::Titles {
                category_id: category_id.as_deref(),
            },
            page,
        );

        let records = self.track("titles", || self.scrape_cards(&url))?;
        Ok(ResultPage::new(page, records).with_category(category))
    }

    pub fn search_listings(&self, query: &str, page: u32) -> Result<ResultPage<ListingEntry>, ScrapeError> {
        let page = clamp_page(page);
        let url = self.urls.build_url(CatalogRequest::Search { query }, page);

        let records = self.track("search", || self.scrape_cards(&url))?;
        Ok(ResultPage::new(page, records).with_query(query))
    }

    /// Every tag on the titles page, one entry per tag id
    pub fn get_categories(&self) -> Result<CategoryList, ScrapeError> {
        let tags = self.track("categories", || {
            let mut extraction = self.scrape_tags()?;
            let mut seen = HashSet::new();
            extraction.records.retain(|tag| seen.insert(tag.id.clone()));
            Ok(extraction)
        })?;

        self.categories.store(category_map(&tags));
        Ok(CategoryList::new(tags))
    }

    /// Tag id for a display name, compared case-insensitively.
    /// `Ok(None)` when the site has no such tag.
    pub fn resolve_category_id(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        let key = name.trim().to_lowercase();

        let map = match self.categories.get() {
            Some(map) => map,
            None => {
                let tags = self.track("category_map", || self.scrape_tags())?;
                self.categories.store(category_map(&tags))
            }
        };

        Ok(map.get(&key).cloned())
    }

    fn scrape_cards(&self, url: &str) -> Result<Extraction<ListingEntry>, ScrapeError> {
        let extractor = CardExtractor::new(&self.urls)?;
        let html = self.renderer.render(url, card::CONTAINER)?;
        let document = Html::parse_document(&html);
        let containers = locate_containers(&document, card::CONTAINER)?;
        Ok(collect_entries(containers, "manga-card", |c| extractor.extract(c)))
    }

    fn scrape_tags(&self) -> Result<Extraction<CategoryTag>, ScrapeError> {
        let extractor = TagExtractor::new(&self.urls)?;
        let url = self.urls.build_url(CatalogRequest::Tags, 1);
        let html = self.renderer.render(&url, tags::CONTAINER)?;
        let document = Html::parse_document(&html);

        let (links, other): (Vec<_>, Vec<_>) = locate_containers(&document, tags::CONTAINER)?
            .into_iter()
            .partition(|a| extractor.is_tag_link(*a));
        if !other.is_empty() {
            log::debug!("Skipped {} anchors that are not tag links", other.len());
        }

        Ok(collect_entries(links, "tag", |a| extractor.extract(a)))
    }

    /// Run one operation, record its outcome and hand back the records
    fn track<T, F>(&self, operation: &str, run: F) -> Result<Vec<T>, ScrapeError>
    where
        F: FnOnce() -> Result<Extraction<T>, ScrapeError>,
    {
        let start = Instant::now();
        match run() {
            Ok(extraction) => {
                self.metrics.record_success(
                    operation,
                    start.elapsed(),
                    extraction.records.len(),
                    extraction.failures.len(),
                );
                Ok(extraction.records)
            }
            Err(e) => {
                self.metrics.record_failure(operation, &e);
                Err(e)
            }
        }
    }
}
