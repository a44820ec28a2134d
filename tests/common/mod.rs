//! Shared fixtures: an in-memory renderer and catalog page markup.
#![allow(dead_code)]

use manga_catalog_scraper::{Catalog, Renderer, ScrapeError};
use manga_catalog_scraper::urls::SiteUrls;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Serves canned HTML per URL. Unknown URLs behave like a page whose
/// containers never render.
#[derive(Default)]
pub struct FixtureRenderer {
    pages: HashMap<String, String>,
    visited: Mutex<Vec<String>>,
}

impl FixtureRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Renderer for FixtureRenderer {
    fn render(&self, url: &str, wait_selector: &str) -> Result<String, ScrapeError> {
        self.visited.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::RenderTimeout {
                url: url.to_string(),
                selector: wait_selector.to_string(),
                timeout: Duration::from_secs(10),
            })
    }
}

pub fn catalog(renderer: FixtureRenderer) -> (Arc<FixtureRenderer>, Catalog) {
    let renderer = Arc::new(renderer);
    let catalog = Catalog::new(renderer.clone(), SiteUrls::default());
    (renderer, catalog)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const TAGS_URL: &str = "https://mangadex.org/titles";

pub const TAGS_PAGE: &str = r#"
<html><body>
  <div class="tag-list">
    <a class="tag" href="/tag/391b0423-d847-456f-aff0-8b0cfc03066b/action">Action</a>
    <a class="tag" href="/tag/423e2eae-a7a2-4a8b-ac03-a8351462d71d/romance">Romance</a>
    <a class="tag" href="/tag/cdc58593-87dd-415e-bbc0-2ec27bf404cc/fantasy">Fantasy</a>
    <a class="tag" href="/help">Help</a>
  </div>
</body></html>"#;

pub fn manga_card(title: Option<&str>, cover: Option<&str>) -> String {
    let title = title
        .map(|t| format!(r#"<a class="title" href="/title/{}">{}</a>"#, t.to_lowercase().replace(' ', "-"), t))
        .unwrap_or_default();
    let cover = cover
        .map(|c| format!(r#"<div class="manga-card-cover"><img src="{}"></div>"#, c))
        .unwrap_or_default();
    format!(
        r#"<div class="manga-card">{}{}
             <div class="tags-row"><a class="tag" href="/tag/t1/action">Action</a></div>
             <div class="status"><span>Ongoing</span></div>
             <span class="stat">8.9</span>
             <div class="description"><p>Blurb for the card.</p></div>
           </div>"#,
        cover, title
    )
}

pub fn card_page(cards: &[String]) -> String {
    format!("<html><body><div class=\"grid\">{}</div></body></html>", cards.concat())
}

pub const FEED_PAGE: &str = r#"
<html><body>
  <div class="chapter-feed__container">
    <a class="chapter-feed__cover" href="/title/a1"><img src="/covers/a1.jpg"></a>
    <a class="chapter-feed__title" href="/title/a1/kingdom">Kingdom</a>
    <a class="chapter-grid" href="/chapter/ch-801"><span class="chapter-link"><span>Ch. 801</span></span></a>
    <div><a class="group-tag" href="/group/g">Group</a><a href="/user/u">Uploader</a>
    <time datetime="2024-06-01T09:30:00.000Z">1 hour ago</time></div>
  </div>
  <div class="chapter-feed__container">
    <a class="chapter-feed__cover" href="/title/a2"><img src="https://uploads.mangadex.org/covers/a2.jpg"></a>
    <a class="chapter-grid" href="/chapter/ch-2"></a>
  </div>
  <div class="chapter-feed__container">
    <a class="chapter-feed__cover" href="/title/a3"><img src="/covers/a3.jpg"></a>
    <a class="chapter-feed__title" href="https://mangadex.org/title/a3">Vagabond</a>
    <a class="chapter-grid" href="/chapter/ch-3"></a>
  </div>
</body></html>"#;
