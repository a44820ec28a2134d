//! Target URL construction and link normalisation.

use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://mangadex.org";

/// Which catalog page to build a URL for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRequest<'a> {
    Latest,
    Recent,
    Titles { category_id: Option<&'a str> },
    Search { query: &'a str },
    Tags,
}

/// URL rules for one site origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    base_url: String,
}

impl SiteUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Deterministic URL for `request` at `page` (clamped to >= 1)
    pub fn build_url(&self, request: CatalogRequest<'_>, page: u32) -> String {
        let page = clamp_page(page);
        match request {
            CatalogRequest::Latest => format!("{}/titles/latest?page={}", self.base_url, page),
            CatalogRequest::Recent => format!("{}/titles/recent?page={}", self.base_url, page),
            CatalogRequest::Titles { category_id: None } => {
                format!("{}/titles?page={}", self.base_url, page)
            }
            CatalogRequest::Titles { category_id: Some(id) } => format!(
                "{}/titles?page={}&includedTags%5B%5D={}&includedTagsMode=AND",
                self.base_url,
                page,
                urlencoding::encode(id)
            ),
            CatalogRequest::Search { query } => format!(
                "{}/titles?page={}&q={}&onlyAvailableChapters=false",
                self.base_url,
                page,
                urlencoding::encode(query)
            ),
            CatalogRequest::Tags => format!("{}/titles", self.base_url),
        }
    }

    /// Make a link found in the markup absolute. Anything that already
    /// carries a scheme (`https:`, `data:`, `blob:`, ...) is returned as is.
    pub fn absolutize(&self, href: &str) -> String {
        let href = href.trim();
        if has_scheme(href) {
            href.to_string()
        } else if let Some(rest) = href.strip_prefix("//") {
            format!("https://{}", rest)
        } else if href.starts_with('/') {
            format!("{}{}", self.base_url, href)
        } else {
            format!("{}/{}", self.base_url, href)
        }
    }

    /// Path part of a link on this site, if it is on this site at all
    pub fn site_path<'a>(&self, href: &'a str) -> Option<&'a str> {
        let href = href.trim();
        if href.starts_with('/') && !href.starts_with("//") {
            Some(href)
        } else {
            href.strip_prefix(self.base_url.as_str())
                .filter(|rest| rest.starts_with('/'))
        }
    }
}

fn has_scheme(href: &str) -> bool {
    Url::parse(href).is_ok()
}

/// Whether a link leads to a page: fragment-only and `javascript:` links don't
pub fn is_navigable(href: &str) -> bool {
    let href = href.trim();
    let script = href
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("javascript:"));
    !href.is_empty() && !href.starts_with('#') && !script
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Pages are 1-based; anything lower means the first page
pub fn clamp_page(page: u32) -> u32 {
    page.max(1)
}

/// Parse a raw `page` query value. Missing, negative or non-numeric input
/// falls back to the first page.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .map(clamp_page)
        .unwrap_or(1)
}
