//! Tag anchors on the titles page.

use super::required_text;
use crate::error::{ExtractionError, ScrapeError};
use crate::models::CategoryTag;
use crate::urls::SiteUrls;
use regex::Regex;
use scraper::ElementRef;

pub const CONTAINER: &str = "a.tag";

/// `/tag/{id}` with an optional `/{slug}`, query or fragment
const TAG_PATH: &str = r"^/tag/([^/?#]+)(?:/([^/?#]+))?/?(?:[?#].*)?$";

pub struct TagExtractor<'u> {
    urls: &'u SiteUrls,
    tag_path: Regex,
}

impl<'u> TagExtractor<'u> {
    pub fn new(urls: &'u SiteUrls) -> Result<Self, ScrapeError> {
        Ok(Self {
            urls,
            tag_path: Regex::new(TAG_PATH)?,
        })
    }

    /// `(id, slug)` for a tag link, `None` for anything else
    pub fn parse_href(&self, href: &str) -> Option<(String, Option<String>)> {
        let path = self.urls.site_path(href)?;
        let caps = self.tag_path.captures(path)?;
        let id = caps.get(1)?.as_str().to_string();
        let slug = caps.get(2).map(|m| m.as_str().to_string());
        Some((id, slug))
    }

    /// Whether the anchor points at a tag page at all
    pub fn is_tag_link(&self, anchor: ElementRef<'_>) -> bool {
        anchor
            .value()
            .attr("href")
            .and_then(|href| self.parse_href(href))
            .is_some()
    }

    /// Only called on anchors that passed [`Self::is_tag_link`]
    pub fn extract(&self, anchor: ElementRef<'_>) -> Result<CategoryTag, ExtractionError> {
        let (id, slug) = anchor
            .value()
            .attr("href")
            .and_then(|href| self.parse_href(href))
            .ok_or(ExtractionError::MissingAttribute {
                selector: CONTAINER,
                attribute: "href",
            })?;

        Ok(CategoryTag {
            id,
            slug,
            name: required_text(anchor, CONTAINER)?,
        })
    }
}
