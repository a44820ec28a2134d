//! Card-grid shape shared by the recent, all-titles and search pages.

use super::{compile, element_text, image_src, optional_text, required, required_link, required_text};
use crate::error::{ExtractionError, ScrapeError};
use crate::models::ListingEntry;
use crate::urls::SiteUrls;
use scraper::{ElementRef, Selector};

pub const CONTAINER: &str = ".manga-card";

const TITLE: &str = "a.title";
const COVER: &str = ".manga-card-cover img";
const TAGS: &str = ".tags-row a.tag";
const STATUS: &str = ".status span";
// First stat on the card. The grid shows several (rating, follows, ...) without
// labelling them in the markup; the first one is reported as the rating.
const RATING: &str = ".stat";
const DESCRIPTION: &str = ".description p";

const UNKNOWN_STATUS: &str = "Unknown";
const NO_RATING: &str = "N/A";

pub struct CardExtractor<'u> {
    urls: &'u SiteUrls,
    title: Selector,
    cover: Selector,
    tags: Selector,
    status: Selector,
    rating: Selector,
    description: Selector,
}

impl<'u> CardExtractor<'u> {
    pub fn new(urls: &'u SiteUrls) -> Result<Self, ScrapeError> {
        Ok(Self {
            urls,
            title: compile(TITLE)?,
            cover: compile(COVER)?,
            tags: compile(TAGS)?,
            status: compile(STATUS)?,
            rating: compile(RATING)?,
            description: compile(DESCRIPTION)?,
        })
    }

    pub fn extract(&self, container: ElementRef<'_>) -> Result<ListingEntry, ExtractionError> {
        let title_link = required(container, &self.title, TITLE)?;
        let title = required_text(title_link, TITLE)?;
        let manga_url = self.urls.absolutize(required_link(title_link, TITLE)?);

        let cover = required(container, &self.cover, COVER)?;
        let cover_image = self.urls.absolutize(image_src(cover, COVER)?);

        let tags = container
            .select(&self.tags)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();

        Ok(ListingEntry {
            title,
            manga_url,
            cover_image,
            tags,
            status: optional_text(container, &self.status)
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            rating: optional_text(container, &self.rating).unwrap_or_else(|| NO_RATING.to_string()),
            description: optional_text(container, &self.description),
        })
    }
}
