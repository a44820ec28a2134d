//! Latest-updates feed: one container per title with its newest chapter.

use super::{compile, first, image_src, optional_text, required, required_link, required_text};
use crate::error::{ExtractionError, ScrapeError};
use crate::models::{ChapterUpdate, UpdateEntry};
use crate::urls::SiteUrls;
use scraper::{ElementRef, Selector};

pub const CONTAINER: &str = ".chapter-feed__container";

const TITLE: &str = "a.chapter-feed__title";
const COVER: &str = "a.chapter-feed__cover img";
const CHAPTER_LINK: &str = "a.chapter-grid";
const CHAPTER_TITLE: &str = "span.chapter-link span";
const SCANLATOR: &str = "a.group-tag";
const UPLOADER: &str = "a[href*='/user/']";
const TIMESTAMP: &str = "time";

const UNTITLED_CHAPTER: &str = "N/A";

pub struct FeedExtractor<'u> {
    urls: &'u SiteUrls,
    title: Selector,
    cover: Selector,
    chapter_link: Selector,
    chapter_title: Selector,
    scanlator: Selector,
    uploader: Selector,
    timestamp: Selector,
}

impl<'u> FeedExtractor<'u> {
    pub fn new(urls: &'u SiteUrls) -> Result<Self, ScrapeError> {
        Ok(Self {
            urls,
            title: compile(TITLE)?,
            cover: compile(COVER)?,
            chapter_link: compile(CHAPTER_LINK)?,
            chapter_title: compile(CHAPTER_TITLE)?,
            scanlator: compile(SCANLATOR)?,
            uploader: compile(UPLOADER)?,
            timestamp: compile(TIMESTAMP)?,
        })
    }

    pub fn extract(&self, container: ElementRef<'_>) -> Result<UpdateEntry, ExtractionError> {
        let title_link = required(container, &self.title, TITLE)?;
        let title = required_text(title_link, TITLE)?;
        let manga_url = self.urls.absolutize(required_link(title_link, TITLE)?);

        let cover = required(container, &self.cover, COVER)?;
        let cover_image = self.urls.absolutize(image_src(cover, COVER)?);

        let chapter_link = required(container, &self.chapter_link, CHAPTER_LINK)?;
        let chapter_url = self.urls.absolutize(required_link(chapter_link, CHAPTER_LINK)?);

        let timestamp = first(container, &self.timestamp)
            .and_then(|t| t.value().attr("datetime"))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(UpdateEntry {
            title,
            manga_url,
            cover_image,
            latest_chapter: ChapterUpdate {
                title: optional_text(container, &self.chapter_title)
                    .unwrap_or_else(|| UNTITLED_CHAPTER.to_string()),
                url: chapter_url,
                scanlator: optional_text(container, &self.scanlator),
                uploaded_by: optional_text(container, &self.uploader),
                timestamp,
            },
        })
    }
}
