//! Container location and per-entry record extraction.
//!
//! Extraction works on the rendered HTML snapshot the session driver hands
//! back. Each page shape has its own module; they all share the helpers
//! here for reading text and attributes and the [`collect_entries`] fold.

pub mod card;
pub mod feed;
pub mod tags;

use crate::error::{ExtractionError, ScrapeError};
use crate::urls::is_navigable;
use scraper::{ElementRef, Html, Selector};

pub(crate) fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::InvalidSelector(css.to_string()))
}

/// Ordered list of the elements matching `selector`
pub fn locate_containers<'a>(
    document: &'a Html,
    selector: &str,
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let selector = compile(selector)?;
    Ok(document.select(&selector).collect())
}

/// Records extracted from a page and the entries that had to be dropped
#[derive(Debug)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub failures: Vec<EntryFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// Position of the container on the page
    pub index: usize,
    pub error: ExtractionError,
}

/// Run `extract` over every container, keeping going past failures.
///
/// A container that fails is left out entirely; nothing partial is emitted
/// for it.
pub fn collect_entries<'a, T, F>(
    containers: impl IntoIterator<Item = ElementRef<'a>>,
    shape: &str,
    mut extract: F,
) -> Extraction<T>
where
    F: FnMut(ElementRef<'a>) -> Result<T, ExtractionError>,
{
    let mut extraction = Extraction {
        records: Vec::new(),
        failures: Vec::new(),
    };

    for (index, container) in containers.into_iter().enumerate() {
        match extract(container) {
            Ok(record) => extraction.records.push(record),
            Err(error) => {
                log::warn!("Error parsing {} entry #{}: {}", shape, index, error);
                extraction.failures.push(EntryFailure { index, error });
            }
        }
    }

    extraction
}

/// Visible text of an element with whitespace runs collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

pub(crate) fn first<'a>(container: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    container.select(selector).next()
}

pub(crate) fn required<'a>(
    container: ElementRef<'a>,
    selector: &Selector,
    name: &'static str,
) -> Result<ElementRef<'a>, ExtractionError> {
    first(container, selector).ok_or(ExtractionError::MissingElement(name))
}

pub(crate) fn required_text(element: ElementRef<'_>, name: &'static str) -> Result<String, ExtractionError> {
    let text = element_text(element);
    if text.is_empty() {
        Err(ExtractionError::EmptyText(name))
    } else {
        Ok(text)
    }
}

pub(crate) fn required_attr<'a>(
    element: ElementRef<'a>,
    attribute: &'static str,
    name: &'static str,
) -> Result<&'a str, ExtractionError> {
    element
        .value()
        .attr(attribute)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ExtractionError::MissingAttribute {
            selector: name,
            attribute,
        })
}

/// `href` of a link that has to lead somewhere
pub(crate) fn required_link<'a>(element: ElementRef<'a>, name: &'static str) -> Result<&'a str, ExtractionError> {
    let href = required_attr(element, "href", name)?;
    if is_navigable(href) {
        Ok(href)
    } else {
        Err(ExtractionError::UnusableLink {
            selector: name,
            href: href.to_string(),
        })
    }
}

/// Image source. Lazy-loaded images keep the real URL in `data-src` and an
/// inline `data:` placeholder in `src`.
pub(crate) fn image_src<'a>(img: ElementRef<'a>, name: &'static str) -> Result<&'a str, ExtractionError> {
    if let Ok(lazy) = required_attr(img, "data-src", name) {
        return Ok(lazy);
    }
    required_attr(img, "src", name)
        .ok()
        .filter(|src| !is_inline_data(src))
        .ok_or(ExtractionError::MissingAttribute {
            selector: name,
            attribute: "src",
        })
}

fn is_inline_data(src: &str) -> bool {
    src.get(..5).is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Text of the first match, `None` when absent or blank
pub(crate) fn optional_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(container, selector)
        .map(element_text)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <ul>
            <li class="item"><span>  one
                two </span></li>
            <li class="item"><span></span></li>
            <li class="item"><span>three</span></li>
        </ul>"#;

    #[test]
    fn test_locate_containers_in_document_order() {
        let document = Html::parse_document(PAGE);
        let items = locate_containers(&document, "li.item").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(element_text(items[0]), "one two");
        assert_eq!(element_text(items[2]), "three");
    }

    #[test]
    fn test_locate_containers_rejects_bad_selector() {
        let document = Html::parse_document(PAGE);
        assert!(matches!(
            locate_containers(&document, "li[["),
            Err(ScrapeError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_collect_entries_skips_failures_and_keeps_going() {
        let document = Html::parse_document(PAGE);
        let items = locate_containers(&document, "li.item").unwrap();
        let span = compile("span").unwrap();

        let extraction = collect_entries(items, "test", |item| {
            required_text(required(item, &span, "span")?, "span")
        });

        assert_eq!(extraction.records, vec!["one two".to_string(), "three".to_string()]);
        assert_eq!(
            extraction.failures,
            vec![EntryFailure {
                index: 1,
                error: ExtractionError::EmptyText("span"),
            }]
        );
    }

    #[test]
    fn test_image_src_falls_back_to_data_src() {
        let document = Html::parse_fragment(r#"<img data-src="/covers/lazy.jpg"><img src=" ">"#);
        let imgs = locate_containers(&document, "img").unwrap();
        assert_eq!(image_src(imgs[0], "img"), Ok("/covers/lazy.jpg"));
        assert_eq!(
            image_src(imgs[1], "img"),
            Err(ExtractionError::MissingAttribute {
                selector: "img",
                attribute: "src",
            })
        );
    }

    #[test]
    fn test_image_src_skips_inline_placeholder() {
        let document = Html::parse_fragment(
            r#"<img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" data-src="/covers/real.jpg">
               <img src="DATA:image/gif;base64,R0lGODlhAQABAAAAACw=">
               <img src="/covers/plain.jpg" data-src="">"#,
        );
        let imgs = locate_containers(&document, "img").unwrap();
        assert_eq!(image_src(imgs[0], "img"), Ok("/covers/real.jpg"));
        assert!(image_src(imgs[1], "img").is_err());
        assert_eq!(image_src(imgs[2], "img"), Ok("/covers/plain.jpg"));
    }

    #[test]
    fn test_required_link_rejects_placeholders() {
        let document = Html::parse_fragment(
            r##"<a href="/title/a1">ok</a><a href="#">top</a><a href="javascript:void(0)">js</a>"##,
        );
        let links = locate_containers(&document, "a").unwrap();
        assert_eq!(required_link(links[0], "a"), Ok("/title/a1"));
        assert_eq!(
            required_link(links[1], "a"),
            Err(ExtractionError::UnusableLink {
                selector: "a",
                href: "#".to_string(),
            })
        );
        assert!(required_link(links[2], "a").is_err());
    }
}
