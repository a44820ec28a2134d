use serde::{Deserialize, Serialize};

/// One row of the "latest updates" feed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UpdateEntry {
    pub title: String,
    pub manga_url: String,
    pub cover_image: String,
    pub latest_chapter: ChapterUpdate,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChapterUpdate {
    pub title: String,
    pub url: String,
    pub scanlator: Option<String>,
    pub uploaded_by: Option<String>,
    /// Raw `datetime` attribute as the site renders it
    pub timestamp: Option<String>,
}

/// One card of a title grid (recent, all titles, search)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListingEntry {
    pub title: String,
    pub manga_url: String,
    pub cover_image: String,
    pub tags: Vec<String>,
    pub status: String,
    pub rating: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CategoryTag {
    pub id: String,
    pub slug: Option<String>,
    pub name: String,
}

/// A page of results. `results_count` always matches `results`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResultPage<T> {
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    results_count: usize,
    results: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ResultPage<T> {
    pub fn new(page: u32, results: Vec<T>) -> Self {
        Self {
            page,
            query: None,
            category: None,
            results_count: results.len(),
            results,
            error: None,
        }
    }

    /// Empty page carrying an explanation instead of results
    pub fn failed(page: u32, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(page, Vec::new())
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(str::to_string);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn results_count(&self) -> usize {
        self.results_count
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CategoryList {
    total: usize,
    categories: Vec<CategoryTag>,
}

impl CategoryList {
    pub fn new(categories: Vec<CategoryTag>) -> Self {
        Self {
            total: categories.len(),
            categories,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn categories(&self) -> &[CategoryTag] {
        &self.categories
    }
}
