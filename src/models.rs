//! Data models for search queries, raw API pages and normalized records.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`SearchQuery`]: Caller-built, read-only description of one harvest
//! - [`SearchPage`] / [`RawItem`]: The search API's response envelope, as received
//! - [`NormalizedRecord`]: A cleaned article, created once per raw item
//! - [`HarvestResult`]: The ordered records of one harvest
//!
//! Wire structs keep the API's camelCase field names through `serde(rename)`.

use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::HarvestError;

/// Largest number of items the API returns in one page.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Largest page-start value the API accepts.
pub const MAX_START_PAGE: u32 = 1000;

/// Result ordering requested from the search API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest articles first.
    #[default]
    Date,
    /// Most relevant articles first.
    Sim,
}

impl SortOrder {
    /// Value sent as the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Date => "date",
            SortOrder::Sim => "sim",
        }
    }
}

/// Parameters of a single harvest.
///
/// Built by the caller and never mutated by the harvester. Bounds on
/// `page_size` and `start_page` are checked by [`SearchQuery::validate`]
/// before any request is issued.
///
/// # Examples
///
/// ```
/// use news_harvester::{SearchQuery, SortOrder};
///
/// let query = SearchQuery::new("semiconductor")
///     .with_page_size(50)
///     .with_sort(SortOrder::Sim)
///     .paginate(true)
///     .with_max_records(200);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search terms.
    pub text: String,
    /// Items requested per page, `1..=100`.
    pub page_size: u32,
    /// Page-start value of the first request, `1..=1000`.
    pub start_page: u32,
    /// Result ordering.
    pub sort: SortOrder,
    /// Keep requesting pages after the first one. When false, the harvest
    /// stops after the first page.
    pub paginate: bool,
    /// Accumulation cutoff, checked between pages.
    pub max_records: usize,
}

impl SearchQuery {
    /// A query with the default page size (100), first page, date ordering,
    /// no pagination and a 1000-record cutoff.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_size: MAX_PAGE_SIZE,
            start_page: 1,
            sort: SortOrder::Date,
            paginate: false,
            max_records: 1000,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_start_page(mut self, start_page: u32) -> Self {
        self.start_page = start_page;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, paginate: bool) -> Self {
        self.paginate = paginate;
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Check the query before any network call.
    ///
    /// # Errors
    ///
    /// [`HarvestError::InvalidArgument`] if the text is blank, `page_size` is
    /// outside `1..=100` or `start_page` is outside `1..=1000`.
    pub fn validate(&self) -> Result<(), HarvestError> {
        if self.text.trim().is_empty() {
            return Err(HarvestError::InvalidArgument(
                "query text must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(HarvestError::InvalidArgument(format!(
                "page_size must be in 1..={MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if !(1..=MAX_START_PAGE).contains(&self.start_page) {
            return Err(HarvestError::InvalidArgument(format!(
                "start_page must be in 1..={MAX_START_PAGE}, got {}",
                self.start_page
            )));
        }
        Ok(())
    }
}

/// One item of a search page, as returned by the API.
///
/// Fields the crate does not interpret are kept in `extra`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Publish timestamp, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "originallink")]
    pub original_link: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One page of the search API's response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchPage {
    /// Declared total number of matching articles.
    pub total: u64,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub display: u32,
    #[serde(default, rename = "lastBuildDate")]
    pub last_build_date: Option<String>,
    pub items: Vec<RawItem>,
}

/// A cleaned article.
///
/// Created from a [`RawItem`] by the normalizer and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NormalizedRecord {
    /// Title with markup, entities and decorative punctuation removed.
    pub title: String,
    /// Description, cleaned the same way as the title.
    pub description: String,
    /// Publish time with the publisher's UTC offset.
    pub publish_date: DateTime<FixedOffset>,
    /// Link to the article on the search provider.
    pub link: Option<String>,
    /// Link to the article on the publisher's own site.
    pub original_link: Option<String>,
}

/// Ordered records of a single harvest, in page order then in-page order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HarvestResult {
    /// Total the API declared on the first page.
    pub declared_total: u64,
    /// Number of pages requested.
    pub pages_fetched: u32,
    /// Records in retrieval order.
    pub records: Vec<NormalizedRecord>,
}

impl HarvestResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<NormalizedRecord> {
        self.records
    }
}

impl IntoIterator for HarvestResult {
    type Item = NormalizedRecord;
    type IntoIter = std::vec::IntoIter<NormalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a HarvestResult {
    type Item = &'a NormalizedRecord;
    type IntoIter = std::slice::Iter<'a, NormalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::new("stocks");
        assert_eq!(query.page_size, 100);
        assert_eq!(query.start_page, 1);
        assert_eq!(query.sort, SortOrder::Date);
        assert!(!query.paginate);
        assert_eq!(query.max_records, 1000);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_query_validation_bounds() {
        let cases = [
            SearchQuery::new("stocks").with_page_size(0),
            SearchQuery::new("stocks").with_page_size(101),
            SearchQuery::new("stocks").with_start_page(0),
            SearchQuery::new("stocks").with_start_page(1001),
            SearchQuery::new(""),
            SearchQuery::new("   "),
        ];
        for query in cases {
            let err = query.validate().unwrap_err();
            assert!(matches!(err, HarvestError::InvalidArgument(_)), "{query:?}");
        }
    }

    #[test]
    fn test_query_validation_edges_accepted() {
        assert!(SearchQuery::new("a").with_page_size(1).validate().is_ok());
        assert!(SearchQuery::new("a").with_page_size(100).validate().is_ok());
        assert!(SearchQuery::new("a").with_start_page(1000).validate().is_ok());
    }

    #[test]
    fn test_sort_order_as_str() {
        assert_eq!(SortOrder::Date.as_str(), "date");
        assert_eq!(SortOrder::Sim.as_str(), "sim");
    }

    #[test]
    fn test_search_page_deserialization() {
        let json = r#"{
            "lastBuildDate": "Mon, 02 Jan 2006 15:04:05 +0900",
            "total": 2,
            "start": 1,
            "display": 2,
            "items": [
                {
                    "title": "<b>Stocks</b> rally",
                    "originallink": "https://news.example.com/1",
                    "link": "https://n.news.example.com/1",
                    "description": "Markets &quot;up&quot;",
                    "pubDate": "Mon, 02 Jan 2006 15:04:05 +0900",
                    "category": "economy"
                },
                {
                    "title": "Second",
                    "description": "",
                    "pubDate": "Mon, 02 Jan 2006 16:04:05 +0900"
                }
            ]
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "<b>Stocks</b> rally");
        assert_eq!(
            page.items[0].original_link.as_deref(),
            Some("https://news.example.com/1")
        );
        assert_eq!(page.items[0].extra.get("category").unwrap(), "economy");
        assert_eq!(page.items[1].link, None);
    }

    #[test]
    fn test_search_page_requires_items() {
        let json = r#"{ "total": 5, "start": 1, "display": 10 }"#;
        assert!(serde_json::from_str::<SearchPage>(json).is_err());
    }

    #[test]
    fn test_harvest_result_iteration_order() {
        let date = DateTime::parse_from_rfc3339("2006-01-02T15:04:05+09:00").unwrap();
        let record = |title: &str| NormalizedRecord {
            title: title.to_string(),
            description: String::new(),
            publish_date: date,
            link: None,
            original_link: None,
        };
        let result = HarvestResult {
            declared_total: 2,
            pages_fetched: 1,
            records: vec![record("first"), record("second")],
        };

        let titles: Vec<&str> = result.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
    }
}
