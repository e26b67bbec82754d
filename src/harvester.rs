//! Paginated harvesting of search results.
//!
//! A harvest issues sequential page requests, normalizes (and optionally
//! keyword-filters) every item, and stops once the declared total, the page
//! sequence or the `max_records` cutoff is reached.
//!
//! # Cutoff
//!
//! `max_records` is checked between pages only. The last page is always
//! appended whole, so a harvest may return more than `max_records` records.
//!
//! # Failures
//!
//! Any failed page aborts the harvest and drops the records gathered so far.

use tracing::{debug, info, instrument};

use crate::client::{NewsSearchClient, PageFetcher, PageRequest};
use crate::credentials::Credentials;
use crate::error::HarvestError;
use crate::filter::KeywordFilter;
use crate::models::{HarvestResult, MAX_START_PAGE, NormalizedRecord, SearchPage, SearchQuery};
use crate::normalize::Normalizer;

/// Runs harvests against a [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct Harvester<F> {
    fetcher: F,
    normalizer: Normalizer,
    filter: KeywordFilter,
    verbose: bool,
}

impl<F> Harvester<F>
where
    F: PageFetcher,
{
    /// Creates a harvester with the default normalizer and no keyword filter.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::default(),
            filter: KeywordFilter::default(),
            verbose: false,
        }
    }

    pub fn with_filter(mut self, filter: KeywordFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Report per-page progress at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Harvest records for `query`.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::InvalidArgument`] before any request if the query is invalid
    /// - [`HarvestError::Remote`] if any page answers with a non-success status
    /// - [`HarvestError::MalformedResponse`] if a page or one of its dates cannot be parsed
    #[instrument(
        level = "info",
        skip_all,
        fields(query = %query.text, page_size = query.page_size, paginate = query.paginate)
    )]
    pub async fn harvest(&self, query: &SearchQuery) -> Result<HarvestResult, HarvestError> {
        query.validate()?;

        let first = self.fetch(query, query.start_page).await?;
        let declared_total = first.total;
        let mut records = self.collect_page(first)?;
        let mut pages_fetched = 1u32;

        let cap = declared_total.min(query.max_records as u64);
        if self.verbose {
            info!(declared_total, cap, "Search reported total article count");
        } else {
            debug!(declared_total, cap, "Search reported total article count");
        }
        self.report(query.start_page, records.len(), cap);

        if !query.paginate
            || records.len() as u64 >= declared_total
            || records.len() >= query.max_records
        {
            return Ok(HarvestResult {
                declared_total,
                pages_fetched,
                records,
            });
        }

        // Pages needed to cover the cap, counting the first one.
        let page_count = cap.div_ceil(query.page_size as u64);
        let last_page = (query.start_page as u64 + page_count - 1).min(MAX_START_PAGE as u64) as u32;

        for page_index in (query.start_page + 1)..=last_page {
            let page = self.fetch(query, page_index).await?;
            pages_fetched += 1;

            if page.items.is_empty() {
                debug!(page_index, "Empty page; stopping");
                break;
            }

            records.extend(self.collect_page(page)?);
            self.report(page_index, records.len(), cap);

            if records.len() >= query.max_records {
                break;
            }
        }

        info!(
            count = records.len(),
            pages_fetched, "Harvest complete"
        );
        Ok(HarvestResult {
            declared_total,
            pages_fetched,
            records,
        })
    }

    async fn fetch(&self, query: &SearchQuery, start: u32) -> Result<SearchPage, HarvestError> {
        let request = PageRequest {
            query: query.text.clone(),
            display: query.page_size,
            start,
            sort: query.sort,
        };
        self.fetcher.fetch_page(&request).await
    }

    /// Normalize every item of `page` and drop the ones the filter rejects.
    fn collect_page(&self, page: SearchPage) -> Result<Vec<NormalizedRecord>, HarvestError> {
        let mut kept = Vec::with_capacity(page.items.len());
        for item in &page.items {
            let record = self.normalizer.normalize_item(item)?;
            if self.filter.matches(&record) {
                kept.push(record);
            }
        }
        if kept.len() < page.items.len() {
            debug!(
                received = page.items.len(),
                kept = kept.len(),
                "Keyword filter dropped items"
            );
        }
        Ok(kept)
    }

    fn report(&self, page_index: u32, running_total: usize, cap: u64) {
        if self.verbose {
            info!(page_index, running_total, cap, "Fetched page");
        } else {
            debug!(page_index, running_total, cap, "Fetched page");
        }
    }
}

/// Harvest `query` from the news-search API with the given credentials.
///
/// The query is validated before the HTTP client is built, so an invalid
/// query never touches the network.
pub async fn harvest(
    query: &SearchQuery,
    credentials: &Credentials,
) -> Result<HarvestResult, HarvestError> {
    query.validate()?;
    let client = NewsSearchClient::new(credentials.clone())?;
    Harvester::new(client).harvest(query).await
}
