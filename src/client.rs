//! Search API client.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: Core trait for fetching one page of search results
//! - [`NewsSearchClient`]: `reqwest`-backed implementation for the Naver
//!   news-search endpoint
//!
//! The harvester only talks to [`PageFetcher`], so the pagination logic can
//! run against any page source.

use std::time::Instant;

use reqwest::Client;
use tracing::{debug, error, instrument, trace};
use url::Url;

use crate::credentials::Credentials;
use crate::error::HarvestError;
use crate::models::{SearchPage, SortOrder};
use crate::utils::truncate_for_log;

/// Default news-search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://openapi.naver.com/v1/search/news.json";

const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Free-text query.
    pub query: String,
    /// Items per page (`display`).
    pub display: u32,
    /// Page-start value (`start`).
    pub start: u32,
    /// Result ordering (`sort`).
    pub sort: SortOrder,
}

/// Source of search-result pages.
pub trait PageFetcher {
    /// Fetch and parse one page.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::Remote`] on a non-success HTTP status
    /// - [`HarvestError::MalformedResponse`] if the body is not a search page
    /// - [`HarvestError::Transport`] if the request could not be completed
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, HarvestError>;
}

/// Client for the keyed news-search API.
#[derive(Debug, Clone)]
pub struct NewsSearchClient {
    http_client: Client,
    credentials: Credentials,
    base_url: String,
}

impl NewsSearchClient {
    /// Creates a client that sends `credentials` with every request.
    pub fn new(credentials: Credentials) -> Result<Self, HarvestError> {
        let http_client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Sets a custom endpoint (useful for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_url(&self, request: &PageRequest) -> Result<Url, HarvestError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            HarvestError::InvalidArgument(format!("invalid base URL {:?}: {e}", self.base_url))
        })?;
        url.query_pairs_mut()
            .append_pair("query", &request.query)
            .append_pair("display", &request.display.to_string())
            .append_pair("start", &request.start.to_string())
            .append_pair("sort", request.sort.as_str());
        Ok(url)
    }
}

impl PageFetcher for NewsSearchClient {
    #[instrument(level = "debug", skip_all, fields(start = request.start, display = request.display))]
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, HarvestError> {
        let url = self.page_url(request)?;
        let t0 = Instant::now();

        debug!(url = %self.base_url, "Sending search request");
        trace!(query = %request.query, sort = request.sort.as_str(), "Search parameters");

        let response = self
            .http_client
            .get(url)
            .header(CLIENT_ID_HEADER, self.credentials.client_id())
            .header(CLIENT_SECRET_HEADER, self.credentials.client_secret())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Network error during search request");
                HarvestError::Transport(e)
            })?;

        let status = response.status();
        debug!(
            status = %status,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Received search response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %truncate_for_log(&body, 300),
                "Search API call failed"
            );
            return Err(HarvestError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            HarvestError::Transport(e)
        })?;

        trace!(bytes = body.len(), "Response body");

        let page: SearchPage = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse search response");
            HarvestError::MalformedResponse(format!("JSON parse error: {e}"))
        })?;

        debug!(
            total = page.total,
            item_count = page.items.len(),
            "Parsed search page"
        );
        Ok(page)
    }
}
