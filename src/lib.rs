//! # News Harvester
//!
//! Paginates a keyed news-search API and collects cleaned, optionally
//! keyword-filtered articles in retrieval order.
//!
//! ## Usage
//!
//! ```no_run
//! use news_harvester::{harvest, Credentials, SearchQuery};
//!
//! # async fn run() -> Result<(), news_harvester::HarvestError> {
//! let credentials = Credentials::from_env()?;
//! let query = SearchQuery::new("주식").paginate(true).with_max_records(300);
//! let result = harvest(&query, &credentials).await?;
//! for record in &result {
//!     println!("{} ({})", record.title, record.publish_date);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Validation**: [`SearchQuery::validate`] rejects bad queries before any request
//! 2. **Fetching**: a [`PageFetcher`] returns one [`SearchPage`] per request
//! 3. **Normalization**: [`Normalizer`] cleans text and parses publish dates
//! 4. **Filtering**: [`KeywordFilter`] drops records without any configured term
//! 5. **Accumulation**: [`Harvester`] appends pages until a cutoff is reached

pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod harvester;
pub mod models;
pub mod normalize;
pub mod output;
pub mod utils;

pub use client::{NewsSearchClient, PageFetcher, PageRequest};
pub use credentials::Credentials;
pub use error::HarvestError;
pub use filter::KeywordFilter;
pub use harvester::{Harvester, harvest};
pub use models::{HarvestResult, NormalizedRecord, RawItem, SearchPage, SearchQuery, SortOrder};
pub use normalize::{Normalizer, TextTransform};
