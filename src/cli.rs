//! Command-line interface definitions for the news harvester.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and the endpoint can also come from environment variables, and
//! an optional YAML file ([`HarvestConfig`]) supplies defaults.

use std::env;

use clap::Parser;

use crate::config::HarvestConfig;
use crate::credentials::Credentials;
use crate::error::HarvestError;
use crate::models::{MAX_PAGE_SIZE, SearchQuery, SortOrder};

/// Command-line arguments for the news harvester.
///
/// # Examples
///
/// ```sh
/// # First page only
/// news_harvester 주식
///
/// # Up to 1000 articles, kept only if they mention a keyword
/// news_harvester 주식 --all-pages -n 1000 -k 배당 -k 실적 -o ./out/stocks.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search terms
    pub query: String,

    /// Articles per page (1-100)
    #[arg(short, long)]
    pub display: Option<u32>,

    /// Page-start value of the first request (1-1000)
    #[arg(short, long, default_value_t = 1)]
    pub start: u32,

    /// Result ordering
    #[arg(long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Keep requesting pages until the total or --max-records is reached
    #[arg(short, long)]
    pub all_pages: bool,

    /// Stop paginating once this many articles are collected
    #[arg(short = 'n', long)]
    pub max_records: Option<usize>,

    /// Only keep articles mentioning one of these terms (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Search API client id
    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Search API client secret
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Search endpoint override
    #[arg(long, env = "NEWS_SEARCH_BASE_URL")]
    pub base_url: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write the harvest as JSON to this path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log progress for every page
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the query, with flags taking precedence over `config`.
    pub fn search_query(&self, config: &HarvestConfig) -> SearchQuery {
        let defaults = SearchQuery::new(self.query.clone());
        SearchQuery {
            page_size: self.display.or(config.page_size).unwrap_or(MAX_PAGE_SIZE),
            start_page: self.start,
            sort: self.sort.or(config.sort).unwrap_or_default(),
            paginate: self.all_pages,
            max_records: self
                .max_records
                .or(config.max_records)
                .unwrap_or(defaults.max_records),
            ..defaults
        }
    }

    /// Keyword terms from the flags, or from `config` when none were given.
    pub fn keywords(&self, config: &HarvestConfig) -> Vec<String> {
        if self.keywords.is_empty() {
            config.keywords.clone()
        } else {
            self.keywords.clone()
        }
    }

    pub fn base_url(&self, config: &HarvestConfig) -> Option<String> {
        self.base_url.clone().or_else(|| config.base_url.clone())
    }

    /// Credentials from the flags, falling back to the environment.
    pub fn credentials(&self) -> Result<Credentials, HarvestError> {
        Credentials::from_lookup(|name| {
            let flag = match name {
                "CLIENT_ID" => self.client_id.clone(),
                "CLIENT_SECRET" => self.client_secret.clone(),
                _ => None,
            };
            flag.or_else(|| env::var(name).ok())
        })
    }
}
