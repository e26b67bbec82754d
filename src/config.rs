//! Optional YAML configuration for the command-line harvester.
//!
//! Values here act as defaults; command-line flags win over them.
//!
//! ```yaml
//! keywords:
//!   - 배당
//!   - dividend
//! page_size: 100
//! max_records: 500
//! sort: date
//! base_url: https://openapi.naver.com/v1/search/news.json
//! ```

use std::error::Error;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

use crate::models::SortOrder;

/// Defaults loaded from a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarvestConfig {
    /// Keyword filter terms.
    pub keywords: Vec<String>,
    pub page_size: Option<u32>,
    pub max_records: Option<usize>,
    pub sort: Option<SortOrder>,
    /// Search endpoint override.
    pub base_url: Option<String>,
}

impl HarvestConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}

/// Read and parse the config file at `path`.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn load_config(path: &str) -> Result<HarvestConfig, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let config = HarvestConfig::from_yaml_str(&raw)?;
    info!(keywords = config.keywords.len(), "Loaded configuration");
    Ok(config)
}
