//! Command-line entry point: load configuration and credentials once, run a
//! harvest, then print a summary and optionally write JSON.

use std::error::Error;

use clap::Parser;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use news_harvester::cli::Cli;
use news_harvester::config::{HarvestConfig, load_config};
use news_harvester::output;
use news_harvester::{Harvester, KeywordFilter, NewsSearchClient};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => load_config(path).await?,
        None => HarvestConfig::default(),
    };

    let query = args.search_query(&config);
    let keywords = args.keywords(&config);
    let credentials = args.credentials().inspect_err(|e| {
        error!(error = %e, "No search API credentials; set CLIENT_ID and CLIENT_SECRET");
    })?;

    let mut client = NewsSearchClient::new(credentials)?;
    if let Some(base_url) = args.base_url(&config) {
        client = client.with_base_url(base_url);
    }

    info!(
        query = %query.text,
        page_size = query.page_size,
        paginate = query.paginate,
        max_records = query.max_records,
        keywords = keywords.len(),
        "Starting harvest"
    );

    let harvester = Harvester::new(client)
        .with_filter(KeywordFilter::new(&keywords))
        .verbose(args.verbose);

    let result = match harvester.harvest(&query).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Harvest failed");
            return Err(e.into());
        }
    };

    print!("{}", output::summary(&result));

    if let Some(path) = &args.output {
        output::write_json(&result, path).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        count = result.len(),
        pages = result.pages_fetched,
        "Execution complete"
    );
    Ok(())
}
