// =============================================================================
// TOPIC SCOUT
//
// Fetch a couple of listing pages, keep the headings that talk about Python
// and every link into a comment thread, then write it all to JSON and CSV.
// One pass, one thread, no flags.
// =============================================================================

mod config;
mod error;
mod extractor;
mod fetcher;
mod models;
mod pipeline;
mod summary;
mod text_scanner;
mod writer;

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::extractor::Extractor;
use crate::fetcher::HttpFetcher;
use crate::models::SourceRecord;
use crate::summary::RunSummary;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env();
    config.validate()?;
    info!(
        sources = config.sources.len(),
        keywords = config.keywords.len(),
        timeout_secs = config.request_timeout.as_secs(),
        delay_secs = config.fetch_delay.as_secs(),
        "Configuration loaded"
    );

    let fetcher = HttpFetcher::new(&config)?;
    let extractor = Extractor::new(&config)?;

    let outcomes = pipeline::run(&config, &fetcher, &extractor).await;

    let summary = RunSummary::from_outcomes(&outcomes);
    summary.log();

    if !summary.has_data() {
        warn!("Every source failed, nothing to write");
        println!("There is no data returned!");
        return Ok(());
    }

    println!("{}", summary.render());

    let records: Vec<SourceRecord> = outcomes
        .into_iter()
        .filter_map(|o| o.into_record())
        .collect();
    let report = writer::save(&records, &config);
    if !report.is_complete() {
        warn!(
            records = report.records_written,
            json = report.json.is_some(),
            csv = report.csv.is_some(),
            "Some outputs were not written"
        );
    }

    Ok(())
}
