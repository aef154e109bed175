// =============================================================================
// pipeline.rs - FETCH, EXTRACT, NAP, REPEAT
// =============================================================================
//
// Sources are visited strictly one after another, in configured order. Each
// one ends up as a SourceOutcome: either a scraped record or the error that
// stopped us. A failed source never stops the loop.
//
// After every successful fetch we sleep for the configured delay. That is
// the whole politeness policy; failed fetches do not earn a nap.
// =============================================================================

use tracing::{info, warn};

use crate::config::Config;
use crate::extractor::Extractor;
use crate::fetcher::FetchPage;
use crate::models::SourceOutcome;

/// Today's local date in the `YYYY-MM-DD` form stamped on every record.
pub fn today_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub async fn run<F: FetchPage>(
    config: &Config,
    fetcher: &F,
    extractor: &Extractor,
) -> Vec<SourceOutcome> {
    let mut outcomes = Vec::with_capacity(config.sources.len());

    for url in &config.sources {
        println!("Scraping for: {url}");

        let body = match fetcher.fetch(url).await {
            Ok(body) => body,
            Err(error) => {
                warn!(url = %url, error = %error, "Source skipped");
                println!("Error scraping {url}: {error}");
                outcomes.push(SourceOutcome::Failed {
                    url: url.clone(),
                    error,
                });
                continue;
            }
        };

        let record = extractor.extract(url, &body, &today_stamp());
        info!(%record, "Source scraped");
        outcomes.push(SourceOutcome::Scraped(record));

        tokio::time::sleep(config.fetch_delay).await;
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Serves canned bodies; any URL it doesn't know answers with HTTP 503.
    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
            }
        }
    }

    impl FetchPage for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }

    fn config_for(sources: &[&str]) -> Config {
        Config {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            fetch_delay: Duration::ZERO,
            ..Config::default()
        }
    }

    const GOOD_PAGE: &str = r#"<html><head><title>ok</title></head><body>
        <h2>Python packaging woes</h2>
        <a href="/r/p/comments/7">Thread</a>
        </body></html>"#;

    #[tokio::test]
    async fn test_failed_source_does_not_stop_later_ones() {
        let config = config_for(&["https://a.example/down", "https://b.example/up"]);
        let fetcher = StubFetcher::new(&[("https://b.example/up", GOOD_PAGE)]);
        let extractor = Extractor::new(&config).unwrap();

        let outcomes = run(&config, &fetcher, &extractor).await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            &outcomes[0],
            SourceOutcome::Failed { url, .. } if url == "https://a.example/down"
        ));
        let SourceOutcome::Scraped(record) = &outcomes[1] else {
            panic!("second source should have been scraped");
        };
        assert_eq!(record.url, "https://b.example/up");
        assert_eq!(record.topics.len(), 1);
        assert_eq!(record.discussions.len(), 1);
    }

    #[tokio::test]
    async fn test_outcomes_follow_configured_order() {
        let config = config_for(&["https://b.example/1", "https://a.example/2"]);
        let fetcher = StubFetcher::new(&[
            ("https://a.example/2", GOOD_PAGE),
            ("https://b.example/1", GOOD_PAGE),
        ]);
        let extractor = Extractor::new(&config).unwrap();

        let outcomes = run(&config, &fetcher, &extractor).await;
        let urls: Vec<&str> = outcomes.iter().map(|o| o.url()).collect();
        assert_eq!(urls, vec!["https://b.example/1", "https://a.example/2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_only_after_successful_fetches() {
        let config = Config {
            fetch_delay: Duration::from_secs(3),
            ..config_for(&[
                "https://a.example/up",
                "https://b.example/down",
                "https://c.example/up",
            ])
        };
        let fetcher = StubFetcher::new(&[
            ("https://a.example/up", GOOD_PAGE),
            ("https://c.example/up", GOOD_PAGE),
        ]);
        let extractor = Extractor::new(&config).unwrap();

        let started = tokio::time::Instant::now();
        let outcomes = run(&config, &fetcher, &extractor).await;

        assert_eq!(outcomes.len(), 3);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(6), "waited {waited:?}");
        assert!(waited < Duration::from_secs(9), "waited {waited:?}");
    }

    #[test]
    fn test_today_stamp_shape() {
        let stamp = today_stamp();
        assert_eq!(stamp.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&stamp, "%Y-%m-%d").is_ok());
    }
}
