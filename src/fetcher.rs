// =============================================================================
// fetcher.rs - ONE GET PER LISTING, NO SECOND CHANCES
// =============================================================================
//
// A single reqwest client, built once with the configured User-Agent and
// timeout, does every request of the run. Any failure (transport, timeout,
// non-2xx, unreadable body) comes back as a FetchError. There is no retry
// and no circuit breaker: the pipeline logs the error, marks the source as
// failed and moves on.
// =============================================================================

use std::future::Future;

use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, FetchError};

/// Anything that can turn a URL into a page body.
///
/// The pipeline only talks to this trait, so tests can feed it canned pages
/// instead of the network.
pub trait FetchPage {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// The real thing: HTTP GET over reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        debug!(url = url, status = status.as_u16(), bytes = body.len(), "Page fetched");
        Ok(body)
    }
}
