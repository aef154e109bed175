// =============================================================================
// error.rs - EVERYTHING THAT CAN GO WRONG, NAMED
// =============================================================================
//
// Three families, three blast radii:
//   FetchError  - one source is lost, the run carries on
//   WriteError  - one output file is lost, the other is still attempted
//   ConfigError - nothing has happened yet, so we refuse to start
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize JSON for {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not write CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no sources configured")]
    NoSources,

    #[error("invalid source URL '{url}': {reason}")]
    InvalidSource { url: String, reason: String },

    #[error("no keywords configured")]
    NoKeywords,

    #[error("could not build keyword matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
