// =============================================================================
// config.rs - THE KNOB DRAWER
// =============================================================================
//
// Everything the scraper would otherwise hardcode lives here: which pages to
// hit, which words make a heading interesting, how long to wait, where to
// dump the results. Out of the box the defaults reproduce the classic run
// (two listings, five keywords, 10s timeout, 3s nap between pages).
//
// Every value can be overridden via environment variables prefixed with
// TOPIC_SCOUT_. A .env file in the working directory is honored too.
// =============================================================================

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Listings scraped when nobody says otherwise.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://reddit.com/r/Python/top",
    "https://reddit.com/r/learnpython/hot",
];

/// A heading must mention at least one of these (case-insensitively) to
/// count as a topic.
pub const DEFAULT_KEYWORDS: &[&str] = &["python", "coding", "programming", "noob", "backend"];

/// A desktop Firefox string. Listing pages are noticeably friendlier to
/// browsers than to anything that admits to being a script.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:143.0) Gecko/20100101 Firefox/143.0";

/// Substring an href must contain to be treated as a discussion thread.
pub const DISCUSSION_LINK_MARKER: &str = "/comments";

/// Discussion titles longer than this many characters get cut.
pub const MAX_DISCUSSION_TITLE_CHARS: usize = 100;

/// Appended to a cut discussion title. Yes, the trailing space is on purpose;
/// downstream consumers already match on it.
pub const TRUNCATION_SUFFIX: &str = "... ";

#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // WHAT TO SCRAPE
    // =========================================================================

    /// Listing URLs, processed strictly in this order.
    pub sources: Vec<String>,

    /// Lowercased keywords. A heading qualifies when its lowercased text
    /// contains any of them.
    pub keywords: Vec<String>,

    /// Heading text must be strictly longer than this (in characters).
    pub min_heading_length: usize,

    /// Link text must be strictly longer than this (in characters).
    pub min_link_text_length: usize,

    // =========================================================================
    // HOW TO FETCH
    // =========================================================================

    pub user_agent: String,

    /// Per-request timeout. Covers connect + headers + body.
    pub request_timeout: Duration,

    /// Fixed nap after every successful fetch. This is the entire rate
    /// limiting strategy.
    pub fetch_delay: Duration,

    // =========================================================================
    // WHERE TO WRITE
    // =========================================================================

    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            min_heading_length: 3,
            min_link_text_length: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            fetch_delay: Duration::from_secs(3),
            json_path: PathBuf::from("python_topics.json"),
            csv_path: PathBuf::from("python_topics.csv"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// [`Config::default`] for anything unset or unparseable.
    pub fn from_env() -> Self {
        // Missing .env is the normal case.
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        Config {
            sources: env_list("TOPIC_SCOUT_SOURCES").unwrap_or(defaults.sources),
            keywords: env_list("TOPIC_SCOUT_KEYWORDS")
                .map(|words| words.into_iter().map(|w| w.to_lowercase()).collect())
                .unwrap_or(defaults.keywords),
            min_heading_length: env_parse(
                "TOPIC_SCOUT_MIN_HEADING_LENGTH",
                defaults.min_heading_length,
            ),
            min_link_text_length: env_parse(
                "TOPIC_SCOUT_MIN_LINK_TEXT_LENGTH",
                defaults.min_link_text_length,
            ),
            user_agent: env_or_default("TOPIC_SCOUT_USER_AGENT", &defaults.user_agent),
            request_timeout: Duration::from_secs(env_parse(
                "TOPIC_SCOUT_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            fetch_delay: Duration::from_secs(env_parse(
                "TOPIC_SCOUT_FETCH_DELAY_SECS",
                defaults.fetch_delay.as_secs(),
            )),
            json_path: env::var("TOPIC_SCOUT_JSON_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.json_path),
            csv_path: env::var("TOPIC_SCOUT_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
        }
    }

    /// Reject configurations that could never produce a useful run.
    /// This is the only place the scraper is allowed to give up early.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }
        for source in &self.sources {
            let parsed = Url::parse(source).map_err(|e| ConfigError::InvalidSource {
                url: source.clone(),
                reason: e.to_string(),
            })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(ConfigError::InvalidSource {
                    url: source.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }
        if self.keywords.iter().all(|k| k.is_empty()) {
            return Err(ConfigError::NoKeywords);
        }
        Ok(())
    }
}

/// Read an environment variable with a default fallback.
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable; garbage means default.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Comma-separated list. `None` when unset or when every entry is blank.
fn env_list(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().and_then(|raw| split_list(&raw))
}

fn split_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
