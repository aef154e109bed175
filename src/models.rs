// =============================================================================
// models.rs - THE SHAPES OF A SCRAPE
// =============================================================================
//
// One SourceRecord per listing page, holding whatever topics and
// discussions we managed to dig out of it. These are serialized verbatim to
// the JSON output and flattened into the CSV, so field names here ARE the
// output format. Rename with care.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FetchError;

/// The `type` tag carried by every extracted item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemKind {
    /// A heading that mentioned one of the keywords.
    #[serde(rename = "python_topics")]
    PythonTopics,

    /// A link pointing at a comment thread.
    #[serde(rename = "discussions")]
    Discussions,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::PythonTopics => "python_topics",
            ItemKind::Discussions => "discussions",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl Topic {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: ItemKind::PythonTopics,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Discussion {
    /// Link text, possibly truncated.
    pub title: String,
    /// Raw href, exactly as it appeared in the page. Never resolved.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl Discussion {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            kind: ItemKind::Discussions,
        }
    }
}

/// Everything we learned from one listing page.
///
/// `source_name` is the listing URL itself rather than a short name like
/// `Python`. Downstream sheets group on the full URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRecord {
    pub source_name: String,
    pub url: String,
    pub page_title: String,
    /// Local date, `YYYY-MM-DD`.
    pub scraped_at: String,
    pub topics: Vec<Topic>,
    pub discussions: Vec<Discussion>,
}

impl SourceRecord {
    /// Only records with at least one topic make it into the output files.
    pub fn has_topics(&self) -> bool {
        !self.topics.is_empty()
    }
}

impl fmt::Display for SourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} topics, {} discussions",
            self.source_name,
            self.scraped_at,
            self.topics.len(),
            self.discussions.len()
        )
    }
}

/// What happened to a single source during the run.
#[derive(Debug)]
pub enum SourceOutcome {
    Scraped(SourceRecord),
    Failed { url: String, error: FetchError },
}

impl SourceOutcome {
    pub fn url(&self) -> &str {
        match self {
            SourceOutcome::Scraped(record) => &record.url,
            SourceOutcome::Failed { url, .. } => url,
        }
    }

    pub fn into_record(self) -> Option<SourceRecord> {
        match self {
            SourceOutcome::Scraped(record) => Some(record),
            SourceOutcome::Failed { .. } => None,
        }
    }
}
