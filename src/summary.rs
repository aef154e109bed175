// ═══════════════════════════════════════════════════════════════
// RUN SUMMARY - how much did we actually find?
// ═══════════════════════════════════════════════════════════════
//
// Counts are taken over every scraped record, before the writer drops
// the topic-less ones. Failed sources are counted separately.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::SourceOutcome;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SourceCounts {
    pub source_name: String,
    pub topics: usize,
    pub discussions: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: Vec<SourceCounts>,
    pub failed_sources: Vec<String>,
    pub total_topics: usize,
    pub total_discussions: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[SourceOutcome]) -> Self {
        let mut sources = Vec::new();
        let mut failed_sources = Vec::new();

        for outcome in outcomes {
            match outcome {
                SourceOutcome::Scraped(record) => sources.push(SourceCounts {
                    source_name: record.source_name.clone(),
                    topics: record.topics.len(),
                    discussions: record.discussions.len(),
                }),
                SourceOutcome::Failed { .. } => failed_sources.push(outcome.url().to_string()),
            }
        }

        let total_topics = sources.iter().map(|s| s.topics).sum();
        let total_discussions = sources.iter().map(|s| s.discussions).sum();

        Self {
            sources,
            failed_sources,
            total_topics,
            total_discussions,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.sources.is_empty()
    }

    /// The human-readable report printed to stdout.
    pub fn render(&self) -> String {
        let mut out = String::from("It's working!!\n");
        for source in &self.sources {
            out.push_str(&format!(
                "\nSubreddit: {}:\n  - {} Python Topics\n  - {} Discussions\n",
                source.source_name, source.topics, source.discussions
            ));
        }
        out.push_str(&format!(
            "\nTotal across all subreddits: {} Topics, {} Discussions",
            self.total_topics, self.total_discussions
        ));
        out
    }

    pub fn log(&self) {
        info!(
            scraped = self.sources.len(),
            failed = self.failed_sources.len(),
            total_topics = self.total_topics,
            total_discussions = self.total_discussions,
            "Run summary"
        );
        if !self.failed_sources.is_empty() {
            warn!(failed_sources = ?self.failed_sources, "Sources skipped this run");
        }
    }
}
