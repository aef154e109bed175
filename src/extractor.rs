// =============================================================================
// extractor.rs - TURNING MARKUP INTO RECORDS
// =============================================================================
//
// Two independent passes over one parsed document:
//
//   Heading pass: h1-h4, in document order. Long enough + mentions a
//   keyword = Topic. Duplicates are kept; a listing that repeats a heading
//   repeats the topic.
//
//   Link pass: every <a href>, in document order. Has real text + href
//   contains the discussion marker + href not seen yet on this page =
//   Discussion. The href is stored raw, never resolved against the page.
//
// Element text follows one rule everywhere: take each descendant text node,
// trim it, drop the empty ones, glue the rest together with no separator.
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::{Config, DISCUSSION_LINK_MARKER, MAX_DISCUSSION_TITLE_CHARS, TRUNCATION_SUFFIX};
use crate::error::ConfigError;
use crate::models::{Discussion, SourceRecord, Topic};
use crate::text_scanner::{char_len, truncate_chars, KeywordMatcher, LinkMarker};

/// Fallback when a page has no usable `<title>`.
pub const NO_TITLE: &str = "No title";

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4").expect("static heading selector"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static link selector"));

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static title selector"));

/// The filtering rules for one run, compiled once and reused for every page.
pub struct Extractor {
    keywords: KeywordMatcher,
    link_marker: LinkMarker,
    min_heading_length: usize,
    min_link_text_length: usize,
}

impl Extractor {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            keywords: KeywordMatcher::new(&config.keywords)?,
            link_marker: LinkMarker::new(DISCUSSION_LINK_MARKER),
            min_heading_length: config.min_heading_length,
            min_link_text_length: config.min_link_text_length,
        })
    }

    /// Build the record for one fetched page.
    pub fn extract(&self, url: &str, body: &str, scraped_at: &str) -> SourceRecord {
        let document = Html::parse_document(body);

        let topics = self.extract_topics(&document);
        let discussions = self.extract_discussions(&document);

        debug!(
            url = url,
            topics = topics.len(),
            discussions = discussions.len(),
            "Page extracted"
        );

        SourceRecord {
            source_name: url.to_string(),
            url: url.to_string(),
            page_title: page_title(&document),
            scraped_at: scraped_at.to_string(),
            topics,
            discussions,
        }
    }

    fn extract_topics(&self, document: &Html) -> Vec<Topic> {
        document
            .select(&HEADING_SELECTOR)
            .map(stripped_text)
            .filter(|text| char_len(text) > self.min_heading_length)
            .filter(|text| self.keywords.is_match(text))
            .map(Topic::new)
            .collect()
    }

    fn extract_discussions(&self, document: &Html) -> Vec<Discussion> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut discussions = Vec::new();

        for anchor in document.select(&LINK_SELECTOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let text = stripped_text(anchor);

            if char_len(&text) <= self.min_link_text_length || !self.link_marker.is_match(href) {
                continue;
            }
            if !seen.insert(href.to_string()) {
                continue;
            }

            discussions.push(Discussion::new(
                truncate_chars(&text, MAX_DISCUSSION_TITLE_CHARS, TRUNCATION_SUFFIX),
                href,
            ));
        }

        discussions
    }
}

/// Descendant text nodes, each trimmed, blanks dropped, joined with nothing.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Text of the first `<title>`, or [`NO_TITLE`] when there is none or it is
/// empty.
fn page_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(&Config::default()).unwrap()
    }

    fn page(title: Option<&str>, body: &str) -> String {
        let head = match title {
            Some(t) => format!("<head><title>{t}</title></head>"),
            None => "<head></head>".to_string(),
        };
        format!("<!DOCTYPE html><html>{head}<body>{body}</body></html>")
    }

    #[test]
    fn test_end_to_end_listing() {
        let html = page(
            Some("r/Python"),
            r#"
            <h1>Python Tips</h1>
            <h2>Random Post</h2>
            <h3>Coding noobs welcome</h3>
            <a href="/r/x/comments/1">Discuss this</a>
            <a href="/r/x/comments/1">Discuss this</a>
            <a href="/other">Q</a>
            "#,
        );
        let record = extractor().extract("https://reddit.com/r/Python/top", &html, "2024-05-01");

        assert_eq!(
            record.topics,
            vec![Topic::new("Python Tips"), Topic::new("Coding noobs welcome")]
        );
        assert_eq!(
            record.discussions,
            vec![Discussion::new("Discuss this", "/r/x/comments/1")]
        );
        assert_eq!(record.page_title, "r/Python");
        assert_eq!(record.source_name, "https://reddit.com/r/Python/top");
        assert_eq!(record.url, "https://reddit.com/r/Python/top");
        assert_eq!(record.scraped_at, "2024-05-01");
    }

    #[test]
    fn test_duplicate_href_kept_once_even_with_different_text() {
        let html = page(
            None,
            r#"
            <a href="/r/x/comments/1">First text</a>
            <a href="/r/x/comments/1">Second text</a>
            <a href="/r/x/comments/2">Other</a>
            "#,
        );
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        assert_eq!(
            record.discussions,
            vec![
                Discussion::new("First text", "/r/x/comments/1"),
                Discussion::new("Other", "/r/x/comments/2"),
            ]
        );
    }

    #[test]
    fn test_rejected_link_does_not_mark_href_seen() {
        // A one-char link must not swallow a later, valid link to the same thread.
        let html = page(
            None,
            r#"
            <a href="/r/x/comments/9">Q</a>
            <a href="/r/x/comments/9">Real title</a>
            "#,
        );
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        assert_eq!(
            record.discussions,
            vec![Discussion::new("Real title", "/r/x/comments/9")]
        );
    }

    #[test]
    fn test_long_link_title_truncated() {
        let long = "x".repeat(150);
        let html = page(None, &format!(r#"<a href="/r/x/comments/3">{long}</a>"#));
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        assert_eq!(record.discussions.len(), 1);
        assert_eq!(record.discussions[0].title, format!("{}... ", "x".repeat(100)));
    }

    #[test]
    fn test_topics_are_not_deduplicated() {
        let html = page(None, "<h2>Python help</h2><h2>Python help</h2>");
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        assert_eq!(record.topics.len(), 2);
    }

    #[test]
    fn test_short_headings_and_other_levels_ignored() {
        let html = page(
            None,
            r#"
            <h4>noob</h4>
            <h3>Py</h3>
            <h5>Python in h5</h5>
            <p>Python paragraph</p>
            "#,
        );
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        // "noob" is 4 chars, which clears the > 3 bar.
        assert_eq!(record.topics, vec![Topic::new("noob")]);
    }

    #[test]
    fn test_nested_heading_text_is_stripped_and_joined() {
        let html = page(
            None,
            "<h3>\n  <span> Learning </span>\n <em>Python</em>  </h3>",
        );
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        assert_eq!(record.topics, vec![Topic::new("LearningPython")]);
    }

    #[test]
    fn test_missing_title_falls_back() {
        let html = page(None, "<h1>Python</h1>");
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        assert_eq!(record.page_title, NO_TITLE);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = page(None, r#"<a name="comments">Jump to /comments</a>"#);
        let record = extractor().extract("https://example.com/", &html, "2024-05-01");
        assert!(record.discussions.is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let config = Config {
            keywords: vec!["rust".into()],
            min_heading_length: 10,
            min_link_text_length: 0,
            ..Config::default()
        };
        let extractor = Extractor::new(&config).unwrap();
        let html = page(
            None,
            r#"
            <h1>Rust tips</h1>
            <h1>Rust tips and tricks</h1>
            <a href="/comments/1">Q</a>
            "#,
        );
        let record = extractor.extract("https://example.com/", &html, "2024-05-01");
        assert_eq!(record.topics, vec![Topic::new("Rust tips and tricks")]);
        assert_eq!(record.discussions, vec![Discussion::new("Q", "/comments/1")]);
    }
}
