// =============================================================================
// text_scanner.rs - KEYWORD AND MARKER MATCHING
// =============================================================================
//
// Two tiny questions get asked thousands of times per page:
//
// 1. Does this heading mention any keyword? One Aho-Corasick automaton over
//    the whole keyword set answers it in a single pass, no matter how many
//    keywords are configured.
//
// 2. Does this href point at a comment thread? A memchr memmem finder,
//    built once, does the substring check.
//
// Matching runs on the fully lowercased text (Unicode lowercasing, not just
// ASCII), against lowercased keywords.
// =============================================================================

use aho_corasick::AhoCorasick;
use memchr::memmem;
use tracing::debug;

use crate::error::ConfigError;

/// Case-insensitive "contains any of" matcher for heading text.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    automaton: AhoCorasick,
}

impl KeywordMatcher {
    /// Build the automaton. Keywords are lowercased; blank entries are
    /// ignored because an empty pattern would match everything.
    pub fn new<I, S>(keywords: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if patterns.is_empty() {
            return Err(ConfigError::NoKeywords);
        }

        debug!(keywords = patterns.len(), "Keyword automaton built");

        Ok(Self {
            automaton: AhoCorasick::new(&patterns)?,
        })
    }

    /// True when the lowercased text contains at least one keyword.
    pub fn is_match(&self, text: &str) -> bool {
        self.automaton.is_match(&text.to_lowercase())
    }
}

/// Exact, case-sensitive substring finder for hrefs.
pub struct LinkMarker {
    finder: memmem::Finder<'static>,
}

impl LinkMarker {
    pub fn new(marker: &str) -> Self {
        Self {
            finder: memmem::Finder::new(marker.as_bytes()).into_owned(),
        }
    }

    pub fn is_match(&self, href: &str) -> bool {
        self.finder.find(href.as_bytes()).is_some()
    }
}

/// Character count, not byte count. A heading of four emoji is four long.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Keep the first `max_chars` characters and append `suffix`, but only when
/// the text is longer than `max_chars`. Shorter text comes back untouched.
pub fn truncate_chars(text: &str, max_chars: usize, suffix: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + suffix.len());
            out.push_str(&text[..cut]);
            out.push_str(suffix);
            out
        }
        None => text.to_string(),
    }
}
