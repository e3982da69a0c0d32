//! Keyword alternation patterns.
//!
//! All keywords are folded into a single regex alternation, each escaped for
//! literal matching. Matching is leftmost-first and non-overlapping; with
//! several alternatives viable at the same position, the earliest one in
//! caller order wins (word-boundary anchoring can veto a shorter alternative
//! whose trailing edge lands inside a word, letting a longer one match).

// ============================================================================
// Imports
// ============================================================================

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::Result;

// ============================================================================
// TextRun
// ============================================================================

/// A segment of text split around keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRun<'t> {
    /// Text outside any match.
    Plain(&'t str),

    /// One matched keyword occurrence.
    Matched(&'t str),
}

// ============================================================================
// KeywordPattern
// ============================================================================

/// Compiled case-folded alternation over a keyword list.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    regex: Regex,
    keyword_count: usize,
}

impl KeywordPattern {
    /// Builds a pattern from a keyword list.
    ///
    /// Keywords are trimmed; empty entries and exact duplicates are dropped.
    /// Returns `Ok(None)` when nothing remains, which is the caller's no-op
    /// case.
    ///
    /// Word-boundary anchors are applied only at edges that are word
    /// characters, so keywords like `C++` still match literally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`](crate::Error::Pattern) if the compiled
    /// alternation is rejected (oversized keyword lists).
    pub fn build<S: AsRef<str>>(
        keywords: &[S],
        word_boundaries: bool,
        case_insensitive: bool,
    ) -> Result<Option<Self>> {
        let mut seen = FxHashSet::default();
        let mut alternatives = Vec::new();

        for keyword in keywords {
            let trimmed = keyword.as_ref().trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                continue;
            }

            let mut alternative = String::new();
            if word_boundaries && trimmed.chars().next().is_some_and(is_word_char) {
                alternative.push_str(r"\b");
            }
            alternative.push_str(&regex::escape(trimmed));
            if word_boundaries && trimmed.chars().next_back().is_some_and(is_word_char) {
                alternative.push_str(r"\b");
            }
            alternatives.push(alternative);
        }

        if alternatives.is_empty() {
            return Ok(None);
        }

        let mut pattern = String::new();
        if case_insensitive {
            pattern.push_str("(?i)");
        }
        pattern.push_str("(?:");
        pattern.push_str(&alternatives.join("|"));
        pattern.push(')');

        Ok(Some(Self {
            regex: Regex::new(&pattern)?,
            keyword_count: alternatives.len(),
        }))
    }

    /// Number of distinct keywords in the alternation.
    #[inline]
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }

    /// Returns the compiled pattern text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns `true` if the text contains at least one keyword occurrence.
    #[inline]
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Splits text into plain and matched runs, in order.
    ///
    /// Matched runs are leftmost-first and never overlap; concatenating all
    /// runs reproduces the input exactly.
    #[must_use]
    pub fn runs<'t>(&self, text: &'t str) -> Vec<TextRun<'t>> {
        let mut runs = Vec::new();
        let mut cursor = 0;

        for found in self.regex.find_iter(text) {
            if found.start() > cursor {
                runs.push(TextRun::Plain(&text[cursor..found.start()]));
            }
            runs.push(TextRun::Matched(found.as_str()));
            cursor = found.end();
        }
        if cursor < text.len() {
            runs.push(TextRun::Plain(&text[cursor..]));
        }

        runs
    }
}

/// Word characters for boundary purposes, matching regex `\w`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ============================================================================
// Tests
// ============================================================================
