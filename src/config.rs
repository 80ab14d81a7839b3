//! Configuration types for parsing and statistics.
//!
//! Plain builder structs with no CLI framework dependencies.
//!
//! - [`TranscriptConfig`] - how the parser reacts to malformed headers
//! - [`StatsConfig`] - media placeholder, stopwords and table sizes
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{MalformedPolicy, StatsConfig, TranscriptConfig};
//! use chatlens::parser::TranscriptParser;
//!
//! let parser = TranscriptParser::with_config(
//!     TranscriptConfig::new().with_malformed_policy(MalformedPolicy::Strict),
//! );
//!
//! let stats = StatsConfig::new().with_top_words(10);
//! assert_eq!(stats.top_words, 10);
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::stopwords::DEFAULT_STOPWORDS;
use crate::error::ChatlensError;

/// What to do with a header whose date/time cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Drop the record, note it in [`Transcript::skipped`](crate::parser::Transcript::skipped)
    /// and keep parsing.
    #[default]
    Skip,
    /// Fail the whole parse on the first malformed header.
    Strict,
}

/// Configuration for transcript parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Handling of malformed header timestamps (default: skip)
    pub on_malformed: MalformedPolicy,
}

impl TranscriptConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that fails on the first malformed header.
    pub fn strict() -> Self {
        Self {
            on_malformed: MalformedPolicy::Strict,
        }
    }

    /// Sets the malformed header policy.
    #[must_use]
    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Returns `true` if malformed headers abort the parse.
    pub fn is_strict(&self) -> bool {
        self.on_malformed == MalformedPolicy::Strict
    }
}

/// Configuration for statistics and word/emoji tables.
///
/// # Example
///
/// ```rust
/// use chatlens::config::StatsConfig;
///
/// let config = StatsConfig::new()
///     .with_media_placeholder("<Без медиафайлов>")
///     .with_top_words(5);
/// assert!(config.stopword_set().contains("the"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Body text that marks an omitted attachment (default: `<Media omitted>`)
    pub media_placeholder: String,

    /// Lowercase words ignored by word tables (default: built-in English list)
    pub stopwords: Vec<String>,

    /// Number of rows in the common-words table (default: 20)
    pub top_words: usize,

    /// Count words inside system notifications too (default: false)
    pub include_notifications_in_words: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            media_placeholder: "<Media omitted>".to_string(),
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| (*w).to_string()).collect(),
            top_words: 20,
            include_notifications_in_words: false,
        }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }

    /// Replaces the stopword list. Words are lowercased.
    #[must_use]
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    /// Replaces the stopword list with the lines of a text file.
    pub fn with_stopwords_file(self, path: &Path) -> Result<Self, ChatlensError> {
        let content = fs::read_to_string(path)?;
        Ok(self.with_stopwords(content.lines()))
    }

    /// Sets the size of the common-words table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets whether notification bodies feed the word tables.
    #[must_use]
    pub fn with_notifications_in_words(mut self, include: bool) -> Self {
        self.include_notifications_in_words = include;
        self
    }

    /// Stopwords as a lookup set. Words are compared already lowercased.
    pub fn stopword_set(&self) -> HashSet<&str> {
        self.stopwords.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_transcript_config_defaults() {
        let config = TranscriptConfig::default();
        assert_eq!(config.on_malformed, MalformedPolicy::Skip);
        assert!(!config.is_strict());
        assert!(TranscriptConfig::strict().is_strict());
    }

    #[test]
    fn test_stats_config_defaults() {
        let config = StatsConfig::default();
        assert_eq!(config.media_placeholder, "<Media omitted>");
        assert_eq!(config.top_words, 20);
        assert!(!config.include_notifications_in_words);
        let stopwords = config.stopword_set();
        assert!(stopwords.contains("and"));
        assert!(!stopwords.contains("pizza"));
    }

    #[test]
    fn test_with_stopwords_lowercases() {
        let config = StatsConfig::new().with_stopwords(["Hai", " TO ", ""]);
        assert_eq!(config.stopwords, vec!["hai", "to"]);
        assert_eq!(config.stopword_set(), HashSet::from(["hai", "to"]));
    }

    #[test]
    fn test_with_stopwords_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hai\nkya\n\nhai").unwrap();

        let config = StatsConfig::new().with_stopwords_file(file.path()).unwrap();
        assert_eq!(config.stopword_set(), HashSet::from(["hai", "kya"]));
    }

    #[test]
    fn test_with_stopwords_file_missing() {
        let result = StatsConfig::new().with_stopwords_file(Path::new("/no/such/stopwords.txt"));
        assert!(matches!(result, Err(ChatlensError::Io(_))));
    }

    #[test]
    fn test_config_serde() {
        let json = serde_json::to_string(&TranscriptConfig::strict()).unwrap();
        assert!(json.contains("strict"));
        let parsed: TranscriptConfig = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_strict());
    }
}
