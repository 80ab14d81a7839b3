//! Transcript parser: raw export text to [`MessageRecord`]s.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::TranscriptParser;
//!
//! let text = "1/2/24, 10:30 AM - Alice: hello there\n\
//!             1/2/24, 10:31 AM - Bob: hi Alice";
//!
//! let transcript = TranscriptParser::new().parse_str(text)?;
//! assert_eq!(transcript.len(), 2);
//! assert_eq!(transcript.records()[0].author(), Some("Alice"));
//! assert_eq!(transcript.records()[1].body(), "hi Alice");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! # Malformed headers
//!
//! A header such as `13/45/24, 10:30 AM - ` is recognized as a message
//! boundary but its date cannot be parsed. With the default
//! [`MalformedPolicy::Skip`] the record is dropped and reported in
//! [`Transcript::skipped`]; with [`MalformedPolicy::Strict`] parsing fails.

use std::fs;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::MessageRecord;
use crate::config::{MalformedPolicy, TranscriptConfig};
use crate::error::ChatlensError;
use crate::parsing::{Segment, split_author, split_segments};
use crate::record::LineEnd;

/// A header that was recognized but could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSpan {
    /// Header text, special spaces normalized.
    pub header: String,
    /// Byte range of header and body in the transcript.
    pub span: Range<usize>,
    /// Why the record was dropped.
    pub reason: String,
}

/// Parse result: the records plus any skipped spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    records: Vec<MessageRecord>,
    skipped: Vec<SkippedSpan>,
}

impl Transcript {
    /// Records in transcript order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Headers dropped because their timestamp did not parse.
    pub fn skipped(&self) -> &[SkippedSpan] {
        &self.skipped
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was produced.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the transcript, returning its records.
    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }

    /// Distinct human authors, sorted.
    pub fn authors(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = self
            .records
            .iter()
            .filter_map(MessageRecord::author)
            .collect();
        authors.sort_unstable();
        authors.dedup();
        authors
    }

    /// Concatenated reconstruction of every record.
    ///
    /// For a well-formed transcript this equals the input from its first
    /// header on, with special spaces in headers normalized.
    pub fn reconstruct(&self) -> String {
        self.records.iter().map(MessageRecord::reconstruct).collect()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parser for `M/D/YY, H:MM AM - Author: text` chat exports.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: TranscriptConfig,
}

impl TranscriptParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: TranscriptConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    pub fn parse(&self, path: &Path) -> Result<Transcript, ChatlensError> {
        let bytes = fs::read(path)?;
        let content =
            String::from_utf8(bytes).map_err(|e| ChatlensError::unreadable_transcript(path, e))?;
        self.parse_str(&content)
    }

    /// Parses transcript text.
    ///
    /// Text before the first header is discarded. No header at all yields an
    /// empty transcript.
    pub fn parse_str(&self, content: &str) -> Result<Transcript, ChatlensError> {
        let (segments, preamble) = split_segments(content);
        if preamble > 0 {
            debug!(bytes = preamble, "discarding text before first header");
        }

        let mut transcript = Transcript {
            records: Vec::with_capacity(segments.len()),
            skipped: Vec::new(),
        };

        for segment in segments {
            match build_record(&segment) {
                Some(record) => transcript.records.push(record),
                None => {
                    let header = segment.header.text();
                    if self.config.on_malformed == MalformedPolicy::Strict {
                        return Err(ChatlensError::malformed_timestamp(
                            header,
                            segment.header.span.start,
                        ));
                    }
                    warn!(
                        offset = segment.header.span.start,
                        header = %header,
                        "skipping record with malformed timestamp"
                    );
                    transcript.skipped.push(SkippedSpan {
                        header,
                        span: segment.span(),
                        reason: "date/time matches neither M/D/YY nor M/D/YYYY".to_string(),
                    });
                }
            }
        }

        debug!(
            records = transcript.records.len(),
            skipped = transcript.skipped.len(),
            "parsed transcript"
        );
        Ok(transcript)
    }
}

/// Turns one segment into a record; `None` if its timestamp does not parse.
fn build_record(segment: &Segment<'_>) -> Option<MessageRecord> {
    let timestamp = segment.header.timestamp()?;
    let (text, line_end) = LineEnd::strip(segment.body);
    let split = split_author(text);

    Some(MessageRecord {
        header: segment.header.text(),
        timestamp,
        author: split.author.map(str::to_string),
        body: split.body.to_string(),
        kind: split.kind(),
        line_end,
        span: segment.span(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MessageKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_two_human_messages() {
        let text = "1/2/24, 10:30 AM - Alice: hello there\n1/2/24, 10:31 AM - Bob: hi Alice";
        let transcript = TranscriptParser::new().parse_str(text).unwrap();
        let records = transcript.records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].author(), Some("Alice"));
        assert_eq!(records[0].body(), "hello there");
        assert_eq!(records[0].kind(), MessageKind::HumanMessage);
        assert_eq!(records[0].timestamp(), dt(2024, 1, 2, 10, 30));
        assert_eq!(records[1].author(), Some("Bob"));
        assert_eq!(records[1].body(), "hi Alice");
        assert_eq!(records[1].kind(), MessageKind::HumanMessage);
    }

    #[test]
    fn test_system_notification() {
        let text = "1/2/24, 10:30 AM - Alice added Bob\n";
        let transcript = TranscriptParser::new().parse_str(text).unwrap();
        let records = transcript.records();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author(), None);
        assert_eq!(records[0].body(), "Alice added Bob");
        assert_eq!(records[0].kind(), MessageKind::SystemNotification);
    }

    #[test]
    fn test_narrow_space_matches_ascii() {
        let parser = TranscriptParser::new();
        let narrow = parser.parse_str("1/2/24, 10:30\u{202F}AM - Alice: hi").unwrap();
        let ascii = parser.parse_str("1/2/24, 10:30 AM - Alice: hi").unwrap();
        assert_eq!(narrow, ascii);
    }

    #[test]
    fn test_multiline_message() {
        let text = "1/2/24, 10:30 AM - Alice: line one\nline two\n\nline four\n1/2/24, 10:31 AM - Bob: ok\n";
        let transcript = TranscriptParser::new().parse_str(text).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.records()[0].body(), "line one\nline two\n\nline four");
        assert_eq!(transcript.reconstruct(), text);
    }

    #[test]
    fn test_preamble_discarded() {
        let text = "Chat export\n\n1/2/24, 10:30 AM - Alice: hi";
        let transcript = TranscriptParser::new().parse_str(text).unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.records()[0].span, 13..text.len());
        assert_eq!(transcript.reconstruct(), &text[13..]);
    }

    #[test]
    fn test_empty_and_headerless() {
        let parser = TranscriptParser::new();
        assert!(parser.parse_str("").unwrap().is_empty());
        assert!(parser.parse_str("no headers here: at all").unwrap().is_empty());
    }

    #[test]
    fn test_trailing_header_without_body() {
        let transcript = TranscriptParser::new()
            .parse_str("1/2/24, 10:30 AM - Alice: hi\n1/2/24, 10:31 AM - ")
            .unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.records()[1].body(), "");
        assert!(transcript.records()[1].is_notification());
    }

    #[test]
    fn test_malformed_skipped_by_default() {
        let text = "1/2/24, 10:30 AM - Alice: hi\n13/45/24, 10:31 AM - Bob: bad date\n1/2/24, 10:32 AM - Carol: ok";
        let transcript = TranscriptParser::new().parse_str(text).unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.records()[1].author(), Some("Carol"));
        assert_eq!(transcript.skipped().len(), 1);
        assert_eq!(transcript.skipped()[0].header, "13/45/24, 10:31 AM - ");
        assert_eq!(transcript.skipped()[0].span.start, 29);
    }

    #[test]
    fn test_malformed_strict_fails() {
        let text = "1/2/24, 10:30 AM - Alice: hi\n13/45/24, 10:31 AM - Bob: bad date";
        let parser = TranscriptParser::with_config(TranscriptConfig::strict());
        let err = parser.parse_str(text).unwrap_err();
        assert!(err.is_malformed_timestamp());
        assert!(err.to_string().contains("13/45/24"));
    }

    #[test]
    fn test_strict_same_as_skip_for_well_formed() {
        let text = "1/2/24, 10:30 AM - Alice: hi\n1/2/2024, 11:00 PM - Bob: yo\n";
        let lenient = TranscriptParser::new().parse_str(text).unwrap();
        let strict = TranscriptParser::with_config(TranscriptConfig::strict())
            .parse_str(text)
            .unwrap();
        assert_eq!(lenient, strict);
    }

    #[test]
    fn test_authors_sorted_unique() {
        let text = "1/2/24, 10:30 AM - Bob: a\n1/2/24, 10:31 AM - Alice: b\n1/2/24, 10:32 AM - Bob: c\n1/2/24, 10:33 AM - Bob left\n";
        let transcript = TranscriptParser::new().parse_str(text).unwrap();
        assert_eq!(transcript.authors(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_crlf_round_trip() {
        let text = "1/2/24, 10:30 AM - Alice: hi\r\n1/2/24, 10:31 AM - Bob: yo\r\n";
        let transcript = TranscriptParser::new().parse_str(text).unwrap();
        assert_eq!(transcript.records()[0].body(), "hi");
        assert_eq!(transcript.records()[0].line_end, LineEnd::CrLf);
        assert_eq!(transcript.reconstruct(), text);
    }

    #[test]
    fn test_parse_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1/2/24, 10:30 AM - Alice: from disk").unwrap();

        let transcript = TranscriptParser::new().parse(file.path()).unwrap();
        assert_eq!(transcript.records()[0].body(), "from disk");
    }

    #[test]
    fn test_parse_file_not_utf8() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = TranscriptParser::new().parse(file.path()).unwrap_err();
        assert!(err.is_utf8());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = TranscriptParser::new()
            .parse(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
