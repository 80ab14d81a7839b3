//! # Chatlens
//!
//! Parse exported WhatsApp-style chat transcripts into structured records and
//! derive activity statistics from them.
//!
//! ## Overview
//!
//! An export is one text blob in which every message starts with a header
//! such as `1/2/24, 10:30 AM - `. Chatlens locates those headers, splits the
//! text between them into [`MessageRecord`]s (author, body, timestamp and
//! kind), and aggregates the records into timelines, activity maps and word
//! tables.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let transcript = TranscriptParser::new().parse("chat.txt".as_ref())?;
//!
//!     let report = Report::build(transcript.records(), Selection::Overall, &StatsConfig::new());
//!     println!("{} messages, {} links", report.stats.messages, report.stats.links);
//!
//!     write_jsonl(transcript.records(), "records.jsonl", &OutputConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - header scanning and author splitting
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser) and [`Transcript`](parser::Transcript)
//! - [`record`] - [`MessageRecord`], [`MessageKind`] and derived time fields
//! - [`config`] - parser and statistics configuration
//! - [`core`] - filtering, statistics and output writers
//! - [`format`] - [`ExportFormat`](format::ExportFormat) dispatch
//! - [`cli`] - clap argument types (feature `cli`)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod record;

pub use error::{ChatlensError, Result};
pub use record::{GROUP_NOTIFICATION, MessageKind, MessageRecord};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ChatlensError, Result};
    pub use crate::record::{MessageKind, MessageRecord};

    pub use crate::config::{MalformedPolicy, StatsConfig, TranscriptConfig};
    pub use crate::parser::{SkippedSpan, Transcript, TranscriptParser};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::stats::{Report, Selection, TopStats};

    pub use crate::format::{ExportFormat, to_format_string, write_to_format};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, to_report_json, write_json, write_jsonl};
}
