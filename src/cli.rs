//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`FormatArg`] - `--format` values, convertible to [`ExportFormat`](crate::format::ExportFormat)

use std::path::Path;

use clap::{Parser, ValueEnum};

use crate::config::{MalformedPolicy, StatsConfig, TranscriptConfig};
use crate::core::filter::FilterConfig;
use crate::core::models::OutputConfig;
use crate::core::stats::Selection;
use crate::error::ChatlensError;

/// Parse a WhatsApp-style chat export and report who talked, when, and about what.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt --user Alice --top 10
    chatlens chat.txt --after 2024-01-01 --report report.json
    chatlens chat.txt --export records.jsonl --fields
    chatlens chat.txt --strict -v")]
pub struct Args {
    /// Path to the exported transcript
    pub input: String,

    /// Restrict statistics to one author (exact name)
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Fail on a header with an unparseable date instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Number of common words to list
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub top: usize,

    /// Stopword file, one word per line (replaces the built-in list)
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<String>,

    /// Body text that marks an omitted attachment
    #[arg(long, value_name = "TEXT", default_value = "<Media omitted>")]
    pub media_placeholder: String,

    /// Write the full statistics report as JSON
    #[arg(long, value_name = "FILE")]
    pub report: Option<String>,

    /// Export the parsed records
    #[arg(short = 'o', long, value_name = "FILE")]
    pub export: Option<String>,

    /// Export format (defaults to the --export file extension, then csv)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Add the record kind column to exports
    #[arg(long)]
    pub kind: bool,

    /// Add derived calendar columns to exports
    #[arg(long)]
    pub fields: bool,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn transcript_config(&self) -> TranscriptConfig {
        let policy = if self.strict {
            MalformedPolicy::Strict
        } else {
            MalformedPolicy::Skip
        };
        TranscriptConfig::new().with_malformed_policy(policy)
    }

    pub fn stats_config(&self) -> Result<StatsConfig, ChatlensError> {
        let config = StatsConfig::new()
            .with_top_words(self.top)
            .with_media_placeholder(self.media_placeholder.clone());
        match self.stopwords {
            Some(ref path) => config.with_stopwords_file(Path::new(path)),
            None => Ok(config),
        }
    }

    pub fn filter_config(&self) -> Result<FilterConfig, ChatlensError> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }

    pub fn selection(&self) -> Selection {
        match self.user {
            Some(ref name) => Selection::author(name.clone()),
            None => Selection::Overall,
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_kind: self.kind,
            include_fields: self.fields,
            include_header: false,
        }
    }

    /// Export format: `--format`, else the `--export` extension, else CSV.
    pub fn export_format(&self) -> crate::format::ExportFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.export
            .as_deref()
            .and_then(|path| crate::format::ExportFormat::from_path(path).ok())
            .unwrap_or_default()
    }
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum FormatArg {
    /// CSV with semicolon delimiter
    #[default]
    Csv,
    /// JSON array
    Json,
    /// One JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<FormatArg> for crate::format::ExportFormat {
    fn from(format: FormatArg) -> crate::format::ExportFormat {
        match format {
            FormatArg::Csv => crate::format::ExportFormat::Csv,
            FormatArg::Json => crate::format::ExportFormat::Json,
            FormatArg::Jsonl => crate::format::ExportFormat::Jsonl,
        }
    }
}
