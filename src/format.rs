//! Export format selection, independent of the CLI.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatlens::Result<()> {
//! use chatlens::format::{ExportFormat, to_format_string};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new().parse_str("1/2/24, 10:30 AM - Alice: Hi")?;
//!
//! let format = ExportFormat::from_path("records.jsonl")?;
//! assert_eq!(format, ExportFormat::Jsonl);
//!
//! let jsonl = to_format_string(transcript.records(), format, &OutputConfig::new())?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

/// Format for exported records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ExportFormat {
    /// CSV with semicolon delimiter.
    #[default]
    Csv,
    /// JSON array of records.
    Json,
    /// One JSON object per line (also accepted as `ndjson`).
    Jsonl,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Jsonl => "jsonl",
        }
    }

    /// Every supported format.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Csv, ExportFormat::Json, ExportFormat::Jsonl]
    }

    /// Cargo feature the writer for this format lives behind.
    pub fn required_feature(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv-output",
            ExportFormat::Json | ExportFormat::Jsonl => "json-output",
        }
    }

    /// Detects the format from a file extension, ignoring case.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatlensError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Self::from_name(&ext).ok_or_else(|| {
            ChatlensError::invalid_format(
                "output",
                format!(
                    "unknown file extension '.{}', expected one of {}",
                    ext,
                    Self::choices()
                ),
            )
        })
    }

    fn choices() -> String {
        Self::all()
            .iter()
            .map(ExportFormat::extension)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "jsonl" | "ndjson" => Some(ExportFormat::Jsonl),
            _ => None,
        }
    }

    fn unavailable(self) -> ChatlensError {
        ChatlensError::invalid_format(
            "output",
            format!(
                "{} export requires the '{}' feature",
                self,
                self.required_feature()
            ),
        )
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(&s.to_lowercase())
            .ok_or_else(|| format!("unknown format '{}', expected one of {}", s, Self::choices()))
    }
}

/// Writes records to `path` in `format`.
///
/// # Errors
///
/// Fails if the writer for `format` was compiled out or the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[MessageRecord],
    path: &str,
    format: ExportFormat,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    match format {
        #[cfg(feature = "csv-output")]
        ExportFormat::Csv => crate::core::output::write_csv(records, path, config),
        #[cfg(feature = "json-output")]
        ExportFormat::Json => crate::core::output::write_json(records, path, config),
        #[cfg(feature = "json-output")]
        ExportFormat::Jsonl => crate::core::output::write_jsonl(records, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}

/// Renders records as a string in `format`.
#[allow(unused_variables)]
pub fn to_format_string(
    records: &[MessageRecord],
    format: ExportFormat,
    config: &OutputConfig,
) -> Result<String, ChatlensError> {
    match format {
        #[cfg(feature = "csv-output")]
        ExportFormat::Csv => crate::core::output::to_csv(records, config),
        #[cfg(feature = "json-output")]
        ExportFormat::Json => crate::core::output::to_json(records, config),
        #[cfg(feature = "json-output")]
        ExportFormat::Jsonl => crate::core::output::to_jsonl(records, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(ExportFormat::from_str("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_str("JSON").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_str("ndjson").unwrap(), ExportFormat::Jsonl);
        assert!(ExportFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path("out.csv").unwrap(), ExportFormat::Csv);
        assert_eq!(
            ExportFormat::from_path("/tmp/chat.JSON").unwrap(),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path("records.ndjson").unwrap(),
            ExportFormat::Jsonl
        );

        let err = ExportFormat::from_path("chat.txt").unwrap_err();
        assert!(err.is_invalid_format());
        assert!(ExportFormat::from_path("no_extension").is_err());
    }

    #[test]
    fn test_format_display_and_extension() {
        for format in ExportFormat::all() {
            assert_eq!(format.to_string().to_lowercase(), format.extension());
        }
    }

    #[test]
    fn test_unknown_format_lists_choices() {
        let err = ExportFormat::from_str("xml").unwrap_err();
        assert!(err.ends_with("expected one of csv, json, jsonl"));

        let err = ExportFormat::from_path("chat.txt").unwrap_err();
        assert!(err.to_string().contains("expected one of csv, json, jsonl"));
    }

    #[test]
    fn test_format_default() {
        assert_eq!(ExportFormat::default(), ExportFormat::Csv);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&ExportFormat::Jsonl).unwrap();
        assert_eq!(json, "\"jsonl\"");
        let parsed: ExportFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, ExportFormat::Csv);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string_dispatch() {
        use chrono::NaiveDate;

        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let records = vec![MessageRecord::human(ts, "Alice", "Hi")];
        let config = OutputConfig::new();

        let csv = to_format_string(&records, ExportFormat::Csv, &config).unwrap();
        assert!(csv.starts_with("Timestamp;Author;Body"));

        let json = to_format_string(&records, ExportFormat::Json, &config).unwrap();
        assert!(json.trim_start().starts_with('['));

        let jsonl = to_format_string(&records, ExportFormat::Jsonl, &config).unwrap();
        assert!(jsonl.starts_with('{'));
    }
}
