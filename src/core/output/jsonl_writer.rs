//! JSON Lines (JSONL) output writer.
//!
//! One record per line, so large transcripts can be consumed incrementally.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::MessageRecord;
use crate::core::models::{OutputConfig, OutputRow};
use crate::error::ChatlensError;

/// Writes records in JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2024-01-02 10:30:00","author":"Alice","body":"Hello"}
/// {"timestamp":"2024-01-02 10:31:00","author":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(
    records: &[MessageRecord],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, records, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string. Same format as [`write_jsonl`].
pub fn to_jsonl(records: &[MessageRecord], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut buf = Vec::new();
    write_lines(&mut buf, records, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(
    writer: &mut W,
    records: &[MessageRecord],
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    for record in records {
        let line = serde_json::to_string(&OutputRow::new(record, config))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
