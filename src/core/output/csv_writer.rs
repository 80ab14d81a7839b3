//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::MessageRecord;
use crate::core::models::{OutputConfig, TIMESTAMP_FORMAT};
use crate::error::ChatlensError;

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Author`, `Body`, then depending on [`OutputConfig`]:
///   - With kind: `Kind`
///   - With fields: `Year`, `Month`, `Day`, `DayName`, `Hour`, `Minute`, `Period`
///   - With header: `Header`
/// - Encoding: UTF-8
pub fn write_csv(
    records: &[MessageRecord],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    let mut file = write_to(file, records, config)?;
    file.flush()?;
    Ok(())
}

/// Converts records to a CSV string. Same format as [`write_csv`].
pub fn to_csv(records: &[MessageRecord], config: &OutputConfig) -> Result<String, ChatlensError> {
    let bytes = write_to(Vec::new(), records, config)?;
    Ok(String::from_utf8(bytes)?)
}

fn write_to<W: Write>(
    out: W,
    records: &[MessageRecord],
    config: &OutputConfig,
) -> Result<W, ChatlensError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_record(record, config))?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Timestamp", "Author", "Body"];

    if config.include_kind {
        header.push("Kind");
    }
    if config.include_fields {
        header.extend(["Year", "Month", "Day", "DayName", "Hour", "Minute", "Period"]);
    }
    if config.include_header {
        header.push("Header");
    }

    header
}

fn build_record(record: &MessageRecord, config: &OutputConfig) -> Vec<String> {
    let mut row = vec![
        record.timestamp().format(TIMESTAMP_FORMAT).to_string(),
        record.author_label().to_string(),
        record.body().to_string(),
    ];

    if config.include_kind {
        row.push(record.kind().to_string());
    }
    if config.include_fields {
        let f = record.fields();
        row.extend([
            f.year.to_string(),
            f.month.to_string(),
            f.day.to_string(),
            f.day_name.to_string(),
            f.hour.to_string(),
            f.minute.to_string(),
            f.period,
        ]);
    }
    if config.include_header {
        row.push(record.header.clone());
    }

    row
}
