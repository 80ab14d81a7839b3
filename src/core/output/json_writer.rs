//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::MessageRecord;
use crate::core::models::{OutputConfig, OutputRow};
use crate::core::stats::Report;
use crate::error::ChatlensError;

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2024-01-02 10:30:00", "author": "Alice", "body": "Hello"},
///   {"timestamp": "2024-01-02 10:31:00", "author": "group_notification", "body": "Bob joined"}
/// ]
/// ```
pub fn write_json(
    records: &[MessageRecord],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let json = to_json(records, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a pretty-printed JSON array. Same format as [`write_json`].
pub fn to_json(records: &[MessageRecord], config: &OutputConfig) -> Result<String, ChatlensError> {
    let rows: Vec<OutputRow<'_>> = records.iter().map(|r| OutputRow::new(r, config)).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Serializes a statistics [`Report`] as pretty-printed JSON.
pub fn to_report_json(report: &Report) -> Result<String, ChatlensError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a statistics [`Report`] to a JSON file.
pub fn write_report_json(report: &Report, output_path: &str) -> Result<(), ChatlensError> {
    let json = to_report_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsConfig;
    use crate::core::stats::Selection;
    use chrono::NaiveDate;
    use std::io::Read;
    use tempfile::NamedTempFile;

    fn sample() -> Vec<MessageRecord> {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        vec![
            MessageRecord::human(ts, "Alice", "Hello 🎉"),
            MessageRecord::notification(ts, "Bob joined"),
        ]
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&sample(), &OutputConfig::new()).unwrap();

        assert!(json.contains(r#""author": "Alice""#));
        assert!(json.contains(r#""body": "Hello 🎉""#));
        assert!(json.contains(r#""author": "group_notification""#));
        assert!(!json.contains("kind"));
        assert!(!json.contains("day_name"));
    }

    #[test]
    fn test_to_json_with_fields() {
        let json = to_json(&sample(), &OutputConfig::new().with_fields().with_kind()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["kind"], "human_message");
        assert_eq!(first["day_name"], "Saturday");
        assert_eq!(first["period"], "12-13");
        assert_eq!(first["month"], "June");
        assert_eq!(value[1]["kind"], "system_notification");
    }

    #[test]
    fn test_write_json() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_json(&sample(), path, &OutputConfig::new().with_header()).unwrap();

        let mut content = String::new();
        std::fs::File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["header"], "6/15/24, 12:30 PM - ");
    }

    #[test]
    fn test_to_report_json() {
        let report = Report::build(&sample(), Selection::Overall, &StatsConfig::new());
        let json = to_report_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["selection"], "overall");
        assert_eq!(value["stats"]["messages"], 2);
        assert_eq!(value["busy_users"][0]["author"], "Alice");
        assert_eq!(value["emojis"][0][0], "🎉");
    }
}
