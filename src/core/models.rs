//! Export configuration and the row shape shared by the writers.

use serde::Serialize;

use crate::MessageRecord;
use crate::record::{MessageKind, TimeFields};

/// Controls which columns the export writers emit.
///
/// Timestamp, author and body are always written. Notifications are
/// written with the author `group_notification`.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Add the record kind (`human_message` / `system_notification`).
    pub include_kind: bool,
    /// Add the derived calendar fields (year, month, day, weekday, hour, minute, period).
    pub include_fields: bool,
    /// Add the header text exactly as it appeared in the transcript.
    pub include_header: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional column enabled.
    pub fn all() -> Self {
        Self {
            include_kind: true,
            include_fields: true,
            include_header: true,
        }
    }

    pub fn with_kind(mut self) -> Self {
        self.include_kind = true;
        self
    }

    pub fn with_fields(mut self) -> Self {
        self.include_fields = true;
        self
    }

    pub fn with_header(mut self) -> Self {
        self.include_header = true;
        self
    }
}

/// Timestamp format used by every writer.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exported record. Optional columns are skipped when disabled.
#[cfg_attr(not(feature = "json-output"), allow(dead_code))]
#[derive(Debug, Serialize)]
pub(crate) struct OutputRow<'a> {
    pub timestamp: String,
    pub author: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    #[serde(flatten)]
    pub fields: Option<TimeFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<&'a str>,
}

#[cfg_attr(not(feature = "json-output"), allow(dead_code))]
impl<'a> OutputRow<'a> {
    pub(crate) fn new(record: &'a MessageRecord, config: &OutputConfig) -> Self {
        Self {
            timestamp: record.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            author: record.author_label(),
            body: record.body(),
            kind: config.include_kind.then(|| record.kind()),
            fields: config.include_fields.then(|| record.fields()),
            header: config.include_header.then_some(record.header.as_str()),
        }
    }
}
