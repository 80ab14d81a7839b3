//! Structured record type produced by the transcript parser.
//!
//! Every header recognized in a transcript yields one [`MessageRecord`]. A
//! record keeps enough of its source text (header, author, body, stripped
//! line terminator) to reconstruct the exact span it was parsed from.
//!
//! # Examples
//!
//! ```
//! use chatlens::{MessageKind, MessageRecord};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(22, 15, 0)
//!     .unwrap();
//!
//! let msg = MessageRecord::human(ts, "Alice", "hello there");
//! assert_eq!(msg.author(), Some("Alice"));
//! assert_eq!(msg.kind(), MessageKind::HumanMessage);
//! assert_eq!(msg.fields().period, "22-23");
//!
//! let note = MessageRecord::notification(ts, "Alice added Bob");
//! assert_eq!(note.author_label(), "group_notification");
//! ```

use std::ops::Range;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Label used in place of an author for system notifications.
pub const GROUP_NOTIFICATION: &str = "group_notification";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Classification of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A message typed by a participant (`author: body`).
    HumanMessage,
    /// A notice with no author, such as "X added Y" or the encryption banner.
    SystemNotification,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::HumanMessage => write!(f, "human_message"),
            MessageKind::SystemNotification => write!(f, "system_notification"),
        }
    }
}

/// Line terminator removed from the end of a record's body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnd {
    /// The segment ran to end-of-text without a terminator.
    #[default]
    None,
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnd {
    /// Splits a single trailing terminator off `text`.
    ///
    /// Only one terminator is removed; blank lines inside a multi-line
    /// message stay part of the body.
    pub fn strip(text: &str) -> (&str, LineEnd) {
        if let Some(rest) = text.strip_suffix("\r\n") {
            (rest, LineEnd::CrLf)
        } else if let Some(rest) = text.strip_suffix('\n') {
            (rest, LineEnd::Lf)
        } else {
            (text, LineEnd::None)
        }
    }

    /// Returns the terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnd::None => "",
            LineEnd::Lf => "\n",
            LineEnd::CrLf => "\r\n",
        }
    }
}

/// One logical message recovered from a transcript.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `header` | `String` | Header text (`1/2/24, 10:30 AM - `), special spaces normalized |
/// | `timestamp` | `NaiveDateTime` | Date and time parsed from the header |
/// | `author` | `Option<String>` | Participant label, `None` for notifications |
/// | `body` | `String` | Message text after the `author: ` prefix |
/// | `kind` | `MessageKind` | Human message or system notification |
/// | `line_end` | `LineEnd` | Terminator stripped from the end of `body` |
/// | `span` | `Range<usize>` | Byte range in the source transcript |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Header text that introduced this record.
    pub header: String,

    /// When the message was sent, as written in the export (no time zone).
    pub timestamp: NaiveDateTime,

    /// Participant label. `None` exactly when `kind` is a system notification.
    #[serde(default)]
    pub author: Option<String>,

    /// Message text. May contain newlines for multi-line messages.
    pub body: String,

    /// Record classification.
    pub kind: MessageKind,

    /// Terminator removed from the end of the body.
    #[serde(default)]
    pub line_end: LineEnd,

    /// Byte range of the whole record (header included) in the transcript.
    #[serde(default)]
    pub span: Range<usize>,
}

impl MessageRecord {
    /// Creates a human message with a canonical header.
    pub fn human(
        timestamp: NaiveDateTime,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            header: format_header(timestamp),
            timestamp,
            author: Some(author.into()),
            body: body.into(),
            kind: MessageKind::HumanMessage,
            line_end: LineEnd::None,
            span: 0..0,
        }
    }

    /// Creates a system notification with a canonical header.
    pub fn notification(timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self {
            header: format_header(timestamp),
            timestamp,
            author: None,
            body: body.into(),
            kind: MessageKind::SystemNotification,
            line_end: LineEnd::None,
            span: 0..0,
        }
    }

    /// Builder method to set the stripped line terminator.
    #[must_use]
    pub fn with_line_end(mut self, line_end: LineEnd) -> Self {
        self.line_end = line_end;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the author, if any.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Returns the author or [`GROUP_NOTIFICATION`] for notifications.
    pub fn author_label(&self) -> &str {
        self.author.as_deref().unwrap_or(GROUP_NOTIFICATION)
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the record kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns `true` for system notifications.
    pub fn is_notification(&self) -> bool {
        self.kind == MessageKind::SystemNotification
    }

    /// Returns `true` if the body is exactly the media placeholder.
    pub fn is_media(&self, placeholder: &str) -> bool {
        self.body.trim() == placeholder
    }

    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Derived calendar and clock fields.
    pub fn fields(&self) -> TimeFields {
        TimeFields::from_timestamp(self.timestamp)
    }

    /// Rebuilds the source text of this record.
    ///
    /// Concatenating the reconstruction of every record reproduces the
    /// transcript from its first header on, except that narrow and regular
    /// no-break spaces inside headers come back as ASCII spaces.
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(
            self.header.len() + self.author.as_ref().map_or(0, |a| a.len() + 2) + self.body.len() + 2,
        );
        out.push_str(&self.header);
        if let Some(author) = &self.author {
            out.push_str(author);
            out.push_str(": ");
        }
        out.push_str(&self.body);
        out.push_str(self.line_end.as_str());
        out
    }
}

/// Formats a timestamp the way exports write it: `1/2/24, 10:30 AM - `.
pub fn format_header(timestamp: NaiveDateTime) -> String {
    timestamp.format("%-m/%-d/%y, %-I:%M %p - ").to_string()
}

/// Calendar and clock components derived from a record timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeFields {
    /// Date without the time of day.
    pub date: NaiveDate,
    pub year: i32,
    /// Month number, 1-12.
    pub month_num: u32,
    /// English month name.
    pub month: &'static str,
    /// Day of month, 1-31.
    pub day: u32,
    /// English weekday name.
    pub day_name: &'static str,
    /// Hour, 0-23.
    pub hour: u32,
    pub minute: u32,
    /// One-hour bucket label, see [`hour_bucket`].
    pub period: String,
}

impl TimeFields {
    /// Derives all fields from a timestamp.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        Self {
            date: ts.date(),
            year: ts.year(),
            month_num: ts.month(),
            month: month_name(ts.month()),
            day: ts.day(),
            day_name: WEEKDAY_NAMES[ts.weekday().num_days_from_monday() as usize],
            hour: ts.hour(),
            minute: ts.minute(),
            period: hour_bucket(ts.hour()),
        }
    }
}

/// English name for a month number (1-12).
///
/// Out-of-range numbers wrap modulo 12, which `chrono` never produces.
pub fn month_name(month_num: u32) -> &'static str {
    MONTH_NAMES[(month_num.saturating_sub(1) % 12) as usize]
}

/// Weekday names in calendar order, Monday first.
pub fn weekday_names() -> &'static [&'static str; 7] {
    &WEEKDAY_NAMES
}

/// Month names in calendar order.
pub fn month_names() -> &'static [&'static str; 12] {
    &MONTH_NAMES
}

/// Heatmap label for the hour starting at `hour`.
///
/// `23` gives `"23-00"`, `0` gives `"00-1"`, anything else `"{h}-{h+1}"`.
pub fn hour_bucket(hour: u32) -> String {
    match hour {
        23 => "23-00".to_string(),
        0 => "00-1".to_string(),
        h => format!("{}-{}", h, h + 1),
    }
}
