//! Header recognition and timestamp parsing.
//!
//! A header is the `M/D/YY, H:MM AM - ` prefix that opens every message in
//! an export. Headers are located with one left-to-right regex scan; the text
//! between two headers is the body segment of the first one.
//!
//! Supported headers:
//! - `1/15/24, 10:30 AM - ` (2-digit year, 12-hour clock)
//! - `1/15/2024, 10:30 PM - ` (4-digit year)
//! - `1/15/24, 10:30\u{202F}AM - ` (narrow no-break space before the marker)
//! - `1/15/24, 10:30:45 am - ` (seconds, lowercase marker)
//! - `1/15/24, 22:30 - ` (no marker, 24-hour clock)

use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

/// Regex for one header. Groups: 1 = date, 2 = time, 3 = AM/PM marker.
///
/// Spaces may be ASCII, no-break (U+00A0) or narrow no-break (U+202F).
pub const HEADER_PATTERN: &str = r"(\d{1,2}/\d{1,2}/\d{2,4}),[ \x{A0}\x{202F}](\d{1,2}:\d{2}(?::\d{2})?)(?:[ \x{A0}\x{202F}]?([APap][Mm]))?[ \x{A0}\x{202F}]-[ \x{A0}\x{202F}]";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is a valid regex"));

/// 12-hour layouts: 2-digit year first, then 4-digit year.
const TWELVE_HOUR_FORMATS: &[&str] = &[
    "%m/%d/%y, %I:%M:%S %p",
    "%m/%d/%y, %I:%M %p",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y, %I:%M %p",
];

/// 24-hour layouts for headers without a marker, same year order.
const TWENTY_FOUR_HOUR_FORMATS: &[&str] = &[
    "%m/%d/%y, %H:%M:%S",
    "%m/%d/%y, %H:%M",
    "%m/%d/%Y, %H:%M:%S",
    "%m/%d/%Y, %H:%M",
];

/// One header found in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Byte range of the header in the transcript.
    pub span: Range<usize>,
    /// Header text exactly as it appears in the transcript.
    pub raw: &'a str,
    /// Date token, e.g. `1/15/24`.
    pub date: &'a str,
    /// Time token, e.g. `10:30`.
    pub time: &'a str,
    /// `AM`/`PM` marker in its original case, if present.
    pub meridiem: Option<&'a str>,
}

impl<'a> HeaderMatch<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            span: whole.range(),
            raw: whole.as_str(),
            date: caps.get(1)?.as_str(),
            time: caps.get(2)?.as_str(),
            meridiem: caps.get(3).map(|m| m.as_str()),
        })
    }

    /// Header text with special spaces replaced by ASCII spaces.
    pub fn text(&self) -> String {
        normalize_spaces(self.raw)
    }

    /// Parses the header date and time.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.date, self.time, self.meridiem)
    }
}

/// Iterates over all headers in `text`, left to right.
pub fn find_headers(text: &str) -> impl Iterator<Item = HeaderMatch<'_>> {
    HEADER_RE
        .captures_iter(text)
        .filter_map(|caps| HeaderMatch::from_captures(&caps))
}

/// A header together with the body text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub header: HeaderMatch<'a>,
    /// Text up to the next header or end-of-text. May be empty.
    pub body: &'a str,
    /// Byte range of `body` in the transcript.
    pub body_span: Range<usize>,
}

impl Segment<'_> {
    /// Byte range covering header and body.
    pub fn span(&self) -> Range<usize> {
        self.header.span.start..self.body_span.end
    }
}

/// Splits a transcript into header/body segments.
///
/// Returns the segments together with the byte length of any text before the
/// first header, which belongs to no message and is not part of the output.
pub fn split_segments(text: &str) -> (Vec<Segment<'_>>, usize) {
    let headers: Vec<HeaderMatch<'_>> = find_headers(text).collect();
    let preamble = headers.first().map_or(text.len(), |h| h.span.start);

    let mut segments = Vec::with_capacity(headers.len());
    let mut iter = headers.into_iter().peekable();
    while let Some(header) = iter.next() {
        let end = iter.peek().map_or(text.len(), |next| next.span.start);
        let start = header.span.end;
        segments.push(Segment {
            body: &text[start..end],
            body_span: start..end,
            header,
        });
    }

    (segments, preamble)
}

/// Parses a header date/time.
///
/// The 2-digit-year layouts are tried before the 4-digit-year ones; the first
/// success wins. Returns `None` if every layout fails (e.g. month 13) or the
/// year is not exactly 2 or 4 digits.
pub fn parse_timestamp(date: &str, time: &str, meridiem: Option<&str>) -> Option<NaiveDateTime> {
    let year_digits = date.rsplit('/').next().map_or(0, str::len);
    if year_digits != 2 && year_digits != 4 {
        return None;
    }

    let (datetime_str, formats) = match meridiem {
        Some(marker) => (format!("{date}, {time} {marker}"), TWELVE_HOUR_FORMATS),
        None => (format!("{date}, {time}"), TWENTY_FOUR_HOUR_FORMATS),
    };
    let datetime_str = normalize_spaces(&datetime_str);

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&datetime_str, fmt).ok())
}

/// Replaces narrow no-break (U+202F) and no-break (U+00A0) spaces with ASCII spaces.
pub fn normalize_spaces(text: &str) -> String {
    text.replace(['\u{202F}', '\u{A0}'], " ")
}
