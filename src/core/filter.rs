//! Narrow a record list by date range, author and kind.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Author | [`with_author`](FilterConfig::with_author) | Records from one author |
//! | Kind | [`without_notifications`](FilterConfig::without_notifications) | Drop system notifications |
//!
//! Active filters are combined with AND logic.
//!
//! # Example
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::parser::TranscriptParser;
//!
//! # fn main() -> chatlens::Result<()> {
//! let text = "1/2/24, 10:30 AM - Alice: old\n\
//!             6/15/24, 9:00 PM - Alice: new\n\
//!             6/16/24, 9:00 PM - Bob: newer";
//! let records = TranscriptParser::new().parse_str(text)?.into_records();
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_author("alice");
//!
//! let filtered = apply_filters(records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body(), "new");
//! # Ok(())
//! # }
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::MessageRecord;
use crate::error::ChatlensError;

/// Filter criteria for [`apply_filters`].
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Keep only records at or after this moment.
    pub after: Option<NaiveDateTime>,

    /// Keep only records at or before this moment.
    pub before: Option<NaiveDateTime>,

    /// Keep only records from this author (ASCII case-insensitive).
    pub author: Option<String>,

    /// Drop system notifications.
    pub exclude_notifications: bool,
}

impl FilterConfig {
    /// Creates a filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps records on or after `date` (`YYYY-MM-DD`, inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if `date` is not `YYYY-MM-DD`.
    pub fn with_date_from(mut self, date: &str) -> Result<Self, ChatlensError> {
        self.after = Some(parse_date(date)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Keeps records on or before `date` (`YYYY-MM-DD`, the whole day included).
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if `date` is not `YYYY-MM-DD`.
    pub fn with_date_to(mut self, date: &str) -> Result<Self, ChatlensError> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatlensError::invalid_date(date))?;
        self.before = Some(parse_date(date)?.and_time(end_of_day));
        Ok(self)
    }

    /// Keeps records from `author`. Matching ignores ASCII case.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the lower bound directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the upper bound directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Drops system notifications.
    #[must_use]
    pub fn without_notifications(mut self) -> Self {
        self.exclude_notifications = true;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some()
            || self.before.is_some()
            || self.author.is_some()
            || self.exclude_notifications
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if let Some(ref author) = self.author {
            match record.author() {
                Some(a) if a.eq_ignore_ascii_case(author) => {}
                _ => return false,
            }
        }
        if self.exclude_notifications && record.is_notification() {
            return false;
        }
        let ts = record.timestamp();
        if self.after.is_some_and(|after| ts < after) {
            return false;
        }
        if self.before.is_some_and(|before| ts > before) {
            return false;
        }
        true
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date))
}

/// Keeps the records that pass every active filter, preserving order.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }
    records.into_iter().filter(|r| config.matches(r)).collect()
}
