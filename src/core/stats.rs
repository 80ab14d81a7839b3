//! Aggregate statistics over parsed records.
//!
//! Every function takes the record slice and a [`Selection`] (whole chat or
//! a single author) and never fails: an empty selection yields zero counts
//! and empty tables.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::StatsConfig;
//! use chatlens::core::stats::{Selection, fetch_stats, most_busy_users};
//! use chatlens::parser::TranscriptParser;
//!
//! let text = "1/2/24, 10:30 AM - Alice: see https://example.com\n\
//!             1/2/24, 10:31 AM - Bob: <Media omitted>\n\
//!             1/2/24, 10:32 AM - Alice: nice";
//! let transcript = TranscriptParser::new().parse_str(text)?;
//! let records = transcript.records();
//!
//! let stats = fetch_stats(records, &Selection::Overall, &StatsConfig::new());
//! assert_eq!(stats.messages, 3);
//! assert_eq!(stats.media, 1);
//! assert_eq!(stats.links, 1);
//!
//! let users = most_busy_users(records);
//! assert_eq!(users[0].author, "Alice");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::MessageRecord;
use crate::config::StatsConfig;
use crate::core::emoji::emojis;
use crate::record::{hour_bucket, month_name, month_names, weekday_names};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").expect("url pattern is a valid regex")
});

/// Which records a statistic covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Every record, notifications included.
    #[default]
    Overall,
    /// Records whose author equals the name exactly.
    Author(String),
}

impl Selection {
    /// Selection for a single author.
    pub fn author(name: impl Into<String>) -> Self {
        Selection::Author(name.into())
    }

    /// Returns `true` if `record` is covered by this selection.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        match self {
            Selection::Overall => true,
            Selection::Author(name) => record.author() == Some(name.as_str()),
        }
    }

    /// Returns `true` for [`Selection::Overall`].
    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Overall => write!(f, "Overall"),
            Selection::Author(name) => write!(f, "{}", name),
        }
    }
}

fn select<'a>(
    records: &'a [MessageRecord],
    selection: &'a Selection,
) -> impl Iterator<Item = &'a MessageRecord> + 'a {
    records.iter().filter(move |r| selection.matches(r))
}

/// Headline counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopStats {
    /// Records in the selection.
    pub messages: usize,
    /// Whitespace-separated words across all bodies.
    pub words: usize,
    /// Records whose body is the media placeholder.
    pub media: usize,
    /// URLs found in bodies.
    pub links: usize,
}

/// Counts messages, words, media placeholders and links.
pub fn fetch_stats(
    records: &[MessageRecord],
    selection: &Selection,
    config: &StatsConfig,
) -> TopStats {
    select(records, selection).fold(TopStats::default(), |mut acc, r| {
        acc.messages += 1;
        acc.words += r.word_count();
        if r.is_media(&config.media_placeholder) {
            acc.media += 1;
        }
        acc.links += count_links(r.body());
        acc
    })
}

/// Number of URL-like substrings in `text`.
pub fn count_links(text: &str) -> usize {
    URL_RE.find_iter(text).count()
}

/// Messages sent in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month_num: u32,
    pub month: &'static str,
    /// `"January-2024"`
    pub label: String,
    pub messages: usize,
}

/// Message counts per month, in chronological order.
pub fn monthly_timeline(records: &[MessageRecord], selection: &Selection) -> Vec<MonthlyPoint> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for r in select(records, selection) {
        let ts = r.timestamp();
        *counts.entry((ts.year(), ts.month())).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((year, month_num), messages)| {
            let month = month_name(month_num);
            MonthlyPoint {
                year,
                month_num,
                month,
                label: format!("{}-{}", month, year),
                messages,
            }
        })
        .collect()
}

/// Messages sent on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Message counts per day, in chronological order.
pub fn daily_timeline(records: &[MessageRecord], selection: &Selection) -> Vec<DailyPoint> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in select(records, selection) {
        *counts.entry(r.timestamp().date()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, messages)| DailyPoint { date, messages })
        .collect()
}

/// Message counts per weekday, busiest first. Ties keep Monday-first order.
pub fn week_activity_map(
    records: &[MessageRecord],
    selection: &Selection,
) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; 7];
    for r in select(records, selection) {
        counts[r.timestamp().weekday().num_days_from_monday() as usize] += 1;
    }
    busiest_first(weekday_names().iter().copied().zip(counts))
}

/// Message counts per month name, busiest first. Ties keep calendar order.
pub fn month_activity_map(
    records: &[MessageRecord],
    selection: &Selection,
) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; 12];
    for r in select(records, selection) {
        counts[r.timestamp().month0() as usize] += 1;
    }
    busiest_first(month_names().iter().copied().zip(counts))
}

fn busiest_first(
    pairs: impl Iterator<Item = (&'static str, usize)>,
) -> Vec<(&'static str, usize)> {
    let mut out: Vec<_> = pairs.filter(|(_, n)| *n > 0).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Weekday x hour-bucket message counts.
///
/// Only weekdays and hours that occur in the selection get a row/column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// Weekday names, Monday first.
    pub rows: Vec<&'static str>,
    /// Hour bucket labels ordered by start hour.
    pub columns: Vec<String>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

impl Heatmap {
    /// Count for a weekday and hour bucket; zero if either is absent.
    pub fn get(&self, day_name: &str, period: &str) -> usize {
        let row = self.rows.iter().position(|d| *d == day_name);
        let col = self.columns.iter().position(|p| p == period);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Returns `true` if the heatmap has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the weekday x hour-bucket heatmap.
pub fn activity_heatmap(records: &[MessageRecord], selection: &Selection) -> Heatmap {
    let mut grid = [[0usize; 24]; 7];
    for r in select(records, selection) {
        let ts = r.timestamp();
        grid[ts.weekday().num_days_from_monday() as usize][ts.hour() as usize] += 1;
    }

    let days: Vec<usize> = (0..7).filter(|&d| grid[d].iter().any(|&n| n > 0)).collect();
    let hours: Vec<usize> = (0..24)
        .filter(|&h| grid.iter().any(|row| row[h] > 0))
        .collect();

    Heatmap {
        rows: days.iter().map(|&d| weekday_names()[d]).collect(),
        columns: hours.iter().map(|&h| hour_bucket(h as u32)).collect(),
        counts: days
            .iter()
            .map(|&d| hours.iter().map(|&h| grid[d][h]).collect())
            .collect(),
    }
}

/// One author's share of the chat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    pub author: String,
    pub messages: usize,
    /// Percentage of all records, rounded to two decimals.
    pub percent: f64,
}

/// Authors ranked by message count (ties by name).
///
/// Notifications have no author and are not ranked, but they count towards
/// the total that `percent` is relative to.
pub fn most_busy_users(records: &[MessageRecord]) -> Vec<UserShare> {
    let total = records.len();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for author in records.iter().filter_map(MessageRecord::author) {
        *counts.entry(author).or_default() += 1;
    }

    let mut users: Vec<UserShare> = counts
        .into_iter()
        .map(|(author, messages)| UserShare {
            author: author.to_string(),
            messages,
            percent: round2(messages as f64 / total as f64 * 100.0),
        })
        .collect();
    users.sort_by(|a, b| b.messages.cmp(&a.messages).then_with(|| a.author.cmp(&b.author)));
    users
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Records that feed the word tables.
fn word_sources<'a>(
    records: &'a [MessageRecord],
    selection: &'a Selection,
    config: &'a StatsConfig,
) -> impl Iterator<Item = &'a MessageRecord> + 'a {
    select(records, selection).filter(move |r| {
        (config.include_notifications_in_words || !r.is_notification())
            && !r.is_media(&config.media_placeholder)
    })
}

fn filtered_words<'a>(
    records: &'a [MessageRecord],
    selection: &'a Selection,
    config: &'a StatsConfig,
) -> impl Iterator<Item = String> + 'a {
    let stopwords = config.stopword_set();
    word_sources(records, selection, config).flat_map(move |r| {
        r.body()
            .to_lowercase()
            .split_whitespace()
            .filter(|w| !stopwords.contains(w))
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
}

/// The `config.top_words` most frequent words, lowercased, stopwords removed.
///
/// Notifications and media placeholders are skipped. Ties keep the order in
/// which words first appear.
pub fn most_common_words(
    records: &[MessageRecord],
    selection: &Selection,
    config: &StatsConfig,
) -> Vec<(String, usize)> {
    let mut ranked = rank_by_frequency(filtered_words(records, selection, config));
    ranked.truncate(config.top_words);
    ranked
}

/// Space-joined word text for a word-cloud renderer.
///
/// Uses the same filtering as [`most_common_words`].
pub fn word_corpus(records: &[MessageRecord], selection: &Selection, config: &StatsConfig) -> String {
    filtered_words(records, selection, config)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emoji frequencies across all bodies in the selection.
pub fn emoji_counts(records: &[MessageRecord], selection: &Selection) -> Vec<(char, usize)> {
    rank_by_frequency(select(records, selection).flat_map(|r| emojis(r.body())))
}

/// Counts items, most frequent first, ties by first appearance.
fn rank_by_frequency<K: Eq + Hash>(items: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut seen: HashMap<K, (usize, usize)> = HashMap::new();
    for (idx, item) in items.enumerate() {
        seen.entry(item).or_insert((0, idx)).0 += 1;
    }

    let mut ranked: Vec<(K, usize, usize)> = seen
        .into_iter()
        .map(|(k, (count, first))| (k, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().map(|(k, count, _)| (k, count)).collect()
}

/// Every statistic for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub selection: Selection,
    pub stats: TopStats,
    pub monthly_timeline: Vec<MonthlyPoint>,
    pub daily_timeline: Vec<DailyPoint>,
    pub busiest_days: Vec<(&'static str, usize)>,
    pub busiest_months: Vec<(&'static str, usize)>,
    pub heatmap: Heatmap,
    /// Only present for [`Selection::Overall`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_users: Option<Vec<UserShare>>,
    pub common_words: Vec<(String, usize)>,
    pub emojis: Vec<(char, usize)>,
}

impl Report {
    /// Computes every statistic for `selection`.
    pub fn build(records: &[MessageRecord], selection: Selection, config: &StatsConfig) -> Self {
        Self {
            stats: fetch_stats(records, &selection, config),
            monthly_timeline: monthly_timeline(records, &selection),
            daily_timeline: daily_timeline(records, &selection),
            busiest_days: week_activity_map(records, &selection),
            busiest_months: month_activity_map(records, &selection),
            heatmap: activity_heatmap(records, &selection),
            busy_users: selection.is_overall().then(|| most_busy_users(records)),
            common_words: most_common_words(records, &selection, config),
            emojis: emoji_counts(records, &selection),
            selection,
        }
    }
}
