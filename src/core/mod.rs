//! Everything downstream of parsing.
//!
//! - [`filter`] - narrow records by date, author and kind
//! - [`stats`] - counts, timelines, heatmap, word and emoji tables
//! - [`emoji`] / [`stopwords`] - text classification used by [`stats`]
//! - [`models`] / [`output`] - export configuration and writers (CSV, JSON, JSONL)
//!
//! ```rust
//! use chatlens::core::{FilterConfig, Report, Selection, apply_filters};
//! ```

pub mod emoji;
pub mod filter;
pub mod models;
pub mod output;
pub mod stats;
pub mod stopwords;

pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;
pub use stats::{Report, Selection, TopStats};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, to_report_json, write_json, write_jsonl, write_report_json};
