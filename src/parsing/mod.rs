//! Low-level transcript parsing.
//!
//! - [`header`] - locates `M/D/YY, H:MM AM - ` headers and parses their timestamps
//! - [`author`] - splits a segment into author and body
//!
//! [`TranscriptParser`](crate::parser::TranscriptParser) combines both into
//! records; these building blocks are public for callers that need the raw
//! segments.

pub mod author;
pub mod header;

pub use author::{AUTHOR_DELIMITER, AuthorSplit, split_author};
pub use header::{
    HEADER_PATTERN, HeaderMatch, Segment, find_headers, normalize_spaces, parse_timestamp,
    split_segments,
};
