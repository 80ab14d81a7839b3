//! Author/body splitting for a single message segment.
//!
//! The author is everything before the first `": "` in the segment. The
//! author must be at least one character long, so a segment that starts
//! with `": "` does not produce an empty author. A segment with no `": "`
//! at all is a system notification.
//!
//! A message that has no author but whose text contains `": "` (e.g.
//! `Note: check this`) is read as author `Note`. The export format gives no
//! way to tell the two apart.

use crate::record::MessageKind;

/// Separator between author and message text.
pub const AUTHOR_DELIMITER: &str = ": ";

/// Result of splitting a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorSplit<'a> {
    pub author: Option<&'a str>,
    pub body: &'a str,
}

impl AuthorSplit<'_> {
    /// Record kind implied by the split.
    pub fn kind(&self) -> MessageKind {
        if self.author.is_some() {
            MessageKind::HumanMessage
        } else {
            MessageKind::SystemNotification
        }
    }
}

/// Splits `segment` on its first `": "`.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::author::split_author;
///
/// let split = split_author("Alice: see you at 10: sharp");
/// assert_eq!(split.author, Some("Alice"));
/// assert_eq!(split.body, "see you at 10: sharp");
///
/// let split = split_author("Alice added Bob");
/// assert_eq!(split.author, None);
/// assert_eq!(split.body, "Alice added Bob");
/// ```
pub fn split_author(segment: &str) -> AuthorSplit<'_> {
    let not_found = AuthorSplit {
        author: None,
        body: segment,
    };

    let Some(first) = segment.chars().next() else {
        return not_found;
    };
    let search_from = first.len_utf8();

    match segment[search_from..].find(AUTHOR_DELIMITER) {
        Some(pos) => {
            let colon = search_from + pos;
            AuthorSplit {
                author: Some(&segment[..colon]),
                body: &segment[colon + AUTHOR_DELIMITER.len()..],
            }
        }
        None => not_found,
    }
}
