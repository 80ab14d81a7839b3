//! Emoji classification by Unicode block.
//!
//! A character counts as an emoji when it falls in one of the pictographic
//! blocks below. Joiners, variation selectors and skin-tone modifiers are
//! not counted on their own.

use std::ops::RangeInclusive;

const EMOJI_RANGES: &[RangeInclusive<u32>] = &[
    0x00A9..=0x00A9, // Copyright
    0x00AE..=0x00AE, // Registered
    0x203C..=0x203C, // Double exclamation
    0x2049..=0x2049,
    0x2122..=0x2122, // Trade mark
    0x2139..=0x2139,
    0x2194..=0x2199, // Arrows
    0x21A9..=0x21AA,
    0x2328..=0x2328, // Keyboard
    0x23CF..=0x23CF,
    0x24C2..=0x24C2,
    0x25AA..=0x25AB, // Small squares
    0x25B6..=0x25B6, // Play button
    0x25C0..=0x25C0,
    0x25FB..=0x25FE,
    0x2934..=0x2935,
    0x1F000..=0x1F02F, // Mahjong tiles
    0x1F0A0..=0x1F0FF, // Playing cards
    0x1F1E6..=0x1F1FF, // Regional indicators (flags)
    0x1F300..=0x1F3FA, // Misc symbols and pictographs (before skin tones)
    0x1F400..=0x1F5FF, // Misc symbols and pictographs (animals, objects)
    0x1F600..=0x1F64F, // Emoticons
    0x1F680..=0x1F6FF, // Transport and map
    0x1F7E0..=0x1F7EB, // Geometric shapes extended (colored circles/squares)
    0x1F900..=0x1F9FF, // Supplemental symbols and pictographs
    0x1FA70..=0x1FAFF, // Symbols and pictographs extended-A
    0x2600..=0x26FF,   // Misc symbols
    0x2700..=0x27BF,   // Dingbats
    0x231A..=0x231B,   // Watch, hourglass
    0x23E9..=0x23F3,   // Media control symbols
    0x23F8..=0x23FA,
    0x2B05..=0x2B07, // Arrows
    0x2B1B..=0x2B1C, // Large squares
    0x2B50..=0x2B50, // Star
    0x2B55..=0x2B55, // Circle
    0x3030..=0x3030,
    0x303D..=0x303D,
    0x3297..=0x3297,
    0x3299..=0x3299,
];

/// Returns `true` if `c` is an emoji codepoint.
pub fn is_emoji(c: char) -> bool {
    let cp = u32::from(c);
    EMOJI_RANGES.iter().any(|range| range.contains(&cp))
}

/// Iterates over the emoji characters of `text`.
pub fn emojis(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| is_emoji(*c))
}
