//! Cell width of characters, grapheme clusters and strings.
//!
//! Uses Unicode East Asian Width for single codepoints and grapheme cluster
//! analysis for emoji sequences.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Display width of a single codepoint in cells.
///
/// - `0` for control characters, combining marks, zero-width characters
/// - `1` for normal-width characters
/// - `2` for wide characters (CJK ideographs, fullwidth forms, emoji)
#[inline]
pub fn char_width(c: char) -> usize {
    match c as u32 {
        // Misc symbols and dingbats (☀, ✨, ⚡)
        0x2600..=0x27BF => 2,
        // Pictographs, emoticons, transport
        0x1F300..=0x1F64F | 0x1F680..=0x1F6FF => 2,
        // Supplemental pictographs and extended-A
        0x1F900..=0x1F9FF | 0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of a grapheme cluster in cells.
///
/// Emoji sequences (ZWJ, VS16, skin tone, keycap) and regional indicator
/// pairs are 2 cells. A base character followed by combining marks takes the
/// width of the base.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    let is_emoji_sequence = chars.any(|c| {
        matches!(c as u32, 0x200D | 0xFE0F | 0x1F3FB..=0x1F3FF | 0x20E3)
    });
    if is_emoji_sequence {
        return 2;
    }

    first.width().unwrap_or(0)
}

/// Display width of a string in cells.
///
/// Pure ASCII takes a byte-counting fast path.
pub fn string_width(s: &str) -> usize {
    if s.is_empty() {
        return 0;
    }

    if s.is_ascii() {
        return s.bytes().filter(|b| (0x20..0x7F).contains(b)).count();
    }

    s.graphemes(true).map(grapheme_width).sum()
}
