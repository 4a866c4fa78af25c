//! Line breaking for multi-line measurement.
//!
//! Measurement only needs the width of every line a text would occupy, so
//! these helpers produce line widths instead of wrapped strings. Two modes:
//! - **Character-break** (`TextWrap::Wrap`): breaks at any grapheme boundary
//! - **Word-break** (`TextWrap::Word`): breaks at UAX #29 word boundaries and
//!   falls back to grapheme breaks for words wider than the line
//!
//! Explicit newlines are always hard breaks.

use unicode_segmentation::UnicodeSegmentation;

use super::width::grapheme_width;
use crate::types::TextWrap;

/// Widths of the lines `text` occupies when wrapped at `max_width` cells.
///
/// `None` disables soft wrapping, leaving only hard breaks. Empty input yields
/// no lines.
pub fn line_widths(text: &str, max_width: Option<usize>, wrap: TextWrap) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut widths = Vec::new();

    for raw_line in text.split('\n') {
        match max_width {
            None | Some(0) => widths.push(raw_line.graphemes(true).map(grapheme_width).sum()),
            Some(max) => match wrap {
                TextWrap::Wrap => break_graphemes(raw_line, max, &mut widths),
                TextWrap::Word => break_words(raw_line, max, &mut widths),
            },
        }
    }

    widths
}

/// Number of lines `text` occupies when wrapped at `max_width` cells.
pub fn line_count(text: &str, max_width: Option<usize>, wrap: TextWrap) -> usize {
    line_widths(text, max_width, wrap).len()
}

fn break_graphemes(line: &str, max: usize, widths: &mut Vec<usize>) {
    let mut current = 0usize;

    for grapheme in line.graphemes(true) {
        let gw = grapheme_width(grapheme);

        if current + gw > max && current > 0 {
            widths.push(current);
            current = 0;
        }
        current += gw;
    }

    widths.push(current);
}

fn break_words(line: &str, max: usize, widths: &mut Vec<usize>) {
    let mut current = 0usize;
    // Trailing whitespace never counts toward a broken line's width.
    let mut trailing_space = 0usize;

    for segment in line.split_word_bounds() {
        let seg_width: usize = segment.graphemes(true).map(grapheme_width).sum();
        let is_space = segment.chars().all(char::is_whitespace);

        if current + seg_width > max {
            if current > 0 {
                widths.push(current - trailing_space);
                current = 0;
                trailing_space = 0;
            }

            if is_space {
                continue;
            }

            if seg_width > max {
                for grapheme in segment.graphemes(true) {
                    let gw = grapheme_width(grapheme);
                    if current + gw > max && current > 0 {
                        widths.push(current);
                        current = 0;
                    }
                    current += gw;
                }
                continue;
            }
        }

        current += seg_width;
        trailing_space = if is_space { trailing_space + seg_width } else { 0 };
    }

    widths.push(current - trailing_space);
}
