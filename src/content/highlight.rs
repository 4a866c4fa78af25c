//! Highlight rules: marker-delimited emphasis inside bound strings.
//!
//! `"find #this# here"` with the default `#`/`#` markers measures as
//! `"find this here"` with `this` carrying the rule's attributes.

use super::styled::StyledText;
use crate::types::Attr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRule {
    pub start: String,
    pub end: String,
    pub attrs: Attr,
}

impl Default for HighlightRule {
    fn default() -> Self {
        Self::with_marker("#")
    }
}

impl HighlightRule {
    pub fn new(start: impl Into<String>, end: impl Into<String>, attrs: Attr) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            attrs,
        }
    }

    /// Same marker on both sides, bold emphasis.
    pub fn with_marker(marker: &str) -> Self {
        Self::new(marker, marker, Attr::BOLD)
    }

    /// Strip markers and mark the enclosed ranges.
    ///
    /// Returns `None` when the text has no complete, non-empty marked range,
    /// so callers fall through to the next content source.
    pub fn apply(&self, text: &str) -> Option<StyledText> {
        if self.start.is_empty() || self.end.is_empty() {
            return None;
        }

        let mut styled = StyledText::default();
        let mut rest = text;
        let mut matched = false;

        while let Some(open) = rest.find(&self.start) {
            let after_open = &rest[open + self.start.len()..];
            let Some(close) = after_open.find(&self.end) else {
                break;
            };

            styled.push(&rest[..open], Attr::NONE);
            styled.push(&after_open[..close], self.attrs);
            rest = &after_open[close + self.end.len()..];
            matched |= close > 0;
        }

        if !matched {
            return None;
        }

        styled.push(rest, Attr::NONE);
        Some(styled)
    }
}
