//! Character sequences handed to a measurement surface.

use std::fmt;
use std::ops::Range;

use crate::types::Attr;

/// A run of text carrying extra attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range into the owning text.
    pub range: Range<usize>,
    pub attrs: Attr,
}

/// Text plus attribute spans, e.g. the output of a highlight rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    spans: Vec<Span>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Append `segment`, marking it with `attrs` when they are non-empty.
    pub fn push(&mut self, segment: &str, attrs: Attr) {
        if segment.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(segment);
        if !attrs.is_empty() {
            self.spans.push(Span {
                range: start..self.text.len(),
                attrs,
            });
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Slices of the text covered by spans, in order.
    pub fn marked(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().map(|span| &self.text[span.range.clone()])
    }
}

/// What a surface actually measures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureText {
    Plain(String),
    Styled(StyledText),
}

impl MeasureText {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Styled(styled) => styled.as_str(),
        }
    }

    pub fn is_styled(&self) -> bool {
        matches!(self, Self::Styled(_))
    }
}

impl Default for MeasureText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<String> for MeasureText {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<&str> for MeasureText {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<StyledText> for MeasureText {
    fn from(styled: StyledText) -> Self {
        Self::Styled(styled)
    }
}

impl fmt::Display for MeasureText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_push_records_spans() {
        let mut styled = StyledText::default();
        styled.push("see ", Attr::NONE);
        styled.push("this", Attr::BOLD);
        styled.push("", Attr::BOLD);

        assert_eq!(styled.as_str(), "see this");
        assert_eq!(styled.spans().len(), 1);
        assert_eq!(styled.spans()[0].range, 4..8);
        assert_eq!(styled.marked().collect::<Vec<_>>(), vec!["this"]);
    }

    #[test]
    fn test_measure_text_display() {
        let text = MeasureText::from("plain");
        assert_eq!(text.to_string(), "plain");
        assert!(!text.is_styled());
        assert!(MeasureText::from(StyledText::new("x")).is_styled());
    }
}
