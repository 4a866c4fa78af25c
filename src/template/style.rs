//! Style records attached to template nodes.

use crate::types::{Attr, Dimension, FlexDirection, LineMode, TextWrap};

/// Text-specific style applied to a measurement surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub attrs: Attr,
    pub wrap: TextWrap,
}

/// Flex properties plus the text line-count intent.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub width: Dimension,
    pub height: Dimension,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_direction: FlexDirection,
    /// `None`/`1` single-line, `0` unlimited, `n > 1` at most `n` lines.
    pub line_count: Option<u32>,
    pub text: TextStyle,
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_direction: FlexDirection::Column,
            line_count: None,
            text: TextStyle::default(),
        }
    }
}

impl StyleRecord {
    pub fn line_mode(&self) -> LineMode {
        LineMode::from(self.line_count)
    }

    pub fn with_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_lines(mut self, line_count: u32) -> Self {
        self.line_count = Some(line_count);
        self
    }

    pub fn with_flex_grow(mut self, flex_grow: f32) -> Self {
        self.flex_grow = flex_grow;
        self
    }

    pub fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = direction;
        self
    }

    pub fn with_wrap(mut self, wrap: TextWrap) -> Self {
        self.text.wrap = wrap;
        self
    }
}
