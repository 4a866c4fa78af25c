//! Core types for spark-fit.
//!
//! These types are shared by the template model, the measurement surfaces,
//! the fit-content engine and the taffy bridge.

// =============================================================================
// Dimension
// =============================================================================

/// A style dimension as authored in a template.
///
/// ```
/// use spark_fit::types::Dimension;
///
/// let width = Dimension::Cells(50);       // 50 cells
/// let height = Dimension::Percent(100.0); // Full parent height
/// let auto = Dimension::Auto;             // Left to the flex engine
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Sized by the flex engine.
    #[default]
    Auto,
    /// Absolute size in cells.
    Cells(u16),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        if value == 0 {
            Self::Auto
        } else {
            Self::Cells(value)
        }
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

// =============================================================================
// Node Kind
// =============================================================================

/// Template node type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum NodeKind {
    #[default]
    View = 0,
    Text = 1,
    RichText = 2,
    Image = 3,
    Custom = 4,
}

impl NodeKind {
    /// Text-like nodes (plain and rich).
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text | Self::RichText)
    }

    pub const fn is_rich_text(&self) -> bool {
        matches!(self, Self::RichText)
    }
}

impl From<&str> for NodeKind {
    fn from(value: &str) -> Self {
        match value {
            "view" => Self::View,
            "text" => Self::Text,
            "richtext" => Self::RichText,
            "image" => Self::Image,
            _ => Self::Custom,
        }
    }
}

// =============================================================================
// Flex Enums
// =============================================================================

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    Row = 1,
    ColumnReverse = 2,
    RowReverse = 3,
}

impl FlexDirection {
    /// Check if this is a row direction (Row or RowReverse).
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }
}

impl From<u8> for FlexDirection {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Column,
            1 => Self::Row,
            2 => Self::ColumnReverse,
            3 => Self::RowReverse,
            _ => Self::Column,
        }
    }
}

/// Text wrap mode used by multi-line measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextWrap {
    /// Break at any grapheme boundary.
    #[default]
    Wrap = 0,
    /// Break at word boundaries, falling back to graphemes for long words.
    Word = 1,
}

// =============================================================================
// Line Mode
// =============================================================================

/// Measurement strategy derived from a style's `line_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// `None` or `1`: solve for width, height stays put.
    Single,
    /// `0`: solve for height with no line cap.
    Unlimited,
    /// `n > 1`: solve for height, capped at `n` lines.
    Bounded(u32),
}

impl From<Option<u32>> for LineMode {
    fn from(line_count: Option<u32>) -> Self {
        match line_count {
            None | Some(1) => Self::Single,
            Some(0) => Self::Unlimited,
            Some(n) => Self::Bounded(n),
        }
    }
}

impl LineMode {
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::Single)
    }

    /// Line limit to apply to a surface (`0` = unlimited).
    pub const fn limit(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Unlimited => 0,
            Self::Bounded(n) => *n,
        }
    }
}

// =============================================================================
// Layout Rect / Measure Spec
// =============================================================================

/// Width and height a node settled at during the flex pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<taffy::Size<f32>> for LayoutRect {
    fn from(size: taffy::Size<f32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// One axis constraint handed to a measurement surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasureSpec {
    /// No constraint; the content decides.
    #[default]
    Unspecified,
    /// The result must be exactly this size.
    Exact(f32),
    /// The content may use up to this size.
    AtMost(f32),
}
