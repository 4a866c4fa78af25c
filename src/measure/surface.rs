//! Measurement surfaces.
//!
//! A surface is the native text-measurement primitive: a mutable handle that
//! holds text, style and line settings and reports the size that text would
//! render at under a pair of constraints. Surfaces are created by a
//! [`SurfaceHost`] and recycled through [`super::SurfacePool`].

use taffy::Size;

use super::width::string_width;
use super::wrap::line_widths;
use crate::content::MeasureText;
use crate::template::TextStyle;
use crate::types::MeasureSpec;

/// Native text measurement handle.
pub trait MeasureSurface {
    fn set_text(&mut self, text: &MeasureText);

    fn set_style(&mut self, style: &TextStyle);

    /// Force everything onto one line; newlines render as spaces.
    fn set_single_line(&mut self, single_line: bool);

    /// Cap the number of rendered lines. `0` removes the cap.
    fn set_line_limit(&mut self, lines: u32);

    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size<f32>;

    /// Return to the freshly created state.
    fn reset(&mut self);
}

/// Host environment identity. Pools keep idle surfaces per host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HostKey(pub u64);

/// A host environment able to create surfaces.
pub trait SurfaceHost {
    type Surface: MeasureSurface;

    fn key(&self) -> HostKey;

    fn create_surface(&self) -> Self::Surface;
}

// =============================================================================
// Cell Surface
// =============================================================================

/// Terminal-cell surface: one cell per narrow grapheme, one row per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellSurface {
    text: String,
    style: TextStyle,
    single_line: bool,
    line_limit: u32,
}

impl CellSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    /// Natural (width, rows) before applying constraints.
    fn natural_size(&self, width: MeasureSpec) -> (usize, usize) {
        if self.single_line {
            let flattened = self.text.replace('\n', " ");
            return (string_width(&flattened), 1);
        }

        let max_width = match width {
            MeasureSpec::Unspecified => None,
            MeasureSpec::AtMost(w) | MeasureSpec::Exact(w) => Some(w.max(0.0).floor() as usize),
        };

        let mut lines = line_widths(&self.text, max_width, self.style.wrap);
        if self.line_limit > 0 {
            lines.truncate(self.line_limit as usize);
        }

        let widest = lines.iter().copied().max().unwrap_or(0);
        (widest, lines.len().max(1))
    }
}

fn constrain(natural: f32, spec: MeasureSpec) -> f32 {
    match spec {
        MeasureSpec::Unspecified => natural,
        MeasureSpec::AtMost(limit) => natural.min(limit),
        MeasureSpec::Exact(size) => size,
    }
}

impl MeasureSurface for CellSurface {
    fn set_text(&mut self, text: &MeasureText) {
        self.text.clear();
        self.text.push_str(text.as_str());
    }

    fn set_style(&mut self, style: &TextStyle) {
        self.style = *style;
    }

    fn set_single_line(&mut self, single_line: bool) {
        self.single_line = single_line;
    }

    fn set_line_limit(&mut self, lines: u32) {
        self.line_limit = lines;
    }

    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size<f32> {
        let (cells, rows) = self.natural_size(width);
        Size {
            width: constrain(cells as f32, width),
            height: constrain(rows as f32, height),
        }
    }

    fn reset(&mut self) {
        self.text.clear();
        self.style = TextStyle::default();
        self.single_line = false;
        self.line_limit = 0;
    }
}

/// Host producing [`CellSurface`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellHost {
    key: HostKey,
}

impl CellHost {
    pub fn new(key: HostKey) -> Self {
        Self { key }
    }
}

impl SurfaceHost for CellHost {
    type Surface = CellSurface;

    fn key(&self) -> HostKey {
        self.key
    }

    fn create_surface(&self) -> CellSurface {
        CellSurface::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextWrap;

    fn surface(text: &str) -> CellSurface {
        let mut surface = CellSurface::new();
        surface.set_text(&MeasureText::from(text));
        surface
    }

    #[test]
    fn test_single_line_unconstrained() {
        let mut s = surface("哈哈 ok\nmore");
        s.set_single_line(true);
        let size = s.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(size, Size { width: 12.0, height: 1.0 });
    }

    #[test]
    fn test_multi_line_at_most() {
        let mut s = surface("abcdefghij");
        let size = s.measure(MeasureSpec::AtMost(4.0), MeasureSpec::Unspecified);
        assert_eq!(size, Size { width: 4.0, height: 3.0 });
    }

    #[test]
    fn test_line_limit_caps_rows() {
        let mut s = surface("abcdefghij");
        s.set_line_limit(2);
        let size = s.measure(MeasureSpec::AtMost(4.0), MeasureSpec::Unspecified);
        assert_eq!(size.height, 2.0);
    }

    #[test]
    fn test_exact_and_empty() {
        let mut s = surface("");
        let size = s.measure(MeasureSpec::Exact(7.0), MeasureSpec::Unspecified);
        assert_eq!(size, Size { width: 7.0, height: 1.0 });
    }

    #[test]
    fn test_word_wrap_style() {
        let mut s = surface("hello world");
        s.set_style(&TextStyle {
            wrap: TextWrap::Word,
            ..TextStyle::default()
        });
        let size = s.measure(MeasureSpec::AtMost(8.0), MeasureSpec::Unspecified);
        assert_eq!(size, Size { width: 5.0, height: 2.0 });
    }

    #[test]
    fn test_reset() {
        let mut s = surface("text");
        s.set_single_line(true);
        s.set_line_limit(3);
        s.reset();
        assert_eq!(s, CellSurface::new());
    }
}
