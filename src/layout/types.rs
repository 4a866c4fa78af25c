//! Layout Types
//!
//! Output types for a layout session.

use taffy::Size;

use crate::error::FitError;
use crate::template::NodeHandle;
use crate::types::LayoutRect;

/// Computed layout result.
///
/// Parallel arrays indexed by template node index. Positions are relative to
/// the node's parent, as reported by the flex engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub width: Vec<f32>,
    pub height: Vec<f32>,
}

impl ComputedLayout {
    pub fn with_len(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            width: vec![0.0; len],
            height: vec![0.0; len],
        }
    }

    /// Returns (x, y, width, height), or zeros if the index is out of bounds.
    pub fn get(&self, index: usize) -> (f32, f32, f32, f32) {
        (
            self.x.get(index).copied().unwrap_or(0.0),
            self.y.get(index).copied().unwrap_or(0.0),
            self.width.get(index).copied().unwrap_or(0.0),
            self.height.get(index).copied().unwrap_or(0.0),
        )
    }

    pub fn rect(&self, index: usize) -> LayoutRect {
        let (_, _, width, height) = self.get(index);
        LayoutRect::new(width, height)
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone, Default)]
pub struct LayoutOutcome {
    pub layout: ComputedLayout,
    /// Nodes whose size was corrected, in correction order.
    pub corrected: Vec<(usize, Size<f32>)>,
    /// Nodes whose correction failed; they keep their flex size.
    pub failures: Vec<FitError>,
    /// Dirty handles whose node is no longer in the tree.
    pub stale: Vec<NodeHandle>,
}

impl LayoutOutcome {
    pub fn corrected_size(&self, index: usize) -> Option<Size<f32>> {
        self.corrected
            .iter()
            .rev()
            .find(|(corrected, _)| *corrected == index)
            .map(|(_, size)| *size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_layout_get() {
        let mut layout = ComputedLayout::with_len(1);
        layout.x[0] = 10.0;
        layout.width[0] = 30.0;
        layout.height[0] = 40.0;

        assert_eq!(layout.get(0), (10.0, 0.0, 30.0, 40.0));
        assert_eq!(layout.get(999), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(layout.rect(0), LayoutRect::new(30.0, 40.0));
    }
}
