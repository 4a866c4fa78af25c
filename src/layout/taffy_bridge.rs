//! Taffy Bridge - two-pass fit-content layout on top of Taffy.
//!
//! Mirrors a [`TemplateTree`] into a `TaffyTree`, then:
//!
//! 1. **Flex pass**: Taffy lays out the whole tree. Fit-content text leaves
//!    report no intrinsic size; other text leaves measure their content.
//! 2. **Correction pass**: every fit-content node, in tree order, is sized by
//!    the [`FitContentEngine`] from its settled rectangle. The corrected size
//!    is written back as a fixed length (flex-grow cleared) and the tree is
//!    re-settled before the next node reads its rectangle.
//!
//! A configuration error on one node is recorded and its siblings are still
//! processed.

use serde_json::Value;
use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    NodeId, Size, Style, TaffyTree,
};

use super::types::{ComputedLayout, LayoutOutcome};
use crate::config::FitConfig;
use crate::dirty::DirtyText;
use crate::error::{LayoutError, LayoutResult};
use crate::fit::FitContentEngine;
use crate::measure::SurfaceHost;
use crate::template::{NodeHandle, TemplateContext, TemplateNode, TemplateTree};
use crate::types::{Dimension, FlexDirection, LayoutRect, MeasureSpec};

// =============================================================================
// STYLE CONVERSION
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

/// Authored Taffy style for a template node.
fn build_style(node: &TemplateNode) -> Style {
    let style = &node.style;
    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(style.flex_direction),
        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        size: Size {
            width: to_taffy_dimension(style.width),
            height: to_taffy_dimension(style.height),
        },
        ..Default::default()
    }
}

fn to_measure_spec(space: AvailableSpace) -> MeasureSpec {
    match space {
        AvailableSpace::Definite(width) => MeasureSpec::AtMost(width),
        AvailableSpace::MinContent | AvailableSpace::MaxContent => MeasureSpec::Unspecified,
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Everything a pass needs besides the session itself.
pub struct Pass<'a, H: SurfaceHost> {
    pub engine: &'a FitContentEngine<H::Surface>,
    pub host: &'a H,
    pub available: Size<AvailableSpace>,
}

impl<H: SurfaceHost> Clone for Pass<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: SurfaceHost> Copy for Pass<'_, H> {}

/// A template tree mirrored into Taffy, kept across passes.
pub struct LayoutSession {
    tree: TemplateTree,
    taffy: TaffyTree<usize>,
    nodes: Vec<NodeId>,
    config: FitConfig,
}

impl LayoutSession {
    pub fn new(tree: TemplateTree, config: FitConfig) -> LayoutResult<Self> {
        let mut taffy: TaffyTree<usize> = TaffyTree::new();
        let mut nodes = Vec::with_capacity(tree.len());

        for index in 0..tree.len() {
            let node = tree.node(index).ok_or(LayoutError::UnknownNode(index))?;
            let style = build_style(node);
            // Text leaves carry their template index for the measure function.
            let id = if node.kind.is_text() {
                taffy.new_leaf_with_context(style, index)?
            } else {
                taffy.new_leaf(style)?
            };
            nodes.push(id);
        }

        for index in 0..tree.len() {
            for &child in tree.children(index) {
                taffy.add_child(nodes[index], nodes[child])?;
            }
        }

        Ok(Self {
            tree,
            taffy,
            nodes,
            config,
        })
    }

    pub fn tree(&self) -> &TemplateTree {
        &self.tree
    }

    /// Flex pass followed by the fit-content correction pass.
    ///
    /// Restores authored styles first, so repeated calls start from the same
    /// flex input.
    pub fn compute<H: SurfaceHost>(
        &mut self,
        pass: Pass<'_, H>,
        context: &TemplateContext,
        data: &Value,
    ) -> LayoutResult<LayoutOutcome> {
        for index in 0..self.tree.len() {
            self.restore_style(index)?;
        }
        self.settle(pass, context, data)?;

        let mut outcome = LayoutOutcome::default();
        for index in self.tree.preorder() {
            let fit_content = self.tree.node(index).is_some_and(|node| node.fit_content);
            if fit_content {
                self.correct_recording(index, pass, context, data, &mut outcome)?;
            }
        }

        outcome.layout = self.computed_layout()?;
        Ok(outcome)
    }

    /// Re-resolve and re-measure drained dirty text nodes.
    ///
    /// Each entry is restored to its authored style and re-settled with the
    /// entry's own context and data. Fit-content nodes are then corrected and
    /// re-settled again; other nodes keep their flex size.
    ///
    /// A handle whose index no longer points at its node is looked up by id.
    /// Handles whose node is gone are recorded in `LayoutOutcome::stale` and
    /// the rest of the batch is still applied.
    pub fn apply_dirty<H, I>(&mut self, pass: Pass<'_, H>, entries: I) -> LayoutResult<LayoutOutcome>
    where
        H: SurfaceHost,
        I: IntoIterator<Item = DirtyText>,
    {
        let mut outcome = LayoutOutcome::default();

        for entry in entries {
            let Some(index) = self.locate(&entry.node) else {
                tracing::warn!(node = %entry.node.id, index = entry.node.index, "dirty text node no longer in tree");
                outcome.stale.push(entry.node);
                continue;
            };

            self.restore_style(index)?;
            self.settle(pass, &entry.context, &entry.data)?;

            let fit_content = self.tree.node(index).is_some_and(|node| node.fit_content);
            if fit_content {
                self.correct_recording(index, pass, &entry.context, &entry.data, &mut outcome)?;
            }
        }

        outcome.layout = self.computed_layout()?;
        Ok(outcome)
    }

    fn locate(&self, handle: &NodeHandle) -> Option<usize> {
        let in_place = self
            .tree
            .node(handle.index)
            .is_some_and(|node| node.id == handle.id);
        if in_place {
            Some(handle.index)
        } else {
            self.tree.find(&handle.id)
        }
    }

    pub fn computed_layout(&self) -> LayoutResult<ComputedLayout> {
        let mut result = ComputedLayout::with_len(self.nodes.len());
        for (index, &id) in self.nodes.iter().enumerate() {
            let layout = self.taffy.layout(id)?;
            result.x[index] = layout.location.x;
            result.y[index] = layout.location.y;
            result.width[index] = layout.size.width;
            result.height[index] = layout.size.height;
        }
        Ok(result)
    }

    fn restore_style(&mut self, index: usize) -> LayoutResult<()> {
        let node = self.tree.node(index).ok_or(LayoutError::UnknownNode(index))?;
        self.taffy.set_style(self.nodes[index], build_style(node))?;
        Ok(())
    }

    /// Run Taffy from the root.
    fn settle<H: SurfaceHost>(
        &mut self,
        pass: Pass<'_, H>,
        context: &TemplateContext,
        data: &Value,
    ) -> LayoutResult<()> {
        let tree = &self.tree;
        let root = self.nodes[tree.root()];

        let measure = |known: Size<Option<f32>>,
                       available: Size<AvailableSpace>,
                       _id: NodeId,
                       node_context: Option<&mut usize>,
                       _style: &Style| {
            let Some(node) = node_context.and_then(|&mut index| tree.node(index)) else {
                return Size::ZERO;
            };

            // Fit-content nodes take their size from the correction pass.
            let natural = if node.fit_content {
                None
            } else {
                pass.engine.measure_intrinsic(
                    context,
                    pass.host,
                    node,
                    data,
                    to_measure_spec(available.width),
                )
            };
            let natural = natural.unwrap_or(Size::ZERO);

            Size {
                width: known.width.unwrap_or(natural.width),
                height: known.height.unwrap_or(natural.height),
            }
        };

        self.taffy.compute_layout_with_measure(root, pass.available, measure)?;
        Ok(())
    }

    fn correct_recording<H: SurfaceHost>(
        &mut self,
        index: usize,
        pass: Pass<'_, H>,
        context: &TemplateContext,
        data: &Value,
        outcome: &mut LayoutOutcome,
    ) -> LayoutResult<()> {
        match self.correct(index, pass, context, data) {
            Ok(Some(size)) => outcome.corrected.push((index, size)),
            Ok(None) => {}
            Err(LayoutError::Fit(err)) => {
                tracing::warn!(node = index, error = %err, "fit-content correction failed");
                outcome.failures.push(err);
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Correct one node and re-settle if its size changed.
    fn correct<H: SurfaceHost>(
        &mut self,
        index: usize,
        pass: Pass<'_, H>,
        context: &TemplateContext,
        data: &Value,
    ) -> LayoutResult<Option<Size<f32>>> {
        let node = self.tree.node(index).ok_or(LayoutError::UnknownNode(index))?;
        let id = self.nodes[index];
        let settled = self.taffy.layout(id)?.size;

        let corrected = pass
            .engine
            .fit_content(context, pass.host, node, Some(LayoutRect::from(settled)), data)?;
        let Some(size) = corrected else {
            return Ok(None);
        };

        let mut style = self.taffy.style(id)?.clone();
        style.size = Size {
            width: TaffyDimension::Length(size.width),
            height: TaffyDimension::Length(size.height),
        };
        if self.config.reset_flex_grow {
            style.flex_grow = 0.0;
        }
        self.taffy.set_style(id, style)?;

        if size != settled {
            self.settle(pass, context, data)?;
        }
        Ok(Some(size))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::dirty::DirtyTextTracker;
    use crate::error::FitError;
    use crate::measure::{CellHost, CellSurface, HostKey};
    use crate::template::{DataBinding, StyleRecord};

    fn fit_text(id: &str, style: StyleRecord) -> TemplateNode {
        TemplateNode::text(id)
            .with_style(style)
            .with_binding(DataBinding::path(id))
            .with_fit_content(true)
    }

    fn row_root() -> TemplateNode {
        TemplateNode::view("root").with_style(
            StyleRecord::default()
                .with_size(Dimension::Cells(40), Dimension::Cells(10))
                .with_direction(FlexDirection::Row),
        )
    }

    fn run(tree: TemplateTree, data: Value, height: AvailableSpace) -> LayoutOutcome {
        let engine = FitContentEngine::<CellSurface>::new(&FitConfig::default());
        let host = CellHost::new(HostKey(1));
        let pass = Pass {
            engine: &engine,
            host: &host,
            available: Size {
                width: AvailableSpace::Definite(40.0),
                height,
            },
        };
        let mut session = LayoutSession::new(tree, FitConfig::default()).unwrap();
        let outcome = session
            .compute(pass, &TemplateContext::default(), &data)
            .unwrap();
        assert_eq!(engine.pool().stats().outstanding(), 0);
        outcome
    }

    #[test]
    fn test_dimension_conversion() {
        assert!(matches!(to_taffy_dimension(Dimension::Auto), TaffyDimension::Auto));
        assert!(matches!(to_taffy_dimension(Dimension::Cells(50)), TaffyDimension::Length(50.0)));
        if let TaffyDimension::Percent(p) = to_taffy_dimension(Dimension::Percent(50.0)) {
            assert!((p - 0.5).abs() < 0.001);
        } else {
            panic!("Expected Percent variant");
        }
    }

    #[test]
    fn test_measure_spec_from_available() {
        assert_eq!(to_measure_spec(AvailableSpace::Definite(12.0)), MeasureSpec::AtMost(12.0));
        assert_eq!(to_measure_spec(AvailableSpace::MaxContent), MeasureSpec::Unspecified);
    }

    #[test]
    fn test_row_siblings_resettle() {
        let mut tree = TemplateTree::new(row_root());
        let a = tree.add_child(0, fit_text("a", StyleRecord::default())).unwrap();
        let b = tree.add_child(0, fit_text("b", StyleRecord::default())).unwrap();

        let outcome = run(tree, json!({ "a": "hello", "b": "world!" }), AvailableSpace::Definite(10.0));

        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.layout.get(a), (0.0, 0.0, 5.0, 10.0));
        assert_eq!(outcome.layout.get(b), (5.0, 0.0, 6.0, 10.0));
        assert_eq!(outcome.corrected_size(b), Some(Size { width: 6.0, height: 10.0 }));
    }

    #[test]
    fn test_failure_does_not_stop_siblings() {
        let mut tree = TemplateTree::new(row_root());
        tree.add_child(0, fit_text("a", StyleRecord::default().with_lines(0)))
            .unwrap();
        let b = tree.add_child(0, fit_text("b", StyleRecord::default())).unwrap();

        let outcome = run(tree, json!({ "a": "hello", "b": "world" }), AvailableSpace::Definite(10.0));

        assert_eq!(
            outcome.failures,
            vec![FitError::InvalidConfiguration {
                node_id: "a".to_string(),
                line_count: 0,
            }]
        );
        assert_eq!(outcome.layout.rect(b), LayoutRect::new(5.0, 10.0));
    }

    #[test]
    fn test_multi_line_grows_parent() {
        let root = TemplateNode::view("root")
            .with_style(StyleRecord::default().with_size(Dimension::Cells(10), Dimension::Auto));
        let mut tree = TemplateTree::new(root);
        let text = tree
            .add_child(0, fit_text("body", StyleRecord::default().with_lines(0)))
            .unwrap();

        let outcome = run(tree, json!({ "body": "hello world foo" }), AvailableSpace::MaxContent);

        assert_eq!(outcome.layout.rect(text), LayoutRect::new(10.0, 2.0));
        assert_eq!(outcome.layout.rect(0), LayoutRect::new(10.0, 2.0));
    }

    #[test]
    fn test_plain_text_measures_in_flex_pass() {
        let mut tree = TemplateTree::new(row_root());
        let label = tree
            .add_child(
                0,
                TemplateNode::text("label").with_binding(DataBinding::path("label")),
            )
            .unwrap();
        let after = tree.add_child(0, fit_text("a", StyleRecord::default())).unwrap();

        let outcome = run(tree, json!({ "label": "abc", "a": "xy" }), AvailableSpace::Definite(10.0));

        assert_eq!(outcome.layout.get(label).2, 3.0);
        assert_eq!(outcome.layout.get(after).0, 3.0);
        assert_eq!(outcome.corrected.len(), 1);
    }

    #[test]
    fn test_compute_is_repeatable() {
        let mut tree = TemplateTree::new(row_root());
        let a = tree.add_child(0, fit_text("a", StyleRecord::default())).unwrap();

        let engine = FitContentEngine::<CellSurface>::new(&FitConfig::default());
        let host = CellHost::new(HostKey(1));
        let pass = Pass {
            engine: &engine,
            host: &host,
            available: Size {
                width: AvailableSpace::Definite(40.0),
                height: AvailableSpace::Definite(10.0),
            },
        };
        let mut session = LayoutSession::new(tree, FitConfig::default()).unwrap();
        let context = TemplateContext::default();

        let first = session.compute(pass, &context, &json!({ "a": "long text" })).unwrap();
        assert_eq!(first.layout.get(a).2, 9.0);

        // Shorter content shrinks again because authored styles are restored.
        let second = session.compute(pass, &context, &json!({ "a": "ab" })).unwrap();
        assert_eq!(second.layout.get(a).2, 2.0);
    }

    #[test]
    fn test_dirty_plain_text_keeps_flex_size() {
        let mut tree = TemplateTree::new(row_root());
        let label = tree
            .add_child(
                0,
                TemplateNode::text("label")
                    .with_style(StyleRecord::default().with_flex_grow(1.0))
                    .with_binding(DataBinding::path("label")),
            )
            .unwrap();

        let engine = FitContentEngine::<CellSurface>::new(&FitConfig::default());
        let host = CellHost::new(HostKey(1));
        let pass = Pass {
            engine: &engine,
            host: &host,
            available: Size {
                width: AvailableSpace::Definite(40.0),
                height: AvailableSpace::Definite(10.0),
            },
        };
        let mut session = LayoutSession::new(tree, FitConfig::default()).unwrap();
        let context = Rc::new(TemplateContext::default());

        let first = session.compute(pass, &context, &json!({ "label": "ab" })).unwrap();
        assert_eq!(first.layout.get(label).2, 40.0);
        assert!(first.corrected.is_empty());

        let mut tracker = DirtyTextTracker::new();
        let handle = session.tree().handle(label).unwrap();
        tracker.mark_dirty(Rc::clone(&context), handle, json!({ "label": "abcd" }));

        let outcome = session.apply_dirty(pass, tracker.drain()).unwrap();
        assert!(outcome.corrected.is_empty());
        assert_eq!(outcome.layout.rect(label), LayoutRect::new(40.0, 10.0));
    }

    #[test]
    fn test_stale_handle_does_not_drop_batch() {
        let mut tree = TemplateTree::new(row_root());
        let a = tree.add_child(0, fit_text("a", StyleRecord::default())).unwrap();
        let b = tree.add_child(0, fit_text("b", StyleRecord::default())).unwrap();

        let engine = FitContentEngine::<CellSurface>::new(&FitConfig::default());
        let host = CellHost::new(HostKey(1));
        let pass = Pass {
            engine: &engine,
            host: &host,
            available: Size {
                width: AvailableSpace::Definite(40.0),
                height: AvailableSpace::Definite(10.0),
            },
        };
        let mut session = LayoutSession::new(tree, FitConfig::default()).unwrap();
        let context = Rc::new(TemplateContext::default());
        session
            .compute(pass, &context, &json!({ "a": "x", "b": "y" }))
            .unwrap();

        let gone = NodeHandle {
            index: 7,
            id: "gone".to_string(),
        };
        // Wrong index, right id: found again by id.
        let moved = NodeHandle {
            index: 9,
            id: "b".to_string(),
        };
        let data = json!({ "a": "hello", "b": "abc" });

        let mut tracker = DirtyTextTracker::new();
        tracker.mark_dirty(Rc::clone(&context), gone.clone(), data.clone());
        tracker.mark_dirty(Rc::clone(&context), session.tree().handle(a).unwrap(), data.clone());
        tracker.mark_dirty(Rc::clone(&context), moved, data);

        let outcome = session.apply_dirty(pass, tracker.drain()).unwrap();

        assert_eq!(outcome.stale, vec![gone]);
        assert_eq!(outcome.corrected.len(), 2);
        assert_eq!(outcome.layout.get(a), (0.0, 0.0, 5.0, 10.0));
        assert_eq!(outcome.layout.get(b), (5.0, 0.0, 3.0, 10.0));
        assert_eq!(engine.pool().stats().outstanding(), 0);
    }
}
