//! Template nodes and the index-based template tree.
//!
//! Nodes are not linked objects. They are indices into parallel vectors:
//!
//! ```text
//! Index 0: View (parent=None, children=[1, 2])
//! Index 1: Text (parent=0,    fit_content=true)
//! Index 2: Text (parent=0,    fit_content=false)
//! ```

use super::binding::DataBinding;
use super::style::StyleRecord;
use crate::types::NodeKind;

/// Semantic description of a UI element. Immutable during a render.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateNode {
    pub id: String,
    pub kind: NodeKind,
    pub style: StyleRecord,
    pub binding: Option<DataBinding>,
    pub fit_content: bool,
}

impl TemplateNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            style: StyleRecord::default(),
            binding: None,
            fit_content: false,
        }
    }

    pub fn view(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::View)
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Text)
    }

    pub fn with_style(mut self, style: StyleRecord) -> Self {
        self.style = style;
        self
    }

    pub fn with_binding(mut self, binding: DataBinding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn with_fit_content(mut self, fit_content: bool) -> Self {
        self.fit_content = fit_content;
        self
    }

    /// Plain text nodes only; rich text lays out its own spans.
    pub fn is_fit_eligible(&self) -> bool {
        self.kind.is_text() && !self.kind.is_rich_text()
    }
}

/// Stable reference to a node inside a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub index: usize,
    pub id: String,
}

/// A template tree. Index 0 is the root.
#[derive(Debug, Clone)]
pub struct TemplateTree {
    nodes: Vec<TemplateNode>,
    children: Vec<Vec<usize>>,
}

impl TemplateTree {
    pub fn new(root: TemplateNode) -> Self {
        Self {
            nodes: vec![root],
            children: vec![Vec::new()],
        }
    }

    /// Append `node` under `parent`. Returns `None` for an unknown parent.
    pub fn add_child(&mut self, parent: usize, node: TemplateNode) -> Option<usize> {
        if parent >= self.nodes.len() {
            return None;
        }
        let index = self.nodes.len();
        self.nodes.push(node);
        self.children.push(Vec::new());
        self.children[parent].push(index);
        Some(index)
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&TemplateNode> {
        self.nodes.get(index)
    }

    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    pub fn handle(&self, index: usize) -> Option<NodeHandle> {
        self.node(index).map(|node| NodeHandle {
            index,
            id: node.id.clone(),
        })
    }

    /// Node indices in depth-first pre-order.
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.children(index).iter().rev());
        }
        order
    }
}
