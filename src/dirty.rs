//! Dirty text tracking.
//!
//! When bound data changes outside a layout pass, the affected text nodes are
//! marked dirty and later drained by the caller, which repeats content
//! resolution and fit-content sizing for each of them.
//!
//! Entries are keyed by node identity within a template context. Marking the
//! same node again before a drain replaces the pending data (last write wins)
//! while the entry keeps its original queue position.

use std::rc::Rc;

use indexmap::IndexMap;
use indexmap::map::IntoValues;
use serde_json::Value;

use crate::template::{ContextKey, NodeHandle, TemplateContext};

/// A text node waiting to be re-resolved and re-measured.
#[derive(Debug, Clone)]
pub struct DirtyText {
    pub context: Rc<TemplateContext>,
    pub node: NodeHandle,
    pub data: Value,
}

/// Pending dirty text entries.
#[derive(Debug, Default)]
pub struct DirtyTextTracker {
    pending: IndexMap<(ContextKey, String), DirtyText>,
}

impl DirtyTextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self, context: Rc<TemplateContext>, node: NodeHandle, data: Value) {
        let key = (context.key(), node.id.clone());
        tracing::trace!(node = %node.id, "text marked dirty");
        self.pending.insert(key, DirtyText { context, node, data });
    }

    /// Take every pending entry in first-mark order.
    ///
    /// The tracker is empty afterwards; a second drain yields nothing until
    /// new marks arrive.
    pub fn drain(&mut self) -> IntoValues<(ContextKey, String), DirtyText> {
        std::mem::take(&mut self.pending).into_values()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, context: &TemplateContext, node_id: &str) -> bool {
        self.pending.contains_key(&(context.key(), node_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::template::TemplateItem;

    fn handle(index: usize, id: &str) -> NodeHandle {
        NodeHandle {
            index,
            id: id.to_string(),
        }
    }

    #[test]
    fn test_drain_is_one_shot() {
        let context = Rc::new(TemplateContext::default());
        let mut tracker = DirtyTextTracker::new();
        tracker.mark_dirty(Rc::clone(&context), handle(1, "title"), json!({ "title": "a" }));
        tracker.mark_dirty(Rc::clone(&context), handle(2, "price"), json!({ "price": 1 }));

        let drained: Vec<_> = tracker.drain().map(|entry| entry.node.id).collect();
        assert_eq!(drained, vec!["title", "price"]);
        assert!(tracker.is_empty());
        assert_eq!(tracker.drain().count(), 0);
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let context = Rc::new(TemplateContext::default());
        let mut tracker = DirtyTextTracker::new();
        tracker.mark_dirty(Rc::clone(&context), handle(1, "title"), json!({ "title": "first" }));
        tracker.mark_dirty(Rc::clone(&context), handle(2, "price"), json!({ "price": 1 }));
        tracker.mark_dirty(Rc::clone(&context), handle(1, "title"), json!({ "title": "second" }));

        assert_eq!(tracker.len(), 2);
        assert!(tracker.contains(&context, "title"));

        let drained: Vec<_> = tracker.drain().collect();
        assert_eq!(drained[0].node.id, "title");
        assert_eq!(drained[0].data, json!({ "title": "second" }));
        assert_eq!(drained[1].node.id, "price");
    }

    #[test]
    fn test_same_node_in_different_contexts() {
        let first = Rc::new(TemplateContext::new(TemplateItem::new("biz", "card")).with_index(0));
        let second = Rc::new(TemplateContext::new(TemplateItem::new("biz", "card")).with_index(1));
        let mut tracker = DirtyTextTracker::new();
        tracker.mark_dirty(first, handle(1, "title"), json!({}));
        tracker.mark_dirty(Rc::clone(&second), handle(1, "title"), json!({}));

        assert_eq!(tracker.len(), 2);
        assert!(tracker.contains(&second, "title"));
    }

    #[test]
    fn test_marks_after_drain_are_kept() {
        let context = Rc::new(TemplateContext::default());
        let mut tracker = DirtyTextTracker::new();
        tracker.mark_dirty(Rc::clone(&context), handle(1, "title"), json!({}));
        let mut drained = tracker.drain();
        tracker.mark_dirty(Rc::clone(&context), handle(2, "price"), json!({}));

        assert_eq!(drained.next().map(|entry| entry.node.id), Some("title".to_string()));
        assert!(drained.next().is_none());
        assert_eq!(tracker.len(), 1);
    }
}
