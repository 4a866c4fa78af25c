//! Per-render template execution context.

use std::fmt;
use std::rc::Rc;

use crate::content::TextProcessor;

/// Identifies the template being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TemplateItem {
    pub biz_id: String,
    pub template_id: String,
}

impl TemplateItem {
    pub fn new(biz_id: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            biz_id: biz_id.into(),
            template_id: template_id.into(),
        }
    }
}

/// Identity of a context for keying per-node state across passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextKey {
    pub item: TemplateItem,
    pub index: Option<usize>,
}

/// State for one layout/render cycle.
///
/// The text processor is injected once at construction and consulted by
/// content resolution for every fit-content node of the pass.
#[derive(Clone, Default)]
pub struct TemplateContext {
    item: TemplateItem,
    index: Option<usize>,
    processor: Option<Rc<dyn TextProcessor>>,
}

impl TemplateContext {
    pub fn new(item: TemplateItem) -> Self {
        Self {
            item,
            ..Self::default()
        }
    }

    /// Position of this item inside a list-bound container.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_processor(mut self, processor: impl TextProcessor + 'static) -> Self {
        self.processor = Some(Rc::new(processor));
        self
    }

    pub fn item(&self) -> &TemplateItem {
        &self.item
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn processor(&self) -> Option<&dyn TextProcessor> {
        self.processor.as_deref()
    }

    pub fn key(&self) -> ContextKey {
        ContextKey {
            item: self.item.clone(),
            index: self.index,
        }
    }
}

impl fmt::Debug for TemplateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateContext")
            .field("item", &self.item)
            .field("index", &self.index)
            .field("has_processor", &self.processor.is_some())
            .finish()
    }
}
