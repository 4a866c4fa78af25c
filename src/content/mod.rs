//! Content resolution: which characters a fit-content node measures.
//!
//! Resolution is an ordered chain of [`ContentSource`]s; the first source
//! returning `Some` wins:
//!
//! ```text
//! HighlightSource → OverrideSource → PlainSource → (nothing: skip correction)
//! ```
//!
//! Each source is independently testable and the chain can be rebuilt for
//! hosts with their own policy.

mod highlight;
mod styled;

use serde_json::Value;

pub use highlight::HighlightRule;
pub use styled::{MeasureText, Span, StyledText};

use crate::measure::MeasureSurface;
use crate::template::{display_value, DataBinding, StyleRecord, TemplateContext, TemplateItem};

// =============================================================================
// Host Override Hook
// =============================================================================

/// Descriptor handed to a [`TextProcessor`].
pub struct TextData<'a> {
    /// The bound value as a string, if any.
    pub text: Option<String>,
    pub surface: &'a dyn MeasureSurface,
    pub node_id: &'a str,
    pub template_item: &'a TemplateItem,
    pub style: &'a StyleRecord,
    /// The raw bound value.
    pub value: Option<&'a Value>,
    /// The whole data record the binding was evaluated against.
    pub data: &'a Value,
    pub index: Option<usize>,
}

/// Replacement text returned by a host hook.
#[derive(Debug, Clone, PartialEq)]
pub enum TextOverride {
    Text(MeasureText),
    /// Any other value; measured through its string conversion.
    Value(Value),
}

impl TextOverride {
    fn into_measure_text(self) -> Option<MeasureText> {
        match self {
            Self::Text(text) => Some(text),
            Self::Value(Value::Null) => None,
            Self::Value(value) => Some(MeasureText::Plain(display_value(&value))),
        }
    }
}

impl From<String> for TextOverride {
    fn from(text: String) -> Self {
        Self::Text(MeasureText::Plain(text))
    }
}

impl From<&str> for TextOverride {
    fn from(text: &str) -> Self {
        Self::Text(MeasureText::from(text))
    }
}

impl From<StyledText> for TextOverride {
    fn from(styled: StyledText) -> Self {
        Self::Text(MeasureText::Styled(styled))
    }
}

impl From<Value> for TextOverride {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Host hook that may replace a node's text before it is measured.
///
/// Called at most once per resolution.
pub trait TextProcessor {
    fn on_text_process(&self, data: &TextData<'_>) -> Option<TextOverride>;
}

impl<F> TextProcessor for F
where
    F: Fn(&TextData<'_>) -> Option<TextOverride>,
{
    fn on_text_process(&self, data: &TextData<'_>) -> Option<TextOverride> {
        self(data)
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Everything a source may look at. The binding is evaluated once, up front.
pub struct ResolveRequest<'a> {
    pub context: &'a TemplateContext,
    pub node_id: &'a str,
    pub surface: &'a dyn MeasureSurface,
    pub style: &'a StyleRecord,
    pub binding: &'a DataBinding,
    pub data: &'a Value,
    pub value: Option<Value>,
}

pub trait ContentSource {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Option<MeasureText>;
}

/// Highlighted form of a string value, when the binding's rule matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightSource;

impl ContentSource for HighlightSource {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Option<MeasureText> {
        let Some(Value::String(text)) = &request.value else {
            return None;
        };
        let rule = request.binding.highlight()?;
        rule.apply(text).map(MeasureText::Styled)
    }
}

/// The context's host hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverrideSource;

impl ContentSource for OverrideSource {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Option<MeasureText> {
        let processor = request.context.processor()?;
        let data = TextData {
            text: request.value.as_ref().map(display_value),
            surface: request.surface,
            node_id: request.node_id,
            template_item: request.context.item(),
            style: request.style,
            value: request.value.as_ref(),
            data: request.data,
            index: request.context.index(),
        };
        processor
            .on_text_process(&data)
            .and_then(TextOverride::into_measure_text)
    }
}

/// String conversion of the bound value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSource;

impl ContentSource for PlainSource {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Option<MeasureText> {
        request
            .value
            .as_ref()
            .map(|value| MeasureText::Plain(display_value(value)))
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Ordered, short-circuiting chain of content sources.
pub struct ContentResolver {
    sources: Vec<Box<dyn ContentSource>>,
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::new(vec![
            Box::new(HighlightSource),
            Box::new(OverrideSource),
            Box::new(PlainSource),
        ])
    }
}

impl ContentResolver {
    pub fn new(sources: Vec<Box<dyn ContentSource>>) -> Self {
        Self { sources }
    }

    /// Text to measure for `node_id`, or `None` to keep the flex size.
    pub fn resolve_measure_text(
        &self,
        context: &TemplateContext,
        node_id: &str,
        surface: &dyn MeasureSurface,
        style: &StyleRecord,
        binding: &DataBinding,
        data: &Value,
    ) -> Option<MeasureText> {
        let request = ResolveRequest {
            context,
            node_id,
            surface,
            style,
            binding,
            data,
            value: binding.resolve(data),
        };

        self.sources
            .iter()
            .find_map(|source| source.resolve(&request))
    }
}
