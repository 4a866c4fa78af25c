//! Data bindings: node value expressions evaluated against a data record.
//!
//! Expressions follow the template syntax:
//! - `$$` binds the whole record
//! - `$title` / `${title}` / `title` bind a path
//! - dotted paths walk objects and arrays: `item.tags.0`

use serde_json::Value;

use crate::content::HighlightRule;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Root,
    Path(Vec<Segment>),
    Literal(Value),
}

/// A node's value expression plus its optional highlight rule.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBinding {
    value: Expr,
    highlight: Option<HighlightRule>,
}

impl DataBinding {
    /// Parse a binding expression.
    pub fn path(expr: &str) -> Self {
        let trimmed = expr.trim();
        let body = trimmed
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .or_else(|| trimmed.strip_prefix('$'))
            .unwrap_or(trimmed);

        let value = if body == "$" || body.is_empty() {
            Expr::Root
        } else {
            Expr::Path(
                body.split('.')
                    .map(|part| match part.parse::<usize>() {
                        Ok(index) => Segment::Index(index),
                        Err(_) => Segment::Key(part.to_string()),
                    })
                    .collect(),
            )
        };

        Self {
            value,
            highlight: None,
        }
    }

    /// A binding that always yields `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self {
            value: Expr::Literal(value.into()),
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, rule: HighlightRule) -> Self {
        self.highlight = Some(rule);
        self
    }

    pub fn highlight(&self) -> Option<&HighlightRule> {
        self.highlight.as_ref()
    }

    /// Evaluate against `data`. JSON `null` counts as no value.
    pub fn resolve(&self, data: &Value) -> Option<Value> {
        let found = match &self.value {
            Expr::Root => Some(data),
            Expr::Literal(value) => Some(value),
            Expr::Path(segments) => segments.iter().try_fold(data, |current, segment| match segment {
                Segment::Key(key) => current.get(key.as_str()),
                Segment::Index(index) => match current {
                    Value::Array(items) => items.get(*index),
                    Value::Object(map) => map.get(&index.to_string()),
                    _ => None,
                },
            }),
        };

        found.filter(|value| !value.is_null()).cloned()
    }
}

/// String conversion used for measured values: strings lose their quotes,
/// everything else renders as JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_forms() {
        let data = json!({ "title": "hello", "item": { "tags": ["a", "b"] } });

        assert_eq!(DataBinding::path("title").resolve(&data), Some(json!("hello")));
        assert_eq!(DataBinding::path("$title").resolve(&data), Some(json!("hello")));
        assert_eq!(DataBinding::path("${title}").resolve(&data), Some(json!("hello")));
        assert_eq!(DataBinding::path("item.tags.1").resolve(&data), Some(json!("b")));
        assert_eq!(DataBinding::path("$$").resolve(&data), Some(data.clone()));
    }

    #[test]
    fn test_missing_and_null_resolve_to_none() {
        let data = json!({ "title": null });
        assert_eq!(DataBinding::path("title").resolve(&data), None);
        assert_eq!(DataBinding::path("subtitle").resolve(&data), None);
        assert_eq!(DataBinding::path("title.deep").resolve(&data), None);
    }

    #[test]
    fn test_literal() {
        let binding = DataBinding::literal(42);
        assert_eq!(binding.resolve(&Value::Null), Some(json!(42)));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("text")), "text");
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&json!(true)), "true");
    }
}
