//! Template model.
//!
//! The semantic side of a render: nodes with their style and data binding,
//! the tree they form, and the per-render execution context.

mod binding;
mod context;
mod node;
mod style;

pub use binding::{display_value, DataBinding};
pub use context::{ContextKey, TemplateContext, TemplateItem};
pub use node::{NodeHandle, TemplateNode, TemplateTree};
pub use style::{StyleRecord, TextStyle};
