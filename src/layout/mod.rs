//! Layout Module
//!
//! Flexbox layout with fit-content text correction, using Taffy.
//!
//! # Architecture
//!
//! [`LayoutSession`] mirrors a [`TemplateTree`](crate::template::TemplateTree)
//! into a Taffy tree once and keeps it across passes:
//!
//! 1. Converts template styles → Taffy styles
//! 2. Runs the flex pass with a measure function for plain text
//! 3. Corrects fit-content text nodes in tree order, re-settling after each
//! 4. Extracts computed layout back to parallel arrays
//!
//! # Example
//!
//! ```ignore
//! use spark_fit::layout::{LayoutSession, Pass};
//!
//! let mut session = LayoutSession::new(tree, config)?;
//! let outcome = session.compute(pass, &context, &data)?;
//! println!("{:?}", outcome.layout.rect(title));
//! ```

mod taffy_bridge;
mod types;

pub use taffy_bridge::{LayoutSession, Pass};
pub use types::*;
