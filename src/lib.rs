//! # spark-fit
//!
//! Fit-content text sizing for flexbox templates.
//!
//! A flex engine sizes text nodes without knowing what they will render. For
//! nodes marked fit-content, spark-fit measures the actual text and corrects
//! the node's size so the box hugs its content, then lets the flex engine
//! re-settle everything around it.
//!
//! ## Architecture
//!
//! ```text
//! TemplateTree → flex pass (Taffy) → fit-content correction → re-settle → ComputedLayout
//!                                          │
//!                       ContentResolver ───┤ (highlight → host hook → plain)
//!                       SurfacePool ───────┘ (acquire / release per node)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Dimension, LineMode, MeasureSpec, etc.)
//! - [`template`] - Template nodes, styles, data bindings and render context
//! - [`content`] - Which characters a node measures
//! - [`measure`] - Measurement surfaces, text width and the surface pool
//! - [`fit`] - The fit-content sizing algorithm
//! - [`dirty`] - Deferred re-measurement of text whose data changed
//! - [`layout`] - Taffy bridge running the two-pass layout

pub mod config;
pub mod content;
pub mod dirty;
pub mod error;
pub mod fit;
pub mod layout;
pub mod measure;
pub mod template;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::FitConfig;
pub use error::{FitError, FitResult, LayoutError, LayoutResult};

pub use content::{
    ContentResolver, ContentSource, HighlightRule, MeasureText, StyledText, TextData,
    TextOverride, TextProcessor,
};

pub use measure::{
    string_width, CellHost, CellSurface, HostKey, MeasureSurface, PoolStats, PooledSurface,
    SurfaceHost, SurfacePool,
};

pub use template::{
    DataBinding, NodeHandle, StyleRecord, TemplateContext, TemplateItem, TemplateNode,
    TemplateTree, TextStyle,
};

pub use fit::{single_line_size, FitContentEngine};
pub use dirty::{DirtyText, DirtyTextTracker};
pub use layout::{ComputedLayout, LayoutOutcome, LayoutSession, Pass};
