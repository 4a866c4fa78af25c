//! Fit-content sizing.
//!
//! Corrects the flex-pass size of a text node to match its rendered text:
//!
//! 1. **Single-line** (`lines` unset or `1`): solve for width with height
//!    fixed. The text measures unconstrained; the width shrinks to the
//!    content but never grows past a non-zero flex width. The height only
//!    comes from the text when the flex pass left it at zero.
//!    - `lines=1; width=50; text measures 20` → `width=20`
//!    - `lines=1; width=100; text measures 150` → `width=100`
//!
//! 2. **Multi-line** (`lines=0` or `lines>1`): solve for height with width
//!    fixed. The width must be non-zero; the text measures at most that
//!    wide and the height is whatever the text needs, regardless of the
//!    previous height.
//!    - `lines=3; width=20; text measures 60 high` → `width=20; height=60`
//!
//! The caller runs a flex pass first, writes the corrected size back with
//! flex-grow cleared, and re-settles ancestors (see [`crate::layout`]).

use serde_json::Value;
use taffy::Size;

use crate::config::FitConfig;
use crate::content::ContentResolver;
use crate::error::{FitError, FitResult};
use crate::measure::{MeasureSurface, SurfaceHost, SurfacePool};
use crate::template::{TemplateContext, TemplateNode};
use crate::types::{LayoutRect, LineMode, MeasureSpec};

/// Single-line correction for a measured size.
pub fn single_line_size(layout: LayoutRect, measured: Size<f32>) -> Size<f32> {
    let height = if layout.height == 0.0 {
        measured.height
    } else {
        layout.height
    };

    let width = if layout.width == 0.0 {
        measured.width
    } else if measured.width >= layout.width {
        layout.width
    } else {
        measured.width
    };

    Size { width, height }
}

/// Owns the surface pool and the content resolver.
pub struct FitContentEngine<S: MeasureSurface> {
    pool: SurfacePool<S>,
    resolver: ContentResolver,
}

impl<S: MeasureSurface> FitContentEngine<S> {
    pub fn new(config: &FitConfig) -> Self {
        Self::with_resolver(SurfacePool::new(config.pool_capacity), ContentResolver::default())
    }

    pub fn with_resolver(pool: SurfacePool<S>, resolver: ContentResolver) -> Self {
        Self { pool, resolver }
    }

    pub fn pool(&self) -> &SurfacePool<S> {
        &self.pool
    }

    pub fn resolver(&self) -> &ContentResolver {
        &self.resolver
    }

    /// Corrected size for `node`, or `None` to keep its flex size.
    ///
    /// `layout` is the node's settled flex rectangle; `None` means the node
    /// has not been laid out yet. Exactly one surface is acquired and released
    /// per call on every path past the eligibility checks.
    pub fn fit_content<H>(
        &self,
        context: &TemplateContext,
        host: &H,
        node: &TemplateNode,
        layout: Option<LayoutRect>,
        data: &Value,
    ) -> FitResult<Option<Size<f32>>>
    where
        H: SurfaceHost<Surface = S>,
    {
        if !node.is_fit_eligible() {
            return Ok(None);
        }
        let Some(binding) = node.binding.as_ref() else {
            return Ok(None);
        };
        let Some(layout) = layout else {
            tracing::debug!(node = %node.id, "fit-content skipped: no settled layout");
            return Ok(None);
        };

        let mut surface = self.pool.acquire(host);
        surface.set_style(&node.style.text);

        let content = self.resolver.resolve_measure_text(
            context,
            &node.id,
            &*surface,
            &node.style,
            binding,
            data,
        );
        let Some(content) = content else {
            tracing::debug!(node = %node.id, "fit-content skipped: no content");
            return Ok(None);
        };
        surface.set_text(&content);

        let mode = node.style.line_mode();
        let size = match mode {
            LineMode::Single => {
                surface.set_single_line(true);
                let measured = surface.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
                Some(single_line_size(layout, measured))
            }
            LineMode::Unlimited | LineMode::Bounded(_) => {
                surface.set_line_limit(mode.limit());

                if layout.width == 0.0 {
                    return Err(FitError::InvalidConfiguration {
                        node_id: node.id.clone(),
                        line_count: mode.limit(),
                    });
                }

                (layout.width > 0.0).then(|| {
                    let measured = surface.measure(MeasureSpec::AtMost(layout.width), MeasureSpec::Unspecified);
                    Size {
                        width: layout.width,
                        height: measured.height,
                    }
                })
            }
        };

        tracing::debug!(
            node = %node.id,
            ?mode,
            from_width = layout.width,
            from_height = layout.height,
            to = ?size,
            "fit-content corrected"
        );
        Ok(size)
    }

    /// Natural size of a text node's content under a width constraint.
    ///
    /// Used as the flex-pass intrinsic size of text nodes that are not
    /// fit-content. `None` when the node has no binding or no content.
    pub fn measure_intrinsic<H>(
        &self,
        context: &TemplateContext,
        host: &H,
        node: &TemplateNode,
        data: &Value,
        width: MeasureSpec,
    ) -> Option<Size<f32>>
    where
        H: SurfaceHost<Surface = S>,
    {
        let binding = node.binding.as_ref()?;

        let mut surface = self.pool.acquire(host);
        surface.set_style(&node.style.text);
        let content = self.resolver.resolve_measure_text(
            context,
            &node.id,
            &*surface,
            &node.style,
            binding,
            data,
        )?;
        surface.set_text(&content);

        let mode = node.style.line_mode();
        if mode.is_single() {
            surface.set_single_line(true);
        } else {
            surface.set_line_limit(mode.limit());
        }
        Some(surface.measure(width, MeasureSpec::Unspecified))
    }
}
