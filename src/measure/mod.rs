//! Text measurement.
//!
//! - [`MeasureSurface`] - the measurement primitive fit-content sizing drives
//! - [`CellSurface`] - terminal-cell surface built on `unicode-width` and
//!   `unicode-segmentation` (grapheme clusters, CJK, emoji sequences)
//! - [`SurfacePool`] - per-host reuse of surfaces with scoped release

mod pool;
mod surface;
mod width;
mod wrap;

pub use pool::{PoolStats, PooledSurface, SurfacePool};
pub use surface::{CellHost, CellSurface, HostKey, MeasureSurface, SurfaceHost};
pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{line_count, line_widths};
