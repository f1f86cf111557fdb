//! Drawing and SVG output
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `surface`: The device-space drawing trait
//! - `path`: SVG path data
//! - `metrics`: Text measurement
//! - `svg`: In-memory SVG surface and serialization
//! - `context`: NaturalContext, drawing in math coordinates
//! - `canvas`: Background grid, axes and tick labels

pub mod canvas;
pub mod context;
pub mod defaults;
pub mod metrics;
pub mod path;
pub mod surface;
pub mod svg;

// Re-export commonly used items
pub use canvas::{Canvas, Tick, Ticks, format_tick};
pub use context::{HAlign, MarkAngle, NaturalContext, VAlign};
pub use path::{PathCommand, PathData};
pub use surface::{LineCap, Surface, set_source_hex};
pub use svg::{SvgElement, SvgSurface};
