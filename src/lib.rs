//! Mathematical proof diagrams rendered to SVG.
//!
//! Diagrams are drawn in the mathematical plane (y up, unit lengths,
//! angles counter-clockwise) through a [`NaturalContext`], which maps every
//! call onto a device [`Surface`](render::Surface) in pixels. A background
//! grid with labelled ticks is painted first, then the diagram itself.
//!
//! ```
//! use std::f64::consts::PI;
//! use mathdiagrams::{FnDiagram, Point, render_to_string};
//!
//! let diagram = FnDiagram::new(|ctx| {
//!     ctx.set_color("#666")?.set_line_width(1.0);
//!     ctx.circle(0.0, 1.0).stroke();
//!     ctx.set_color("#aaa")?.mark_angle(0.0, 0.1, 0.0, PI / 3.0, "x");
//!     ctx.mark_dot(Point::polar(1.0, PI / 3.0), "B", (0.0, 0.02));
//!     Ok(())
//! });
//! let svg = render_to_string(&diagram)?;
//! assert!(svg.contains("<svg"));
//! # Ok::<(), mathdiagrams::DiagramError>(())
//! ```

pub mod color;
pub mod config;
pub mod diagram;
pub mod errors;
mod log;
pub mod render;
pub mod transform;
pub mod types;

pub use color::{Color, parse_hex_color};
pub use config::{CanvasConfig, DiagramConfig};
pub use diagram::{Diagram, FnDiagram, render_surface, render_to_file, render_to_string};
pub use errors::{ColorError, DiagramError};
pub use render::{HAlign, LineCap, MarkAngle, NaturalContext, SvgSurface, VAlign};
pub use transform::Transform;
pub use types::{CanvasLimits, NumericError, Point, Scale, TextExtents, d2r, r2d};
