//! Default sizes and settings (device units are pixels, math units are
//! whatever the diagram's unit length is)

/// Page width in pixels
pub const WIDTH: f64 = 400.0;
/// Page height in pixels
pub const HEIGHT: f64 = 400.0;
/// Pixels per math unit
pub const SCALE: f64 = 200.0;
/// Font size used for diagram labels
pub const FONT_SIZE: f64 = 16.0;
/// Radius of `mark_dot` dots, in math units
pub const DOT_SIZE: f64 = 0.01;
/// Radial gap between an angle marker's arc and its label, in math units
pub const ANGLE_LABEL_EXTEND: f64 = 0.01;

// Surface defaults mirror a freshly created cairo context
pub const SURFACE_LINE_WIDTH: f64 = 2.0;
pub const SURFACE_FONT_SIZE: f64 = 10.0;
pub const SURFACE_FONT_FACE: &str = "Sans";

/// Line width used for the background grid and axes
pub const CANVAS_LINE_WIDTH: f64 = 1.0;
