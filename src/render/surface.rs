//! The raw drawing capability the diagram layer draws through.
//!
//! Everything here speaks device coordinates: origin top-left, y down,
//! pixels. Path semantics follow cairo: path-building calls accumulate into
//! a current path which `stroke` or `fill` consumes.

use glam::DVec2;

use crate::color::Color;
use crate::errors::ColorError;
use crate::types::TextExtents;

/// Shape drawn at the ends of stroked segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// An immediate-mode 2D drawing surface.
pub trait Surface {
    /// Start a new sub-path at `p`.
    fn move_to(&mut self, p: DVec2);

    /// Add a straight segment from the current point to `p`.
    fn line_to(&mut self, p: DVec2);

    /// Add a circular arc in the direction of increasing angle (clockwise on
    /// screen). If there is a current point, a segment joins it to the start
    /// of the arc.
    fn arc(&mut self, center: DVec2, radius: f64, angle1: f64, angle2: f64);

    /// Add a closed axis-aligned rectangle.
    fn rectangle(&mut self, origin: DVec2, size: DVec2);

    /// Stroke the current path and clear it.
    fn stroke(&mut self);

    /// Fill the current path and clear it.
    fn fill(&mut self);

    /// Paint used by subsequent stroke, fill and text calls.
    fn set_source(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    fn set_line_cap(&mut self, cap: LineCap);

    fn set_font_size(&mut self, size: f64);

    fn select_font_face(&mut self, family: &str);

    /// Measure `text` in the current font.
    fn text_extents(&self, text: &str) -> TextExtents;

    /// Draw `text` with its baseline-left corner at the current point and
    /// advance the current point past it.
    fn show_text(&mut self, text: &str);

    fn current_point(&self) -> Option<DVec2>;

    /// Push the paint state (source, line width, line cap, font) on a stack.
    fn save(&mut self);

    /// Pop the paint state saved by the matching `save`. Unbalanced calls
    /// are ignored.
    fn restore(&mut self);
}

/// Set the paint from a hex color string. An empty string keeps the
/// current paint.
pub fn set_source_hex<S: Surface + ?Sized>(surface: &mut S, hexcode: &str) -> Result<(), ColorError> {
    if let Some(color) = Color::parse(hexcode)? {
        surface.set_source(color);
    }
    Ok(())
}
