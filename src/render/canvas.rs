//! Background canvas: page fill, main axes, grid and tick labels.
//!
//! The canvas works directly in device coordinates. It only needs the
//! transform for the device position of the origin and for converting the
//! grid step into pixels.

use glam::{DVec2, dvec2};

use super::defaults;
use super::surface::{Surface, set_source_hex};
use crate::config::CanvasConfig;
use crate::errors::DiagramError;
use crate::transform::Transform;
use crate::types::TextExtents;

/// A grid line crossing one of the main axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Device position of the crossing
    pub position: DVec2,
    /// Signed distance from the origin, in math units
    pub value: f64,
}

/// Grid lines along both axes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticks {
    /// Vertical grid lines, right of the origin first, then left
    pub x: Vec<Tick>,
    /// Horizontal grid lines, above the origin first, then below
    pub y: Vec<Tick>,
}

/// Background drawn once before the diagram itself
pub struct Canvas<'a> {
    config: &'a CanvasConfig,
    transform: Transform,
    shape: DVec2,
}

impl<'a> Canvas<'a> {
    pub fn new(config: &'a CanvasConfig, transform: Transform, shape: DVec2) -> Self {
        Self {
            config,
            transform,
            shape,
        }
    }

    /// Draw background, axes, grid and labels, in that order. The surface's
    /// paint state is left as it was.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<Ticks, DiagramError> {
        self.config.validate()?;

        surface.save();
        surface.set_line_width(defaults::CANVAS_LINE_WIDTH);
        let result = self.draw_layers(surface);
        surface.restore();
        result
    }

    fn draw_layers<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<Ticks, DiagramError> {
        self.draw_background(surface)?;
        self.draw_main_axes(surface)?;
        let ticks = self.draw_grid_lines(surface)?;
        self.draw_tick_labels(surface, &ticks)?;

        crate::log::debug!(
            x_ticks = ticks.x.len(),
            y_ticks = ticks.y.len(),
            "canvas drawn"
        );
        Ok(ticks)
    }

    fn draw_background<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), DiagramError> {
        set_source_hex(surface, &self.config.background_color)?;
        surface.rectangle(DVec2::ZERO, self.shape);
        surface.fill();
        Ok(())
    }

    fn draw_main_axes<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), DiagramError> {
        let center = self.transform.center();
        set_source_hex(surface, &self.config.axis_color)?;

        surface.move_to(dvec2(0.0, center.y));
        surface.line_to(dvec2(self.shape.x, center.y));
        surface.stroke();

        surface.move_to(dvec2(center.x, 0.0));
        surface.line_to(dvec2(center.x, self.shape.y));
        surface.stroke();
        Ok(())
    }

    fn draw_grid_lines<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<Ticks, DiagramError> {
        set_source_hex(surface, &self.config.grid_color)?;
        let ticks = self.ticks();

        for tick in &ticks.x {
            surface.move_to(dvec2(tick.position.x, 0.0));
            surface.line_to(dvec2(tick.position.x, self.shape.y));
            surface.stroke();
        }
        for tick in &ticks.y {
            surface.move_to(dvec2(0.0, tick.position.y));
            surface.line_to(dvec2(self.shape.x, tick.position.y));
            surface.stroke();
        }
        Ok(ticks)
    }

    fn draw_tick_labels<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        ticks: &Ticks,
    ) -> Result<(), DiagramError> {
        surface.set_font_size(self.config.font_size);
        surface.select_font_face(&self.config.font_face);
        set_source_hex(surface, &self.config.font_color)?;

        for tick in &ticks.x {
            let text = format_tick(tick.value);
            let at = self.x_label_position(tick, surface.text_extents(&text));
            surface.move_to(at);
            surface.show_text(&text);
            surface.stroke();
        }
        for tick in &ticks.y {
            let text = format_tick(tick.value);
            let at = self.y_label_position(tick, surface.text_extents(&text));
            surface.move_to(at);
            surface.show_text(&text);
            surface.stroke();
        }
        Ok(())
    }

    /// Below the x axis, pushed away from the vertical line it labels.
    fn x_label_position(&self, tick: &Tick, ext: TextExtents) -> DVec2 {
        let margin = self.config.text_margin;
        let center = self.transform.center();
        let mut at = tick.position;
        at.y += margin + ext.height;
        if at.x > center.x {
            at.x += margin;
        } else {
            at.x -= margin + ext.width;
        }
        at
    }

    /// Left of the y axis, pushed away from the horizontal line it labels.
    fn y_label_position(&self, tick: &Tick, ext: TextExtents) -> DVec2 {
        let margin = self.config.text_margin;
        let center = self.transform.center();
        let mut at = tick.position;
        at.x -= margin + ext.width;
        if at.y < center.y {
            at.y -= margin;
        } else {
            at.y += margin + ext.height;
        }
        at
    }

    /// Grid line crossings strictly inside the page.
    pub fn ticks(&self) -> Ticks {
        let center = self.transform.center();
        let grid_step = self.config.grid_step;
        let step = self.transform.length(grid_step);

        let mut ticks = Ticks::default();
        // right, then left
        for (k, x) in grid_positions(center.x, step, self.shape.x, 1.0) {
            ticks.x.push(Tick {
                position: dvec2(x, center.y),
                value: k * grid_step,
            });
        }
        for (k, x) in grid_positions(center.x, step, self.shape.x, -1.0) {
            ticks.x.push(Tick {
                position: dvec2(x, center.y),
                value: -k * grid_step,
            });
        }
        // up (device y decreasing), then down
        for (k, y) in grid_positions(center.y, step, self.shape.y, -1.0) {
            ticks.y.push(Tick {
                position: dvec2(center.x, y),
                value: k * grid_step,
            });
        }
        for (k, y) in grid_positions(center.y, step, self.shape.y, 1.0) {
            ticks.y.push(Tick {
                position: dvec2(center.x, y),
                value: -k * grid_step,
            });
        }
        ticks
    }
}

/// Most grid lines drawn in one direction from the origin
const MAX_GRID_LINES: usize = 4096;

/// Positions `origin + direction * k * step` for k = 1, 2, ... that fall
/// strictly inside `(0, extent)`, paired with their `k`.
///
/// The first and last visible `k` are computed directly, so an origin far
/// off the page costs nothing. At most [`MAX_GRID_LINES`] lines, the ones
/// nearest the origin, are returned.
fn grid_positions(origin: f64, step: f64, extent: f64, direction: f64) -> Vec<(f64, f64)> {
    let mut positions = Vec::new();
    if !(step > 0.0 && step.is_finite() && origin.is_finite() && extent.is_finite()) {
        return positions;
    }

    // distances from the origin, along `direction`, that bound the page
    let (near, far) = if direction > 0.0 {
        (-origin, extent - origin)
    } else {
        (origin - extent, origin)
    };
    // one candidate of slack at each end; exact bounds are checked below
    let first = (near / step).floor().max(1.0);
    let last = (far / step).ceil();
    let span = last - first + 1.0;
    if !(span >= 1.0) {
        return positions;
    }
    if span > (MAX_GRID_LINES + 2) as f64 {
        crate::log::warn!(span, step, "grid too dense, keeping the lines nearest the origin");
    }
    let candidates = span.min((MAX_GRID_LINES + 2) as f64) as usize;

    for i in 0..candidates {
        let k = first + i as f64;
        // multiply rather than accumulate so long runs do not drift
        let p = origin + direction * k * step;
        if p > 0.0 && p < extent {
            positions.push((k, p));
            if positions.len() == MAX_GRID_LINES {
                break;
            }
        }
    }
    positions
}

/// Tick label text: rounded to 6 decimals, trailing zeros and a trailing
/// decimal point removed.
pub fn format_tick(value: f64) -> String {
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::svg::{SvgElement, SvgSurface};

    fn default_canvas(config: &CanvasConfig) -> Canvas<'_> {
        let transform = Transform::try_new(200.0, dvec2(200.0, 200.0)).unwrap();
        Canvas::new(config, transform, dvec2(400.0, 400.0))
    }

    #[test]
    fn tick_formatting() {
        assert_eq!(format_tick(3.0 * 0.2), "0.6");
        assert_eq!(format_tick(1.0), "1");
        assert_eq!(format_tick(-0.4), "-0.4");
        assert_eq!(format_tick(0.1 + 0.2), "0.3");
        assert_eq!(format_tick(12.5), "12.5");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(-1e-9), "0");
    }

    #[test]
    fn ticks_stop_before_page_edge() {
        let config = CanvasConfig::default();
        let ticks = default_canvas(&config).ticks();

        let xs: Vec<String> = ticks.x.iter().map(|t| format_tick(t.value)).collect();
        assert_eq!(xs, ["0.2", "0.4", "0.6", "0.8", "-0.2", "-0.4", "-0.6", "-0.8"]);
        let ys: Vec<String> = ticks.y.iter().map(|t| format_tick(t.value)).collect();
        assert_eq!(ys, ["0.2", "0.4", "0.6", "0.8", "-0.2", "-0.4", "-0.6", "-0.8"]);

        assert_eq!(ticks.x[0].position, dvec2(240.0, 200.0));
        assert_eq!(ticks.x[4].position, dvec2(160.0, 200.0));
        // positive y values are above the origin, i.e. smaller device y
        assert_eq!(ticks.y[0].position, dvec2(200.0, 160.0));
        assert_eq!(ticks.y[4].position, dvec2(200.0, 240.0));
    }

    #[test]
    fn ticks_with_offset_origin() {
        let config = CanvasConfig {
            grid_step: 0.5,
            ..CanvasConfig::default()
        };
        let transform = Transform::try_new(100.0, dvec2(50.0, 350.0)).unwrap();
        let ticks = Canvas::new(&config, transform, dvec2(400.0, 400.0)).ticks();
        // right: 100..=350 step 50; left: 0 is the edge, so nothing
        assert_eq!(ticks.x.len(), 6);
        assert!(ticks.x.iter().all(|t| t.value > 0.0));
        // up: 300..=50 (6 lines); down: 400 is the edge, so nothing
        assert_eq!(ticks.y.len(), 6);
    }

    #[test]
    fn origin_off_page_draws_only_visible_lines() {
        let config = CanvasConfig::default();
        let transform = Transform::try_new(200.0, dvec2(-100.0, 200.0)).unwrap();
        let ticks = Canvas::new(&config, transform, dvec2(400.0, 400.0)).ticks();
        assert!(!ticks.x.is_empty());
        assert!(
            ticks
                .x
                .iter()
                .all(|t| t.position.x > 0.0 && t.position.x < 400.0)
        );
    }

    #[test]
    fn origin_far_off_page() {
        let config = CanvasConfig::default();
        let transform = Transform::try_new(200.0, dvec2(-4e12, 200.0)).unwrap();
        let ticks = Canvas::new(&config, transform, dvec2(400.0, 400.0)).ticks();

        // 40, 80, ... 360: the lines right of the origin that reach the page
        assert_eq!(ticks.x.len(), 9);
        assert!(ticks.x.iter().all(|t| t.value > 0.0));
        assert!((ticks.x[0].position.x - 40.0).abs() < 1e-3);
        assert_eq!(ticks.y.len(), 8);
    }

    #[test]
    fn dense_grid_is_capped() {
        let config = CanvasConfig {
            grid_step: 1e-9,
            ..CanvasConfig::default()
        };
        let ticks = default_canvas(&config).ticks();
        assert_eq!(ticks.x.len(), 2 * MAX_GRID_LINES);
        // the kept lines are the ones nearest the origin
        assert!(ticks.x.iter().all(|t| (t.position.x - 200.0).abs() < 1.0));
    }

    #[test]
    fn draw_order_and_paint_state() {
        let config = CanvasConfig::default();
        let mut surface = SvgSurface::new(400.0, 400.0);
        surface.set_font_size(16.0);
        let ticks = default_canvas(&config).draw(&mut surface).unwrap();

        let elements = surface.elements();
        // background, 2 axes, 16 grid lines, 16 labels
        assert_eq!(elements.len(), 1 + 2 + 16 + 16);
        assert!(matches!(elements[0], SvgElement::Fill { .. }));
        assert!(matches!(elements[1], SvgElement::Stroke { width, .. } if width == 1.0));
        assert!(matches!(elements[34], SvgElement::Text { .. }));
        assert_eq!(ticks.x.len() + ticks.y.len(), 16);

        // the diagram's own font size survives the canvas
        assert_eq!(surface.font_size(), 16.0);
    }

    #[test]
    fn labels_sit_beside_their_lines() {
        let config = CanvasConfig::default();
        let mut surface = SvgSurface::new(400.0, 400.0);
        default_canvas(&config).draw(&mut surface).unwrap();

        let texts: Vec<(&str, DVec2)> = surface
            .elements()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Text {
                    content, position, ..
                } => Some((content.as_str(), *position)),
                _ => None,
            })
            .collect();

        let height = crate::render::metrics::measure("0.2", 12.0).height;
        let (text, at) = texts[0];
        assert_eq!(text, "0.2");
        assert!((at - dvec2(242.0, 202.0 + height)).length() < 1e-9);

        // first x label left of center ends `margin` before its line
        let (text, at) = texts[4];
        assert_eq!(text, "-0.2");
        let width = crate::render::metrics::measure("-0.2", 12.0).width;
        assert!((at.x + width + 2.0 - 160.0).abs() < 1e-9);

        // first y label above center sits `margin` above its line
        let (text, at) = texts[8];
        assert_eq!(text, "0.2");
        assert_eq!(at.y, 158.0);
    }

    #[test]
    fn bad_config_draws_nothing() {
        let config = CanvasConfig {
            axis_color: "red".to_string(),
            ..CanvasConfig::default()
        };
        let mut surface = SvgSurface::new(400.0, 400.0);
        assert!(default_canvas(&config).draw(&mut surface).is_err());
        assert!(surface.elements().is_empty());
    }
}
