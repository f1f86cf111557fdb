//! SVG generation
//!
//! `SvgSurface` records drawing calls as a flat list of SVG elements, in
//! paint order, and serializes them with the `svg` crate once the diagram is
//! complete. Nothing touches the filesystem until the caller asks for it.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DVec2, dvec2};
use svg::Document;
use svg::node::element::{Path, Text};

use super::defaults;
use super::metrics;
use super::path::{PathCommand, PathData, fmt_num};
use super::surface::{LineCap, Surface};
use crate::color::Color;
use crate::types::TextExtents;

/// One painted element, in device coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    Stroke {
        d: PathData,
        color: Color,
        width: f64,
        cap: LineCap,
    },
    Fill {
        d: PathData,
        color: Color,
    },
    Text {
        /// Left end of the baseline
        position: DVec2,
        content: String,
        color: Color,
        font_size: f64,
        font_family: String,
    },
}

/// Paint settings covered by `save`/`restore`
#[derive(Debug, Clone, PartialEq)]
struct PaintState {
    source: Color,
    line_width: f64,
    line_cap: LineCap,
    font_size: f64,
    font_family: String,
}

/// In-memory SVG drawing surface
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    path: PathData,
    current: Option<DVec2>,
    paint: PaintState,
    saved: Vec<PaintState>,
    elements: Vec<SvgElement>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            path: PathData::new(),
            current: None,
            paint: PaintState {
                source: Color::BLACK,
                line_width: defaults::SURFACE_LINE_WIDTH,
                line_cap: LineCap::default(),
                font_size: defaults::SURFACE_FONT_SIZE,
                font_family: defaults::SURFACE_FONT_FACE.to_string(),
            },
            saved: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Page size in pixels
    pub fn size(&self) -> DVec2 {
        dvec2(self.width, self.height)
    }

    /// Everything painted so far, in paint order
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    pub fn source(&self) -> Color {
        self.paint.source
    }

    pub fn line_width(&self) -> f64 {
        self.paint.line_width
    }

    pub fn line_cap(&self) -> LineCap {
        self.paint.line_cap
    }

    pub fn font_size(&self) -> f64 {
        self.paint.font_size
    }

    /// Build the SVG DOM for everything painted so far.
    pub fn to_document(&self) -> Document {
        let document = Document::new()
            .set("width", fmt_num(self.width))
            .set("height", fmt_num(self.height))
            .set(
                "viewBox",
                format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height)),
            );

        self.elements
            .iter()
            .fold(document, |document, element| match element {
                SvgElement::Stroke {
                    d,
                    color,
                    width,
                    cap,
                } => {
                    let mut path = Path::new()
                        .set("d", d.to_string())
                        .set("fill", "none")
                        .set("stroke", color.to_rgb_string())
                        .set("stroke-width", fmt_num(*width))
                        .set("stroke-linecap", cap.as_str());
                    if color.alpha() < 1.0 {
                        path = path.set("stroke-opacity", fmt_num(color.alpha()));
                    }
                    document.add(path)
                }
                SvgElement::Fill { d, color } => {
                    let mut path = Path::new()
                        .set("d", d.to_string())
                        .set("fill", color.to_rgb_string());
                    if color.alpha() < 1.0 {
                        path = path.set("fill-opacity", fmt_num(color.alpha()));
                    }
                    document.add(path)
                }
                SvgElement::Text {
                    position,
                    content,
                    color,
                    font_size,
                    font_family,
                } => {
                    let mut text = Text::new(content.as_str())
                        .set("x", fmt_num(position.x))
                        .set("y", fmt_num(position.y))
                        .set("font-size", fmt_num(*font_size))
                        .set("font-family", font_family.as_str())
                        .set("fill", color.to_rgb_string());
                    if color.alpha() < 1.0 {
                        text = text.set("fill-opacity", fmt_num(color.alpha()));
                    }
                    document.add(text)
                }
            })
    }

    /// Serialize to an SVG string.
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    /// Record a path-consuming paint operation and reset the path.
    fn consume_path(&mut self, make: impl FnOnce(PathData) -> SvgElement) {
        let d = std::mem::take(&mut self.path);
        if d.has_segments() {
            self.elements.push(make(d));
        }
        self.current = None;
    }
}

impl Surface for SvgSurface {
    fn move_to(&mut self, p: DVec2) {
        self.path.push(PathCommand::MoveTo(p));
        self.current = Some(p);
    }

    fn line_to(&mut self, p: DVec2) {
        // cairo treats line_to without a current point as move_to
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.path.push(PathCommand::LineTo(p));
        self.current = Some(p);
    }

    fn arc(&mut self, center: DVec2, radius: f64, angle1: f64, mut angle2: f64) {
        if !(angle1.is_finite() && angle2.is_finite()) {
            crate::log::warn!(angle1, angle2, "ignoring arc with non-finite angles");
            return;
        }
        // like cairo: bring angle2 within one turn above angle1
        if angle2 < angle1 {
            angle2 = angle1 + (angle2 - angle1).rem_euclid(TAU);
        }

        let point_at = |angle: f64| center + radius * dvec2(angle.cos(), angle.sin());
        let start = point_at(angle1);
        self.line_to(start);

        let mut sweep = angle2 - angle1;
        if !(sweep > 0.0 && radius > 0.0) {
            return;
        }
        // turns past the first add no ink; keep the end angle
        if sweep > TAU {
            sweep = TAU + (sweep - TAU).rem_euclid(TAU);
        }

        // SVG arcs cannot describe a full turn; quarter turns are never ambiguous
        let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f64;
        for i in 1..=segments {
            let end = point_at(angle1 + step * i as f64);
            self.path.push(PathCommand::Arc {
                radius,
                large_arc: false,
                sweep: true,
                end,
            });
            self.current = Some(end);
        }
    }

    fn rectangle(&mut self, origin: DVec2, size: DVec2) {
        self.move_to(origin);
        self.line_to(origin + dvec2(size.x, 0.0));
        self.line_to(origin + size);
        self.line_to(origin + dvec2(0.0, size.y));
        self.path.push(PathCommand::Close);
        self.current = Some(origin);
    }

    fn stroke(&mut self) {
        let (color, width, cap) = (self.paint.source, self.paint.line_width, self.paint.line_cap);
        self.consume_path(|d| SvgElement::Stroke {
            d,
            color,
            width,
            cap,
        });
    }

    fn fill(&mut self) {
        let color = self.paint.source;
        self.consume_path(|d| SvgElement::Fill { d, color });
    }

    fn set_source(&mut self, color: Color) {
        self.paint.source = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.paint.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.paint.line_cap = cap;
    }

    fn set_font_size(&mut self, size: f64) {
        self.paint.font_size = size;
    }

    fn select_font_face(&mut self, family: &str) {
        self.paint.font_family = family.to_string();
    }

    fn text_extents(&self, text: &str) -> TextExtents {
        metrics::measure(text, self.paint.font_size)
    }

    fn show_text(&mut self, text: &str) {
        let position = self.current.unwrap_or(DVec2::ZERO);
        if !text.is_empty() {
            self.elements.push(SvgElement::Text {
                position,
                content: text.to_string(),
                color: self.paint.source,
                font_size: self.paint.font_size,
                font_family: self.paint.font_family.clone(),
            });
        }
        let advance = self.text_extents(text).width;
        self.move_to(position + dvec2(advance, 0.0));
    }

    fn current_point(&self) -> Option<DVec2> {
        self.current
    }

    fn save(&mut self) {
        self.saved.push(self.paint.clone());
    }

    fn restore(&mut self) {
        if let Some(paint) = self.saved.pop() {
            self.paint = paint;
        }
    }
}
