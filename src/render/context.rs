//! Drawing context in natural (math) coordinates.
//!
//! `NaturalContext` wraps a [`Surface`] and converts every position and
//! radius from the math plane (y up) to device pixels before forwarding.
//! Line widths and font sizes are passed through untouched: they are
//! device quantities.

use std::f64::consts::TAU;
use std::str::FromStr;

use glam::DVec2;

use super::canvas::{Canvas, Ticks};
use super::defaults;
use super::surface::{LineCap, Surface, set_source_hex};
use crate::config::CanvasConfig;
use crate::errors::DiagramError;
use crate::transform::Transform;
use crate::types::{CanvasLimits, Point};

/// Horizontal placement of text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    /// Text starts at the anchor
    #[default]
    Left,
    Middle,
    /// Text ends at the anchor
    Right,
}

impl FromStr for HAlign {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(HAlign::Left),
            "middle" | "center" => Ok(HAlign::Middle),
            "right" => Ok(HAlign::Right),
            _ => Err(DiagramError::InvalidAlignment {
                keyword: s.to_string(),
            }),
        }
    }
}

/// Vertical placement of text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    /// Baseline on the anchor
    #[default]
    Bottom,
    Middle,
    /// Top of the capitals on the anchor
    Top,
}

impl FromStr for VAlign {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(VAlign::Bottom),
            "middle" | "center" => Ok(VAlign::Middle),
            "top" => Ok(VAlign::Top),
            _ => Err(DiagramError::InvalidAlignment {
                keyword: s.to_string(),
            }),
        }
    }
}

/// Label placement for [`NaturalContext::mark_angle_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkAngle {
    /// Radial gap between the arc and the label, in math units
    pub extend: f64,
    /// Angular offset of the label from the bisector, in radians
    pub turn: f64,
}

impl Default for MarkAngle {
    fn default() -> Self {
        Self {
            extend: defaults::ANGLE_LABEL_EXTEND,
            turn: 0.0,
        }
    }
}

/// A drawing context that speaks math coordinates.
pub struct NaturalContext<'a, S: Surface> {
    surface: &'a mut S,
    transform: Transform,
    shape: DVec2,
    limits: CanvasLimits,
    dot_size: f64,
    history: Vec<Transform>,
}

impl<'a, S: Surface> NaturalContext<'a, S> {
    /// Wrap `surface`, covering a device area of `shape` pixels. The math
    /// origin lands on `center`, or the middle of the area when `None`.
    pub fn new(
        surface: &'a mut S,
        shape: DVec2,
        scale: f64,
        center: Option<DVec2>,
    ) -> Result<Self, DiagramError> {
        let center = center.unwrap_or(shape / 2.0);
        let transform = Transform::try_new(scale, center)
            .map_err(|e| DiagramError::invalid_scale(scale, e))?;
        let limits = transform.limits(shape);

        crate::log::debug!(
            width = shape.x,
            height = shape.y,
            scale,
            center_x = center.x,
            center_y = center.y,
            "natural context created"
        );

        surface.set_line_cap(LineCap::Round);
        Ok(Self {
            surface,
            transform,
            shape,
            limits,
            dot_size: defaults::DOT_SIZE,
            history: Vec::new(),
        })
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Math-plane rectangle visible on the page
    pub fn limits(&self) -> CanvasLimits {
        self.limits
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    pub fn shape(&self) -> DVec2 {
        self.shape
    }

    pub fn dot_size(&self) -> f64 {
        self.dot_size
    }

    pub fn set_dot_size(&mut self, radius: f64) -> &mut Self {
        self.dot_size = radius;
        self
    }

    pub fn surface(&self) -> &S {
        &*self.surface
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, transform: Transform) -> &mut Self {
        self.transform = transform;
        self.limits = transform.limits(self.shape);
        self
    }

    /// Remember the current transform so a later [`pop_state`] can bring it
    /// back.
    ///
    /// [`pop_state`]: NaturalContext::pop_state
    pub fn push_state(&mut self) -> &mut Self {
        self.history.push(self.transform);
        self
    }

    /// Restore the most recently pushed transform. Returns `false` if
    /// nothing was pushed.
    pub fn pop_state(&mut self) -> bool {
        match self.history.pop() {
            Some(transform) => {
                self.set_transform(transform);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let d = self.transform.to_device(p.into());
        self.surface.move_to(d);
        self
    }

    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let d = self.transform.to_device(p.into());
        self.surface.line_to(d);
        self
    }

    /// Stroke a single segment.
    pub fn line(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> &mut Self {
        self.move_to(p1).line_to(p2).stroke()
    }

    /// Counter-clockwise arc from `angle1` to `angle2` (radians, math
    /// convention).
    pub fn arc(
        &mut self,
        center: impl Into<Point>,
        radius: f64,
        angle1: f64,
        angle2: f64,
    ) -> &mut Self {
        let c = self.transform.to_device(center.into());
        let r = self.transform.length(radius);
        let (a1, a2) = self.transform.device_angles(angle1, angle2);
        self.surface.arc(c, r, a1, a2);
        self
    }

    pub fn circle(&mut self, center: impl Into<Point>, radius: f64) -> &mut Self {
        self.arc(center, radius, 0.0, TAU)
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.surface.stroke();
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        self.surface.fill();
        self
    }

    // ------------------------------------------------------------------
    // Paint
    // ------------------------------------------------------------------

    /// Set the paint from a hex color. An empty string keeps the current
    /// paint.
    pub fn set_color(&mut self, hexcode: &str) -> Result<&mut Self, DiagramError> {
        set_source_hex(&mut *self.surface, hexcode)?;
        Ok(self)
    }

    /// Stroke width in pixels.
    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.surface.set_line_width(width);
        self
    }

    pub fn set_line_cap(&mut self, cap: LineCap) -> &mut Self {
        self.surface.set_line_cap(cap);
        self
    }

    /// Font size in pixels.
    pub fn set_font_size(&mut self, size: f64) -> &mut Self {
        self.surface.set_font_size(size);
        self
    }

    // ------------------------------------------------------------------
    // Text and annotations
    // ------------------------------------------------------------------

    /// Draw `text` anchored at `position`.
    pub fn text(
        &mut self,
        position: impl Into<Point>,
        text: &str,
        h_align: HAlign,
        v_align: VAlign,
    ) -> &mut Self {
        let ext = self.surface.text_extents(text);
        let scale = self.transform.scale();
        let mut at = position.into();

        at.x -= match h_align {
            HAlign::Left => 0.0,
            HAlign::Middle => ext.width / 2.0,
            HAlign::Right => ext.width,
        } / scale;
        // Top and Middle drop the baseline below the anchor so the text hangs
        // from it; a label placed on the far side of an offset then never
        // covers the point it annotates
        at.y -= match v_align {
            VAlign::Bottom => 0.0,
            VAlign::Middle => ext.height / 2.0,
            VAlign::Top => ext.height,
        } / scale;

        crate::log::trace!(text, x = at.x, y = at.y, "text");
        self.move_to(at);
        self.surface.show_text(text);
        self.stroke()
    }

    /// [`text`](NaturalContext::text) with alignment keywords such as
    /// `"center"` or `"top"`.
    pub fn text_with(
        &mut self,
        position: impl Into<Point>,
        text: &str,
        h_align: &str,
        v_align: &str,
    ) -> Result<&mut Self, DiagramError> {
        let h_align: HAlign = h_align.parse()?;
        let v_align: VAlign = v_align.parse()?;
        Ok(self.text(position, text, h_align, v_align))
    }

    /// Fill a dot at `position` and, if `label` is not empty, put it at
    /// `position + label_offset` on the side the offset points to.
    pub fn mark_dot(
        &mut self,
        position: impl Into<Point>,
        label: &str,
        label_offset: impl Into<Point>,
    ) -> &mut Self {
        let position = position.into();
        let offset = label_offset.into();

        self.circle(position, self.dot_size).fill();
        if label.is_empty() {
            return self;
        }

        let h_align = if offset.x >= 0.0 {
            HAlign::Left
        } else {
            HAlign::Right
        };
        let v_align = if offset.y >= 0.0 {
            VAlign::Bottom
        } else {
            VAlign::Top
        };
        self.text(position + offset, label, h_align, v_align)
    }

    /// Stroke an arc and label it just outside its midpoint.
    pub fn mark_angle(
        &mut self,
        center: impl Into<Point>,
        radius: f64,
        angle1: f64,
        angle2: f64,
        label: &str,
    ) -> &mut Self {
        self.mark_angle_with(center, radius, angle1, angle2, label, MarkAngle::default())
    }

    pub fn mark_angle_with(
        &mut self,
        center: impl Into<Point>,
        radius: f64,
        angle1: f64,
        angle2: f64,
        label: &str,
        opts: MarkAngle,
    ) -> &mut Self {
        let center = center.into();
        self.arc(center, radius, angle1, angle2).stroke();

        let bisector = (angle1 + angle2) / 2.0 + opts.turn;
        let at = center + Point::polar(radius + opts.extend, bisector);
        self.text(at, label, HAlign::Left, VAlign::Bottom)
    }

    /// Paint the background grid for the current transform. Paint settings
    /// are left as they were.
    pub fn draw_canvas(&mut self, config: &CanvasConfig) -> Result<Ticks, DiagramError> {
        Canvas::new(config, self.transform, self.shape).draw(&mut *self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::render::svg::{SvgElement, SvgSurface};
    use glam::dvec2;
    use std::f64::consts::PI;

    fn surface() -> SvgSurface {
        SvgSurface::new(400.0, 400.0)
    }

    fn context(surface: &mut SvgSurface) -> NaturalContext<'_, SvgSurface> {
        NaturalContext::new(surface, dvec2(400.0, 400.0), 200.0, None).unwrap()
    }

    fn paths(surface: &SvgSurface) -> Vec<String> {
        surface
            .elements()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Stroke { d, .. } | SvgElement::Fill { d, .. } => Some(d.to_string()),
                SvgElement::Text { .. } => None,
            })
            .collect()
    }

    fn texts(surface: &SvgSurface) -> Vec<(String, DVec2)> {
        surface
            .elements()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Text {
                    content, position, ..
                } => Some((content.clone(), *position)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn line_from_origin_to_one() {
        let mut s = surface();
        context(&mut s).line(0.0, 1.0);
        insta::assert_snapshot!(paths(&s)[0], @"M200,200L400,200");
    }

    #[test]
    fn rejects_bad_scale() {
        let mut s = surface();
        for scale in [0.0, -5.0, f64::NAN] {
            let result = NaturalContext::new(&mut s, dvec2(400.0, 400.0), scale, None);
            assert!(matches!(result, Err(DiagramError::InvalidScale { .. })));
        }
    }

    #[test]
    fn line_cap_defaults_to_round() {
        let mut s = surface();
        context(&mut s);
        assert_eq!(s.line_cap(), LineCap::Round);
    }

    #[test]
    fn explicit_center_and_limits() {
        let mut s = surface();
        let ctx =
            NaturalContext::new(&mut s, dvec2(400.0, 400.0), 100.0, Some(dvec2(100.0, 300.0)))
                .unwrap();
        assert_eq!(ctx.limits().left_bottom, Point::new(-1.0, -1.0));
        assert_eq!(ctx.limits().right_top, Point::new(3.0, 3.0));
    }

    #[test]
    fn circle_matches_full_arc() {
        let mut a = surface();
        context(&mut a).circle((0.25, 0.5), 0.3).stroke();
        let mut b = surface();
        context(&mut b).arc((0.25, 0.5), 0.3, 0.0, 2.0 * PI).stroke();
        assert_eq!(a.elements(), b.elements());
    }

    #[test]
    fn arc_is_counter_clockwise_in_math() {
        let mut s = surface();
        context(&mut s).arc(0.0, 0.5, 0.0, PI / 2.0).stroke();
        // the flip turns it into a clockwise device arc from +y (up) to +x
        insta::assert_snapshot!(paths(&s)[0], @"M200,100A100,100 0 0 1 300,200");
    }

    #[test]
    fn set_color_rejects_bad_hex() {
        let mut s = surface();
        let mut ctx = context(&mut s);
        assert!(matches!(
            ctx.set_color("fff"),
            Err(DiagramError::Color(crate::errors::ColorError::InvalidFormat { .. }))
        ));
        ctx.set_color("").unwrap();
        ctx.set_color("#f00").unwrap();
        assert_eq!(s.source(), "#f00".parse::<Color>().unwrap());
    }

    #[test]
    fn text_alignment_shifts() {
        let mut s = surface();
        s.set_font_size(16.0);
        let ext = s.text_extents("A");
        let mut ctx = context(&mut s);
        ctx.text(0.0, "A", HAlign::Left, VAlign::Bottom);
        ctx.text(0.0, "A", HAlign::Middle, VAlign::Middle);
        ctx.text(0.0, "A", HAlign::Right, VAlign::Top);

        let placed = texts(&s);
        assert_eq!(placed[0].1, dvec2(200.0, 200.0));
        let mid = placed[1].1;
        assert!((mid.x - (200.0 - ext.width / 2.0)).abs() < 1e-9);
        assert!((mid.y - (200.0 + ext.height / 2.0)).abs() < 1e-9);
        let top_right = placed[2].1;
        assert!((top_right.x - (200.0 - ext.width)).abs() < 1e-9);
        assert!((top_right.y - (200.0 + ext.height)).abs() < 1e-9);
    }

    #[test]
    fn text_with_keywords() {
        let mut s = surface();
        let mut ctx = context(&mut s);
        ctx.text_with(0.0, "x", "center", "top").unwrap();
        let Err(err) = ctx.text_with(0.0, "x", "centre", "top") else {
            panic!("misspelled alignment was accepted");
        };
        assert!(matches!(
            err,
            DiagramError::InvalidAlignment { ref keyword } if keyword == "centre"
        ));
        assert!("upper".parse::<VAlign>().is_err());
        assert_eq!("middle".parse::<VAlign>().unwrap(), VAlign::Middle);
        assert_eq!(texts(&s).len(), 1);
    }

    #[test]
    fn mark_dot_places_label_away_from_dot() {
        let mut s = surface();
        s.set_font_size(16.0);
        let ext = s.text_extents("P");
        let mut ctx = context(&mut s);
        ctx.mark_dot((0.5, 0.5), "P", (0.05, 0.05));
        ctx.mark_dot((0.5, 0.5), "P", (-0.05, -0.05));

        let placed = texts(&s);
        // (+,+): left/bottom, anchored at (0.55, 0.55) -> (310, 90)
        assert!((placed[0].1 - dvec2(310.0, 90.0)).length() < 1e-9);
        // (-,-): right/top, text ends at and hangs below (0.45, 0.45)
        let anchor = dvec2(290.0, 110.0);
        assert!((placed[1].1 - (anchor + dvec2(-ext.width, ext.height))).length() < 1e-9);

        let fills = s
            .elements()
            .iter()
            .filter(|e| matches!(e, SvgElement::Fill { .. }))
            .count();
        assert_eq!(fills, 2);
    }

    #[test]
    fn mark_dot_without_label() {
        let mut s = surface();
        context(&mut s).mark_dot(0.0, "", (0.1, 0.1));
        assert_eq!(s.elements().len(), 1);
        assert!(matches!(s.elements()[0], SvgElement::Fill { .. }));
    }

    #[test]
    fn mark_angle_label_on_bisector() {
        let mut s = surface();
        context(&mut s).mark_angle_with(
            0.0,
            0.5,
            0.0,
            PI / 2.0,
            "θ",
            MarkAngle {
                extend: 0.1,
                turn: 0.0,
            },
        );
        let (label, at) = texts(&s)[0].clone();
        assert_eq!(label, "θ");
        let expected = 200.0 + 0.6 * 200.0 * (PI / 4.0).cos();
        assert!((at.x - expected).abs() < 1e-9);
        assert!((at.y - (400.0 - expected)).abs() < 1e-9);
    }

    #[test]
    fn mark_angle_with_huge_sweep_finishes() {
        let mut s = surface();
        context(&mut s).mark_angle(0.0, 0.5, 0.0, 1e12, "x");
        context(&mut s).arc(0.0, 0.5, 1e17, 0.0).stroke();
        assert_eq!(texts(&s).len(), 1);
        assert!(matches!(s.elements()[0], SvgElement::Stroke { .. }));
    }

    #[test]
    fn push_and_pop_transform() {
        let mut s = surface();
        let mut ctx = context(&mut s);
        let original = ctx.transform();
        ctx.push_state();
        ctx.set_transform(Transform::try_new(50.0, dvec2(0.0, 400.0)).unwrap());
        assert_eq!(ctx.limits().left_bottom, Point::ORIGIN);
        assert!(ctx.pop_state());
        assert_eq!(ctx.transform(), original);
        assert!(!ctx.pop_state());
    }

    #[test]
    fn canvas_keeps_diagram_paint() {
        let mut s = surface();
        s.set_font_size(16.0);
        let mut ctx = context(&mut s);
        ctx.set_line_width(3.0);
        let ticks = ctx.draw_canvas(&CanvasConfig::default()).unwrap();
        assert_eq!(ticks.x.len(), 8);
        assert_eq!(s.line_width(), 3.0);
        assert_eq!(s.font_size(), 16.0);
    }
}
