//! Mapping between the mathematical plane and the device plane.

use glam::{DVec2, dvec2};

use crate::types::{CanvasLimits, NumericError, Point, Scale};

/// Scale + flip + translate from math coordinates to device pixels.
///
/// `device = conj(point) * scale + center`. Conjugating negates y, which is
/// what turns a y-up plane into the y-down plane of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    scale: Scale,
    center: DVec2,
}

impl Transform {
    pub fn new(scale: Scale, center: DVec2) -> Self {
        Self { scale, center }
    }

    /// Build a transform from a raw scale, validating it.
    pub fn try_new(scale: f64, center: DVec2) -> Result<Self, NumericError> {
        Ok(Self::new(Scale::try_new(scale)?, center))
    }

    pub fn scale(&self) -> f64 {
        self.scale.raw()
    }

    /// Device-plane location of the mathematical origin
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Map a math-plane point to device coordinates.
    #[inline]
    pub fn to_device(&self, point: Point) -> DVec2 {
        let s = self.scale.raw();
        dvec2(point.x * s + self.center.x, -point.y * s + self.center.y)
    }

    /// Inverse of [`Transform::to_device`].
    #[inline]
    pub fn to_math(&self, device: DVec2) -> Point {
        let s = self.scale.raw();
        Point::new((device.x - self.center.x) / s, (self.center.y - device.y) / s)
    }

    /// Scale a magnitude (radius, distance). No flip.
    #[inline]
    pub fn length(&self, len: f64) -> f64 {
        len * self.scale.raw()
    }

    /// Convert a device length back to math units.
    #[inline]
    pub fn to_math_length(&self, len: f64) -> f64 {
        len / self.scale.raw()
    }

    /// Arc angles for the device plane.
    ///
    /// The y flip mirrors angles and reverses the sweep, so a counter-clockwise
    /// math arc `a1 -> a2` becomes the device arc `-a2 -> -a1`.
    #[inline]
    pub fn device_angles(&self, angle1: f64, angle2: f64) -> (f64, f64) {
        (-angle2, -angle1)
    }

    /// The part of the math plane covered by a device area of `shape` pixels.
    ///
    /// Equals `-center / scale` and `(shape - center) / scale` read as complex
    /// numbers when the origin sits at the geometric center; otherwise the
    /// y extents are taken through the flip so both corners are true
    /// math-plane bounds.
    pub fn limits(&self, shape: DVec2) -> CanvasLimits {
        CanvasLimits {
            left_bottom: self.to_math(dvec2(0.0, shape.y)),
            right_top: self.to_math(dvec2(shape.x, 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn transform(scale: f64, cx: f64, cy: f64) -> Transform {
        Transform::try_new(scale, dvec2(cx, cy)).unwrap()
    }

    #[test]
    fn origin_maps_to_center() {
        let t = transform(175.0, 123.0, 45.5);
        assert_eq!(t.to_device(Point::ORIGIN), dvec2(123.0, 45.5));
    }

    #[test]
    fn unit_x_maps_right() {
        let t = transform(200.0, 200.0, 200.0);
        assert_eq!(t.to_device(Point::ONE), dvec2(400.0, 200.0));
    }

    #[test]
    fn y_axis_is_flipped() {
        let t = transform(200.0, 200.0, 200.0);
        let low = t.to_device(Point::new(0.3, 0.1));
        let high = t.to_device(Point::new(0.3, 0.6));
        assert!(high.y < low.y);
        assert_eq!(high.x, low.x);
        assert_eq!(t.to_device(Point::I), dvec2(200.0, 0.0));
    }

    #[test]
    fn round_trip() {
        let samples = [
            (Point::new(0.25, -0.75), 200.0, dvec2(200.0, 200.0)),
            (Point::new(-3.5, 12.0), 17.5, dvec2(0.0, 400.0)),
            (Point::new(1e-3, 1e3), 0.5, dvec2(-40.0, 12.25)),
        ];
        for (p, scale, center) in samples {
            let t = Transform::try_new(scale, center).unwrap();
            let back = t.to_math(t.to_device(p));
            assert!((back - p).norm() < 1e-9, "{p} -> {back}");
        }
    }

    #[test]
    fn lengths_are_not_flipped() {
        let t = transform(175.0, 200.0, 200.0);
        assert_eq!(t.length(1.0), 175.0);
        assert_eq!(t.to_math_length(350.0), 2.0);
    }

    #[test]
    fn arc_angles_are_negated_and_swapped() {
        let t = transform(1.0, 0.0, 0.0);
        assert_eq!(t.device_angles(0.0, PI / 2.0), (-PI / 2.0, -0.0));
    }

    #[test]
    fn limits_default_center() {
        let t = transform(200.0, 200.0, 200.0);
        let limits = t.limits(dvec2(400.0, 400.0));
        assert_eq!(limits.left_bottom, Point::new(-1.0, -1.0));
        assert_eq!(limits.right_top, Point::new(1.0, 1.0));
    }

    #[test]
    fn limits_offset_center() {
        // Origin in the lower-left quarter of the page
        let t = transform(100.0, 100.0, 300.0);
        let limits = t.limits(dvec2(400.0, 400.0));
        assert_eq!(limits.left_bottom, Point::new(-1.0, -1.0));
        assert_eq!(limits.right_top, Point::new(3.0, 3.0));
    }

    #[test]
    fn rejects_bad_scale() {
        assert_eq!(
            Transform::try_new(0.0, DVec2::ZERO),
            Err(NumericError::Zero)
        );
        assert_eq!(
            Transform::try_new(-2.0, DVec2::ZERO),
            Err(NumericError::Negative)
        );
    }
}
