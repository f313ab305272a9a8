//! Ellipse shape.

use super::{Extent, ShapeStyle, ShapeTrait, is_finite_point};
use crate::error::Result;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in the box spanned by the drag gesture.
///
/// `center`, `radius_x` and `radius_y` are derived from the extent every
/// time the end point changes, and carried along by translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Corners of the bounding drag.
    pub extent: Extent,
    /// Center point (None until the gesture has an end).
    pub center: Option<Point>,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Start an ellipse at one corner of its bounding box.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self {
            extent: Extent::new(start),
            center: None,
            radius_x: 0.0,
            radius_y: 0.0,
            style,
        }
    }

    /// Create an ellipse from two opposite corners of its bounding box.
    pub fn from_corners(p1: Point, p2: Point, style: ShapeStyle) -> Self {
        let mut ellipse = Self::new(p1, style);
        ellipse.set_end(p2);
        ellipse
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> Option<KurboEllipse> {
        self.center
            .map(|center| KurboEllipse::new(center, (self.radius_x, self.radius_y), 0.0))
    }
}

impl ShapeTrait for Ellipse {
    fn kind_name(&self) -> &'static str {
        "Ellipse"
    }

    fn set_end(&mut self, point: Point) {
        self.extent.end = Some(point);
        let center = self.extent.start.midpoint(point);
        self.radius_x = (point.x - center.x).abs();
        self.radius_y = (point.y - center.y).abs();
        self.center = Some(center);
    }

    fn contains(&self, point: Point) -> Result<bool> {
        let Some(center) = self.center else {
            return Ok(false);
        };
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return Ok(false);
        }
        let dx = (point.x - center.x) / self.radius_x;
        let dy = (point.y - center.y) / self.radius_y;
        Ok(dx * dx + dy * dy <= 1.0)
    }

    fn translate(&mut self, offset: Vec2) {
        self.extent.translate(offset);
        if let Some(center) = &mut self.center {
            *center += offset;
        }
    }

    fn is_valid(&self) -> bool {
        self.extent.is_complete() && self.center.is_some_and(is_finite_point)
    }

    fn bounds(&self) -> Option<Rect> {
        let center = self.center?;
        Some(Rect::new(
            center.x - self.radius_x,
            center.y - self.radius_y,
            center.x + self.radius_x,
            center.y + self.radius_y,
        ))
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo()
            .map(|ellipse| ellipse.to_path(0.1))
            .unwrap_or_default()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_end_derives_center_and_radii() {
        let ellipse = Ellipse::from_corners(
            Point::new(20.0, 30.0),
            Point::new(80.0, 70.0),
            ShapeStyle::default(),
        );
        assert_eq!(ellipse.center, Some(Point::new(50.0, 50.0)));
        assert!((ellipse.radius_x - 30.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains() {
        let ellipse = Ellipse::from_corners(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            ShapeStyle::default(),
        );
        assert!(ellipse.contains(Point::new(50.0, 25.0)).unwrap());
        assert!(ellipse.contains(Point::new(100.0, 25.0)).unwrap());
        // Corner of the bounding box lies outside the ellipse.
        assert!(!ellipse.contains(Point::new(2.0, 2.0)).unwrap());
    }

    #[test]
    fn test_zero_radius_contains_nothing() {
        let ellipse = Ellipse::from_corners(
            Point::new(0.0, 10.0),
            Point::new(100.0, 10.0),
            ShapeStyle::default(),
        );
        assert!(ellipse.is_valid());
        assert!(!ellipse.contains(Point::new(50.0, 10.0)).unwrap());
    }

    #[test]
    fn test_translate_keeps_center_consistent() {
        let mut ellipse = Ellipse::from_corners(
            Point::new(0.0, 0.0),
            Point::new(40.0, 20.0),
            ShapeStyle::default(),
        );
        ellipse.translate(Vec2::new(10.0, 5.0));
        assert_eq!(ellipse.center, Some(Point::new(30.0, 15.0)));
        let expected = ellipse.extent.start.midpoint(ellipse.extent.end.unwrap());
        assert_eq!(ellipse.center, Some(expected));
        assert!((ellipse.radius_x - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::from_corners(
            Point::new(80.0, 70.0),
            Point::new(20.0, 30.0),
            ShapeStyle::default(),
        );
        let bounds = ellipse.bounds().unwrap();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }
}
