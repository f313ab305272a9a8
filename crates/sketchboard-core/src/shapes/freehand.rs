//! Freehand drawing shape.

use super::{Extent, HIT_TOLERANCE, ShapeStyle, ShapeTrait, is_finite_point};
use crate::error::Result;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A pen stroke: the pointer-down position followed by every recorded point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    /// Start point and the most recent point.
    pub extent: Extent,
    /// Points recorded while the pen moved, in order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Freehand {
    /// Start a stroke at a point.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self {
            extent: Extent::new(start),
            points: Vec::new(),
            style,
        }
    }

    /// Create from a start point and recorded points.
    pub fn from_points(start: Point, points: Vec<Point>, style: ShapeStyle) -> Self {
        let mut freehand = Self::new(start, style);
        for point in points {
            freehand.set_end(point);
        }
        freehand
    }

    /// Get the number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The whole path: start point followed by the recorded points.
    pub fn path_points(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.extent.start).chain(self.points.iter().copied())
    }
}

impl ShapeTrait for Freehand {
    fn kind_name(&self) -> &'static str {
        "Freehand"
    }

    fn set_end(&mut self, point: Point) {
        self.extent.end = Some(point);
        self.points.push(point);
    }

    fn contains(&self, point: Point) -> Result<bool> {
        let reach = HIT_TOLERANCE + self.style.stroke_width;
        Ok(self
            .path_points()
            .any(|p| p.distance(point) <= reach))
    }

    fn translate(&mut self, offset: Vec2) {
        self.extent.translate(offset);
        for point in &mut self.points {
            *point += offset;
        }
    }

    fn is_valid(&self) -> bool {
        self.extent.is_complete() && self.points.iter().copied().all(is_finite_point) && !self.is_empty()
    }

    fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        let mut points = self.path_points();
        let first = points.next()?;
        Some(points.fold(Rect::from_points(first, first), |rect, p| {
            rect.union_pt(p)
        }))
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.is_empty() {
            return path;
        }

        path.move_to(self.extent.start);
        for point in &self.points {
            path.line_to(*point);
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
