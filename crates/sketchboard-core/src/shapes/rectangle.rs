//! Rectangle shape.

use super::{Extent, ShapeStyle, ShapeTrait};
use crate::error::Result;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanned by the drag gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Corner where the drag started and the opposite corner.
    pub extent: Extent,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Start a rectangle at one corner.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self {
            extent: Extent::new(start),
            style,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point, style: ShapeStyle) -> Self {
        let mut rect = Self::new(p1, style);
        rect.set_end(p2);
        rect
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Option<Rect> {
        self.extent.rect()
    }
}

impl ShapeTrait for Rectangle {
    fn kind_name(&self) -> &'static str {
        "Rectangle"
    }

    fn set_end(&mut self, point: Point) {
        self.extent.end = Some(point);
    }

    fn contains(&self, point: Point) -> Result<bool> {
        // Rect::from_points orders the corners, so dragging up or left works too.
        let Some(rect) = self.as_rect() else {
            return Ok(false);
        };
        let within_x = rect.x0 <= point.x && point.x <= rect.x1;
        let within_y = rect.y0 <= point.y && point.y <= rect.y1;
        Ok(within_x && within_y)
    }

    fn translate(&mut self, offset: Vec2) {
        self.extent.translate(offset);
    }

    fn is_valid(&self) -> bool {
        self.extent.is_complete()
    }

    fn bounds(&self) -> Option<Rect> {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        self.as_rect()
            .map(|rect| rect.to_path(0.1))
            .unwrap_or_default()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
