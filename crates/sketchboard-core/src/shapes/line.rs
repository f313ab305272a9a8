//! Line shape.

use super::{Extent, HIT_TOLERANCE, ShapeStyle, ShapeTrait};
use crate::error::Result;
use kurbo::{BezPath, Line as KurboLine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight line segment from start to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start and end points.
    pub extent: Extent,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Start a line at a point.
    pub fn new(start: Point, style: ShapeStyle) -> Self {
        Self {
            extent: Extent::new(start),
            style,
        }
    }

    /// Create a complete line between two points.
    pub fn between(start: Point, end: Point, style: ShapeStyle) -> Self {
        let mut line = Self::new(start, style);
        line.set_end(end);
        line
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> Option<KurboLine> {
        self.extent
            .end
            .map(|end| KurboLine::new(self.extent.start, end))
    }

    /// Half-width of the band around the line that counts as a hit.
    pub fn tolerance(&self) -> f64 {
        HIT_TOLERANCE + self.style.stroke_width
    }
}

impl ShapeTrait for Line {
    fn kind_name(&self) -> &'static str {
        "Line"
    }

    fn set_end(&mut self, point: Point) {
        self.extent.end = Some(point);
    }

    fn contains(&self, point: Point) -> Result<bool> {
        let Some(end) = self.extent.end else {
            return Ok(false);
        };
        let start = self.extent.start;
        let tolerance = self.tolerance();
        let dx = end.x - start.x;
        let dy = end.y - start.y;

        if dx.abs() < f64::EPSILON {
            // Vertical: solve the band on x and bound it by the y-range.
            let within_y = point.y >= start.y.min(end.y) - tolerance
                && point.y <= start.y.max(end.y) + tolerance;
            return Ok(within_y && (point.x - start.x).abs() < tolerance);
        }

        if dy.abs() > dx.abs() {
            // Steep: solve on x along the dominant y axis, so the band
            // does not collapse as the line approaches vertical.
            let within_y = point.y >= start.y.min(end.y) - tolerance
                && point.y <= start.y.max(end.y) + tolerance;
            if !within_y {
                return Ok(false);
            }
            let t = (point.y - start.y) / dy;
            let solved_x = start.x + t * dx;
            return Ok((solved_x - point.x).abs() < tolerance);
        }

        let within_x = point.x >= start.x.min(end.x) - tolerance
            && point.x <= start.x.max(end.x) + tolerance;
        if !within_x {
            return Ok(false);
        }

        // y = start.y + t * dy where t places the click's x on the line.
        let t = (point.x - start.x) / dx;
        let solved_y = start.y + t * dy;
        Ok((solved_y - point.y).abs() < tolerance)
    }

    fn translate(&mut self, offset: Vec2) {
        self.extent.translate(offset);
    }

    fn is_valid(&self) -> bool {
        self.extent.is_complete()
    }

    fn bounds(&self) -> Option<Rect> {
        self.extent.rect()
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some(end) = self.extent.end {
            path.move_to(self.extent.start);
            path.line_to(end);
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
