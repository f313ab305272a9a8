//! In-progress drag gestures.

use crate::registry::ShapeId;
use crate::shapes::{Extent, ShapeStyle, ShapeTrait, offset_between};
use kurbo::{BezPath, Point, Rect, Vec2};

/// Tracks a drag that moves the selected shapes.
///
/// The segment start is reset to the end after every step so each step
/// yields only the incremental offset; `origin` remembers where the drag
/// began so the whole move can be recorded and undone.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveGesture {
    /// Where the pointer went down.
    pub origin: Point,
    /// Current incremental segment.
    pub extent: Extent,
    /// Shapes captured when the drag began.
    pub shape_ids: Vec<ShapeId>,
    style: ShapeStyle,
}

impl MoveGesture {
    pub fn new(origin: Point, shape_ids: Vec<ShapeId>) -> Self {
        Self {
            origin,
            extent: Extent::new(origin),
            shape_ids,
            style: ShapeStyle::default(),
        }
    }

    /// Offset since the previous step, then restart the segment at the end.
    pub fn take_step(&mut self) -> Vec2 {
        let Some(end) = self.extent.end else {
            return Vec2::ZERO;
        };
        let step = offset_between(self.extent.start, end);
        self.extent.start = end;
        step
    }

    /// Latest pointer position of the drag.
    pub fn current(&self) -> Point {
        self.extent.end.unwrap_or(self.extent.start)
    }

    /// Net displacement since the drag began.
    pub fn displacement(&self) -> Vec2 {
        offset_between(self.origin, self.current())
    }
}

impl ShapeTrait for MoveGesture {
    fn kind_name(&self) -> &'static str {
        "MoveGesture"
    }

    fn set_end(&mut self, point: Point) {
        self.extent.end = Some(point);
    }

    fn translate(&mut self, offset: Vec2) {
        self.origin += offset;
        self.extent.translate(offset);
    }

    fn is_valid(&self) -> bool {
        self.extent.is_complete()
    }

    fn bounds(&self) -> Option<Rect> {
        Some(Rect::from_points(self.origin, self.current()))
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.origin);
        path.line_to(self.current());
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
