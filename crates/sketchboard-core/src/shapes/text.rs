//! Text label shape.

use super::{Extent, ShapeStyle, ShapeTrait};
use crate::error::Result;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// A single- or multi-line text label anchored at its top-left corner.
///
/// The end point is never set by the pointer directly: it is the opposite
/// corner of the box derived from the content and the font size, which is
/// stored as `style.stroke_width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    /// Top-left anchor and derived bottom-right corner.
    pub extent: Extent,
    /// The text content.
    content: String,
    /// Style properties; `stroke_width` is the font size.
    pub style: ShapeStyle,
}

impl TextLabel {
    /// Average glyph advance as a fraction of the font size.
    pub const CHAR_WIDTH_FACTOR: f64 = 0.55;
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.2;

    /// Create a label at a position.
    pub fn new(position: Point, content: String, style: ShapeStyle) -> Self {
        let mut label = Self {
            extent: Extent::new(position),
            content,
            style,
        };
        label.refresh_end();
        label
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content and re-derive the box.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.refresh_end();
    }

    pub fn font_size(&self) -> f64 {
        self.style.stroke_width
    }

    /// Change the font size and re-derive the box.
    pub fn set_font_size(&mut self, font_size: f64) {
        self.style.stroke_width = font_size;
        self.refresh_end();
    }

    pub fn position(&self) -> Point {
        self.extent.start
    }

    /// Approximate size of the text box.
    pub fn approximate_size(&self) -> (f64, f64) {
        let longest_line = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let mut line_count = self.content.lines().count().max(1);
        if self.content.ends_with('\n') {
            line_count += 1;
        }
        let font_size = self.font_size();
        (
            longest_line as f64 * font_size * Self::CHAR_WIDTH_FACTOR,
            line_count as f64 * font_size * Self::LINE_HEIGHT,
        )
    }

    fn refresh_end(&mut self) {
        if self.content.is_empty() {
            self.extent.end = None;
            return;
        }
        let (width, height) = self.approximate_size();
        self.extent.end = Some(self.extent.start + Vec2::new(width, height));
    }
}

impl ShapeTrait for TextLabel {
    fn kind_name(&self) -> &'static str {
        "TextLabel"
    }

    /// Labels follow the pointer while being placed.
    fn set_end(&mut self, point: Point) {
        self.extent.start = point;
        self.refresh_end();
    }

    fn contains(&self, point: Point) -> Result<bool> {
        Ok(self.bounds().is_some_and(|rect| {
            rect.x0 <= point.x && point.x <= rect.x1 && rect.y0 <= point.y && point.y <= rect.y1
        }))
    }

    /// The end corner is re-derived from the moved anchor so that a move and
    /// its negation land on the same box.
    fn translate(&mut self, offset: Vec2) {
        self.extent.start += offset;
        self.refresh_end();
    }

    fn is_valid(&self) -> bool {
        !self.content.is_empty() && self.extent.is_complete()
    }

    fn bounds(&self) -> Option<Rect> {
        self.extent.rect()
    }

    fn to_path(&self) -> BezPath {
        // Glyphs are laid out by the renderer; the path is the label's box.
        self.bounds()
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
