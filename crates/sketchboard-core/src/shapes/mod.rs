//! Shape definitions for the drawing surface.

mod ellipse;
mod freehand;
mod line;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::TextLabel;

use crate::error::{CanvasError, Result};
use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Base hit-test tolerance in canvas units; the stroke width is added on top.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Offset that carries `from` onto `to`.
pub fn offset_between(from: Point, to: Point) -> Vec2 {
    to - from
}

/// Whether both coordinates of a point are real numbers.
pub fn is_finite_point(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a toolbar color string: `#rgb`, `#rrggbb`, `#rrggbbaa` or a
    /// basic CSS color name.
    pub fn parse(color: &str) -> Result<Self> {
        let color = color.trim();
        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| CanvasError::InvalidColor(color.to_string()));
        }

        let named = match color.to_ascii_lowercase().as_str() {
            "black" => Self::black(),
            "white" => Self::white(),
            "transparent" => Self::transparent(),
            "red" => Self::new(255, 0, 0, 255),
            "green" => Self::new(0, 128, 0, 255),
            "blue" => Self::new(0, 0, 255, 255),
            "yellow" => Self::new(255, 255, 0, 255),
            "orange" => Self::new(255, 165, 0, 255),
            "purple" => Self::new(128, 0, 128, 255),
            "gray" | "grey" => Self::new(128, 128, 128, 255),
            _ => return Err(CanvasError::InvalidColor(color.to_string())),
        };
        Ok(named)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_hex(hex: &str) -> Option<SerializableColor> {
    // from_str_radix alone would let a leading sign through.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => {
            // #rgb -> #rrggbb
            let r = channel(0..1)? * 17;
            let g = channel(1..2)? * 17;
            let b = channel(2..3)? * 17;
            Some(SerializableColor::new(r, g, b, 255))
        }
        6 => Some(SerializableColor::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            255,
        )),
        8 => Some(SerializableColor::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Visual attributes of a shape, mutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color (text color for labels).
    pub color: SerializableColor,
    /// Stroke width; labels use it as their font size.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
        }
    }

    /// Get the color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            stroke_width: 1.0,
        }
    }
}

/// The gesture that defines a shape: where the pointer went down and,
/// once the drag produced geometry, where it ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub start: Point,
    pub end: Option<Point>,
}

impl Extent {
    pub fn new(start: Point) -> Self {
        Self { start, end: None }
    }

    /// Both coordinate pairs present and finite.
    pub fn is_complete(&self) -> bool {
        is_finite_point(self.start) && self.end.is_some_and(is_finite_point)
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.start += offset;
        if let Some(end) = &mut self.end {
            *end += offset;
        }
    }

    /// Min/max box of start and end, regardless of drag direction.
    pub fn rect(&self) -> Option<Rect> {
        self.end.map(|end| Rect::from_points(self.start, end))
    }
}

/// Which variant a new gesture creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Freehand,
    Rectangle,
    Ellipse,
    Text,
}

/// Capabilities every drawable gesture provides.
pub trait ShapeTrait {
    /// Name used in diagnostics.
    fn kind_name(&self) -> &'static str;

    /// Update the end of the creating gesture.
    fn set_end(&mut self, point: Point);

    /// Point-in-shape test.
    ///
    /// Every drawable variant overrides this. The default fails with
    /// [`CanvasError::UnknownCapability`] so a variant that forgets to
    /// implement it is caught instead of never being hit.
    fn contains(&self, _point: Point) -> Result<bool> {
        Err(CanvasError::UnknownCapability(self.kind_name()))
    }

    /// Translate every owned coordinate, keeping derived fields consistent.
    fn translate(&mut self, offset: Vec2);

    /// Whether the shape has real geometry and may be committed.
    fn is_valid(&self) -> bool;

    /// Bounding box in canvas coordinates (None until the gesture has an end).
    fn bounds(&self) -> Option<Rect>;

    /// Path representation for rendering.
    fn to_path(&self) -> BezPath;

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Closed set of drawable shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Freehand(Freehand),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(TextLabel),
}

impl Shape {
    /// Start a new shape of the given kind at the pointer-down position.
    pub fn begin(kind: ShapeKind, start: Point, style: ShapeStyle) -> Self {
        match kind {
            ShapeKind::Line => Shape::Line(Line::new(start, style)),
            ShapeKind::Freehand => Shape::Freehand(Freehand::new(start, style)),
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::new(start, style)),
            ShapeKind::Ellipse => Shape::Ellipse(Ellipse::new(start, style)),
            ShapeKind::Text => Shape::Text(TextLabel::new(start, String::new(), style)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Freehand(_) => ShapeKind::Freehand,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn set_end(&mut self, point: Point) {
        match self {
            Shape::Line(s) => s.set_end(point),
            Shape::Freehand(s) => s.set_end(point),
            Shape::Rectangle(s) => s.set_end(point),
            Shape::Ellipse(s) => s.set_end(point),
            Shape::Text(s) => s.set_end(point),
        }
    }

    pub fn contains(&self, point: Point) -> Result<bool> {
        match self {
            Shape::Line(s) => s.contains(point),
            Shape::Freehand(s) => s.contains(point),
            Shape::Rectangle(s) => s.contains(point),
            Shape::Ellipse(s) => s.contains(point),
            Shape::Text(s) => s.contains(point),
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Shape::Line(s) => s.translate(offset),
            Shape::Freehand(s) => s.translate(offset),
            Shape::Rectangle(s) => s.translate(offset),
            Shape::Ellipse(s) => s.translate(offset),
            Shape::Text(s) => s.translate(offset),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Shape::Line(s) => s.is_valid(),
            Shape::Freehand(s) => s.is_valid(),
            Shape::Rectangle(s) => s.is_valid(),
            Shape::Ellipse(s) => s.is_valid(),
            Shape::Text(s) => s.is_valid(),
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Freehand(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Line(s) => s.to_path(),
            Shape::Freehand(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
            Shape::Ellipse(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Line(s) => s.style(),
            Shape::Freehand(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Text(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Line(s) => s.style_mut(),
            Shape::Freehand(s) => s.style_mut(),
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
        }
    }

    pub fn color(&self) -> SerializableColor {
        self.style().color
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.style_mut().color = color;
    }

    /// The label if this shape is text.
    pub fn as_text(&self) -> Option<&TextLabel> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLabel> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            SerializableColor::parse("#ff0000").unwrap(),
            SerializableColor::new(255, 0, 0, 255)
        );
        assert_eq!(
            SerializableColor::parse("#0f0").unwrap(),
            SerializableColor::new(0, 255, 0, 255)
        );
        assert_eq!(
            SerializableColor::parse("#00000080").unwrap(),
            SerializableColor::new(0, 0, 0, 128)
        );
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(SerializableColor::parse("black").unwrap(), SerializableColor::black());
        assert_eq!(SerializableColor::parse("Grey").unwrap(), SerializableColor::new(128, 128, 128, 255));
    }

    #[test]
    fn test_parse_invalid_color() {
        assert!(matches!(
            SerializableColor::parse("#12"),
            Err(CanvasError::InvalidColor(_))
        ));
        assert!(matches!(
            SerializableColor::parse("chartreuse-ish"),
            Err(CanvasError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_parse_rejects_signed_channels() {
        for input in ["#+fffff", "#+ff", "#ff+fff", "#-1ffff", "#+1234567"] {
            assert!(
                matches!(
                    SerializableColor::parse(input),
                    Err(CanvasError::InvalidColor(_))
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(SerializableColor::new(255, 0, 0, 255).to_hex(), "#ff0000");
        assert_eq!(SerializableColor::new(0, 0, 0, 128).to_hex(), "#00000080");
    }

    #[test]
    fn test_peniko_round_trip() {
        let color = SerializableColor::new(12, 34, 56, 255);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_extent_requires_end() {
        let mut extent = Extent::new(Point::new(1.0, 2.0));
        assert!(!extent.is_complete());
        extent.end = Some(Point::new(f64::NAN, 3.0));
        assert!(!extent.is_complete());
        extent.end = Some(Point::new(4.0, 3.0));
        assert!(extent.is_complete());
    }

    #[test]
    fn test_begin_every_kind() {
        let kinds = [
            ShapeKind::Line,
            ShapeKind::Freehand,
            ShapeKind::Rectangle,
            ShapeKind::Ellipse,
            ShapeKind::Text,
        ];
        for kind in kinds {
            let shape = Shape::begin(kind, Point::new(5.0, 5.0), ShapeStyle::default());
            assert_eq!(shape.kind(), kind);
            assert!(!shape.is_valid());
        }
    }

    #[test]
    fn test_offset_between() {
        let offset = offset_between(Point::new(10.0, 10.0), Point::new(15.0, 4.0));
        assert_eq!(offset, Vec2::new(5.0, -6.0));
    }
}
