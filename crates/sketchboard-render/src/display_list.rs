//! Backend-neutral renderer that records draw commands.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
use sketchboard_core::shapes::Shape;

/// Padding between a selected shape and its outline.
pub const SELECTION_PADDING: f64 = 4.0;

/// One primitive drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Size,
        color: Color,
    },
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
    },
    Text {
        origin: Point,
        content: String,
        font_size: f64,
        color: Color,
    },
    SelectionOutline {
        rect: Rect,
        color: Color,
    },
}

/// Records each frame as a list of [`DrawCommand`]s.
///
/// Hosts replay the list onto whatever surface they own.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last built frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Validate the context, build the frame and return its commands.
    pub fn render(&mut self, ctx: &RenderContext) -> RenderResult<&[DrawCommand]> {
        ctx.validate()?;
        self.build_scene(ctx);
        Ok(&self.commands)
    }

    fn render_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Text(label) => {
                if label.content().is_empty() {
                    return;
                }
                self.commands.push(DrawCommand::Text {
                    origin: label.position(),
                    content: label.content().to_string(),
                    font_size: label.font_size(),
                    color: label.style.stroke(),
                });
            }
            _ => {
                let path = shape.to_path();
                if path.elements().is_empty() {
                    return;
                }
                let style = shape.style();
                self.commands.push(DrawCommand::Stroke {
                    path,
                    color: style.stroke(),
                    width: style.stroke_width,
                });
            }
        }
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            size: ctx.canvas_size,
            color: self.background_color(ctx),
        });

        for entry in &ctx.shapes {
            if entry.deleted {
                log::warn!("Skipping deleted shape {} passed to renderer", entry.id());
                continue;
            }
            self.render_shape(&entry.shape);
            if entry.selected {
                if let Some(bounds) = entry.shape.bounds() {
                    self.commands.push(DrawCommand::SelectionOutline {
                        rect: bounds.inflate(SELECTION_PADDING, SELECTION_PADDING),
                        color: ctx.selection_color,
                    });
                }
            }
        }

        if let Some(preview) = ctx.preview {
            self.render_shape(preview);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchboard_core::session::Session;
    use sketchboard_core::shapes::{SerializableColor, ShapeKind};

    fn session_with_shapes() -> Session {
        let mut session = Session::new(Size::new(800.0, 600.0));
        let handle = session.begin_shape(ShapeKind::Rectangle, Point::new(100.0, 100.0), SerializableColor::black(), 2.0);
        session.update_shape(handle, Point::new(300.0, 250.0));
        session.commit_shape(handle).unwrap();
        session
            .place_text(Point::new(10.0, 10.0), "hello", SerializableColor::black(), 16.0)
            .unwrap();
        session
    }

    #[test]
    fn test_build_empty_scene() {
        let session = Session::new(Size::new(800.0, 600.0));
        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::from_session(&session));
        assert_eq!(renderer.commands().len(), 1);
        assert!(matches!(renderer.commands()[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_build_scene_with_shapes() {
        let session = session_with_shapes();
        let mut renderer = DisplayListRenderer::new();
        let commands = renderer.render(&RenderContext::from_session(&session)).unwrap();

        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[1], DrawCommand::Stroke { width, .. } if (width - 2.0).abs() < f64::EPSILON));
        match &commands[2] {
            DrawCommand::Text { content, font_size, .. } => {
                assert_eq!(content, "hello");
                assert!((font_size - 16.0).abs() < f64::EPSILON);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_selected_shape_gets_outline() {
        let mut session = session_with_shapes();
        session.select_at(Point::new(200.0, 200.0), false).unwrap();
        let selection_color = Color::from_rgba8(255, 0, 0, 255);
        let ctx = RenderContext::from_session(&session).with_selection_color(selection_color);

        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&ctx);
        let outline = renderer
            .commands()
            .iter()
            .find_map(|command| match command {
                DrawCommand::SelectionOutline { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .unwrap();
        assert_eq!(outline.0, Rect::new(96.0, 96.0, 304.0, 254.0));
        assert_eq!(outline.1, selection_color);
    }

    #[test]
    fn test_deleted_shapes_are_not_drawn() {
        let mut session = session_with_shapes();
        session.select_all();
        session.delete_selection().unwrap();

        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::from_session(&session));
        assert_eq!(renderer.take_commands().len(), 1);
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_preview_drawn_last() {
        let mut session = session_with_shapes();
        let handle = session.begin_shape(ShapeKind::Line, Point::ZERO, SerializableColor::black(), 1.0);
        session.update_shape(handle, Point::new(50.0, 50.0));

        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::from_session(&session));
        assert_eq!(renderer.commands().len(), 4);
        assert!(matches!(renderer.commands()[3], DrawCommand::Stroke { .. }));
    }

    #[test]
    fn test_render_rejects_empty_canvas() {
        let session = Session::new(Size::ZERO);
        let mut renderer = DisplayListRenderer::new();
        assert!(renderer.render(&RenderContext::from_session(&session)).is_err());
    }
}
