//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use sketchboard_core::registry::ShapeEntry;
use sketchboard_core::session::Session;
use sketchboard_core::shapes::Shape;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error, PartialEq)]
pub enum RendererError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: f64, height: f64 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Non-deleted shapes in drawing order.
    pub shapes: Vec<&'a ShapeEntry>,
    /// Shape currently being drawn, if any.
    pub preview: Option<&'a Shape>,
    /// Canvas size used for clearing.
    pub canvas_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a context from an explicit list of shapes.
    pub fn new(shapes: Vec<&'a ShapeEntry>, canvas_size: Size) -> Self {
        Self {
            shapes,
            preview: None,
            canvas_size,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
        }
    }

    /// Snapshot everything a session wants drawn.
    pub fn from_session(session: &'a Session) -> Self {
        let mut ctx = Self::new(session.renderable_shapes().collect(), session.canvas_size());
        ctx.preview = session.in_progress_shape();
        ctx
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Reject canvas sizes that cannot be cleared.
    pub fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.canvas_size;
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(RendererError::InvalidCanvasSize { width, height })
        }
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
