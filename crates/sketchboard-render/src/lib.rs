//! Sketchboard Render Library
//!
//! Renderer abstraction for Sketchboard. The bundled implementation
//! records a display list that hosts replay onto their own surface.

mod display_list;
mod redraw;
mod renderer;

pub use display_list::{DisplayListRenderer, DrawCommand, SELECTION_PADDING};
pub use redraw::RedrawSignal;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
