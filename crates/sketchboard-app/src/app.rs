//! Headless application shell driving a session from scripted input.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::script::ScriptStep;
use peniko::Color;
use sketchboard_core::{InputHandler, SerializableColor, Session};
use sketchboard_render::{DisplayListRenderer, DrawCommand, RedrawSignal, RenderContext};

/// Main application struct.
pub struct App {
    config: AppConfig,
    background: Color,
    session: Session,
    input: InputHandler,
    redraw: RedrawSignal,
    renderer: DisplayListRenderer,
    frames: usize,
}

impl App {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let background = config.background()?;
        let redraw = RedrawSignal::new();
        let session = Session::new(config.canvas_size())
            .with_tool(config.tool.clone())
            .with_redraw(redraw.clone());
        log::info!("Starting {} ({})", config.title, session.drawing_id());
        Ok(Self {
            config,
            background,
            session,
            input: InputHandler::new(),
            redraw,
            renderer: DisplayListRenderer::new(),
            frames: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Feed one scripted input to the session.
    pub fn apply(&mut self, step: &ScriptStep) -> AppResult<()> {
        match step {
            ScriptStep::Pointer { event } => self.input.handle_pointer(&mut self.session, event)?,
            ScriptStep::Key { event } => {
                self.input.handle_key(&mut self.session, event)?;
            }
            ScriptStep::Text { text } => {
                self.input.submit_text(&mut self.session, text)?;
            }
            ScriptStep::Tool { tool } => self.session.tool_mut().tool = *tool,
            ScriptStep::Color { color } => {
                let color = SerializableColor::parse(color)?;
                self.session.tool_mut().color = color;
                self.session.recolor_selection(color)?;
            }
            ScriptStep::StrokeWidth { width } => self.session.tool_mut().stroke_width = *width,
            ScriptStep::FontSize { size } => self.session.tool_mut().font_size = *size,
        }
        Ok(())
    }

    /// Render a frame if the session asked for one since the last call.
    pub fn frame(&mut self) -> AppResult<Option<Vec<DrawCommand>>> {
        if self.redraw.take() == 0 {
            return Ok(None);
        }
        let ctx = RenderContext::from_session(&self.session).with_background(self.background);
        let commands = self.renderer.render(&ctx)?.to_vec();
        self.frames += 1;
        Ok(Some(commands))
    }

    /// Apply every step, rendering after each one that changed the canvas.
    pub fn run(&mut self, steps: &[ScriptStep]) -> AppResult<()> {
        for step in steps {
            self.apply(step)?;
            if let Some(commands) = self.frame()? {
                log::debug!("Frame {}: {} command(s)", self.frames, commands.len());
            }
        }
        Ok(())
    }
}
