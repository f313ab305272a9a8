//! Pointer and keyboard input mapped onto session operations.

use crate::error::Result;
use crate::registry::ShapeId;
use crate::session::{Session, ShapeHandle};
use crate::shapes::{SerializableColor, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event on the canvas, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    /// The pointer left the canvas mid-gesture.
    Leave,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// The active toolbar tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Freehand,
    Rectangle,
    Ellipse,
    Text,
}

impl ToolKind {
    /// Shape created by dragging with this tool, if any.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select | ToolKind::Text => None,
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Freehand => Some(ShapeKind::Freehand),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
        }
    }
}

/// Toolbar state used for new shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: SerializableColor,
    pub stroke_width: f64,
    pub font_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Select,
            color: SerializableColor::black(),
            stroke_width: 2.0,
            font_size: 20.0,
        }
    }
}

/// Session-level action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Undo,
    Redo,
    DeleteSelection,
    SelectAll,
    /// Abandon gestures and clear the selection.
    Cancel,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: Action,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: Action,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        self.key.eq_ignore_ascii_case(&event.key)
            && self.ctrl == event.modifiers.command()
            && self.shift == event.modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, Action::Undo, "Undo"),
            Shortcut::new("Z", true, true, Action::Redo, "Redo"),
            Shortcut::new("Y", true, false, Action::Redo, "Redo"),
            Shortcut::new("A", true, false, Action::SelectAll, "Select all shapes"),
            Shortcut::new("Delete", false, false, Action::DeleteSelection, "Delete selected shapes"),
            Shortcut::new("Backspace", false, false, Action::DeleteSelection, "Delete selected shapes"),
            Shortcut::new("Escape", false, false, Action::Cancel, "Cancel current action"),
        ]
    }

    /// Action bound to a key press, if any.
    pub fn lookup(event: &KeyEvent) -> Option<Action> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(event))
            .map(|shortcut| shortcut.action)
    }
}

/// Turns raw pointer and key events into session calls.
///
/// Holds only gesture bookkeeping; all drawing state lives in the
/// [`Session`].
#[derive(Debug, Default)]
pub struct InputHandler {
    shape: Option<ShapeHandle>,
    text_anchor: Option<Point>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the next submitted text will be placed.
    pub fn text_anchor(&self) -> Option<Point> {
        self.text_anchor
    }

    pub fn handle_pointer(&mut self, session: &mut Session, event: &PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Down {
                position,
                modifiers,
            } => self.pointer_down(session, *position, *modifiers),
            PointerEvent::Move { position } => {
                if let Some(handle) = self.shape {
                    session.update_shape(handle, *position);
                } else {
                    session.update_move(*position)?;
                }
                Ok(())
            }
            PointerEvent::Up { .. } => {
                if let Some(handle) = self.shape.take() {
                    session.commit_shape(handle)?;
                } else {
                    session.commit_move()?;
                }
                Ok(())
            }
            PointerEvent::Leave => self.cancel_gestures(session),
        }
    }

    fn pointer_down(&mut self, session: &mut Session, position: Point, modifiers: Modifiers) -> Result<()> {
        // A new press always ends whatever was in flight.
        self.cancel_gestures(session)?;

        let settings = session.tool().clone();
        match settings.tool {
            ToolKind::Select => {
                if session.select_at(position, modifiers.command())? {
                    session.begin_move(position)?;
                }
            }
            ToolKind::Text => {
                self.text_anchor = Some(position);
            }
            tool => {
                if let Some(kind) = tool.shape_kind() {
                    let handle =
                        session.begin_shape(kind, position, settings.color, settings.stroke_width);
                    self.shape = Some(handle);
                }
            }
        }
        Ok(())
    }

    /// Place text at the pending anchor using the current font settings.
    pub fn submit_text(&mut self, session: &mut Session, text: &str) -> Result<Option<ShapeId>> {
        let Some(anchor) = self.text_anchor.take() else {
            log::debug!("Text submitted without an anchor");
            return Ok(None);
        };
        let settings = session.tool().clone();
        session.place_text(anchor, text, settings.color, settings.font_size)
    }

    /// Run the action bound to a key press.
    pub fn handle_key(&mut self, session: &mut Session, event: &KeyEvent) -> Result<Option<Action>> {
        let Some(action) = ShortcutRegistry::lookup(event) else {
            return Ok(None);
        };
        match action {
            Action::Undo => {
                self.cancel_gestures(session)?;
                session.undo()?;
            }
            Action::Redo => {
                self.cancel_gestures(session)?;
                session.redo()?;
            }
            Action::DeleteSelection => {
                self.cancel_gestures(session)?;
                session.delete_selection()?;
            }
            Action::SelectAll => session.select_all(),
            Action::Cancel => {
                self.cancel_gestures(session)?;
                self.text_anchor = None;
                session.deselect_all();
            }
        }
        Ok(Some(action))
    }

    fn cancel_gestures(&mut self, session: &mut Session) -> Result<()> {
        if self.shape.take().is_some() {
            session.cancel_shape();
        }
        session.cancel_move()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Default::default()
        }
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    fn session_with(tool: ToolKind) -> Session {
        Session::new(Size::new(200.0, 200.0)).with_tool(ToolSettings {
            tool,
            ..Default::default()
        })
    }

    fn drag(input: &mut InputHandler, session: &mut Session, from: Point, to: Point) {
        input.handle_pointer(session, &down(from.x, from.y)).unwrap();
        input
            .handle_pointer(session, &PointerEvent::Move { position: to })
            .unwrap();
        input
            .handle_pointer(session, &PointerEvent::Up { position: to })
            .unwrap();
    }

    #[test]
    fn test_shortcut_lookup() {
        assert_eq!(ShortcutRegistry::lookup(&KeyEvent::new("z", ctrl())), Some(Action::Undo));
        let ctrl_shift = Modifiers {
            shift: true,
            ..ctrl()
        };
        assert_eq!(ShortcutRegistry::lookup(&KeyEvent::new("Z", ctrl_shift)), Some(Action::Redo));
        assert_eq!(ShortcutRegistry::lookup(&KeyEvent::new("y", ctrl())), Some(Action::Redo));
        assert_eq!(
            ShortcutRegistry::lookup(&KeyEvent::new("Backspace", Modifiers::default())),
            Some(Action::DeleteSelection)
        );
        assert_eq!(ShortcutRegistry::lookup(&KeyEvent::new("z", Modifiers::default())), None);
    }

    #[test]
    fn test_shortcut_format() {
        let formatted: Vec<String> = ShortcutRegistry::all().iter().map(Shortcut::format).collect();
        assert!(formatted.contains(&"Ctrl+Shift+Z".to_string()));
        assert!(formatted.contains(&"Escape".to_string()));
    }

    #[test]
    fn test_drag_draws_rectangle() {
        let mut session = session_with(ToolKind::Rectangle);
        let mut input = InputHandler::new();
        drag(&mut input, &mut session, Point::new(10.0, 10.0), Point::new(60.0, 40.0));

        assert_eq!(session.renderable_shapes().count(), 1);
        assert!(session.in_progress_shape().is_none());
    }

    #[test]
    fn test_select_and_drag_moves() {
        let mut session = session_with(ToolKind::Rectangle);
        let mut input = InputHandler::new();
        drag(&mut input, &mut session, Point::new(0.0, 0.0), Point::new(20.0, 20.0));

        session.tool_mut().tool = ToolKind::Select;
        drag(&mut input, &mut session, Point::new(10.0, 10.0), Point::new(30.0, 10.0));

        let bounds = session.registry().get(ShapeId(0)).unwrap().shape.bounds().unwrap();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert_eq!(session.history().history().len(), 2);

        input.handle_key(&mut session, &KeyEvent::new("z", ctrl())).unwrap();
        let bounds = session.registry().get(ShapeId(0)).unwrap().shape.bounds().unwrap();
        assert!(bounds.x0.abs() < f64::EPSILON);
    }

    #[test]
    fn test_leave_cancels_drawing() {
        let mut session = session_with(ToolKind::Line);
        let mut input = InputHandler::new();
        input.handle_pointer(&mut session, &down(0.0, 0.0)).unwrap();
        input
            .handle_pointer(&mut session, &PointerEvent::Move { position: Point::new(50.0, 50.0) })
            .unwrap();
        input.handle_pointer(&mut session, &PointerEvent::Leave).unwrap();
        input
            .handle_pointer(&mut session, &PointerEvent::Up { position: Point::new(50.0, 50.0) })
            .unwrap();

        assert!(session.registry().is_empty());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_text_tool_places_label() {
        let mut session = session_with(ToolKind::Text);
        let mut input = InputHandler::new();
        input.handle_pointer(&mut session, &down(5.0, 5.0)).unwrap();
        assert_eq!(input.text_anchor(), Some(Point::new(5.0, 5.0)));

        let id = input.submit_text(&mut session, "note").unwrap();
        assert_eq!(id, Some(ShapeId(0)));
        assert_eq!(input.text_anchor(), None);
        assert_eq!(input.submit_text(&mut session, "again").unwrap(), None);
    }

    #[test]
    fn test_delete_and_escape_keys() {
        let mut session = session_with(ToolKind::Ellipse);
        let mut input = InputHandler::new();
        drag(&mut input, &mut session, Point::new(0.0, 0.0), Point::new(40.0, 40.0));

        input.handle_key(&mut session, &KeyEvent::new("a", ctrl())).unwrap();
        assert_eq!(session.selection().len(), 1);
        input
            .handle_key(&mut session, &KeyEvent::new("Escape", Modifiers::default()))
            .unwrap();
        assert!(session.selection().is_empty());

        input.handle_key(&mut session, &KeyEvent::new("a", ctrl())).unwrap();
        let action = input
            .handle_key(&mut session, &KeyEvent::new("Delete", Modifiers::default()))
            .unwrap();
        assert_eq!(action, Some(Action::DeleteSelection));
        assert_eq!(session.renderable_shapes().count(), 0);
    }

    #[test]
    fn test_tool_settings_json_defaults() {
        let settings: ToolSettings = serde_json::from_str(r#"{"tool": "freehand"}"#).unwrap();
        assert_eq!(settings.tool, ToolKind::Freehand);
        assert!((settings.font_size - 20.0).abs() < f64::EPSILON);
    }
}
