//! Gesture scripts: recorded toolbar, pointer and key input.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sketchboard_core::{KeyEvent, PointerEvent, ToolKind};
use std::path::Path;

/// One recorded user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    Pointer { event: PointerEvent },
    Key { event: KeyEvent },
    /// Text typed into the label input.
    Text { text: String },
    Tool { tool: ToolKind },
    /// Color picker change; also recolors the selection.
    Color { color: String },
    StrokeWidth { width: f64 },
    FontSize { size: f64 },
}

/// Read a JSON array of steps.
pub fn load_script(path: impl AsRef<Path>) -> AppResult<Vec<ScriptStep>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_parse_steps() {
        let json = r##"[
            { "step": "tool", "tool": "line" },
            { "step": "pointer", "event": { "type": "down", "position": { "x": 1.0, "y": 2.0 } } },
            { "step": "pointer", "event": { "type": "leave" } },
            { "step": "key", "event": { "key": "z", "modifiers": { "ctrl": true } } },
            { "step": "color", "color": "#ff0000" }
        ]"##;
        let steps: Vec<ScriptStep> = serde_json::from_str(json).unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], ScriptStep::Tool { tool: ToolKind::Line });
        match &steps[1] {
            ScriptStep::Pointer {
                event: PointerEvent::Down { position, modifiers },
            } => {
                assert_eq!(*position, Point::new(1.0, 2.0));
                assert!(!modifiers.ctrl);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(steps[2], ScriptStep::Pointer { event: PointerEvent::Leave });
        match &steps[3] {
            ScriptStep::Key { event } => assert!(event.modifiers.ctrl),
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(
            steps[4],
            ScriptStep::Color {
                color: "#ff0000".to_string()
            }
        );
    }
}
