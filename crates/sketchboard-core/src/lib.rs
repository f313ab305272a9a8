//! Sketchboard Core Library
//!
//! Shape model, hit-testing, selection and undo/redo history for the
//! Sketchboard drawing surface. Rendering and raw event capture live in
//! other crates; this one only needs a redraw hook.

pub mod error;
pub mod gesture;
pub mod history;
pub mod input;
pub mod registry;
pub mod selection;
pub mod session;
pub mod shapes;

pub use error::{CanvasError, Result};
pub use gesture::MoveGesture;
pub use history::{Direction, Event, History, RecolorEntry};
pub use input::{Action, InputHandler, KeyEvent, Modifiers, PointerEvent, Shortcut, ShortcutRegistry, ToolKind, ToolSettings};
pub use registry::{ShapeEntry, ShapeId, ShapeRegistry};
pub use selection::SelectionSet;
pub use session::{NoRedraw, RedrawHandler, Session, ShapeHandle};
pub use shapes::{SerializableColor, Shape, ShapeKind, ShapeStyle, ShapeTrait};
