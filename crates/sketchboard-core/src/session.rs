//! Drawing session: the explicit context every operation runs against.
//!
//! A [`Session`] owns the shape registry, the selection, the undo/redo
//! history and any in-progress gesture. Hosts create one per open
//! drawing and drop it when the drawing is closed; nothing lives in
//! globals.

use crate::error::{CanvasError, Result};
use crate::gesture::MoveGesture;
use crate::history::{Event, History, RecolorEntry};
use crate::input::ToolSettings;
use crate::registry::{ShapeEntry, ShapeId, ShapeRegistry};
use crate::selection::SelectionSet;
use crate::shapes::{SerializableColor, Shape, ShapeKind, ShapeStyle, ShapeTrait};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Hook the session calls when something visible changed.
pub trait RedrawHandler {
    fn request_redraw(&mut self);
}

/// Redraw handler for headless sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedraw;

impl RedrawHandler for NoRedraw {
    fn request_redraw(&mut self) {}
}

/// Token for a shape that is being drawn but not yet committed.
///
/// Each [`Session::begin_shape`] issues a fresh handle; a handle from an
/// earlier gesture is stale and its updates are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(u64);

#[derive(Debug)]
struct PendingShape {
    handle: ShapeHandle,
    shape: Shape,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    id: &'a str,
    shapes: &'a ShapeRegistry,
    history: &'a History,
}

#[derive(Deserialize)]
struct Snapshot {
    id: String,
    shapes: ShapeRegistry,
    history: History,
}

/// Everything one open drawing needs.
pub struct Session {
    id: String,
    registry: ShapeRegistry,
    selection: SelectionSet,
    history: History,
    pending: Option<PendingShape>,
    next_handle: u64,
    move_gesture: Option<MoveGesture>,
    tool: ToolSettings,
    canvas_size: Size,
    redraw: Box<dyn RedrawHandler>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("shapes", &self.registry.len())
            .field("selected", &self.selection.len())
            .field("history", &self.history.history().len())
            .field("undone", &self.history.undone().len())
            .finish()
    }
}

impl Session {
    /// Start an empty drawing.
    pub fn new(canvas_size: Size) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            registry: ShapeRegistry::new(),
            selection: SelectionSet::new(),
            history: History::new(),
            pending: None,
            next_handle: 0,
            move_gesture: None,
            tool: ToolSettings::default(),
            canvas_size,
            redraw: Box::new(NoRedraw),
        }
    }

    /// Replace the redraw hook.
    pub fn with_redraw(mut self, redraw: impl RedrawHandler + 'static) -> Self {
        self.redraw = Box::new(redraw);
        self
    }

    /// Replace the default tool settings.
    pub fn with_tool(mut self, tool: ToolSettings) -> Self {
        self.tool = tool;
        self
    }

    fn request_redraw(&mut self) {
        self.redraw.request_redraw();
    }

    // --- Shape creation ---

    /// Begin drawing a new shape at `point`.
    ///
    /// An uncommitted shape from an earlier gesture is discarded.
    pub fn begin_shape(
        &mut self,
        kind: ShapeKind,
        point: Point,
        color: SerializableColor,
        width: f64,
    ) -> ShapeHandle {
        if self.pending.is_some() {
            log::warn!("Discarding uncommitted shape");
        }
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        self.pending = Some(PendingShape {
            handle,
            shape: Shape::begin(kind, point, ShapeStyle::new(color, width)),
        });
        handle
    }

    fn pending_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape> {
        match &mut self.pending {
            Some(pending) if pending.handle == handle => Some(&mut pending.shape),
            _ => {
                log::warn!("Ignoring stale shape handle {:?}", handle);
                None
            }
        }
    }

    /// Live feedback while dragging; records nothing.
    pub fn update_shape(&mut self, handle: ShapeHandle, point: Point) -> bool {
        let Some(shape) = self.pending_mut(handle) else {
            return false;
        };
        shape.set_end(point);
        self.request_redraw();
        true
    }

    /// Set the content of an in-progress text label.
    pub fn set_shape_text(&mut self, handle: ShapeHandle, text: &str) -> bool {
        let Some(shape) = self.pending_mut(handle) else {
            return false;
        };
        let Some(label) = shape.as_text_mut() else {
            log::warn!("Shape {:?} is not a text label", handle);
            return false;
        };
        label.set_content(text);
        self.request_redraw();
        true
    }

    /// Commit the in-progress shape.
    ///
    /// A shape without real geometry (a click without a drag, empty text)
    /// is dropped and `Ok(None)` is returned.
    pub fn commit_shape(&mut self, handle: ShapeHandle) -> Result<Option<ShapeId>> {
        let pending = match self.pending.take() {
            Some(pending) if pending.handle == handle => pending,
            other => {
                self.pending = other;
                log::warn!("Commit with stale shape handle {:?}", handle);
                return Ok(None);
            }
        };

        if !pending.shape.is_valid() {
            log::debug!(
                "Dropping {:?}: {}",
                pending.shape.kind(),
                CanvasError::InvalidShape
            );
            return Ok(None);
        }

        let id = self.registry.create(pending.shape, &mut self.history);
        self.request_redraw();
        Ok(Some(id))
    }

    /// Abandon the in-progress shape without recording anything.
    pub fn cancel_shape(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("Cancelled in-progress shape");
            self.request_redraw();
        }
    }

    /// Create a text label in one step.
    pub fn place_text(
        &mut self,
        point: Point,
        text: &str,
        color: SerializableColor,
        font_size: f64,
    ) -> Result<Option<ShapeId>> {
        let handle = self.begin_shape(ShapeKind::Text, point, color, font_size);
        if let Some(label) = self.pending_mut(handle).and_then(Shape::as_text_mut) {
            label.set_content(text);
        }
        self.commit_shape(handle)
    }

    // --- Selection ---

    /// Select the topmost shape under `point`.
    pub fn select_at(&mut self, point: Point, additive: bool) -> Result<bool> {
        let before = self.selection.ids().to_vec();
        let hit = self
            .selection
            .select_at(&mut self.registry, point, additive)?;
        if self.selection.ids() != before.as_slice() {
            self.request_redraw();
        }
        Ok(hit)
    }

    pub fn deselect_all(&mut self) {
        let had_selection = !self.selection.is_empty();
        self.selection.deselect_all(&mut self.registry);
        if had_selection {
            self.request_redraw();
        }
    }

    pub fn select_all(&mut self) {
        let before = self.selection.len();
        self.selection.select_all(&mut self.registry);
        if self.selection.len() != before {
            self.request_redraw();
        }
    }

    // --- Moving ---

    /// Start dragging the current selection.
    ///
    /// The selected IDs are captured now; later selection changes do not
    /// affect this move. A drag still in flight is cancelled first, so its
    /// unrecorded translation does not leak into the new one. Returns
    /// whether anything will move.
    pub fn begin_move(&mut self, point: Point) -> Result<bool> {
        self.cancel_move()?;
        let ids = self.selection.ids().to_vec();
        let moves_something = !ids.is_empty();
        self.move_gesture = Some(MoveGesture::new(point, ids));
        Ok(moves_something)
    }

    /// Apply the offset since the previous update to the moving shapes.
    pub fn update_move(&mut self, point: Point) -> Result<()> {
        let Some(gesture) = &mut self.move_gesture else {
            return Ok(());
        };
        gesture.set_end(point);
        let step = gesture.take_step();
        if gesture.shape_ids.is_empty() || (step.x == 0.0 && step.y == 0.0) {
            return Ok(());
        }
        for id in &gesture.shape_ids {
            self.registry.get_mut(*id)?.shape.translate(step);
        }
        self.request_redraw();
        Ok(())
    }

    /// Finish the drag and record one Move event.
    ///
    /// Nothing is recorded when no drag is active, nothing was selected,
    /// or the pointer ended where it started. Returns whether an event was
    /// recorded.
    pub fn commit_move(&mut self) -> Result<bool> {
        let Some(gesture) = self.move_gesture.take() else {
            return Ok(false);
        };
        let from = gesture.origin;
        let to = gesture.current();
        if gesture.shape_ids.is_empty() || from == to {
            log::debug!("Suppressed empty move");
            return Ok(false);
        }
        log::debug!(
            "Moved {} shape(s) by ({}, {})",
            gesture.shape_ids.len(),
            to.x - from.x,
            to.y - from.y
        );
        self.history.record(Event::Move {
            shape_ids: gesture.shape_ids,
            from,
            to,
        });
        Ok(true)
    }

    /// Abandon the drag, putting the shapes back where it began.
    pub fn cancel_move(&mut self) -> Result<()> {
        let Some(gesture) = self.move_gesture.take() else {
            return Ok(());
        };
        let back = -gesture.displacement();
        if gesture.shape_ids.is_empty() || (back.x == 0.0 && back.y == 0.0) {
            return Ok(());
        }
        for id in &gesture.shape_ids {
            self.registry.get_mut(*id)?.shape.translate(back);
        }
        log::debug!("Cancelled move of {} shape(s)", gesture.shape_ids.len());
        self.request_redraw();
        Ok(())
    }

    // --- Batched mutations ---

    /// Recolor every selected shape as one undoable step.
    ///
    /// Returns whether an event was recorded.
    pub fn recolor_selection(&mut self, color: SerializableColor) -> Result<bool> {
        let mut entries = Vec::new();
        for id in self.selection.ids() {
            let shape = &mut self.registry.get_mut(*id)?.shape;
            let old_color = shape.color();
            if old_color == color {
                continue;
            }
            shape.set_color(color);
            entries.push(RecolorEntry {
                shape_id: *id,
                old_color,
                new_color: color,
            });
        }
        if entries.is_empty() {
            log::debug!("Recolor to {} changed nothing", color.to_hex());
            return Ok(false);
        }
        log::debug!("Recolored {} shape(s) to {}", entries.len(), color.to_hex());
        self.history.record(Event::Recolor { entries });
        self.request_redraw();
        Ok(true)
    }

    /// Soft-delete every selected shape, one Delete event each.
    ///
    /// Returns the number of shapes deleted.
    pub fn delete_selection(&mut self) -> Result<usize> {
        let ids = self.selection.ids().to_vec();
        let mut deleted = 0;
        for id in ids {
            if self.registry.soft_delete(id, &mut self.history)? {
                deleted += 1;
            }
            self.selection.remove(&mut self.registry, id);
        }
        if deleted > 0 {
            self.request_redraw();
        }
        Ok(deleted)
    }

    // --- History ---

    pub fn undo(&mut self) -> Result<bool> {
        let replayed = self.history.undo(&mut self.registry)?;
        if replayed {
            self.selection.prune(&mut self.registry);
            self.request_redraw();
        }
        Ok(replayed)
    }

    pub fn redo(&mut self) -> Result<bool> {
        let replayed = self.history.redo(&mut self.registry)?;
        if replayed {
            self.selection.prune(&mut self.registry);
            self.request_redraw();
        }
        Ok(replayed)
    }

    // --- Accessors ---

    /// Non-deleted shapes in drawing order.
    pub fn renderable_shapes(&self) -> impl DoubleEndedIterator<Item = &ShapeEntry> {
        self.registry.renderable()
    }

    /// The shape being drawn, for live preview.
    pub fn in_progress_shape(&self) -> Option<&Shape> {
        self.pending.as_ref().map(|pending| &pending.shape)
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn tool(&self) -> &ToolSettings {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolSettings {
        &mut self.tool
    }

    /// Canvas dimensions, passed through to the renderer.
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Identifier of this drawing.
    pub fn drawing_id(&self) -> &str {
        &self.id
    }

    // --- Snapshots ---

    /// Serialize the shapes and both history stacks.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = SnapshotRef {
            id: &self.id,
            shapes: &self.registry,
            history: &self.history,
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Restore a session from [`Session::to_json`] output.
    ///
    /// The snapshot is rejected if any entry is out of place or any
    /// recorded event refers to a shape that does not exist.
    pub fn from_json(json: &str, canvas_size: Size) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.shapes.validate()?;
        for event in snapshot
            .history
            .history()
            .iter()
            .chain(snapshot.history.undone())
        {
            for id in event.shape_ids() {
                snapshot.shapes.check_in_range(id)?;
            }
        }

        let mut session = Self::new(canvas_size);
        session.id = snapshot.id;
        session.registry = snapshot.shapes;
        session.history = snapshot.history;
        log::info!(
            "Loaded drawing {} with {} shape(s)",
            session.id,
            session.registry.len()
        );
        Ok(session)
    }
}
