//! Undo/redo history of committed mutations.
//!
//! Every committed mutation is recorded as an [`Event`] that knows how to
//! apply itself forward and backward. Two stacks implement linear undo:
//! undo moves the newest event from `history` to `undone`, redo moves it
//! back, and recording new work discards `undone`.

use crate::error::Result;
use crate::registry::{ShapeId, ShapeRegistry};
use crate::shapes::SerializableColor;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// One shape's color change inside a batched recolor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecolorEntry {
    pub shape_id: ShapeId,
    pub old_color: SerializableColor,
    pub new_color: SerializableColor,
}

/// A committed, reversible mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Event {
    Create {
        shape_id: ShapeId,
    },
    Delete {
        shape_id: ShapeId,
    },
    /// Translation of the listed shapes by `to - from`.
    Move {
        shape_ids: Vec<ShapeId>,
        from: Point,
        to: Point,
    },
    Recolor {
        entries: Vec<RecolorEntry>,
    },
}

/// Which way an event is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Event {
    /// Every shape this event touches.
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        match self {
            Event::Create { shape_id } | Event::Delete { shape_id } => vec![*shape_id],
            Event::Move { shape_ids, .. } => shape_ids.clone(),
            Event::Recolor { entries } => entries.iter().map(|e| e.shape_id).collect(),
        }
    }

    /// Offset applied to the moved shapes when replaying in `direction`.
    pub fn move_offset(from: Point, to: Point, direction: Direction) -> Vec2 {
        match direction {
            Direction::Forward => to - from,
            Direction::Backward => from - to,
        }
    }

    /// Apply the event to the registry.
    ///
    /// All IDs are checked before anything changes, so an event with an
    /// out-of-range ID leaves the registry untouched.
    pub fn apply(&self, registry: &mut ShapeRegistry, direction: Direction) -> Result<()> {
        for id in self.shape_ids() {
            registry.check_in_range(id)?;
        }

        match self {
            Event::Create { shape_id } => match direction {
                Direction::Forward => registry.restore(*shape_id)?,
                Direction::Backward => registry.set_deleted(*shape_id, true)?,
            },
            Event::Delete { shape_id } => match direction {
                Direction::Forward => registry.set_deleted(*shape_id, true)?,
                Direction::Backward => registry.restore(*shape_id)?,
            },
            Event::Move {
                shape_ids,
                from,
                to,
            } => {
                let offset = Self::move_offset(*from, *to, direction);
                for id in shape_ids {
                    registry.get_mut(*id)?.shape.translate(offset);
                }
            }
            Event::Recolor { entries } => {
                for entry in entries {
                    let color = match direction {
                        Direction::Forward => entry.new_color,
                        Direction::Backward => entry.old_color,
                    };
                    registry.get_mut(entry.shape_id)?.shape.set_color(color);
                }
            }
        }
        Ok(())
    }
}

/// The pair of stacks behind undo/redo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    history: Vec<Event>,
    undone: Vec<Event>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly committed event; new work invalidates redo.
    pub fn record(&mut self, event: Event) {
        self.history.push(event);
        self.undone.clear();
    }

    /// Undo the newest event.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. If the event
    /// cannot be applied it stays on the history stack and the error is
    /// returned.
    pub fn undo(&mut self, registry: &mut ShapeRegistry) -> Result<bool> {
        let Some(event) = self.history.pop() else {
            return Ok(false);
        };
        if let Err(err) = event.apply(registry, Direction::Backward) {
            log::error!("Undo failed, history is inconsistent: {}", err);
            self.history.push(event);
            return Err(err);
        }
        log::info!("Undo {:?}", event);
        self.undone.push(event);
        Ok(true)
    }

    /// Redo the most recently undone event.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, registry: &mut ShapeRegistry) -> Result<bool> {
        let Some(event) = self.undone.pop() else {
            return Ok(false);
        };
        if let Err(err) = event.apply(registry, Direction::Forward) {
            log::error!("Redo failed, history is inconsistent: {}", err);
            self.undone.push(event);
            return Err(err);
        }
        log::info!("Redo {:?}", event);
        self.history.push(event);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Committed events, oldest first.
    pub fn history(&self) -> &[Event] {
        &self.history
    }

    /// Undone events, the next one to redo last.
    pub fn undone(&self) -> &[Event] {
        &self.undone
    }
}
