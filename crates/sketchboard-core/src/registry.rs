//! Append-only shape registry.
//!
//! Shapes are never removed: an entry's index is its ID, and every recorded
//! event refers to shapes by that index. Deletion only flips a flag.

use crate::error::{CanvasError, Result};
use crate::history::{Event, History};
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a shape: its position in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub usize);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed shape with its bookkeeping flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeEntry {
    id: ShapeId,
    pub shape: Shape,
    /// Soft-delete flag; deleted shapes are neither drawn nor hit-tested.
    pub deleted: bool,
    /// Transient UI flag.
    #[serde(skip)]
    pub selected: bool,
}

impl ShapeEntry {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Neither deleted nor otherwise hidden.
    pub fn is_live(&self) -> bool {
        !self.deleted
    }
}

/// All shapes ever committed, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeRegistry {
    entries: Vec<ShapeEntry>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape without recording an event.
    pub(crate) fn push(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.entries.len());
        self.entries.push(ShapeEntry {
            id,
            shape,
            deleted: false,
            selected: false,
        });
        id
    }

    /// Append a shape and record its Create event.
    pub fn create(&mut self, shape: Shape, history: &mut History) -> ShapeId {
        let id = self.push(shape);
        history.record(Event::Create { shape_id: id });
        log::debug!("Created shape {}", id);
        id
    }

    /// Soft-delete a shape and record its Delete event.
    ///
    /// Returns `Ok(false)` without recording anything if the shape is
    /// already deleted.
    pub fn soft_delete(&mut self, id: ShapeId, history: &mut History) -> Result<bool> {
        let entry = self.get_mut(id)?;
        if entry.deleted {
            return Ok(false);
        }
        entry.deleted = true;
        entry.selected = false;
        history.record(Event::Delete { shape_id: id });
        log::debug!("Deleted shape {}", id);
        Ok(true)
    }

    /// Flip the deleted flag without recording an event (history replay).
    pub fn set_deleted(&mut self, id: ShapeId, deleted: bool) -> Result<()> {
        let entry = self.get_mut(id)?;
        entry.deleted = deleted;
        if deleted {
            entry.selected = false;
        }
        Ok(())
    }

    /// Undo a soft delete without recording an event.
    pub fn restore(&mut self, id: ShapeId) -> Result<()> {
        self.set_deleted(id, false)
    }

    pub fn get(&self, id: ShapeId) -> Result<&ShapeEntry> {
        self.entries.get(id.0).ok_or(CanvasError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Result<&mut ShapeEntry> {
        self.entries.get_mut(id.0).ok_or(CanvasError::NotFound(id))
    }

    /// Check that an ID recorded in history still refers to a registry slot.
    pub fn check_in_range(&self, id: ShapeId) -> Result<()> {
        if id.0 < self.entries.len() {
            Ok(())
        } else {
            Err(CanvasError::OutOfRangeId {
                id,
                len: self.entries.len(),
            })
        }
    }

    /// Check that every entry's ID matches its slot (loaded snapshots).
    pub fn validate(&self) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.id.0 != index {
                return Err(CanvasError::Serialization(format!(
                    "shape {} stored at index {}",
                    entry.id, index
                )));
            }
        }
        Ok(())
    }

    /// Every entry, deleted ones included, in creation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ShapeEntry> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ShapeEntry> {
        self.entries.iter_mut()
    }

    /// Non-deleted entries in creation (drawing) order.
    pub fn renderable(&self) -> impl DoubleEndedIterator<Item = &ShapeEntry> {
        self.entries.iter().filter(|entry| entry.is_live())
    }

    /// Total number of entries, deleted ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-deleted shapes.
    pub fn live_count(&self) -> usize {
        self.renderable().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, ShapeStyle};
    use kurbo::Point;

    fn rect() -> Shape {
        Shape::Rectangle(Rectangle::from_corners(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            ShapeStyle::default(),
        ))
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut registry = ShapeRegistry::new();
        let mut history = History::new();
        assert_eq!(registry.create(rect(), &mut history), ShapeId(0));
        assert_eq!(registry.create(rect(), &mut history), ShapeId(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(history.history().len(), 2);
        assert_eq!(history.history()[1], Event::Create { shape_id: ShapeId(1) });
    }

    #[test]
    fn test_soft_delete_keeps_entry() {
        let mut registry = ShapeRegistry::new();
        let mut history = History::new();
        let a = registry.create(rect(), &mut history);
        let b = registry.create(rect(), &mut history);

        assert!(registry.soft_delete(a, &mut history).unwrap());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.get(b).unwrap().id(), b);
        assert_eq!(history.history().last(), Some(&Event::Delete { shape_id: a }));

        // Deleting twice records nothing.
        assert!(!registry.soft_delete(a, &mut history).unwrap());
        assert_eq!(history.history().len(), 3);
    }

    #[test]
    fn test_get_out_of_range() {
        let registry = ShapeRegistry::new();
        assert_eq!(
            registry.get(ShapeId(3)).unwrap_err(),
            CanvasError::NotFound(ShapeId(3))
        );
        assert_eq!(
            registry.check_in_range(ShapeId(0)).unwrap_err(),
            CanvasError::OutOfRangeId { id: ShapeId(0), len: 0 }
        );
    }

    #[test]
    fn test_renderable_skips_deleted() {
        let mut registry = ShapeRegistry::new();
        let mut history = History::new();
        let a = registry.create(rect(), &mut history);
        let b = registry.create(rect(), &mut history);
        registry.set_deleted(a, true).unwrap();

        let ids: Vec<ShapeId> = registry.renderable().map(|e| e.id()).collect();
        assert_eq!(ids, vec![b]);

        registry.restore(a).unwrap();
        let ids: Vec<ShapeId> = registry.renderable().map(|e| e.id()).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_validate_rejects_shuffled_ids() {
        let mut registry = ShapeRegistry::new();
        let mut history = History::new();
        registry.create(rect(), &mut history);
        registry.create(rect(), &mut history);
        assert!(registry.validate().is_ok());

        registry.entries.swap(0, 1);
        assert!(matches!(registry.validate(), Err(CanvasError::Serialization(_))));
    }
}
