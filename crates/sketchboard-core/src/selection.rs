//! Selection set for bulk operations.

use crate::error::Result;
use crate::registry::{ShapeId, ShapeRegistry};
use kurbo::Point;

/// IDs currently marked active, in the order they were selected.
///
/// The set mirrors the `selected` flag of each registry entry; every
/// mutation here updates both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    ids: Vec<ShapeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the topmost live shape under `point`.
    ///
    /// Without `additive` the current selection is cleared first. Shapes
    /// are scanned newest to oldest because later shapes are drawn on top.
    /// Returns whether a shape was hit.
    pub fn select_at(
        &mut self,
        registry: &mut ShapeRegistry,
        point: Point,
        additive: bool,
    ) -> Result<bool> {
        if !additive {
            self.deselect_all(registry);
        }

        let mut hit = None;
        for entry in registry.renderable().rev() {
            if entry.shape.contains(point)? {
                hit = Some(entry.id());
                break;
            }
        }

        let Some(id) = hit else {
            return Ok(false);
        };
        registry.get_mut(id)?.selected = true;
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
        log::debug!("Selected shape {} at ({}, {})", id, point.x, point.y);
        Ok(true)
    }

    /// Clear the set and every entry's `selected` flag. Idempotent.
    pub fn deselect_all(&mut self, registry: &mut ShapeRegistry) {
        self.ids.clear();
        for entry in registry.iter_mut() {
            entry.selected = false;
        }
    }

    /// Select every live shape in creation order.
    pub fn select_all(&mut self, registry: &mut ShapeRegistry) {
        self.ids.clear();
        for entry in registry.iter_mut() {
            entry.selected = entry.is_live();
            if entry.selected {
                self.ids.push(entry.id());
            }
        }
    }

    /// Drop one ID, e.g. after its shape was deleted.
    pub fn remove(&mut self, registry: &mut ShapeRegistry, id: ShapeId) {
        self.ids.retain(|selected| *selected != id);
        if let Ok(entry) = registry.get_mut(id) {
            entry.selected = false;
        }
    }

    /// Drop IDs whose shapes are no longer live (after undo/redo).
    pub fn prune(&mut self, registry: &mut ShapeRegistry) {
        let stale: Vec<ShapeId> = self
            .ids
            .iter()
            .copied()
            .filter(|id| registry.get(*id).map_or(true, |entry| !entry.is_live()))
            .collect();
        for id in stale {
            self.remove(registry, id);
        }
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;
    use crate::shapes::{Rectangle, Shape, ShapeStyle};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Rectangle(Rectangle::from_corners(
            Point::new(x0, y0),
            Point::new(x1, y1),
            ShapeStyle::default(),
        ))
    }

    fn overlapping() -> (ShapeRegistry, ShapeId, ShapeId) {
        let mut registry = ShapeRegistry::new();
        let mut history = History::new();
        let r1 = registry.create(rect(0.0, 0.0, 50.0, 50.0), &mut history);
        let r2 = registry.create(rect(25.0, 25.0, 75.0, 75.0), &mut history);
        (registry, r1, r2)
    }

    #[test]
    fn test_newest_shape_wins() {
        let (mut registry, r1, r2) = overlapping();
        let mut selection = SelectionSet::new();

        assert!(selection.select_at(&mut registry, Point::new(30.0, 30.0), false).unwrap());
        assert_eq!(selection.ids(), &[r2]);
        assert!(registry.get(r2).unwrap().selected);
        assert!(!registry.get(r1).unwrap().selected);
    }

    #[test]
    fn test_deleted_shapes_are_skipped() {
        let (mut registry, r1, r2) = overlapping();
        registry.set_deleted(r2, true).unwrap();
        let mut selection = SelectionSet::new();

        assert!(selection.select_at(&mut registry, Point::new(30.0, 30.0), false).unwrap());
        assert_eq!(selection.ids(), &[r1]);
    }

    #[test]
    fn test_non_additive_miss_clears() {
        let (mut registry, _, r2) = overlapping();
        let mut selection = SelectionSet::new();
        selection.select_at(&mut registry, Point::new(70.0, 70.0), false).unwrap();

        assert!(!selection.select_at(&mut registry, Point::new(500.0, 500.0), false).unwrap());
        assert!(selection.is_empty());
        assert!(!registry.get(r2).unwrap().selected);
    }

    #[test]
    fn test_additive_keeps_previous() {
        let (mut registry, r1, r2) = overlapping();
        let mut selection = SelectionSet::new();
        selection.select_at(&mut registry, Point::new(70.0, 70.0), false).unwrap();
        selection.select_at(&mut registry, Point::new(5.0, 5.0), true).unwrap();
        assert_eq!(selection.ids(), &[r2, r1]);

        // Selecting the same shape again does not duplicate it.
        selection.select_at(&mut registry, Point::new(5.0, 5.0), true).unwrap();
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_deselect_all_is_idempotent() {
        let (mut registry, _, _) = overlapping();
        let mut selection = SelectionSet::new();
        selection.deselect_all(&mut registry);
        selection.select_all(&mut registry);
        assert_eq!(selection.len(), 2);

        selection.deselect_all(&mut registry);
        selection.deselect_all(&mut registry);
        assert!(selection.is_empty());
        assert!(registry.iter().all(|entry| !entry.selected));
    }

    #[test]
    fn test_prune_drops_deleted() {
        let (mut registry, r1, r2) = overlapping();
        let mut selection = SelectionSet::new();
        selection.select_all(&mut registry);
        registry.set_deleted(r1, true).unwrap();

        selection.prune(&mut registry);
        assert_eq!(selection.ids(), &[r2]);
        assert!(!selection.contains(r1));
    }
}
