//! Selection state
//!
//! Tracks which primitives are currently active for move, property and
//! z-order edits. Selection is session state only and is never persisted;
//! every member must exist in the scene graph, which `prune` re-establishes
//! after deletions and history restores.

use crate::scene::SceneGraph;
use uuid::Uuid;

/// The set of currently selected primitives, in selection order
#[derive(Clone, Debug, Default)]
pub struct Selection {
    selected: Vec<Uuid>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the selection
    pub fn add(&mut self, id: Uuid) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    /// Remove an object from the selection
    pub fn remove(&mut self, id: &Uuid) {
        self.selected.retain(|x| x != id);
    }

    /// Toggle an object's selection state
    pub fn toggle(&mut self, id: Uuid) {
        if self.contains(&id) {
            self.remove(&id);
        } else {
            self.add(id);
        }
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection with a single object
    pub fn select_only(&mut self, id: Uuid) {
        self.selected.clear();
        self.selected.push(id);
    }

    /// Replace the selection with multiple objects
    pub fn set(&mut self, ids: &[Uuid]) {
        self.selected.clear();
        for &id in ids {
            self.add(id);
        }
    }

    /// Check if an object is selected
    pub fn contains(&self, id: &Uuid) -> bool {
        self.selected.contains(id)
    }

    /// The selected ids, in selection order
    pub fn ids(&self) -> &[Uuid] {
        &self.selected
    }

    /// Number of selected objects
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if the selection is empty
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop members that no longer exist in the scene graph
    pub fn prune(&mut self, scene: &SceneGraph) {
        self.selected.retain(|id| scene.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Primitive, PrimitiveKind};

    #[test]
    fn test_add_is_deduplicated() {
        let mut selection = Selection::new();
        let id = Uuid::new_v4();

        selection.add(id);
        selection.add(id);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        let id = Uuid::new_v4();

        selection.toggle(id);
        assert!(selection.contains(&id));

        selection.toggle(id);
        assert!(!selection.contains(&id));
    }

    #[test]
    fn test_select_only_replaces() {
        let mut selection = Selection::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        selection.add(a);
        selection.add(b);
        selection.select_only(a);

        assert_eq!(selection.ids(), &[a]);
    }

    #[test]
    fn test_prune_drops_missing_objects() {
        let mut scene = SceneGraph::new();
        let kept = scene.add(Primitive::new(PrimitiveKind::Rectangle, 0.0, 0.0));

        let mut selection = Selection::new();
        selection.add(kept);
        selection.add(Uuid::new_v4());

        selection.prune(&scene);
        assert_eq!(selection.ids(), &[kept]);
    }
}
