//! Undo/redo history
//!
//! Linear snapshot history over the scene graph. Each entry is a full copy of
//! the object list, captured once per completed user gesture (one drawn
//! shape, one move, one erase drag), never per pointer-move. A cursor walks
//! the entry list; recording after an undo truncates the abandoned redo tail,
//! and the oldest entries are evicted once the capacity is exceeded.

use crate::primitive::Primitive;
use crate::scene::SceneGraph;

/// Default number of retained snapshots
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded linear undo/redo stack of scene snapshots
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Vec<Primitive>>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Create a history seeded with the scene's current state
    pub fn new(scene: &SceneGraph) -> Self {
        Self::with_capacity(scene, DEFAULT_CAPACITY)
    }

    /// Create a history with a custom snapshot capacity (minimum 1)
    pub fn with_capacity(scene: &SceneGraph, capacity: usize) -> Self {
        Self {
            entries: vec![scene.to_vec()],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record the scene state after a completed mutating gesture
    ///
    /// Truncates any redo tail, appends the new state and advances the
    /// cursor. When the capacity is exceeded the oldest entries are evicted
    /// and the cursor shifts down so its relative position is preserved.
    pub fn snapshot(&mut self, scene: &SceneGraph) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(scene.to_vec());
        self.cursor += 1;

        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(0..excess);
            self.cursor -= excess;
            log::debug!("history at capacity; evicted {excess} oldest snapshot(s)");
        }
    }

    /// Step back one entry and restore it into the scene
    ///
    /// Returns false without touching the scene when already at the oldest
    /// retained state.
    pub fn undo(&mut self, scene: &mut SceneGraph) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        scene.restore(self.entries[self.cursor].clone());
        true
    }

    /// Step forward one entry and restore it into the scene
    pub fn redo(&mut self, scene: &mut SceneGraph) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        scene.restore(self.entries[self.cursor].clone());
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of states reachable by undoing
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of states reachable by redoing
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    /// Drop all history and reseed from the scene's current state
    ///
    /// Used after wholesale replacement (board load, template instantiation),
    /// which starts a fresh edit timeline.
    pub fn reset(&mut self, scene: &SceneGraph) {
        self.entries = vec![scene.to_vec()];
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Primitive, PrimitiveKind};

    fn add_rect(scene: &mut SceneGraph) {
        scene.add(Primitive::new(PrimitiveKind::Rectangle, 0.0, 0.0).with_size(10.0, 10.0));
    }

    #[test]
    fn test_undo_redo_inverse_law() {
        let mut scene = SceneGraph::new();
        let mut history = History::new(&scene);

        for _ in 0..4 {
            add_rect(&mut scene);
            history.snapshot(&scene);
        }
        assert_eq!(scene.len(), 4);

        let mut undone = 0;
        while history.undo(&mut scene) {
            undone += 1;
        }
        assert_eq!(undone, 4);
        assert_eq!(scene.len(), 0);

        let mut redone = 0;
        while history.redo(&mut scene) {
            redone += 1;
        }
        assert_eq!(redone, 4);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn test_no_op_at_either_end() {
        let mut scene = SceneGraph::new();
        let mut history = History::new(&scene);

        assert!(!history.undo(&mut scene));
        assert!(!history.redo(&mut scene));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_snapshot_truncates_redo_tail() {
        let mut scene = SceneGraph::new();
        let mut history = History::new(&scene);

        add_rect(&mut scene);
        history.snapshot(&scene);
        add_rect(&mut scene);
        history.snapshot(&scene);

        history.undo(&mut scene);
        assert!(history.can_redo());

        add_rect(&mut scene);
        history.snapshot(&scene);

        assert!(!history.can_redo());
        assert!(!history.redo(&mut scene));
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut scene = SceneGraph::new();
        let mut history = History::with_capacity(&scene, 50);

        for _ in 0..60 {
            add_rect(&mut scene);
            history.snapshot(&scene);
        }

        // Exactly 50 states retained: the current one plus 49 undos
        assert_eq!(history.undo_depth(), 49);
        let mut undone = 0;
        while history.undo(&mut scene) {
            undone += 1;
        }
        assert_eq!(undone, 49);

        // The oldest reachable state has the first 11 rectangles in it
        assert_eq!(scene.len(), 11);
    }

    #[test]
    fn test_restored_state_matches_snapshot() {
        let mut scene = SceneGraph::new();
        let mut history = History::new(&scene);

        add_rect(&mut scene);
        history.snapshot(&scene);
        let saved = scene.to_vec();

        add_rect(&mut scene);
        history.snapshot(&scene);

        history.undo(&mut scene);
        assert_eq!(scene.to_vec(), saved);
    }
}
