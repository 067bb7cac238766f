//! Scene graph
//!
//! The ordered collection of primitives composing one board's visible
//! content. Objects are stored in paint order (back to front) and their
//! z-indices are renumbered to the contiguous range `0..len` after every
//! mutation, so the z set is always a duplicate-free permutation consistent
//! with paint order.

use crate::primitive::{Primitive, PrimitivePatch};
use std::collections::HashSet;
use uuid::Uuid;

/// Direction for z-order changes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reorder {
    /// Move above everything
    Front,
    /// Swap with the next object above
    Forward,
    /// Swap with the next object below
    Backward,
    /// Move below everything
    Back,
}

/// Ordered collection of primitives for one board
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGraph {
    objects: Vec<Primitive>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the board is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in paint order (back to front)
    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    /// Iterate objects in paint order
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.objects.iter()
    }

    /// Get an object by id
    pub fn get(&self, id: &Uuid) -> Option<&Primitive> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// Get a mutable object by id
    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Primitive> {
        self.objects.iter_mut().find(|o| &o.id == id)
    }

    /// Check whether an object exists
    pub fn contains(&self, id: &Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Add an object definition to the top of the paint order
    ///
    /// A fresh id is assigned; the definition's own id is ignored. Returns
    /// the assigned id.
    pub fn add(&mut self, mut def: Primitive) -> Uuid {
        def.id = Uuid::new_v4();
        let id = def.id;
        self.objects.push(def);
        self.renumber();
        id
    }

    /// Remove an object by id
    ///
    /// Stale ids are tolerated: removing an unknown id returns `None` and
    /// leaves the graph untouched.
    pub fn remove(&mut self, id: &Uuid) -> Option<Primitive> {
        let index = self.objects.iter().position(|o| &o.id == id)?;
        let removed = self.objects.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Apply a partial update to an object
    ///
    /// Returns false (a no-op) when the id is unknown, so callers holding
    /// stale ids from async flows do not need to guard every update.
    pub fn update(&mut self, id: &Uuid, patch: &PrimitivePatch) -> bool {
        match self.get_mut(id) {
            Some(object) => {
                patch.apply(object);
                true
            }
            None => false,
        }
    }

    /// Change the paint order of a set of objects as a block
    ///
    /// The given objects keep their relative order. `Forward`/`Backward` step
    /// the whole block one place; at the top or bottom edge the blocked part
    /// of the move is dropped. Unknown ids are ignored; returns false when
    /// none of the ids exist.
    pub fn reorder(&mut self, ids: &[Uuid], direction: Reorder) -> bool {
        let moving: HashSet<Uuid> = ids
            .iter()
            .copied()
            .filter(|id| self.contains(id))
            .collect();
        if moving.is_empty() {
            return false;
        }

        match direction {
            Reorder::Front => {
                let (stay, move_up): (Vec<_>, Vec<_>) = self
                    .objects
                    .drain(..)
                    .partition(|o| !moving.contains(&o.id));
                self.objects = stay;
                self.objects.extend(move_up);
            }
            Reorder::Back => {
                let (move_down, stay): (Vec<_>, Vec<_>) = self
                    .objects
                    .drain(..)
                    .partition(|o| moving.contains(&o.id));
                self.objects = move_down;
                self.objects.extend(stay);
            }
            Reorder::Forward => {
                for i in (0..self.objects.len().saturating_sub(1)).rev() {
                    if moving.contains(&self.objects[i].id)
                        && !moving.contains(&self.objects[i + 1].id)
                    {
                        self.objects.swap(i, i + 1);
                    }
                }
            }
            Reorder::Backward => {
                for i in 1..self.objects.len() {
                    if moving.contains(&self.objects[i].id)
                        && !moving.contains(&self.objects[i - 1].id)
                    {
                        self.objects.swap(i, i - 1);
                    }
                }
            }
        }

        self.renumber();
        true
    }

    /// Replace the whole graph with a new set of definitions
    ///
    /// Used by board load and template instantiation; the previous content is
    /// discarded wholesale. Incoming definitions are ordered by their stored
    /// z-index, then renumbered.
    pub fn replace_all(&mut self, mut defs: Vec<Primitive>) {
        defs.sort_by_key(|o| o.z_index);
        self.objects = defs;
        self.renumber();
    }

    /// Clone the object list, e.g. for a history snapshot
    pub fn to_vec(&self) -> Vec<Primitive> {
        self.objects.clone()
    }

    /// Restore the object list from a history snapshot
    pub(crate) fn restore(&mut self, objects: Vec<Primitive>) {
        self.objects = objects;
    }

    /// Reassign z-indices to the contiguous range `0..len` in paint order
    fn renumber(&mut self) {
        for (i, object) in self.objects.iter_mut().enumerate() {
            object.z_index = i as i64;
        }
    }
}
