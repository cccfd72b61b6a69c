// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The spatial index abstraction shared by all backends.

use core::hash::Hash;

use drawboard_geom::{Aabb, Space, World};
use hashbrown::HashMap;

/// Spatial index over identifiers with an axis-aligned bounding box and a
/// payload each.
pub trait SpatialIndex<K, D, S: Space = World>
where
    K: Copy + Eq + Hash,
    D: Clone,
{
    /// Stores `id` with `bounding` and `data`, replacing any previous entry
    /// for `id`.
    ///
    /// Returns `false` and stores nothing when the backend covers a bounded
    /// region and `bounding` does not intersect it.
    fn insert(&mut self, id: K, bounding: Aabb<S>, data: D) -> bool;

    /// Removes `id`. Returns `true` if it was present.
    fn remove(&mut self, id: &K) -> bool;

    /// Replaces the entry for `id`. Equivalent to [`remove`] then [`insert`].
    ///
    /// [`remove`]: SpatialIndex::remove
    /// [`insert`]: SpatialIndex::insert
    fn update(&mut self, id: K, bounding: Aabb<S>, data: D) -> bool {
        self.remove(&id);
        self.insert(id, bounding, data)
    }

    /// Removes every entry.
    fn clear(&mut self);

    /// Visits entries whose bounding touches `query`.
    ///
    /// Backends that store an entry in several places may visit it more than
    /// once.
    fn visit<F: FnMut(&K, &Aabb<S>, &D)>(&self, query: Aabb<S>, f: F);

    /// Entries whose bounding touches `query`, each reported once.
    fn query(&self, query: Aabb<S>) -> HashMap<K, D> {
        let mut out = HashMap::new();
        self.visit(query, |id, _, data| {
            out.entry(*id).or_insert_with(|| data.clone());
        });
        out
    }

    /// Number of distinct identifiers stored.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
