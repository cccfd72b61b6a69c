// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use drawboard_geom::{Aabb, Space, World};

use crate::backend::SpatialIndex;

/// Flat vector backend with linear scans.
///
/// Optionally bounded by a region, in which case it accepts exactly the
/// entries a [`QuadTree`](crate::QuadTree) over the same region would, and
/// answers every query with the same entries, including the parts of boxes
/// that stick out past the region.
pub struct FlatIndex<K, D, S: Space = World> {
    region: Option<Aabb<S>>,
    entries: Vec<(K, Aabb<S>, D)>,
}

impl<K, D, S: Space> Default for FlatIndex<K, D, S> {
    fn default() -> Self {
        Self {
            region: None,
            entries: Vec::new(),
        }
    }
}

impl<K, D, S: Space> Debug for FlatIndex<K, D, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatIndex")
            .field("region", &self.region)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<K, D, S: Space> FlatIndex<K, D, S> {
    /// Creates an unbounded index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index that rejects entries not intersecting `region`.
    #[must_use]
    pub fn with_region(region: Aabb<S>) -> Self {
        Self {
            region: Some(region),
            entries: Vec::new(),
        }
    }

    /// Iterates over every stored entry in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Aabb<S>, &D)> + '_ {
        self.entries.iter().map(|(k, a, d)| (k, a, d))
    }
}

impl<K, D, S> SpatialIndex<K, D, S> for FlatIndex<K, D, S>
where
    K: Copy + Eq + Hash,
    D: Clone,
    S: Space,
{
    fn insert(&mut self, id: K, bounding: Aabb<S>, data: D) -> bool {
        if let Some(region) = &self.region
            && !region.intersects(&bounding)
        {
            return false;
        }
        self.remove(&id);
        self.entries.push((id, bounding, data));
        true
    }

    fn remove(&mut self, id: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _, _)| k != id);
        self.entries.len() != before
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn visit<F: FnMut(&K, &Aabb<S>, &D)>(&self, query: Aabb<S>, mut f: F) {
        for (id, bounding, data) in &self.entries {
            if bounding.touches(&query) {
                f(id, bounding, data);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
