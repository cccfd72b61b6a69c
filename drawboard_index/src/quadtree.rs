// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree backend.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use drawboard_geom::{Aabb, Space, World};
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::backend::SpatialIndex;

/// Tuning for a [`QuadTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadTreeOptions {
    /// Entries a leaf holds before it splits.
    pub capacity: usize,
    /// Depth at which leaves stop splitting. The root is at depth 0.
    pub max_depth: usize,
}

impl Default for QuadTreeOptions {
    fn default() -> Self {
        Self {
            capacity: 8,
            max_depth: 8,
        }
    }
}

/// Handle to a node of a [`QuadTree`].
///
/// Handles are invalidated by [`SpatialIndex::clear`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    const ROOT: Self = Self(0);

    /// Position of the node in the tree's arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Entry<K, D, S: Space> {
    id: K,
    bounding: Aabb<S>,
    data: D,
}

#[derive(Clone, Debug)]
struct Node<K, D, S: Space> {
    region: Aabb<S>,
    depth: usize,
    /// Union of every box stored at or below this node. Grows on insert and
    /// is not shrunk on removal.
    content: Option<Aabb<S>>,
    entries: Vec<Entry<K, D, S>>,
    children: Option<[NodeId; 4]>,
}

impl<K, D, S: Space> Node<K, D, S> {
    fn leaf(region: Aabb<S>, depth: usize) -> Self {
        Self {
            region,
            depth,
            content: None,
            entries: Vec::new(),
            children: None,
        }
    }

    fn grow_content(&mut self, bounding: Aabb<S>) {
        self.content = Some(match self.content {
            Some(c) => c.union(&bounding),
            None => bounding,
        });
    }
}

/// Region quadtree over a fixed root region.
///
/// Nodes live in an arena and refer to their children by [`NodeId`]. A leaf
/// holds up to `capacity` entries; the next insertion splits it into four
/// equal quadrants and redistributes its entries, unless the leaf is already
/// at `max_depth`, in which case it simply grows. Emptied quadrants are not
/// merged back.
///
/// Entries are routed by the region partition, but queries prune by the
/// bounds of what each node actually stores. A box that sticks out past the
/// root region is therefore found by queries that only touch the part
/// outside it.
///
/// An entry goes into every child it overlaps. A box that overlaps no child
/// strictly, such as a zero-width box lying on a split line, goes into every
/// child it touches instead, so it is never dropped.
pub struct QuadTree<K, D, S: Space = World> {
    region: Aabb<S>,
    options: QuadTreeOptions,
    nodes: Vec<Node<K, D, S>>,
    leaves: HashMap<K, SmallVec<[NodeId; 4]>>,
}

impl<K, D, S: Space> Debug for QuadTree<K, D, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("region", &self.region)
            .field("options", &self.options)
            .field("nodes", &self.nodes.len())
            .field("ids", &self.leaves.len())
            .finish_non_exhaustive()
    }
}

impl<K, D, S> QuadTree<K, D, S>
where
    K: Copy + Eq + Hash,
    D: Clone,
    S: Space,
{
    /// Creates an empty tree covering `region`.
    ///
    /// A zero capacity is treated as one.
    #[must_use]
    pub fn new(region: Aabb<S>, options: QuadTreeOptions) -> Self {
        let options = QuadTreeOptions {
            capacity: options.capacity.max(1),
            ..options
        };
        Self {
            region,
            options,
            nodes: vec![Node::leaf(region, 0)],
            leaves: HashMap::new(),
        }
    }

    /// Root region.
    #[must_use]
    pub fn region(&self) -> Aabb<S> {
        self.region
    }

    /// Tuning this tree was built with.
    #[must_use]
    pub fn options(&self) -> QuadTreeOptions {
        self.options
    }

    /// Removes every entry and moves the root to `region`.
    pub fn reset_region(&mut self, region: Aabb<S>) {
        self.region = region;
        self.clear();
    }

    /// Returns `true` if `id` is stored.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.leaves.contains_key(id)
    }

    /// Leaves currently holding `id`; empty if it is not stored.
    #[must_use]
    pub fn leaves_of(&self, id: &K) -> &[NodeId] {
        self.leaves
            .get(id)
            .map(|l| l.as_slice())
            .unwrap_or_default()
    }

    /// Region covered by `node`, if the handle is valid.
    #[must_use]
    pub fn node_region(&self, node: NodeId) -> Option<Aabb<S>> {
        self.nodes.get(node.0).map(|n| n.region)
    }

    /// Union of the boxes ever stored at or below `node` since the last
    /// [`clear`](SpatialIndex::clear), if the handle is valid and anything was
    /// stored there.
    #[must_use]
    pub fn node_content(&self, node: NodeId) -> Option<Aabb<S>> {
        self.nodes.get(node.0).and_then(|n| n.content)
    }

    /// Depth of `node`, if the handle is valid.
    #[must_use]
    pub fn node_depth(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(node.0).map(|n| n.depth)
    }

    /// Number of nodes, including interior ones.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Snapshot of the tree shape for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> QuadTreeDebugInfo {
        let mut leaf_count = 0;
        let mut deepest = 0;
        let mut stored_entries = 0;
        for node in &self.nodes {
            if node.children.is_none() {
                leaf_count += 1;
                deepest = deepest.max(node.depth);
                stored_entries += node.entries.len();
            }
        }
        QuadTreeDebugInfo {
            node_count: self.nodes.len(),
            leaf_count,
            deepest_leaf: deepest,
            ids: self.leaves.len(),
            stored_entries,
        }
    }

    fn insert_at(&mut self, node: NodeId, entry: Entry<K, D, S>) {
        self.nodes[node.0].grow_content(entry.bounding);
        let n = &self.nodes[node.0];
        if n.children.is_none() {
            if n.entries.len() < self.options.capacity || n.depth >= self.options.max_depth {
                self.leaves.entry(entry.id).or_default().push(node);
                self.nodes[node.0].entries.push(entry);
                return;
            }
            self.split(node);
        }
        self.insert_into_children(node, &entry);
    }

    fn insert_into_children(&mut self, node: NodeId, entry: &Entry<K, D, S>) {
        let Some(children) = self.nodes[node.0].children else {
            return;
        };
        let overlapping = children.map(|c| self.nodes[c.0].region.intersects(&entry.bounding));
        let targets = if overlapping.contains(&true) {
            overlapping
        } else {
            children.map(|c| self.nodes[c.0].region.touches(&entry.bounding))
        };
        for (child, hit) in children.into_iter().zip(targets) {
            if hit {
                self.insert_at(child, entry.clone());
            }
        }
    }

    fn split(&mut self, node: NodeId) {
        let (region, depth) = {
            let n = &self.nodes[node.0];
            (n.region, n.depth)
        };
        let hw = region.width * 0.5;
        let hh = region.height * 0.5;
        let base = self.nodes.len();
        for (x, y) in [
            (region.x, region.y),
            (region.x + hw, region.y),
            (region.x, region.y + hh),
            (region.x + hw, region.y + hh),
        ] {
            self.nodes.push(Node::leaf(Aabb::new(x, y, hw, hh), depth + 1));
        }
        self.nodes[node.0].children = Some([
            NodeId(base),
            NodeId(base + 1),
            NodeId(base + 2),
            NodeId(base + 3),
        ]);

        let entries = core::mem::take(&mut self.nodes[node.0].entries);
        for entry in entries {
            if let Some(leaves) = self.leaves.get_mut(&entry.id) {
                leaves.retain(|l| *l != node);
            }
            self.insert_into_children(node, &entry);
        }
    }
}

impl<K, D, S> SpatialIndex<K, D, S> for QuadTree<K, D, S>
where
    K: Copy + Eq + Hash,
    D: Clone,
    S: Space,
{
    fn insert(&mut self, id: K, bounding: Aabb<S>, data: D) -> bool {
        if !self.region.intersects(&bounding) {
            return false;
        }
        if self.leaves.contains_key(&id) {
            self.remove(&id);
        }
        self.insert_at(NodeId::ROOT, Entry { id, bounding, data });
        true
    }

    fn remove(&mut self, id: &K) -> bool {
        let Some(leaves) = self.leaves.remove(id) else {
            return false;
        };
        for leaf in leaves {
            self.nodes[leaf.0].entries.retain(|e| e.id != *id);
        }
        true
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::leaf(self.region, 0));
        self.leaves.clear();
    }

    fn visit<F: FnMut(&K, &Aabb<S>, &D)>(&self, query: Aabb<S>, mut f: F) {
        let mut stack: SmallVec<[NodeId; 32]> = SmallVec::new();
        stack.push(NodeId::ROOT);
        while let Some(node) = stack.pop() {
            let n = &self.nodes[node.0];
            if !n.content.is_some_and(|c| c.touches(&query)) {
                continue;
            }
            match n.children {
                Some(children) => stack.extend(children.into_iter().rev()),
                None => {
                    for e in &n.entries {
                        if e.bounding.touches(&query) {
                            f(&e.id, &e.bounding, &e.data);
                        }
                    }
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.leaves.len()
    }
}

/// Debug snapshot of a [`QuadTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadTreeDebugInfo {
    /// Nodes in the arena, interior and leaf.
    pub node_count: usize,
    /// Leaf nodes.
    pub leaf_count: usize,
    /// Depth of the deepest leaf.
    pub deepest_leaf: usize,
    /// Distinct identifiers stored.
    pub ids: usize,
    /// Entries across all leaves, counting duplicates of straddling entries.
    pub stored_entries: usize,
}

#[cfg(test)]
mod tests {
    use drawboard_geom::Aabb;

    use super::{QuadTree, QuadTreeOptions};
    use crate::SpatialIndex;

    fn tree(capacity: usize, max_depth: usize) -> QuadTree<u32, u32> {
        QuadTree::new(
            Aabb::new(0.0, 0.0, 100.0, 100.0),
            QuadTreeOptions {
                capacity,
                max_depth,
            },
        )
    }

    #[test]
    fn overflow_splits_once_into_quadrants() {
        let mut t = tree(4, 4);
        let boxes = [
            Aabb::new(10.0, 10.0, 5.0, 5.0),
            Aabb::new(20.0, 30.0, 5.0, 5.0),
            Aabb::new(60.0, 10.0, 5.0, 5.0),
            Aabb::new(10.0, 60.0, 5.0, 5.0),
            Aabb::new(70.0, 70.0, 5.0, 5.0),
        ];
        for (i, b) in (0_u32..).zip(boxes) {
            assert!(t.insert(i, b, i));
        }
        assert_eq!(t.node_count(), 5, "root plus four quadrants");
        for (i, b) in (0_u32..).zip(boxes) {
            let leaves = t.leaves_of(&i);
            assert_eq!(leaves.len(), 1, "entry {i} lives in exactly one quadrant");
            let region = t.node_region(leaves[0]).unwrap();
            assert!(region.contains(&b), "entry {i} is in the quadrant covering it");
            assert_eq!(t.node_depth(leaves[0]), Some(1));
        }
    }

    #[test]
    fn straddling_entry_is_stored_in_every_overlapped_child() {
        let mut t = tree(1, 4);
        t.insert(1, Aabb::new(5.0, 5.0, 1.0, 1.0), 1);
        t.insert(2, Aabb::new(40.0, 40.0, 20.0, 20.0), 2);
        assert_eq!(t.leaves_of(&2).len(), 4);
        let info = t.debug_info();
        assert_eq!(info.ids, 2);
        assert_eq!(info.stored_entries, 5);
        let hits = t.query(Aabb::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(hits.len(), 2, "duplicates are reported once");
    }

    #[test]
    fn max_depth_leaf_never_splits() {
        let mut t = tree(1, 0);
        for i in 0..10 {
            t.insert(i, Aabb::new(1.0, 1.0, 1.0, 1.0), i);
        }
        assert_eq!(t.node_count(), 1);
        assert_eq!(t.len(), 10);
    }

    #[test]
    fn outside_root_is_a_noop() {
        let mut t = tree(4, 4);
        assert!(!t.insert(1, Aabb::new(100.0, 0.0, 10.0, 10.0), 1));
        assert!(!t.insert(2, Aabb::new(-20.0, -20.0, 5.0, 5.0), 2));
        assert!(t.is_empty());
        assert_eq!(t.node_count(), 1);
    }

    #[test]
    fn remove_and_update_use_reverse_table() {
        let mut t = tree(1, 4);
        t.insert(1, Aabb::new(5.0, 5.0, 1.0, 1.0), 1);
        t.insert(2, Aabb::new(80.0, 80.0, 1.0, 1.0), 2);
        assert!(t.remove(&1));
        assert!(!t.remove(&1));
        assert!(t.leaves_of(&1).is_empty());
        assert!(t.query(Aabb::new(5.0, 5.0, 1.0, 1.0)).is_empty());

        assert!(t.update(2, Aabb::new(10.0, 80.0, 1.0, 1.0), 20));
        assert!(t.query(Aabb::new(80.0, 80.0, 1.0, 1.0)).is_empty());
        assert_eq!(t.query(Aabb::new(10.0, 80.0, 1.0, 1.0)).get(&2), Some(&20));
    }

    #[test]
    fn border_probe_is_answered() {
        let mut t = tree(1, 4);
        t.insert(1, Aabb::new(10.0, 10.0, 5.0, 5.0), 1);
        t.insert(2, Aabb::new(45.0, 45.0, 10.0, 10.0), 2);
        // A unit probe whose corner sits exactly on the center lines.
        let hits = t.query(Aabb::new(50.0, 50.0, 1.0, 1.0));
        assert!(hits.contains_key(&2));
    }

    #[test]
    fn part_outside_root_is_queryable() {
        let mut t: QuadTree<u32, u32> = QuadTree::new(
            Aabb::new(-5000.0, -5000.0, 10_000.0, 10_000.0),
            QuadTreeOptions {
                capacity: 1,
                max_depth: 4,
            },
        );
        assert!(t.insert(1, Aabb::new(4975.0, -25.0, 50.0, 50.0), 1));
        // Force splits so the entry ends up below the root.
        t.insert(2, Aabb::new(-4000.0, -4000.0, 10.0, 10.0), 2);
        t.insert(3, Aabb::new(4000.0, 4000.0, 10.0, 10.0), 3);
        assert!(t.node_count() > 1);

        assert!(t.query(Aabb::new(4990.0, 0.0, 1.0, 1.0)).contains_key(&1));
        assert!(t.query(Aabb::new(5010.0, 0.0, 1.0, 1.0)).contains_key(&1));
        assert!(t.query(Aabb::new(5030.0, 0.0, 1.0, 1.0)).is_empty());

        let leaf_content = t.node_content(t.leaves_of(&1)[0]);
        assert_eq!(leaf_content.map(|c| c.max_x()), Some(5025.0));
    }

    #[test]
    fn zero_width_box_on_split_line_is_kept() {
        let mut t: QuadTree<u32, u32> = QuadTree::new(
            Aabb::new(-100.0, -100.0, 200.0, 200.0),
            QuadTreeOptions {
                capacity: 1,
                max_depth: 4,
            },
        );
        // Stored in the root leaf, then redistributed by the split below.
        assert!(t.insert(1, Aabb::new(0.0, -10.0, 0.0, 20.0), 1));
        assert!(t.insert(2, Aabb::new(-80.0, -80.0, 5.0, 5.0), 2));
        assert!(t.node_count() > 1);
        // Inserted after the split.
        assert!(t.insert(3, Aabb::new(0.0, 40.0, 0.0, 10.0), 3));

        for id in [1, 2, 3] {
            assert!(t.contains(&id));
            assert!(!t.leaves_of(&id).is_empty(), "entry {id} has a leaf");
        }
        assert_eq!(t.len(), 3);
        assert!(t.query(Aabb::new(-0.5, 0.0, 1.0, 1.0)).contains_key(&1));
        assert!(t.query(Aabb::new(0.0, 45.0, 1.0, 1.0)).contains_key(&3));

        assert!(t.remove(&1));
        assert!(t.query(Aabb::new(-0.5, 0.0, 1.0, 1.0)).is_empty());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn clear_returns_to_single_leaf() {
        let mut t = tree(1, 4);
        for i in 0..20 {
            let f = f64::from(i);
            t.insert(i, Aabb::new(f * 4.0, f * 4.0, 2.0, 2.0), i);
        }
        assert!(t.node_count() > 1);
        t.clear();
        assert_eq!(t.node_count(), 1);
        assert!(t.is_empty());
        assert!(t.query(Aabb::new(0.0, 0.0, 100.0, 100.0)).is_empty());
    }
}
