// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawboard Index: spatial indexes over typed axis-aligned boxes.
//!
//! Two backends implement the [`SpatialIndex`] trait:
//! - [`QuadTree`]: a region quadtree over a fixed root region. Leaves split
//!   into four equal quadrants once they exceed their capacity, until a
//!   maximum depth is reached.
//! - [`FlatIndex`]: a linear scan. Small and simple; useful as a baseline and
//!   as a reference oracle for the quadtree.
//!
//! Every entry is an identifier `K`, its bounding box, and a payload `D`.
//!
//! ## Overlap policy
//!
//! An entry whose box straddles quadrant borders is stored in **every** child
//! it overlaps. This keeps queries simple (a border-straddling entry is never
//! missed) at the cost of duplicate storage. [`SpatialIndex::query`] therefore
//! returns a map keyed by identifier, so each entry is reported once.
//!
//! A reverse table maps each identifier to the leaves holding it, so removal
//! and update do not need to search the tree.
//!
//! ## Example
//!
//! ```rust
//! use drawboard_geom::{Aabb, World};
//! use drawboard_index::{QuadTree, QuadTreeOptions, SpatialIndex};
//!
//! let region = Aabb::<World>::new(-1000.0, -1000.0, 2000.0, 2000.0);
//! let mut tree: QuadTree<u32, &str> = QuadTree::new(region, QuadTreeOptions::default());
//!
//! assert!(tree.insert(1, Aabb::new(-5.0, -5.0, 10.0, 10.0), "straddles the center"));
//! assert!(tree.insert(2, Aabb::new(400.0, 400.0, 10.0, 10.0), "bottom right"));
//! // Entirely outside the root region: not stored.
//! assert!(!tree.insert(3, Aabb::new(5000.0, 0.0, 1.0, 1.0), "nowhere"));
//!
//! let hits = tree.query(Aabb::new(0.0, 0.0, 1.0, 1.0));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits.get(&1), Some(&"straddles the center"));
//! ```
//!
//! ## Intersection rules
//!
//! Routing entries into regions uses the strict [`Aabb::intersects`] test.
//! Queries prune and match with the inclusive [`Aabb::touches`] test, so a
//! probe sitting exactly on a region border is still answered.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`Aabb::intersects`]: drawboard_geom::Aabb::intersects
//! [`Aabb::touches`]: drawboard_geom::Aabb::touches

#![no_std]

extern crate alloc;

mod backend;
mod flat;
mod quadtree;

pub use backend::SpatialIndex;
pub use flat::FlatIndex;
pub use quadtree::{NodeId, QuadTree, QuadTreeDebugInfo, QuadTreeOptions};
