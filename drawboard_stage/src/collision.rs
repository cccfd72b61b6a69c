// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cmp::Reverse;

use drawboard_geom::{Aabb, ViewPoint, World, WorldPoint};
use drawboard_index::{QuadTree, QuadTreeOptions, SpatialIndex};
use drawboard_raster::PixelProbe;
use drawboard_shape::{Shape, ShapeId};
use drawboard_view2d::Camera;
use tracing::trace;

/// Result of [`CollisionDetector::hit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitOutcome {
    /// Topmost shape covering the probed pixel.
    pub hit: Option<ShapeId>,
    /// Shapes returned by the broad phase.
    pub candidates: usize,
}

/// Two-phase point hit tester.
///
/// The broad phase asks a quadtree of world-space AABBs which shapes could
/// cover the probed world pixel. The narrow phase renders each candidate alone
/// and samples the pixel under the pointer, so transparent parts of a shape's
/// bounding box never hit. Each indexed entry carries its stacking order;
/// candidates are tested topmost first and the first covering shape wins.
#[derive(Debug)]
pub struct CollisionDetector {
    index: QuadTree<ShapeId, u64>,
    probe: PixelProbe,
}

impl CollisionDetector {
    /// A detector whose index covers `world_bounding`.
    #[must_use]
    pub fn new(world_bounding: Aabb<World>, options: QuadTreeOptions) -> Self {
        Self {
            index: QuadTree::new(world_bounding, options),
            probe: PixelProbe::new(),
        }
    }

    /// Region covered by the index.
    #[must_use]
    pub fn world_bounding(&self) -> Aabb<World> {
        self.index.region()
    }

    /// The broad-phase index.
    #[must_use]
    pub fn index(&self) -> &QuadTree<ShapeId, u64> {
        &self.index
    }

    /// The narrow-phase probe.
    #[must_use]
    pub fn probe(&self) -> &PixelProbe {
        &self.probe
    }

    /// Indexes `id` with its bounds and stacking order, replacing any previous
    /// entry. Returns `false` when `aabb` lies outside the world bounding.
    pub fn insert(&mut self, id: ShapeId, aabb: Aabb<World>, z: u64) -> bool {
        self.index.insert(id, aabb, z)
    }

    /// Drops `id` from the index.
    pub fn remove(&mut self, id: &ShapeId) -> bool {
        self.index.remove(id)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Drops every entry and moves the index to `world_bounding`.
    pub fn reset_region(&mut self, world_bounding: Aabb<World>) {
        self.index.reset_region(world_bounding);
    }

    /// Shapes whose bounds touch `aabb`, topmost first.
    #[must_use]
    pub fn query(&self, aabb: Aabb<World>) -> Vec<(ShapeId, u64)> {
        let mut found: Vec<_> = self.index.query(aabb).into_iter().collect();
        found.sort_unstable_by_key(|&(_, z)| Reverse(z));
        found
    }

    /// Broad phase: shapes whose bounds touch the unit world box at the
    /// floored `world` point, topmost first.
    #[must_use]
    pub fn candidates(&self, world: WorldPoint) -> Vec<(ShapeId, u64)> {
        let cell = world.floor();
        self.query(Aabb::new(cell.x, cell.y, 1.0, 1.0))
    }

    /// Finds the topmost shape painting the pixel under `view`.
    ///
    /// `resolve` maps candidate identifiers to shapes; identifiers it cannot
    /// resolve are skipped.
    pub fn hit<'s>(
        &mut self,
        camera: &Camera,
        view: ViewPoint,
        mut resolve: impl FnMut(&ShapeId) -> Option<&'s dyn Shape>,
    ) -> HitOutcome {
        let world = camera.to_world_point(view);
        let candidates = self.candidates(world);
        trace!(?world, candidates = candidates.len(), "broad phase");
        let hit = candidates.iter().find_map(|(id, _)| {
            let shape = resolve(id)?;
            self.probe.covers(shape, camera, view).then_some(*id)
        });
        trace!(?hit, "narrow phase");
        HitOutcome {
            hit,
            candidates: candidates.len(),
        }
    }
}
