// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use drawboard_geom::{Aabb, Obb, View, ViewPoint, World};
use drawboard_index::{QuadTreeDebugInfo, QuadTreeOptions};
use drawboard_shape::{Shape, ShapeId, Surface};
use drawboard_view2d::{Camera, CameraDebugInfo, CameraOptions};
use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::collision::CollisionDetector;
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::StageError;

/// Configuration for a [`Stage`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageOptions {
    /// Initial camera.
    pub camera: CameraOptions,
    /// World region covered by the spatial index.
    pub world_bounding: Aabb<World>,
    /// Spatial index tuning.
    pub index: QuadTreeOptions,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            camera: CameraOptions::default(),
            world_bounding: Aabb::new(-5000.0, -5000.0, 10_000.0, 10_000.0),
            index: QuadTreeOptions::default(),
        }
    }
}

struct StageEntry {
    shape: Box<dyn Shape>,
    z: u64,
}

/// Owner of the shapes, the camera, and the hit tester.
///
/// Every shape mutation goes through the stage so the spatial index is kept
/// in step with the shapes' bounds. Shapes are drawn and hit-tested in
/// stacking order: a shape added later sits above every shape added before
/// it.
pub struct Stage {
    shapes: HashMap<ShapeId, StageEntry>,
    next_z: u64,
    camera: Camera,
    detector: CollisionDetector,
    diagnostics: Option<Box<dyn DiagnosticsSink>>,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("shapes", &self.shapes.len())
            .field("camera", &self.camera)
            .field("detector", &self.detector)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageOptions::default())
    }
}

impl Stage {
    /// An empty stage.
    #[must_use]
    pub fn new(options: StageOptions) -> Self {
        Self {
            shapes: HashMap::new(),
            next_z: 0,
            camera: Camera::new(options.camera),
            detector: CollisionDetector::new(options.world_bounding, options.index),
            diagnostics: None,
        }
    }

    /// Routes [`Diagnostic`] records to `sink`, replacing any previous sink.
    pub fn set_diagnostics(&mut self, sink: impl DiagnosticsSink + 'static) {
        self.diagnostics = Some(Box::new(sink));
    }

    /// Stops emitting diagnostics.
    pub fn clear_diagnostics(&mut self) {
        self.diagnostics = None;
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The camera, mutably. Camera changes never touch the index, which is in
    /// world space.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// World region covered by the spatial index.
    #[must_use]
    pub fn world_bounding(&self) -> Aabb<World> {
        self.detector.world_bounding()
    }

    /// The hit tester.
    #[must_use]
    pub fn collision_detector(&self) -> &CollisionDetector {
        &self.detector
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the stage holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Returns `true` if the stage owns `id`.
    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Takes ownership of `shape` and places it above every existing shape.
    ///
    /// A shape whose bounds fall outside the world bounding is kept and drawn
    /// but cannot be hit until it moves back inside.
    pub fn add_shape(&mut self, shape: impl Shape + 'static) -> ShapeId {
        self.add_boxed(Box::new(shape))
    }

    /// Like [`Stage::add_shape`] for an already boxed shape.
    pub fn add_boxed(&mut self, shape: Box<dyn Shape>) -> ShapeId {
        let id = shape.id();
        let z = self.next_z;
        self.next_z += 1;
        let aabb = shape.aabb();
        let kind = shape.kind();
        if self.shapes.insert(id, StageEntry { shape, z }).is_some() {
            warn!(%id, "replaced a shape with the same identifier");
        }
        let indexed = self.detector.insert(id, aabb, z);
        if indexed {
            debug!(%id, kind, z, "shape added");
        } else {
            warn!(%id, kind, ?aabb, "shape added outside the world bounding");
        }
        self.emit(&Diagnostic::ShapeAdded { id, indexed });
        id
    }

    /// The shape with identifier `id`.
    #[must_use]
    pub fn get_shape(&self, id: &ShapeId) -> Option<&dyn Shape> {
        self.shapes.get(id).map(|e| e.shape.as_ref() as &dyn Shape)
    }

    /// Stacking order of `id`; higher is drawn later.
    #[must_use]
    pub fn z_order(&self, id: &ShapeId) -> Option<u64> {
        self.shapes.get(id).map(|e| e.z)
    }

    /// Shapes from bottom to top.
    pub fn shapes(&self) -> impl Iterator<Item = &dyn Shape> + '_ {
        let mut entries: Vec<&StageEntry> = self.shapes.values().collect();
        entries.sort_unstable_by_key(|e| e.z);
        entries
            .into_iter()
            .map(|e| e.shape.as_ref() as &dyn Shape)
    }

    /// Removes `id` and hands the shape back.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Result<Box<dyn Shape>, StageError> {
        let entry = self.shapes.remove(id).ok_or(StageError::NotFound(*id))?;
        self.detector.remove(id);
        debug!(%id, "shape removed");
        self.emit(&Diagnostic::ShapeRemoved { id: *id });
        Ok(entry.shape)
    }

    /// Runs `f` on the shape and re-indexes it afterwards.
    pub fn update_shape<R>(
        &mut self,
        id: &ShapeId,
        f: impl FnOnce(&mut dyn Shape) -> R,
    ) -> Result<R, StageError> {
        let entry = self.shapes.get_mut(id).ok_or(StageError::NotFound(*id))?;
        let out = f(entry.shape.as_mut());
        let (aabb, z) = (entry.shape.aabb(), entry.z);
        if !self.detector.insert(*id, aabb, z) {
            // `insert` refused the new bounds; make sure no stale entry lingers.
            self.detector.remove(id);
            warn!(%id, ?aabb, "shape moved outside the world bounding");
        }
        Ok(out)
    }

    /// Moves a shape by a world-space delta.
    pub fn translate_shape(&mut self, id: &ShapeId, dx: f64, dy: f64) -> Result<(), StageError> {
        self.update_shape(id, |s| s.translate(dx, dy))
    }

    /// Moves a shape to an absolute world position.
    pub fn translate_shape_to(&mut self, id: &ShapeId, x: f64, y: f64) -> Result<(), StageError> {
        self.update_shape(id, |s| s.translate_to(x, y))
    }

    /// Rotates a shape by `delta` degrees.
    pub fn rotate_shape(&mut self, id: &ShapeId, delta: f64) -> Result<(), StageError> {
        self.update_shape(id, |s| s.rotate(delta))
    }

    /// Sets a shape's rotation in degrees.
    pub fn rotate_shape_to(&mut self, id: &ShapeId, degrees: f64) -> Result<(), StageError> {
        self.update_shape(id, |s| s.rotate_to(degrees))
    }

    /// Multiplies a shape's scale per axis.
    pub fn scale_shape(&mut self, id: &ShapeId, fx: f64, fy: f64) -> Result<(), StageError> {
        self.update_shape(id, |s| s.scale(fx, fy))?
            .map_err(StageError::from)
    }

    /// Sets a shape's scale per axis.
    pub fn scale_shape_to(&mut self, id: &ShapeId, sx: f64, sy: f64) -> Result<(), StageError> {
        self.update_shape(id, |s| s.scale_to(sx, sy))?
            .map_err(StageError::from)
    }

    /// Writes back an oriented box edited in view space, such as one dragged
    /// by a transform-handle widget.
    ///
    /// The box is converted to world space; the shape is then scaled by the
    /// ratio of the new extents to its current ones, rotated to the box
    /// rotation, and moved to the box center. A degenerate box is refused
    /// before anything changes.
    pub fn apply_view_obb(&mut self, id: &ShapeId, view_obb: Obb<View>) -> Result<(), StageError> {
        let target = self.camera.to_world_obb(view_obb);
        self.update_shape(id, |s| -> Result<(), StageError> {
            let current = s.obb();
            s.scale(target.width / current.width, target.height / current.height)?;
            s.rotate_to(target.rotation);
            s.translate_to(target.center.x, target.center.y);
            Ok(())
        })?
    }

    /// Shapes whose bounds touch `aabb`, topmost first.
    #[must_use]
    pub fn query(&self, aabb: Aabb<World>) -> Vec<ShapeId> {
        self.detector
            .query(aabb)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// Topmost shape painting the pixel under `view`, if any.
    pub fn hit(&mut self, view: ViewPoint) -> Option<ShapeId> {
        let shapes = &self.shapes;
        let outcome = self.detector.hit(&self.camera, view, |id| {
            shapes.get(id).map(|e| e.shape.as_ref() as &dyn Shape)
        });
        let at = self.camera.to_world_point(view);
        self.emit(&Diagnostic::HitTest {
            at,
            candidates: outcome.candidates,
            hit: outcome.hit,
        });
        outcome.hit
    }

    /// Re-indexes every shape from scratch.
    pub fn rebuild_index(&mut self) {
        self.detector.clear();
        let mut indexed = 0;
        for (id, entry) in &self.shapes {
            if self.detector.insert(*id, entry.shape.aabb(), entry.z) {
                indexed += 1;
            }
        }
        let shapes = self.shapes.len();
        debug!(shapes, indexed, "index rebuilt");
        self.emit(&Diagnostic::IndexRebuilt { shapes, indexed });
    }

    /// Moves the index to a new world region and re-indexes every shape.
    pub fn set_world_bounding(&mut self, world_bounding: Aabb<World>) {
        debug!(?world_bounding, "world bounding changed");
        self.detector.reset_region(world_bounding);
        self.rebuild_index();
    }

    /// Paints every shape, bottom to top, through the camera.
    pub fn render(&self, surface: &mut dyn Surface) {
        for shape in self.shapes() {
            shape.render_into(surface, &self.camera);
        }
    }

    /// Snapshot of the stage for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> StageDebugInfo {
        StageDebugInfo {
            shapes: self.shapes.len(),
            camera: self.camera.debug_info(),
            index: self.detector.index().debug_info(),
            probe_allocations: self.detector.probe().allocations(),
        }
    }

    fn emit(&mut self, diagnostic: &Diagnostic) {
        if let Some(sink) = self.diagnostics.as_mut() {
            sink.record(diagnostic);
        }
    }
}

/// Debug snapshot of a [`Stage`].
#[derive(Clone, Copy, Debug)]
pub struct StageDebugInfo {
    /// Shapes owned.
    pub shapes: usize,
    /// Camera state.
    pub camera: CameraDebugInfo,
    /// Spatial index shape.
    pub index: QuadTreeDebugInfo,
    /// Off-screen surfaces allocated by the hit tester so far.
    pub probe_allocations: usize,
}
