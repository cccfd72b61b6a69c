// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drawboard_geom::{
    Aabb, AffineTransform2D, Local, MIN_SCALE, Obb, SingularMatrixError, World, WorldPoint,
};

use crate::id::ShapeId;

/// Per-axis scale factors of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaling {
    /// Scale along the local x axis.
    pub x: f64,
    /// Scale along the local y axis.
    pub y: f64,
}

impl Scaling {
    /// No scaling.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };
}

impl Default for Scaling {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// State shared by every shape: identity, transform, and cached bounds.
///
/// Relative mutators (`translate`, `rotate`, `scale`) are expressed through
/// their absolute counterparts, which recompute the matrix and both bounding
/// boxes exactly once.
#[derive(Clone, Debug)]
pub struct ShapeBase {
    id: ShapeId,
    local_extents: Aabb<Local>,
    translation: WorldPoint,
    rotation: f64,
    scaling: Scaling,
    matrix: AffineTransform2D<Local, World>,
    aabb: Aabb<World>,
    obb: Obb<World>,
}

impl ShapeBase {
    /// State for a new shape with a fresh identifier whose local geometry
    /// spans `local_extents`.
    #[must_use]
    pub fn new(local_extents: Aabb<Local>) -> Self {
        Self::with_id(ShapeId::new(), local_extents)
    }

    /// Like [`ShapeBase::new`] with a caller-chosen identifier.
    #[must_use]
    pub fn with_id(id: ShapeId, local_extents: Aabb<Local>) -> Self {
        let mut base = Self {
            id,
            local_extents,
            translation: WorldPoint::ORIGIN,
            rotation: 0.0,
            scaling: Scaling::IDENTITY,
            matrix: AffineTransform2D::IDENTITY,
            aabb: Aabb::default(),
            obb: Obb::default(),
        };
        base.refresh();
        base
    }

    /// Identifier; fixed for the lifetime of the shape.
    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Extents of the untransformed geometry.
    #[must_use]
    pub fn local_extents(&self) -> Aabb<Local> {
        self.local_extents
    }

    /// World-space translation.
    #[must_use]
    pub fn translation(&self) -> WorldPoint {
        self.translation
    }

    /// Rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Per-axis scale.
    #[must_use]
    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// Local → world transform, `translate ∘ rotate ∘ scale`.
    #[must_use]
    pub fn transform_matrix(&self) -> AffineTransform2D<Local, World> {
        self.matrix
    }

    /// Cached world-space axis-aligned bounds.
    #[must_use]
    pub fn aabb(&self) -> Aabb<World> {
        self.aabb
    }

    /// Cached world-space oriented bounds.
    #[must_use]
    pub fn obb(&self) -> Obb<World> {
        self.obb
    }

    /// Replaces the local geometry extents, for shapes whose size changed.
    pub fn set_local_extents(&mut self, local_extents: Aabb<Local>) {
        self.local_extents = local_extents;
        self.refresh();
    }

    /// Moves by a world-space delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.translate_to(self.translation.x + dx, self.translation.y + dy);
    }

    /// Moves to an absolute world position.
    pub fn translate_to(&mut self, x: f64, y: f64) {
        self.translation = WorldPoint::new(x, y);
        self.refresh();
    }

    /// Rotates by `delta` degrees.
    pub fn rotate(&mut self, delta: f64) {
        self.rotate_to(self.rotation + delta);
    }

    /// Sets the rotation in degrees. The value is kept as given.
    pub fn rotate_to(&mut self, degrees: f64) {
        self.rotation = degrees;
        self.refresh();
    }

    /// Multiplies the current scale per axis.
    pub fn scale(&mut self, fx: f64, fy: f64) -> Result<(), SingularMatrixError> {
        self.scale_to(self.scaling.x * fx, self.scaling.y * fy)
    }

    /// Sets the scale per axis.
    ///
    /// Factors that are not finite or whose magnitude is below [`MIN_SCALE`]
    /// would collapse the shape; they are refused and nothing changes.
    pub fn scale_to(&mut self, sx: f64, sy: f64) -> Result<(), SingularMatrixError> {
        let usable = |s: f64| s.is_finite() && s.abs() >= MIN_SCALE;
        if !(usable(sx) && usable(sy)) {
            return Err(SingularMatrixError {
                determinant: sx * sy,
            });
        }
        self.scaling = Scaling { x: sx, y: sy };
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        let t = self.translation;
        self.matrix = AffineTransform2D::<Local, World>::translate(t.x, t.y)
            .compose(AffineTransform2D::<Local, Local>::rotate_degrees(self.rotation))
            .compose(AffineTransform2D::<Local, Local>::scale(
                self.scaling.x,
                self.scaling.y,
            ));
        self.aabb = self.matrix.apply_to_aabb(self.local_extents);
        self.obb = Obb::new(
            self.matrix.apply_to_point(self.local_extents.center()),
            self.local_extents.width * self.scaling.x.abs(),
            self.local_extents.height * self.scaling.y.abs(),
            self.rotation,
        );
    }
}
