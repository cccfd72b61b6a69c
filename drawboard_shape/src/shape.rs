// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use drawboard_geom::{
    Aabb, AffineTransform2D, Local, Obb, SingularMatrixError, View, World, WorldPoint,
};
use drawboard_view2d::Camera;
use kurbo::BezPath;
use peniko::Color;

use crate::base::{Scaling, ShapeBase};
use crate::id::ShapeId;

/// Fill used by shapes that are not given one.
pub const DEFAULT_FILL: Color = Color::from_rgba8(0x00, 0x89, 0xff, 0xff);

/// A target shapes can paint themselves into.
pub trait Surface {
    /// Fills `path`, given in local shape space, after mapping it through
    /// `transform` into view space.
    fn fill_path(&mut self, transform: AffineTransform2D<Local, View>, path: &BezPath, color: Color);
}

/// A transformable shape on the board.
///
/// Implementors provide their geometry and paint; identity, transform, and
/// bounds come from the embedded [`ShapeBase`].
pub trait Shape: Debug {
    /// Shared transform state.
    fn base(&self) -> &ShapeBase;

    /// Shared transform state, mutably.
    fn base_mut(&mut self) -> &mut ShapeBase;

    /// Geometry in local space.
    fn outline(&self) -> BezPath;

    /// Paint used to fill the outline.
    fn fill(&self) -> Color;

    /// Short type name for logs and diagnostics.
    fn kind(&self) -> &'static str;

    /// Identifier.
    fn id(&self) -> ShapeId {
        self.base().id()
    }

    /// Extents of the untransformed geometry.
    fn local_extents(&self) -> Aabb<Local> {
        self.base().local_extents()
    }

    /// World-space translation.
    fn translation(&self) -> WorldPoint {
        self.base().translation()
    }

    /// Rotation in degrees.
    fn rotation(&self) -> f64 {
        self.base().rotation()
    }

    /// Per-axis scale.
    fn scaling(&self) -> Scaling {
        self.base().scaling()
    }

    /// Local → world transform.
    fn transform_matrix(&self) -> AffineTransform2D<Local, World> {
        self.base().transform_matrix()
    }

    /// World-space axis-aligned bounds.
    fn aabb(&self) -> Aabb<World> {
        self.base().aabb()
    }

    /// World-space oriented bounds.
    fn obb(&self) -> Obb<World> {
        self.base().obb()
    }

    /// Moves by a world-space delta.
    fn translate(&mut self, dx: f64, dy: f64) {
        self.base_mut().translate(dx, dy);
    }

    /// Moves to an absolute world position.
    fn translate_to(&mut self, x: f64, y: f64) {
        self.base_mut().translate_to(x, y);
    }

    /// Rotates by `delta` degrees.
    fn rotate(&mut self, delta: f64) {
        self.base_mut().rotate(delta);
    }

    /// Sets the rotation in degrees.
    fn rotate_to(&mut self, degrees: f64) {
        self.base_mut().rotate_to(degrees);
    }

    /// Multiplies the current scale per axis.
    fn scale(&mut self, fx: f64, fy: f64) -> Result<(), SingularMatrixError> {
        self.base_mut().scale(fx, fy)
    }

    /// Sets the scale per axis.
    fn scale_to(&mut self, sx: f64, sy: f64) -> Result<(), SingularMatrixError> {
        self.base_mut().scale_to(sx, sy)
    }

    /// Paints the shape as seen through `camera`.
    fn render_into(&self, surface: &mut dyn Surface, camera: &Camera) {
        let transform = camera.world_to_view().compose(self.transform_matrix());
        surface.fill_path(transform, &self.outline(), self.fill());
    }
}
