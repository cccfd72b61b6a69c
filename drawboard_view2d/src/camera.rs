// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drawboard_geom::{
    Aabb, AffineTransform2D, MIN_SCALE, Obb, View, ViewPoint, ViewVector, World, WorldPoint,
    WorldVector,
};
use kurbo::Size;

/// Initial configuration for a [`Camera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraOptions {
    /// Size of the rendering surface in view pixels.
    pub viewport: Size,
    /// Initial world units per view pixel.
    pub scale: f64,
    /// Initial world-space position of the view origin.
    pub translation: WorldPoint,
    /// Allowed `[min, max]` scale.
    pub scale_range: (f64, f64),
    /// Region the translation must stay within, per axis.
    pub world_bounding: Option<Aabb<World>>,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            scale: 1.0,
            translation: WorldPoint::ORIGIN,
            scale_range: (0.05, 20.0),
            world_bounding: None,
        }
    }
}

/// Pan/zoom camera over the world plane.
///
/// `Camera` tracks a world-space translation (where the view origin sits in
/// the world) and a uniform scale (world units per view pixel). It can be
/// used to:
/// - Convert points, vectors, and boxes between view and world space.
/// - Pan by world-space deltas, optionally bounded.
/// - Zoom about a view-space anchor.
#[derive(Clone, Debug)]
pub struct Camera {
    translation: WorldPoint,
    scale: f64,
    viewport: Size,
    min_scale: f64,
    max_scale: f64,
    world_bounding: Option<Aabb<World>>,
    view_to_world: AffineTransform2D<View, World>,
    world_to_view: AffineTransform2D<World, View>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraOptions::default())
    }
}

impl Camera {
    /// Creates a camera from `options`.
    ///
    /// The scale range is normalized as by [`Camera::set_scale_range`], the
    /// initial scale is clamped into it, and the initial translation is
    /// clamped into the world bounding if one is given.
    #[must_use]
    pub fn new(options: CameraOptions) -> Self {
        let mut camera = Self {
            translation: options.translation,
            scale: 1.0,
            viewport: options.viewport,
            min_scale: MIN_SCALE,
            max_scale: f64::MAX,
            world_bounding: None,
            view_to_world: AffineTransform2D::IDENTITY,
            world_to_view: AffineTransform2D::IDENTITY,
        };
        camera.set_scale_range(options.scale_range.0, options.scale_range.1);
        camera.scale = camera.clamp_scale(options.scale);
        camera.set_world_bounding(options.world_bounding);
        camera.rebuild_transforms();
        camera
    }

    /// World-space position of the view origin.
    #[must_use]
    pub fn translation(&self) -> WorldPoint {
        self.translation
    }

    /// World units per view pixel.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Size of the rendering surface in view pixels.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Allowed `(min, max)` scale.
    #[must_use]
    pub fn scale_range(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Region the translation is kept within, if any.
    #[must_use]
    pub fn world_bounding(&self) -> Option<Aabb<World>> {
        self.world_bounding
    }

    /// Cached view → world transform.
    #[must_use]
    pub fn view_to_world(&self) -> AffineTransform2D<View, World> {
        self.view_to_world
    }

    /// Cached world → view transform.
    #[must_use]
    pub fn world_to_view(&self) -> AffineTransform2D<World, View> {
        self.world_to_view
    }

    /// Sets the surface size. Translation and scale are unchanged.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Sets the allowed scale range.
    ///
    /// The range is normalized so that `min <= max`, `min` is floored at
    /// [`MIN_SCALE`], and the current scale is clamped into the new range.
    pub fn set_scale_range(&mut self, min: f64, max: f64) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_scale = if min.is_finite() { min.max(MIN_SCALE) } else { MIN_SCALE };
        self.max_scale = if max.is_nan() { f64::MAX } else { max.max(self.min_scale) };
        let clamped = self.clamp_scale(self.scale);
        if clamped != self.scale {
            self.scale = clamped;
            self.rebuild_transforms();
        }
    }

    /// Sets or clears the region the translation must stay within.
    ///
    /// A translation already outside the new bounding is moved to the nearest
    /// point inside it.
    pub fn set_world_bounding(&mut self, bounding: Option<Aabb<World>>) {
        self.world_bounding = bounding;
        if let Some(b) = bounding {
            let clamped = WorldPoint::new(
                self.translation.x.clamp(b.x, b.max_x()),
                self.translation.y.clamp(b.y, b.max_y()),
            );
            if clamped != self.translation {
                self.translation = clamped;
                self.rebuild_transforms();
            }
        }
    }

    /// Pans by a world-space delta.
    ///
    /// With a world bounding configured, each axis is checked on its own: an
    /// axis whose result would leave `[min, max]` of the bounding keeps its
    /// current value while the other axis still moves.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.set_translation(self.translation.x + dx, self.translation.y + dy);
    }

    /// Moves the view origin to an absolute world position, with the same
    /// per-axis bounding rules as [`Camera::translate`].
    pub fn set_translation(&mut self, x: f64, y: f64) {
        let mut next = self.translation;
        if x.is_finite() && self.axis_allowed(x, |b| (b.x, b.max_x())) {
            next.x = x;
        }
        if y.is_finite() && self.axis_allowed(y, |b| (b.y, b.max_y())) {
            next.y = y;
        }
        if next != self.translation {
            self.translation = next;
            self.rebuild_transforms();
        }
    }

    /// Multiplies the scale by `rate`, clamping the result into the scale
    /// range.
    ///
    /// Non-positive and non-finite rates are ignored. At a range bound,
    /// further calls pushing past it leave the camera unchanged.
    pub fn scale(&mut self, rate: f64) {
        if !(rate.is_finite() && rate > 0.0) {
            return;
        }
        let next = self.clamp_scale(self.scale * rate);
        if next == self.scale {
            return;
        }
        self.scale = next;
        self.rebuild_transforms();
    }

    /// Zooms by `rate` about a view-space anchor.
    ///
    /// `rate > 1` zooms in. The world point under `anchor` is kept under it
    /// unless the pan needed to do so is refused by the world bounding.
    pub fn zoom(&mut self, rate: f64, anchor: ViewPoint) {
        if !(rate.is_finite() && rate > 0.0) {
            return;
        }
        let before = self.to_world_point(anchor);
        self.scale(1.0 / rate);
        let after = self.to_world_point(anchor);
        let delta = before - after;
        if !delta.is_zero() {
            self.translate(delta.x, delta.y);
        }
    }

    /// Pans so that `world` appears at the center of the viewport.
    pub fn center_on(&mut self, world: WorldPoint) {
        let half = WorldVector::new(
            self.viewport.width * 0.5 * self.scale,
            self.viewport.height * 0.5 * self.scale,
        );
        let origin = world - half;
        self.set_translation(origin.x, origin.y);
    }

    /// Converts a view-space point into world space.
    #[must_use]
    pub fn to_world_point(&self, p: ViewPoint) -> WorldPoint {
        self.view_to_world.apply_to_point(p)
    }

    /// Converts a world-space point into view space.
    #[must_use]
    pub fn to_view_point(&self, p: WorldPoint) -> ViewPoint {
        self.world_to_view.apply_to_point(p)
    }

    /// Converts a view-space displacement into world space.
    #[must_use]
    pub fn to_world_vector(&self, v: ViewVector) -> WorldVector {
        self.view_to_world.apply_to_vector(v)
    }

    /// Converts a world-space displacement into view space.
    #[must_use]
    pub fn to_view_vector(&self, v: WorldVector) -> ViewVector {
        self.world_to_view.apply_to_vector(v)
    }

    /// Converts a view-space box into world space.
    ///
    /// The origin is transformed and the extents are scaled by the matrix
    /// diagonal; exact because the camera never rotates.
    #[must_use]
    pub fn to_world_aabb(&self, aabb: Aabb<View>) -> Aabb<World> {
        let origin = self.view_to_world.apply_to_point(aabb.origin());
        Aabb::new(
            origin.x,
            origin.y,
            aabb.width * self.view_to_world.scale_x(),
            aabb.height * self.view_to_world.scale_y(),
        )
    }

    /// Converts a world-space box into view space.
    #[must_use]
    pub fn to_view_aabb(&self, aabb: Aabb<World>) -> Aabb<View> {
        let origin = self.world_to_view.apply_to_point(aabb.origin());
        Aabb::new(
            origin.x,
            origin.y,
            aabb.width * self.world_to_view.scale_x(),
            aabb.height * self.world_to_view.scale_y(),
        )
    }

    /// Converts a view-space oriented box into world space; rotation is kept.
    #[must_use]
    pub fn to_world_obb(&self, obb: Obb<View>) -> Obb<World> {
        Obb::from_aabb(self.to_world_aabb(obb.unrotated_aabb()), obb.rotation)
    }

    /// Converts a world-space oriented box into view space; rotation is kept.
    #[must_use]
    pub fn to_view_obb(&self, obb: Obb<World>) -> Obb<View> {
        Obb::from_aabb(self.to_view_aabb(obb.unrotated_aabb()), obb.rotation)
    }

    /// World-space region currently visible through the viewport.
    #[must_use]
    pub fn visible_world_aabb(&self) -> Aabb<World> {
        self.to_world_aabb(Aabb::new(
            0.0,
            0.0,
            self.viewport.width,
            self.viewport.height,
        ))
    }

    /// Snapshot of the current camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CameraDebugInfo {
        CameraDebugInfo {
            viewport: self.viewport,
            translation: self.translation,
            scale: self.scale,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            world_bounding: self.world_bounding,
            visible_world_aabb: self.visible_world_aabb(),
        }
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    fn axis_allowed(&self, value: f64, range: impl Fn(&Aabb<World>) -> (f64, f64)) -> bool {
        match &self.world_bounding {
            Some(b) => {
                let (lo, hi) = range(b);
                value >= lo && value <= hi
            }
            None => true,
        }
    }

    fn rebuild_transforms(&mut self) {
        let t = self.translation.to_vector();
        self.view_to_world = AffineTransform2D::<World, World>::translate(t.x, t.y)
            .compose(AffineTransform2D::<View, World>::scale_uniform(self.scale));
        // `scale` is never below MIN_SCALE, so the inverse exists.
        let inverse = self.view_to_world.invert();
        debug_assert!(inverse.is_ok(), "camera scale {} is not invertible", self.scale);
        if let Ok(inverse) = inverse {
            self.world_to_view = inverse;
        }
    }
}

/// Debug snapshot of a [`Camera`] state.
#[derive(Clone, Copy, Debug)]
pub struct CameraDebugInfo {
    /// Surface size in view pixels.
    pub viewport: Size,
    /// World-space position of the view origin.
    pub translation: WorldPoint,
    /// World units per view pixel.
    pub scale: f64,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// Optional bounding for the translation.
    pub world_bounding: Option<Aabb<World>>,
    /// World-space region visible through the viewport.
    pub visible_world_aabb: Aabb<World>,
}

#[cfg(test)]
mod tests {
    use drawboard_geom::{Aabb, Obb, ViewPoint, WorldPoint};
    use kurbo::Size;

    use super::{Camera, CameraOptions};

    fn centered_camera() -> Camera {
        let mut camera = Camera::new(CameraOptions {
            viewport: Size::new(800.0, 600.0),
            ..CameraOptions::default()
        });
        camera.translate(-400.0, -300.0);
        camera
    }

    #[test]
    fn world_to_view_inverts_view_to_world() {
        let mut camera = centered_camera();
        camera.scale(0.37);
        camera.translate(-123.5, 77.25);
        let composed = camera.world_to_view().compose(camera.view_to_world());
        let [a, b, c, d, e, f] = composed.coefficients();
        for (got, want) in [(a, 1.0), (b, 0.0), (c, 0.0), (d, 1.0), (e, 0.0), (f, 0.0)] {
            assert!((got - want).abs() < 1e-9, "{:?}", composed.coefficients());
        }
    }

    #[test]
    fn basic_world_view_roundtrip() {
        let mut camera = centered_camera();
        camera.scale(0.5);
        let world_pt = WorldPoint::new(10.0, -5.0);
        let view_pt = camera.to_view_point(world_pt);
        let world_back = camera.to_world_point(view_pt);
        assert!(world_back.approx_eq(world_pt, 1e-9), "got {world_back:?}");
    }

    #[test]
    fn view_center_maps_to_world_origin() {
        let camera = centered_camera();
        let p = camera.to_world_point(ViewPoint::new(400.0, 300.0));
        assert!(p.approx_eq(WorldPoint::ORIGIN, 1e-12), "got {p:?}");
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut camera = centered_camera();
        let anchor = ViewPoint::new(123.0, 456.0);
        let before = camera.to_world_point(anchor);
        camera.zoom(2.0, anchor);
        assert!((camera.scale_factor() - 0.5).abs() < 1e-12);
        let after = camera.to_world_point(anchor);
        assert!(after.approx_eq(before, 1e-9), "{before:?} vs {after:?}");
    }

    #[test]
    fn scale_clamps_at_range_bounds() {
        let mut camera = Camera::new(CameraOptions {
            scale_range: (0.5, 4.0),
            ..CameraOptions::default()
        });
        camera.scale(100.0);
        assert_eq!(camera.scale_factor(), 4.0);
        let snapshot = camera.debug_info();
        camera.scale(2.0);
        assert_eq!(camera.scale_factor(), 4.0);
        assert_eq!(camera.translation(), snapshot.translation);
        camera.scale(0.001);
        assert_eq!(camera.scale_factor(), 0.5);
    }

    #[test]
    fn scale_range_is_normalized() {
        let mut camera = Camera::default();
        camera.set_scale_range(8.0, 2.0);
        assert_eq!(camera.scale_range(), (2.0, 8.0));
        assert_eq!(camera.scale_factor(), 2.0);
        camera.set_scale_range(-1.0, 0.0);
        assert!(camera.scale_range().0 > 0.0);
    }

    #[test]
    fn invalid_rates_are_ignored() {
        let mut camera = Camera::default();
        camera.scale(0.0);
        camera.scale(-2.0);
        camera.scale(f64::NAN);
        camera.zoom(f64::INFINITY, ViewPoint::ORIGIN);
        assert_eq!(camera.scale_factor(), 1.0);
    }

    #[test]
    fn aabb_conversion_scales_extents() {
        let mut camera = centered_camera();
        camera.scale(2.0);
        let view = Aabb::new(400.0, 300.0, 10.0, 20.0);
        let world = camera.to_world_aabb(view);
        assert!((world.width - 20.0).abs() < 1e-12);
        assert!((world.height - 40.0).abs() < 1e-12);
        let back = camera.to_view_aabb(world);
        assert!((back.x - view.x).abs() < 1e-9 && (back.height - view.height).abs() < 1e-9);
    }

    #[test]
    fn obb_conversion_keeps_rotation_and_center() {
        let mut camera = centered_camera();
        camera.scale(0.25);
        let obb = Obb::new(ViewPoint::new(410.0, 290.0), 40.0, 8.0, 33.0);
        let world = camera.to_world_obb(obb);
        assert_eq!(world.rotation, 33.0);
        assert!((world.width - 10.0).abs() < 1e-12);
        let expected = camera.to_world_point(obb.center);
        assert!(world.center.approx_eq(expected, 1e-9));
    }

    #[test]
    fn center_on_moves_world_point_to_view_center() {
        let mut camera = Camera::default();
        camera.scale(2.0);
        camera.center_on(WorldPoint::new(50.0, -75.0));
        let center = camera.to_view_point(WorldPoint::new(50.0, -75.0));
        assert!(center.approx_eq(ViewPoint::new(400.0, 300.0), 1e-9));
    }

    #[test]
    fn setting_bounding_pulls_translation_inside() {
        let mut camera = Camera::default();
        camera.translate(500.0, -500.0);
        camera.set_world_bounding(Some(Aabb::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(camera.translation(), WorldPoint::new(100.0, 0.0));
    }
}
