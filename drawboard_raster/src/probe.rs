// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drawboard_geom::ViewPoint;
use drawboard_shape::Shape;
use drawboard_view2d::Camera;

use crate::surface::RasterSurface;

/// Pixel-exact coverage test for a single shape.
///
/// The shape is rendered alone into an off-screen surface the size of the
/// camera viewport and the pixel under the probe point is sampled; any
/// non-zero alpha counts as covered. The surface is kept between probes and
/// only reallocated when the viewport size changes.
#[derive(Debug, Default)]
pub struct PixelProbe {
    surface: Option<RasterSurface>,
    allocations: usize,
}

impl PixelProbe {
    /// A probe with no surface allocated yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `shape`, seen through `camera`, paints the pixel
    /// containing `at`.
    ///
    /// Points outside the viewport never hit.
    pub fn covers(&mut self, shape: &dyn Shape, camera: &Camera, at: ViewPoint) -> bool {
        let pixel = at.floor();
        let (w, h) = RasterSurface::dimensions_for(camera.viewport());
        if !(pixel.x >= 0.0
            && pixel.y >= 0.0
            && pixel.x < f64::from(w)
            && pixel.y < f64::from(h))
        {
            return false;
        }
        let surface = self.surface_for(w, h);
        surface.reset();
        shape.render_into(surface, camera);
        surface.finish();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "pixel is an integral value inside the u16 surface bounds"
        )]
        let (x, y) = (pixel.x as i64, pixel.y as i64);
        surface.alpha_at(x, y).is_some_and(|a| a > 0)
    }

    /// Number of times a surface has been allocated.
    #[must_use]
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Drops the pooled surface.
    pub fn release(&mut self) {
        self.surface = None;
    }

    fn surface_for(&mut self, width: u16, height: u16) -> &mut RasterSurface {
        let reusable = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width() == width && s.height() == height);
        if !reusable {
            self.allocations += 1;
            self.surface = Some(RasterSurface::new(width, height));
        }
        self.surface.get_or_insert_with(|| RasterSurface::new(width, height))
    }
}
