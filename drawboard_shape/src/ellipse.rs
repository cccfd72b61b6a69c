// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drawboard_geom::{Aabb, Local};
use kurbo::{BezPath, Point, Shape as _};
use peniko::Color;

use crate::base::ShapeBase;
use crate::shape::{DEFAULT_FILL, Shape};

/// An ellipse centered on its local origin.
///
/// The corners of its bounding box are outside the ellipse, which the
/// pixel-exact hit test tells apart from the interior.
#[derive(Clone, Debug)]
pub struct Ellipse {
    base: ShapeBase,
    radius_x: f64,
    radius_y: f64,
    fill: Color,
}

impl Ellipse {
    /// An ellipse with the given radii at the world origin.
    #[must_use]
    pub fn new(radius_x: f64, radius_y: f64) -> Self {
        let (radius_x, radius_y) = (radius_x.abs(), radius_y.abs());
        Self {
            base: ShapeBase::new(Aabb::new(
                -radius_x,
                -radius_y,
                radius_x * 2.0,
                radius_y * 2.0,
            )),
            radius_x,
            radius_y,
            fill: DEFAULT_FILL,
        }
    }

    /// A circle of radius `r`.
    #[must_use]
    pub fn circle(r: f64) -> Self {
        Self::new(r, r)
    }

    /// Sets the fill.
    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Untransformed radii.
    #[must_use]
    pub fn radii(&self) -> (f64, f64) {
        (self.radius_x, self.radius_y)
    }
}

impl Shape for Ellipse {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn outline(&self) -> BezPath {
        kurbo::Ellipse::new(Point::ORIGIN, (self.radius_x, self.radius_y), 0.0).to_path(0.1)
    }

    fn fill(&self) -> Color {
        self.fill
    }

    fn kind(&self) -> &'static str {
        "ellipse"
    }
}
