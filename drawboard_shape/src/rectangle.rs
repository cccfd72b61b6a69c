// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drawboard_geom::{Aabb, Local};
use kurbo::{BezPath, Rect, Shape as _};
use peniko::Color;

use crate::base::ShapeBase;
use crate::shape::{DEFAULT_FILL, Shape};

/// An axis-aligned rectangle centered on its local origin.
#[derive(Clone, Debug)]
pub struct Rectangle {
    base: ShapeBase,
    width: f64,
    height: f64,
    fill: Color,
}

impl Rectangle {
    /// A `width` × `height` rectangle at the world origin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let (width, height) = (width.abs(), height.abs());
        Self {
            base: ShapeBase::new(local_extents(width, height)),
            width,
            height,
            fill: DEFAULT_FILL,
        }
    }

    /// Sets the fill.
    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Untransformed width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Untransformed height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Changes the untransformed size.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.abs();
        self.height = height.abs();
        self.base
            .set_local_extents(local_extents(self.width, self.height));
    }
}

fn local_extents(width: f64, height: f64) -> Aabb<Local> {
    Aabb::new(-width * 0.5, -height * 0.5, width, height)
}

impl Shape for Rectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn outline(&self) -> BezPath {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        Rect::new(-hw, -hh, hw, hh).to_path(0.1)
    }

    fn fill(&self) -> Color {
        self.fill
    }

    fn kind(&self) -> &'static str {
        "rectangle"
    }
}
