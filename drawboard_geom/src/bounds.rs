// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned and oriented bounding boxes.

use core::marker::PhantomData;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin_cos`
use kurbo::Rect;

use crate::space::{Coordinate, Space, Vector};

/// Axis-aligned bounding box in space `S`.
///
/// `width` and `height` are never negative; constructors normalize inverted
/// extents.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Aabb<S: Space> {
    /// Minimum x.
    pub x: f64,
    /// Minimum y.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
    space: PhantomData<S>,
}

impl<S: Space> Aabb<S> {
    /// Creates a box from its minimum corner and size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 {
            (y + height, -height)
        } else {
            (y, height)
        };
        Self {
            x,
            y,
            width,
            height,
            space: PhantomData,
        }
    }

    /// Creates a box from minimum and maximum coordinates.
    #[must_use]
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Smallest box containing every point. Empty input yields a zero box at
    /// the origin.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Coordinate<S>>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::from_extents(min_x, min_y, max_x, max_y)
    }

    /// Box of the given size centered on `center`.
    #[must_use]
    pub fn from_center(center: Coordinate<S>, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width.abs() * 0.5,
            center.y - height.abs() * 0.5,
            width.abs(),
            height.abs(),
        )
    }

    /// Wraps an untyped Kurbo rectangle.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    /// Returns the untyped Kurbo rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.max_x(), self.max_y())
    }

    /// Maximum x.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Maximum y.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Minimum corner.
    #[must_use]
    pub fn origin(&self) -> Coordinate<S> {
        Coordinate::new(self.x, self.y)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Coordinate<S> {
        Coordinate::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Coordinate<S>; 4] {
        [
            Coordinate::new(self.x, self.y),
            Coordinate::new(self.max_x(), self.y),
            Coordinate::new(self.max_x(), self.max_y()),
            Coordinate::new(self.x, self.max_y()),
        ]
    }

    /// Returns `true` if the box has zero area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Strict overlap test: boxes that only share an edge or a corner do not
    /// intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.max_x()
            && self.max_x() > other.x
            && self.y < other.max_y()
            && self.max_y() > other.y
    }

    /// Inclusive overlap test: boundary contact counts.
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        self.x <= other.max_x()
            && self.max_x() >= other.x
            && self.y <= other.max_y()
            && self.max_y() >= other.y
    }

    /// Returns `true` if `p` lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, p: Coordinate<S>) -> bool {
        p.x >= self.x && p.x <= self.max_x() && p.y >= self.y && p.y <= self.max_y()
    }

    /// Returns `true` if `other` lies entirely within this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_extents(
            self.x.min(other.x),
            self.y.min(other.y),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Box moved by `v`.
    #[must_use]
    pub fn translated(&self, v: Vector<S>) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.width, self.height)
    }
}

/// Oriented bounding box in space `S`.
///
/// `rotation` is in degrees and is not normalized into any range.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Obb<S: Space> {
    /// Center point.
    pub center: Coordinate<S>,
    /// Extent along the box's own x axis.
    pub width: f64,
    /// Extent along the box's own y axis.
    pub height: f64,
    /// Rotation about `center`, in degrees.
    pub rotation: f64,
}

impl<S: Space> Obb<S> {
    /// Creates an oriented box.
    #[must_use]
    pub fn new(center: Coordinate<S>, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            center,
            width: width.abs(),
            height: height.abs(),
            rotation,
        }
    }

    /// The oriented box with the same center and extents as `aabb`.
    #[must_use]
    pub fn from_aabb(aabb: Aabb<S>, rotation: f64) -> Self {
        Self::new(aabb.center(), aabb.width, aabb.height, rotation)
    }

    /// The unrotated box sharing this box's center and extents, described by
    /// its top-left corner.
    #[must_use]
    pub fn unrotated_aabb(&self) -> Aabb<S> {
        Aabb::from_center(self.center, self.width, self.height)
    }

    /// Corners after rotation, starting from the unrotated top-left and
    /// proceeding clockwise in a y-down space.
    #[must_use]
    pub fn corners(&self) -> [Coordinate<S>; 4] {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| {
            Coordinate::new(
                self.center.x + dx * cos - dy * sin,
                self.center.y + dx * sin + dy * cos,
            )
        })
    }

    /// Axis-aligned extents of the rotated corners.
    #[must_use]
    pub fn bounding_aabb(&self) -> Aabb<S> {
        Aabb::from_points(self.corners())
    }
}
