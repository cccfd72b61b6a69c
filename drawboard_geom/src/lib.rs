// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawboard Geom: typed coordinate spaces, affine transforms, and bounding boxes.
//!
//! Every geometric value in Drawboard is tagged with the coordinate space it
//! lives in:
//! - [`View`]: pixels relative to the rendering surface origin.
//! - [`World`]: the camera-independent space shapes live in.
//! - [`Local`]: a shape's own geometry before its transform is applied.
//!
//! The tag is a zero-sized type parameter, so handing a view-space point to an
//! API expecting a world-space point is a compile error rather than a silent
//! misplacement.
//!
//! ## Transforms
//!
//! [`AffineTransform2D<From, To>`] maps points and vectors between two spaces.
//! Composition follows the usual matrix convention: `outer.compose(inner)`
//! applies `inner` first.
//!
//! ```rust
//! use drawboard_geom::{AffineTransform2D, Coordinate, Local, World};
//!
//! let scale = AffineTransform2D::<Local, Local>::scale(2.0, 2.0);
//! let rotate = AffineTransform2D::<Local, Local>::rotate_degrees(90.0);
//! let translate = AffineTransform2D::<Local, World>::translate(10.0, 0.0);
//!
//! // Scale first, then rotate, then translate.
//! let local_to_world = translate.compose(rotate.compose(scale));
//! let p = local_to_world.apply_to_point(Coordinate::new(1.0, 0.0));
//! assert!((p.x - 10.0).abs() < 1e-9);
//! assert!((p.y - 2.0).abs() < 1e-9);
//!
//! let world_to_local = local_to_world.invert().unwrap();
//! let back = world_to_local.apply_to_point(p);
//! assert!((back.x - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Bounding boxes
//!
//! [`Aabb`] is an axis-aligned `{ x, y, width, height }` box and [`Obb`] an
//! oriented box described by its center, extents, and rotation in degrees.
//! `Aabb` offers two overlap tests: [`Aabb::intersects`] is strict (boxes that
//! only share an edge do not intersect) and [`Aabb::touches`] is inclusive.
//!
//! This crate is `no_std` and uses `alloc` only where noted.

#![no_std]

#[cfg(test)]
extern crate std;

mod bounds;
mod space;
mod transform;

pub use bounds::{Aabb, Obb};
pub use space::{
    Coordinate, Local, LocalPoint, Space, Vector, View, ViewPoint, ViewVector, World, WorldPoint,
    WorldVector,
};
pub use transform::{AffineTransform2D, DETERMINANT_EPSILON, MIN_SCALE, SingularMatrixError};
