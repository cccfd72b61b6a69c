// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawboard Shape: transformable shapes with cached bounds.
//!
//! A shape is local-space geometry plus a transform made of a world-space
//! translation, a rotation in degrees, and a per-axis scale. The transform is
//! applied as `translate ∘ rotate ∘ scale`: local coordinates are scaled
//! first, then rotated, then translated.
//!
//! The state every shape shares lives in [`ShapeBase`]. Concrete shapes embed
//! one and implement the [`Shape`] trait for their own geometry and paint;
//! every transform operation is a provided method of the trait.
//!
//! After each mutation the world-space [`Aabb`] and [`Obb`] are recomputed
//! exactly once, so reads are always consistent with the current transform.
//!
//! ```rust
//! use drawboard_shape::{Rectangle, Shape};
//!
//! let mut rect = Rectangle::new(40.0, 20.0);
//! rect.translate_to(100.0, 50.0);
//! rect.rotate_to(90.0);
//!
//! let aabb = rect.aabb();
//! assert!((aabb.width - 20.0).abs() < 1e-9);
//! assert!((aabb.height - 40.0).abs() < 1e-9);
//! assert_eq!(rect.obb().center, rect.translation());
//!
//! // Degenerate scales are refused before anything changes.
//! assert!(rect.scale_to(0.0, 1.0).is_err());
//! ```
//!
//! Shapes draw themselves through the [`Surface`] trait, which receives the
//! full local → view transform. That keeps this crate independent of any
//! particular rasterizer.
//!
//! [`Aabb`]: drawboard_geom::Aabb
//! [`Obb`]: drawboard_geom::Obb

mod base;
mod ellipse;
mod id;
mod rectangle;
mod shape;

pub use base::{Scaling, ShapeBase};
pub use ellipse::Ellipse;
pub use id::ShapeId;
pub use rectangle::Rectangle;
pub use shape::{DEFAULT_FILL, Shape, Surface};
