// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawboard View 2D: the board camera.
//!
//! A [`Camera`] maps between view space (surface pixels) and world space. Its
//! state is a world-space `translation` and a `scale` in world units per view
//! pixel:
//!
//! ```text
//! view_to_world = translate(translation) ∘ scale(scale)
//! world_to_view = inverse(view_to_world)
//! ```
//!
//! Both matrices are cached and rebuilt on every mutation, so conversions are a
//! single matrix application.
//!
//! Out-of-range requests are never errors:
//! - [`Camera::scale`] clamps the resulting scale into the configured range.
//! - [`Camera::translate`] leaves an axis unchanged when the result would leave
//!   the optional world bounding on that axis.
//!
//! ## Minimal example
//!
//! ```rust
//! use drawboard_geom::ViewPoint;
//! use drawboard_view2d::{Camera, CameraOptions};
//! use kurbo::Size;
//!
//! let mut camera = Camera::new(CameraOptions {
//!     viewport: Size::new(800.0, 600.0),
//!     ..CameraOptions::default()
//! });
//!
//! // Put world (0, 0) at the center of the surface.
//! camera.translate(-400.0, -300.0);
//! let world = camera.to_world_point(ViewPoint::new(400.0, 300.0));
//! assert!(world.x.abs() < 1e-9 && world.y.abs() < 1e-9);
//!
//! // Zoom in 2x about the pointer; the world point under it stays put.
//! let pointer = ViewPoint::new(100.0, 50.0);
//! let before = camera.to_world_point(pointer);
//! camera.zoom(2.0, pointer);
//! let after = camera.to_world_point(pointer);
//! assert!(before.approx_eq(after, 1e-9));
//! ```
//!
//! The camera never rotates. That is what makes the diagonal-scale shortcut in
//! [`Camera::to_world_aabb`] exact.

#![no_std]

#[cfg(test)]
extern crate std;

mod camera;

pub use camera::{Camera, CameraDebugInfo, CameraOptions};
