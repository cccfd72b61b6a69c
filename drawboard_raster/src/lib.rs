// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawboard Raster: off-screen CPU rendering with [`vello_cpu`].
//!
//! - [`RasterSurface`] implements [`drawboard_shape::Surface`] over a
//!   sparse-strips [`vello_cpu::RenderContext`] and a [`vello_cpu::Pixmap`].
//!   It backs headless rendering of a whole board.
//! - [`PixelProbe`] answers "does this shape, drawn alone through this camera,
//!   cover this pixel?". It keeps one surface sized to the camera viewport and
//!   reuses it across probes, reallocating only when the viewport size
//!   changes.
//!
//! ```rust
//! use drawboard_geom::ViewPoint;
//! use drawboard_raster::PixelProbe;
//! use drawboard_shape::{Rectangle, Shape};
//! use drawboard_view2d::Camera;
//!
//! let mut camera = Camera::default();
//! camera.translate(-400.0, -300.0);
//! let rect = Rectangle::new(50.0, 50.0);
//!
//! let mut probe = PixelProbe::new();
//! assert!(probe.covers(&rect, &camera, ViewPoint::new(400.0, 300.0)));
//! assert!(!probe.covers(&rect, &camera, ViewPoint::new(10.0, 10.0)));
//! ```

mod probe;
mod surface;

pub use probe::PixelProbe;
pub use surface::RasterSurface;
