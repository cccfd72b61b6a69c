// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use drawboard_geom::{AffineTransform2D, Local, View};
use drawboard_shape::Surface;
use kurbo::{BezPath, PathEl, Size};
use peniko::{Color, Fill};
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath as CpuBezPath};
use vello_cpu::{Pixmap, RenderContext};

/// An off-screen RGBA surface rendered by `vello_cpu`.
///
/// Drawing is recorded into the render context; [`RasterSurface::finish`]
/// rasterizes it into the pixmap, after which pixels can be read back.
pub struct RasterSurface {
    ctx: RenderContext,
    pixmap: Pixmap,
    width: u16,
    height: u16,
}

impl fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// A transparent surface of `width` × `height` pixels. Zero dimensions are
    /// raised to one.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let mut ctx = RenderContext::new(width, height);
        ctx.reset();
        Self {
            ctx,
            pixmap: Pixmap::new(width, height),
            width,
            height,
        }
    }

    /// A surface covering a viewport of the given size, rounded up to whole
    /// pixels.
    #[must_use]
    pub fn for_viewport(viewport: Size) -> Self {
        let (w, h) = Self::dimensions_for(viewport);
        Self::new(w, h)
    }

    /// Pixel dimensions needed to cover `viewport`.
    #[must_use]
    pub fn dimensions_for(viewport: Size) -> (u16, u16) {
        (pixel_extent(viewport.width), pixel_extent(viewport.height))
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Discards everything drawn since the last reset.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// Fills the whole surface with `color`, under anything drawn afterwards.
    pub fn clear(&mut self, color: Color) {
        self.ctx.set_transform(CpuAffine::IDENTITY);
        self.ctx.set_paint(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Rasterizes everything drawn since the last reset into the pixmap.
    pub fn finish(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Alpha of the pixel at `(x, y)` as of the last [`finish`], or `None`
    /// when the position lies outside the surface.
    ///
    /// [`finish`]: RasterSurface::finish
    #[must_use]
    pub fn alpha_at(&self, x: i64, y: i64) -> Option<u8> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        if x >= w || y >= h {
            return None;
        }
        self.pixmap.data().get(y * w + x).map(|p| p.a)
    }

    /// Premultiplied RGBA bytes of the pixmap, row-major.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut data =
            Vec::with_capacity(usize::from(self.width) * usize::from(self.height) * 4);
        for p in self.pixmap.data() {
            data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        data
    }

    fn to_cpu_path(path: &BezPath) -> CpuBezPath {
        let mut p = CpuBezPath::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(a) => p.move_to((a.x, a.y)),
                PathEl::LineTo(a) => p.line_to((a.x, a.y)),
                PathEl::QuadTo(a, b) => p.quad_to((a.x, a.y), (b.x, b.y)),
                PathEl::CurveTo(a, b, c) => p.curve_to((a.x, a.y), (b.x, b.y), (c.x, c.y)),
                PathEl::ClosePath => p.close_path(),
            }
        }
        p
    }
}

impl Surface for RasterSurface {
    fn fill_path(&mut self, transform: AffineTransform2D<Local, View>, path: &BezPath, color: Color) {
        self.ctx.set_transform(CpuAffine::new(transform.coefficients()));
        self.ctx.set_fill_rule(Fill::NonZero);
        self.ctx.set_paint(color);
        self.ctx.fill_path(&Self::to_cpu_path(path));
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped into the u16 range first"
)]
fn pixel_extent(v: f64) -> u16 {
    if !v.is_finite() {
        return 1;
    }
    v.ceil().clamp(1.0, f64::from(u16::MAX)) as u16
}
