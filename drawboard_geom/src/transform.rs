// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Space-typed, always-invertible 2D affine transforms.

use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::ops::Mul;

use kurbo::Affine;

use crate::bounds::Aabb;
use crate::space::{Coordinate, Space, Vector};

/// Smallest scale factor magnitude accepted by [`AffineTransform2D::scale`].
///
/// Smaller factors are clamped up to this value, sign preserved.
pub const MIN_SCALE: f64 = 1e-6;

/// Determinant magnitude below which a matrix is treated as singular.
pub const DETERMINANT_EPSILON: f64 = 1e-12;

/// A matrix could not be inverted, or a transform would become degenerate.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("singular matrix (determinant {determinant})")]
pub struct SingularMatrixError {
    /// Determinant of the offending matrix.
    pub determinant: f64,
}

/// A 2D affine transform from space `From` to space `To`.
///
/// Stored as the six coefficients of a 3×3 homogeneous matrix with bottom row
/// `(0, 0, 1)`. Every value of this type is invertible: scale factors are
/// clamped away from zero and arbitrary matrices are only admitted through
/// [`AffineTransform2D::try_from_affine`].
pub struct AffineTransform2D<From: Space, To: Space> {
    affine: Affine,
    spaces: PhantomData<fn(From) -> To>,
}

impl<From: Space, To: Space> Clone for AffineTransform2D<From, To> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<From: Space, To: Space> Copy for AffineTransform2D<From, To> {}

impl<From: Space, To: Space> PartialEq for AffineTransform2D<From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.affine == other.affine
    }
}

impl<From: Space, To: Space> Debug for AffineTransform2D<From, To> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AffineTransform2D")
            .field("from", &From::NAME)
            .field("to", &To::NAME)
            .field("coeffs", &self.affine.as_coeffs())
            .finish()
    }
}

impl<From: Space, To: Space> Default for AffineTransform2D<From, To> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<From: Space, To: Space> AffineTransform2D<From, To> {
    /// The identity mapping.
    pub const IDENTITY: Self = Self::wrap(Affine::IDENTITY);

    const fn wrap(affine: Affine) -> Self {
        Self {
            affine,
            spaces: PhantomData,
        }
    }

    /// Translation by `(dx, dy)`.
    #[must_use]
    pub fn translate(dx: f64, dy: f64) -> Self {
        Self::wrap(Affine::translate((dx, dy)))
    }

    /// Counter-clockwise rotation about the origin, in degrees.
    ///
    /// With a y-down view space this appears clockwise on screen.
    #[must_use]
    pub fn rotate_degrees(degrees: f64) -> Self {
        Self::wrap(Affine::rotate(degrees.to_radians()))
    }

    /// Non-uniform scale about the origin.
    ///
    /// Factors whose magnitude is below [`MIN_SCALE`] (or that are not finite)
    /// are clamped to `±MIN_SCALE` so the result stays invertible.
    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::wrap(Affine::scale_non_uniform(
            clamp_scale_factor(sx),
            clamp_scale_factor(sy),
        ))
    }

    /// Uniform scale about the origin.
    #[must_use]
    pub fn scale_uniform(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// Adopts an arbitrary Kurbo matrix, rejecting singular ones.
    pub fn try_from_affine(affine: Affine) -> Result<Self, SingularMatrixError> {
        let determinant = affine.determinant();
        if !determinant.is_finite() || determinant.abs() < DETERMINANT_EPSILON {
            return Err(SingularMatrixError { determinant });
        }
        Ok(Self::wrap(affine))
    }

    /// Returns the untyped Kurbo matrix.
    #[must_use]
    pub fn as_affine(&self) -> Affine {
        self.affine
    }

    /// Returns the coefficients `[a, b, c, d, e, f]`.
    ///
    /// The matrix maps `(x, y)` to `(a x + c y + e, b x + d y + f)`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 6] {
        self.affine.as_coeffs()
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.affine.determinant()
    }

    /// Horizontal diagonal term (`a`).
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.affine.as_coeffs()[0]
    }

    /// Vertical diagonal term (`d`).
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.affine.as_coeffs()[3]
    }

    /// Translation part, in the destination space.
    #[must_use]
    pub fn translation(&self) -> Vector<To> {
        Vector::from_vec2(self.affine.translation())
    }

    /// Composes two transforms; the result applies `inner` first, then `self`.
    #[must_use]
    pub fn compose<Inner: Space>(
        &self,
        inner: AffineTransform2D<Inner, From>,
    ) -> AffineTransform2D<Inner, To> {
        AffineTransform2D::wrap(self.affine * inner.affine)
    }

    /// Returns the inverse mapping.
    pub fn invert(&self) -> Result<AffineTransform2D<To, From>, SingularMatrixError> {
        let determinant = self.affine.determinant();
        if !determinant.is_finite() || determinant.abs() < DETERMINANT_EPSILON {
            return Err(SingularMatrixError { determinant });
        }
        Ok(AffineTransform2D::wrap(self.affine.inverse()))
    }

    /// Maps a point, treating it as `(x, y, 1)`.
    #[must_use]
    pub fn apply_to_point(&self, p: Coordinate<From>) -> Coordinate<To> {
        Coordinate::from_point(self.affine * p.to_point())
    }

    /// Maps a vector, treating it as `(x, y, 0)`: translation is ignored.
    #[must_use]
    pub fn apply_to_vector(&self, v: Vector<From>) -> Vector<To> {
        let [a, b, c, d, _, _] = self.affine.as_coeffs();
        Vector::new(a * v.x + c * v.y, b * v.x + d * v.y)
    }

    /// Maps the four corners of `aabb` and returns their axis-aligned extents.
    #[must_use]
    pub fn apply_to_aabb(&self, aabb: Aabb<From>) -> Aabb<To> {
        let corners = aabb.corners().map(|c| self.apply_to_point(c));
        Aabb::from_points(corners)
    }
}

impl<A: Space, B: Space, C: Space> Mul<AffineTransform2D<A, B>> for AffineTransform2D<B, C> {
    type Output = AffineTransform2D<A, C>;

    fn mul(self, inner: AffineTransform2D<A, B>) -> AffineTransform2D<A, C> {
        self.compose(inner)
    }
}

fn clamp_scale_factor(s: f64) -> f64 {
    if !s.is_finite() {
        return MIN_SCALE;
    }
    if s.abs() < MIN_SCALE {
        if s < 0.0 { -MIN_SCALE } else { MIN_SCALE }
    } else {
        s
    }
}
