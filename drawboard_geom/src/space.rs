// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate space markers and space-tagged points and vectors.

use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use kurbo::{Point, Vec2};

/// Marker trait for a coordinate space.
pub trait Space: Copy + Debug + Default + PartialEq + Eq + 'static {
    /// Human-readable name used in debug output.
    const NAME: &'static str;
}

/// Pixels relative to the rendering surface origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct View;

/// The authoritative, camera-independent space shapes live in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct World;

/// A shape's own geometry space, before its transform is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Local;

impl Space for View {
    const NAME: &'static str = "view";
}

impl Space for World {
    const NAME: &'static str = "world";
}

impl Space for Local {
    const NAME: &'static str = "local";
}

/// A point in coordinate space `S`.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Coordinate<S: Space> {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    space: PhantomData<S>,
}

/// A displacement in coordinate space `S`.
///
/// Unlike a [`Coordinate`], a vector is unaffected by the translation part of
/// an affine transform.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Vector<S: Space> {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    space: PhantomData<S>,
}

/// A point in world space.
pub type WorldPoint = Coordinate<World>;
/// A point in view space.
pub type ViewPoint = Coordinate<View>;
/// A point in local shape space.
pub type LocalPoint = Coordinate<Local>;
/// A displacement in world space.
pub type WorldVector = Vector<World>;
/// A displacement in view space.
pub type ViewVector = Vector<View>;

impl<S: Space> Coordinate<S> {
    /// The origin of the space.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a point from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Wraps an untyped Kurbo point.
    #[must_use]
    pub const fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y)
    }

    /// Returns the untyped Kurbo point.
    #[must_use]
    pub const fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the displacement from the origin to this point.
    #[must_use]
    pub const fn to_vector(self) -> Vector<S> {
        Vector::new(self.x, self.y)
    }

    /// Rounds both components down to the nearest integer.
    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns `true` if both components are within `eps` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl<S: Space> Vector<S> {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Wraps an untyped Kurbo vector.
    #[must_use]
    pub const fn from_vec2(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Returns the untyped Kurbo vector.
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns `true` if both components are zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl<S: Space> Debug for Coordinate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", S::NAME, self.x, self.y)
    }
}

impl<S: Space> Debug for Vector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}, {}>", S::NAME, self.x, self.y)
    }
}

impl<S: Space> Sub for Coordinate<S> {
    type Output = Vector<S>;

    fn sub(self, rhs: Self) -> Vector<S> {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<S: Space> Add<Vector<S>> for Coordinate<S> {
    type Output = Self;

    fn add(self, rhs: Vector<S>) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S: Space> AddAssign<Vector<S>> for Coordinate<S> {
    fn add_assign(&mut self, rhs: Vector<S>) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<S: Space> Sub<Vector<S>> for Coordinate<S> {
    type Output = Self;

    fn sub(self, rhs: Vector<S>) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<S: Space> SubAssign<Vector<S>> for Coordinate<S> {
    fn sub_assign(&mut self, rhs: Vector<S>) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<S: Space> Add for Vector<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S: Space> Sub for Vector<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<S: Space> Mul<f64> for Vector<S> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<S: Space> Neg for Vector<S> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<S: Space> From<(f64, f64)> for Coordinate<S> {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl<S: Space> From<(f64, f64)> for Vector<S> {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use std::format;

    use super::{Coordinate, Vector, View, World, WorldPoint};

    #[test]
    fn point_minus_point_is_vector() {
        let a = WorldPoint::new(5.0, 7.0);
        let b = WorldPoint::new(2.0, 3.0);
        let d: Vector<World> = a - b;
        assert_eq!(d, Vector::new(3.0, 4.0));
        assert_eq!(b + d, a);
    }

    #[test]
    fn floor_handles_negative_components() {
        let p = Coordinate::<View>::new(-0.5, 2.9).floor();
        assert_eq!(p, Coordinate::new(-1.0, 2.0));
    }

    #[test]
    fn debug_output_names_the_space() {
        let p = Coordinate::<View>::new(1.0, 2.0);
        assert_eq!(format!("{p:?}"), "view(1, 2)");
    }
}
