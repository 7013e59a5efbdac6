//! 3-D points

use super::*;
use crate::base::*;
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, Index, Sub};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl Point3f {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Returns the component-wise minimum of two points.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(min(self.x, other.x), min(self.y, other.y), min(self.z, other.z))
    }

    /// Returns the component-wise maximum of two points.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(max(self.x, other.x), max(self.y, other.y), max(self.z, other.z))
    }

    /// Returns the squared distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: &Self) -> Float {
        (*self - *other).length_squared()
    }

    /// Returns the point moved along `direction` by `t`.
    ///
    /// * `direction` - Direction of travel.
    /// * `t`         - Parametric distance.
    pub fn offset(&self, direction: &Vector3f, t: Float) -> Self {
        *self + *direction * t
    }
}

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D point at the origin.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    fn add(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    fn sub(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T> Index<Axis> for Point3<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    fn index(&self, i: usize) -> &Self::Output {
        self.index(Axis::from(i))
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
prop_compose! {
    /// Generates a point inside the cube [-100, 100]^3.
    pub fn point3f()(x in -100.0..100.0f64, y in -100.0..100.0f64, z in -100.0..100.0f64) -> Point3f {
        Point3f::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn distance_squared_is_symmetric(p1 in point3f(), p2 in point3f()) {
            prop_assert_eq!(p1.distance_squared(&p2), p2.distance_squared(&p1));
        }

        #[test]
        fn min_max_bound_both(p1 in point3f(), p2 in point3f()) {
            let lo = p1.min(&p2);
            let hi = p1.max(&p2);
            for axis in Axis::ALL {
                prop_assert!(lo[axis] <= p1[axis] && p1[axis] <= hi[axis]);
                prop_assert!(lo[axis] <= p2[axis] && p2[axis] <= hi[axis]);
            }
        }
    }

    #[test]
    fn sub_points_gives_vector() {
        let v = Point3f::new(1.0, 2.0, 3.0) - Point3f::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vector3f::new(0.0, 1.0, 2.0));
    }
}
