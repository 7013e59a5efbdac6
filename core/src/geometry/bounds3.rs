//! 3-D Axis Aligned Bounding Boxes.

use super::*;
use crate::base::*;

/// 3-D axis aligned bounding box containing `Float` values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Bounds3f {
    /// Returns an empty bounding box that any point union will replace.
    pub fn empty() -> Self {
        Self {
            p_min: Point3f::new(INFINITY, INFINITY, INFINITY),
            p_max: Point3f::new(-INFINITY, -INFINITY, -INFINITY),
        }
    }

    /// Returns a bounding box enclosing the given points.
    ///
    /// * `points` - The points.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        points.into_iter().fold(Self::empty(), |b, p| b.union_point(p))
    }

    /// Returns a bounding box that also encloses the point `p`.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns the vector from the minimum to the maximum corner.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns the axis with the largest extent. Ties resolve toward the
    /// later axis.
    pub fn longest_axis(&self) -> Axis {
        let d = self.diagonal();
        if d.y < d.x {
            if d.z < d.x {
                Axis::X
            } else {
                Axis::Z
            }
        } else if d.z < d.y {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}

impl Default for Bounds3f {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_axis_x() {
        let b = Bounds3f::from_points(&[Point3f::new(0.0, 0.0, 0.0), Point3f::new(3.0, 1.0, 2.0)]);
        assert_eq!(b.longest_axis(), Axis::X);
    }

    #[test]
    fn longest_axis_y() {
        let b = Bounds3f::from_points(&[Point3f::new(0.0, -5.0, 0.0), Point3f::new(3.0, 1.0, 2.0)]);
        assert_eq!(b.longest_axis(), Axis::Y);
    }

    #[test]
    fn longest_axis_ties_prefer_z() {
        let b = Bounds3f::from_points(&[Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0)]);
        assert_eq!(b.longest_axis(), Axis::Z);

        // A single point has zero extent everywhere.
        let b = Bounds3f::from_points(&[Point3f::new(4.0, 4.0, 4.0)]);
        assert_eq!(b.longest_axis(), Axis::Z);
    }

    #[test]
    fn union_encloses_points() {
        let b = Bounds3f::from_points(&[Point3f::new(1.0, -2.0, 3.0), Point3f::new(-1.0, 2.0, 0.0)]);
        assert_eq!(b.p_min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 2.0, 3.0));
    }
}
