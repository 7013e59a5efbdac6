//! Ray

use super::*;
use crate::base::*;

/// A semi-infinite line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    /// Origin.
    pub origin: Point3f,

    /// Unit direction.
    pub direction: Vector3f,
}

impl Ray {
    /// Create a new ray.
    ///
    /// * `origin`    - Origin.
    /// * `direction` - Unit direction.
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self { origin, direction }
    }

    /// Spawns a ray leaving a surface point, offset along the normal to the
    /// side `direction` points to.
    ///
    /// * `point`     - Surface point.
    /// * `normal`    - Geometric normal.
    /// * `direction` - Unit direction.
    pub fn spawn(point: &Point3f, normal: &Vector3f, direction: &Vector3f) -> Self {
        let offset = if normal.dot(direction) > 0.0 {
            *normal * RAY_EPSILON
        } else {
            -*normal * RAY_EPSILON
        };
        Self::new(*point + offset, *direction)
    }

    /// Returns the point at parametric distance `t`.
    ///
    /// * `t` - Parametric distance.
    pub fn at(&self, t: Float) -> Point3f {
        self.origin.offset(&self.direction, t)
    }
}
