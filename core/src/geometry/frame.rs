//! Shading frame

use super::*;
use crate::base::*;

/// Orthonormal basis at a shading point. The local coordinate system maps
/// `tangent` to +x, `bitangent` to +y and `normal` to +z.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadingFrame {
    /// Tangent vector; cloth threads run along it.
    pub tangent: Vector3f,

    /// Bitangent vector.
    pub bitangent: Vector3f,

    /// Shading normal.
    pub normal: Vector3f,
}

impl ShadingFrame {
    /// Builds an orthonormal basis around a unit normal (Duff et al.
    /// branchless construction).
    ///
    /// * `normal` - Unit shading normal.
    pub fn from_normal(normal: &Vector3f) -> Self {
        let sign = 1.0_f64.copysign(normal.z);
        let a = -1.0 / (sign + normal.z);
        let b = normal.x * normal.y * a;
        let tangent = Vector3f::new(1.0 + sign * normal.x * normal.x * a, sign * b, -sign * normal.x);
        let bitangent = Vector3f::new(b, sign + normal.y * normal.y * a, -normal.y);
        Self {
            tangent,
            bitangent,
            normal: *normal,
        }
    }

    /// Builds a frame from a unit normal and an approximate tangent; the
    /// tangent is re-orthogonalized against the normal.
    ///
    /// * `normal`  - Unit shading normal.
    /// * `tangent` - Approximate tangent direction.
    pub fn from_normal_tangent(normal: &Vector3f, tangent: &Vector3f) -> Self {
        let t = *tangent - *normal * normal.dot(tangent);
        if t.length_squared() < 1e-12 {
            return Self::from_normal(normal);
        }
        let tangent = t.normalize();
        let bitangent = normal.cross(&tangent);
        Self {
            tangent,
            bitangent,
            normal: *normal,
        }
    }

    /// Returns the frame with the normal flipped. Handedness is kept by also
    /// flipping the bitangent.
    pub fn flipped(&self) -> Self {
        Self {
            tangent: self.tangent,
            bitangent: -self.bitangent,
            normal: -self.normal,
        }
    }

    /// Expresses a world space vector in the local frame.
    ///
    /// * `v` - World space vector.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.tangent), v.dot(&self.bitangent), v.dot(&self.normal))
    }

    /// Expresses a local vector in world space.
    ///
    /// * `v` - Local vector.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.tangent * v.x + self.bitangent * v.y + self.normal * v.z
    }
}

impl Default for ShadingFrame {
    fn default() -> Self {
        Self::from_normal(&Vector3f::Z_AXIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn basis_is_orthonormal(n in unit_vector3()) {
            let frame = ShadingFrame::from_normal(&n);
            prop_assert!(frame.tangent.is_unit());
            prop_assert!(frame.bitangent.is_unit());
            prop_assert!(frame.tangent.dot(&frame.bitangent).abs() < 1e-9);
            prop_assert!(frame.tangent.dot(&frame.normal).abs() < 1e-9);
            prop_assert!(frame.bitangent.dot(&frame.normal).abs() < 1e-9);
        }

        #[test]
        fn local_world_round_trip(n in unit_vector3(), v in unit_vector3()) {
            let frame = ShadingFrame::from_normal(&n);
            let w = frame.to_world(&frame.to_local(&v));
            prop_assert!((w - v).length() < 1e-9);
        }

        #[test]
        fn normal_maps_to_z(n in unit_vector3()) {
            let frame = ShadingFrame::from_normal(&n);
            let local = frame.to_local(&n);
            prop_assert!((local.z - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tangent_is_kept() {
        let frame = ShadingFrame::from_normal_tangent(&Vector3f::Z_AXIS, &Vector3f::new(1.0, 0.0, 0.3));
        assert!((frame.tangent - Vector3f::new(1.0, 0.0, 0.0)).length() < 1e-12);
        assert!((frame.bitangent - Vector3f::new(0.0, 1.0, 0.0)).length() < 1e-12);
    }
}
