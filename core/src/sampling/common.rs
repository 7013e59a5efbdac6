//! Common sampling functions.

use crate::base::*;
use crate::geometry::*;

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &[Float; 2]) -> [Float; 2] {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u[0] - 1.0;
    let oy = 2.0 * u[1] - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return [0.0, 0.0];
    }

    // Apply concentric mapping to point
    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };

    [r * theta.cos(), r * theta.sin()]
}

/// Sample a direction on the `+z` hemisphere using cosine-weighted sampling.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &[Float; 2]) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d[0] * d[0] - d[1] * d[1]).sqrt();
    Vector3f::new(d[0], d[1], z)
}

/// Returns the PDF for cosine-weighted sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine of the sampled direction with the normal.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    max(cos_theta, 0.0) * INV_PI
}

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &[Float; 2]) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    0.25 * INV_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn disk_samples_stay_inside(u0 in 0.0..1.0f64, u1 in 0.0..1.0f64) {
            let d = concentric_sample_disk(&[u0, u1]);
            prop_assert!(d[0] * d[0] + d[1] * d[1] <= 1.0 + 1e-12);
        }

        #[test]
        fn cosine_samples_are_unit_upper(u0 in 0.0..1.0f64, u1 in 0.0..1.0f64) {
            let v = cosine_sample_hemisphere(&[u0, u1]);
            prop_assert!(v.z >= 0.0);
            prop_assert!((v.length() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn sphere_samples_are_unit(u0 in 0.0..1.0f64, u1 in 0.0..1.0f64) {
            let v = uniform_sample_sphere(&[u0, u1]);
            prop_assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn disk_origin_is_degenerate() {
        assert_eq!(concentric_sample_disk(&[0.5, 0.5]), [0.0, 0.0]);
    }

    #[test]
    fn cosine_pdf_rejects_lower_hemisphere() {
        assert_eq!(cosine_hemisphere_pdf(-0.5), 0.0);
        assert!((cosine_hemisphere_pdf(1.0) - INV_PI).abs() < 1e-15);
    }
}
