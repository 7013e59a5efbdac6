//! GGX (Trowbridge-Reitz) Distribution

use super::MicrofacetDistribution;
use crate::base::*;
use crate::geometry::*;

/// Smallest alpha used; smoother surfaces become numerically unstable.
const MIN_ALPHA: Float = 1e-3;

/// Implements the isotropic GGX distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GgxDistribution {
    /// Width of the distribution of slopes.
    alpha: Float,
}

impl GgxDistribution {
    /// Create a new `GgxDistribution` from a perceptual roughness.
    ///
    /// * `roughness` - Roughness in [0, 1]; alpha is its square.
    pub fn new(roughness: Float) -> Self {
        Self::from_alpha(roughness * roughness)
    }

    /// Create a new `GgxDistribution` from alpha directly.
    ///
    /// * `alpha` - Width of the distribution of slopes.
    pub fn from_alpha(alpha: Float) -> Self {
        Self {
            alpha: max(alpha, MIN_ALPHA),
        }
    }

    /// Returns alpha.
    pub fn alpha(&self) -> Float {
        self.alpha
    }
}

impl MicrofacetDistribution for GgxDistribution {
    fn d(&self, m: &Vector3f) -> Float {
        let cos_theta = m.z;
        if cos_theta <= 0.0 {
            return 0.0;
        }
        let a2 = self.alpha * self.alpha;
        let t = cos_theta * cos_theta * (a2 - 1.0) + 1.0;
        a2 / (PI * t * t)
    }

    fn lambda(&self, v: &Vector3f) -> Float {
        let cos2 = v.z * v.z;
        if cos2 == 0.0 {
            return INFINITY;
        }
        let tan2 = max(0.0, 1.0 - cos2) / cos2;
        let a2 = self.alpha * self.alpha;
        0.5 * (-1.0 + (1.0 + a2 * tan2).sqrt())
    }

    fn sample_visible_normal(&self, v: &Vector3f, u: &[Float; 2]) -> Vector3f {
        let a = self.alpha;

        // Transform the view direction to the hemisphere configuration.
        let vh = Vector3f::new(a * v.x, a * v.y, v.z).normalize();

        // Orthonormal basis around vh.
        let len2 = vh.x * vh.x + vh.y * vh.y;
        let t1 = if len2 > 0.0 {
            Vector3f::new(-vh.y, vh.x, 0.0) / len2.sqrt()
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let t2 = vh.cross(&t1);

        // Parameterization of the projected area.
        let r = u[0].sqrt();
        let phi = TWO_PI * u[1];
        let p1 = r * phi.cos();
        let s = 0.5 * (1.0 + vh.z);
        let p2 = (1.0 - s) * safe_sqrt(1.0 - p1 * p1) + s * r * phi.sin();

        // Reprojection onto the hemisphere.
        let nh = t1 * p1 + t2 * p2 + vh * safe_sqrt(1.0 - p1 * p1 - p2 * p2);

        // Transform the normal back to the ellipsoid configuration.
        Vector3f::new(a * nh.x, a * nh.y, max(0.0, nh.z)).normalize()
    }
}
