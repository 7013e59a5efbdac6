//! Microfacet Distribution Models

use crate::base::*;
use crate::geometry::*;

mod ggx;

// Re-exports
pub use ggx::*;

/// Interface for microfacet distribution models. All directions are in the
/// local shading frame and point away from the surface.
pub trait MicrofacetDistribution {
    /// Return the differential area of microfacets oriented with the surface
    /// normal `m`.
    ///
    /// * `m` - A microfacet normal.
    fn d(&self, m: &Vector3f) -> Float;

    /// Returns the invisible masked microfacet area per visible microfacet area.
    ///
    /// * `v` - Direction.
    fn lambda(&self, v: &Vector3f) -> Float;

    /// Evaluates Smith's masking function which gives the fraction of
    /// microfacets that are visible from a given direction.
    ///
    /// * `v` - Direction.
    fn g1(&self, v: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(v))
    }

    /// Returns the height correlated fraction of microfacets visible from both
    /// directions.
    ///
    /// * `i` - Incident direction.
    /// * `o` - Outgoing direction.
    fn g2(&self, i: &Vector3f, o: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(i) + self.lambda(o))
    }

    /// Returns a microfacet normal drawn from the distribution of normals
    /// visible from `v`.
    ///
    /// * `v` - Direction in the upper hemisphere.
    /// * `u` - The 2D uniform random values.
    fn sample_visible_normal(&self, v: &Vector3f, u: &[Float; 2]) -> Vector3f;

    /// Evaluates the density of `sample_visible_normal` for the microfacet
    /// normal `m`.
    ///
    /// * `v` - Direction in the upper hemisphere.
    /// * `m` - A microfacet normal.
    fn visible_normal_pdf(&self, v: &Vector3f, m: &Vector3f) -> Float {
        if v.z <= 0.0 {
            return 0.0;
        }
        self.g1(v) * max(0.0, v.dot(m)) * self.d(m) / v.z
    }
}
