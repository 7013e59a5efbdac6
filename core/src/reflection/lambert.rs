//! Lambertian Reflection

use super::*;

/// BRDF for a perfectly diffuse surface.
#[derive(Copy, Clone, Debug)]
pub struct Lambert {
    /// Reflectance per sampled wavelength.
    r: SampledSpectra,
}

impl Lambert {
    /// Create a new `Lambert`.
    ///
    /// * `r` - Reflectance per sampled wavelength.
    pub fn new(r: SampledSpectra) -> Self {
        Self { r }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::DIFFUSE
    }

    /// Returns the value of the BRDF.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    /// * `o` - Outgoing direction in the local frame.
    pub fn f(&self, i: &Vector3f, o: &Vector3f) -> SampledSpectra {
        if i.z <= 0.0 || o.z <= 0.0 {
            SampledSpectra::ZERO
        } else {
            self.r * INV_PI
        }
    }

    /// Returns the density of sampling `o`.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    /// * `o` - Outgoing direction in the local frame.
    pub fn pdf(&self, i: &Vector3f, o: &Vector3f) -> Float {
        if i.z <= 0.0 {
            0.0
        } else {
            cosine_hemisphere_pdf(o.z)
        }
    }

    /// Cosine-samples the hemisphere.
    ///
    /// * `i`       - Incident direction in the local frame pointing away.
    /// * `sampler` - Random number source.
    pub fn sample_f<S: Sampler + ?Sized>(&self, i: &Vector3f, sampler: &mut S) -> BxdfSample {
        if i.z <= 0.0 {
            return BxdfSample::invalid();
        }
        let o = cosine_sample_hemisphere(&sample_2d(sampler));
        let pdf = cosine_hemisphere_pdf(o.z);
        if pdf <= 0.0 {
            return BxdfSample::invalid();
        }
        BxdfSample::new(SampledDirection::new(o, pdf), self.r)
    }
}
