//! Non-directional Light

use super::*;

/// Emission distribution of a diffuse area light, radiating equally in every
/// direction of the hemisphere.
#[derive(Copy, Clone, Debug)]
pub struct NonDirectionalLight {
    /// Radiant exitance per sampled wavelength.
    radiant_exitance: SampledSpectra,
}

impl NonDirectionalLight {
    /// Create a new `NonDirectionalLight`.
    ///
    /// * `radiant_exitance` - Radiant exitance per sampled wavelength.
    pub fn new(radiant_exitance: SampledSpectra) -> Self {
        Self { radiant_exitance }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        BxdfType::EMISSION | BxdfType::DIFFUSE
    }

    /// Returns the emitted radiance towards `o`.
    ///
    /// * `o` - Local direction leaving the light.
    pub fn f(&self, o: &Vector3f) -> SampledSpectra {
        if o.z <= 0.0 {
            SampledSpectra::ZERO
        } else {
            self.radiant_exitance * INV_PI
        }
    }

    /// Returns the density of sampling `o`.
    ///
    /// * `o` - Local direction leaving the light.
    pub fn pdf(&self, o: &Vector3f) -> Float {
        cosine_hemisphere_pdf(o.z)
    }

    /// Cosine-samples the emission direction.
    ///
    /// * `sampler` - Random number source.
    pub fn sample_f<S: Sampler + ?Sized>(&self, sampler: &mut S) -> BxdfSample {
        let o = cosine_sample_hemisphere(&sample_2d(sampler));
        let pdf = cosine_hemisphere_pdf(o.z);
        if pdf <= 0.0 {
            return BxdfSample::invalid();
        }
        BxdfSample::new(SampledDirection::new(o, pdf), self.radiant_exitance)
    }
}
