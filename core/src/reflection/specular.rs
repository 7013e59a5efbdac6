//! Specular Reflection

use super::*;

/// BRDF for a perfectly smooth conductor.
#[derive(Copy, Clone, Debug)]
pub struct Specular {
    /// Real part of the relative index of refraction.
    eta: SampledSpectra,

    /// Absorption coefficient.
    k: SampledSpectra,
}

impl Specular {
    /// Create a new `Specular`.
    ///
    /// * `eta` - Real part of the relative index of refraction.
    /// * `k`   - Absorption coefficient.
    pub fn new(eta: SampledSpectra, k: SampledSpectra) -> Self {
        Self { eta, k }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::SPECULAR
    }

    /// Samples the mirror direction. The delta distribution is given a
    /// density of 1.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    pub fn sample_f(&self, i: &Vector3f) -> BxdfSample {
        if i.z <= 0.0 {
            return BxdfSample::invalid();
        }
        let o = Vector3f::new(-i.x, -i.y, i.z);
        let fresnel = fr_conductor_spectra(i.z, &self.eta, &self.k);
        BxdfSample::new(SampledDirection::new(o, 1.0), fresnel)
    }
}
