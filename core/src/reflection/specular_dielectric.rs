//! Specular Dielectric

use super::*;

/// BSDF for a smooth dielectric interface. Refraction depends on the primary
/// wavelength only.
#[derive(Copy, Clone, Debug)]
pub struct SpecularDielectric {
    /// Relative index of refraction at the primary wavelength.
    n: Float,
}

impl SpecularDielectric {
    /// Create a new `SpecularDielectric`.
    ///
    /// * `n` - Relative index of refraction at the primary wavelength,
    ///         transmitted over incident.
    pub fn new(n: Float) -> Self {
        Self { n }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::TRANSMISSION | BxdfType::SPECULAR | BxdfType::WAVELENGTH_SELECTION
    }

    /// Chooses reflection with probability equal to the Fresnel reflectance and
    /// refraction otherwise.
    ///
    /// * `i`           - Incident direction in the local frame pointing away.
    /// * `wavelengths` - Sampled wavelengths.
    /// * `sampler`     - Random number source.
    pub fn sample_f<S: Sampler + ?Sized>(
        &self,
        i: &Vector3f,
        wavelengths: &WavelengthSamples,
        sampler: &mut S,
    ) -> BxdfSample {
        let c = i.z;
        if c <= 0.0 {
            return BxdfSample::invalid();
        }

        let weight = SampledSpectra::single(wavelengths.primary_index(), 1.0);
        let fresnel = fr_dielectric(c, self.n);
        let u = sampler.sample();
        match fresnel_g(self.n, c) {
            Some(g) if u >= fresnel => {
                let o = refract(i, &Vector3f::Z_AXIS, self.n, g);
                BxdfSample::new(SampledDirection::new(o, 1.0 - fresnel), weight)
            }
            _ => {
                let o = Vector3f::new(-i.x, -i.y, i.z);
                BxdfSample::new(SampledDirection::new(o, fresnel), weight)
            }
        }
    }
}
