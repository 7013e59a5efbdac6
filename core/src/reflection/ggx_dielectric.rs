//! GGX Dielectric

use super::*;

/// BSDF for a rough dielectric interface using the GGX microfacet
/// distribution. Refraction depends on the primary wavelength only so all
/// values are carried by that wavelength.
#[derive(Copy, Clone, Debug)]
pub struct GgxDielectric {
    /// Microfacet distribution.
    distribution: GgxDistribution,

    /// Relative index of refraction at the primary wavelength.
    n: Float,
}

impl GgxDielectric {
    /// Create a new `GgxDielectric`.
    ///
    /// * `roughness` - Roughness in [0, 1].
    /// * `n`         - Relative index of refraction at the primary wavelength,
    ///                 transmitted over incident.
    pub fn new(roughness: Float, n: Float) -> Self {
        Self {
            distribution: GgxDistribution::new(roughness),
            n,
        }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::TRANSMISSION | BxdfType::GLOSSY | BxdfType::WAVELENGTH_SELECTION
    }

    /// Returns the value of the BSDF.
    ///
    /// * `i`           - Incident direction in the local frame pointing away.
    /// * `o`           - Outgoing direction in the local frame.
    /// * `wavelengths` - Sampled wavelengths.
    pub fn f(&self, i: &Vector3f, o: &Vector3f, wavelengths: &WavelengthSamples) -> SampledSpectra {
        self.f_pdf(i, o, wavelengths).0
    }

    /// Returns the density of sampling `o`.
    ///
    /// * `i`           - Incident direction in the local frame pointing away.
    /// * `o`           - Outgoing direction in the local frame.
    /// * `wavelengths` - Sampled wavelengths.
    pub fn pdf(&self, i: &Vector3f, o: &Vector3f, wavelengths: &WavelengthSamples) -> Float {
        self.f_pdf(i, o, wavelengths).1
    }

    /// Returns the value of the BSDF and the density of sampling `o`.
    ///
    /// * `i`           - Incident direction in the local frame pointing away.
    /// * `o`           - Outgoing direction in the local frame.
    /// * `wavelengths` - Sampled wavelengths.
    pub fn f_pdf(&self, i: &Vector3f, o: &Vector3f, wavelengths: &WavelengthSamples) -> (SampledSpectra, Float) {
        let primary = wavelengths.primary_index();
        let (f, pdf) = if o.z > 0.0 {
            self.reflection(i, o)
        } else {
            self.transmission(i, o)
        };
        (SampledSpectra::single(primary, f), pdf)
    }

    /// Evaluates the reflection lobe.
    fn reflection(&self, i: &Vector3f, o: &Vector3f) -> (Float, Float) {
        let m = match half_vector(i, o) {
            Some(m) => m,
            None => return (0.0, 0.0),
        };
        let fresnel = fr_dielectric(i.dot(&m), self.n);
        let d = self.distribution.d(&m);
        let g2 = self.distribution.g2(i, o);
        let f = fresnel * d * g2 / (4.0 * i.z * o.z);
        let pdf = fresnel * ggx_reflection_pdf(&self.distribution, i, &m);
        (f, pdf)
    }

    /// Evaluates the transmission lobe.
    fn transmission(&self, i: &Vector3f, o: &Vector3f) -> (Float, Float) {
        let n = self.n;
        if i.z <= 0.0 || o.z >= 0.0 || n == 1.0 {
            return (0.0, 0.0);
        }

        // Microfacet normal on the incident side.
        let h = -(*i + *o * n);
        let len2 = h.length_squared();
        if len2 == 0.0 {
            return (0.0, 0.0);
        }
        let mut m = h / len2.sqrt();
        if m.z < 0.0 {
            m = -m;
        }

        let cos_im = i.dot(&m);
        let cos_om = o.dot(&m);
        if cos_im <= 0.0 || cos_om >= 0.0 {
            return (0.0, 0.0);
        }
        let denom = cos_im + n * cos_om;
        if denom == 0.0 {
            return (0.0, 0.0);
        }

        let fresnel = fr_dielectric(cos_im, n);
        if fresnel >= 1.0 {
            return (0.0, 0.0);
        }
        let d = self.distribution.d(&m);
        let g2 = self.distribution.g2(i, o);
        let jacobian = n * n * -cos_om / (denom * denom);

        let f = cos_im * jacobian * (1.0 - fresnel) * d * g2 / (i.z * -o.z);
        let pdf = (1.0 - fresnel) * self.distribution.visible_normal_pdf(i, &m) * jacobian;
        (f, pdf)
    }

    /// Samples a visible microfacet normal, then chooses reflection with
    /// probability equal to the Fresnel reflectance and refraction otherwise.
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
        if i.z <= 0.0 {
            return BxdfSample::invalid();
        }
        let m = self.distribution.sample_visible_normal(i, &sample_2d(sampler));
        let c = i.dot(&m);
        if c <= 0.0 {
            return BxdfSample::invalid();
        }

        let fresnel = fr_dielectric(c, self.n);
        let u = sampler.sample();
        let (o, pdf) = match fresnel_g(self.n, c) {
            Some(g) if u >= fresnel => {
                let o = refract(i, &m, self.n, g);
                if o.z >= 0.0 {
                    return BxdfSample::invalid();
                }
                let denom = c - g;
                let jacobian = self.n * self.n * (g / self.n) / (denom * denom);
                let pdf = (1.0 - fresnel) * self.distribution.visible_normal_pdf(i, &m) * jacobian;
                (o, pdf)
            }
            _ => {
                let o = reflect(i, &m);
                if o.z <= 0.0 {
                    return BxdfSample::invalid();
                }
                (o, fresnel * ggx_reflection_pdf(&self.distribution, i, &m))
            }
        };
        if !(pdf > 0.0 && pdf.is_finite()) {
            return BxdfSample::invalid();
        }

        let weight = self.distribution.g2(i, &o) / self.distribution.g1(i);
        BxdfSample::new(
            SampledDirection::new(o, pdf),
            SampledSpectra::single(wavelengths.primary_index(), weight),
        )
    }
}
