//! GGX Conductor

use super::*;

/// BRDF for a rough conductor using the GGX microfacet distribution.
#[derive(Copy, Clone, Debug)]
pub struct GgxConductor {
    /// Microfacet distribution.
    distribution: GgxDistribution,

    /// Real part of the relative index of refraction.
    eta: SampledSpectra,

    /// Absorption coefficient.
    k: SampledSpectra,
}

impl GgxConductor {
    /// Create a new `GgxConductor`.
    ///
    /// * `roughness` - Roughness in [0, 1].
    /// * `eta`       - Real part of the relative index of refraction.
    /// * `k`         - Absorption coefficient.
    pub fn new(roughness: Float, eta: SampledSpectra, k: SampledSpectra) -> Self {
        Self {
            distribution: GgxDistribution::new(roughness),
            eta,
            k,
        }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::GLOSSY
    }

    /// Returns the value of the BRDF.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    /// * `o` - Outgoing direction in the local frame.
    pub fn f(&self, i: &Vector3f, o: &Vector3f) -> SampledSpectra {
        self.f_pdf(i, o).0
    }

    /// Returns the density of sampling `o`.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    /// * `o` - Outgoing direction in the local frame.
    pub fn pdf(&self, i: &Vector3f, o: &Vector3f) -> Float {
        match half_vector(i, o) {
            Some(m) => ggx_reflection_pdf(&self.distribution, i, &m),
            None => 0.0,
        }
    }

    /// Returns the value of the BRDF and the density of sampling `o`.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    /// * `o` - Outgoing direction in the local frame.
    pub fn f_pdf(&self, i: &Vector3f, o: &Vector3f) -> (SampledSpectra, Float) {
        let m = match half_vector(i, o) {
            Some(m) => m,
            None => return (SampledSpectra::ZERO, 0.0),
        };
        let d = self.distribution.d(&m);
        let g2 = self.distribution.g2(i, o);
        let fresnel = fr_conductor_spectra(i.dot(&m), &self.eta, &self.k);
        let f = fresnel * (d * g2 / (4.0 * i.z * o.z));
        (f, ggx_reflection_pdf(&self.distribution, i, &m))
    }

    /// Samples a visible microfacet normal and reflects about it.
    ///
    /// * `i`       - Incident direction in the local frame pointing away.
    /// * `sampler` - Random number source.
    pub fn sample_f<S: Sampler + ?Sized>(&self, i: &Vector3f, sampler: &mut S) -> BxdfSample {
        if i.z <= 0.0 {
            return BxdfSample::invalid();
        }
        let m = self.distribution.sample_visible_normal(i, &sample_2d(sampler));
        let cos_im = i.dot(&m);
        let o = reflect(i, &m);
        if o.z <= 0.0 || cos_im <= 0.0 {
            return BxdfSample::invalid();
        }
        let pdf = ggx_reflection_pdf(&self.distribution, i, &m);
        if pdf <= 0.0 {
            return BxdfSample::invalid();
        }
        let fresnel = fr_conductor_spectra(cos_im, &self.eta, &self.k);
        let weight = fresnel * (self.distribution.g2(i, &o) / self.distribution.g1(i));
        BxdfSample::new(SampledDirection::new(o, pdf), weight)
    }
}

/// Returns the normalized half vector of a reflection pair on the upper
/// hemisphere.
///
/// * `i` - Incident direction pointing away.
/// * `o` - Outgoing direction.
pub(crate) fn half_vector(i: &Vector3f, o: &Vector3f) -> Option<Vector3f> {
    if i.z <= 0.0 || o.z <= 0.0 {
        return None;
    }
    let h = *i + *o;
    let len2 = h.length_squared();
    if len2 == 0.0 {
        return None;
    }
    Some(h / len2.sqrt())
}

/// Returns the density of sampling the reflection about `m` with visible
/// normal sampling, `G1(i) D(m) / (4 cos θi)`.
///
/// * `distribution` - Microfacet distribution.
/// * `i`            - Incident direction pointing away.
/// * `m`            - Microfacet normal.
pub(crate) fn ggx_reflection_pdf(distribution: &GgxDistribution, i: &Vector3f, m: &Vector3f) -> Float {
    if i.z <= 0.0 {
        return 0.0;
    }
    distribution.g1(i) * distribution.d(m) / (4.0 * i.z)
}
