//! Layered Diffuse

use super::*;

/// BRDF of a diffuse body under a rough dielectric skin. The skin reflects
/// through a GGX microfacet lobe and the light it transmits is scattered
/// diffusely by the body with interreflections below the interface.
#[derive(Copy, Clone, Debug)]
pub struct LayeredDiffuse {
    /// Microfacet distribution of the skin.
    distribution: GgxDistribution,

    /// Relative index of refraction of the interface, greater than 1.
    n: Float,

    /// Body reflectance per sampled wavelength.
    kd: SampledSpectra,

    /// Average internal reflectance of the interface.
    ri: Float,

    /// Probability of sampling the skin lobe.
    skin_probability: Float,
}

impl LayeredDiffuse {
    /// Create a new `LayeredDiffuse`.
    ///
    /// * `roughness` - Roughness of the skin in [0, 1].
    /// * `n`         - Relative index of refraction of the interface. Values
    ///                 are clamped to be strictly greater than 1.
    /// * `kd`        - Body reflectance per sampled wavelength.
    pub fn new(roughness: Float, n: Float, kd: SampledSpectra) -> Self {
        let n = max(n, 1.0 + 1e-3);
        let re = average_external_reflectance(n);
        let ri = 1.0 - (1.0 - re) / (n * n);

        let kd_mean = kd.average();
        let rs = 1.0 - (1.0 - ri) * n * n;
        let rb = sqr(n * (1.0 - ri)) * kd_mean / (1.0 - kd_mean * ri);
        let skin_probability = if rs + rb > 0.0 { rs / (rs + rb) } else { 1.0 };

        Self {
            distribution: GgxDistribution::new(roughness),
            n,
            kd,
            ri,
            skin_probability,
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
            Some(m) => self.mixture_pdf(i, o, &m),
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

        let fresnel = fr_dielectric(i.dot(&m), self.n);
        let skin = fresnel * self.distribution.d(&m) * self.distribution.g2(i, o) / (4.0 * i.z * o.z);

        let n2 = self.n * self.n;
        let transmit = (1.0 - fr_dielectric(i.z, self.n)) * (1.0 - fr_dielectric(o.z, self.n));
        let mut body = SampledSpectra::ZERO;
        for k in 0..SAMPLE_SIZE {
            let kd = self.kd[k];
            body[k] = kd / (PI * n2 * (1.0 - kd * self.ri)) * transmit;
        }

        (body + skin, self.mixture_pdf(i, o, &m))
    }

    /// Returns the probability weighted sum of both lobes' densities.
    fn mixture_pdf(&self, i: &Vector3f, o: &Vector3f, m: &Vector3f) -> Float {
        let ps = self.skin_probability;
        ps * ggx_reflection_pdf(&self.distribution, i, m) + (1.0 - ps) * cosine_hemisphere_pdf(o.z)
    }

    /// Samples the skin lobe or the body lobe in proportion to their total
    /// reflectance.
    ///
    /// * `i`       - Incident direction in the local frame pointing away.
    /// * `sampler` - Random number source.
    pub fn sample_f<S: Sampler + ?Sized>(&self, i: &Vector3f, sampler: &mut S) -> BxdfSample {
        if i.z <= 0.0 {
            return BxdfSample::invalid();
        }
        let o = if sampler.sample() < self.skin_probability {
            let m = self.distribution.sample_visible_normal(i, &sample_2d(sampler));
            reflect(i, &m)
        } else {
            cosine_sample_hemisphere(&sample_2d(sampler))
        };
        if o.z <= 0.0 {
            return BxdfSample::invalid();
        }

        let (f, pdf) = self.f_pdf(i, &o);
        if pdf <= 0.0 {
            return BxdfSample::invalid();
        }
        BxdfSample::new(SampledDirection::new(o, pdf), f * (o.z / pdf))
    }
}

/// Returns the cosine weighted hemispherical average of the Fresnel
/// reflectance seen from outside an interface with relative index `n > 1`.
///
/// * `n` - Relative index of refraction.
pub fn average_external_reflectance(n: Float) -> Float {
    debug_assert!(n > 1.0);
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n2 * n2;
    let t1 = 2.0 * n3 * (n2 + 2.0 * n - 1.0) / ((n2 + 1.0) * (n4 - 1.0));
    let t2 = (n - 1.0) * (3.0 * n + 1.0) / (6.0 * sqr(n + 1.0));
    let t3 = n.ln() * 8.0 * n4 * (n4 + 1.0) / ((n2 + 1.0) * sqr(n4 - 1.0));
    let t4 = ((n - 1.0) / (n + 1.0)).ln() * n2 * sqr(n2 - 1.0) / (n2 + 1.0).powi(3);
    0.5 - t1 + t2 + t3 + t4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_reflectance_matches_quadrature() {
        for n in [1.2, 1.5, 2.0] {
            // 2 ∫ F(cos θ) cos θ sin θ dθ
            let steps = 100_000;
            let dt = PI_OVER_TWO / steps as Float;
            let mut sum = 0.0;
            for s in 0..steps {
                let theta = (s as Float + 0.5) * dt;
                sum += fr_dielectric(theta.cos(), n) * theta.cos() * theta.sin() * dt;
            }
            let expected = 2.0 * sum;
            let re = average_external_reflectance(n);
            assert!((re - expected).abs() < 1e-4, "n {} closed form {} quadrature {}", n, re, expected);
        }
    }

    #[test]
    fn skin_probability_is_a_probability() {
        for kd in [0.0, 0.3, 1.0] {
            let bxdf = LayeredDiffuse::new(0.4, 1.5, SampledSpectra::new(kd));
            assert!((0.0..=1.0).contains(&bxdf.skin_probability));
        }
    }
}
