//! Reflection and surface scattering models

use crate::base::*;
use crate::geometry::*;
use crate::microfacet::*;
use crate::rng::Sampler;
use crate::sampling::*;
use crate::spectrum::*;
use std::fmt;

mod bxdf_sample;
mod bxdf_type;
mod cloth;
mod common;
mod fresnel;
mod ggx_conductor;
mod ggx_dielectric;
mod lambert;
mod layered_diffuse;
mod non_directional_light;
mod sensor;
mod specular;
mod specular_dielectric;

// Re-export
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use cloth::*;
pub use common::*;
pub use fresnel::*;
pub(crate) use ggx_conductor::{ggx_reflection_pdf, half_vector};
pub use ggx_conductor::GgxConductor;
pub use ggx_dielectric::*;
pub use lambert::*;
pub use layered_diffuse::*;
pub use non_directional_light::*;
pub use sensor::*;
pub use specular::*;
pub use specular_dielectric::*;

/// Scattering model at a single shading point.
///
/// Every method takes world space directions: `vin` travels into the surface
/// and `vout` leaves it. Both are expressed in the local frame of `frame`
/// before the concrete model sees them.
#[derive(Clone, Debug)]
pub enum Bxdf {
    Lambert(Lambert),
    Specular(Specular),
    SpecularDielectric(SpecularDielectric),
    GgxConductor(GgxConductor),
    GgxDielectric(GgxDielectric),
    LayeredDiffuse(LayeredDiffuse),
    Cloth(Cloth),
    Sensor(Sensor),
    NonDirectionalLight(NonDirectionalLight),
}

impl Bxdf {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        match self {
            Self::Lambert(bxdf) => bxdf.get_type(),
            Self::Specular(bxdf) => bxdf.get_type(),
            Self::SpecularDielectric(bxdf) => bxdf.get_type(),
            Self::GgxConductor(bxdf) => bxdf.get_type(),
            Self::GgxDielectric(bxdf) => bxdf.get_type(),
            Self::LayeredDiffuse(bxdf) => bxdf.get_type(),
            Self::Cloth(bxdf) => bxdf.get_type(),
            Self::Sensor(bxdf) => bxdf.get_type(),
            Self::NonDirectionalLight(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns the shading category.
    pub fn shader_type(&self) -> ShaderType {
        self.get_type().shader_type()
    }

    /// Returns true if the model reflects light.
    pub fn is_reflective(&self) -> bool {
        self.get_type().contains(BxdfType::REFLECTION)
    }

    /// Returns true if the model transmits light.
    pub fn is_transmissive(&self) -> bool {
        self.get_type().contains(BxdfType::TRANSMISSION)
    }

    /// Returns true if the model emits light.
    pub fn is_emissive(&self) -> bool {
        self.get_type().contains(BxdfType::EMISSION)
    }

    /// Returns true if the model resolves only the primary wavelength.
    pub fn wavelength_is_selected(&self) -> bool {
        self.get_type().contains(BxdfType::WAVELENGTH_SELECTION)
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions. Delta distributions evaluate to zero.
    ///
    /// * `vin`         - Incident direction travelling into the surface.
    /// * `vout`        - Outgoing direction.
    /// * `frame`       - Shading frame.
    /// * `wavelengths` - Sampled wavelengths.
    pub fn eval_radiance(
        &self,
        vin: &Vector3f,
        vout: &Vector3f,
        frame: &ShadingFrame,
        wavelengths: &WavelengthSamples,
    ) -> SampledSpectra {
        let (i, o) = to_local(vin, vout, frame);
        let f = match self {
            Self::Lambert(bxdf) => bxdf.f(&i, &o),
            Self::Specular(_) | Self::SpecularDielectric(_) => SampledSpectra::ZERO,
            Self::GgxConductor(bxdf) => bxdf.f(&i, &o),
            Self::GgxDielectric(bxdf) => bxdf.f(&i, &o, wavelengths),
            Self::LayeredDiffuse(bxdf) => bxdf.f(&i, &o),
            Self::Cloth(bxdf) => bxdf.f(&i, &o),
            Self::Sensor(bxdf) => bxdf.f(&o),
            Self::NonDirectionalLight(bxdf) => bxdf.f(&o),
        };
        zero_if_invalid(f)
    }

    /// Evaluates the density with which `sample` would choose `vout`. Delta
    /// distributions evaluate to zero.
    ///
    /// * `vin`         - Incident direction travelling into the surface.
    /// * `vout`        - Outgoing direction.
    /// * `frame`       - Shading frame.
    /// * `wavelengths` - Sampled wavelengths.
    pub fn eval_pdf(&self, vin: &Vector3f, vout: &Vector3f, frame: &ShadingFrame, wavelengths: &WavelengthSamples) -> Float {
        let (i, o) = to_local(vin, vout, frame);
        let pdf = match self {
            Self::Lambert(bxdf) => bxdf.pdf(&i, &o),
            Self::Specular(_) | Self::SpecularDielectric(_) => 0.0,
            Self::GgxConductor(bxdf) => bxdf.pdf(&i, &o),
            Self::GgxDielectric(bxdf) => bxdf.pdf(&i, &o, wavelengths),
            Self::LayeredDiffuse(bxdf) => bxdf.pdf(&i, &o),
            Self::Cloth(bxdf) => bxdf.pdf(&i, &o),
            Self::Sensor(bxdf) => bxdf.pdf(&o),
            Self::NonDirectionalLight(bxdf) => bxdf.pdf(&o),
        };
        if pdf.is_finite() {
            pdf
        } else {
            0.0
        }
    }

    /// Returns the values of `eval_radiance` and `eval_pdf` sharing the
    /// common terms.
    ///
    /// * `vin`         - Incident direction travelling into the surface.
    /// * `vout`        - Outgoing direction.
    /// * `frame`       - Shading frame.
    /// * `wavelengths` - Sampled wavelengths.
    pub fn eval_radiance_and_pdf(
        &self,
        vin: &Vector3f,
        vout: &Vector3f,
        frame: &ShadingFrame,
        wavelengths: &WavelengthSamples,
    ) -> (SampledSpectra, Float) {
        let (i, o) = to_local(vin, vout, frame);
        let (f, pdf) = match self {
            Self::Lambert(bxdf) => (bxdf.f(&i, &o), bxdf.pdf(&i, &o)),
            Self::Specular(_) | Self::SpecularDielectric(_) => (SampledSpectra::ZERO, 0.0),
            Self::GgxConductor(bxdf) => bxdf.f_pdf(&i, &o),
            Self::GgxDielectric(bxdf) => bxdf.f_pdf(&i, &o, wavelengths),
            Self::LayeredDiffuse(bxdf) => bxdf.f_pdf(&i, &o),
            Self::Cloth(bxdf) => bxdf.f_pdf(&i, &o),
            Self::Sensor(bxdf) => (bxdf.f(&o), bxdf.pdf(&o)),
            Self::NonDirectionalLight(bxdf) => (bxdf.f(&o), bxdf.pdf(&o)),
        };
        (zero_if_invalid(f), if pdf.is_finite() { pdf } else { 0.0 })
    }

    /// Draws an outgoing direction from the model's importance distribution.
    /// The weight is `f * cos / pdf`; a zero pdf marks an invalid sample.
    ///
    /// * `vin`         - Incident direction travelling into the surface.
    /// * `frame`       - Shading frame.
    /// * `wavelengths` - Sampled wavelengths.
    /// * `sampler`     - Random number source.
    pub fn sample<S: Sampler + ?Sized>(
        &self,
        vin: &Vector3f,
        frame: &ShadingFrame,
        wavelengths: &WavelengthSamples,
        sampler: &mut S,
    ) -> BxdfSample {
        let i = -frame.to_local(vin);
        let mut sample = match self {
            Self::Lambert(bxdf) => bxdf.sample_f(&i, sampler),
            Self::Specular(bxdf) => bxdf.sample_f(&i),
            Self::SpecularDielectric(bxdf) => bxdf.sample_f(&i, wavelengths, sampler),
            Self::GgxConductor(bxdf) => bxdf.sample_f(&i, sampler),
            Self::GgxDielectric(bxdf) => bxdf.sample_f(&i, wavelengths, sampler),
            Self::LayeredDiffuse(bxdf) => bxdf.sample_f(&i, sampler),
            Self::Cloth(bxdf) => bxdf.sample_f(&i, sampler),
            Self::Sensor(bxdf) => bxdf.sample_f(sampler),
            Self::NonDirectionalLight(bxdf) => bxdf.sample_f(sampler),
        };
        if !sample.is_valid() || !sample.weight.is_finite() {
            return BxdfSample::invalid();
        }
        sample.direction.direction = frame.to_world(&sample.direction.direction).normalize();
        sample
    }
}

/// Returns the incident direction pointing away from the surface and the
/// outgoing direction in the local frame.
#[inline]
fn to_local(vin: &Vector3f, vout: &Vector3f, frame: &ShadingFrame) -> (Vector3f, Vector3f) {
    (-frame.to_local(vin), frame.to_local(vout))
}

/// Replaces non-finite values resulting from degenerate configurations with
/// zero.
#[inline]
fn zero_if_invalid(f: SampledSpectra) -> SampledSpectra {
    if f.is_finite() {
        f
    } else {
        SampledSpectra::ZERO
    }
}

impl fmt::Display for Bxdf {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lambert(_) => "Lambert",
            Self::Specular(_) => "Specular",
            Self::SpecularDielectric(_) => "SpecularDielectric",
            Self::GgxConductor(_) => "GgxConductor",
            Self::GgxDielectric(_) => "GgxDielectric",
            Self::LayeredDiffuse(_) => "LayeredDiffuse",
            Self::Cloth(_) => "Cloth",
            Self::Sensor(_) => "Sensor",
            Self::NonDirectionalLight(_) => "NonDirectionalLight",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::*;
    use crate::rng::RNG;
    use std::sync::Arc;

    const SAMPLES: usize = 1_000_000;

    fn wavelengths() -> WavelengthSamples {
        WavelengthSamples::rgb(1)
    }

    fn gold() -> (SampledSpectra, SampledSpectra) {
        (
            SampledSpectra::from_values([1.3, 0.4, 0.2]),
            SampledSpectra::from_values([1.9, 2.5, 3.5]),
        )
    }

    /// Models with a non-delta distribution.
    fn glossy_models() -> Vec<Bxdf> {
        let (eta, k) = gold();
        vec![
            Bxdf::Lambert(Lambert::new(SampledSpectra::from_values([0.2, 0.5, 0.8]))),
            Bxdf::GgxConductor(GgxConductor::new(0.6, eta, k)),
            Bxdf::GgxDielectric(GgxDielectric::new(0.6, 1.5)),
            Bxdf::GgxDielectric(GgxDielectric::new(0.6, 1.0 / 1.5)),
            Bxdf::LayeredDiffuse(LayeredDiffuse::new(0.5, 1.5, SampledSpectra::from_values([0.7, 0.3, 0.1]))),
            Bxdf::Cloth(Cloth::new(1.46, 0.3, 0.25, 0.4, 0.8, SampledSpectra::from_values([0.9, 0.6, 0.2]))),
            Bxdf::NonDirectionalLight(NonDirectionalLight::new(SampledSpectra::new(2.0))),
        ]
    }

    /// Models satisfying f(vin, vout) = f(-vout, -vin).
    fn reciprocal_models() -> Vec<Bxdf> {
        glossy_models()
            .into_iter()
            .filter(|b| !b.wavelength_is_selected() && !b.is_emissive())
            .collect()
    }

    fn random_direction(rng: &mut RNG) -> Vector3f {
        uniform_sample_sphere(&[rng.sample(), rng.sample()])
    }

    fn upper(v: Vector3f, n: &Vector3f) -> Vector3f {
        if v.dot(n) < 0.0 {
            -v
        } else {
            v
        }
    }

    fn relative_eq(a: Float, b: Float, tolerance: Float) -> bool {
        (a - b).abs() <= tolerance * max(max(a.abs(), b.abs()), 1e-300)
    }

    /// ∫ f(vin, o) |cos θo| dω by midpoint quadrature over the sphere in the
    /// identity frame.
    fn hemispherical_integral(bxdf: &Bxdf, vin: &Vector3f, w: &WavelengthSamples) -> SampledSpectra {
        let frame = ShadingFrame::default();
        let (nt, np) = (1500, 600);
        let dt = PI / nt as Float;
        let dp = TWO_PI / np as Float;
        let mut sum = SampledSpectra::ZERO;
        for t in 0..nt {
            let theta = (t as Float + 0.5) * dt;
            let (sin_t, cos_t) = theta.sin_cos();
            for p in 0..np {
                let phi = (p as Float + 0.5) * dp;
                let o = Vector3f::new(sin_t * phi.cos(), sin_t * phi.sin(), cos_t);
                let f = bxdf.eval_radiance(vin, &o, &frame, w);
                sum += f * (cos_t.abs() * sin_t * dt * dp);
            }
        }
        sum
    }

    /// Average of the sample weights.
    fn average_weight(bxdf: &Bxdf, vin: &Vector3f, w: &WavelengthSamples, seed: u64) -> SampledSpectra {
        let frame = ShadingFrame::default();
        let mut rng = RNG::new(seed);
        let mut sum = SampledSpectra::ZERO;
        for _ in 0..SAMPLES {
            let s = bxdf.sample(vin, &frame, w, &mut rng);
            if s.is_valid() {
                sum += s.weight;
            }
        }
        sum / SAMPLES as Float
    }

    #[test]
    fn combined_evaluation_matches_separate_calls() {
        let mut rng = RNG::new(1);
        let w = wavelengths();
        for bxdf in glossy_models() {
            for _ in 0..10_000 {
                let normal = random_direction(&mut rng);
                let frame = ShadingFrame::from_normal(&normal);
                let vin = -upper(random_direction(&mut rng), &normal);
                let vout = if bxdf.is_transmissive() {
                    random_direction(&mut rng)
                } else {
                    upper(random_direction(&mut rng), &normal)
                };

                let f = bxdf.eval_radiance(&vin, &vout, &frame, &w);
                let pdf = bxdf.eval_pdf(&vin, &vout, &frame, &w);
                let (f2, pdf2) = bxdf.eval_radiance_and_pdf(&vin, &vout, &frame, &w);

                assert!(relative_eq(pdf, pdf2, 1e-9), "{} pdf {} vs {}", bxdf, pdf, pdf2);
                for k in 0..SAMPLE_SIZE {
                    assert!(relative_eq(f[k], f2[k], 1e-9), "{} f {} vs {}", bxdf, f[k], f2[k]);
                }
                if !f.is_zero() {
                    assert!(pdf > 0.0, "{} has radiance {} with zero pdf", bxdf, f);
                }
            }
        }
    }

    #[test]
    fn sampled_pdf_matches_evaluated_pdf() {
        let w = wavelengths();
        let frame = ShadingFrame::from_normal(&Vector3f::new(0.3, -0.2, 0.9).normalize());
        let vin = -frame.to_world(&Vector3f::new(0.4, 0.1, 0.8).normalize());
        let mut rng = RNG::new(5);
        for bxdf in glossy_models() {
            for _ in 0..1000 {
                let s = bxdf.sample(&vin, &frame, &w, &mut rng);
                if !s.is_valid() {
                    continue;
                }
                let (f, pdf) = bxdf.eval_radiance_and_pdf(&vin, &s.direction.direction, &frame, &w);
                assert!(relative_eq(pdf, s.direction.pdf, 1e-5), "{} {} vs {}", bxdf, pdf, s.direction.pdf);
                let cos = s.direction.direction.dot(&frame.normal).abs();
                let expected = f * (cos / pdf);
                for k in 0..SAMPLE_SIZE {
                    assert!(
                        (expected[k] - s.weight[k]).abs() <= 1e-5 * max(expected[k].abs(), 1.0),
                        "{} weight {} vs {}",
                        bxdf,
                        s.weight,
                        expected
                    );
                }
            }
        }
    }

    #[test]
    fn importance_sampling_is_unbiased() {
        let w = wavelengths();
        let vin = -Vector3f::new(0.5, 0.2, 0.7).normalize();
        for (seed, bxdf) in glossy_models().into_iter().enumerate() {
            let expected = hemispherical_integral(&bxdf, &vin, &w);
            let estimate = average_weight(&bxdf, &vin, &w, seed as u64);
            for k in 0..SAMPLE_SIZE {
                assert!(
                    (estimate[k] - expected[k]).abs() <= 0.02 * expected[k] + 1e-3,
                    "{}: estimate {} quadrature {}",
                    bxdf,
                    estimate,
                    expected
                );
            }
        }
    }

    #[test]
    fn specular_weights_are_exact() {
        let w = wavelengths();
        let frame = ShadingFrame::default();
        let vin = -Vector3f::new(0.6, 0.0, 0.8);
        let mut rng = RNG::new(3);

        let (eta, k) = gold();
        let mirror = Bxdf::Specular(Specular::new(eta, k));
        let s = mirror.sample(&vin, &frame, &w, &mut rng);
        assert!((s.direction.direction - Vector3f::new(-0.6, 0.0, 0.8)).length() < 1e-12);
        let fresnel = fr_conductor_spectra(0.8, &eta, &k);
        for i in 0..SAMPLE_SIZE {
            assert!((s.weight[i] - fresnel[i]).abs() < 1e-12);
        }
        assert_eq!(mirror.eval_pdf(&vin, &s.direction.direction, &frame, &w), 0.0);

        let glass = Bxdf::SpecularDielectric(SpecularDielectric::new(1.5));
        let estimate = average_weight(&glass, &vin, &w, 4);
        assert!((estimate[w.primary_index()] - 1.0).abs() < 1e-12);
        assert_eq!(estimate[0], 0.0);
        assert_eq!(estimate[2], 0.0);
    }

    #[test]
    fn specular_dielectric_reflects_with_fresnel_probability() {
        let w = wavelengths();
        let frame = ShadingFrame::default();
        let vin = -Vector3f::new(0.6, 0.0, 0.8);
        let glass = Bxdf::SpecularDielectric(SpecularDielectric::new(1.5));
        let mut rng = RNG::new(8);
        let n = 200_000;
        let reflected = (0..n)
            .filter(|_| glass.sample(&vin, &frame, &w, &mut rng).direction.direction.z > 0.0)
            .count();
        let expected = fr_dielectric(0.8, 1.5);
        assert!((reflected as Float / n as Float - expected).abs() < 0.005);

        // Beyond the critical angle everything reflects.
        let inside = Bxdf::SpecularDielectric(SpecularDielectric::new(1.0 / 1.5));
        let grazing = -Vector3f::new(0.9, 0.0, 0.19_f64.sqrt());
        for _ in 0..1000 {
            let s = inside.sample(&grazing, &frame, &w, &mut rng);
            assert!(s.direction.direction.z > 0.0);
        }
    }

    #[test]
    fn energy_is_conserved_at_normal_incidence() {
        let w = wavelengths();
        let vin = -Vector3f::Z_AXIS;
        let (eta, k) = gold();
        let models = vec![
            Bxdf::GgxConductor(GgxConductor::new(0.3, eta, k)),
            Bxdf::GgxConductor(GgxConductor::new(0.9, SampledSpectra::new(1.0), SampledSpectra::new(1e3))),
            Bxdf::GgxDielectric(GgxDielectric::new(0.5, 1.5)),
            Bxdf::GgxDielectric(GgxDielectric::new(0.8, 1.0 / 1.33)),
        ];
        for (seed, bxdf) in models.into_iter().enumerate() {
            let estimate = average_weight(&bxdf, &vin, &w, 100 + seed as u64);
            for k in 0..SAMPLE_SIZE {
                assert!(estimate[k] <= 1.0 + 1e-3, "{} albedo {}", bxdf, estimate);
            }
        }
    }

    #[test]
    fn reciprocity() {
        let w = wavelengths();
        let mut rng = RNG::new(9);
        for bxdf in reciprocal_models() {
            for _ in 0..10_000 {
                let normal = random_direction(&mut rng);
                let frame = ShadingFrame::from_normal(&normal);
                let vin = -upper(random_direction(&mut rng), &normal);
                let vout = upper(random_direction(&mut rng), &normal);
                let f1 = bxdf.eval_radiance(&vin, &vout, &frame, &w);
                let f2 = bxdf.eval_radiance(&-vout, &-vin, &frame, &w);
                for k in 0..SAMPLE_SIZE {
                    assert!(relative_eq(f1[k], f2[k], 1e-9), "{} {} vs {}", bxdf, f1, f2);
                }
            }
        }
    }

    #[test]
    fn below_surface_is_zero() {
        let w = wavelengths();
        let frame = ShadingFrame::default();
        let vin = -Vector3f::new(0.0, 0.6, 0.8);
        let vout = Vector3f::new(0.0, 0.6, -0.8);
        for bxdf in reciprocal_models() {
            assert!(bxdf.eval_radiance(&vin, &vout, &frame, &w).is_zero(), "{}", bxdf);
            assert_eq!(bxdf.eval_pdf(&vin, &vout, &frame, &w), 0.0, "{}", bxdf);
        }
    }

    #[test]
    fn capability_queries() {
        let (eta, k) = gold();
        let glass = Bxdf::GgxDielectric(GgxDielectric::new(0.2, 1.5));
        assert!(glass.is_reflective() && glass.is_transmissive() && glass.wavelength_is_selected());
        assert!(!glass.is_emissive());

        let metal = Bxdf::Specular(Specular::new(eta, k));
        assert_eq!(metal.shader_type(), ShaderType::Specular);
        assert!(!metal.is_transmissive());

        let light = Bxdf::NonDirectionalLight(NonDirectionalLight::new(SampledSpectra::ONE));
        assert!(light.is_emissive());
        assert_eq!(light.shader_type(), ShaderType::Diffuse);

        let cloth = Bxdf::Cloth(Cloth::new(1.5, 0.5, 0.2, 0.3, 0.5, SampledSpectra::ONE));
        assert_eq!(cloth.shader_type(), ShaderType::Glossy);
        assert!(!cloth.wavelength_is_selected());
    }

    #[test]
    fn sensor_samples_through_its_pixel() {
        let camera = PinholeCamera::new(
            Point3f::new(0.0, 1.0, 4.0),
            Point3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            40.0,
            (32, 32),
        );
        let frame = camera.frame();
        let sensor = Bxdf::Sensor(Sensor::new(Arc::new(camera), (7, 21)));
        let w = wavelengths();
        let vin = -frame.normal;
        let mut rng = RNG::new(12);
        for _ in 0..1000 {
            let s = sensor.sample(&vin, &frame, &w, &mut rng);
            assert!(s.is_valid());
            assert_eq!(s.weight, SampledSpectra::ONE);
            let (f, pdf) = sensor.eval_radiance_and_pdf(&vin, &s.direction.direction, &frame, &w);
            assert!(relative_eq(pdf, s.direction.pdf, 1e-6));
            let cos = s.direction.direction.dot(&frame.normal);
            assert!((f[0] * cos / pdf - 1.0).abs() < 1e-6);
        }
    }
}
