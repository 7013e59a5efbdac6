//! Microcylinder Cloth

use super::*;

/// Probability of sampling the surface scattering lobe.
const SURFACE_PROBABILITY: Float = 0.5;

/// BRDF for woven cloth modelled as cylindrical threads running along the
/// tangent of the shading frame. Light either reflects off the thread surface
/// or refracts into the thread and scatters in its volume.
#[derive(Copy, Clone, Debug)]
pub struct Cloth {
    /// Relative index of refraction of the thread.
    eta: Float,

    /// Isotropic fraction of the volume scattering.
    kd: Float,

    /// Width of the surface scattering lobe (radians).
    gamma_r: Float,

    /// Width of the volume scattering lobe (radians).
    gamma_v: Float,

    /// Width of the azimuthal shadowing-masking falloff (radians).
    rho: Float,

    /// Volume scattering albedo per sampled wavelength.
    albedo: SampledSpectra,
}

/// Longitudinal and azimuthal angles of a direction around the thread axis.
#[derive(Copy, Clone, Debug)]
struct ThreadAngles {
    theta: Float,
    phi: Float,
}

impl ThreadAngles {
    /// Returns the angles of a local direction or `None` below the surface.
    fn of(v: &Vector3f) -> Option<Self> {
        if v.z <= 0.0 {
            return None;
        }
        Some(Self {
            theta: clamp(v.x, -1.0, 1.0).asin(),
            phi: v.y.atan2(v.z),
        })
    }

    /// Returns the local direction with these angles.
    fn direction(&self) -> Vector3f {
        let cos_theta = self.theta.cos();
        Vector3f::new(self.theta.sin(), cos_theta * self.phi.sin(), cos_theta * self.phi.cos())
    }
}

impl Cloth {
    /// Create a new `Cloth`.
    ///
    /// * `eta`     - Relative index of refraction of the thread.
    /// * `kd`      - Isotropic fraction of the volume scattering in [0, 1].
    /// * `gamma_r` - Width of the surface scattering lobe (radians).
    /// * `gamma_v` - Width of the volume scattering lobe (radians).
    /// * `rho`     - Width of the azimuthal shadowing-masking falloff (radians).
    /// * `albedo`  - Volume scattering albedo per sampled wavelength.
    pub fn new(eta: Float, kd: Float, gamma_r: Float, gamma_v: Float, rho: Float, albedo: SampledSpectra) -> Self {
        Self {
            eta,
            kd: clamp(kd, 0.0, 1.0),
            gamma_r: max(gamma_r, 1e-3),
            gamma_v: max(gamma_v, 1e-3),
            rho: max(rho, 1e-3),
            albedo,
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
        match (ThreadAngles::of(i), ThreadAngles::of(o)) {
            (Some(ai), Some(ao)) => self.reflectance(&ai, &ao),
            _ => SampledSpectra::ZERO,
        }
    }

    /// Returns the density of sampling `o`.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    /// * `o` - Outgoing direction in the local frame.
    pub fn pdf(&self, i: &Vector3f, o: &Vector3f) -> Float {
        match (ThreadAngles::of(i), ThreadAngles::of(o)) {
            (Some(ai), Some(ao)) => self.angles_pdf(&ai, &ao),
            _ => 0.0,
        }
    }

    /// Returns the value of the BRDF and the density of sampling `o`.
    ///
    /// * `i` - Incident direction in the local frame pointing away.
    /// * `o` - Outgoing direction in the local frame.
    pub fn f_pdf(&self, i: &Vector3f, o: &Vector3f) -> (SampledSpectra, Float) {
        match (ThreadAngles::of(i), ThreadAngles::of(o)) {
            (Some(ai), Some(ao)) => (self.reflectance(&ai, &ao), self.angles_pdf(&ai, &ao)),
            _ => (SampledSpectra::ZERO, 0.0),
        }
    }

    /// Samples the surface or the volume lobe with equal probability.
    ///
    /// * `i`       - Incident direction in the local frame pointing away.
    /// * `sampler` - Random number source.
    pub fn sample_f<S: Sampler + ?Sized>(&self, i: &Vector3f, sampler: &mut S) -> BxdfSample {
        let ai = match ThreadAngles::of(i) {
            Some(ai) => ai,
            None => return BxdfSample::invalid(),
        };

        let theta = if sampler.sample() < SURFACE_PROBABILITY {
            sample_cauchy_theta(ai.theta, self.gamma_r, sampler.sample())
        } else if sampler.sample() < self.kd {
            // Isotropic volume scattering.
            (2.0 * sampler.sample() - 1.0).asin()
        } else {
            sample_cauchy_theta(ai.theta, self.gamma_v, sampler.sample())
        };
        let ao = ThreadAngles {
            theta,
            phi: (2.0 * sampler.sample() - 1.0).asin(),
        };

        let o = ao.direction();
        if o.z <= 0.0 {
            return BxdfSample::invalid();
        }
        let pdf = self.angles_pdf(&ai, &ao);
        if !(pdf > 0.0 && pdf.is_finite()) {
            return BxdfSample::invalid();
        }
        let f = self.reflectance(&ai, &ao);
        BxdfSample::new(SampledDirection::new(o, pdf), f * (o.z / pdf))
    }

    /// Evaluates the BRDF from the thread angles.
    fn reflectance(&self, ai: &ThreadAngles, ao: &ThreadAngles) -> SampledSpectra {
        let theta_d = 0.5 * (ai.theta - ao.theta);
        let theta_h = 0.5 * (ai.theta + ao.theta);
        let phi_d = ai.phi - ao.phi;

        let cos_theta_d = theta_d.cos();
        if cos_theta_d <= 0.0 {
            return SampledSpectra::ZERO;
        }
        let k = self.shadowing_masking(ai.phi, ao.phi) / (cos_theta_d * cos_theta_d);

        let cos_n = clamp(cos_theta_d * (0.5 * phi_d).cos(), 0.0, 1.0);
        let fresnel = fr_dielectric(cos_n, self.eta);
        let f_r = (0.5 * phi_d).cos() * unit_gaussian(self.gamma_r, theta_h);
        let mut f = SampledSpectra::new(fresnel * f_r * k);

        if fresnel < 1.0 {
            // Fresnel at the refracted angle inside the thread.
            let sin_m = (1.0 - cos_n * cos_n).sqrt() / self.eta;
            let cos_m = safe_sqrt(1.0 - sin_m * sin_m);
            let fresnel_m = fr_dielectric(cos_m, self.eta);
            if fresnel_m < 1.0 {
                let lobe = self.kd + (1.0 - self.kd) * unit_gaussian(self.gamma_v, theta_h);
                let f_v = (1.0 - fresnel_m) * lobe / (ai.theta.cos() + ao.theta.cos());
                f += self.albedo * ((1.0 - fresnel) * f_v * k);
            }
        }
        f
    }

    /// Returns `(1 - g) cos φi cos φo + g min(cos φi, cos φo)` with a gaussian
    /// falloff `g` over the azimuthal difference.
    fn shadowing_masking(&self, phi_i: Float, phi_o: Float) -> Float {
        let cos_i = max(phi_i.cos(), 0.0);
        let cos_o = max(phi_o.cos(), 0.0);
        let g = gaussian(self.rho, phi_i - phi_o);
        (1.0 - g) * cos_i * cos_o + g * min(cos_i, cos_o)
    }

    /// Returns the solid angle density of the sampling mixture.
    fn angles_pdf(&self, ai: &ThreadAngles, ao: &ThreadAngles) -> Float {
        let cos_theta_o = ao.theta.cos();
        if cos_theta_o <= 0.0 {
            return 0.0;
        }
        let phi_pdf = 0.5 * max(ao.phi.cos(), 0.0);

        let surface = cauchy_theta_pdf(ai.theta, ao.theta, self.gamma_r);
        let volume = self.kd * 0.5 * cos_theta_o + (1.0 - self.kd) * cauchy_theta_pdf(ai.theta, ao.theta, self.gamma_v);
        let theta_pdf = SURFACE_PROBABILITY * surface + (1.0 - SURFACE_PROBABILITY) * volume;

        theta_pdf * phi_pdf / cos_theta_o
    }
}

/// Returns `exp(-x² / (2 γ²))`.
#[inline]
fn gaussian(gamma: Float, x: Float) -> Float {
    (-x * x / (2.0 * gamma * gamma)).exp()
}

/// Returns the normal distribution density with zero mean and deviation γ.
#[inline]
fn unit_gaussian(gamma: Float, x: Float) -> Float {
    gaussian(gamma, x) / ((TWO_PI).sqrt() * gamma)
}

/// Returns the bounds `(a, b)` of the truncated Cauchy distribution centred
/// on the mirror angle `-θi` over [-π/2, π/2].
#[inline]
fn cauchy_bounds(theta_i: Float, gamma: Float) -> (Float, Float) {
    let mu = -theta_i;
    (((PI_OVER_TWO - mu) / gamma).atan(), ((-PI_OVER_TWO - mu) / gamma).atan())
}

/// Draws θo from the truncated Cauchy distribution.
#[inline]
fn sample_cauchy_theta(theta_i: Float, gamma: Float, u: Float) -> Float {
    let (a, b) = cauchy_bounds(theta_i, gamma);
    let theta = gamma * (u * (a - b) + b).tan() - theta_i;
    clamp(theta, -PI_OVER_TWO, PI_OVER_TWO)
}

/// Returns the density of θo under the truncated Cauchy distribution.
#[inline]
fn cauchy_theta_pdf(theta_i: Float, theta_o: Float, gamma: Float) -> Float {
    let (a, b) = cauchy_bounds(theta_i, gamma);
    gamma / ((sqr(theta_o + theta_i) + gamma * gamma) * (a - b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cauchy_density_integrates_to_one() {
        for theta_i in [-1.2, 0.0, 0.7] {
            let steps = 200_000;
            let dt = PI / steps as Float;
            let sum: Float = (0..steps)
                .map(|s| cauchy_theta_pdf(theta_i, -PI_OVER_TWO + (s as Float + 0.5) * dt, 0.3) * dt)
                .sum();
            assert!((sum - 1.0).abs() < 1e-6, "theta_i {} integral {}", theta_i, sum);
        }
    }

    #[test]
    fn thread_angles_round_trip() {
        let v = Vector3f::new(0.3, -0.4, 0.5).normalize();
        let a = ThreadAngles::of(&v).unwrap();
        assert!((a.direction() - v).length() < 1e-12);
    }

    #[test]
    fn below_surface_is_black() {
        let cloth = Cloth::new(1.5, 0.3, 0.2, 0.4, 0.6, SampledSpectra::new(0.8));
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let down = Vector3f::new(0.0, 0.6, -0.8);
        assert!(cloth.f(&up, &down).is_zero());
        assert_eq!(cloth.pdf(&up, &down), 0.0);
    }
}
