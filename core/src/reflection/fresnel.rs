//! Fresnel Dielectrics and Conductors

use super::*;

/// Returns the Fresnel reflection at the boundary between two dielectric
/// media for unpolarized light. Total internal reflection returns 1.
///
/// * `cos_theta_i` - Cosine of the angle between the incident direction and
///                   the normal on the incident side; in [0, 1].
/// * `n`           - Relative index of refraction, transmitted over incident.
pub fn fr_dielectric(cos_theta_i: Float, n: Float) -> Float {
    let c = clamp(cos_theta_i, 0.0, 1.0);
    match fresnel_g(n, c) {
        Some(g) => {
            let a = g + c;
            let b = g - c;
            if a == 0.0 {
                return 1.0;
            }
            let t1 = b / a;
            let t2 = (c * a - 1.0) / (c * b + 1.0);
            clamp(0.5 * t1 * t1 * (1.0 + t2 * t2), 0.0, 1.0)
        }
        None => 1.0,
    }
}

/// Returns `g = sqrt(n² + c² - 1)` or `None` on total internal reflection.
///
/// * `n` - Relative index of refraction.
/// * `c` - Cosine of the incident angle.
#[inline]
pub fn fresnel_g(n: Float, c: Float) -> Option<Float> {
    let g2 = n * n + c * c - 1.0;
    if g2 < 0.0 {
        None
    } else {
        Some(g2.sqrt())
    }
}

/// Returns the Fresnel reflection at the boundary between a dielectric and a
/// conductor with complex relative index of refraction `eta + i k` for
/// unpolarized light.
///
/// * `cos_theta_i` - Cosine of the incident angle; in [0, 1].
/// * `eta`         - Real part of the relative index of refraction.
/// * `k`           - Absorption coefficient.
pub fn fr_conductor(cos_theta_i: Float, eta: Float, k: Float) -> Float {
    let cos_theta_i = clamp(cos_theta_i, 0.0, 1.0);
    let cos2 = cos_theta_i * cos_theta_i;
    let sin2 = 1.0 - cos2;
    let eta2 = eta * eta;
    let k2 = k * k;

    let t0 = eta2 - k2 - sin2;
    let a2_plus_b2 = (t0 * t0 + 4.0 * eta2 * k2).sqrt();
    let t1 = a2_plus_b2 + cos2;
    let a = (0.5 * (a2_plus_b2 + t0)).max(0.0).sqrt();
    let t2 = 2.0 * cos_theta_i * a;
    let rs = (t1 - t2) / (t1 + t2);

    let t3 = cos2 * a2_plus_b2 + sin2 * sin2;
    let t4 = t2 * sin2;
    let rp = rs * (t3 - t4) / (t3 + t4);

    clamp(0.5 * (rp + rs), 0.0, 1.0)
}

/// Evaluates `fr_conductor` for every sampled wavelength.
///
/// * `cos_theta_i` - Cosine of the incident angle; in [0, 1].
/// * `eta`         - Real part of the relative index of refraction.
/// * `k`           - Absorption coefficient.
pub fn fr_conductor_spectra(cos_theta_i: Float, eta: &SampledSpectra, k: &SampledSpectra) -> SampledSpectra {
    let mut f = SampledSpectra::ZERO;
    for i in 0..SAMPLE_SIZE {
        f[i] = fr_conductor(cos_theta_i, eta[i], k[i]);
    }
    f
}
