//! Common local frame helpers.

use super::*;

/// Returns the mirror direction of `i` about `m`. Both point away from the
/// surface.
///
/// * `i` - Direction to reflect.
/// * `m` - Unit normal.
#[inline]
pub fn reflect(i: &Vector3f, m: &Vector3f) -> Vector3f {
    *m * (2.0 * i.dot(m)) - *i
}

/// Returns the direction refracted through the interface with normal `m`.
///
/// * `i` - Direction on the incident side pointing away from the surface.
/// * `m` - Unit normal on the incident side.
/// * `n` - Relative index of refraction, transmitted over incident.
/// * `g` - `sqrt(n² + (i·m)² - 1)`.
#[inline]
pub fn refract(i: &Vector3f, m: &Vector3f, n: Float, g: Float) -> Vector3f {
    (*m * (i.dot(m) - g) - *i) / n
}

/// Draws a 2D uniform sample.
///
/// * `sampler` - Random number source.
#[inline]
pub fn sample_2d<S: Sampler + ?Sized>(sampler: &mut S) -> [Float; 2] {
    let u0 = sampler.sample();
    let u1 = sampler.sample();
    [u0, u1]
}
