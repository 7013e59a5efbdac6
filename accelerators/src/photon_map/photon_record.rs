//! Photon Record

use super::*;

/// A photon deposited on a surface by the photon tracing pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhotonRecord {
    /// Hit position.
    pub point: Point3f,

    /// Direction the photon travelled in when it arrived.
    pub vin: Vector3f,

    /// Radiant power carried, already divided by the path sampling
    /// probability.
    pub energy: SampledSpectra,

    /// Inverse of the density of the direction that brought the photon.
    pub inverse_sampling_pdf: Float,

    /// True if a single wavelength was selected along the photon's path.
    pub wavelength_is_selected: bool,
}

impl PhotonRecord {
    /// Create a new `PhotonRecord`.
    ///
    /// * `point`                  - Hit position.
    /// * `vin`                    - Direction the photon travelled in.
    /// * `energy`                 - Radiant power carried.
    /// * `inverse_sampling_pdf`   - Inverse density of the arrival direction.
    /// * `wavelength_is_selected` - True if a wavelength was selected.
    pub fn new(
        point: Point3f,
        vin: Vector3f,
        energy: SampledSpectra,
        inverse_sampling_pdf: Float,
        wavelength_is_selected: bool,
    ) -> Self {
        Self {
            point,
            vin,
            energy,
            inverse_sampling_pdf,
            wavelength_is_selected,
        }
    }

    /// Returns the cosine between `normal` and the reversed arrival
    /// direction; positive for photons arriving on the side `normal` points
    /// to.
    ///
    /// * `normal` - Surface normal.
    #[inline]
    pub fn cos_theta(&self, normal: &Vector3f) -> Float {
        -normal.dot(&self.vin)
    }
}
