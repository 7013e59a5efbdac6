//! BxDF Sample

use super::*;

/// Stores a direction drawn from a BxDF together with its importance weight
/// `f * cos / pdf`.
#[derive(Copy, Clone, Debug, Default)]
pub struct BxdfSample {
    /// The sampled outgoing direction and its density.
    pub direction: SampledDirection,

    /// The sample weight for each wavelength.
    pub weight: SampledSpectra,
}

impl BxdfSample {
    /// Create a new `BxdfSample`.
    ///
    /// * `direction` - The sampled outgoing direction and its density.
    /// * `weight`    - The sample weight for each wavelength.
    pub fn new(direction: SampledDirection, weight: SampledSpectra) -> Self {
        Self { direction, weight }
    }

    /// Returns a sample that terminates the path.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Returns true if the path can continue in the sampled direction.
    pub fn is_valid(&self) -> bool {
        self.direction.is_valid()
    }
}
