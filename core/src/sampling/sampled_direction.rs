//! Sampled direction.

use crate::base::*;
use crate::geometry::*;

/// A direction drawn from a distribution together with its solid angle
/// density. A density of zero marks an invalid sample.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SampledDirection {
    /// Unit direction.
    pub direction: Vector3f,

    /// Density with respect to solid angle; 1 for delta distributions.
    pub pdf: Float,
}

impl SampledDirection {
    /// Create a new `SampledDirection`.
    ///
    /// * `direction` - Unit direction.
    /// * `pdf`       - Density with respect to solid angle.
    pub fn new(direction: Vector3f, pdf: Float) -> Self {
        Self { direction, pdf }
    }

    /// Returns an invalid sample.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Returns true if the sample can be used to continue a path.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.pdf > 0.0 && self.pdf.is_finite()
    }

    /// Returns `1 / pdf`, or 0 for an invalid sample.
    #[inline]
    pub fn inverse_pdf(&self) -> Float {
        if self.is_valid() {
            1.0 / self.pdf
        } else {
            0.0
        }
    }
}
