//! Sensor

use super::*;
use crate::camera::CameraModel;
use std::fmt;
use std::sync::Arc;

/// Importance function of a single camera pixel. Directions are taken in the
/// camera frame.
#[derive(Clone)]
pub struct Sensor {
    /// The camera model.
    camera: Arc<dyn CameraModel>,

    /// Pixel coordinates.
    pixel: (usize, usize),
}

impl Sensor {
    /// Create a new `Sensor`.
    ///
    /// * `camera` - The camera model.
    /// * `pixel`  - Pixel coordinates `(x, y)`.
    pub fn new(camera: Arc<dyn CameraModel>, pixel: (usize, usize)) -> Self {
        Self { camera, pixel }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::GLOSSY
    }

    /// Returns the importance emitted towards `o`.
    ///
    /// * `o` - Local direction leaving the lens.
    pub fn f(&self, o: &Vector3f) -> SampledSpectra {
        SampledSpectra::new(self.camera.calc_radiance(o, self.pixel))
    }

    /// Returns the density of sampling `o`.
    ///
    /// * `o` - Local direction leaving the lens.
    pub fn pdf(&self, o: &Vector3f) -> Float {
        self.camera.calc_pdf(o, self.pixel)
    }

    /// Samples a direction through the pixel.
    ///
    /// * `sampler` - Random number source.
    pub fn sample_f<S: Sampler + ?Sized>(&self, sampler: &mut S) -> BxdfSample {
        let direction = self.camera.sample_direction(self.pixel, &sample_2d(sampler));
        if !direction.is_valid() {
            return BxdfSample::invalid();
        }
        BxdfSample::new(direction, SampledSpectra::ONE)
    }
}

impl fmt::Debug for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor").field("pixel", &self.pixel).finish()
    }
}
