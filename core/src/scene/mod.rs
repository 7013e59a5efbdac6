//! Scene

use crate::base::*;
use crate::geometry::*;
use crate::material::*;
use crate::reflection::*;
use crate::rng::Sampler;
use crate::sampling::*;
use crate::spectrum::*;

mod analytic_world;
mod shape;

// Re-export
pub use analytic_world::*;
pub use shape::*;

/// Surface interaction found by the ray oracle.
#[derive(Copy, Clone, Debug)]
pub struct IntersectionInfo {
    /// Hit point.
    pub point: Point3f,

    /// Geometric normal facing the side the ray came from.
    pub normal: Vector3f,

    /// Shading frame around `normal`.
    pub shading_frame: ShadingFrame,

    /// Index of the object hit.
    pub object: usize,

    /// True if the ray hit the inside of the surface.
    pub is_back_face: bool,

    /// Parametric distance along the ray.
    pub distance: Float,
}

impl IntersectionInfo {
    /// Orients a shape hit towards the incoming ray.
    ///
    /// * `hit`    - The shape hit.
    /// * `ray`    - The incoming ray.
    /// * `object` - Index of the object hit.
    pub fn new(hit: &ShapeHit, ray: &Ray, object: usize) -> Self {
        let is_back_face = hit.normal.dot(&ray.direction) > 0.0;
        let normal = if is_back_face { -hit.normal } else { hit.normal };
        Self {
            point: hit.point,
            normal,
            shading_frame: ShadingFrame::from_normal_tangent(&normal, &hit.tangent),
            object,
            is_back_face,
            distance: hit.t,
        }
    }
}

/// A point sampled on a light source for photon emission.
#[derive(Clone, Debug)]
pub struct LightSample {
    /// Point on the emitter.
    pub point: Point3f,

    /// Outward normal at the point.
    pub normal: Vector3f,

    /// Frame around `normal`.
    pub frame: ShadingFrame,

    /// Emission distribution at the point.
    pub bxdf: Bxdf,

    /// Inverse of the area density of choosing the point, including the
    /// light selection probability.
    pub inverse_pdf: Float,
}

/// Interface the renderer uses to query the scene.
pub trait World: Send + Sync {
    /// Returns the nearest surface interaction along a ray.
    ///
    /// * `ray` - The ray.
    fn cast_ray(&self, ray: &Ray) -> Option<IntersectionInfo>;

    /// Returns the scattering model at an interaction.
    ///
    /// * `info`        - The surface interaction.
    /// * `wavelengths` - Sampled wavelengths.
    fn bxdf(&self, info: &IntersectionInfo, wavelengths: &WavelengthSamples) -> Bxdf;

    /// Returns the radiance emitted from an interaction towards `vout`.
    ///
    /// * `info`        - The surface interaction.
    /// * `vout`        - Outgoing direction.
    /// * `wavelengths` - Sampled wavelengths.
    fn emitted_radiance(&self, info: &IntersectionInfo, vout: &Vector3f, wavelengths: &WavelengthSamples) -> SampledSpectra;

    /// Samples a point on a light source. Returns `None` if the scene has
    /// no lights.
    ///
    /// * `wavelengths` - Sampled wavelengths.
    /// * `sampler`     - Random number source.
    fn sample_light(&self, wavelengths: &WavelengthSamples, sampler: &mut dyn Sampler) -> Option<LightSample>;
}

/// An object of an analytic scene.
#[derive(Copy, Clone, Debug)]
pub struct SceneObject {
    /// Geometry.
    pub shape: Shape,

    /// Surface description.
    pub material: Material,
}

impl SceneObject {
    /// Create a new `SceneObject`.
    ///
    /// * `shape`    - Geometry.
    /// * `material` - Surface description.
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }
}
