//! Analytic World

use super::*;
use crate::camera::PinholeCamera;

/// A small scene of analytic shapes intersected by brute force.
#[derive(Clone, Debug)]
pub struct AnalyticWorld {
    /// Objects of the scene.
    objects: Vec<SceneObject>,

    /// Indices of the emissive objects.
    lights: Vec<usize>,
}

impl AnalyticWorld {
    /// Create a new `AnalyticWorld`.
    ///
    /// * `objects` - Objects of the scene.
    pub fn new(objects: Vec<SceneObject>) -> Self {
        let lights: Vec<usize> = objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.material.is_emissive())
            .map(|(i, _)| i)
            .collect();
        debug!("Analytic world with {} objects and {} lights", objects.len(), lights.len());
        Self { objects, lights }
    }

    /// Returns the objects of the scene.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Returns the total power emitted by the lights.
    ///
    /// * `wavelengths` - Sampled wavelengths.
    pub fn light_power(&self, wavelengths: &WavelengthSamples) -> SampledSpectra {
        self.lights.iter().fold(SampledSpectra::ZERO, |sum, &i| {
            let object = &self.objects[i];
            sum + object.material.emitted_radiance(wavelengths) * (PI * object.shape.area())
        })
    }

    /// Returns a Cornell box with a glass ball, a plastic ball, a cloth floor
    /// and a spherical light below the ceiling, together with a camera
    /// looking into the open side.
    ///
    /// * `resolution` - Image resolution `(width, height)`.
    pub fn cornell_box(resolution: (usize, usize)) -> (Self, PinholeCamera) {
        let white = Material::Matte {
            color: ColorValue::grey(0.75),
        };
        let red = Material::Matte {
            color: ColorValue::new(0.75, 0.1, 0.1),
        };
        let green = Material::Matte {
            color: ColorValue::new(0.1, 0.6, 0.15),
        };
        let cloth = Material::Fabric {
            eta: 1.46,
            kd: 0.3,
            gamma_r: 0.21,
            gamma_v: 0.42,
            rho: 0.5,
            albedo: ColorValue::new(0.2, 0.3, 0.7),
        };

        let rect = |corner: Point3f, edge_u: Vector3f, edge_v: Vector3f| Shape::Rectangle { corner, edge_u, edge_v };
        let objects = vec![
            // Floor.
            SceneObject::new(
                rect(
                    Point3f::new(-1.0, -1.0, 1.0),
                    Vector3f::new(2.0, 0.0, 0.0),
                    Vector3f::new(0.0, 0.0, -2.0),
                ),
                cloth,
            ),
            // Ceiling.
            SceneObject::new(
                rect(
                    Point3f::new(-1.0, 1.0, 1.0),
                    Vector3f::new(0.0, 0.0, -2.0),
                    Vector3f::new(2.0, 0.0, 0.0),
                ),
                white,
            ),
            // Back wall.
            SceneObject::new(
                rect(
                    Point3f::new(-1.0, -1.0, -1.0),
                    Vector3f::new(2.0, 0.0, 0.0),
                    Vector3f::new(0.0, 2.0, 0.0),
                ),
                white,
            ),
            // Left wall.
            SceneObject::new(
                rect(
                    Point3f::new(-1.0, -1.0, 1.0),
                    Vector3f::new(0.0, 0.0, -2.0),
                    Vector3f::new(0.0, 2.0, 0.0),
                ),
                red,
            ),
            // Right wall.
            SceneObject::new(
                rect(
                    Point3f::new(1.0, -1.0, 1.0),
                    Vector3f::new(0.0, 2.0, 0.0),
                    Vector3f::new(0.0, 0.0, -2.0),
                ),
                green,
            ),
            SceneObject::new(
                Shape::Sphere {
                    center: Point3f::new(0.45, -0.6, 0.3),
                    radius: 0.4,
                },
                Material::Glass {
                    roughness: 0.0,
                    ior: Ior::BK7,
                },
            ),
            SceneObject::new(
                Shape::Sphere {
                    center: Point3f::new(-0.45, -0.65, -0.35),
                    radius: 0.35,
                },
                Material::Plastic {
                    roughness: 0.3,
                    n: 1.5,
                    color: ColorValue::new(0.8, 0.6, 0.1),
                },
            ),
            SceneObject::new(
                Shape::Sphere {
                    center: Point3f::new(0.0, 0.8, 0.0),
                    radius: 0.12,
                },
                Material::Emitter {
                    radiant_exitance: ColorValue::new(40.0, 36.0, 30.0),
                },
            ),
        ];

        let camera = PinholeCamera::new(
            Point3f::new(0.0, 0.0, 3.4),
            Point3f::ZERO,
            Vector3f::new(0.0, 1.0, 0.0),
            40.0,
            resolution,
        );
        (Self::new(objects), camera)
    }
}

impl World for AnalyticWorld {
    fn cast_ray(&self, ray: &Ray) -> Option<IntersectionInfo> {
        let mut nearest: Option<(ShapeHit, usize)> = None;
        let mut t_max = INFINITY;
        for (i, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.intersect(ray, t_max) {
                t_max = hit.t;
                nearest = Some((hit, i));
            }
        }
        nearest.map(|(hit, i)| IntersectionInfo::new(&hit, ray, i))
    }

    fn bxdf(&self, info: &IntersectionInfo, wavelengths: &WavelengthSamples) -> Bxdf {
        self.objects[info.object].material.bxdf(wavelengths, info.is_back_face)
    }

    fn emitted_radiance(&self, info: &IntersectionInfo, vout: &Vector3f, wavelengths: &WavelengthSamples) -> SampledSpectra {
        if info.is_back_face || vout.dot(&info.normal) <= 0.0 {
            return SampledSpectra::ZERO;
        }
        self.objects[info.object].material.emitted_radiance(wavelengths)
    }

    fn sample_light(&self, wavelengths: &WavelengthSamples, sampler: &mut dyn Sampler) -> Option<LightSample> {
        if self.lights.is_empty() {
            return None;
        }
        let index = self.lights[sampler.sample_index(self.lights.len())];
        let object = &self.objects[index];
        let (point, normal) = object.shape.sample_point(&[sampler.sample(), sampler.sample()]);
        Some(LightSample {
            point,
            normal,
            frame: ShadingFrame::from_normal(&normal),
            bxdf: object.material.bxdf(wavelengths, false),
            inverse_pdf: object.shape.area() * self.lights.len() as Float,
        })
    }
}
