//! Material

use crate::base::*;
use crate::reflection::*;
use crate::spectrum::*;

/// Surface description of a scene object. A material is resolved into a
/// short-lived `Bxdf` for every hit and set of sampled wavelengths.
#[derive(Copy, Clone, Debug)]
pub enum Material {
    /// Lambertian reflector.
    Matte {
        /// Reflectance.
        color: ColorValue,
    },

    /// Perfectly smooth conductor.
    Mirror {
        /// Real part of the index of refraction.
        eta: ColorValue,

        /// Absorption coefficient.
        k: ColorValue,
    },

    /// Rough conductor.
    Metal {
        /// Perceptual roughness in [0, 1].
        roughness: Float,

        /// Real part of the index of refraction.
        eta: ColorValue,

        /// Absorption coefficient.
        k: ColorValue,
    },

    /// Dielectric interface; smooth when `roughness` is zero.
    Glass {
        /// Perceptual roughness in [0, 1].
        roughness: Float,

        /// Dispersive index of refraction of the inside.
        ior: Ior,
    },

    /// Rough dielectric coating over a diffuse body.
    Plastic {
        /// Perceptual roughness of the coating.
        roughness: Float,

        /// Index of refraction of the coating.
        n: Float,

        /// Body reflectance.
        color: ColorValue,
    },

    /// Woven cloth.
    Fabric {
        /// Index of refraction of the threads.
        eta: Float,

        /// Isotropic fraction of the volume scattering.
        kd: Float,

        /// Width of the surface scattering lobe (radians).
        gamma_r: Float,

        /// Width of the volume scattering lobe (radians).
        gamma_v: Float,

        /// Width of the azimuthal shadowing-masking falloff (radians).
        rho: Float,

        /// Volume albedo.
        albedo: ColorValue,
    },

    /// Diffuse area emitter.
    Emitter {
        /// Radiant exitance.
        radiant_exitance: ColorValue,
    },
}

impl Material {
    /// Returns the scattering model at a hit.
    ///
    /// * `wavelengths`  - Sampled wavelengths.
    /// * `is_back_face` - True when the hit is on the inside of the object.
    pub fn bxdf(&self, wavelengths: &WavelengthSamples, is_back_face: bool) -> Bxdf {
        match *self {
            Self::Matte { color } => Bxdf::Lambert(Lambert::new(color.sample(wavelengths))),
            Self::Mirror { eta, k } => Bxdf::Specular(Specular::new(eta.sample(wavelengths), k.sample(wavelengths))),
            Self::Metal { roughness, eta, k } => Bxdf::GgxConductor(GgxConductor::new(
                roughness,
                eta.sample(wavelengths),
                k.sample(wavelengths),
            )),
            Self::Glass { roughness, ior } => {
                let n = ior.at(wavelengths.primary_wavelength());
                let n = if is_back_face { 1.0 / n } else { n };
                if roughness > 0.0 {
                    Bxdf::GgxDielectric(GgxDielectric::new(roughness, n))
                } else {
                    Bxdf::SpecularDielectric(SpecularDielectric::new(n))
                }
            }
            Self::Plastic { roughness, n, color } => {
                Bxdf::LayeredDiffuse(LayeredDiffuse::new(roughness, n, color.sample(wavelengths)))
            }
            Self::Fabric {
                eta,
                kd,
                gamma_r,
                gamma_v,
                rho,
                albedo,
            } => Bxdf::Cloth(Cloth::new(eta, kd, gamma_r, gamma_v, rho, albedo.sample(wavelengths))),
            Self::Emitter { radiant_exitance } => {
                Bxdf::NonDirectionalLight(NonDirectionalLight::new(radiant_exitance.sample(wavelengths)))
            }
        }
    }

    /// Returns the radiance emitted by the front face of the surface.
    ///
    /// * `wavelengths` - Sampled wavelengths.
    pub fn emitted_radiance(&self, wavelengths: &WavelengthSamples) -> SampledSpectra {
        match self {
            Self::Emitter { radiant_exitance } => radiant_exitance.sample(wavelengths) * INV_PI,
            _ => SampledSpectra::ZERO,
        }
    }

    /// Returns true if the surface emits light.
    pub fn is_emissive(&self) -> bool {
        matches!(self, Self::Emitter { .. })
    }
}
