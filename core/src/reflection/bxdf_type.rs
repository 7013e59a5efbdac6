//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combination of flags describing a scattering model.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BxdfType: u8 {
        const REFLECTION = 0b0000_0001;
        const TRANSMISSION = 0b0000_0010;
        const EMISSION = 0b0000_0100;
        const DIFFUSE = 0b0000_1000;
        const GLOSSY = 0b0001_0000;
        const SPECULAR = 0b0010_0000;
        const WAVELENGTH_SELECTION = 0b0100_0000;
    }
}

impl BxdfType {
    /// Tests a single type flag and returns whether it is set or not.
    ///
    /// * `other` - Flag to match.
    pub fn matches(&self, other: Self) -> bool {
        self.bits() & other.bits() > 0
    }

    /// Returns the shading category of the model.
    pub fn shader_type(&self) -> ShaderType {
        if self.contains(Self::SPECULAR) {
            ShaderType::Specular
        } else if self.contains(Self::GLOSSY) {
            ShaderType::Glossy
        } else {
            ShaderType::Diffuse
        }
    }
}

/// Shading category deciding whether photons are stored at a hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderType {
    Diffuse,
    Specular,
    Glossy,
}

impl ShaderType {
    /// Returns true if radiance can be estimated from the photon map here.
    pub fn stores_photons(&self) -> bool {
        !matches!(self, Self::Specular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_type_from_flags() {
        let t = BxdfType::REFLECTION | BxdfType::DIFFUSE;
        assert_eq!(t.shader_type(), ShaderType::Diffuse);
        assert!(t.shader_type().stores_photons());

        let t = BxdfType::REFLECTION | BxdfType::TRANSMISSION | BxdfType::SPECULAR;
        assert_eq!(t.shader_type(), ShaderType::Specular);
        assert!(!t.shader_type().stores_photons());
        assert!(t.matches(BxdfType::TRANSMISSION));
        assert!(!t.matches(BxdfType::EMISSION));

        let t = BxdfType::REFLECTION | BxdfType::GLOSSY;
        assert_eq!(t.shader_type(), ShaderType::Glossy);
    }
}
