//! Wavelength Samples.

use super::*;
use crate::base::*;

/// The wavelengths traced together by a single light path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WavelengthSamples {
    /// Wavelengths in nm, sorted ascending.
    wavelengths: [u16; SAMPLE_SIZE],

    /// Inverse of the probability density each wavelength was drawn with.
    inverse_probabilities: [Float; SAMPLE_SIZE],

    /// Index of the wavelength used when an event depends on a single
    /// wavelength.
    primary_index: usize,

    /// True when the samples are the fixed RGB representative wavelengths.
    is_rgb: bool,
}

impl WavelengthSamples {
    /// Create a new `WavelengthSamples`.
    ///
    /// * `wavelengths`           - Wavelengths in nm.
    /// * `inverse_probabilities` - Inverse sampling densities.
    /// * `primary_index`         - Index of the primary wavelength.
    pub fn new(
        wavelengths: [u16; SAMPLE_SIZE],
        inverse_probabilities: [Float; SAMPLE_SIZE],
        primary_index: usize,
    ) -> Self {
        debug_assert!(primary_index < SAMPLE_SIZE);
        Self {
            wavelengths,
            inverse_probabilities,
            primary_index,
            is_rgb: false,
        }
    }

    /// Returns the fixed RGB representative wavelengths.
    ///
    /// * `primary_index` - Index of the primary wavelength.
    pub fn rgb(primary_index: usize) -> Self {
        debug_assert!(primary_index < SAMPLE_SIZE);
        Self {
            wavelengths: [BLUE_WAVELENGTH, GREEN_WAVELENGTH, RED_WAVELENGTH],
            inverse_probabilities: [1.0; SAMPLE_SIZE],
            primary_index,
            is_rgb: true,
        }
    }

    /// Returns the wavelength at `index`.
    ///
    /// * `index` - Index in [0, SAMPLE_SIZE).
    #[inline]
    pub fn wavelength(&self, index: usize) -> u16 {
        self.wavelengths[index]
    }

    /// Returns all wavelengths.
    pub fn wavelengths(&self) -> &[u16; SAMPLE_SIZE] {
        &self.wavelengths
    }

    /// Returns the inverse sampling density of the wavelength at `index`.
    ///
    /// * `index` - Index in [0, SAMPLE_SIZE).
    #[inline]
    pub fn inverse_probability(&self, index: usize) -> Float {
        self.inverse_probabilities[index]
    }

    /// Returns the primary wavelength index.
    #[inline]
    pub fn primary_index(&self) -> usize {
        self.primary_index
    }

    /// Returns the primary wavelength in nm.
    #[inline]
    pub fn primary_wavelength(&self) -> u16 {
        self.wavelengths[self.primary_index]
    }

    /// Returns the inverse probability of having picked the primary
    /// wavelength among the samples.
    #[inline]
    pub fn primary_inverse_probability(&self) -> Float {
        SAMPLE_SIZE as Float
    }

    /// Returns true for the fixed RGB representative wavelengths.
    pub fn is_rgb(&self) -> bool {
        self.is_rgb
    }

    /// Converts the intensities carried for these wavelengths into an RGB
    /// triple by averaging over the colour bands.
    ///
    /// * `s` - Intensities for these wavelengths.
    pub fn to_rgb(&self, s: &SampledSpectra) -> ColorValue {
        if self.is_rgb {
            return ColorValue::new(s[2], s[1], s[0]);
        }

        let mut rgb = [0.0; 3];
        for i in 0..SAMPLE_SIZE {
            let band = ColorBand::of(self.wavelengths[i]);
            rgb[band as usize] += s[i] * self.inverse_probabilities[i] / band.width() as Float;
        }
        ColorValue::new(rgb[0], rgb[1], rgb[2])
    }
}

impl Default for WavelengthSamples {
    fn default() -> Self {
        Self::rgb(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_samples_map_channels_back() {
        let w = WavelengthSamples::rgb(1);
        assert_eq!(w.primary_wavelength(), GREEN_WAVELENGTH);
        assert_eq!(w.primary_inverse_probability(), 3.0);

        let c = w.to_rgb(&SampledSpectra::from_values([0.1, 0.2, 0.3]));
        assert_eq!(c, ColorValue::new(0.3, 0.2, 0.1));
    }

    #[test]
    fn spectral_samples_average_over_bands() {
        // One wavelength per band, each drawn with a density of 1/band width.
        let w = WavelengthSamples::new(
            [450, 500, 600],
            [
                ColorBand::Blue.width() as Float,
                ColorBand::Green.width() as Float,
                ColorBand::Red.width() as Float,
            ],
            0,
        );
        let c = w.to_rgb(&SampledSpectra::new(2.0));
        assert!((c.r - 2.0).abs() < 1e-12);
        assert!((c.g - 2.0).abs() < 1e-12);
        assert!((c.b - 2.0).abs() < 1e-12);
    }
}
