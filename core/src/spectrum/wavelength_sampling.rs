//! Wavelength sampling strategies.

use super::*;
use crate::base::*;
use crate::rng::Sampler;
use std::fmt;
use std::str::FromStr;

/// Strategy for drawing the wavelengths of a light path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WavelengthSampling {
    /// Fixed red, green and blue representative wavelengths.
    #[default]
    Rgb,

    /// Equally spaced wavelengths with a shared random offset.
    Regular,

    /// Independent uniform wavelengths, sorted.
    Random,

    /// One uniform wavelength in each equal stratum of the visible range.
    Stratified,
}

impl WavelengthSampling {
    /// Draws the wavelengths for a new path and picks the primary one
    /// uniformly.
    ///
    /// * `sampler` - Random number source.
    pub fn sample<S: Sampler + ?Sized>(&self, sampler: &mut S) -> WavelengthSamples {
        let inverse_probability = SPECTRA_SIZE as Float / SAMPLE_SIZE as Float;
        let stratum = SPECTRA_SIZE as Float / SAMPLE_SIZE as Float;

        let wavelengths = match self {
            Self::Rgb => {
                let primary = sampler.sample_index(SAMPLE_SIZE);
                return WavelengthSamples::rgb(primary);
            }
            Self::Regular => {
                let offset = sampler.sample();
                let mut w = [0_u16; SAMPLE_SIZE];
                for (i, v) in w.iter_mut().enumerate() {
                    *v = to_wavelength((i as Float + offset) * stratum);
                }
                w
            }
            Self::Random => {
                let mut w = [0_u16; SAMPLE_SIZE];
                for v in w.iter_mut() {
                    *v = wavelength_of(sampler.sample_index(SPECTRA_SIZE));
                }
                w.sort_unstable();
                w
            }
            Self::Stratified => {
                let mut w = [0_u16; SAMPLE_SIZE];
                for (i, v) in w.iter_mut().enumerate() {
                    *v = to_wavelength((i as Float + sampler.sample()) * stratum);
                }
                w
            }
        };

        let primary = sampler.sample_index(SAMPLE_SIZE);
        WavelengthSamples::new(wavelengths, [inverse_probability; SAMPLE_SIZE], primary)
    }
}

/// Maps an offset into the visible range to a discrete wavelength.
fn to_wavelength(offset: Float) -> u16 {
    wavelength_of(min(offset as usize, SPECTRA_SIZE - 1))
}

impl FromStr for WavelengthSampling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "regular" => Ok(Self::Regular),
            "random" => Ok(Self::Random),
            "stratified" => Ok(Self::Stratified),
            _ => Err(format!("unknown wavelength sampling '{}'", s)),
        }
    }
}

impl fmt::Display for WavelengthSampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rgb => "rgb",
            Self::Regular => "regular",
            Self::Random => "random",
            Self::Stratified => "stratified",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;

    #[test]
    fn rgb_is_fixed() {
        let mut rng = RNG::new(1);
        let w = WavelengthSampling::Rgb.sample(&mut rng);
        assert!(w.is_rgb());
        assert_eq!(w.wavelengths(), &[BLUE_WAVELENGTH, GREEN_WAVELENGTH, RED_WAVELENGTH]);
    }

    #[test]
    fn spectral_strategies_stay_in_range() {
        let mut rng = RNG::new(2);
        for strategy in [
            WavelengthSampling::Regular,
            WavelengthSampling::Random,
            WavelengthSampling::Stratified,
        ] {
            for _ in 0..1000 {
                let w = strategy.sample(&mut rng);
                assert!(!w.is_rgb());
                assert!(w.primary_index() < SAMPLE_SIZE);
                for i in 0..SAMPLE_SIZE {
                    assert!(w.wavelength(i) >= SHORTEST_WAVELENGTH);
                    assert!(w.wavelength(i) < LONGEST_WAVELENGTH);
                }
                for i in 1..SAMPLE_SIZE {
                    assert!(w.wavelength(i - 1) <= w.wavelength(i));
                }
            }
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("RGB".parse::<WavelengthSampling>(), Ok(WavelengthSampling::Rgb));
        assert_eq!("stratified".parse::<WavelengthSampling>(), Ok(WavelengthSampling::Stratified));
        assert!("cie".parse::<WavelengthSampling>().is_err());
    }
}
