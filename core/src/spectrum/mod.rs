//! Spectrum

mod color;
mod sampled_spectra;
mod wavelength_samples;
mod wavelength_sampling;

// Re-export
pub use color::*;
pub use sampled_spectra::*;
pub use wavelength_samples::*;
pub use wavelength_sampling::*;

/// Number of wavelengths carried by a single light path.
pub const SAMPLE_SIZE: usize = 3;

/// Shortest wavelength (nm) considered.
pub const SHORTEST_WAVELENGTH: u16 = 380;

/// Longest wavelength (nm) considered; exclusive.
pub const LONGEST_WAVELENGTH: u16 = 780;

/// Number of discrete 1 nm wavelength bins.
pub const SPECTRA_SIZE: usize = (LONGEST_WAVELENGTH - SHORTEST_WAVELENGTH) as usize;

/// Representative wavelength (nm) of the blue channel in RGB mode.
pub const BLUE_WAVELENGTH: u16 = 440;

/// Representative wavelength (nm) of the green channel in RGB mode.
pub const GREEN_WAVELENGTH: u16 = 550;

/// Representative wavelength (nm) of the red channel in RGB mode.
pub const RED_WAVELENGTH: u16 = 650;

/// Returns the wavelength (nm) of a discrete bin.
///
/// * `index` - Bin index in [0, SPECTRA_SIZE).
#[inline]
pub fn wavelength_of(index: usize) -> u16 {
    debug_assert!(index < SPECTRA_SIZE);
    SHORTEST_WAVELENGTH + index as u16
}
