//! Colours and refractive indices.

use super::*;
use crate::base::*;
use std::ops::{Add, AddAssign, Div, Mul};

/// A linear RGB triple.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ColorValue {
    /// Red.
    pub r: Float,

    /// Green.
    pub g: Float,

    /// Blue.
    pub b: Float,
}

impl ColorValue {
    /// Black.
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a new `ColorValue`.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self { r, g, b }
    }

    /// Create a grey `ColorValue`.
    ///
    /// * `v` - Value of every channel.
    pub const fn grey(v: Float) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Returns the value of the channel a wavelength falls in.
    ///
    /// * `lambda` - Wavelength in nm.
    pub fn at(&self, lambda: u16) -> Float {
        match ColorBand::of(lambda) {
            ColorBand::Red => self.r,
            ColorBand::Green => self.g,
            ColorBand::Blue => self.b,
        }
    }

    /// Samples the colour at the given wavelengths.
    ///
    /// * `wavelengths` - The wavelengths.
    pub fn sample(&self, wavelengths: &WavelengthSamples) -> SampledSpectra {
        let mut s = SampledSpectra::ZERO;
        for i in 0..SAMPLE_SIZE {
            s[i] = self.at(wavelengths.wavelength(i));
        }
        s
    }

    /// Returns the channel average.
    pub fn average(&self) -> Float {
        (self.r + self.g + self.b) / 3.0
    }

    /// Returns true if any channel is NaN.
    pub fn has_nans(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan()
    }
}

impl Add for ColorValue {
    type Output = Self;

    fn add(self, o: Self) -> Self::Output {
        Self::new(self.r + o.r, self.g + o.g, self.b + o.b)
    }
}

impl AddAssign for ColorValue {
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl Mul<Float> for ColorValue {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.r * f, self.g * f, self.b * f)
    }
}

impl Div<Float> for ColorValue {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

/// Visible range partition used to move between wavelengths and RGB.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorBand {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl ColorBand {
    /// Returns the band containing a wavelength.
    ///
    /// * `lambda` - Wavelength in nm.
    pub fn of(lambda: u16) -> Self {
        if lambda < 490 {
            Self::Blue
        } else if lambda < 580 {
            Self::Green
        } else {
            Self::Red
        }
    }

    /// Returns the number of 1 nm bins in the band.
    pub fn width(&self) -> u16 {
        match self {
            Self::Blue => 490 - SHORTEST_WAVELENGTH,
            Self::Green => 580 - 490,
            Self::Red => LONGEST_WAVELENGTH - 580,
        }
    }
}

/// Wavelength dependent real refractive index following Cauchy's equation
/// `n(λ) = a + b / λ²` with `λ` in micrometres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ior {
    /// Constant term.
    pub a: Float,

    /// Dispersion term (µm²).
    pub b: Float,
}

impl Ior {
    /// Vacuum / air.
    pub const AIR: Self = Self { a: 1.0, b: 0.0 };

    /// Borosilicate crown glass (BK7).
    pub const BK7: Self = Self { a: 1.5046, b: 0.00420 };

    /// Create a new `Ior`.
    ///
    /// * `a` - Constant term.
    /// * `b` - Dispersion term (µm²).
    pub const fn new(a: Float, b: Float) -> Self {
        Self { a, b }
    }

    /// Create a non-dispersive `Ior`.
    ///
    /// * `n` - Refractive index.
    pub const fn constant(n: Float) -> Self {
        Self { a: n, b: 0.0 }
    }

    /// Returns the refractive index at a wavelength.
    ///
    /// * `lambda` - Wavelength in nm.
    pub fn at(&self, lambda: u16) -> Float {
        let um = lambda as Float * 1e-3;
        self.a + self.b / (um * um)
    }

    /// Samples the refractive index at the given wavelengths.
    ///
    /// * `wavelengths` - The wavelengths.
    pub fn sample(&self, wavelengths: &WavelengthSamples) -> SampledSpectra {
        let mut s = SampledSpectra::ZERO;
        for i in 0..SAMPLE_SIZE {
            s[i] = self.at(wavelengths.wavelength(i));
        }
        s
    }
}
