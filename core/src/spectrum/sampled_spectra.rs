//! Sampled Spectra.

use super::*;
use crate::base::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

/// Intensities carried by a light path, one per sampled wavelength of the
/// path's `WavelengthSamples`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampledSpectra {
    /// The intensities.
    c: [Float; SAMPLE_SIZE],
}

impl SampledSpectra {
    /// Spectra with all values set to 0.
    pub const ZERO: Self = Self { c: [0.0; SAMPLE_SIZE] };

    /// Spectra with all values set to 1.
    pub const ONE: Self = Self { c: [1.0; SAMPLE_SIZE] };

    /// Create a new `SampledSpectra` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self { c: [v; SAMPLE_SIZE] }
    }

    /// Create a new `SampledSpectra` from per wavelength values.
    ///
    /// * `c` - Intensities.
    pub fn from_values(c: [Float; SAMPLE_SIZE]) -> Self {
        Self { c }
    }

    /// Returns a spectra that is zero everywhere except at `index`.
    ///
    /// * `index` - Wavelength index.
    /// * `v`     - Intensity at `index`.
    pub fn single(index: usize, v: Float) -> Self {
        let mut ret = Self::ZERO;
        ret.c[index] = v;
        ret
    }

    /// Returns the stored intensities.
    pub fn values(&self) -> &[Float; SAMPLE_SIZE] {
        &self.c
    }

    /// Returns true if all intensities are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.c.iter().all(|v| *v == 0.0)
    }

    /// Returns true if any intensity is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns true if all intensities are finite.
    pub fn is_finite(&self) -> bool {
        self.c.iter().all(|v| v.is_finite())
    }

    /// Returns the largest intensity.
    pub fn max(&self) -> Float {
        self.c[1..].iter().fold(self.c[0], |m, v| max(m, *v))
    }

    /// Returns the mean intensity.
    pub fn average(&self) -> Float {
        self.c.iter().sum::<Float>() / SAMPLE_SIZE as Float
    }

    /// Applies `f` to every intensity.
    ///
    /// * `f` - The function.
    pub fn map<F: Fn(Float) -> Float>(&self, f: F) -> Self {
        let mut ret = *self;
        for v in ret.c.iter_mut() {
            *v = f(*v);
        }
        ret
    }

    /// Returns the elementwise square root.
    pub fn sqrt(&self) -> Self {
        self.map(|v| v.sqrt())
    }
}

impl Default for SampledSpectra {
    /// Return a black `SampledSpectra`.
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Float> for SampledSpectra {
    fn from(v: Float) -> Self {
        Self::new(v)
    }
}

impl Index<usize> for SampledSpectra {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for SampledSpectra {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

macro_rules! elementwise_op {
    ($op_trait: ident, $op: ident, $assign_trait: ident, $assign: ident, $sym: tt) => {
        impl $op_trait for SampledSpectra {
            type Output = Self;

            fn $op(self, other: Self) -> Self::Output {
                let mut ret = self;
                for i in 0..SAMPLE_SIZE {
                    ret.c[i] = self.c[i] $sym other.c[i];
                }
                ret
            }
        }

        impl $op_trait<Float> for SampledSpectra {
            type Output = Self;

            fn $op(self, f: Float) -> Self::Output {
                self.map(|v| v $sym f)
            }
        }

        impl $assign_trait for SampledSpectra {
            fn $assign(&mut self, other: Self) {
                *self = *self $sym other;
            }
        }

        impl $assign_trait<Float> for SampledSpectra {
            fn $assign(&mut self, f: Float) {
                *self = *self $sym f;
            }
        }
    };
}

elementwise_op!(Add, add, AddAssign, add_assign, +);
elementwise_op!(Sub, sub, SubAssign, sub_assign, -);
elementwise_op!(Mul, mul, MulAssign, mul_assign, *);
elementwise_op!(Div, div, DivAssign, div_assign, /);

impl Mul<SampledSpectra> for Float {
    type Output = SampledSpectra;

    /// Scales the intensities with a constant factor.
    ///
    /// * `s` - The spectra.
    fn mul(self, s: SampledSpectra) -> Self::Output {
        s * self
    }
}

impl fmt::Display for SampledSpectra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_is_zero_elsewhere() {
        let s = SampledSpectra::single(1, 2.5);
        assert_eq!(s[0], 0.0);
        assert_eq!(s[1], 2.5);
        assert_eq!(s[2], 0.0);
        assert!(!s.is_zero());
        assert!(SampledSpectra::ZERO.is_zero());
    }

    #[test]
    fn max_and_average() {
        let s = SampledSpectra::from_values([1.0, 4.0, 1.0]);
        assert_eq!(s.max(), 4.0);
        assert_eq!(s.average(), 2.0);
    }

    proptest! {
        #[test]
        fn elementwise_arithmetic(a in 0.1..10.0f64, b in 0.1..10.0f64) {
            let sa = SampledSpectra::new(a);
            let sb = SampledSpectra::new(b);
            prop_assert_eq!((sa + sb)[0], a + b);
            prop_assert_eq!((sa - sb)[1], a - b);
            prop_assert_eq!((sa * sb)[2], a * b);
            prop_assert_eq!((sa / sb)[0], a / b);
            prop_assert_eq!((b * sa)[1], a * b);
        }
    }
}
