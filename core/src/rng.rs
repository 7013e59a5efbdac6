//! Random Number Generator.

use crate::base::*;

/// 64-bit precision value for 1 - epsilon.
pub const ONE_MINUS_EPSILON: Float = hexf64!("0x1.fffffffffffffp-1"); // 0.99999999999999989

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// Source of uniformly distributed random numbers consumed by sampling
/// routines.
pub trait Sampler {
    /// Returns a uniformly distributed value over the half open interval
    /// [0.0, 1.0).
    fn sample(&mut self) -> Float;

    /// Returns a uniformly distributed index in [0, n).
    ///
    /// * `n` - Number of choices; must be positive.
    fn sample_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        min((self.sample() * n as Float) as usize, n - 1)
    }
}

/// Implements the PCG32 pseudo-random number generator.
#[derive(Clone)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut ret = Self { state: 0, inc: 0 };
        ret.set_sequence(sequence_index);
        ret
    }

    /// Initialize the random number generator sequence.
    ///
    /// * `init_seq` - The starting sequence to seed with.
    #[inline(always)]
    fn set_sequence(&mut self, init_seq: u64) {
        self.state = 0;
        self.inc = init_seq.wrapping_shl(1) | 1;
        let _ = self.uniform_u32();

        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        let _ = self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed value over the half open interval
    /// [0.0, 1.0) with 53 bits of precision.
    pub fn uniform_float(&mut self) -> Float {
        let hi = (self.uniform_u32() as u64) << 21;
        let lo = (self.uniform_u32() >> 11) as u64;
        min((hi | lo) as Float * hexf64!("0x1.0p-53"), ONE_MINUS_EPSILON)
    }
}

impl Sampler for RNG {
    #[inline]
    fn sample(&mut self) -> Float {
        self.uniform_float()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_sequence_is_deterministic() {
        let mut a = RNG::new(42);
        let mut b = RNG::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform_u32(), b.uniform_u32());
        }
    }

    #[test]
    fn different_sequences_differ() {
        let mut a = RNG::new(1);
        let mut b = RNG::new(2);
        let same = (0..100).filter(|_| a.uniform_u32() == b.uniform_u32()).count();
        assert!(same < 5);
    }

    #[test]
    fn floats_are_in_unit_interval() {
        let mut rng = RNG::new(7);
        let mut sum = 0.0;
        let n = 100_000;
        for _ in 0..n {
            let u = rng.sample();
            assert!((0.0..1.0).contains(&u));
            sum += u;
        }
        assert!((sum / n as Float - 0.5).abs() < 0.01);
    }

    #[test]
    fn sample_index_in_range() {
        let mut rng = RNG::new(3);
        let mut hits = [0_usize; 3];
        for _ in 0..30_000 {
            hits[rng.sample_index(3)] += 1;
        }
        for h in hits.iter() {
            assert!(*h > 9_000 && *h < 11_000);
        }
    }
}
