//! Density Estimation Kernels

use hikari::base::*;
use std::fmt;
use std::str::FromStr;

/// Slope parameter of the cone kernel.
const CONE_K: Float = 1.1;

/// Normalizes the cone kernel to integrate to one over the unit disk.
const CONE_NORMALIZER: Float = 1.0 / (1.0 - 2.0 / (3.0 * CONE_K));

/// Weights photons by their distance to the query point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KernelType {
    /// Every photon in range has weight one.
    None,

    /// Weight falls off linearly with distance.
    Cone,

    /// Quintic falloff with zero slope at both ends.
    Smootherstep,
}

impl KernelType {
    /// Returns the weight of a photon.
    ///
    /// * `t` - Distance to the query point divided by the search radius.
    #[inline]
    pub fn weight(&self, t: Float) -> Float {
        match self {
            Self::None => 1.0,
            Self::Cone => CONE_NORMALIZER * (1.0 - t / CONE_K),
            Self::Smootherstep => 1.0 + t * t * t * (t * (15.0 - 6.0 * t) - 10.0),
        }
    }
}

impl Default for KernelType {
    fn default() -> Self {
        Self::Cone
    }
}

impl FromStr for KernelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "cone" => Ok(Self::Cone),
            "smootherstep" | "perlin" => Ok(Self::Smootherstep),
            _ => Err(format!("Unsupported kernel type '{}'", s)),
        }
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Cone => write!(f, "cone"),
            Self::Smootherstep => write!(f, "smootherstep"),
        }
    }
}
