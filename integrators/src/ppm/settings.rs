//! Progressive Photon Mapping Settings

use super::*;

/// Parameters of a progressive photon mapping render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PpmSettings {
    /// Photons emitted per iteration.
    pub num_photons: usize,

    /// Initial photon search radius.
    pub search_radius: Float,

    /// Radius reduction rate in (0, 1].
    pub radius_reduction_rate: Float,

    /// Number of nearest photons gathered per estimate.
    pub k_nearest_neighbor: usize,

    /// Density estimation kernel.
    pub kernel: KernelType,

    /// Number of progressive iterations.
    pub iterations: usize,

    /// Maximum number of bounces of a path.
    pub max_depth: usize,

    /// Number of worker threads.
    pub threads: usize,

    /// Ignore photons arriving on the front side of a surface.
    pub cull_front_facing: bool,

    /// Ignore photons arriving on the back side of a surface.
    pub cull_back_facing: bool,

    /// Wavelength sampling strategy.
    pub wavelength_sampling: WavelengthSampling,

    /// Seed of the random number sequences.
    pub seed: u64,
}

impl Default for PpmSettings {
    fn default() -> Self {
        Self {
            num_photons: 200_000,
            search_radius: 0.05,
            radius_reduction_rate: 0.7,
            k_nearest_neighbor: 32,
            kernel: KernelType::Cone,
            iterations: 16,
            max_depth: 16,
            threads: 1,
            cull_front_facing: false,
            cull_back_facing: false,
            wavelength_sampling: WavelengthSampling::Rgb,
            seed: 0,
        }
    }
}

impl PpmSettings {
    /// Checks the parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_photons == 0 {
            return Err("PpmSettings: number of photons must be positive".to_string());
        }
        if !(self.search_radius > 0.0 && self.search_radius.is_finite()) {
            return Err(format!(
                "PpmSettings: search radius must be positive, got {}",
                self.search_radius
            ));
        }
        if !(self.radius_reduction_rate > 0.0 && self.radius_reduction_rate <= 1.0) {
            return Err(format!(
                "PpmSettings: radius reduction rate must be in (0, 1], got {}",
                self.radius_reduction_rate
            ));
        }
        if self.k_nearest_neighbor == 0 {
            return Err("PpmSettings: k of the nearest neighbour search must be positive".to_string());
        }
        if self.threads == 0 {
            return Err("PpmSettings: number of threads must be positive".to_string());
        }
        if self.cull_front_facing && self.cull_back_facing {
            warn!("Culling both sides rejects every photon");
        }
        Ok(())
    }
}

/// Tracks the squared search radius across iterations. Before iteration `n`
/// (1-based) the radius shrinks as `r²_n = r²_{n-1} (n - 1 + α) / n`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RadiusSchedule {
    /// Radius reduction rate.
    alpha: Float,

    /// Number of completed updates.
    cycle: usize,

    /// Current squared radius.
    radius2: Float,
}

impl RadiusSchedule {
    /// Create a new `RadiusSchedule`. The first update yields the initial
    /// radius.
    ///
    /// * `search_radius` - Initial search radius.
    /// * `alpha`         - Radius reduction rate in (0, 1].
    pub fn new(search_radius: Float, alpha: Float) -> Self {
        Self {
            alpha,
            cycle: 0,
            radius2: search_radius * search_radius / alpha,
        }
    }

    /// Advances to the next iteration and returns its squared radius.
    pub fn update(&mut self) -> Float {
        self.cycle += 1;
        let n = self.cycle as Float;
        self.radius2 *= (n - 1.0 + self.alpha) / n;
        self.radius2
    }

    /// Returns the current squared radius.
    pub fn radius2(&self) -> Float {
        self.radius2
    }

    /// Returns the number of updates so far.
    pub fn cycle(&self) -> usize {
        self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PpmSettings::default().validate().is_ok());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let base = PpmSettings::default();
        let invalid = [
            PpmSettings { num_photons: 0, ..base },
            PpmSettings { search_radius: 0.0, ..base },
            PpmSettings { search_radius: Float::NAN, ..base },
            PpmSettings { radius_reduction_rate: 0.0, ..base },
            PpmSettings { radius_reduction_rate: 1.5, ..base },
            PpmSettings { k_nearest_neighbor: 0, ..base },
            PpmSettings { threads: 0, ..base },
        ];
        for settings in invalid.iter() {
            assert!(settings.validate().is_err(), "{:?}", settings);
        }
        assert!(PpmSettings { radius_reduction_rate: 1.0, ..base }.validate().is_ok());
    }

    #[test]
    fn first_update_yields_initial_radius() {
        let mut schedule = RadiusSchedule::new(0.2, 0.7);
        assert!(approx_eq!(Float, schedule.update(), 0.04, epsilon = 1e-15));
        assert_eq!(schedule.cycle(), 1);

        // Second pass: r² (1 + α) / 2.
        assert!(approx_eq!(Float, schedule.update(), 0.04 * 1.7 / 2.0, epsilon = 1e-15));
        // Third pass: r² (2 + α) / 3.
        assert!(approx_eq!(Float, schedule.update(), 0.04 * 0.85 * 2.7 / 3.0, epsilon = 1e-15));
        assert!(approx_eq!(Float, schedule.radius2(), 0.04 * 0.85 * 0.9, epsilon = 1e-15));
    }

    #[test]
    fn alpha_one_keeps_radius() {
        let mut schedule = RadiusSchedule::new(0.5, 1.0);
        for _ in 0..10 {
            assert!(approx_eq!(Float, schedule.update(), 0.25, epsilon = 1e-15));
        }
    }

    proptest! {
        #[test]
        fn radius_never_grows(radius in 1e-3..10.0f64, alpha in 0.01..1.0f64, n in 2_usize..200) {
            let mut schedule = RadiusSchedule::new(radius, alpha);
            let mut previous = schedule.update();
            for _ in 1..n {
                let current = schedule.update();
                prop_assert!(current <= previous);
                prop_assert!(current > 0.0);
                previous = current;
            }
        }
    }
}
