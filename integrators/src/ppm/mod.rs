//! Progressive Photon Mapping

use crate::common::*;
use accelerators::*;
use hikari::base::*;
use hikari::camera::*;
use hikari::film::Film;
use hikari::geometry::*;
use hikari::reflection::*;
use hikari::rng::*;
use hikari::scene::World;
use hikari::spectrum::*;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

mod camera_pass;
mod estimator;
mod kernel;
mod photon_tracer;
mod settings;

// Re-export
pub use camera_pass::*;
pub use estimator::*;
pub use kernel::*;
pub use photon_tracer::*;
pub use settings::*;

/// Stream tag of the per iteration wavelength draw.
const WAVELENGTH_STREAM: u64 = 1 << 60;

/// Implements progressive photon mapping. Each iteration traces a fresh set
/// of photons, shrinks the search radius and adds one camera path per pixel
/// to the film.
pub struct ProgressivePhotonMapping {
    /// Render settings.
    settings: PpmSettings,

    /// Radiance estimator.
    estimator: RadianceEstimator,

    /// Search radius across iterations.
    radius: RadiusSchedule,

    /// Photons of the current iteration.
    photon_map: PhotonMap,

    /// Show a progress bar.
    show_progress: bool,
}

impl ProgressivePhotonMapping {
    /// Create a new `ProgressivePhotonMapping`.
    ///
    /// * `settings` - Render settings.
    pub fn new(settings: PpmSettings) -> Result<Self, String> {
        settings.validate()?;
        info!(
            "PPM: {} photons, radius {}, alpha {}, k {}, {} kernel",
            settings.num_photons,
            settings.search_radius,
            settings.radius_reduction_rate,
            settings.k_nearest_neighbor,
            settings.kernel
        );
        Ok(Self {
            settings,
            estimator: RadianceEstimator::new(
                settings.k_nearest_neighbor,
                settings.kernel,
                settings.cull_front_facing,
                settings.cull_back_facing,
            ),
            radius: RadiusSchedule::new(settings.search_radius, settings.radius_reduction_rate),
            photon_map: PhotonMap::new(settings.threads > 1),
            show_progress: false,
        })
    }

    /// Enables the progress bar.
    ///
    /// * `show_progress` - Show a progress bar over the iterations.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Returns the settings.
    pub fn settings(&self) -> &PpmSettings {
        &self.settings
    }

    /// Returns the squared search radius of the last iteration.
    pub fn radius2(&self) -> Float {
        self.radius.radius2()
    }

    /// Returns the photon map of the last iteration.
    pub fn photon_map(&self) -> &PhotonMap {
        &self.photon_map
    }

    /// Runs every iteration and accumulates the estimates in `film`.
    ///
    /// * `world`  - The scene.
    /// * `camera` - The camera.
    /// * `film`   - Receives the pixel estimates.
    pub fn render<W: World + ?Sized>(
        &mut self,
        world: &W,
        camera: &Arc<dyn CameraModel>,
        film: &mut Film,
    ) -> Result<(), String> {
        if camera.resolution() != film.resolution() {
            return Err(format!(
                "ProgressivePhotonMapping::render(): camera resolution {:?} differs from film resolution {:?}",
                camera.resolution(),
                film.resolution()
            ));
        }

        let progress = create_progress_bar(self.settings.iterations as u64, !self.show_progress);
        progress.set_message("Rendering scene");

        let start = Instant::now();
        for _ in 0..self.settings.iterations {
            self.iterate(world, camera, film)?;
            progress.inc(1);
        }

        progress.finish_with_message("Render complete");
        info!(
            "Rendered {} iterations in {:.3}s",
            self.settings.iterations,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Runs a single iteration.
    ///
    /// * `world`  - The scene.
    /// * `camera` - The camera.
    /// * `film`   - Receives the pixel estimates.
    pub fn iterate<W: World + ?Sized>(
        &mut self,
        world: &W,
        camera: &Arc<dyn CameraModel>,
        film: &mut Film,
    ) -> Result<(), String> {
        let radius2 = self.radius.update();
        let iteration = self.radius.cycle();

        // Photon and camera paths of an iteration share the wavelengths.
        let mut rng = path_rng(self.settings.seed, iteration, WAVELENGTH_STREAM);
        let wavelengths = self.settings.wavelength_sampling.sample(&mut rng);

        self.photon_map.initialize(self.settings.num_photons);
        trace_photons(world, &self.photon_map, &self.settings, &wavelengths, iteration);
        if self.photon_map.is_empty() {
            warn!("Iteration {}: no photon was stored", iteration);
        } else {
            self.photon_map.construct()?;
        }
        info!(
            "Iteration {}: {} photons, search radius {:.6}",
            iteration,
            self.photon_map.len(),
            radius2.sqrt()
        );

        let pass = CameraPass {
            world,
            camera,
            photon_map: &self.photon_map,
            estimator: &self.estimator,
            wavelengths: &wavelengths,
            radius2,
            max_depth: self.settings.max_depth,
        };
        pass.render(film, &self.settings, iteration)?;
        film.finish_iteration();
        Ok(())
    }
}

/// Returns the random number sequence of a path family in an iteration.
///
/// * `seed`      - User seed.
/// * `iteration` - Iteration number.
/// * `stream`    - Stream tag combined with a work item number.
fn path_rng(seed: u64, iteration: usize, stream: u64) -> RNG {
    let key = seed
        .wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add((iteration as u64).wrapping_mul(0xbf58_476d_1ce4_e5b9));
    RNG::new(key ^ stream)
}
