//! Camera Pass

use super::*;
use itertools::iproduct;

/// Edge length of the square image tiles handed to workers.
const TILE_SIZE: usize = 16;

/// Stream tag of camera paths.
const CAMERA_STREAM: u64 = 1 << 61;

/// Everything a camera path needs to read during a pass.
pub struct CameraPass<'a, W: World + ?Sized> {
    /// The scene.
    pub world: &'a W,

    /// The camera.
    pub camera: &'a Arc<dyn CameraModel>,

    /// Photon map of the iteration. Photon-storing hits contribute nothing
    /// while it is unconstructed.
    pub photon_map: &'a PhotonMap,

    /// Radiance estimator.
    pub estimator: &'a RadianceEstimator,

    /// Wavelengths of the iteration.
    pub wavelengths: &'a WavelengthSamples,

    /// Squared search radius of the iteration.
    pub radius2: Float,

    /// Maximum number of bounces.
    pub max_depth: usize,
}

impl<'a, W: World + ?Sized> CameraPass<'a, W> {
    /// Traces one camera path per pixel in parallel and adds the estimates
    /// to `film`.
    ///
    /// * `film`      - Receives the pixel estimates.
    /// * `settings`  - Render settings.
    /// * `iteration` - Iteration number.
    pub fn render(&self, film: &mut Film, settings: &PpmSettings, iteration: usize) -> Result<(), String> {
        let (width, height) = film.resolution();
        let n_tiles = ((width + TILE_SIZE - 1) / TILE_SIZE, (height + TILE_SIZE - 1) / TILE_SIZE);
        let tile_count = n_tiles.0 * n_tiles.1;
        let accumulators = (0..settings.threads)
            .map(|_| self.estimator.accumulator())
            .collect::<Result<Vec<_>, _>>()?;

        thread::scope(|scope| {
            let (tx_collector, rx_collector) = crossbeam_channel::bounded::<(usize, usize, ColorValue)>(4096);
            let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(settings.threads);

            // Spawn collector thread.
            scope.spawn(move || {
                for (x, y, value) in rx_collector.iter() {
                    film.add_sample(x, y, value);
                }
            });

            // Spawn worker threads.
            for mut accumulator in accumulators {
                let rx_worker = rx_worker.clone();
                let tx_collector = tx_collector.clone();
                scope.spawn(move || {
                    for tile in rx_worker.iter() {
                        let mut rng = path_rng(settings.seed, iteration, CAMERA_STREAM | tile as u64);
                        let x0 = (tile % n_tiles.0) * TILE_SIZE;
                        let y0 = (tile / n_tiles.0) * TILE_SIZE;
                        let x1 = min(x0 + TILE_SIZE, width);
                        let y1 = min(y0 + TILE_SIZE, height);
                        for (y, x) in iproduct!(y0..y1, x0..x1) {
                            let radiance = self.trace_path((x, y), &mut accumulator, &mut rng);
                            tx_collector.send((x, y, self.wavelengths.to_rgb(&radiance))).unwrap();
                        }
                    }
                });
            }
            drop(rx_worker); // Drop extra since we've cloned one for each worker.
            drop(tx_collector);

            // Send work.
            for tile in 0..tile_count {
                tx_worker.send(tile).unwrap();
            }
        });
        Ok(())
    }

    /// Follows a camera path through specular bounces to the first diffuse or
    /// glossy hit and returns the radiance it carries back.
    ///
    /// * `pixel`       - Pixel coordinates `(x, y)`.
    /// * `accumulator` - Scratch accumulator of the calling thread.
    /// * `rng`         - Random number source.
    pub fn trace_path(&self, pixel: (usize, usize), accumulator: &mut KnnAccumulator, rng: &mut RNG) -> SampledSpectra {
        let frame = self.camera.frame();
        let sensor = Bxdf::Sensor(Sensor::new(Arc::clone(self.camera), pixel));
        let sample = sensor.sample(&-frame.normal, &frame, self.wavelengths, rng);
        if !sample.is_valid() {
            return SampledSpectra::ZERO;
        }

        let mut weight = sample.weight;
        let mut wavelength_is_selected = false;
        let mut radiance = SampledSpectra::ZERO;
        let mut ray = Ray::new(self.camera.position(), sample.direction.direction);

        for _ in 0..self.max_depth {
            let info = match self.world.cast_ray(&ray) {
                Some(info) => info,
                None => break,
            };

            // Only the first hit and specular bounces reach this point.
            radiance += weight * self.world.emitted_radiance(&info, &-ray.direction, self.wavelengths);

            let bxdf = self.world.bxdf(&info, self.wavelengths);
            if bxdf.is_emissive() {
                break;
            }
            if !wavelength_is_selected && bxdf.wavelength_is_selected() {
                wavelength_is_selected = true;
                weight *= self.wavelengths.primary_inverse_probability();
            }

            if bxdf.shader_type().stores_photons() {
                if !self.photon_map.is_constructed() {
                    break;
                }
                let estimate = self
                    .estimator
                    .estimate(
                        self.photon_map,
                        &info.point,
                        &info.normal,
                        &ray.direction,
                        self.radius2,
                        &bxdf,
                        &info.shading_frame,
                        self.wavelengths,
                        wavelength_is_selected,
                        accumulator,
                    )
                    .unwrap_or_else(|e| {
                        warn!("{}", e);
                        SampledSpectra::ZERO
                    });
                radiance += weight * estimate;
                break;
            }

            let sample = bxdf.sample(&ray.direction, &info.shading_frame, self.wavelengths, rng);
            if !sample.is_valid() {
                break;
            }
            weight *= sample.weight;
            if weight.is_zero() {
                break;
            }
            ray = Ray::spawn(&info.point, &info.normal, &sample.direction.direction);
        }
        radiance
    }
}
