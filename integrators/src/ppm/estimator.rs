//! Radiance Estimator

use super::*;

/// Estimates reflected radiance from the density of nearby photons.
#[derive(Copy, Clone, Debug)]
pub struct RadianceEstimator {
    /// Number of nearest photons gathered.
    k: usize,

    /// Density estimation kernel.
    kernel: KernelType,

    /// Ignore photons arriving on the front side.
    cull_front: bool,

    /// Ignore photons arriving on the back side.
    cull_back: bool,
}

impl RadianceEstimator {
    /// Create a new `RadianceEstimator`.
    ///
    /// * `k`          - Number of nearest photons gathered.
    /// * `kernel`     - Density estimation kernel.
    /// * `cull_front` - Ignore photons arriving on the front side.
    /// * `cull_back`  - Ignore photons arriving on the back side.
    pub fn new(k: usize, kernel: KernelType, cull_front: bool, cull_back: bool) -> Self {
        Self {
            k,
            kernel,
            cull_front,
            cull_back,
        }
    }

    /// Returns an accumulator sized for this estimator. Each worker thread
    /// owns one.
    pub fn accumulator(&self) -> Result<KnnAccumulator, String> {
        KnnAccumulator::new(self.k)
    }

    /// Returns the radiance leaving a surface point against `vin`.
    ///
    /// * `photon_map`    - The constructed photon map.
    /// * `point`         - Query point.
    /// * `normal`        - Surface normal facing the query ray.
    /// * `vin`           - Direction of the query ray.
    /// * `radius2`       - Squared search radius.
    /// * `bxdf`          - Scattering model at the query point.
    /// * `frame`         - Shading frame at the query point.
    /// * `wavelengths`   - Sampled wavelengths.
    /// * `path_selected` - True if the query path selected a wavelength.
    /// * `accumulator`   - Scratch accumulator of the calling thread.
    #[allow(clippy::too_many_arguments)]
    pub fn estimate(
        &self,
        photon_map: &PhotonMap,
        point: &Point3f,
        normal: &Vector3f,
        vin: &Vector3f,
        radius2: Float,
        bxdf: &Bxdf,
        frame: &ShadingFrame,
        wavelengths: &WavelengthSamples,
        path_selected: bool,
        accumulator: &mut KnnAccumulator,
    ) -> Result<SampledSpectra, String> {
        accumulator.clear();
        photon_map.search(point, normal, radius2, self.cull_front, self.cull_back, accumulator)?;

        let inverse_radius = 1.0 / radius2.sqrt();
        let mut radiance = SampledSpectra::ZERO;
        for neighbor in accumulator.iter() {
            let photon = photon_map.record(neighbor.index);
            let vout = -photon.vin;
            let f = bxdf.eval_radiance(vin, &vout, frame, wavelengths);
            if f.is_zero() {
                continue;
            }

            let t = neighbor.distance2.into_inner().sqrt() * inverse_radius;
            let contribution = f * photon.energy * self.kernel.weight(t);
            if !path_selected && photon.wavelength_is_selected {
                radiance += contribution * wavelengths.primary_inverse_probability();
            } else {
                radiance += contribution;
            }
        }
        Ok(radiance * (INV_PI / radius2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use hikari::reflection::Lambert;

    const DOWN: Vector3f = Vector3f { x: 0.0, y: 0.0, z: -1.0 };

    fn lambert(r: Float) -> Bxdf {
        Bxdf::Lambert(Lambert::new(SampledSpectra::new(r)))
    }

    fn single_photon_map(selected: bool) -> PhotonMap {
        let mut map = PhotonMap::new(false);
        map.initialize(1);
        map.store(Point3f::ZERO, DOWN, SampledSpectra::new(2.0), 1.0, selected);
        map.construct().unwrap();
        map
    }

    fn estimate(
        estimator: &RadianceEstimator,
        map: &PhotonMap,
        radius2: Float,
        path_selected: bool,
    ) -> SampledSpectra {
        let frame = ShadingFrame::from_normal(&Vector3f::Z_AXIS);
        let mut knn = estimator.accumulator().unwrap();
        estimator
            .estimate(
                map,
                &Point3f::ZERO,
                &Vector3f::Z_AXIS,
                &Vector3f::new(0.6, 0.0, -0.8),
                radius2,
                &lambert(0.5),
                &frame,
                &WavelengthSamples::rgb(1),
                path_selected,
                &mut knn,
            )
            .unwrap()
    }

    #[test]
    fn single_photon() {
        let map = single_photon_map(false);
        let radius2 = 0.25;
        let expected = 0.5 * INV_PI * 2.0 / (PI * radius2);

        let none = estimate(&RadianceEstimator::new(4, KernelType::None, false, false), &map, radius2, false);
        for i in 0..SAMPLE_SIZE {
            assert!(approx_eq!(Float, none[i], expected, epsilon = 1e-12));
        }

        let cone = estimate(&RadianceEstimator::new(4, KernelType::Cone, false, false), &map, radius2, false);
        assert!(approx_eq!(
            Float,
            cone[0],
            expected * KernelType::Cone.weight(0.0),
            epsilon = 1e-12
        ));
    }

    #[test]
    fn selected_photon_is_reweighted_for_unselected_path() {
        let estimator = RadianceEstimator::new(4, KernelType::None, false, false);
        let map = single_photon_map(true);
        let unselected_path = estimate(&estimator, &map, 1.0, false);
        let selected_path = estimate(&estimator, &map, 1.0, true);
        for i in 0..SAMPLE_SIZE {
            assert!(approx_eq!(Float, unselected_path[i], 3.0 * selected_path[i], epsilon = 1e-12));
        }
    }

    #[test]
    fn culled_photons_do_not_contribute() {
        let map = single_photon_map(false);
        let estimator = RadianceEstimator::new(4, KernelType::None, true, false);
        assert!(estimate(&estimator, &map, 1.0, false).is_zero());
    }

    #[test]
    fn photons_out_of_range_do_not_contribute() {
        let mut map = PhotonMap::new(false);
        map.initialize(1);
        map.store(Point3f::new(2.0, 0.0, 0.0), DOWN, SampledSpectra::ONE, 1.0, false);
        map.construct().unwrap();
        let estimator = RadianceEstimator::new(4, KernelType::None, false, false);
        assert!(estimate(&estimator, &map, 1.0, false).is_zero());
    }

    #[test]
    fn uniform_density_is_recovered() {
        // Photons on a regular grid with spacing h carry irradiance e / h².
        let h = 0.005;
        let e = 1e-3;
        let n = 60;
        let mut map = PhotonMap::new(true);
        map.initialize((2 * n + 1) * (2 * n + 1));
        for i in -(n as i32)..=(n as i32) {
            for j in -(n as i32)..=(n as i32) {
                let p = Point3f::new(i as Float * h + 0.0013, j as Float * h + 0.0029, 0.0);
                map.store(p, DOWN, SampledSpectra::new(e), 1.0, false);
            }
        }
        map.construct().unwrap();

        let expected = 0.5 * INV_PI * e / (h * h);
        for kernel in [KernelType::None, KernelType::Cone] {
            let estimator = RadianceEstimator::new(4096, kernel, false, false);
            let radiance = estimate(&estimator, &map, 0.1 * 0.1, false);
            for i in 0..SAMPLE_SIZE {
                assert!(
                    (radiance[i] - expected).abs() < 0.03 * expected,
                    "{} kernel: {} vs {}",
                    kernel,
                    radiance[i],
                    expected
                );
            }
        }
    }

    #[test]
    fn search_before_construct_is_an_error() {
        let map = PhotonMap::new(false);
        let estimator = RadianceEstimator::new(4, KernelType::None, false, false);
        let mut knn = estimator.accumulator().unwrap();
        let frame = ShadingFrame::from_normal(&Vector3f::Z_AXIS);
        let result = estimator.estimate(
            &map,
            &Point3f::ZERO,
            &Vector3f::Z_AXIS,
            &DOWN,
            1.0,
            &lambert(0.5),
            &frame,
            &WavelengthSamples::default(),
            false,
            &mut knn,
        );
        assert!(result.is_err());
    }
}
