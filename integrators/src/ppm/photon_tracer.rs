//! Photon Tracing Pass

use super::*;

/// Number of photons a worker traces per work item.
const PHOTON_CHUNK_SIZE: usize = 1024;

/// Path depth from which Russian roulette may terminate a photon.
const RUSSIAN_ROULETTE_DEPTH: usize = 3;

/// Stream tag of photon paths.
const PHOTON_STREAM: u64 = 1 << 62;

/// Traces the photons of an iteration in parallel and stores them in
/// `photon_map`. The map must have been initialized for the pass.
///
/// * `world`       - The scene.
/// * `photon_map`  - Receives the photons.
/// * `settings`    - Render settings.
/// * `wavelengths` - Wavelengths of the iteration.
/// * `iteration`   - Iteration number.
pub fn trace_photons<W: World + ?Sized>(
    world: &W,
    photon_map: &PhotonMap,
    settings: &PpmSettings,
    wavelengths: &WavelengthSamples,
    iteration: usize,
) {
    let n_chunks = (settings.num_photons + PHOTON_CHUNK_SIZE - 1) / PHOTON_CHUNK_SIZE;
    let power_scale = 1.0 / settings.num_photons as Float;

    thread::scope(|scope| {
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(settings.threads);

        // Spawn worker threads.
        for _ in 0..settings.threads {
            let rx_worker = rx_worker.clone();
            scope.spawn(move || {
                for chunk in rx_worker.iter() {
                    let mut rng = path_rng(settings.seed, iteration, PHOTON_STREAM | chunk as u64);
                    let start = chunk * PHOTON_CHUNK_SIZE;
                    let end = min(start + PHOTON_CHUNK_SIZE, settings.num_photons);
                    for _ in start..end {
                        trace_photon(world, photon_map, wavelengths, power_scale, settings.max_depth, &mut rng);
                    }
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.

        // Send work.
        for chunk in 0..n_chunks {
            tx_worker.send(chunk).unwrap();
        }
    });
}

/// Follows a single photon from a light through the scene storing a record
/// at every diffuse or glossy hit.
///
/// * `world`       - The scene.
/// * `photon_map`  - Receives the photons.
/// * `wavelengths` - Wavelengths of the iteration.
/// * `power_scale` - Inverse number of photons of the iteration.
/// * `max_depth`   - Maximum number of bounces.
/// * `rng`         - Random number source.
pub fn trace_photon<W: World + ?Sized>(
    world: &W,
    photon_map: &PhotonMap,
    wavelengths: &WavelengthSamples,
    power_scale: Float,
    max_depth: usize,
    rng: &mut RNG,
) {
    // Emit from a point on a light.
    let light = match world.sample_light(wavelengths, rng) {
        Some(light) => light,
        None => return,
    };
    let emission = light.bxdf.sample(&-light.normal, &light.frame, wavelengths, rng);
    if !emission.is_valid() {
        return;
    }

    let mut energy = emission.weight * (light.inverse_pdf * power_scale);
    let mut inverse_sampling_pdf = emission.direction.inverse_pdf();
    let mut wavelength_is_selected = false;
    let mut ray = Ray::spawn(&light.point, &light.normal, &emission.direction.direction);

    for depth in 0..max_depth {
        let info = match world.cast_ray(&ray) {
            Some(info) => info,
            None => break,
        };

        // Lights absorb.
        let bxdf = world.bxdf(&info, wavelengths);
        if bxdf.is_emissive() {
            break;
        }
        wavelength_is_selected = wavelength_is_selected || bxdf.wavelength_is_selected();

        if bxdf.shader_type().stores_photons() {
            photon_map.store(info.point, ray.direction, energy, inverse_sampling_pdf, wavelength_is_selected);
        }

        let sample = bxdf.sample(&ray.direction, &info.shading_frame, wavelengths, rng);
        if !sample.is_valid() {
            break;
        }
        energy *= sample.weight;
        if energy.is_zero() {
            break;
        }

        if depth >= RUSSIAN_ROULETTE_DEPTH {
            let p = min(sample.weight.max(), 1.0);
            if rng.sample() >= p {
                break;
            }
            energy /= p;
        }

        inverse_sampling_pdf = sample.direction.inverse_pdf();
        ray = Ray::spawn(&info.point, &info.normal, &sample.direction.direction);
    }
}
