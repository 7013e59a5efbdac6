#[macro_use]
extern crate log;

use hikari::app::*;
use hikari::camera::CameraModel;
use hikari::film::Film;
use hikari::scene::AnalyticWorld;
use integrators::*;
use std::process;
use std::sync::Arc;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = render(&OPTIONS) {
        error!("{e}");
        process::exit(1);
    }
}

fn render(options: &Options) -> Result<(), String> {
    let settings = PpmSettings {
        num_photons: options.photons,
        search_radius: options.radius,
        radius_reduction_rate: options.alpha,
        k_nearest_neighbor: options.knn,
        kernel: options.kernel.parse()?,
        iterations: options.iterations,
        max_depth: options.max_depth,
        threads: options.threads(),
        cull_front_facing: options.cull_front_facing,
        cull_back_facing: options.cull_back_facing,
        wavelength_sampling: options.wavelength_sampling,
        seed: options.seed,
    };

    let resolution = (options.width, options.height);
    let (world, camera) = AnalyticWorld::cornell_box(resolution);
    let camera: Arc<dyn CameraModel> = Arc::new(camera);
    let mut film = Film::new(resolution.0, resolution.1);

    info!("Rendering with {} threads", settings.threads);
    let mut ppm = ProgressivePhotonMapping::new(settings)?.with_progress(!options.quiet);
    ppm.render(&world, &camera, &mut film)?;

    info!("Writing image to {}", options.image_file);
    film.write_image(&options.image_file)
}
