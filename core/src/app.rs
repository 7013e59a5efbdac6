//! Application related stuff

use crate::base::*;
use crate::spectrum::WavelengthSampling;
use clap::Parser;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Spectral progressive photon mapping renderer.", long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 uses every logical CPU)."
    )]
    n_threads: usize,

    /// Photons emitted per iteration.
    #[arg(long, value_name = "NUM", default_value_t = 200_000, help = "Number of photons traced per iteration.")]
    pub photons: usize,

    /// Initial photon search radius.
    #[arg(long, value_name = "FLOAT", default_value_t = 0.05, help = "Initial photon search radius.")]
    pub radius: Float,

    /// Radius reduction rate.
    #[arg(long, value_name = "FLOAT", default_value_t = 0.7, help = "Radius reduction rate in (0, 1].")]
    pub alpha: Float,

    /// Number of nearest photons gathered per estimate.
    #[arg(long, value_name = "NUM", default_value_t = 32, help = "Number of nearest photons used per estimate.")]
    pub knn: usize,

    /// Density estimation kernel.
    #[arg(
        long,
        value_name = "NAME",
        default_value = "cone",
        help = "Density estimation kernel (none, cone or smootherstep)."
    )]
    pub kernel: String,

    /// Number of progressive iterations.
    #[arg(long, short = 'n', value_name = "NUM", default_value_t = 16, help = "Number of progressive iterations.")]
    pub iterations: usize,

    /// Maximum path depth.
    #[arg(long = "max-depth", value_name = "NUM", default_value_t = 16, help = "Maximum number of bounces of a path.")]
    pub max_depth: usize,

    /// Image width.
    #[arg(long, value_name = "NUM", default_value_t = 256, help = "Image width in pixels.")]
    pub width: usize,

    /// Image height.
    #[arg(long, value_name = "NUM", default_value_t = 256, help = "Image height in pixels.")]
    pub height: usize,

    /// Wavelength sampling strategy.
    #[arg(
        long = "wavelength-sampling",
        value_name = "NAME",
        default_value_t = WavelengthSampling::Rgb,
        help = "Wavelength sampling (rgb, regular, random or stratified)."
    )]
    pub wavelength_sampling: WavelengthSampling,

    /// Discard photons arriving on the front side of the surface.
    #[arg(long = "cull-front", help = "Ignore photons arriving from the front side.")]
    pub cull_front_facing: bool,

    /// Discard photons arriving on the back side of the surface.
    #[arg(long = "cull-back", help = "Ignore photons arriving from the back side.")]
    pub cull_back_facing: bool,

    /// Random seed.
    #[arg(long, value_name = "NUM", default_value_t = 0, help = "Seed of the random number sequences.")]
    pub seed: u64,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "hikari.exr",
        help = "Write the final image to the given filename."
    )]
    pub image_file: String,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::try_parse_from(["hikari"]).unwrap();
        assert_eq!(options.kernel, "cone");
        assert_eq!(options.wavelength_sampling, WavelengthSampling::Rgb);
        assert_eq!(options.image_file, "hikari.exr");
        assert!(options.threads() >= 1);
        assert!(!options.cull_front_facing && !options.cull_back_facing);
    }

    #[test]
    fn parses_render_settings() {
        let options = Options::try_parse_from([
            "hikari",
            "-t",
            "100000",
            "--photons",
            "1000",
            "--radius",
            "0.1",
            "--kernel",
            "smootherstep",
            "--wavelength-sampling",
            "stratified",
            "--width",
            "64",
            "--cull-back",
            "-o",
            "out.png",
        ])
        .unwrap();
        assert_eq!(options.threads(), num_cpus::get());
        assert_eq!(options.photons, 1000);
        assert_eq!(options.radius, 0.1);
        assert_eq!(options.kernel, "smootherstep");
        assert_eq!(options.wavelength_sampling, WavelengthSampling::Stratified);
        assert_eq!((options.width, options.height), (64, 256));
        assert!(options.cull_back_facing);
        assert_eq!(options.image_file, "out.png");

        assert!(Options::try_parse_from(["hikari", "--wavelength-sampling", "cie"]).is_err());
    }
}
