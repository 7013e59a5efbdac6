//! Film

use crate::base::*;
use crate::image_io::*;
use crate::spectrum::*;

/// Accumulates per-pixel estimates over the iterations of a progressive
/// render.
#[derive(Clone, Debug)]
pub struct Film {
    /// Image width.
    width: usize,

    /// Image height.
    height: usize,

    /// Sum of the estimates of every finished iteration.
    accumulated: Vec<ColorValue>,

    /// Number of finished iterations.
    iterations: usize,
}

impl Film {
    /// Create a new `Film`.
    ///
    /// * `width`  - Image width.
    /// * `height` - Image height.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            accumulated: vec![ColorValue::BLACK; width * height],
            iterations: 0,
        }
    }

    /// Returns the resolution `(width, height)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the number of finished iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Adds the estimate of a pixel for the current iteration. Samples with
    /// NaN components are dropped.
    ///
    /// * `x`     - Pixel column.
    /// * `y`     - Pixel row.
    /// * `value` - Estimated RGB radiance.
    pub fn add_sample(&mut self, x: usize, y: usize, value: ColorValue) {
        debug_assert!(x < self.width && y < self.height);
        if value.has_nans() {
            warn!("Dropping NaN sample at pixel ({}, {})", x, y);
            return;
        }
        self.accumulated[y * self.width + x] += value;
    }

    /// Marks the end of an iteration.
    pub fn finish_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Returns the pixels averaged over the finished iterations.
    pub fn to_rgb(&self) -> Vec<ColorValue> {
        let n = max(self.iterations, 1) as Float;
        self.accumulated.iter().map(|&c| c / n).collect()
    }

    /// Writes the averaged image.
    ///
    /// * `path` - Output file path.
    pub fn write_image(&self, path: &str) -> Result<(), String> {
        write_image(path, &self.to_rgb(), self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_iterations() {
        let mut film = Film::new(2, 1);
        film.add_sample(1, 0, ColorValue::grey(1.0));
        film.finish_iteration();
        film.add_sample(1, 0, ColorValue::grey(3.0));
        film.add_sample(0, 0, ColorValue::new(Float::NAN, 0.0, 0.0));
        film.finish_iteration();

        let rgb = film.to_rgb();
        assert_eq!(film.iterations(), 2);
        assert_eq!(rgb[0], ColorValue::BLACK);
        assert_eq!(rgb[1], ColorValue::grey(2.0));
    }

    #[test]
    fn empty_film_is_black() {
        let film = Film::new(3, 2);
        assert_eq!(film.resolution(), (3, 2));
        assert!(film.to_rgb().iter().all(|&c| c == ColorValue::BLACK));
    }
}
