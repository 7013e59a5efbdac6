//! Camera

use crate::base::*;
use crate::geometry::*;
use crate::sampling::*;

/// Interface for camera models. Directions are expressed in the camera frame
/// whose normal is the viewing direction, tangent points right and bitangent
/// points up.
pub trait CameraModel: Send + Sync {
    /// Returns the position of the lens.
    fn position(&self) -> Point3f;

    /// Returns the camera frame.
    fn frame(&self) -> ShadingFrame;

    /// Returns the image resolution as `(width, height)`.
    fn resolution(&self) -> (usize, usize);

    /// Returns the importance emitted by `pixel` in the local direction `o`.
    ///
    /// * `o`     - Local direction leaving the lens.
    /// * `pixel` - Pixel coordinates `(x, y)`, y growing downward.
    fn calc_radiance(&self, o: &Vector3f, pixel: (usize, usize)) -> Float;

    /// Returns the solid angle density of `sample_direction` choosing `o`.
    ///
    /// * `o`     - Local direction leaving the lens.
    /// * `pixel` - Pixel coordinates `(x, y)`.
    fn calc_pdf(&self, o: &Vector3f, pixel: (usize, usize)) -> Float;

    /// Samples a local direction through `pixel`.
    ///
    /// * `pixel` - Pixel coordinates `(x, y)`.
    /// * `u`     - The 2D uniform random values.
    fn sample_direction(&self, pixel: (usize, usize), u: &[Float; 2]) -> SampledDirection;
}

/// A pinhole camera with a rectangular image plane at unit distance.
#[derive(Copy, Clone, Debug)]
pub struct PinholeCamera {
    /// Position of the pinhole.
    position: Point3f,

    /// Camera frame.
    frame: ShadingFrame,

    /// Image width in pixels.
    width: usize,

    /// Image height in pixels.
    height: usize,

    /// Half extent of the image plane along the tangent.
    half_width: Float,

    /// Half extent of the image plane along the bitangent.
    half_height: Float,
}

impl PinholeCamera {
    /// Create a new `PinholeCamera`.
    ///
    /// * `position`   - Position of the pinhole.
    /// * `look_at`    - Point the camera looks at.
    /// * `up`         - Approximate up direction.
    /// * `fov`        - Vertical field of view in degrees.
    /// * `resolution` - Image resolution `(width, height)`.
    pub fn new(position: Point3f, look_at: Point3f, up: Vector3f, fov: Float, resolution: (usize, usize)) -> Self {
        let forward = (look_at - position).normalize();
        let right = forward.cross(&up).normalize();
        let true_up = right.cross(&forward);

        let (width, height) = (max(resolution.0, 1), max(resolution.1, 1));
        let half_height = (0.5 * fov.to_radians()).tan();
        let half_width = half_height * width as Float / height as Float;

        Self {
            position,
            frame: ShadingFrame {
                tangent: right,
                bitangent: true_up,
                normal: forward,
            },
            width,
            height,
            half_width,
            half_height,
        }
    }

    /// Returns the area of one pixel on the image plane.
    fn pixel_area(&self) -> Float {
        (2.0 * self.half_width / self.width as Float) * (2.0 * self.half_height / self.height as Float)
    }

    /// Returns the pixel a local direction passes through.
    ///
    /// * `o` - Local direction.
    fn pixel_of(&self, o: &Vector3f) -> Option<(usize, usize)> {
        if o.z <= 0.0 {
            return None;
        }
        let x = o.x / o.z;
        let y = o.y / o.z;
        let sx = (x / self.half_width + 1.0) * 0.5 * self.width as Float;
        let sy = (1.0 - y / self.half_height) * 0.5 * self.height as Float;
        if sx < 0.0 || sy < 0.0 || sx >= self.width as Float || sy >= self.height as Float {
            None
        } else {
            Some((sx as usize, sy as usize))
        }
    }
}

impl CameraModel for PinholeCamera {
    fn position(&self) -> Point3f {
        self.position
    }

    fn frame(&self) -> ShadingFrame {
        self.frame
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn calc_radiance(&self, o: &Vector3f, pixel: (usize, usize)) -> Float {
        if self.pixel_of(o) != Some(pixel) {
            return 0.0;
        }
        let cos2 = o.z * o.z;
        1.0 / (self.pixel_area() * cos2 * cos2)
    }

    fn calc_pdf(&self, o: &Vector3f, pixel: (usize, usize)) -> Float {
        if self.pixel_of(o) != Some(pixel) {
            return 0.0;
        }
        1.0 / (self.pixel_area() * o.z * o.z * o.z)
    }

    fn sample_direction(&self, pixel: (usize, usize), u: &[Float; 2]) -> SampledDirection {
        let sx = (pixel.0 as Float + u[0]) / self.width as Float;
        let sy = (pixel.1 as Float + u[1]) / self.height as Float;
        let x = (2.0 * sx - 1.0) * self.half_width;
        let y = (1.0 - 2.0 * sy) * self.half_height;
        let o = Vector3f::new(x, y, 1.0).normalize();
        SampledDirection::new(o, 1.0 / (self.pixel_area() * o.z * o.z * o.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PinholeCamera {
        PinholeCamera::new(
            Point3f::new(0.0, 0.0, 5.0),
            Point3f::ZERO,
            Vector3f::new(0.0, 1.0, 0.0),
            45.0,
            (64, 48),
        )
    }

    #[test]
    fn frame_looks_at_target() {
        let c = camera();
        let f = c.frame();
        assert!((f.normal - Vector3f::new(0.0, 0.0, -1.0)).length() < 1e-12);
        assert!((f.tangent - Vector3f::new(1.0, 0.0, 0.0)).length() < 1e-12);
        assert!((f.bitangent - Vector3f::new(0.0, 1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn sampled_directions_pass_through_pixel() {
        let c = camera();
        for pixel in [(0, 0), (10, 20), (63, 47)] {
            for u in [[0.1, 0.2], [0.5, 0.5], [0.9, 0.7]] {
                let s = c.sample_direction(pixel, &u);
                assert_eq!(c.pixel_of(&s.direction), Some(pixel));
                assert!((c.calc_pdf(&s.direction, pixel) - s.pdf).abs() < 1e-9 * s.pdf);
                // Importance times cosine over density is one.
                let w = c.calc_radiance(&s.direction, pixel) * s.direction.z / s.pdf;
                assert!((w - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn other_pixels_see_nothing() {
        let c = camera();
        let s = c.sample_direction((5, 5), &[0.5, 0.5]);
        assert_eq!(c.calc_radiance(&s.direction, (6, 5)), 0.0);
        assert_eq!(c.calc_pdf(&s.direction, (5, 6)), 0.0);
    }
}
