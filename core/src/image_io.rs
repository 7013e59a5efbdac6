//! Image I/O

use crate::base::*;
use crate::spectrum::*;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use exr::prelude::*;
use image::{ImageBuffer, ImageFormat, Rgb};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::result::Result;
use std::sync::OnceLock;

/// Write an image. The format is chosen by the file extension: `.exr`,
/// `.png`, `.tga` or `.pfm`.
///
/// * `path`   - Output file path.
/// * `pixels` - Linear RGB pixels in row major order, top row first.
/// * `width`  - Image width.
/// * `height` - Image height.
pub fn write_image(path: &str, pixels: &[ColorValue], width: usize, height: usize) -> Result<(), String> {
    if pixels.len() != width * height {
        return Err(format!(
            "Image {path} has {} pixels, expected {width} x {height}",
            pixels.len()
        ));
    }

    match get_extension_from_filename(path) {
        Some(".exr") => write_exr(path, pixels, width, height),
        Some(".tga") => write_8_bit(path, pixels, width, height, ImageFormat::Tga),
        Some(".png") => write_8_bit(path, pixels, width, height, ImageFormat::Png),
        Some(".pfm") => write_pfm(path, pixels, width, height),
        Some(extension) => Err(format!("Extension {extension} is not supported")),
        None => Err(format!("Can't determine file type from suffix of filename {path}")),
    }
}

/// Returns regular expression for extracting the file extension. This will
/// match the last occurrence of a period followed by no periods or slashes.
fn regex_file_ext() -> &'static Regex {
    static DATA: OnceLock<Regex> = OnceLock::new();
    DATA.get_or_init(|| Regex::new(r"(\.[^./\\]+)$").unwrap())
}

/// Retrieve the extension from a file path.
///
/// * `path` - The file path.
fn get_extension_from_filename(path: &str) -> Option<&str> {
    regex_file_ext()
        .captures(path)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
}

/// Writes the image in OpenEXR format.
///
/// * `path`   - Output file path.
/// * `pixels` - Linear RGB pixels.
/// * `width`  - Image width.
/// * `height` - Image height.
fn write_exr(path: &str, pixels: &[ColorValue], width: usize, height: usize) -> Result<(), String> {
    info!("Writing image {} with resolution {}x{}", path, width, height);

    let size = Vec2(width, height);
    let layer = Layer::new(
        size,
        LayerAttributes::named("render"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgb(|pos: Vec2<usize>| {
            let c = pixels[pos.1 * width + pos.0];
            (c.r as f32, c.g as f32, c.b as f32)
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    match Image::empty(attributes).with_layer(layer).write().to_file(path) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}")),
    }
}

/// Writes the image in an 8-bit image format with gamma correction.
///
/// * `path`         - Output file path.
/// * `pixels`       - Linear RGB pixels.
/// * `width`        - Image width.
/// * `height`       - Image height.
/// * `image_format` - Image format.
fn write_8_bit(
    path: &str,
    pixels: &[ColorValue],
    width: usize,
    height: usize,
    image_format: ImageFormat,
) -> Result<(), String> {
    info!("Writing image {path} with resolution {width}x{height}");

    let imgbuf = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        Rgb(apply_gamma(&pixels[y as usize * width + x as usize]))
    });

    match imgbuf.save_with_format(path, image_format) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}.")),
    }
}

/// Writes the image in PFM (Portable FloatMap) format. Rows are stored
/// bottom to top and the sign of the scale encodes the byte order.
///
/// * `path`   - Output file path.
/// * `pixels` - Linear RGB pixels.
/// * `width`  - Image width.
/// * `height` - Image height.
fn write_pfm(path: &str, pixels: &[ColorValue], width: usize, height: usize) -> Result<(), String> {
    info!("Writing image {} with resolution {}x{}", path, width, height);

    let file = File::create(path).map_err(|e| format!("write_pfm(): Error writing PFM file '{path}': {e}"))?;
    let mut writer = BufWriter::new(file);

    let big_endian = cfg!(target_endian = "big");
    let scale = if big_endian { 1.0 } else { -1.0 };
    write!(writer, "PF\n{width} {height}\n{scale}\n")
        .map_err(|e| format!("write_pfm(): Error writing PFM header '{path}': {e}"))?;

    for y in (0..height).rev() {
        for c in &pixels[y * width..(y + 1) * width] {
            for v in [c.r, c.g, c.b] {
                if big_endian {
                    writer.write_f32::<BigEndian>(v as f32)
                } else {
                    writer.write_f32::<LittleEndian>(v as f32)
                }
                .map_err(|e| format!("write_pfm(): Error writing PFM pixels '{path}': {e}"))?;
            }
        }
    }

    writer
        .flush()
        .map_err(|e| format!("write_pfm(): Error writing PFM file '{path}': {e}"))
}

/// Apply gamma correction to a RGB pixel and return the clamped 8-bit
/// values.
///
/// * `c` - Linear RGB pixel.
#[inline]
fn apply_gamma(c: &ColorValue) -> [u8; 3] {
    [clamp_byte(c.r), clamp_byte(c.g), clamp_byte(c.b)]
}

/// Clamp floating point value to 8-bit range [0, 255].
///
/// * `v` - Value to clamp.
#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}
