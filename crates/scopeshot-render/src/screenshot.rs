//! Image encoding for captured display buffers.
//!
//! Display buffers store rows bottom-to-top, so every writer here flips
//! vertically before encoding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgba};
use scopeshot_core::ImageFileFormat;

/// JPEG quality used for every capture.
pub const JPEG_QUALITY: u8 = 100;

/// Error type for screenshot operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("Failed to save image: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image data")]
    InvalidImageData,
}

/// Sets the alpha byte of every RGBA pixel to 255.
pub fn force_opaque_alpha(buffer: &mut [u8]) {
    for pixel in buffer.chunks_exact_mut(4) {
        pixel[3] = u8::MAX;
    }
}

/// Reorders a bottom-to-top RGBA buffer into top-to-bottom image rows.
pub fn flip_rows(
    buffer: Vec<u8>,
    width: u32,
    height: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>, ScreenshotError> {
    let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, buffer).ok_or(ScreenshotError::InvalidImageData)?;
    image::imageops::flip_vertical_in_place(&mut img);
    Ok(img)
}

/// Saves a bottom-to-top RGBA display buffer to an image file.
///
/// The encoder is picked from the file name: `.png` writes PNG, `.jpg` and
/// `.jpeg` write quality-100 JPEG (alpha dropped), anything else falls back
/// to PNG under the name given.
///
/// # Errors
/// Returns an error if the buffer size does not match `width * height * 4`,
/// or if the file cannot be created or encoded.
pub fn save_image(
    filename: &str,
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<(), ScreenshotError> {
    let format = ImageFileFormat::from_file_name(filename);
    let img = flip_rows(data.to_vec(), width, height)?;

    let mut writer = BufWriter::new(File::create(Path::new(filename))?);
    write_image(&mut writer, &img, format)?;
    writer.flush()?;

    Ok(())
}

/// Encodes a bottom-to-top RGBA display buffer as PNG in memory.
pub fn save_to_buffer(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ScreenshotError> {
    let img = flip_rows(data.to_vec(), width, height)?;
    let mut buffer = Vec::new();
    write_image(&mut buffer, &img, ImageFileFormat::Png)?;
    Ok(buffer)
}

fn write_image<W: Write>(
    writer: W,
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    format: ImageFileFormat,
) -> Result<(), ScreenshotError> {
    let (width, height) = img.dimensions();
    match format {
        ImageFileFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Fast, FilterType::NoFilter);
            encoder.write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)?;
        }
        ImageFileFormat::Jpeg => {
            // Convert to RGB for JPEG (no alpha)
            let rgb_img = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
            encoder.write_image(rgb_img.as_raw(), width, height, image::ExtendedColorType::Rgb8)?;
        }
    }
    Ok(())
}
