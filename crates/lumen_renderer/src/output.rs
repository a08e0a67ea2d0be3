//! Writing finished images to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;

use crate::error::{RenderError, RenderResult};
use crate::renderer::ImageBuffer;

/// Write 8-bit RGB pixels as a binary PPM (P6).
///
/// `pixels` must hold exactly `width * height * 3` bytes, row-major from the
/// top-left.
pub fn write_ppm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> RenderResult<()> {
    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    write!(writer, "P6\n{} {}\n255\n", width, height)?;
    writer.write_all(pixels)?;
    writer.flush()?;
    Ok(())
}

/// Save an image, choosing the format from the file extension.
///
/// `.ppm` (or no extension) is written directly; anything else goes through
/// the `image` crate's encoders.
pub fn save_image(path: &Path, image: &ImageBuffer) -> RenderResult<()> {
    let bytes = image.to_rgb8();

    let is_ppm = path
        .extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(&mut writer, image.width, image.height, &bytes)?;
    } else {
        let size_error = RenderError::BufferSize {
            expected: image.width as usize * image.height as usize * 3,
            actual: bytes.len(),
        };
        let rgb = RgbImage::from_raw(image.width, image.height, bytes).ok_or(size_error)?;
        rgb.save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
