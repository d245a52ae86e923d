//! PNG export of pixel buffers.

use crate::error::ImageDiffResult;
use crate::pixel_buffer::PixelView;
use std::fs;
use std::path::Path;

/// Encode a buffer as an 8-bit RGBA PNG.
///
/// The buffer bytes are straight-alpha already and are written unchanged, so
/// decoding the result yields the exact same pixels. Zero-sized buffers have
/// no PNG representation and fail with a PNG error.
pub fn encode_png<'a>(buffer: impl Into<PixelView<'a>>) -> ImageDiffResult<Vec<u8>> {
    let buffer = buffer.into();
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(buffer.data())?;
    }
    Ok(buf)
}

/// Encode `buffer` and write it to `path`.
pub fn write_png<'a>(
    buffer: impl Into<PixelView<'a>>,
    path: impl AsRef<Path>,
) -> ImageDiffResult<()> {
    let buffer = buffer.into();
    let path = path.as_ref();
    let png = encode_png(buffer)?;
    log::debug!(
        target: "imagediff",
        "writing {}x{} PNG ({} bytes) to {}",
        buffer.width(),
        buffer.height(),
        png.len(),
        path.display()
    );
    fs::write(path, png)?;
    Ok(())
}
