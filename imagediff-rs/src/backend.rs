//! Rasterization backend used to turn decoded images and surfaces into pixels.

use crate::error::ImageDiffResult;
use crate::pixel_buffer::PixelBuffer;
use imagediff_canvas::{Canvas, Canvas2dContext, DecodedImage};

/// The four raster operations normalization relies on.
///
/// Implementations must not keep state between calls; every call works on
/// surfaces it allocates itself.
pub trait RasterBackend {
    /// Rasterize a decoded image at its natural size into a fresh buffer.
    ///
    /// The result must hold the image's straight-alpha pixels exactly.
    fn rasterize_image(&self, image: &DecodedImage) -> ImageDiffResult<PixelBuffer>;

    /// Create an empty, fully transparent surface.
    fn create_surface(&self, width: u32, height: u32) -> ImageDiffResult<Canvas>;

    /// Read back the full extent of a context's backing surface.
    fn read_back(&self, context: &Canvas2dContext) -> PixelBuffer;

    /// Put a buffer's pixels onto a new surface of the same size.
    fn to_surface(&self, buffer: &PixelBuffer) -> ImageDiffResult<Canvas> {
        let mut canvas = self.create_surface(buffer.width(), buffer.height())?;
        canvas.get_context_mut().put_image_data(
            buffer.data(),
            buffer.width(),
            buffer.height(),
            0,
            0,
        )?;
        Ok(canvas)
    }
}

/// Backend built on the `imagediff-canvas` tiny-skia surface.
///
/// Each conversion draws onto its own surface; there is no shared scratch canvas.
/// Decoded images skip the surface entirely, since its premultiplied storage
/// would round the color of semi-transparent pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasBackend;

impl RasterBackend for CanvasBackend {
    fn rasterize_image(&self, image: &DecodedImage) -> ImageDiffResult<PixelBuffer> {
        let (width, height) = (image.width(), image.height());
        log::debug!(target: "imagediff", "copying {}x{} decoded image", width, height);
        Ok(PixelBuffer::from_canonical(
            width,
            height,
            image.data().to_vec(),
        ))
    }

    fn create_surface(&self, width: u32, height: u32) -> ImageDiffResult<Canvas> {
        log::debug!(target: "imagediff", "creating {}x{} surface", width, height);
        Ok(Canvas::new(width, height)?)
    }

    fn read_back(&self, context: &Canvas2dContext) -> PixelBuffer {
        let (width, height) = (context.width(), context.height());
        PixelBuffer::from_canonical(width, height, context.get_image_data(0, 0, width, height))
    }
}
