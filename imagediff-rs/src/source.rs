//! Supported source image representations and the shape predicates over them.

use crate::backend::RasterBackend;
use crate::error::{ImageDiffError, ImageDiffResult};
use crate::pixel_buffer::{byte_len, PixelBuffer, PixelView};
use imagediff_canvas::{Canvas, Canvas2dContext, DecodedImage};

/// Raw RGBA pixels handed in by a caller, not yet validated.
///
/// The bytes may belong to a mutable surface the caller keeps drawing on, so
/// normalization never retains them: it either copies or only borrows them for
/// the duration of a call.
#[derive(Debug, Clone, Copy)]
pub struct RawPixels<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl<'a> RawPixels<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// True when the bytes form a canonical `width` x `height` RGBA raster.
    ///
    /// Dimensions whose byte length overflows `usize` are never canonical.
    pub fn is_canonical(&self) -> bool {
        byte_len(self.width, self.height) == Some(self.data.len())
    }
}

/// Every representation that can be normalized into a [`PixelBuffer`].
///
/// The set is closed: supporting another representation means adding a
/// variant here and a [`ReadPixels`] implementation for it.
#[derive(Clone, Copy)]
pub enum SourceImage<'a> {
    /// A decoded image handle, rasterized at its natural size.
    Image(&'a DecodedImage),
    /// An offscreen raster surface.
    Canvas(&'a Canvas),
    /// A raster drawing context; its whole backing surface is read.
    Context(&'a Canvas2dContext),
    /// Raw RGBA pixels.
    ImageData(RawPixels<'a>),
}

impl SourceImage<'_> {
    /// Short name of the representation, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceImage::Image(_) => "image",
            SourceImage::Canvas(_) => "canvas",
            SourceImage::Context(_) => "context",
            SourceImage::ImageData(_) => "image data",
        }
    }

    /// Width and height of the pixels this source normalizes to.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SourceImage::Image(image) => (image.width(), image.height()),
            SourceImage::Canvas(canvas) => (canvas.width(), canvas.height()),
            SourceImage::Context(ctx) => (ctx.width(), ctx.height()),
            SourceImage::ImageData(raw) => (raw.width, raw.height),
        }
    }

    /// Read pixels through the capability of the wrapped representation.
    pub fn read_pixels(&self, backend: &dyn RasterBackend) -> ImageDiffResult<PixelBuffer> {
        match self {
            SourceImage::Image(image) => image.read_pixels(backend),
            SourceImage::Canvas(canvas) => canvas.read_pixels(backend),
            SourceImage::Context(ctx) => ctx.read_pixels(backend),
            SourceImage::ImageData(raw) => raw.read_pixels(backend),
        }
    }
}

impl std::fmt::Debug for SourceImage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "{} {}x{}", self.kind(), width, height)
    }
}

impl<'a> From<&'a DecodedImage> for SourceImage<'a> {
    fn from(image: &'a DecodedImage) -> Self {
        SourceImage::Image(image)
    }
}

impl<'a> From<&'a Canvas> for SourceImage<'a> {
    fn from(canvas: &'a Canvas) -> Self {
        SourceImage::Canvas(canvas)
    }
}

impl<'a> From<&'a Canvas2dContext> for SourceImage<'a> {
    fn from(ctx: &'a Canvas2dContext) -> Self {
        SourceImage::Context(ctx)
    }
}

impl<'a> From<RawPixels<'a>> for SourceImage<'a> {
    fn from(raw: RawPixels<'a>) -> Self {
        SourceImage::ImageData(raw)
    }
}

impl<'a> From<&'a PixelBuffer> for SourceImage<'a> {
    fn from(buffer: &'a PixelBuffer) -> Self {
        SourceImage::ImageData(RawPixels::new(
            buffer.width(),
            buffer.height(),
            buffer.data(),
        ))
    }
}

impl<'a> From<&'a SourceImage<'a>> for SourceImage<'a> {
    fn from(source: &'a SourceImage<'a>) -> Self {
        *source
    }
}

/// Capability shared by every source representation: produce a fresh
/// canonical buffer of its pixels.
pub trait ReadPixels {
    fn read_pixels(&self, backend: &dyn RasterBackend) -> ImageDiffResult<PixelBuffer>;
}

impl ReadPixels for DecodedImage {
    fn read_pixels(&self, backend: &dyn RasterBackend) -> ImageDiffResult<PixelBuffer> {
        backend.rasterize_image(self)
    }
}

impl ReadPixels for Canvas {
    fn read_pixels(&self, backend: &dyn RasterBackend) -> ImageDiffResult<PixelBuffer> {
        Ok(backend.read_back(self.get_context()))
    }
}

impl ReadPixels for Canvas2dContext {
    fn read_pixels(&self, backend: &dyn RasterBackend) -> ImageDiffResult<PixelBuffer> {
        Ok(backend.read_back(self))
    }
}

impl ReadPixels for RawPixels<'_> {
    fn read_pixels(&self, _backend: &dyn RasterBackend) -> ImageDiffResult<PixelBuffer> {
        let view = PixelView::try_new(self.width, self.height, self.data)
            .map_err(|_| ImageDiffError::UnsupportedType)?;
        Ok(view.to_buffer())
    }
}

// --- Shape predicates ---

pub fn is_image(source: &SourceImage<'_>) -> bool {
    matches!(source, SourceImage::Image(_))
}

pub fn is_canvas(source: &SourceImage<'_>) -> bool {
    matches!(source, SourceImage::Canvas(_))
}

pub fn is_context(source: &SourceImage<'_>) -> bool {
    matches!(source, SourceImage::Context(_))
}

/// Raw pixels count as image data only when their length matches their dimensions.
pub fn is_image_data(source: &SourceImage<'_>) -> bool {
    matches!(source, SourceImage::ImageData(raw) if raw.is_canonical())
}

/// True when `source` can be normalized.
pub fn is_image_type(source: &SourceImage<'_>) -> bool {
    is_image(source) || is_canvas(source) || is_context(source) || is_image_data(source)
}

/// Fail with [`ImageDiffError::UnsupportedType`] unless every source is an image type.
pub fn check_type(sources: &[&SourceImage<'_>]) -> ImageDiffResult<()> {
    for source in sources {
        if !is_image_type(source) {
            log::warn!(target: "imagediff", "rejected {:?}: not an image", source);
            return Err(ImageDiffError::UnsupportedType);
        }
    }
    Ok(())
}
