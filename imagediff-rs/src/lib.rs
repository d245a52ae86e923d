//! Pixel-level image comparison and visual diffing.
//!
//! Every supported representation (decoded images, canvases, drawing
//! contexts, raw RGBA pixels) is first normalized into a canonical
//! straight-alpha [`PixelBuffer`]. Buffers are then compared with a
//! per-channel tolerance and a budget of allowed deviations, or diffed into a
//! new buffer that visualizes where they differ.
//!
//! ```
//! use imagediff_rs::{diff_images, equal_images, CompareOptions, DiffOptions, PixelBuffer};
//!
//! let red = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);
//! let blue = PixelBuffer::filled(1, 1, [0, 0, 255, 255]);
//!
//! assert!(!equal_images(&red, &blue, &CompareOptions::default()).unwrap());
//! let diff = diff_images(&red, &blue, &DiffOptions::default()).unwrap();
//! assert_eq!(diff.data(), &[255, 0, 255, 255]);
//! ```

pub mod backend;
pub mod compare;
pub mod diff;
pub mod error;
pub mod matchers;
pub mod normalize;
pub mod output;
pub mod pixel_buffer;
pub mod report;
pub mod source;

pub use backend::{CanvasBackend, RasterBackend};
pub use compare::{
    count_deviations, equal, equal_dimensions, equal_height, equal_width, CompareOptions,
};
pub use diff::{diff, diff_equal, diff_unequal, Align, DiffOptions};
pub use error::{ImageDiffError, ImageDiffResult};
pub use matchers::{to_be_image_data, to_image_diff_equal, MatchResult};
pub use normalize::Normalizer;
pub use output::{encode_png, write_png};
pub use pixel_buffer::{PixelBuffer, PixelView};
pub use report::{ReportFormat, ReportFormatter};
pub use source::{
    check_type, is_canvas, is_context, is_image, is_image_data, is_image_type, RawPixels,
    ReadPixels, SourceImage,
};

// Re-export the raster surface so callers can build sources without a second dependency
pub use imagediff_canvas;
use imagediff_canvas::{Canvas, DecodedImage};
use std::path::Path;

/// Normalize any supported source into a freshly allocated buffer.
pub fn to_pixel_buffer<'a>(source: impl Into<SourceImage<'a>>) -> ImageDiffResult<PixelBuffer> {
    Normalizer::new().normalize(&source.into())
}

/// Zero-initialized `width` x `height` buffer.
pub fn create_pixel_buffer(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::new(width, height)
}

/// Normalize both sources and compare them.
///
/// Fails with [`ImageDiffError::UnsupportedType`] if either is not an image.
pub fn equal_images<'a, 'b>(
    a: impl Into<SourceImage<'a>>,
    b: impl Into<SourceImage<'b>>,
    opts: &CompareOptions,
) -> ImageDiffResult<bool> {
    let (a, b) = (a.into(), b.into());
    check_type(&[&a, &b])?;

    let normalizer = Normalizer::new();
    let a = normalizer.normalize_borrowed(&a)?;
    let b = normalizer.normalize_borrowed(&b)?;
    let equal = compare::equal(a.view(), b.view(), opts);
    log::debug!(target: "imagediff", "images equal: {}", equal);
    Ok(equal)
}

/// Normalize both sources and build their visual difference.
pub fn diff_images<'a, 'b>(
    a: impl Into<SourceImage<'a>>,
    b: impl Into<SourceImage<'b>>,
    opts: &DiffOptions,
) -> ImageDiffResult<PixelBuffer> {
    let (a, b) = (a.into(), b.into());
    check_type(&[&a, &b])?;

    let normalizer = Normalizer::new();
    let a = normalizer.normalize_borrowed(&a)?;
    let b = normalizer.normalize_borrowed(&b)?;
    Ok(diff::diff(a.view(), b.view(), opts))
}

/// Normalize `source` and put its pixels onto a new canvas of the same size.
pub fn to_canvas<'a>(source: impl Into<SourceImage<'a>>) -> ImageDiffResult<Canvas> {
    Normalizer::new().to_canvas(&source.into())
}

/// Decode an image file (PNG, JPEG) into a handle that can be normalized.
pub fn decode_image_file(path: impl AsRef<Path>) -> ImageDiffResult<DecodedImage> {
    Ok(DecodedImage::open(path)?)
}
