//! Decoded image handles.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::rgba_len;
use std::path::Path;

/// A decoded raster image with its natural dimensions.
///
/// Pixels are stored as straight-alpha RGBA. Decoding is handled by the
/// `image` crate, so any format it was built with (PNG, JPEG) is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DecodedImage {
    /// Decode encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Canvas2dResult<Self> {
        let img = ::image::load_from_memory(bytes)?;
        let width = img.width();
        let height = img.height();
        let data = img.to_rgba8().into_raw();
        log::debug!(target: "canvas", "decoded image {}x{}", width, height);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Read and decode an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> Canvas2dResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Canvas2dError::ImageDecodeError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Wrap already-decoded straight-alpha RGBA pixels.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Canvas2dResult<Self> {
        if rgba_len(width, height) != Some(data.len()) {
            return Err(Canvas2dError::DataLengthMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Natural width of the image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height of the image.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha RGBA pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
