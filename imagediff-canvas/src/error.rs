//! Error types for imagediff-canvas.

use thiserror::Error;

/// Result type alias using Canvas2dError.
pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

/// Errors that can occur while creating, drawing to, or exporting a surface.
#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Invalid surface dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngError(String),

    /// The encoded bytes could not be decoded into an image.
    #[error("Failed to decode image: {0}")]
    ImageDecodeError(String),

    /// RGBA data does not hold exactly `width * height * 4` bytes.
    #[error("Pixel data length {actual} does not match {width}x{height} RGBA")]
    DataLengthMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

impl From<png::EncodingError> for Canvas2dError {
    fn from(err: png::EncodingError) -> Self {
        Canvas2dError::PngError(err.to_string())
    }
}

impl From<::image::ImageError> for Canvas2dError {
    fn from(err: ::image::ImageError) -> Self {
        Canvas2dError::ImageDecodeError(err.to_string())
    }
}
