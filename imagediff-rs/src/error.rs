use imagediff_canvas::Canvas2dError;
use thiserror::Error;

/// Result type alias using ImageDiffError.
pub type ImageDiffResult<T> = Result<T, ImageDiffError>;

#[derive(Debug, Error)]
pub enum ImageDiffError {
    /// The input does not match any recognized image representation.
    #[error("ImageTypeError: Submitted object was not an image.")]
    UnsupportedType,

    /// Pixel data whose length disagrees with its dimensions.
    #[error("Malformed pixel buffer: {actual} bytes do not hold {width}x{height} RGBA pixels")]
    MalformedBuffer {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("Invalid alignment `{0}` (expected `center` or `top`)")]
    InvalidAlign(String),

    #[error(transparent)]
    Canvas(#[from] Canvas2dError),

    #[error("PNG encoding error: {0}")]
    PngError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for ImageDiffError {
    fn from(err: png::EncodingError) -> Self {
        ImageDiffError::PngError(err.to_string())
    }
}
