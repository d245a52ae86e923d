//! Canonical RGBA pixel buffers.

use crate::error::{ImageDiffError, ImageDiffResult};

/// Number of channels per pixel (red, green, blue, alpha).
pub const CHANNELS: usize = 4;

/// Number of bytes required for a `width` x `height` RGBA raster, or `None`
/// when that does not fit in `usize`.
pub fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

/// Canonical in-memory raster: interleaved straight-alpha RGBA bytes, row-major,
/// no padding between rows.
///
/// `data().len() == width * height * 4` holds for every value of this type;
/// constructors that take external data validate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-initialized (transparent black) buffer.
    ///
    /// # Panics
    /// Panics if `width * height * 4` bytes cannot be allocated.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; byte_len(width, height).unwrap_or(usize::MAX)],
        }
    }

    /// Create a buffer with every pixel set to `rgba`.
    ///
    /// # Panics
    /// Panics if `width * height * 4` bytes cannot be allocated.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .unwrap_or(usize::MAX);
        let data = rgba.repeat(pixels);
        Self {
            width,
            height,
            data,
        }
    }

    /// Take ownership of raw RGBA bytes, rejecting data of the wrong length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ImageDiffResult<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap bytes already known to be `width * height * 4` long.
    pub(crate) fn from_canonical(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(Some(data.len()), byte_len(width, height));
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// True when the buffer holds no pixels (zero width or height).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// RGBA value of the pixel at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.view().pixel(x, y)
    }

    /// Borrow this buffer as a [`PixelView`].
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// A borrowed, validated view of canonical RGBA pixels.
///
/// Comparison and diffing read through views so that callers' buffers can be
/// inspected without copying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelView<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelView<'a> {
    /// Validate external bytes as a `width` x `height` RGBA raster.
    pub fn try_new(width: u32, height: u32, data: &'a [u8]) -> ImageDiffResult<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.data[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Deep copy into a freshly allocated buffer.
    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer::from_canonical(self.width, self.height, self.data.to_vec())
    }
}

impl<'a> From<&'a PixelBuffer> for PixelView<'a> {
    fn from(buffer: &'a PixelBuffer) -> Self {
        buffer.view()
    }
}

fn check_len(width: u32, height: u32, actual: usize) -> ImageDiffResult<()> {
    if byte_len(width, height) != Some(actual) {
        return Err(ImageDiffError::MalformedBuffer {
            width,
            height,
            actual,
        });
    }
    Ok(())
}
