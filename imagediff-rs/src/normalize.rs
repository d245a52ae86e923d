//! Coercion of every supported source representation into a [`PixelBuffer`].

use crate::backend::{CanvasBackend, RasterBackend};
use crate::error::{ImageDiffError, ImageDiffResult};
use crate::pixel_buffer::{PixelBuffer, PixelView};
use crate::source::{check_type, SourceImage};
use imagediff_canvas::Canvas;

/// Converts [`SourceImage`]s into canonical pixel buffers using an injected
/// rasterization backend.
#[derive(Debug, Clone, Default)]
pub struct Normalizer<B = CanvasBackend> {
    backend: B,
}

impl Normalizer<CanvasBackend> {
    /// Normalizer using the tiny-skia canvas backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: RasterBackend> Normalizer<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Produce a freshly allocated buffer holding the pixels of `source`.
    ///
    /// Raw pixel data is always deep-copied, never aliased, so the caller may
    /// keep mutating its own bytes afterwards.
    pub fn normalize(&self, source: &SourceImage<'_>) -> ImageDiffResult<PixelBuffer> {
        check_type(&[source])?;
        log::debug!(target: "imagediff", "normalizing {:?}", source);
        source.read_pixels(&self.backend)
    }

    /// Like [`Normalizer::normalize`], but borrows raw pixel data instead of
    /// copying it. Used when the pixels are only read for one call.
    pub(crate) fn normalize_borrowed<'s>(
        &self,
        source: &SourceImage<'s>,
    ) -> ImageDiffResult<Normalized<'s>> {
        match source {
            SourceImage::ImageData(raw) => PixelView::try_new(raw.width, raw.height, raw.data)
                .map(Normalized::Borrowed)
                .map_err(|_| ImageDiffError::UnsupportedType),
            _ => self.normalize(source).map(Normalized::Owned),
        }
    }

    /// Normalize `source`, then put its pixels onto a new surface.
    pub fn to_canvas(&self, source: &SourceImage<'_>) -> ImageDiffResult<Canvas> {
        let buffer = self.normalize(source)?;
        self.backend.to_surface(&buffer)
    }
}

/// Pixels that are either borrowed from the caller or freshly read back.
pub(crate) enum Normalized<'a> {
    Borrowed(PixelView<'a>),
    Owned(PixelBuffer),
}

impl Normalized<'_> {
    pub(crate) fn view(&self) -> PixelView<'_> {
        match self {
            Normalized::Borrowed(view) => *view,
            Normalized::Owned(buffer) => buffer.view(),
        }
    }
}
