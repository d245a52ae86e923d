//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::MAX_DIMENSION;
use tiny_skia::Pixmap;

/// Canvas 2D rendering context.
///
/// The backing pixmap stores premultiplied RGBA; every public read or write of
/// pixel data converts to or from straight alpha.
#[derive(Debug)]
pub struct Canvas2dContext {
    /// Width of the surface in pixels.
    pub(crate) width: u32,
    /// Height of the surface in pixels.
    pub(crate) height: u32,
    /// Pixel buffer.
    pub(crate) pixmap: Pixmap,
    /// Current drawing state.
    pub(crate) state: DrawingState,
}

impl Canvas2dContext {
    /// Create a new, fully transparent context with the specified dimensions.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;

        log::debug!(target: "canvas", "new context {}x{}", width, height);
        Ok(Self {
            width,
            height,
            pixmap,
            state: DrawingState::default(),
        })
    }

    /// Get surface width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get surface height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        self.state.fill_style = parse_color(style)?;
        Ok(())
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
pub(crate) fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    Ok(tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK))
}
