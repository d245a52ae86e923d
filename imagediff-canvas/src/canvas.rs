//! Offscreen raster surface.

use crate::context::Canvas2dContext;
use crate::error::Canvas2dResult;

/// An offscreen raster surface that owns its 2D drawing context.
///
/// Mirrors the HTML canvas element: dimensions live on the surface and all
/// drawing goes through the context obtained from [`Canvas::get_context`].
#[derive(Debug)]
pub struct Canvas {
    context: Canvas2dContext,
}

impl Canvas {
    /// Create a transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Ok(Self {
            context: Canvas2dContext::new(width, height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.context.width()
    }

    pub fn height(&self) -> u32 {
        self.context.height()
    }

    /// The surface's 2D drawing context.
    pub fn get_context(&self) -> &Canvas2dContext {
        &self.context
    }

    /// Mutable access to the surface's 2D drawing context.
    pub fn get_context_mut(&mut self) -> &mut Canvas2dContext {
        &mut self.context
    }

    /// Export the surface as PNG data.
    pub fn to_png(&self) -> Canvas2dResult<Vec<u8>> {
        self.context.to_png()
    }
}
