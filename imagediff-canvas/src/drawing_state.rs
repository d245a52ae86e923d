//! Drawing state applied to fill operations.

/// Drawing state of a [`Canvas2dContext`](crate::Canvas2dContext).
#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    /// Current fill color.
    pub(crate) fill_style: tiny_skia::Color,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: tiny_skia::Color::BLACK,
        }
    }
}
