//! Pure Rust raster surface used by `imagediff-rs` as its rasterization backend.
//!
//! This crate provides the small subset of the Canvas 2D API that image
//! comparison needs, without a browser or JavaScript runtime:
//! - [`DecodedImage`]: a decoded image handle (PNG, JPEG) with natural dimensions
//! - [`Canvas`]: an offscreen raster surface owning its drawing context
//! - [`Canvas2dContext`]: drawing context backed by a `tiny-skia` pixmap
//!
//! Pixel data crossing the public API is always straight (non-premultiplied)
//! RGBA, 4 bytes per pixel, row-major with no padding.
//!
//! # Example
//!
//! ```rust,ignore
//! use imagediff_canvas::{Canvas, RectParams};
//!
//! let mut canvas = Canvas::new(40, 30)?;
//! let ctx = canvas.get_context_mut();
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_rect(&RectParams { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
//! let rgba = ctx.get_image_data(0, 0, 40, 30);
//! ```

mod canvas;
mod context;
mod decoded;
mod drawing_state;
mod error;
mod geometry;

pub use canvas::Canvas;
pub use context::Canvas2dContext;
pub use decoded::DecodedImage;
pub use error::{Canvas2dError, Canvas2dResult};
pub use geometry::RectParams;

/// Maximum surface dimension (same as Chrome).
pub const MAX_DIMENSION: u32 = 32767;
