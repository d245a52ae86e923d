//! Visual difference of two pixel buffers.
//!
//! Equal-sized buffers are subtracted channel by channel. Differently sized
//! buffers are composited onto a shared canvas: the first is copied in, the
//! second is subtracted from whatever the first left behind, so only the
//! overlap shows a difference and the rest shows raw source pixels.

use crate::compare::equal_dimensions;
use crate::error::ImageDiffError;
use crate::pixel_buffer::{PixelBuffer, PixelView, CHANNELS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placement of each buffer on the shared canvas when dimensions differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    /// Center each buffer, rounding offsets down.
    #[default]
    Center,
    /// Place each buffer at the top-left corner.
    #[serde(alias = "top", alias = "top_left")]
    TopLeft,
}

impl FromStr for Align {
    type Err = ImageDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Align::Center),
            "top" | "top-left" | "top_left" => Ok(Align::TopLeft),
            _ => Err(ImageDiffError::InvalidAlign(s.to_string())),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Align::Center => write!(f, "center"),
            Align::TopLeft => write!(f, "top-left"),
        }
    }
}

/// Options for [`diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    pub align: Align,
}

impl DiffOptions {
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Build a buffer visualizing the difference between `a` and `b`.
pub fn diff<'a, 'b>(
    a: impl Into<PixelView<'a>>,
    b: impl Into<PixelView<'b>>,
    opts: &DiffOptions,
) -> PixelBuffer {
    let (a, b) = (a.into(), b.into());
    if equal_dimensions(a, b) {
        diff_equal(a, b)
    } else {
        diff_unequal(a, b, opts)
    }
}

/// Subtract two equally sized buffers.
///
/// Color channels become `|a - b|`. Alpha becomes `|255 - (a + b)|`, so two
/// opaque or two transparent pixels yield 255 and an opaque/transparent pair
/// yields 0.
///
/// # Panics
/// Panics if the dimensions differ.
pub fn diff_equal<'a, 'b>(a: impl Into<PixelView<'a>>, b: impl Into<PixelView<'b>>) -> PixelBuffer {
    let (a, b) = (a.into(), b.into());
    assert!(
        equal_dimensions(a, b),
        "diff_equal requires equal dimensions, got {}x{} and {}x{}",
        a.width(),
        a.height(),
        b.width(),
        b.height()
    );
    log::debug!(target: "imagediff", "diffing equal {}x{}", a.width(), a.height());

    let mut out = PixelBuffer::new(a.width(), a.height());
    let pixels = out
        .data_mut()
        .chunks_exact_mut(CHANNELS)
        .zip(a.data().chunks_exact(CHANNELS))
        .zip(b.data().chunks_exact(CHANNELS));
    for ((c, pa), pb) in pixels {
        c[0] = pa[0].abs_diff(pb[0]);
        c[1] = pa[1].abs_diff(pb[1]);
        c[2] = pa[2].abs_diff(pb[2]);
        c[3] = (255 - (i32::from(pa[3]) + i32::from(pb[3]))).unsigned_abs() as u8;
    }
    out
}

/// Composite two buffers of any size onto a canvas of the larger extent.
///
/// The canvas starts as opaque black. `a` is copied in at its offset, then
/// every channel covered by `b` is replaced by `|canvas - b|`.
pub fn diff_unequal<'a, 'b>(
    a: impl Into<PixelView<'a>>,
    b: impl Into<PixelView<'b>>,
    opts: &DiffOptions,
) -> PixelBuffer {
    let (a, b) = (a.into(), b.into());
    let width = a.width().max(b.width());
    let height = a.height().max(b.height());
    log::debug!(
        target: "imagediff",
        "diffing {}x{} against {}x{} on {}x{} canvas ({})",
        a.width(),
        a.height(),
        b.width(),
        b.height(),
        width,
        height,
        opts.align
    );

    let mut out = PixelBuffer::filled(width, height, [0, 0, 0, 255]);
    let row_stride = width as usize * CHANNELS;

    // Add first image
    let (a_col, a_row) = offsets(width, height, a, opts.align);
    let a_stride = a.width() as usize * CHANNELS;
    for (row, src) in a.data().chunks_exact(a_stride.max(1)).enumerate() {
        let start = (a_row + row) * row_stride + a_col * CHANNELS;
        out.data_mut()[start..start + a_stride].copy_from_slice(src);
    }

    // Subtract second image
    let (b_col, b_row) = offsets(width, height, b, opts.align);
    let b_stride = b.width() as usize * CHANNELS;
    for (row, src) in b.data().chunks_exact(b_stride.max(1)).enumerate() {
        let start = (b_row + row) * row_stride + b_col * CHANNELS;
        let dst = &mut out.data_mut()[start..start + b_stride];
        for (c, &v) in dst.iter_mut().zip(src) {
            *c = c.abs_diff(v);
        }
    }

    out
}

/// Column and row offset of `image` on a `width` x `height` canvas.
///
/// The canvas is at least as large as the image in both directions.
fn offsets(width: u32, height: u32, image: PixelView<'_>, align: Align) -> (usize, usize) {
    match align {
        Align::TopLeft => (0, 0),
        Align::Center => (
            ((width - image.width()) / 2) as usize,
            ((height - image.height()) / 2) as usize,
        ),
    }
}
