//! Dimension predicates and tolerance-bounded pixel equality.

use crate::pixel_buffer::PixelView;
use serde::{Deserialize, Serialize};

/// Options for [`equal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Largest per-channel absolute difference still treated as equal.
    pub tolerance: u32,
    /// Number of channel values allowed to exceed `tolerance`.
    ///
    /// Every channel counts on its own, so one fully different pixel uses up
    /// to four of these.
    pub max_deviating_pixels: u64,
}

impl CompareOptions {
    pub fn new(tolerance: u32, max_deviating_pixels: u64) -> Self {
        Self {
            tolerance,
            max_deviating_pixels,
        }
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_deviating_pixels(mut self, max_deviating_pixels: u64) -> Self {
        self.max_deviating_pixels = max_deviating_pixels;
        self
    }
}

pub fn equal_width<'a, 'b>(a: impl Into<PixelView<'a>>, b: impl Into<PixelView<'b>>) -> bool {
    a.into().width() == b.into().width()
}

pub fn equal_height<'a, 'b>(a: impl Into<PixelView<'a>>, b: impl Into<PixelView<'b>>) -> bool {
    a.into().height() == b.into().height()
}

pub fn equal_dimensions<'a, 'b>(
    a: impl Into<PixelView<'a>>,
    b: impl Into<PixelView<'b>>,
) -> bool {
    let (a, b) = (a.into(), b.into());
    equal_height(a, b) && equal_width(a, b)
}

/// Compare two buffers channel by channel.
///
/// Buffers of different dimensions are never equal. Otherwise every channel
/// value whose absolute difference exceeds `opts.tolerance` counts as one
/// deviation, and the buffers are equal while the count stays at or below
/// `opts.max_deviating_pixels`. The scan stops at the first deviation over
/// the limit.
pub fn equal<'a, 'b>(
    a: impl Into<PixelView<'a>>,
    b: impl Into<PixelView<'b>>,
    opts: &CompareOptions,
) -> bool {
    let (a, b) = (a.into(), b.into());
    if !equal_dimensions(a, b) {
        log::debug!(
            target: "imagediff",
            "dimensions differ: {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        );
        return false;
    }

    let mut count: u64 = 0;
    for (&x, &y) in a.data().iter().zip(b.data()) {
        if exceeds(x, y, opts.tolerance) {
            count += 1;
            if count > opts.max_deviating_pixels {
                return false;
            }
        }
    }
    true
}

/// Count every channel value differing by more than `tolerance`.
///
/// Returns `None` when the dimensions differ.
pub fn count_deviations<'a, 'b>(
    a: impl Into<PixelView<'a>>,
    b: impl Into<PixelView<'b>>,
    tolerance: u32,
) -> Option<usize> {
    let (a, b) = (a.into(), b.into());
    if !equal_dimensions(a, b) {
        return None;
    }
    Some(
        a.data()
            .iter()
            .zip(b.data())
            .filter(|&(&x, &y)| exceeds(x, y, tolerance))
            .count(),
    )
}

#[inline]
fn exceeds(x: u8, y: u8, tolerance: u32) -> bool {
    x != y && u32::from(x.abs_diff(y)) > tolerance
}
