//! Assertion helpers for test suites.

use crate::compare::{equal, CompareOptions};
use crate::error::ImageDiffResult;
use crate::normalize::Normalizer;
use crate::report::{ReportFormatter, EXPECTED_NOT_EQUAL};
use crate::source::{check_type, is_image_data, SourceImage};

/// Outcome of a matcher, with the message to show when the expectation fails.
///
/// For a passing match the message is the one a negated expectation reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub pass: bool,
    pub message: String,
}

pub fn to_be_image_data<'a>(source: impl Into<SourceImage<'a>>) -> MatchResult {
    let pass = is_image_data(&source.into());
    MatchResult {
        pass,
        message: if pass { "Is ImageData" } else { "Is not ImageData" }.to_string(),
    }
}

/// Compare `actual` with `expected`; on mismatch the message is the text report.
pub fn to_image_diff_equal<'a, 'b>(
    actual: impl Into<SourceImage<'a>>,
    expected: impl Into<SourceImage<'b>>,
    tolerance: u32,
    max_deviating_pixels: u64,
) -> ImageDiffResult<MatchResult> {
    let (actual, expected) = (actual.into(), expected.into());
    check_type(&[&actual, &expected])?;

    let normalizer = Normalizer::new();
    let actual = normalizer.normalize_borrowed(&actual)?;
    let expected = normalizer.normalize_borrowed(&expected)?;
    let opts = CompareOptions::new(tolerance, max_deviating_pixels);

    if equal(actual.view(), expected.view(), &opts) {
        return Ok(MatchResult {
            pass: true,
            message: EXPECTED_NOT_EQUAL.to_string(),
        });
    }
    let message = ReportFormatter::default()
        .with_compare_options(opts)
        .format_failure(actual.view(), expected.view())?;
    Ok(MatchResult {
        pass: false,
        message,
    })
}

/// Assert that two images are equal within a tolerance.
///
/// Takes anything convertible into a [`SourceImage`](crate::SourceImage),
/// plus an optional per-channel tolerance and an optional number of allowed
/// deviating channel values (both default to 0). Panics with the text report
/// when the images differ, or with the error when an input is not an image.
///
/// ```
/// use imagediff_rs::{assert_image_diff_eq, PixelBuffer};
///
/// let a = PixelBuffer::filled(2, 2, [10, 20, 30, 255]);
/// let b = PixelBuffer::filled(2, 2, [11, 20, 30, 255]);
/// assert_image_diff_eq!(&a, &b, 1);
/// assert_image_diff_eq!(&a, &b, 0, 4);
/// ```
#[macro_export]
macro_rules! assert_image_diff_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::assert_image_diff_eq!($actual, $expected, 0, 0)
    };
    ($actual:expr, $expected:expr, $tolerance:expr $(,)?) => {
        $crate::assert_image_diff_eq!($actual, $expected, $tolerance, 0)
    };
    ($actual:expr, $expected:expr, $tolerance:expr, $max_deviating:expr $(,)?) => {
        match $crate::to_image_diff_equal($actual, $expected, $tolerance, $max_deviating) {
            Ok(result) => {
                if !result.pass {
                    panic!("{}", result.message);
                }
            }
            Err(err) => panic!("{}", err),
        }
    };
}
