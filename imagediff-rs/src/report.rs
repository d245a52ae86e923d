//! Human-readable reports for failed image equality assertions.

use crate::compare::{count_deviations, CompareOptions};
use crate::diff::{diff, DiffOptions};
use crate::error::ImageDiffResult;
use crate::output::encode_png;
use crate::pixel_buffer::PixelView;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// Message for an equality assertion that failed.
pub const EXPECTED_EQUAL: &str = "Expected to be equal.";
/// Message for a negated equality assertion that failed.
pub const EXPECTED_NOT_EQUAL: &str = "Expected not to be equal.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "html" => Ok(ReportFormat::Html),
            other => Err(format!("unknown report format `{other}` (expected `text` or `html`)")),
        }
    }
}

/// Renders the failure report of an `actual` vs `expected` comparison.
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    format: ReportFormat,
    compare: CompareOptions,
    diff: DiffOptions,
}

impl ReportFormatter {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Options whose tolerance is used for the deviation summary.
    pub fn with_compare_options(mut self, compare: CompareOptions) -> Self {
        self.compare = compare;
        self
    }

    pub fn with_diff_options(mut self, diff: DiffOptions) -> Self {
        self.diff = diff;
        self
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn format_failure<'a, 'b>(
        &self,
        actual: impl Into<PixelView<'a>>,
        expected: impl Into<PixelView<'b>>,
    ) -> ImageDiffResult<String> {
        let (actual, expected) = (actual.into(), expected.into());
        match self.format {
            ReportFormat::Text => Ok(self.text_report(actual, expected)),
            ReportFormat::Html => self.html_report(actual, expected),
        }
    }

    /// Report for a negated assertion whose images turned out equal.
    pub fn format_unexpected_pass(&self) -> String {
        EXPECTED_NOT_EQUAL.to_string()
    }

    fn text_report(&self, actual: PixelView<'_>, expected: PixelView<'_>) -> String {
        let mut out = String::from(EXPECTED_EQUAL);
        let _ = write!(
            out,
            "\nactual {}x{}, expected {}x{}: ",
            actual.width(),
            actual.height(),
            expected.width(),
            expected.height()
        );
        match count_deviations(actual, expected, self.compare.tolerance) {
            Some(n) => {
                let _ = write!(
                    out,
                    "{} channel values differ by more than {} (allowed {})",
                    n, self.compare.tolerance, self.compare.max_deviating_pixels
                );
            }
            None => out.push_str("dimensions differ"),
        }
        out
    }

    fn html_report(&self, actual: PixelView<'_>, expected: PixelView<'_>) -> ImageDiffResult<String> {
        let diffed = diff(actual, expected, &self.diff);

        let mut html = format!("<span>{EXPECTED_EQUAL}</span>");
        html.push_str(r#"<div class="clearfix"></div>"#);
        for (label, view) in [
            ("Actual:", actual),
            ("Expected:", expected),
            ("Diff:", diffed.view()),
        ] {
            let _ = write!(
                html,
                r#"<div style="float: left;"><div>{}</div><img src="{}"></div>"#,
                label,
                data_uri(view)?
            );
        }
        html.push_str(r#"<div class="clearfix"></div>"#);
        Ok(html)
    }
}

/// `data:` URI of a PNG rendering of `view`. Empty buffers become `data:,`.
fn data_uri(view: PixelView<'_>) -> ImageDiffResult<String> {
    if view.data().is_empty() {
        return Ok("data:,".to_string());
    }
    let png = encode_png(view)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::prelude::BASE64_STANDARD.encode(png)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_buffer::PixelBuffer;
    use imagediff_canvas::DecodedImage;

    #[test]
    fn test_text_report() {
        let a = PixelBuffer::filled(2, 1, [10, 10, 10, 255]);
        let b = PixelBuffer::filled(2, 1, [15, 10, 10, 255]);
        let report = ReportFormatter::new(ReportFormat::Text)
            .with_compare_options(CompareOptions::new(2, 1))
            .format_failure(&a, &b)
            .unwrap();

        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("Expected to be equal."));
        assert_eq!(
            lines.next(),
            Some("actual 2x1, expected 2x1: 2 channel values differ by more than 2 (allowed 1)")
        );
    }

    #[test]
    fn test_text_report_dimension_mismatch() {
        let report = ReportFormatter::default()
            .format_failure(&PixelBuffer::new(1, 1), &PixelBuffer::new(2, 3))
            .unwrap();
        assert!(report.starts_with(EXPECTED_EQUAL));
        assert!(report.ends_with("actual 1x1, expected 2x3: dimensions differ"));
    }

    #[test]
    fn test_html_report_structure() {
        let a = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);
        let b = PixelBuffer::filled(1, 1, [0, 0, 255, 255]);
        let html = ReportFormatter::new(ReportFormat::Html)
            .format_failure(&a, &b)
            .unwrap();

        assert!(html.starts_with("<span>Expected to be equal.</span><div class=\"clearfix\"></div>"));
        assert!(html.ends_with("<div class=\"clearfix\"></div>"));
        assert_eq!(html.matches("float: left;").count(), 3);
        let actual_at = html.find("Actual:").unwrap();
        let expected_at = html.find("Expected:").unwrap();
        let diff_at = html.find("Diff:").unwrap();
        assert!(actual_at < expected_at && expected_at < diff_at);
        assert_eq!(html.matches("data:image/png;base64,").count(), 3);
    }

    #[test]
    fn test_html_report_embeds_diff_png() {
        let a = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);
        let b = PixelBuffer::filled(1, 1, [0, 0, 255, 255]);
        let html = ReportFormatter::new(ReportFormat::Html)
            .format_failure(&a, &b)
            .unwrap();

        let diff_block = &html[html.find("Diff:").unwrap()..];
        let start = diff_block.find("base64,").unwrap() + "base64,".len();
        let end = start + diff_block[start..].find('"').unwrap();
        let png = base64::prelude::BASE64_STANDARD
            .decode(&diff_block[start..end])
            .unwrap();
        let decoded = DecodedImage::from_bytes(&png).unwrap();
        assert_eq!(decoded.data(), &[255, 0, 255, 255]);
    }

    #[test]
    fn test_html_report_with_empty_buffer() {
        let html = ReportFormatter::new(ReportFormat::Html)
            .format_failure(&PixelBuffer::new(0, 0), &PixelBuffer::filled(1, 1, [1, 1, 1, 1]))
            .unwrap();
        assert!(html.contains(r#"<img src="data:,">"#));
    }

    #[test]
    fn test_unexpected_pass_message() {
        assert_eq!(
            ReportFormatter::default().format_unexpected_pass(),
            "Expected not to be equal."
        );
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("html".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert_eq!("TEXT".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }
}
