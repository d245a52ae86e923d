use imagediff_rs::imagediff_canvas::{Canvas, Canvas2dContext, DecodedImage, RectParams};
use imagediff_rs::{
    assert_image_diff_eq, create_pixel_buffer, decode_image_file, diff_images, encode_png,
    equal_images, is_image_type, to_canvas, to_image_diff_equal, to_pixel_buffer, write_png,
    Align, CompareOptions, DiffOptions, ImageDiffError, PixelBuffer, RawPixels, ReportFormat,
    ReportFormatter, SourceImage,
};
use rstest::rstest;

fn filled_canvas(width: u32, height: u32, color: &str) -> Canvas {
    let mut canvas = Canvas::new(width, height).unwrap();
    let ctx = canvas.get_context_mut();
    ctx.set_fill_style(color).unwrap();
    ctx.fill_rect(&RectParams::full(width, height));
    canvas
}

#[test]
fn test_equal_images_across_representations() {
    let canvas = filled_canvas(3, 2, "#336699");
    let image = DecodedImage::from_rgba(3, 2, [0x33, 0x66, 0x99, 255].repeat(6)).unwrap();
    let buffer = PixelBuffer::filled(3, 2, [0x33, 0x66, 0x99, 255]);
    let opts = CompareOptions::default();

    assert!(equal_images(&canvas, &image, &opts).unwrap());
    assert!(equal_images(canvas.get_context(), &buffer, &opts).unwrap());
    assert!(equal_images(&image, &buffer, &opts).unwrap());
}

#[test]
fn test_equal_images_rejects_unsupported_input() {
    let bytes = [0u8; 7];
    let raw = RawPixels::new(1, 2, &bytes);
    let buffer = create_pixel_buffer(1, 2);

    assert!(!is_image_type(&SourceImage::from(raw)));
    let err = equal_images(&buffer, raw, &CompareOptions::default()).unwrap_err();
    assert!(matches!(err, ImageDiffError::UnsupportedType));
    assert_eq!(
        err.to_string(),
        "ImageTypeError: Submitted object was not an image."
    );
    assert!(diff_images(raw, &buffer, &DiffOptions::default()).is_err());
}

#[test]
fn test_overflowing_raw_dimensions_are_unsupported() {
    let raw = RawPixels::new(1 << 31, 1 << 31, &[]);
    let buffer = PixelBuffer::new(1, 1);

    let err = equal_images(raw, &buffer, &CompareOptions::default()).unwrap_err();
    assert!(matches!(err, ImageDiffError::UnsupportedType));
    let err = diff_images(&buffer, raw, &DiffOptions::default()).unwrap_err();
    assert!(matches!(err, ImageDiffError::UnsupportedType));
}

#[test]
fn test_semi_transparent_images_compare_exactly() {
    let a = DecodedImage::from_rgba(1, 1, vec![100, 0, 0, 3]).unwrap();
    let b = DecodedImage::from_rgba(1, 1, vec![90, 0, 0, 3]).unwrap();
    let opts = CompareOptions::default();

    assert!(!equal_images(&a, &b, &opts).unwrap());
    assert!(equal_images(&a, &a, &opts).unwrap());
    assert_eq!(to_pixel_buffer(&a).unwrap().data(), &[100, 0, 0, 3]);
}

#[rstest]
#[case(0, 0, false)]
#[case(5, 0, true)]
#[case(0, 3, true)]
#[case(4, 2, false)]
fn test_equal_images_tolerance(
    #[case] tolerance: u32,
    #[case] max_deviating: u64,
    #[case] expected: bool,
) {
    let a = PixelBuffer::filled(1, 1, [100, 100, 100, 255]);
    let b = PixelBuffer::filled(1, 1, [105, 95, 105, 255]);
    let opts = CompareOptions::new(tolerance, max_deviating);
    assert_eq!(equal_images(&a, &b, &opts).unwrap(), expected);
}

#[test]
fn test_diff_images_of_canvases() {
    let red = filled_canvas(2, 2, "red");
    let blue = filled_canvas(2, 2, "blue");
    let out = diff_images(&red, &blue, &DiffOptions::default()).unwrap();
    assert_eq!(out, PixelBuffer::filled(2, 2, [255, 0, 255, 255]));
}

#[test]
fn test_diff_images_unequal_sizes() {
    let black = PixelBuffer::filled(2, 1, [0, 0, 0, 255]);
    let white = filled_canvas(1, 1, "#fff");
    let opts = DiffOptions::default().with_align(Align::TopLeft);
    let out = diff_images(&black, &white, &opts).unwrap();
    assert_eq!(out.data(), &[255, 255, 255, 0, 0, 0, 0, 255]);
}

#[test]
fn test_diff_against_self_is_uniform() {
    let buffer = PixelBuffer::from_raw(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 0]).unwrap();
    let out = diff_images(&buffer, &buffer, &DiffOptions::default()).unwrap();
    // Opaque and fully transparent pixels both diff to opaque black
    assert_eq!(out, PixelBuffer::filled(2, 1, [0, 0, 0, 255]));
}

#[test]
fn test_to_pixel_buffer_round_trip() {
    let buffer = PixelBuffer::from_raw(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(to_pixel_buffer(&buffer).unwrap(), buffer);

    let opaque = PixelBuffer::filled(2, 2, [10, 200, 30, 255]);
    let canvas = to_canvas(&opaque).unwrap();
    assert_eq!(to_pixel_buffer(&canvas).unwrap(), opaque);
}

#[test]
fn test_to_canvas_zero_sized_fails() {
    let err = to_canvas(&create_pixel_buffer(0, 0)).unwrap_err();
    assert!(matches!(err, ImageDiffError::Canvas(_)));
}

#[test]
fn test_context_source_reads_whole_surface() {
    let mut ctx = Canvas2dContext::new(4, 4).unwrap();
    ctx.set_fill_style("#00ff00").unwrap();
    ctx.fill_rect(&RectParams {
        x: 0.0,
        y: 0.0,
        width: 2.0,
        height: 2.0,
    });
    let buffer = to_pixel_buffer(&ctx).unwrap();
    assert_eq!(buffer.pixel(1, 1), Some([0, 255, 0, 255]));
    assert_eq!(buffer.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn test_write_png_and_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diff.png");
    let buffer = PixelBuffer::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 64]).unwrap();

    write_png(&buffer, &path).unwrap();
    let decoded = decode_image_file(&path).unwrap();
    assert_eq!(to_pixel_buffer(&decoded).unwrap().data()[..4], [255, 0, 0, 255]);
    assert_eq!(decoded.data(), buffer.data());
}

#[test]
fn test_encode_png_decodes_to_equal_image() {
    let buffer = PixelBuffer::filled(3, 3, [90, 80, 70, 255]);
    let decoded = DecodedImage::from_bytes(&encode_png(&buffer).unwrap()).unwrap();
    assert_image_diff_eq!(&decoded, &buffer);
}

#[test]
fn test_decode_missing_file() {
    let err = decode_image_file("/nonexistent/missing.png").unwrap_err();
    assert!(matches!(err, ImageDiffError::Canvas(_)));
}

#[test]
fn test_matcher_on_canvas_sources() {
    let a = filled_canvas(2, 2, "#808080");
    let b = filled_canvas(2, 2, "#828282");

    assert!(to_image_diff_equal(&a, &b, 2, 0).unwrap().pass);
    let failed = to_image_diff_equal(&a, &b, 1, 0).unwrap();
    assert!(!failed.pass);
    assert!(failed.message.contains("12 channel values differ by more than 1"));
}

#[test]
fn test_html_report_for_canvas_pair() {
    let a = to_pixel_buffer(&filled_canvas(2, 1, "white")).unwrap();
    let b = to_pixel_buffer(&filled_canvas(1, 1, "black")).unwrap();
    let html = ReportFormatter::new(ReportFormat::Html)
        .format_failure(&a, &b)
        .unwrap();
    assert!(html.starts_with("<span>Expected to be equal.</span>"));
    assert_eq!(html.matches("<img src=\"data:image/png;base64,").count(), 3);
}
