// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::prelude::*; // Add methods on commands
use imagediff_rs::{write_png, PixelBuffer};
use predicates::prelude::*; // Used for writing assertions
use rstest::rstest;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn write_solid(dir: &Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    write_png(&PixelBuffer::filled(width, height, rgba), &path).unwrap();
    path
}

fn imagediff() -> Command {
    Command::cargo_bin("imagediff").unwrap()
}

#[test]
fn test_identical_images_exit_zero() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 4, 4, [10, 20, 30, 255]);
    let b = write_solid(dir.path(), "b.png", 4, 4, [10, 20, 30, 255]);

    imagediff()
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_different_images_exit_one_with_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 2, 2, [255, 0, 0, 255]);
    let b = write_solid(dir.path(), "b.png", 2, 2, [0, 0, 255, 255]);

    imagediff()
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Expected to be equal."))
        .stdout(predicate::str::contains("8 channel values differ by more than 0"));
    Ok(())
}

#[rstest]
#[case(&["--tolerance", "3"], 0)]
#[case(&["--tolerance", "2"], 1)]
#[case(&["--max-deviating", "12"], 0)]
#[case(&["--max-deviating", "11"], 1)]
fn test_tolerance_flags(#[case] flags: &[&str], #[case] code: i32) {
    let dir = TempDir::new().unwrap();
    let a = write_solid(dir.path(), "a.png", 2, 2, [100, 100, 100, 255]);
    let b = write_solid(dir.path(), "b.png", 2, 2, [103, 97, 103, 255]);

    imagediff().arg(&a).arg(&b).args(flags).assert().code(code);
}

#[test]
fn test_writes_diff_png() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 2, 1, [0, 0, 0, 255]);
    let b = write_solid(dir.path(), "b.png", 1, 1, [255, 255, 255, 255]);
    let out = dir.path().join("diff.png");

    imagediff()
        .arg(&a)
        .arg(&b)
        .args(["--align", "top", "--diff"])
        .arg(&out)
        .assert()
        .code(1);

    let diff = imagediff_rs::decode_image_file(&out)?;
    assert_eq!((diff.width(), diff.height()), (2, 1));
    assert_eq!(diff.data(), &[255, 255, 255, 0, 0, 0, 0, 255]);
    Ok(())
}

#[test]
fn test_json_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 3, 2, [1, 2, 3, 255]);
    let b = write_solid(dir.path(), "b.png", 3, 2, [1, 2, 9, 255]);

    let output = imagediff().arg(&a).arg(&b).arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["equal"], false);
    assert_eq!(summary["deviating"], 6);
    assert_eq!(summary["actual"]["width"], 3);
    assert_eq!(summary["expected"]["height"], 2);
    Ok(())
}

#[test]
fn test_html_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 1, 1, [0, 0, 0, 255]);
    let b = write_solid(dir.path(), "b.png", 2, 2, [0, 0, 0, 255]);

    imagediff()
        .arg(&a)
        .arg(&b)
        .args(["--report", "html"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("<span>Expected to be equal.</span>"))
        .stdout(predicate::str::contains("<div>Diff:</div>"));
    Ok(())
}

#[test]
fn test_missing_file_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 1, 1, [0, 0, 0, 255]);

    imagediff()
        .arg(&a)
        .arg(dir.path().join("missing.png"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load expected image"));
    Ok(())
}

#[test]
fn test_invalid_align_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 1, 1, [0, 0, 0, 255]);

    imagediff()
        .arg(&a)
        .arg(&a)
        .args(["--align", "bottom"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'bottom' for '--align"));
    Ok(())
}

#[test]
fn test_semi_transparent_pixels_are_compared_exactly() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 1, 1, [100, 0, 0, 3]);
    let b = write_solid(dir.path(), "b.png", 1, 1, [90, 0, 0, 3]);

    imagediff()
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 channel values differ by more than 0"));
    Ok(())
}

#[test]
fn test_verbose_logs_under_imagediff_target() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let a = write_solid(dir.path(), "a.png", 1, 1, [0, 0, 0, 255]);

    imagediff()
        .arg(&a)
        .arg(&a)
        .arg("-v")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("imagediff]"))
        .stderr(predicate::str::contains("equal=true"));
    Ok(())
}
