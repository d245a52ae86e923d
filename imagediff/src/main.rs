use anyhow::Context;
use clap::{Parser, ValueEnum};
use imagediff_rs::{
    count_deviations, decode_image_file, diff_images, equal_images, to_pixel_buffer, write_png,
    Align, CompareOptions, DiffOptions, ReportFormat, ReportFormatter,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// imagediff: compare two images pixel by pixel and optionally write a visual diff
///
/// Exits with 0 when the images are equal, 1 when they differ and 2 on error.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the actual image (PNG or JPEG)
    #[clap(value_name = "ACTUAL")]
    pub actual: PathBuf,

    /// Path to the expected image (PNG or JPEG)
    #[clap(value_name = "EXPECTED")]
    pub expected: PathBuf,

    /// Largest per-channel difference still treated as equal
    #[clap(short, long, default_value_t = 0)]
    pub tolerance: u32,

    /// Number of channel values allowed to exceed the tolerance
    #[clap(short, long, default_value_t = 0)]
    pub max_deviating: u64,

    /// Placement of images of different sizes in the diff. One of center, top
    #[clap(short, long, default_value = "center")]
    pub align: Align,

    /// Write the visual diff as PNG to this path
    #[clap(short, long, value_name = "FILE")]
    pub diff: Option<PathBuf>,

    /// Format of the report printed when the images differ
    #[clap(short, long, value_enum, default_value = "text")]
    pub report: ReportKind,

    /// Print a JSON summary instead of a report
    #[clap(long)]
    pub json: bool,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ReportKind {
    Text,
    Html,
}

impl From<ReportKind> for ReportFormat {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Text => ReportFormat::Text,
            ReportKind::Html => ReportFormat::Html,
        }
    }
}

#[derive(Serialize)]
struct Summary {
    equal: bool,
    actual: Dimensions,
    expected: Dimensions,
    /// Deviating channel values, absent when dimensions differ
    deviating: Option<usize>,
    tolerance: u32,
    max_deviating: u64,
    diff: Option<PathBuf>,
}

#[derive(Serialize)]
struct Dimensions {
    width: u32,
    height: u32,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Compare the two images, returning whether they are equal.
fn run(args: &Args) -> anyhow::Result<bool> {
    let compare = CompareOptions::new(args.tolerance, args.max_deviating);
    let diff_opts = DiffOptions::default().with_align(args.align);

    let actual = decode_image_file(&args.actual)
        .with_context(|| format!("Failed to load actual image: {}", args.actual.display()))?;
    let expected = decode_image_file(&args.expected).with_context(|| {
        format!(
            "Failed to load expected image: {}",
            args.expected.display()
        )
    })?;

    let actual = to_pixel_buffer(&actual)?;
    let expected = to_pixel_buffer(&expected)?;

    let equal = equal_images(&actual, &expected, &compare)?;
    log::info!(
        target: "imagediff",
        "{} vs {}: equal={}",
        args.actual.display(),
        args.expected.display(),
        equal
    );

    if let Some(path) = &args.diff {
        let diff = diff_images(&actual, &expected, &diff_opts)?;
        write_png(&diff, path)
            .with_context(|| format!("Failed to write diff image: {}", path.display()))?;
    }

    if args.json {
        let summary = Summary {
            equal,
            actual: Dimensions {
                width: actual.width(),
                height: actual.height(),
            },
            expected: Dimensions {
                width: expected.width(),
                height: expected.height(),
            },
            deviating: count_deviations(&actual, &expected, args.tolerance),
            tolerance: args.tolerance,
            max_deviating: args.max_deviating,
            diff: args.diff.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !equal {
        let report = ReportFormatter::new(args.report.into())
            .with_compare_options(compare)
            .with_diff_options(diff_opts)
            .format_failure(&actual, &expected)?;
        println!("{report}");
    }

    Ok(equal)
}
