//! hdmi-test
//!
//! Capture the HDMI input through `uvccapture` and check that the picture is
//! mostly the expected color.
//!
//! Exit codes: 0 match, 1 mismatch, 2 capture failure, 3 malformed image,
//! 4 verdict could not be printed, 10 missing `uvccapture`.
//!
//! Only the verdict (`OK: ...` / `ERROR: Image is mostly ...`, or the JSON
//! document with `--json`) is printed on stdout. Hard errors such as a
//! missing `uvccapture` or a failed capture go to stderr as `ERROR: <msg>`;
//! scripts that need them must read stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use fbkit_hdmi_test::capture::{CAPTURE_HEIGHT, CAPTURE_PROGRAM, CAPTURE_QUALITY, CAPTURE_WIDTH};
use fbkit_hdmi_test::error::EXIT_REPORT_FAILED;
use fbkit_hdmi_test::{run_check, PrimaryColor, Thresholds, UvcCapture, Verdict};

#[derive(Parser, Debug)]
#[command(name = "hdmi-test")]
#[command(about = "Check the dominant color of a captured HDMI frame", long_about = None)]
struct Cli {
    /// Expected color
    #[arg(long, value_enum)]
    color: PrimaryColor,

    /// Capture device, e.g. /dev/video0
    #[arg(long, value_name = "PATH")]
    device: PathBuf,

    /// A channel counts as set above this value
    #[arg(long, default_value_t = 230, allow_negative_numbers = true)]
    threshold_primary_color: i32,

    /// The other channels must stay below this value
    #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
    threshold_other_colors: i32,

    /// Frame grabber binary
    #[arg(long, value_name = "PROGRAM", default_value = CAPTURE_PROGRAM)]
    capture_program: String,

    #[arg(long, default_value_t = CAPTURE_WIDTH)]
    capture_width: u32,

    #[arg(long, default_value_t = CAPTURE_HEIGHT)]
    capture_height: u32,

    /// JPEG quality requested from the grabber
    #[arg(long, default_value_t = CAPTURE_QUALITY)]
    capture_quality: u32,

    /// Keep a copy of the captured frame
    #[arg(long, value_name = "PATH")]
    save_capture: Option<PathBuf>,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .init();

    let grabber = UvcCapture::new()
        .with_program(cli.capture_program.as_str())
        .with_resolution(cli.capture_width, cli.capture_height)
        .with_quality(cli.capture_quality);
    let thresholds = Thresholds {
        primary: cli.threshold_primary_color,
        other: cli.threshold_other_colors,
    };

    match run_check(
        &grabber,
        &cli.device,
        cli.color,
        thresholds,
        cli.save_capture.as_deref(),
    ) {
        Ok(verdict) => ExitCode::from(finish(&verdict, cli.json, &mut io::stdout()) as u8),
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn report(verdict: &Verdict, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(verdict)?)?;
    } else {
        writeln!(out, "{}", verdict.message())?;
    }
    out.flush()?;
    Ok(())
}

/// Print the verdict and pick the exit code. A verdict that cannot be
/// printed gets its own code so it is never mistaken for a mismatch.
fn finish(verdict: &Verdict, json: bool, out: &mut impl Write) -> i32 {
    match report(verdict, json, out) {
        Ok(()) => verdict.exit_code(),
        Err(e) => {
            eprintln!("ERROR: failed to print verdict: {e}");
            EXIT_REPORT_FAILED
        }
    }
}
