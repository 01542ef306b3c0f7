//! fb-control
//!
//! Show either a solid color on a framebuffer or reset the terminal to text
//! mode. Needs root for the console and framebuffer ioctls.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{CommandFactory, Parser};
use log::LevelFilter;

use fbkit_framebuffer::{
    ensure_root, Action, Controller, DisplayConfig, DisplayError, EncodingPolicy, LinuxDevices,
    Mode, Outcome, Palette,
};

#[derive(Parser, Debug)]
#[command(name = "fb-control")]
#[command(about = "Show a solid color on a framebuffer or reset the terminal to text mode", long_about = None)]
struct Cli {
    /// Name of color
    #[arg(long, value_parser = PossibleValuesParser::new(Palette::standard().names()))]
    color: Option<String>,

    /// Operation mode
    #[arg(long, value_enum, default_value_t = Mode::Color)]
    mode: Mode,

    /// Terminal to switch (defaults to /dev/tty0)
    #[arg(long, value_name = "PATH")]
    tty: Option<PathBuf>,

    /// Framebuffer id (defaults to 0)
    #[arg(long, value_name = "INDEX")]
    fb: Option<u32>,

    /// Pixel encoding strategy (defaults to auto)
    #[arg(long, value_enum)]
    encoding: Option<EncodingPolicy>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    if let Err(e) = ensure_root() {
        println!("{e}");
        return ExitCode::from(e.exit_code() as u8);
    }

    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let display = e.downcast_ref::<DisplayError>();
            if display.is_some_and(DisplayError::is_usage) {
                let _ = Cli::command().write_help(&mut io::stderr());
            }
            ExitCode::from(display.map_or(1, DisplayError::exit_code) as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = DisplayConfig::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.tty, cli.fb, cli.encoding);
    let policy = config.encoding;

    let action = Action::from_args(cli.mode, cli.color, config.tty, config.framebuffer)?;
    log::debug!("Running {action:?} with {policy} encoding");

    let controller = Controller::new(LinuxDevices, Palette::standard(), policy);
    let outcome = controller.run(&action)?;

    match outcome {
        Outcome::TextMode => log::info!("{} back in text mode", action.tty().display()),
        Outcome::Filled(report) => log::info!(
            "Wrote {} bytes ({:?})",
            report.bytes_written,
            report.strategy
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fb-control", "--color", "orange"]).unwrap();
        assert_eq!(cli.mode, Mode::Color);
        assert_eq!(cli.color.as_deref(), Some("orange"));
        assert!(cli.tty.is_none());
        assert!(cli.fb.is_none());
        assert!(cli.encoding.is_none());
    }

    #[test]
    fn test_unknown_color_rejected_by_parser() {
        let err = Cli::try_parse_from(["fb-control", "--color", "purple"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_encoding_flag() {
        let cli = Cli::try_parse_from(["fb-control", "--mode", "tty", "--encoding", "dual-table"])
            .unwrap();
        assert_eq!(cli.mode, Mode::Tty);
        assert_eq!(cli.encoding, Some(EncodingPolicy::DualTable));
    }
}
