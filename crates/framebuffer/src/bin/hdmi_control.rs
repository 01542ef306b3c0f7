//! hdmi-control
//!
//! Older generation of `fb-control`: `--mode` is mandatory, `--color` falls
//! back to the first known color, only the primary colors exist and the fill
//! always targets `/dev/fb0` with dynamically computed pixels.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::Parser;
use log::LevelFilter;

use fbkit_framebuffer::config::DEFAULT_TTY;
use fbkit_framebuffer::{
    ensure_root, Action, Controller, EncodingPolicy, LinuxDevices, Mode, Palette,
};

#[derive(Parser, Debug)]
#[command(name = "hdmi-control")]
#[command(about = "Show a solid color on /dev/fb0 or reset the terminal to text mode", long_about = None)]
struct Cli {
    /// Name of color
    #[arg(
        long,
        value_parser = PossibleValuesParser::new(Palette::legacy().names()),
        default_value = Palette::legacy().first()
    )]
    color: String,

    /// Operation mode
    #[arg(long, value_enum)]
    mode: Mode,

    /// Terminal to switch
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TTY)]
    tty: PathBuf,
}

fn main() -> ExitCode {
    if let Err(e) = ensure_root() {
        println!("{e}");
        return ExitCode::from(e.exit_code() as u8);
    }

    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .init();

    // --color always has a value here, so only the mode decides.
    let action = match cli.mode {
        Mode::Color => Action::Fill {
            tty: cli.tty,
            framebuffer: 0,
            color: cli.color,
        },
        Mode::Tty => Action::Text { tty: cli.tty },
    };

    let controller = Controller::new(LinuxDevices, Palette::legacy(), EncodingPolicy::Dynamic);
    match controller.run(&action) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_mode_is_required() {
        let err = Cli::try_parse_from(["hdmi-control", "--color", "blue"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_color_defaults_to_first_declared() {
        let cli = Cli::try_parse_from(["hdmi-control", "--mode", "color"]).unwrap();
        assert_eq!(cli.color, "red");
        assert_eq!(cli.mode, Mode::Color);
        assert_eq!(cli.tty, PathBuf::from(DEFAULT_TTY));
    }

    #[test]
    fn test_only_primary_colors_accepted() {
        let err =
            Cli::try_parse_from(["hdmi-control", "--mode", "color", "--color", "orange"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
