//! Command-level orchestration: validated actions and their execution

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::colors::Palette;
use crate::device::{ConsoleDevice, DeviceProvider};
use crate::encoding::EncodingPolicy;
use crate::error::{DisplayError, Result};
use crate::fill::{fill_framebuffer, FillReport};
use crate::types::ConsoleMode;

/// Operation mode selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Switch to graphics mode and show a solid color
    #[default]
    Color,
    /// Return the terminal to text mode
    Tty,
}

/// A fully validated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Text {
        tty: PathBuf,
    },
    Fill {
        tty: PathBuf,
        framebuffer: u32,
        color: String,
    },
}

impl Action {
    /// Combine mode and color flags, rejecting the two invalid combinations.
    pub fn from_args(
        mode: Mode,
        color: Option<String>,
        tty: impl Into<PathBuf>,
        framebuffer: u32,
    ) -> Result<Self> {
        let tty = tty.into();
        match (mode, color) {
            (Mode::Color, Some(color)) => Ok(Action::Fill {
                tty,
                framebuffer,
                color,
            }),
            (Mode::Color, None) => Err(DisplayError::InvalidArguments(
                "--color is required when --mode is set to 'color'.".to_string(),
            )),
            (Mode::Tty, Some(_)) => Err(DisplayError::InvalidArguments(
                "--color cannot be used when --mode is set to 'tty'.".to_string(),
            )),
            (Mode::Tty, None) => Ok(Action::Text { tty }),
        }
    }

    pub fn tty(&self) -> &Path {
        match self {
            Action::Text { tty } | Action::Fill { tty, .. } => tty,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub enum Outcome {
    TextMode,
    Filled(FillReport),
}

/// Runs actions against a device provider
pub struct Controller<P: DeviceProvider> {
    devices: P,
    palette: Palette,
    policy: EncodingPolicy,
}

impl<P: DeviceProvider> Controller<P> {
    pub fn new(devices: P, palette: Palette, policy: EncodingPolicy) -> Self {
        Self {
            devices,
            palette,
            policy,
        }
    }

    pub fn devices(&self) -> &P {
        &self.devices
    }

    /// Execute one action.
    ///
    /// A fill resolves the color before any device is opened, then switches
    /// the terminal to graphics and writes the framebuffer. A text action
    /// only switches the terminal back.
    pub fn run(&self, action: &Action) -> Result<Outcome> {
        match action {
            Action::Text { tty } => {
                self.set_mode(tty, ConsoleMode::Text)?;
                Ok(Outcome::TextMode)
            }
            Action::Fill {
                tty,
                framebuffer,
                color,
            } => {
                let rgba = self.palette.resolve(color)?;
                self.set_mode(tty, ConsoleMode::Graphics)?;

                let mut fb = self.devices.open_framebuffer(*framebuffer)?;
                let report = fill_framebuffer(&mut fb, color, rgba, self.policy)?;
                log::info!(
                    "Filled fb{} with {} ({:#x}, {:?}, {} bytes)",
                    framebuffer,
                    color,
                    report.pixel.value,
                    report.strategy,
                    report.bytes_written
                );
                Ok(Outcome::Filled(report))
            }
        }
    }

    fn set_mode(&self, tty: &Path, mode: ConsoleMode) -> Result<()> {
        let mut console = self.devices.open_console(tty)?;
        console.set_mode(mode)
    }
}
