//! # fbkit framebuffer
//!
//! Show a solid color on a Linux framebuffer, or hand the terminal back to
//! text mode.
//!
//! ## Architecture
//!
//! - **sys**: `KDSETMODE` / `FBIOGET_VSCREENINFO` bindings
//! - **device**: terminal and framebuffer traits plus their Linux implementations
//! - **colors / encoding**: named colors and the pixel encoding strategies
//! - **fill / control**: the fill itself and the validated command flow
//!
//! ## Example
//!
//! ```no_run
//! use fbkit_framebuffer::{Action, Controller, EncodingPolicy, LinuxDevices, Mode, Palette};
//!
//! fn main() -> anyhow::Result<()> {
//!     let action = Action::from_args(Mode::Color, Some("orange".into()), "/dev/tty0", 0)?;
//!     let controller = Controller::new(LinuxDevices, Palette::standard(), EncodingPolicy::Auto);
//!     controller.run(&action)?;
//!     Ok(())
//! }
//! ```

pub mod colors;
pub mod config;
pub mod control;
pub mod device;
pub mod encoding;
pub mod error;
pub mod fill;
pub mod privilege;
pub mod sys;
pub mod types;

pub use colors::Palette;
pub use config::DisplayConfig;
pub use control::{Action, Controller, Mode, Outcome};
pub use device::{ConsoleDevice, DeviceProvider, FramebufferDevice, LinuxDevices};
pub use encoding::{EncodingPolicy, PackedPixel, Strategy};
pub use error::{DisplayError, Result};
pub use fill::{fill_framebuffer, FillReport};
pub use privilege::ensure_root;
pub use types::*;
