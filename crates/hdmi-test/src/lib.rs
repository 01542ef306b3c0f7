//! # fbkit HDMI test
//!
//! Grab one frame from an HDMI capture device, find its most frequent pixel
//! value and check that it is the expected primary color.
//!
//! ## Example
//!
//! ```no_run
//! use fbkit_hdmi_test::{run_check, PrimaryColor, Thresholds, UvcCapture};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let verdict = run_check(
//!         &UvcCapture::new(),
//!         Path::new("/dev/video0"),
//!         PrimaryColor::Red,
//!         Thresholds::default(),
//!         None,
//!     )?;
//!     println!("{}", verdict.message());
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod check;
pub mod classify;
pub mod error;

pub use capture::{capture_frame, find_program, FrameGrabber, UvcCapture};
pub use check::{evaluate, run_check, Verdict};
pub use classify::{classify, dominant_color, PrimaryColor, Thresholds};
pub use error::{HdmiTestError, Result};
