//! Frame capture through an external grabber

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use image::RgbImage;
use nix::unistd::{access, AccessFlags};

use crate::error::{HdmiTestError, Result};

pub const CAPTURE_PROGRAM: &str = "uvccapture";
pub const CAPTURE_QUALITY: u32 = 50;
pub const CAPTURE_WIDTH: u32 = 1920;
pub const CAPTURE_HEIGHT: u32 = 1080;

/// Something that can write one frame from a capture device into a file
pub trait FrameGrabber {
    /// Name of the external program, for error messages.
    fn program(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Capture a single frame from `device` into `output`.
    fn capture(&self, device: &Path, output: &Path) -> Result<()>;
}

/// `uvccapture` invocation settings
#[derive(Debug, Clone)]
pub struct UvcCapture {
    program: String,
    width: u32,
    height: u32,
    quality: u32,
}

impl Default for UvcCapture {
    fn default() -> Self {
        Self {
            program: CAPTURE_PROGRAM.to_string(),
            width: CAPTURE_WIDTH,
            height: CAPTURE_HEIGHT,
            quality: CAPTURE_QUALITY,
        }
    }
}

impl UvcCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another binary name or path instead of `uvccapture`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    /// Command line arguments, flags glued to their values the way
    /// uvccapture expects them.
    pub fn args(&self, device: &Path, output: &Path) -> Vec<OsString> {
        let mut device_arg = OsString::from("-d");
        device_arg.push(device);
        let mut output_arg = OsString::from("-o");
        output_arg.push(output);

        vec![
            "-m".into(),
            device_arg,
            "-w".into(),
            format!("-x{}", self.width).into(),
            format!("-y{}", self.height).into(),
            format!("-q{}", self.quality).into(),
            output_arg,
        ]
    }
}

impl FrameGrabber for UvcCapture {
    fn program(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }

    fn capture(&self, device: &Path, output: &Path) -> Result<()> {
        log::info!("Capturing {} via {}", device.display(), self.program);
        let status = Command::new(&self.program)
            .args(self.args(device, output))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| HdmiTestError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(HdmiTestError::CaptureFailed {
                status: status.code(),
            });
        }
        Ok(())
    }
}

/// Regular file the current user may execute.
fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

/// Resolve `program` like a shell would: names containing a slash are taken
/// as paths, anything else is searched on `PATH`.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

/// Grab one frame into a temporary file and decode it.
///
/// The temporary file is removed when this returns, on success and error
/// alike. With `keep` set, the decoded frame is also saved there.
pub fn capture_frame<G: FrameGrabber + ?Sized>(
    grabber: &G,
    device: &Path,
    keep: Option<&Path>,
) -> Result<RgbImage> {
    let scratch = tempfile::Builder::new()
        .prefix("hdmi-capture-")
        .suffix(".jpg")
        .tempfile()?;

    grabber.capture(device, scratch.path())?;

    let bytes = fs::read(scratch.path())?;
    log::debug!("Read {} bytes of captured image", bytes.len());
    let frame = image::load_from_memory(&bytes)?;

    if let Some(path) = keep {
        frame.save(path).map_err(|source| HdmiTestError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved capture to {}", path.display());
    }

    Ok(frame.to_rgb8())
}
