//! Error type shared by the console and framebuffer paths

use std::io;
use std::path::PathBuf;

/// Everything that can go wrong between argument validation and the final
/// framebuffer write.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("insufficient permission: needs root permissions")]
    PermissionDenied,

    #[error("{0}")]
    InvalidArguments(String),

    #[error("invalid color specified: {0}")]
    InvalidColor(String),

    #[error("framebuffer '{}' doesn't exist or not a character device", .0.display())]
    NotCharDevice(PathBuf),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{request} rejected by {}: {source}", path.display())]
    Ioctl {
        request: &'static str,
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    #[error("unsupported bits per pixel: {0}")]
    UnsupportedFormat(u32),

    #[error("channel layout does not fit the pixel: {0}")]
    ChannelLayout(String),

    #[error("short write to {}: {written} of {expected} bytes", path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl DisplayError {
    /// Process exit status; every framebuffer tool failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// True for errors caused by the command line rather than the device.
    pub fn is_usage(&self) -> bool {
        matches!(self, DisplayError::InvalidArguments(_))
    }
}

pub type Result<T> = std::result::Result<T, DisplayError>;
