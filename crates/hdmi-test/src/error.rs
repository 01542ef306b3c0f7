//! Error type and process exit codes for the HDMI color check

use std::io;
use std::path::PathBuf;

pub const EXIT_MATCH: i32 = 0;
pub const EXIT_MISMATCH: i32 = 1;
pub const EXIT_CAPTURE_FAILED: i32 = 2;
pub const EXIT_MALFORMED_IMAGE: i32 = 3;
pub const EXIT_REPORT_FAILED: i32 = 4;
pub const EXIT_MISSING_DEPENDENCY: i32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum HdmiTestError {
    #[error("Missing program '{program}'. Check if it is installed (eg. sudo apt-get install -y {program})")]
    MissingDependency { program: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to capture hdmi input ({})", status_text(.status))]
    CaptureFailed { status: Option<i32> },

    #[error("capture file: {0}")]
    Io(#[from] io::Error),

    #[error("captured image is malformed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("captured image has no pixels")]
    EmptyImage,

    #[error("failed to save capture to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "killed by signal".to_string(),
    }
}

impl HdmiTestError {
    pub fn exit_code(&self) -> i32 {
        match self {
            HdmiTestError::MissingDependency { .. } => EXIT_MISSING_DEPENDENCY,
            HdmiTestError::Spawn { .. }
            | HdmiTestError::CaptureFailed { .. }
            | HdmiTestError::Io(_)
            | HdmiTestError::Save { .. } => EXIT_CAPTURE_FAILED,
            HdmiTestError::Decode(_) | HdmiTestError::EmptyImage => EXIT_MALFORMED_IMAGE,
        }
    }
}

pub type Result<T> = std::result::Result<T, HdmiTestError>;
