//! capture -> decode -> classify -> compare

use std::path::Path;

use image::RgbImage;
use serde::Serialize;

use crate::capture::{capture_frame, FrameGrabber};
use crate::classify::{classify, dominant_color, PrimaryColor, Thresholds};
use crate::error::{HdmiTestError, Result, EXIT_MATCH, EXIT_MISMATCH};

/// Result of comparing a captured frame with the expected color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub expected: PrimaryColor,
    pub observed: Option<PrimaryColor>,
    pub dominant: [u8; 3],
    pub thresholds: Thresholds,
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        self.observed == Some(self.expected)
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_match() {
            EXIT_MATCH
        } else {
            EXIT_MISMATCH
        }
    }

    pub fn message(&self) -> String {
        match self.observed {
            Some(observed) if observed == self.expected => {
                format!("OK: Image is mostly {}", self.expected)
            }
            Some(observed) => format!("ERROR: Image is mostly {} and not {}", observed, self.expected),
            None => format!("ERROR: Image is mostly unknown and not {}", self.expected),
        }
    }
}

/// Classify an already decoded frame.
pub fn evaluate(
    image: &RgbImage,
    expected: PrimaryColor,
    thresholds: Thresholds,
) -> Result<Verdict> {
    let dominant = dominant_color(image).ok_or(HdmiTestError::EmptyImage)?;
    let observed = classify(dominant, thresholds);
    log::info!(
        "Dominant color {:?} classified as {}",
        dominant,
        observed.map_or_else(|| "unknown".to_string(), |c| c.to_string())
    );

    Ok(Verdict {
        expected,
        observed,
        dominant,
        thresholds,
    })
}

/// Full check against a capture device.
///
/// The grabber's availability is verified before anything is captured.
pub fn run_check<G: FrameGrabber + ?Sized>(
    grabber: &G,
    device: &Path,
    expected: PrimaryColor,
    thresholds: Thresholds,
    save_capture: Option<&Path>,
) -> Result<Verdict> {
    if !grabber.is_available() {
        return Err(HdmiTestError::MissingDependency {
            program: grabber.program().to_string(),
        });
    }

    let frame = capture_frame(grabber, device, save_capture)?;
    log::debug!("Captured {}x{} frame", frame.width(), frame.height());
    evaluate(&frame, expected, thresholds)
}
