//! Dominant color detection

use std::collections::HashMap;

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Colors the check can recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryColor {
    Red,
    Green,
    Blue,
}

impl std::fmt::Display for PrimaryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimaryColor::Red => write!(f, "red"),
            PrimaryColor::Green => write!(f, "green"),
            PrimaryColor::Blue => write!(f, "blue"),
        }
    }
}

/// A channel counts as "on" above `primary` and "off" below `other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub primary: i32,
    pub other: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            primary: 230,
            other: 50,
        }
    }
}

/// Classify one RGB value. Both comparisons are strict.
pub fn classify(rgb: [u8; 3], thresholds: Thresholds) -> Option<PrimaryColor> {
    let [r, g, b] = rgb.map(i32::from);
    let on = |c: i32| c > thresholds.primary;
    let off = |c: i32| c < thresholds.other;

    if on(r) && off(g) && off(b) {
        Some(PrimaryColor::Red)
    } else if off(r) && on(g) && off(b) {
        Some(PrimaryColor::Green)
    } else if off(r) && off(g) && on(b) {
        Some(PrimaryColor::Blue)
    } else {
        None
    }
}

/// Most frequent pixel value. Ties go to the value seen first in raster
/// order; an empty image has no dominant color.
pub fn dominant_color(image: &RgbImage) -> Option<[u8; 3]> {
    // value -> (count, index of first occurrence)
    let mut counts: HashMap<[u8; 3], (u64, usize)> = HashMap::new();
    for (index, pixel) in image.pixels().enumerate() {
        counts.entry(pixel.0).or_insert((0, index)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(rgb, _)| rgb)
}
