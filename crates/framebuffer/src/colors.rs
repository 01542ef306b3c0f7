//! Named color palettes and the fixed pre-packed tables

use crate::error::{DisplayError, Result};
use crate::types::Rgba;

const STANDARD: &[(&str, Rgba)] = &[
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 255, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("black", Rgba::opaque(0, 0, 0)),
    ("white", Rgba::opaque(255, 255, 255)),
    ("orange", Rgba::opaque(255, 102, 0)),
];

const LEGACY: &[(&str, Rgba)] = &[
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 255, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
];

/// 32 bpp words as 0xAARRGGBB, i.e. B, G, R, A in memory.
const BGRA32: &[(&str, u32)] = &[
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("black", 0xFF00_0000),
    ("white", 0xFFFF_FFFF),
    ("orange", 0xFFFF_6600),
];

const RGB565: &[(&str, u16)] = &[
    ("red", 0xF800),
    ("green", 0x07E0),
    ("blue", 0x001F),
    ("black", 0x0000),
    ("white", 0xFFFF),
    ("orange", 0xFB20),
];

/// Ordered set of colors a tool accepts by name
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    entries: &'static [(&'static str, Rgba)],
}

impl Palette {
    /// Colors accepted by `fb-control`.
    pub fn standard() -> Self {
        Self { entries: STANDARD }
    }

    /// Colors accepted by the older `hdmi-control` tool.
    pub fn legacy() -> Self {
        Self { entries: LEGACY }
    }

    /// Look up a color by name.
    pub fn resolve(&self, name: &str) -> Result<Rgba> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, rgba)| *rgba)
            .ok_or_else(|| DisplayError::InvalidColor(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Names in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    /// First declared color, used where a tool defaults `--color`.
    pub fn first(&self) -> &'static str {
        self.entries[0].0
    }
}

/// Pre-packed 32 bpp BGRA value for a named color.
pub fn bgra32(name: &str) -> Option<u32> {
    BGRA32.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Pre-packed 16 bpp RGB565 value for a named color.
pub fn rgb565(name: &str) -> Option<u16> {
    RGB565.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}
