//! Core data types for console and framebuffer control

use serde::{Deserialize, Serialize};

use crate::sys;

/// Position and width of one color channel inside a packed pixel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitfield {
    /// Bit offset from the least significant bit
    pub offset: u32,
    /// Number of bits in the channel
    pub length: u32,
}

impl Bitfield {
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }
}

impl From<sys::RawBitfield> for Bitfield {
    fn from(raw: sys::RawBitfield) -> Self {
        Self {
            offset: raw.offset,
            length: raw.length,
        }
    }
}

/// Geometry and pixel layout reported by a framebuffer device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub red: Bitfield,
    pub green: Bitfield,
    pub blue: Bitfield,
    pub alpha: Bitfield,
}

impl ScreenInfo {
    /// Number of visible pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl From<sys::VarScreenInfo> for ScreenInfo {
    fn from(raw: sys::VarScreenInfo) -> Self {
        Self {
            width: raw.xres,
            height: raw.yres,
            bits_per_pixel: raw.bits_per_pixel,
            red: raw.red.into(),
            green: raw.green.into(),
            blue: raw.blue.into(),
            alpha: raw.transp.into(),
        }
    }
}

/// 8-bit per channel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color; alpha only matters for layouts that carry it.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Virtual terminal display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleMode {
    Text,
    Graphics,
}

impl ConsoleMode {
    pub(crate) fn kd_value(self) -> i32 {
        match self {
            ConsoleMode::Text => sys::KD_TEXT,
            ConsoleMode::Graphics => sys::KD_GRAPHICS,
        }
    }
}

impl std::fmt::Display for ConsoleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleMode::Text => write!(f, "text"),
            ConsoleMode::Graphics => write!(f, "graphics"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_info_from_raw() {
        let raw = sys::VarScreenInfo {
            xres: 1920,
            yres: 1080,
            bits_per_pixel: 32,
            red: sys::RawBitfield { offset: 16, length: 8, msb_right: 0 },
            green: sys::RawBitfield { offset: 8, length: 8, msb_right: 0 },
            blue: sys::RawBitfield { offset: 0, length: 8, msb_right: 0 },
            transp: sys::RawBitfield { offset: 24, length: 8, msb_right: 0 },
            ..Default::default()
        };

        let info = ScreenInfo::from(raw);
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.red, Bitfield::new(16, 8));
        assert_eq!(info.alpha, Bitfield::new(24, 8));
        assert_eq!(info.pixel_count(), 1920 * 1080);
    }

    #[test]
    fn test_console_mode_values() {
        assert_eq!(ConsoleMode::Text.kd_value(), 0);
        assert_eq!(ConsoleMode::Graphics.kd_value(), 1);
    }
}
