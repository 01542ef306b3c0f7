//! Color to pixel encoding.
//!
//! Three ways of producing a packed pixel exist side by side:
//!
//! - **Dynamic**: scale each 8-bit channel to the length the device reports
//!   and shift it to the reported offset. Works for any layout.
//! - **Fixed BGRA**: a pre-packed 0xAARRGGBB word per color name.
//! - **RGB565 table**: a pre-packed 16-bit word per color name.
//!
//! [`EncodingPolicy`] chooses between them; [`EncodingPolicy::Auto`] only
//! uses a table when the device layout is exactly the one the table was
//! built for, and falls back to dynamic computation otherwise.

use serde::{Deserialize, Serialize};

use crate::colors;
use crate::error::{DisplayError, Result};
use crate::types::{Bitfield, Rgba, ScreenInfo};

/// User-facing choice of encoding strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingPolicy {
    /// Pick a fixed table for the canonical layouts, dynamic otherwise
    #[default]
    Auto,
    /// Always compute from the reported channel offsets/lengths
    Dynamic,
    /// Always use the 32 bpp BGRA table
    FixedBgra,
    /// RGB565 table for 16 bpp, BGRA table for 32 bpp
    DualTable,
}

impl std::fmt::Display for EncodingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingPolicy::Auto => write!(f, "auto"),
            EncodingPolicy::Dynamic => write!(f, "dynamic"),
            EncodingPolicy::FixedBgra => write!(f, "fixed-bgra"),
            EncodingPolicy::DualTable => write!(f, "dual-table"),
        }
    }
}

/// Strategy actually used for one device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    Dynamic,
    FixedBgra32,
    Rgb565Table,
}

/// One pixel in the device's native width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackedPixel {
    pub value: u32,
    pub bytes_per_pixel: usize,
}

impl PackedPixel {
    /// Pack `value` for the given depth. Only 16 and 32 bpp are supported.
    pub fn new(value: u32, bits_per_pixel: u32) -> Result<Self> {
        match bits_per_pixel {
            32 => Ok(Self { value, bytes_per_pixel: 4 }),
            16 => {
                if value > u32::from(u16::MAX) {
                    return Err(DisplayError::ChannelLayout(format!(
                        "value {value:#x} exceeds 16 bits"
                    )));
                }
                Ok(Self { value, bytes_per_pixel: 2 })
            }
            other => Err(DisplayError::UnsupportedFormat(other)),
        }
    }

    /// Little-endian bytes of exactly one pixel.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.value.to_le_bytes()[..self.bytes_per_pixel].to_vec()
    }
}

/// Scale an 8-bit channel to `field.length` bits and move it to `field.offset`.
pub fn channel_value(value: u8, field: Bitfield) -> Result<u32> {
    if field.length == 0 {
        return Ok(0);
    }
    let end = field.offset.checked_add(field.length);
    if end.map_or(true, |end| end > 32) {
        return Err(DisplayError::ChannelLayout(format!(
            "offset {} length {} exceeds 32 bits",
            field.offset, field.length
        )));
    }

    let value = u32::from(value);
    let scaled = if field.length <= 8 {
        value >> (8 - field.length)
    } else {
        // Wider than 8 bits: keep the value in the top bits of the channel.
        value << (field.length - 8)
    };
    Ok(scaled << field.offset)
}

/// Sum of all channel contributions for `color` in the device layout.
pub fn dynamic_value(color: Rgba, info: &ScreenInfo) -> Result<u32> {
    let parts = [
        channel_value(color.r, info.red)?,
        channel_value(color.g, info.green)?,
        channel_value(color.b, info.blue)?,
        channel_value(color.a, info.alpha)?,
    ];
    let sum: u64 = parts.iter().map(|&p| u64::from(p)).sum();
    u32::try_from(sum)
        .map_err(|_| DisplayError::ChannelLayout(format!("overlapping channels sum to {sum:#x}")))
}

fn is_canonical_bgra32(info: &ScreenInfo) -> bool {
    info.bits_per_pixel == 32
        && info.blue == Bitfield::new(0, 8)
        && info.green == Bitfield::new(8, 8)
        && info.red == Bitfield::new(16, 8)
        && info.alpha == Bitfield::new(24, 8)
}

fn is_canonical_rgb565(info: &ScreenInfo) -> bool {
    info.bits_per_pixel == 16
        && info.red == Bitfield::new(11, 5)
        && info.green == Bitfield::new(5, 6)
        && info.blue == Bitfield::new(0, 5)
        && info.alpha.length == 0
}

/// Resolve a policy against the layout a device reported.
pub fn select_strategy(policy: EncodingPolicy, info: &ScreenInfo) -> Result<Strategy> {
    let bpp = info.bits_per_pixel;
    if bpp != 16 && bpp != 32 {
        return Err(DisplayError::UnsupportedFormat(bpp));
    }

    let strategy = match policy {
        EncodingPolicy::Auto if is_canonical_bgra32(info) => Strategy::FixedBgra32,
        EncodingPolicy::Auto if is_canonical_rgb565(info) => Strategy::Rgb565Table,
        EncodingPolicy::Auto | EncodingPolicy::Dynamic => Strategy::Dynamic,
        EncodingPolicy::FixedBgra if bpp == 32 => Strategy::FixedBgra32,
        EncodingPolicy::FixedBgra => return Err(DisplayError::UnsupportedFormat(bpp)),
        EncodingPolicy::DualTable if bpp == 16 => Strategy::Rgb565Table,
        EncodingPolicy::DualTable => Strategy::FixedBgra32,
    };
    Ok(strategy)
}

/// Encode a named color for the device described by `info`.
pub fn encode(
    policy: EncodingPolicy,
    name: &str,
    color: Rgba,
    info: &ScreenInfo,
) -> Result<(Strategy, PackedPixel)> {
    let strategy = select_strategy(policy, info)?;
    let value = match strategy {
        Strategy::Dynamic => dynamic_value(color, info)?,
        Strategy::FixedBgra32 => colors::bgra32(name)
            .ok_or_else(|| DisplayError::InvalidColor(name.to_string()))?,
        Strategy::Rgb565Table => colors::rgb565(name)
            .map(u32::from)
            .ok_or_else(|| DisplayError::InvalidColor(name.to_string()))?,
    };
    log::debug!("{name} -> {value:#010x} via {strategy:?}");
    Ok((strategy, PackedPixel::new(value, info.bits_per_pixel)?))
}

/// `count` copies of `pixel`, ready for one bulk write.
pub fn fill_pattern(pixel: PackedPixel, count: usize) -> Vec<u8> {
    pixel.to_le_bytes().repeat(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Palette;

    fn bgra32_info() -> ScreenInfo {
        ScreenInfo {
            width: 2,
            height: 2,
            bits_per_pixel: 32,
            red: Bitfield::new(16, 8),
            green: Bitfield::new(8, 8),
            blue: Bitfield::new(0, 8),
            alpha: Bitfield::new(24, 8),
        }
    }

    fn rgb565_info() -> ScreenInfo {
        ScreenInfo {
            width: 4,
            height: 1,
            bits_per_pixel: 16,
            red: Bitfield::new(11, 5),
            green: Bitfield::new(5, 6),
            blue: Bitfield::new(0, 5),
            alpha: Bitfield::default(),
        }
    }

    #[test]
    fn test_channel_roundtrip_keeps_top_bits() {
        // Unpacking with the same offset/length yields the top `length` bits.
        for bpp in [16u32, 32] {
            for length in 1..=8u32 {
                for offset in 0..=(bpp - length) {
                    let field = Bitfield::new(offset, length);
                    for value in [0u8, 1, 0x5A, 0x80, 0xC3, 0xFF] {
                        let packed = channel_value(value, field).unwrap();
                        let mask = (1u32 << length) - 1;
                        let back = (packed >> offset) & mask;
                        assert_eq!(back, u32::from(value) >> (8 - length));
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_length_channel_contributes_nothing() {
        assert_eq!(channel_value(255, Bitfield::new(0, 0)).unwrap(), 0);
        assert_eq!(channel_value(255, Bitfield::new(32, 0)).unwrap(), 0);
    }

    #[test]
    fn test_channel_outside_word_is_rejected() {
        assert!(matches!(
            channel_value(255, Bitfield::new(30, 8)),
            Err(DisplayError::ChannelLayout(_))
        ));
    }

    #[test]
    fn test_wide_channel_scales_up() {
        assert_eq!(channel_value(0xFF, Bitfield::new(20, 10)).unwrap(), 0x3FC << 20);
    }

    #[test]
    fn test_auto_matches_dynamic_on_canonical_layouts() {
        let palette = Palette::standard();
        for info in [bgra32_info(), rgb565_info()] {
            for name in palette.names() {
                let color = palette.resolve(name).unwrap();
                let (auto_strategy, auto) = encode(EncodingPolicy::Auto, name, color, &info).unwrap();
                let (_, dynamic) = encode(EncodingPolicy::Dynamic, name, color, &info).unwrap();
                assert_ne!(auto_strategy, Strategy::Dynamic);
                assert_eq!(auto, dynamic, "{name} at {} bpp", info.bits_per_pixel);
            }
        }
    }

    #[test]
    fn test_auto_falls_back_to_dynamic_for_rgba() {
        let info = ScreenInfo {
            red: Bitfield::new(0, 8),
            green: Bitfield::new(8, 8),
            blue: Bitfield::new(16, 8),
            alpha: Bitfield::new(24, 8),
            ..bgra32_info()
        };
        let (strategy, pixel) =
            encode(EncodingPolicy::Auto, "red", Rgba::opaque(255, 0, 0), &info).unwrap();
        assert_eq!(strategy, Strategy::Dynamic);
        assert_eq!(pixel.value, 0xFF00_00FF);
    }

    #[test]
    fn test_fixed_bgra_ignores_reported_layout() {
        let info = ScreenInfo {
            red: Bitfield::new(0, 8),
            blue: Bitfield::new(16, 8),
            ..bgra32_info()
        };
        let (strategy, pixel) =
            encode(EncodingPolicy::FixedBgra, "red", Rgba::opaque(255, 0, 0), &info).unwrap();
        assert_eq!(strategy, Strategy::FixedBgra32);
        assert_eq!(pixel.value, 0xFFFF_0000);
    }

    #[test]
    fn test_fixed_bgra_rejects_16bpp() {
        assert!(matches!(
            select_strategy(EncodingPolicy::FixedBgra, &rgb565_info()),
            Err(DisplayError::UnsupportedFormat(16))
        ));
    }

    #[test]
    fn test_dual_table_picks_by_depth() {
        assert_eq!(
            select_strategy(EncodingPolicy::DualTable, &rgb565_info()).unwrap(),
            Strategy::Rgb565Table
        );
        assert_eq!(
            select_strategy(EncodingPolicy::DualTable, &bgra32_info()).unwrap(),
            Strategy::FixedBgra32
        );
    }

    #[test]
    fn test_unsupported_depths() {
        for bpp in [0u32, 8, 15, 24, 64] {
            let info = ScreenInfo { bits_per_pixel: bpp, ..bgra32_info() };
            assert!(matches!(
                encode(EncodingPolicy::Dynamic, "red", Rgba::opaque(255, 0, 0), &info),
                Err(DisplayError::UnsupportedFormat(b)) if b == bpp
            ));
        }
    }

    #[test]
    fn test_orange_in_rgb565() {
        let (_, pixel) = encode(
            EncodingPolicy::Dynamic,
            "orange",
            Rgba::opaque(255, 102, 0),
            &rgb565_info(),
        )
        .unwrap();
        assert_eq!(pixel.value, 0xFB20);
        assert_eq!(pixel.to_le_bytes(), vec![0x20, 0xFB]);
    }

    #[test]
    fn test_fill_pattern_repeats_pixel() {
        let pixel = PackedPixel::new(0xFF00_FF00, 32).unwrap();
        let data = fill_pattern(pixel, 4);
        assert_eq!(data.len(), 16);
        for chunk in data.chunks(4) {
            assert_eq!(chunk, &[0x00, 0xFF, 0x00, 0xFF]);
        }
    }

    #[test]
    fn test_16bpp_overflow_is_rejected() {
        assert!(matches!(
            PackedPixel::new(0x1_0000, 16),
            Err(DisplayError::ChannelLayout(_))
        ));
    }
}
