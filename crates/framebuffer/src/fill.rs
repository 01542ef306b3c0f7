//! Solid color fill of a framebuffer

use serde::Serialize;

use crate::device::FramebufferDevice;
use crate::encoding::{self, EncodingPolicy, PackedPixel, Strategy};
use crate::error::Result;
use crate::types::{Rgba, ScreenInfo};

/// What a fill wrote, for logging
#[derive(Debug, Clone, Serialize)]
pub struct FillReport {
    pub screen: ScreenInfo,
    pub strategy: Strategy,
    pub pixel: PackedPixel,
    pub bytes_written: usize,
}

/// Query the device layout, encode `color` for it and write it to every
/// pixel in a single write. Nothing is written if encoding fails.
pub fn fill_framebuffer<F: FramebufferDevice>(
    device: &mut F,
    name: &str,
    color: Rgba,
    policy: EncodingPolicy,
) -> Result<FillReport> {
    let screen = device.screen_info()?;
    log::info!(
        "Framebuffer {}x{} @ {} bpp (r {}/{}, g {}/{}, b {}/{}, a {}/{})",
        screen.width,
        screen.height,
        screen.bits_per_pixel,
        screen.red.offset,
        screen.red.length,
        screen.green.offset,
        screen.green.length,
        screen.blue.offset,
        screen.blue.length,
        screen.alpha.offset,
        screen.alpha.length,
    );

    let (strategy, pixel) = encoding::encode(policy, name, color, &screen)?;
    let data = encoding::fill_pattern(pixel, screen.pixel_count());
    device.write_pattern(&data)?;

    Ok(FillReport {
        screen,
        strategy,
        pixel,
        bytes_written: data.len(),
    })
}
