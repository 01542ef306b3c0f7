//! Raw Linux console and framebuffer ioctl bindings.
//!
//! Layouts mirror `linux/kd.h` and `linux/fb.h`. Nothing outside this module
//! touches `unsafe`.

use std::fs::File;
use std::mem;
use std::os::unix::io::AsRawFd;

use nix::libc::{c_int, c_ulong};
use nix::{ioctl_read_bad, ioctl_write_int_bad};

/// Set text/graphics mode of a virtual terminal (see ioctl_console(2)).
pub const KDSETMODE: c_ulong = 0x4B3A;
pub const KD_TEXT: c_int = 0x00;
pub const KD_GRAPHICS: c_int = 0x01;

/// Read `fb_var_screeninfo`.
pub const FBIOGET_VSCREENINFO: c_ulong = 0x4600;

ioctl_write_int_bad!(kd_set_mode, KDSETMODE);
ioctl_read_bad!(read_variable_screen_info, FBIOGET_VSCREENINFO, VarScreenInfo);

/// `struct fb_bitfield`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawBitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

/// `struct fb_var_screeninfo`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct VarScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    pub grayscale: u32,
    pub red: RawBitfield,
    pub green: RawBitfield,
    pub blue: RawBitfield,
    pub transp: RawBitfield,
    pub nonstd: u32,
    pub activate: u32,
    pub height: u32,
    pub width: u32,
    pub accel_flags: u32,
    pub pixclock: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub upper_margin: u32,
    pub lower_margin: u32,
    pub hsync_len: u32,
    pub vsync_len: u32,
    pub sync: u32,
    pub vmode: u32,
    pub rotate: u32,
    pub colorspace: u32,
    pub reserved: [u32; 4],
}

const _: () = assert!(mem::size_of::<VarScreenInfo>() == 160);

/// Issue `KDSETMODE` on an open terminal.
pub fn set_console_mode(tty: &File, mode: c_int) -> nix::Result<()> {
    // SAFETY: the fd is owned by `tty` for the duration of the call and
    // KDSETMODE takes its argument by value.
    unsafe { kd_set_mode(tty.as_raw_fd(), mode) }.map(drop)
}

/// Issue `FBIOGET_VSCREENINFO` on an open framebuffer.
pub fn var_screen_info(fb: &File) -> nix::Result<VarScreenInfo> {
    let mut info = VarScreenInfo::default();
    // SAFETY: `info` is a properly sized and aligned `fb_var_screeninfo`.
    unsafe { read_variable_screen_info(fb.as_raw_fd(), &mut info) }?;
    Ok(info)
}
