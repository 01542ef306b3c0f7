//! Device abstraction for terminals and framebuffers.
//!
//! Higher layers only see [`ConsoleDevice`], [`FramebufferDevice`] and the
//! [`DeviceProvider`] that opens them, so color resolution and argument
//! handling can run against in-memory fakes. The Linux implementations sit
//! on top of [`crate::sys`].

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

use crate::error::{DisplayError, Result};
use crate::sys;
use crate::types::{ConsoleMode, ScreenInfo};

/// A virtual terminal whose display mode can be switched
pub trait ConsoleDevice {
    fn set_mode(&mut self, mode: ConsoleMode) -> Result<()>;
}

/// A framebuffer that reports its layout and accepts raw pixel data
pub trait FramebufferDevice {
    fn screen_info(&mut self) -> Result<ScreenInfo>;

    /// Write the whole buffer in one call, starting at offset 0.
    fn write_pattern(&mut self, data: &[u8]) -> Result<()>;
}

/// Opens devices by path (terminals) or index (framebuffers)
pub trait DeviceProvider {
    type Console: ConsoleDevice;
    type Framebuffer: FramebufferDevice;

    fn open_console(&self, path: &Path) -> Result<Self::Console>;
    fn open_framebuffer(&self, index: u32) -> Result<Self::Framebuffer>;
}

/// Conventional device node for framebuffer `index`.
pub fn framebuffer_path(index: u32) -> PathBuf {
    PathBuf::from(format!("/dev/fb{index}"))
}

/// True when `path` exists and is a character special file.
pub fn is_char_device(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.file_type().is_char_device())
        .unwrap_or(false)
}

/// Terminal opened read-only for `KDSETMODE`
#[derive(Debug)]
pub struct LinuxConsole {
    path: PathBuf,
    file: File,
}

impl LinuxConsole {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::open(&path).map_err(|source| DisplayError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, file })
    }
}

impl ConsoleDevice for LinuxConsole {
    fn set_mode(&mut self, mode: ConsoleMode) -> Result<()> {
        log::info!("Setting {} to {} mode", self.path.display(), mode);
        sys::set_console_mode(&self.file, mode.kd_value()).map_err(|source| {
            DisplayError::Ioctl {
                request: "KDSETMODE",
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Framebuffer device node opened read-write
#[derive(Debug)]
pub struct LinuxFramebuffer {
    path: PathBuf,
    file: File,
}

impl LinuxFramebuffer {
    /// Open a framebuffer node. Anything that is not a character device is
    /// refused before `open`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !is_char_device(&path) {
            return Err(DisplayError::NotCharDevice(path));
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| DisplayError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FramebufferDevice for LinuxFramebuffer {
    fn screen_info(&mut self) -> Result<ScreenInfo> {
        let raw = sys::var_screen_info(&self.file).map_err(|source| DisplayError::Ioctl {
            request: "FBIOGET_VSCREENINFO",
            path: self.path.clone(),
            source,
        })?;
        Ok(ScreenInfo::from(raw))
    }

    fn write_pattern(&mut self, data: &[u8]) -> Result<()> {
        let written = self.file.write(data).map_err(|source| DisplayError::Write {
            path: self.path.clone(),
            source,
        })?;
        if written != data.len() {
            return Err(DisplayError::ShortWrite {
                path: self.path.clone(),
                written,
                expected: data.len(),
            });
        }
        Ok(())
    }
}

/// Real devices under `/dev`
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxDevices;

impl DeviceProvider for LinuxDevices {
    type Console = LinuxConsole;
    type Framebuffer = LinuxFramebuffer;

    fn open_console(&self, path: &Path) -> Result<LinuxConsole> {
        LinuxConsole::open(path)
    }

    fn open_framebuffer(&self, index: u32) -> Result<LinuxFramebuffer> {
        LinuxFramebuffer::open(framebuffer_path(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_path() {
        assert_eq!(framebuffer_path(0), PathBuf::from("/dev/fb0"));
        assert_eq!(framebuffer_path(3), PathBuf::from("/dev/fb3"));
    }

    #[test]
    fn test_regular_file_is_not_a_framebuffer() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!is_char_device(file.path()));
        assert!(matches!(
            LinuxFramebuffer::open(file.path()),
            Err(DisplayError::NotCharDevice(p)) if p == file.path()
        ));
    }

    #[test]
    fn test_missing_path_is_not_a_framebuffer() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("fb9");
        assert!(matches!(
            LinuxFramebuffer::open(&missing),
            Err(DisplayError::NotCharDevice(_))
        ));
    }

    #[test]
    fn test_dev_null_is_a_char_device() {
        assert!(is_char_device(Path::new("/dev/null")));
    }
}
