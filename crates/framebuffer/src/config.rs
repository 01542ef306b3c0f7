//! Optional TOML configuration for the framebuffer tools
//!
//! ```toml
//! tty = "/dev/tty1"
//! framebuffer = 1
//! encoding = "dual-table"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encoding::EncodingPolicy;
use crate::error::{DisplayError, Result};

pub const DEFAULT_TTY: &str = "/dev/tty0";

/// Defaults applied before command line overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Terminal used for mode switching
    pub tty: PathBuf,
    /// Framebuffer index, i.e. `/dev/fb<N>`
    pub framebuffer: u32,
    /// Pixel encoding strategy
    pub encoding: EncodingPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tty: PathBuf::from(DEFAULT_TTY),
            framebuffer: 0,
            encoding: EncodingPolicy::Auto,
        }
    }
}

impl DisplayConfig {
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| DisplayError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| DisplayError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Replace file values with whatever was given on the command line.
    pub fn with_overrides(
        self,
        tty: Option<PathBuf>,
        framebuffer: Option<u32>,
        encoding: Option<EncodingPolicy>,
    ) -> Self {
        Self {
            tty: tty.unwrap_or(self.tty),
            framebuffer: framebuffer.unwrap_or(self.framebuffer),
            encoding: encoding.unwrap_or(self.encoding),
        }
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(DisplayConfig::from_toml("").unwrap(), DisplayConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = DisplayConfig::from_toml("framebuffer = 1\nencoding = \"dual-table\"\n").unwrap();
        assert_eq!(config.tty, PathBuf::from(DEFAULT_TTY));
        assert_eq!(config.framebuffer, 1);
        assert_eq!(config.encoding, EncodingPolicy::DualTable);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(DisplayConfig::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tty = \"/dev/tty3\"").unwrap();
        let config = DisplayConfig::load(file.path()).unwrap();
        assert_eq!(config.tty, PathBuf::from("/dev/tty3"));
    }

    #[test]
    fn test_command_line_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tty = \"/dev/tty3\"\nframebuffer = 2").unwrap();

        let config = DisplayConfig::load_or_default(Some(file.path()))
            .unwrap()
            .with_overrides(Some(PathBuf::from("/dev/tty5")), None, None);

        assert_eq!(config.tty, PathBuf::from("/dev/tty5"));
        assert_eq!(config.framebuffer, 2);
        assert_eq!(config.encoding, EncodingPolicy::Auto);
    }

    #[test]
    fn test_overrides_without_file() {
        let config = DisplayConfig::load_or_default(None).unwrap().with_overrides(
            None,
            Some(1),
            Some(EncodingPolicy::Dynamic),
        );

        assert_eq!(config.tty, PathBuf::from(DEFAULT_TTY));
        assert_eq!(config.framebuffer, 1);
        assert_eq!(config.encoding, EncodingPolicy::Dynamic);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DisplayConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, DisplayError::Config { .. }));
    }
}
