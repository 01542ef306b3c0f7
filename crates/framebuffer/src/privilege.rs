//! Root privilege check

use crate::error::{DisplayError, Result};

/// Fail unless the effective user is root.
pub fn ensure_root() -> Result<()> {
    if nix::unistd::geteuid().is_root() {
        Ok(())
    } else {
        Err(DisplayError::PermissionDenied)
    }
}
