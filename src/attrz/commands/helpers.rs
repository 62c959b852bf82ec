use crate::error::{AttrError, Result};
use std::path::{Path, PathBuf};

/// Makes a user-supplied target absolute against the current directory.
///
/// Lexical only: `.` components are dropped, symlinks are not resolved, so a
/// link keeps its own name when deriving the attribute directory.
pub fn absolute_target(target: &Path) -> Result<PathBuf> {
    if target.as_os_str().is_empty() {
        return Err(AttrError::invalid("target path is empty"));
    }
    std::path::absolute(target).map_err(AttrError::Io)
}

/// Lossy text rendering of a stored value.
pub fn display_value(value: &[u8]) -> String {
    String::from_utf8_lossy(value).into_owned()
}
