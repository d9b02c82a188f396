//! Shared filesystem helpers for navaudit commands.

use crate::runtime::error::{NavauditError, NavauditResult};
use std::fs;
use std::path::Path;

/// Read a whole text file, mapping failures to an IO error that names the path.
pub fn read_text_file(path: &Path) -> NavauditResult<String> {
    fs::read_to_string(path)
        .map_err(|err| NavauditError::io(format!("failed to read {}: {err}", path.display())))
}

/// Write `contents` to `path`, creating missing parent directories first.
pub fn write_text_file(path: &Path, contents: &str) -> NavauditResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            NavauditError::io(format!("failed to create {}: {err}", parent.display()))
        })?;
    }
    fs::write(path, contents)
        .map_err(|err| NavauditError::io(format!("failed to write {}: {err}", path.display())))
}
