use std::{fs, path::Path};

use crate::error::{CrosswalkError, Result};

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("Path exists but is not a directory: {}", path.display()),
            ).into());
        }
    } else {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Error with `NotFound` unless a regular file exists at `path`.
pub(crate) fn require_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(CrosswalkError::NotFound { path: path.to_path_buf() });
    }
    Ok(())
}
