//! Directory management.

use std::path::Path;

use crate::error::{Error, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_file() {
        return Err(Error::Config(format!(
            "Output path is a file, not a directory: {}",
            path.display()
        )));
    }
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
