use crate::apt::AptHandle;
use crate::error::{AptCheckError, Result};
use crate::log;
use crate::utils::path_validator::PathValidator;
use std::fs;

/// Empties apt's repository-index cache so the next `apt-get update` repopulates it
pub struct Cleaner<'a> {
    handle: &'a AptHandle,
}

impl<'a> Cleaner<'a> {
    pub fn new(handle: &'a AptHandle) -> Self {
        Self { handle }
    }

    /// Delete every entry inside the lists directory, keeping the directory itself.
    /// Returns how many entries were removed.
    pub fn clean(&self) -> Result<usize> {
        let dir = PathValidator::validate_cache_dir(self.handle.lists_dir())?;
        let entries = fs::read_dir(&dir).map_err(|e| {
            AptCheckError::CleanupFailed(format!("Failed to read '{}': {e}", dir.display()))
        })?;

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| AptCheckError::CleanupFailed(e.to_string()))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| AptCheckError::CleanupFailed(format!("{}: {e}", path.display())))?;

            let result = if file_type.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            result.map_err(|e| {
                AptCheckError::CleanupFailed(format!("Failed to remove '{}': {e}", path.display()))
            })?;

            log::trace(format!("removed {}", path.display()));
            removed += 1;
        }

        Ok(removed)
    }
}
