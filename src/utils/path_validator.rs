use crate::error::{AptCheckError, Result};
use std::path::{Path, PathBuf};

/// Directories whose contents must never be wiped wholesale.
const PROTECTED: &[&str] = &[
    "/", "/bin", "/boot", "/etc", "/home", "/lib", "/opt", "/root", "/sbin", "/tmp", "/usr",
    "/var", "/var/lib", "/var/cache",
];

/// Trees that are off limits entirely.
const FORBIDDEN_TREES: &[&str] = &["/proc", "/sys", "/dev"];

/// Checks a directory before its contents get deleted.
pub struct PathValidator;

impl PathValidator {
    /// Validates and canonicalises the cache directory the cleaner is about to empty.
    pub fn validate_cache_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            AptCheckError::CleanupFailed(format!("Invalid cache directory '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(AptCheckError::CleanupFailed(format!(
                "'{}' is not a directory",
                canonical.display()
            )));
        }

        if PROTECTED.iter().any(|p| canonical == Path::new(p)) {
            return Err(AptCheckError::CleanupFailed(format!(
                "Refusing to empty system directory '{}'",
                canonical.display()
            )));
        }

        for forbidden in FORBIDDEN_TREES {
            if canonical.starts_with(forbidden) {
                return Err(AptCheckError::CleanupFailed(format!(
                    "Access to system directory '{}' is not allowed",
                    forbidden
                )));
            }
        }

        Ok(canonical)
    }
}
