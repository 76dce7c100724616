use crate::error::{AptCheckError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/apt-check.toml";
const DEFAULT_APT_GET: &str = "apt-get";
const DEFAULT_LISTS_DIR: &str = "/var/lib/apt/lists";
const DEFAULT_SOURCES_LIST: &str = "/etc/apt/sources.list";
const DEFAULT_SOURCES_PARTS: &str = "/etc/apt/sources.list.d";

/// Tokens that mark an origin or a sources entry as a security repository.
///
/// `-security` covers Ubuntu suites (`trusty-security`) and Debian origins
/// (`Debian-Security:8/stable`) once compared case-insensitively, `/security`
/// covers Debian's `debian-security` mirror path and `security.` the
/// `security.debian.org` / `security.ubuntu.com` hosts.
pub const DEFAULT_SECURITY_MARKERS: &[&str] = &["-security", "/security", "security."];

/// Runtime configuration, read from an optional TOML file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// apt-get binary, resolved through PATH when not absolute
    pub apt_get: PathBuf,
    /// Repository-index cache emptied by `-c`
    pub lists_dir: PathBuf,
    pub sources_list: PathBuf,
    pub sources_parts: PathBuf,
    pub security_markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apt_get: PathBuf::from(DEFAULT_APT_GET),
            lists_dir: PathBuf::from(DEFAULT_LISTS_DIR),
            sources_list: PathBuf::from(DEFAULT_SOURCES_LIST),
            sources_parts: PathBuf::from(DEFAULT_SOURCES_PARTS),
            security_markers: DEFAULT_SECURITY_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default path is
    /// read only when present; otherwise built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AptCheckError::Config(format!("Failed to read '{}': {e}", path.display()))
        })?;

        Ok(toml::from_str(&content)?)
    }

    fn validate(&self) -> Result<()> {
        if self
            .security_markers
            .iter()
            .all(|marker| marker.trim().is_empty())
        {
            return Err(AptCheckError::Config(
                "security_markers must contain at least one non-empty token".to_string(),
            ));
        }

        if self.apt_get.as_os_str().is_empty() {
            return Err(AptCheckError::Config("apt_get must not be empty".to_string()));
        }

        Ok(())
    }
}
