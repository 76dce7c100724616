use crate::config::Config;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub mod simulator;
pub mod sources;

pub use simulator::AptGet;
pub use sources::SourcesScanner;

/// Handle on the host's apt installation: the binary to run and the
/// on-disk state it owns.
#[derive(Debug, Clone)]
pub struct AptHandle {
    apt_get: PathBuf,
    lists_dir: PathBuf,
    sources_list: PathBuf,
    sources_parts: PathBuf,
}

impl AptHandle {
    pub fn new<P: AsRef<Path>>(apt_get: P, lists_dir: P) -> Self {
        Self {
            apt_get: apt_get.as_ref().to_path_buf(),
            lists_dir: lists_dir.as_ref().to_path_buf(),
            sources_list: PathBuf::from("/etc/apt/sources.list"),
            sources_parts: PathBuf::from("/etc/apt/sources.list.d"),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.apt_get, &config.lists_dir)
            .with_sources(&config.sources_list, &config.sources_parts)
    }

    pub fn with_sources<P: AsRef<Path>>(mut self, sources_list: P, sources_parts: P) -> Self {
        self.sources_list = sources_list.as_ref().to_path_buf();
        self.sources_parts = sources_parts.as_ref().to_path_buf();
        self
    }

    pub fn apt_get(&self) -> &Path {
        &self.apt_get
    }

    pub fn lists_dir(&self) -> &Path {
        &self.lists_dir
    }

    pub fn sources_list(&self) -> &Path {
        &self.sources_list
    }

    pub fn sources_parts(&self) -> &Path {
        &self.sources_parts
    }
}

/// The package-manager operations the check depends on
pub trait PackageManager {
    /// Refresh the repository index (`apt-get update`). Only used outside simulate mode.
    fn refresh_index(&self) -> Result<()>;

    /// Compute the upgrade without applying it and return the raw transcript.
    fn simulate_upgrade(&self) -> Result<String>;
}
