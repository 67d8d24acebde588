//! TOML configuration: the host-native protocol version and overlay toggles.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CompatError, CompatResult};
use crate::toggles::OverlayToggles;
use crate::version::VersionHandle;

/// Protocol version the host speaks natively, reported when the protocol
/// subsystem is unavailable.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct HostVersion {
    pub name: String,
    pub id: i32,
}

impl Default for HostVersion {
    fn default() -> Self {
        // 1.20.3 and 1.20.4 share protocol 765.
        Self {
            name: "1.20.4".to_string(),
            id: 765,
        }
    }
}

impl HostVersion {
    pub fn handle(&self) -> VersionHandle {
        VersionHandle::new(self.name.clone(), self.id)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CompatConfig {
    pub host_version: HostVersion,
    pub overlay: OverlayToggles,
}

impl CompatConfig {
    pub fn from_toml(raw: &str) -> CompatResult<Self> {
        toml::from_str(raw).map_err(|err| CompatError::Config(err.to_string()))
    }

    pub fn to_toml(&self) -> CompatResult<String> {
        toml::to_string_pretty(self).map_err(|err| CompatError::Config(err.to_string()))
    }

    /// Loads the config at `path`, or defaults when the file does not exist.
    pub fn load_from(path: &Path) -> CompatResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn save_to(&self, path: &Path) -> CompatResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "protocol_compat", "protocol_compat")
            .map(|dirs| dirs.config_dir().join("compat.toml"))
            .unwrap_or_else(|| PathBuf::from("compat.toml"))
    }
}
