/// JSON-backed config store
///
/// Loads and saves the registry as one JSON document. Saves are atomic:
/// the new contents go to a temp file in the same directory, which is
/// then renamed over the target, so no partial state is ever visible.

use crate::error::{EzError, Result};
use crate::store::models::{RawEntry, Registry};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory under the home directory that holds the config file
const CONFIG_DIR_NAME: &str = ".ez-cmd";

/// Config file name inside that directory
const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the config file path
pub const CONFIG_PATH_ENV_VAR: &str = "EZ_CMD_CONFIG_PATH";

/// Handle on the persisted registry file
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the user-scoped default location, honoring the
    /// environment override.
    pub fn new() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV_VAR) {
            return Ok(Self {
                path: PathBuf::from(path),
            });
        }

        let home = dirs::home_dir()
            .ok_or_else(|| EzError::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            path: home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        })
    }

    /// Store at an explicit path. Used by tests.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry, migrating legacy entry shapes. A missing file
    /// is an empty registry; a file that is not valid JSON is an error,
    /// never silently reset.
    pub async fn load(&self) -> Result<Registry> {
        if !self.path.exists() {
            tracing::debug!("no config file at {}, starting empty", self.path.display());
            return Ok(Registry::default());
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(&contents)?;

        let registry = Registry::from_raw(raw);
        tracing::debug!(
            "loaded {} command(s) from {}",
            registry.len(),
            self.path.display()
        );
        Ok(registry)
    }

    /// Persist the whole registry, replacing the previous file atomically
    pub async fn save(&self, registry: &Registry) -> Result<()> {
        let dir = self.path.parent().ok_or_else(|| {
            EzError::Config(format!(
                "Config path '{}' has no parent directory",
                self.path.display()
            ))
        })?;
        tokio::fs::create_dir_all(dir).await?;

        let mut contents = serde_json::to_string_pretty(registry)?;
        contents.push('\n');

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            "saved {} command(s) to {}",
            registry.len(),
            self.path.display()
        );
        Ok(())
    }
}
