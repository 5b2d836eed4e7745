// Local configuration: the credential file under ~/.outris and the
// environment variables that steer backend selection.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_DIR_NAME: &str = ".outris";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const API_URL_ENV: &str = "OUTRIS_API_URL";
pub const USE_MOCK_ENV: &str = "OUTRIS_USE_MOCK";
pub const LOG_LEVEL_ENV: &str = "OUTRIS_LOG";

pub const DEFAULT_API_URL: &str = "https://outris-api.railway.app";

/// Contents of ~/.outris/config.json. Every field is optional because signup,
/// login and invitation acceptance each write a different subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl StoredConfig {
    pub fn is_empty(&self) -> bool {
        *self == StoredConfig::default()
    }
}

/// Supplies the API key attached to authenticated requests. Read at call time,
/// so a login in the same process is picked up by the next request.
pub trait CredentialSource {
    fn api_key(&self) -> Option<String>;
}

/// Fixed credential, mostly useful for tests and scripted callers.
impl CredentialSource for Option<String> {
    fn api_key(&self) -> Option<String> {
        self.clone()
    }
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store rooted at ~/.outris/config.json.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        Ok(Self::at(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored config. A missing file is an empty config.
    pub fn load(&self) -> Result<StoredConfig, ConfigError> {
        if !self.path.exists() {
            return Ok(StoredConfig::default());
        }
        let data = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored config, creating the directory if needed.
    pub fn save(&self, config: &StoredConfig) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let data = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_private(&self.path, data.as_bytes()).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored config (logout). Removing a missing file is not an error.
    pub fn clear(&self) -> Result<(), ConfigError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ConfigError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Permission bits for the credential file: owner read/write only.
#[cfg(unix)]
pub const CONFIG_FILE_MODE: u32 = 0o600;

/// Write `data` to `path`, readable only by the owner on Unix. A file left
/// behind with wider permissions is narrowed before it is overwritten.
#[cfg(unix)]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(CONFIG_FILE_MODE)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(CONFIG_FILE_MODE))?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(path, data)
}

impl CredentialSource for ConfigStore {
    fn api_key(&self) -> Option<String> {
        match self.load() {
            Ok(config) => config.api_key,
            Err(e) => {
                warn!("Ignoring unreadable credentials: {e}");
                None
            }
        }
    }
}

/// Snapshot of the environment variables this client reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub api_url: Option<String>,
    pub use_mock: Option<String>,
}

impl EnvSettings {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var(API_URL_ENV).ok(),
            use_mock: std::env::var(USE_MOCK_ENV).ok(),
        }
    }
}

/// Resolve the backend base URL: explicit value, then environment, then default.
/// Trailing slashes are dropped so paths can be appended directly.
pub fn resolve_base_url(explicit: Option<&str>, env_value: Option<&str>) -> String {
    let url = explicit
        .filter(|s| !s.trim().is_empty())
        .or_else(|| env_value.filter(|s| !s.trim().is_empty()))
        .unwrap_or(DEFAULT_API_URL);
    url.trim().trim_end_matches('/').to_string()
}

/// Case-insensitive boolean parse of a flag value. `None` when unrecognised.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
