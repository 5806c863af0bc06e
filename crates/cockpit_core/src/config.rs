//! Runtime configuration for hosts embedding the engine.
//!
//! # Responsibility
//! - Resolve storage backend, document location and logging settings from
//!   `COCKPIT_*` environment variables.
//! - Open the configured persistence port.
//!
//! # Invariants
//! - Unset variables fall back to build-mode defaults; only malformed
//!   values are rejected.

use crate::logging::{default_log_level, normalize_level};
use crate::store::sqlite::DEFAULT_DOCUMENT_KEY;
use crate::store::{DocumentPort, JsonFilePort, PersistResult, SqlitePort};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_PATH: &str = "COCKPIT_DATA_PATH";
pub const ENV_BACKEND: &str = "COCKPIT_BACKEND";
pub const ENV_DOCUMENT_KEY: &str = "COCKPIT_DOCUMENT_KEY";
pub const ENV_LOG_LEVEL: &str = "COCKPIT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "COCKPIT_LOG_DIR";

const DEFAULT_JSON_FILE: &str = "cockpit.json";
const DEFAULT_SQLITE_FILE: &str = "cockpit.sqlite3";

/// Where the tracking document is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    JsonFile,
    Sqlite,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<StorageBackend> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Some(Self::JsonFile),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }

    fn default_file(self) -> &'static str {
        match self {
            Self::JsonFile => DEFAULT_JSON_FILE,
            Self::Sqlite => DEFAULT_SQLITE_FILE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedBackend(String),
    InvalidLogLevel(String),
    EmptyValue(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBackend(value) => {
                write!(f, "unsupported storage backend `{value}`; expected json|sqlite")
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::EmptyValue(name) => write!(f, "{name} is set but empty"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CockpitConfig {
    pub backend: StorageBackend,
    pub data_path: PathBuf,
    /// Row key inside the SQLite `documents` table.
    pub document_key: String,
    pub log_level: &'static str,
    /// `None` keeps file logging disabled.
    pub log_dir: Option<PathBuf>,
}

impl Default for CockpitConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::JsonFile,
            data_path: PathBuf::from(DEFAULT_JSON_FILE),
            document_key: DEFAULT_DOCUMENT_KEY.to_string(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CockpitConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = non_empty(&lookup, ENV_BACKEND)? {
            config.backend = StorageBackend::parse(&raw)
                .ok_or(ConfigError::UnsupportedBackend(raw))?;
        }

        config.data_path = match non_empty(&lookup, ENV_DATA_PATH)? {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(config.backend.default_file()),
        };

        if let Some(key) = non_empty(&lookup, ENV_DOCUMENT_KEY)? {
            config.document_key = key;
        }

        if let Some(level) = non_empty(&lookup, ENV_LOG_LEVEL)? {
            config.log_level = normalize_level(&level)
                .map_err(|err| ConfigError::InvalidLogLevel(err.to_string()))?;
        }

        config.log_dir = non_empty(&lookup, ENV_LOG_DIR)?.map(PathBuf::from);
        Ok(config)
    }

    /// Opens the persistence port selected by `backend`.
    pub fn open_port(&self) -> PersistResult<Box<dyn DocumentPort>> {
        match self.backend {
            StorageBackend::JsonFile => Ok(Box::new(JsonFilePort::new(self.data_path.clone()))),
            StorageBackend::Sqlite => Ok(Box::new(SqlitePort::open(
                &self.data_path,
                self.document_key.clone(),
            )?)),
        }
    }
}

fn non_empty<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(name)),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CockpitConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CockpitConfig::default());
    }

    #[test]
    fn sqlite_backend_switches_default_file() {
        let config =
            CockpitConfig::from_lookup(lookup_from(&[(ENV_BACKEND, "SQLite")])).unwrap();
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.data_path, PathBuf::from("cockpit.sqlite3"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = CockpitConfig::from_lookup(lookup_from(&[
            (ENV_DATA_PATH, "/var/lib/cockpit/state.json"),
            (ENV_LOG_LEVEL, " Warning "),
            (ENV_LOG_DIR, "/var/log/cockpit"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/var/lib/cockpit/state.json"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/cockpit")));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let backend = CockpitConfig::from_lookup(lookup_from(&[(ENV_BACKEND, "redis")]));
        assert_eq!(
            backend.unwrap_err(),
            ConfigError::UnsupportedBackend("redis".to_string())
        );

        let empty = CockpitConfig::from_lookup(lookup_from(&[(ENV_DATA_PATH, "  ")]));
        assert_eq!(empty.unwrap_err(), ConfigError::EmptyValue(ENV_DATA_PATH));

        let level = CockpitConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")]));
        assert!(matches!(level, Err(ConfigError::InvalidLogLevel(_))));
    }
}
