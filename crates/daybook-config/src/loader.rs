//! Configuration loading with precedence: defaults < file < env
//!
//! Command line overrides are applied by the caller on the returned
//! [`Config`].

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "DAYBOOK_CONFIG";
/// Environment variable overriding `storage.snapshot_path`
pub const SNAPSHOT_ENV: &str = "DAYBOOK_SNAPSHOT";
/// Environment variable overriding `logging.level`
pub const LOG_ENV: &str = "DAYBOOK_LOG";

/// Resolves and loads the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    skip_env: bool,
}

impl ConfigLoader {
    /// Loader using the default path resolution
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit config file path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Do not read environment overrides
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Default config file location: `<config dir>/daybook/config.toml`
    pub fn default_path() -> ConfigResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoPlatformDir("config"))?;
        Ok(dir.join("daybook").join("config.toml"))
    }

    /// Path that [`load`](Self::load) will read
    pub fn resolve_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if !self.skip_env {
            if let Ok(path) = std::env::var(CONFIG_ENV) {
                return Ok(PathBuf::from(path));
            }
        }
        Self::default_path()
    }

    /// Load the config file (defaults if missing), then apply env overrides
    pub fn load(&self) -> ConfigResult<Config> {
        let path = self.resolve_path()?;
        let mut config = Self::load_file(&path)?;
        if !self.skip_env {
            Self::apply_env(&mut config);
            config.validate()?;
        }
        Ok(config)
    }

    /// Load a single file, returning defaults when it does not exist
    pub fn load_file(path: &Path) -> ConfigResult<Config> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded config from {}", path.display());
                Config::from_toml_str(&content, path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Config::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write the commented example config, creating parent directories
    pub fn write_example(path: &Path) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, Config::example()).map_err(io_err)
    }

    fn apply_env(config: &mut Config) {
        if let Ok(path) = std::env::var(SNAPSHOT_ENV) {
            debug!("Snapshot path overridden by {}", SNAPSHOT_ENV);
            config.storage.snapshot_path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var(LOG_ENV) {
            config.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::new()
            .with_path(dir.path().join("absent.toml"))
            .without_env()
            .load()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_values_are_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[storage]\nsnapshot_path = \"/tmp/db.json\"\n[display]\nquery_limit = 4\n",
        )
        .unwrap();

        let config = ConfigLoader::new().with_path(&path).without_env().load().unwrap();
        assert_eq!(config.storage.snapshot_path, PathBuf::from("/tmp/db.json"));
        assert_eq!(config.display.query_limit, 4);
    }

    #[test]
    fn test_write_example_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        ConfigLoader::write_example(&path).unwrap();

        let config = ConfigLoader::new().with_path(&path).without_env().load().unwrap();
        assert_eq!(config.display, crate::DisplayConfig::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let loader = ConfigLoader::new().with_path("/explicit/config.toml");
        assert_eq!(loader.resolve_path().unwrap(), PathBuf::from("/explicit/config.toml"));
    }
}
