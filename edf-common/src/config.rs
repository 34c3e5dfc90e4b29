//! Configuration loading and source directory resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the EDF source directory
pub const SOURCE_DIR_ENV: &str = "EDF_SOURCE_DIR";

/// Compiled fallback when no source directory is configured anywhere
const DEFAULT_SOURCE_DIR: &str = "data/edf";

/// Service configuration loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Directory containing the EDF recordings
    pub source_dir: Option<PathBuf>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5780,
        }
    }
}

/// CORS settings applied to the `/api` routes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API (the dev frontend by default)
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
            allow_credentials: false,
        }
    }
}

impl TomlConfig {
    /// Load configuration following the lookup order:
    /// 1. Explicit path (must exist, otherwise an error)
    /// 2. ./edf-processor.toml
    /// 3. Platform config directory (e.g. ~/.config/edf-processor/config.toml)
    /// 4. Built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<TomlConfig> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::read_file(path);
        }

        let local = PathBuf::from("edf-processor.toml");
        if local.exists() {
            return Self::read_file(&local);
        }

        if let Some(dir) = dirs::config_dir() {
            let path = dir.join("edf-processor").join("config.toml");
            if path.exists() {
                return Self::read_file(&path);
            }
        }

        Ok(TomlConfig::default())
    }

    fn read_file(path: &Path) -> Result<TomlConfig> {
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// Resolve the EDF source directory following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. `EDF_SOURCE_DIR` environment variable
/// 3. TOML config file
/// 4. Compiled default (`data/edf`)
pub fn resolve_source_dir(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(SOURCE_DIR_ENV) {
        return PathBuf::from(path);
    }

    if let Some(path) = &config.source_dir {
        return path.clone();
    }

    PathBuf::from(DEFAULT_SOURCE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = TomlConfig::load(Some(Path::new("/nonexistent/edf-processor.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn config_file_with_missing_sections_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "source_dir = \"/srv/edf\"\n").unwrap();

        let config = TomlConfig::load(Some(&path)).unwrap();
        assert_eq!(config.source_dir, Some(PathBuf::from("/srv/edf")));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5780);
        assert!(!config.cors.allow_credentials);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "source_dir = [broken\n").unwrap();

        let result = TomlConfig::load(Some(&path));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    #[serial]
    fn cli_argument_wins_over_env_and_config() {
        std::env::set_var(SOURCE_DIR_ENV, "/from/env");
        let config = TomlConfig {
            source_dir: Some(PathBuf::from("/from/toml")),
            ..TomlConfig::default()
        };

        let resolved = resolve_source_dir(Some(Path::new("/from/cli")), &config);
        assert_eq!(resolved, PathBuf::from("/from/cli"));

        std::env::remove_var(SOURCE_DIR_ENV);
    }

    #[test]
    #[serial]
    fn env_wins_over_config_file() {
        std::env::set_var(SOURCE_DIR_ENV, "/from/env");
        let config = TomlConfig {
            source_dir: Some(PathBuf::from("/from/toml")),
            ..TomlConfig::default()
        };

        let resolved = resolve_source_dir(None, &config);
        assert_eq!(resolved, PathBuf::from("/from/env"));

        std::env::remove_var(SOURCE_DIR_ENV);
    }

    #[test]
    #[serial]
    fn falls_back_to_compiled_default() {
        std::env::remove_var(SOURCE_DIR_ENV);
        let resolved = resolve_source_dir(None, &TomlConfig::default());
        assert_eq!(resolved, PathBuf::from("data/edf"));
    }
}
