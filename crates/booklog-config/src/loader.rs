//! Configuration loading utilities

use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "BOOKLOG_CONFIG_PATH";

/// Files looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["booklog.yaml", "booklog.yml", "booklog.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse_str(&content, format)?;
        info!(path = %path.display(), "Loaded configuration file");

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Locate and load the configuration.
    ///
    /// Uses `BOOKLOG_CONFIG_PATH` when set, otherwise the first default file
    /// found in the working directory, otherwise defaults plus environment.
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            return Self::load_config(config_path);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration text without overrides or validation.
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        })
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("NOTION_TOKEN") {
            config.notion.token = token;
        }

        if let Some(database_id) = lookup("NOTION_DATABASE_ID") {
            config.notion.database_id = database_id;
        }

        if let Some(graphic) = lookup("BOOKLOG_OUTPUT_GRAPHIC") {
            config.output.graphic = PathBuf::from(graphic);
        }

        if let Some(table) = lookup("BOOKLOG_OUTPUT_TABLE") {
            config.output.table = PathBuf::from(table);
        }

        if let Some(level) = lookup("BOOKLOG_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(window) = lookup("BOOKLOG_ROLLING_WINDOW") {
            config.chart.rolling_window =
                window
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::EnvParseError {
                        var: "BOOKLOG_ROLLING_WINDOW".to_string(),
                        source: Box::new(e),
                    })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("booklog")), None);
    }

    #[test]
    fn test_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("NOTION_TOKEN", "secret_env"),
            ("NOTION_DATABASE_ID", "db_env"),
            ("BOOKLOG_OUTPUT_TABLE", "out/books.md"),
            ("BOOKLOG_ROLLING_WINDOW", " 14 "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        ConfigLoader::apply_overrides(&mut config, |var| vars.get(var).map(|v| (*v).to_string())).unwrap();

        assert_eq!(config.notion.token, "secret_env");
        assert_eq!(config.notion.database_id, "db_env");
        assert_eq!(config.output.table, PathBuf::from("out/books.md"));
        assert_eq!(config.chart.rolling_window, 14);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unparsable_override_is_rejected() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides(&mut config, |var| {
            (var == "BOOKLOG_ROLLING_WINDOW").then(|| "weekly".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::EnvParseError { ref var, .. } if var == "BOOKLOG_ROLLING_WINDOW"));
    }
}
