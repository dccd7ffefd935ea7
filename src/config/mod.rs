use crate::models::Configuration;
use crate::paths::{ExecutableDirError, executable_dir};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use thiserror::Error;

/// File name of the item list, looked up next to the executable
pub const CONFIG_FILENAME: &str = "Config.yaml";

/// Errors that can occur while loading or saving `Config.yaml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("Failed to read config file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Failed to serialize config to YAML")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("Failed to write config file {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to locate config directory")]
    ExecutableDir(#[from] ExecutableDirError),
}

/// Configuration manager for the `Config.yaml` item list.
///
/// Unlike a settings file, there is no default configuration: a missing or malformed
/// file is reported to the caller and nothing is installed.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager reading `Config.yaml` from `config_dir`.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();

        Self {
            config_path: config_dir.join(CONFIG_FILENAME),
            config_dir,
        }
    }

    /// Create a ConfigManager for the directory of the running executable.
    pub fn from_executable_dir() -> Result<Self, ConfigError> {
        Ok(Self::new(executable_dir()?))
    }

    /// Load and parse the item list.
    ///
    /// # Errors
    /// - [`ConfigError::NotFound`] if the file does not exist
    /// - [`ConfigError::Parse`] if the content is not valid YAML of the expected shape
    /// - [`ConfigError::Read`] for any other I/O failure
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        let file_contents = match fs::read_to_string(&self.config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.config_path.clone(),
                    source,
                });
            }
        };

        let config: Configuration =
            serde_yaml_ng::from_str(&file_contents).map_err(|source| ConfigError::Parse {
                path: self.config_path.clone(),
                source,
            })?;

        tracing::info!(
            "Loaded config from {} ({} item(s))",
            self.config_path,
            config.len()
        );
        Ok(config)
    }

    /// Write an item list to `Config.yaml`.
    ///
    /// Authoring helper for producing config files to ship next to the executable. The
    /// installer itself never writes its configuration; a loaded [`Configuration`] stays
    /// as read.
    pub fn save(&self, config: &Configuration) -> Result<(), ConfigError> {
        let yaml_string = serde_yaml_ng::to_string(config).map_err(ConfigError::Serialize)?;

        fs::write(&self.config_path, yaml_string).map_err(|source| ConfigError::Write {
            path: self.config_path.clone(),
            source,
        })?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the full path of `Config.yaml`.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
