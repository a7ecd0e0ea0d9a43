//! Configuration and network file loading for the CLI
//!
//! This module handles finding and loading the TOML configuration file from
//! various locations (explicit path, local directory, system directory), and
//! reading network descriptions.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use strata::{
    StrataError,
    config::AppConfig,
    network::{LayerKind, LayerSpec},
};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to parse network description {path}: {message}")]
    Network { path: PathBuf, message: String },
}

impl From<ConfigError> for StrataError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Parse(_) => StrataError::invalid_config(err.to_string()),
            ConfigError::MissingFile(_) => {
                StrataError::Io(io::Error::new(io::ErrorKind::NotFound, err.to_string()))
            }
            ConfigError::Network { .. } => {
                StrataError::Io(io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
            }
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (strata/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, StrataError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("strata/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "strata", "strata") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, StrataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

/// On-disk network description.
///
/// ```toml
/// [[layers]]
/// size = 6
/// kind = "input"
///
/// [[layers]]
/// size = 8
/// kind = "conv"
/// stride = 2
/// channels = 32
/// ```
#[derive(Debug, Deserialize)]
struct NetworkFile {
    #[serde(default)]
    layers: Vec<LayerEntry>,
}

/// One `[[layers]]` table as written, before its size is checked.
#[derive(Debug, Deserialize)]
struct LayerEntry {
    size: i64,
    kind: LayerKind,
    #[serde(default = "default_stride")]
    stride: u32,
    #[serde(default)]
    channels: Option<u32>,
}

fn default_stride() -> u32 {
    1
}

impl LayerEntry {
    fn into_spec(self, index: usize) -> Result<LayerSpec, StrataError> {
        let size = usize::try_from(self.size)
            .ok()
            .filter(|&size| size > 0)
            .ok_or(StrataError::InvalidSpec {
                index,
                size: self.size,
            })?;

        let spec = LayerSpec::new(size, self.kind).with_stride(self.stride);
        Ok(match self.channels {
            Some(channels) => spec.with_channels(channels),
            None => spec,
        })
    }
}

/// Load the layers of a network description file
///
/// # Errors
///
/// Returns error if the file doesn't exist, cannot be read, or is not a valid
/// network description. A layer whose size is zero or negative is reported
/// as [`StrataError::InvalidSpec`] with its position in the file.
pub fn load_network(path: impl AsRef<Path>) -> Result<Vec<LayerSpec>, StrataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let network: NetworkFile = toml::from_str(&content).map_err(|e| ConfigError::Network {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let layers = network
        .layers
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_spec(index))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(path = path.display().to_string(), layers = layers.len(); "Network loaded");
    Ok(layers)
}
