//! Layered configuration loader.
//!
//! Layers are read lowest precedence first (user, project, cwd, then any
//! explicit runtime paths), each checked against the schema on its own so an
//! error names the file it came from. The merged value is decoded and
//! validated once at the end.

mod merge;
mod schema;
mod sources;


use crate::{ConfigError, ReelshelfConfig};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Merged config and the layers it was built from.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: ReelshelfConfig,
    /// Contributing layers, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
}

/// Where a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// `~/.reelshelf/reelshelf.json5`.
    User,
    /// `reelshelf.json5` at the project root.
    Project,
    /// `reelshelf.json5` in the working directory.
    Cwd,
    /// Explicit path, e.g. `--config`.
    Runtime,
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Layer locations for a load.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    pub cwd: PathBuf,
    /// User layer path; `None` skips the user layer.
    pub user_config_path: Option<PathBuf>,
    /// Explicit layers applied last, in order. Each must exist.
    pub runtime_paths: Vec<PathBuf>,
    /// Entries whose presence marks a directory as the project root.
    pub project_root_markers: Vec<String>,
}

impl LayeredConfigOptions {
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: sources::user_config_path(),
            runtime_paths: Vec::new(),
            project_root_markers: vec![".git".to_string()],
        }
    }

    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl ReelshelfConfig {
    /// Load one file with no layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config (path={})", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode_source(&contents, &path.display().to_string())
    }

    /// Parse JSON5 text with no layering.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        Self::decode_source(contents, "config")
    }

    /// Load with the default layer locations for `cwd`.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load, merge and validate every layer `options` describes.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = sources::resolve_cwd(&options.cwd)?;
        let mut merged = Value::Object(serde_json::Map::new());
        let mut layers = Vec::new();
        for location in sources::layer_locations(&options, &cwd) {
            let Some(layer) = sources::read_layer(&location)? else {
                continue;
            };
            merge::merge_json_values(&mut merged, &layer.value);
            layers.push(layer.meta);
        }
        let config = Self::decode_value(merged, "effective")?;
        info!(
            "config loaded (layers={}, endpoint={})",
            layers.len(),
            config.collection_url()
        );
        Ok(LayeredConfig { config, layers })
    }

    /// Check constraints the schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(invalid("api.base_url", "cannot be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid("api.base_url", "must start with http:// or https://"));
        }
        if self.api.collection.trim_matches('/').is_empty() {
            return Err(invalid("api.collection", "cannot be empty"));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui.tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn decode_source(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        debug!("parsing config (origin={origin}, len={})", contents.len());
        let value: Value = json5::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::decode_value(value, origin)
    }

    fn decode_value(value: Value, origin: &str) -> Result<Self, ConfigError> {
        schema::validate_layer_schema(&value, origin)?;
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(path: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_string(),
        message: message.to_string(),
    }
}
