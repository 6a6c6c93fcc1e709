//! Configuration schema for reelshelf.

use serde::{Deserialize, Serialize};

/// Root config.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ReelshelfConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ids: IdsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl ReelshelfConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ReelshelfConfigBuilder {
        ReelshelfConfigBuilder::new()
    }

    /// Collection endpoint, e.g. `http://localhost:3000/movies`.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            self.api.collection.trim_matches('/')
        )
    }
}

/// Builder for assembling a `ReelshelfConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ReelshelfConfigBuilder {
    config: ReelshelfConfig,
}

impl ReelshelfConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ReelshelfConfig::default(),
        }
    }

    /// Replace the API endpoint configuration.
    pub fn api(mut self, api: ApiConfig) -> Self {
        self.config.api = api;
        self
    }

    /// Override only the service base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api.base_url = base_url.into();
        self
    }

    /// Replace the id assignment configuration.
    pub fn ids(mut self, ids: IdsConfig) -> Self {
        self.config.ids = ids;
        self
    }

    /// Replace the terminal UI configuration.
    pub fn ui(mut self, ui: UiConfig) -> Self {
        self.config.ui = ui;
        self
    }

    /// Finalize and return the built `ReelshelfConfig`.
    pub fn build(self) -> ReelshelfConfig {
        self.config
    }
}

/// Remote collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Request timeout; unset leaves it to the transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection: default_collection(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_collection() -> String {
    "movies".to_string()
}

/// Who assigns ids to new records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Client derives the id from the current time in milliseconds.
    #[default]
    Client,
    /// The id is left out of the create request.
    Server,
}

/// Id assignment configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IdsConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}
