//! Settings for the registry engine.
//!
//! Loaded from an optional TOML file with an environment-variable overlay on
//! top (`AAS_REGISTRY__` prefix, `__` separator), deserialized into plain
//! structs with hardcoded defaults underneath. The settings drive the
//! startup factory that picks the storage backend and event sink and
//! composes the decorator chain. Plain data, no runtime wiring magic.

#[cfg(test)]
mod config_test;

use std::env;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::pagination::PaginationInfo;
use crate::Error;
use crate::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RegistrySettings {
    /// Storage backend selection and decorator toggles
    #[serde(default)]
    pub storage: StorageConfig,

    /// Event sink selection
    #[serde(default)]
    pub events: EventConfig,

    /// List-endpoint paging defaults
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl RegistrySettings {
    /// Load configuration with priority:
    /// 1. Hardcoded defaults
    /// 2. Explicit config file (when given)
    /// 3. `config/registry` in the working directory (when present)
    /// 4. Environment variables (highest priority)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder();

        if let Some(path) = config_path {
            config = config.add_source(File::with_name(path).required(true));
        } else if let Ok(path) = env::var("AAS_REGISTRY_CONFIG") {
            config = config.add_source(File::with_name(&path).required(true));
        } else {
            config = config.add_source(File::with_name("config/registry").required(false));
        }

        config = config.add_source(
            Environment::with_prefix("AAS_REGISTRY")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Self = config.build()?.try_deserialize().map_err(Error::Config)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.events.validate()?;
        self.pagination.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Which storage implementation backs the registry
    #[serde(default)]
    pub backend: StorageBackend,

    /// Wrap the store in the per-key thread-safety decorator
    #[serde(default = "default_thread_safe")]
    pub thread_safe: bool,

    /// Wrap the store in the deep-copy-on-access decorator (test setups)
    #[serde(default)]
    pub clone_on_access: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            thread_safe: default_thread_safe(),
            clone_on_access: false,
        }
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        // single backend today; durable backends plug in behind the same trait
        match self.backend {
            StorageBackend::InMemory => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    #[default]
    InMemory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EventConfig {
    #[serde(default)]
    pub sink: EventSinkKind,

    /// Bounded handoff capacity towards the bus publisher
    #[serde(default = "default_broker_channel_capacity")]
    pub broker_channel_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            sink: EventSinkKind::default(),
            broker_channel_capacity: default_broker_channel_capacity(),
        }
    }
}

impl EventConfig {
    fn validate(&self) -> Result<()> {
        if self.sink == EventSinkKind::Broker && self.broker_channel_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "events.broker_channel_capacity must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventSinkKind {
    #[default]
    Log,
    Broker,
    None,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationConfig {
    /// Page size applied when a request carries no explicit limit
    #[serde(default = "default_page_limit")]
    pub default_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_page_limit(),
        }
    }
}

impl PaginationConfig {
    fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(Error::Config(ConfigError::Message(
                "pagination.default_limit must be greater than 0".into(),
            )));
        }
        Ok(())
    }

    /// First-page request window with the configured default limit.
    pub fn default_page(&self) -> PaginationInfo {
        PaginationInfo::first_page(self.default_limit)
    }
}

fn default_thread_safe() -> bool {
    true
}

fn default_broker_channel_capacity() -> usize {
    1024
}

fn default_page_limit() -> usize {
    100
}
