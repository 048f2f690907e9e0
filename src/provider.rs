// src/provider.rs
//! Registration of the package settings into a host configuration repository
//! and publishing of the default configuration file.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{ConfigOverrides, SharpApiConfig, CONFIG_NAMESPACE};
use crate::error::{Result, SharpApiError};

/// Default configuration artifact shipped with the package
pub const DEFAULT_CONFIG_FILE: &str = include_str!("../config/sharpapi-hr-related-job-positions.yaml");

pub const PUBLISHED_FILE_NAME: &str = "sharpapi-hr-related-job-positions.yaml";

/// Namespaced key/value settings store owned by the hosting application.
/// Each namespace holds a flat JSON object of settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigRepository {
    groups: BTreeMap<String, Map<String, Value>>,
}

impl ConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single value, e.g. `set("sharpapi-hr-related-job-positions", "api_key", ..)`
    pub fn set(&mut self, namespace: &str, key: &str, value: impl Into<Value>) {
        self.groups
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<&Value> {
        self.groups.get(namespace).and_then(|group| group.get(key))
    }

    pub fn group(&self, namespace: &str) -> Option<&Map<String, Value>> {
        self.groups.get(namespace)
    }

    /// Merge `defaults` beneath whatever the namespace already holds.
    /// Existing keys are kept as-is, missing ones are filled in.
    pub fn merge_defaults(&mut self, namespace: &str, defaults: Map<String, Value>) {
        let group = self.groups.entry(namespace.to_string()).or_default();
        for (key, value) in defaults {
            group.entry(key).or_insert(value);
        }
    }
}

/// Wires the package into a host application: `register` at startup,
/// `publish` from a console command.
#[derive(Debug, Clone, Default)]
pub struct HrRelatedJobPositionsProvider;

impl HrRelatedJobPositionsProvider {
    pub fn new() -> Self {
        Self
    }

    /// Merge the package defaults beneath any user-supplied values
    pub fn register(&self, repository: &mut ConfigRepository) -> Result<()> {
        let defaults = Self::default_settings()?;
        debug!(
            "Registering {} default settings under '{}'",
            defaults.len(),
            CONFIG_NAMESPACE
        );
        repository.merge_defaults(CONFIG_NAMESPACE, defaults);
        Ok(())
    }

    /// Build a client configuration from the repository namespace
    pub fn resolve_config(&self, repository: &ConfigRepository) -> Result<SharpApiConfig> {
        let group = repository
            .group(CONFIG_NAMESPACE)
            .cloned()
            .unwrap_or_default();

        let overrides: ConfigOverrides =
            serde_json::from_value(Value::Object(group)).map_err(|e| {
                SharpApiError::Configuration(format!(
                    "Invalid '{}' settings: {}",
                    CONFIG_NAMESPACE, e
                ))
            })?;

        overrides.resolve()
    }

    /// Copy the default configuration file into `target_dir`.
    /// Returns the written path, or `None` when a file already exists and
    /// `force` is not set.
    pub fn publish(&self, target_dir: &Path, force: bool) -> Result<Option<PathBuf>> {
        let target = target_dir.join(PUBLISHED_FILE_NAME);

        if target.exists() && !force {
            info!(
                "Configuration already published at {}, skipping",
                target.display()
            );
            return Ok(None);
        }

        std::fs::create_dir_all(target_dir)?;
        std::fs::write(&target, DEFAULT_CONFIG_FILE)?;

        info!("Published configuration to {}", target.display());
        Ok(Some(target))
    }

    fn default_settings() -> Result<Map<String, Value>> {
        let defaults = ConfigOverrides::defaults().layer(ConfigOverrides::from_yaml_str(
            DEFAULT_CONFIG_FILE,
        )?);

        match serde_json::to_value(defaults) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(SharpApiError::Configuration(format!(
                "Default settings are not a map: {}",
                other
            ))),
            Err(e) => Err(SharpApiError::Configuration(format!(
                "Failed to serialize default settings: {}",
                e
            ))),
        }
    }
}
