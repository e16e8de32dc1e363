use anyhow::{Context as AnyhowContext, Result};
use engage_sentiment::ScorerConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ENGAGE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "engage.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngageConfig {
    pub sentiment: ScorerConfig,
}

impl EngageConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(Into::into)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(Into::into)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Into::into)
    }
}

/// Configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: EngageConfig,
    pub path: Option<PathBuf>,
}

/// Resolve the config file: `--config`, then `$ENGAGE_CONFIG`, then
/// `./engage.toml` if present. Explicit paths must exist.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

    let path = match explicit {
        Some(path) => path,
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                log::debug!("no {DEFAULT_CONFIG_FILE} found; using built-in defaults");
                return Ok(LoadedConfig {
                    config: EngageConfig::default(),
                    path: None,
                });
            }
            fallback
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = EngageConfig::from_toml_str(&raw)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());

    Ok(LoadedConfig {
        config,
        path: Some(path),
    })
}

/// Overlay `overrides` on `base`; objects merge key by key, everything else
/// is replaced.
pub fn merge_configs(base: Option<Value>, overrides: Option<Value>) -> Option<Value> {
    match (base, overrides) {
        (None, None) => None,
        (Some(mut base_value), Some(override_value)) => {
            merge_json(&mut base_value, &override_value);
            Some(base_value)
        }
        (Some(base_value), None) => Some(base_value),
        (None, Some(override_value)) => Some(override_value),
    }
}

fn merge_json(base: &mut Value, overlay: &Value) {
    if let Value::Object(overlay_map) = overlay {
        if !base.is_object() {
            *base = Value::Object(Map::new());
        }

        if let Value::Object(base_map) = base {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_json(existing, value);
                    }
                    _ => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
    } else {
        *base = overlay.clone();
    }
}
