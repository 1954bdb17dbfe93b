use crate::error::ConfigError;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use std::fs;
use std::path::Path;

/// Options recognized by the optimization pipeline. Every field is optional;
/// an absent field disables the corresponding pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChainOptimizationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_examples: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<Verbosity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_goal: Option<OptimizationGoal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verbosity {
    Minimal,
    #[default]
    Moderate,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OptimizationGoal {
    Clarity,
    Accuracy,
    Efficiency,
    #[default]
    Balanced,
}

const KNOWN_KEYS: [&str; 6] = [
    "maxSteps",
    "minConfidence",
    "includeExamples",
    "verbosity",
    "targetModel",
    "optimizationGoal",
];

impl ChainOptimizationConfig {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    pub fn with_target_model(mut self, target_model: impl Into<String>) -> Self {
        self.target_model = Some(target_model.into());
        self
    }

    /// Check every present option against its documented domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max_steps) = self.max_steps {
            if max_steps == 0 {
                return Err(ConfigError::invalid_value(
                    "maxSteps",
                    max_steps,
                    "an integer greater than 0",
                ));
            }
        }
        if let Some(min_confidence) = self.min_confidence {
            if !(0.0..=1.0).contains(&min_confidence) {
                return Err(ConfigError::invalid_value(
                    "minConfidence",
                    min_confidence,
                    "a number between 0 and 1",
                ));
            }
        }
        if let Some(target_model) = &self.target_model {
            if target_model.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "targetModel",
                    "",
                    "a non-empty model name",
                ));
            }
        }
        Ok(())
    }
}

/// Serialization formats a configuration file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parse and validate a chain configuration.
pub fn load_chain_config(
    content: &str,
    format: ConfigFormat,
) -> Result<ChainOptimizationConfig, ConfigError> {
    let config: ChainOptimizationConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?,
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?,
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?
        }
    };
    config.validate()?;
    debug!("Loaded chain config: {:?}", config);
    Ok(config)
}

/// Read a configuration file, inferring its format from the extension.
pub fn load_chain_config_file(path: &Path) -> crate::error::Result<ChainOptimizationConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    Ok(load_chain_config(&content, format)?)
}

pub fn parse_key_value_pair(pair: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = pair.splitn(2, '=').collect();
    if parts.len() == 2 {
        Some((parts[0].to_string(), parts[1].to_string()))
    } else {
        None
    }
}

/// `max_steps` and `maxSteps` both name the same option.
fn canonical_key(key: &str) -> String {
    let mut canonical = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.trim().chars() {
        if ch == '_' || ch == '-' {
            upper_next = true;
        } else if upper_next {
            canonical.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            canonical.push(ch);
        }
    }
    canonical
}

/// Apply `KEY=VALUE` overrides on top of a loaded configuration.
///
/// Values are read as JSON when possible and as plain strings otherwise.
/// The merged configuration is validated before it replaces `config`.
pub fn apply_overrides(
    config: &mut ChainOptimizationConfig,
    overrides: &[(String, String)],
) -> Result<(), ConfigError> {
    let mut merged =
        serde_json::to_value(&*config).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
    let Value::Object(fields) = &mut merged else {
        return Err(ConfigError::InvalidFormat(
            "configuration did not serialize to an object".to_string(),
        ));
    };

    for (key, value) in overrides {
        let key = canonical_key(key);
        if !KNOWN_KEYS.contains(&key.as_str()) {
            return Err(ConfigError::UnknownKey(key));
        }
        let value = serde_json::from_str(value).unwrap_or(Value::String(value.clone()));
        fields.insert(key, value);
    }

    let updated: ChainOptimizationConfig =
        serde_json::from_value(merged).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
    updated.validate()?;
    *config = updated;
    Ok(())
}
