use thiserror::Error;

/// Errors raised at the edges of the system: loading and validating
/// configuration, templates and serialized chains.
///
/// The reasoning engine itself never returns these; malformed chains are
/// reported through validation results instead.
#[derive(Debug, Error)]
pub enum PromptForgeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A recognized option carries a value outside its domain
    #[error("invalid value '{value}' for '{parameter}', expected {expected}")]
    InvalidValue {
        parameter: String,
        value: String,
        expected: String,
    },

    /// An override named an option that does not exist
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// The configuration text could not be parsed
    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    /// The file extension does not map to a supported format
    #[error("unsupported configuration format '{0}'")]
    UnsupportedFormat(String),
}

impl ConfigError {
    pub fn invalid_value(
        parameter: impl Into<String>,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            parameter: parameter.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PromptForgeError>;
