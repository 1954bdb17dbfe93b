use promptforge_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("argument parsing error: {0}")]
    ArgParse(String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("unknown pattern '{name}', expected one of: {expected}")]
    UnknownPattern { name: String, expected: String },
}
