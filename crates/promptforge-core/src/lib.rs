pub mod config;
pub mod error;
pub mod types;

pub use config::{ChainOptimizationConfig, ConfigFormat, OptimizationGoal, Verbosity};
pub use error::{ConfigError, PromptForgeError};
pub use types::{
    ChainValidationResult, IssueType, PromptTemplate, ReasoningChain, ReasoningStep, Severity,
    StepMetadata, StepType, ValidationIssue,
};
