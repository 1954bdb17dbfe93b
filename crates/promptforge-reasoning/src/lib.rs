//! Reasoning-chain construction, optimization and validation.

pub mod builder;
pub mod engine;
pub mod extractor;
pub mod optimizer;
pub mod patterns;
pub mod profiles;
pub mod render;
pub mod scorer;
pub mod text;
pub mod validator;

pub use engine::{
    generate_chain, generate_chain_report, ChainEngine, ChainOfThoughtEngine, ChainReport,
    ReasoningCapability,
};
pub use optimizer::{
    optimize_steps, optimize_steps_with_report, DependencyCycle, Linearization, OptimizedSteps,
};
pub use patterns::{generate_from_pattern, ReasoningPattern};
pub use profiles::{model_profile, ModelProfile, PreferredStyle};
pub use render::render_chain;
pub use scorer::calculate_effectiveness;
pub use validator::validate_chain;
