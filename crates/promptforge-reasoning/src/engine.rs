//! Chain-of-Thought scaffold engine
//!
//! Turns a prompt into an ordered, dependency-linked reasoning chain:
//! goal/context extraction, draft synthesis, the optimization pipeline,
//! effectiveness scoring and an independent validation pass.
//!
//! Everything here is pure and in-memory. The async [`ChainEngine`] facade
//! exists so orchestration code running on an executor can hold the engine
//! behind a trait object; none of its methods ever suspend.

use async_trait::async_trait;
use log::debug;
use promptforge_core::{
    ChainOptimizationConfig, ChainValidationResult, PromptTemplate, ReasoningChain, ReasoningStep,
};
use serde::{Deserialize, Serialize};

use crate::builder::build_initial_steps;
use crate::extractor::extract_goal_and_context;
use crate::optimizer::{optimize_steps_with_report, DependencyCycle, OptimizedSteps};
use crate::patterns::{generate_from_pattern, ReasoningPattern};
use crate::scorer::calculate_effectiveness;
use crate::validator::validate_chain;

/// Capabilities a chain engine can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasoningCapability {
    ChainOfThought,
    StepOptimization,
    ChainValidation,
    ConfidenceScoring,
    PatternGeneration,
    AnalogicalReasoning,
}

/// A generated chain together with what the pipeline noticed on the way
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainReport {
    pub chain: ReasoningChain,
    pub validation: ChainValidationResult,
    pub cycles: Vec<DependencyCycle>,
}

/// Build, optimize, score and validate a chain for `prompt`.
pub fn generate_chain_report(
    prompt: &str,
    template: &PromptTemplate,
    config: &ChainOptimizationConfig,
) -> ChainReport {
    let (goal, context) = extract_goal_and_context(prompt, template);
    debug!("Extracted goal '{}' for template '{}'", goal, template.name);

    let draft = build_initial_steps(prompt, &goal, &context, config);
    debug!("Draft chain has {} steps", draft.len());

    let OptimizedSteps { steps, cycles } = optimize_steps_with_report(draft, config);
    let effectiveness = calculate_effectiveness(&steps, &goal);

    let mut chain = ReasoningChain::new(steps, goal, context);
    chain.effectiveness = effectiveness;

    let validation = validate_chain(&chain);
    chain.validated = validation.valid;
    debug!(
        "Chain ready: {} steps, effectiveness {:.2}, validation score {:.2}",
        chain.len(),
        chain.effectiveness,
        validation.overall_score
    );

    ChainReport {
        chain,
        validation,
        cycles,
    }
}

/// Build, optimize, score and validate a chain for `prompt`.
pub fn generate_chain(
    prompt: &str,
    template: &PromptTemplate,
    config: &ChainOptimizationConfig,
) -> ReasoningChain {
    generate_chain_report(prompt, template, config).chain
}

/// Trait for engines that produce and audit reasoning scaffolds
#[async_trait]
pub trait ChainEngine: Send + Sync {
    async fn generate_chain(
        &self,
        prompt: &str,
        template: &PromptTemplate,
        config: &ChainOptimizationConfig,
    ) -> ReasoningChain;

    async fn optimize_steps(
        &self,
        steps: Vec<ReasoningStep>,
        config: &ChainOptimizationConfig,
    ) -> OptimizedSteps;

    async fn validate_chain(&self, chain: &ReasoningChain) -> ChainValidationResult;

    async fn generate_from_pattern(&self, pattern: ReasoningPattern, text: &str) -> ReasoningChain;

    fn capabilities(&self) -> Vec<ReasoningCapability>;
}

/// Stateless chain-of-thought engine backed by the pure pipeline functions
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainOfThoughtEngine;

impl ChainOfThoughtEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChainEngine for ChainOfThoughtEngine {
    async fn generate_chain(
        &self,
        prompt: &str,
        template: &PromptTemplate,
        config: &ChainOptimizationConfig,
    ) -> ReasoningChain {
        generate_chain(prompt, template, config)
    }

    async fn optimize_steps(
        &self,
        steps: Vec<ReasoningStep>,
        config: &ChainOptimizationConfig,
    ) -> OptimizedSteps {
        optimize_steps_with_report(steps, config)
    }

    async fn validate_chain(&self, chain: &ReasoningChain) -> ChainValidationResult {
        validate_chain(chain)
    }

    async fn generate_from_pattern(&self, pattern: ReasoningPattern, text: &str) -> ReasoningChain {
        generate_from_pattern(pattern, text)
    }

    fn capabilities(&self) -> Vec<ReasoningCapability> {
        vec![
            ReasoningCapability::ChainOfThought,
            ReasoningCapability::StepOptimization,
            ReasoningCapability::ChainValidation,
            ReasoningCapability::ConfidenceScoring,
            ReasoningCapability::PatternGeneration,
            ReasoningCapability::AnalogicalReasoning,
        ]
    }
}
