use anyhow::Result;
use clap::ArgMatches;
use log::info;
use promptforge_reasoning::{ChainEngine, ChainOfThoughtEngine};
use serde_json::Value;

use super::CommandHandler;
use crate::error::CliError;
use crate::loader::{load_chain_input, load_config};

/// Optimize command handler
pub struct OptimizeCommand {
    engine: ChainOfThoughtEngine,
}

impl OptimizeCommand {
    pub fn new() -> Self {
        Self {
            engine: ChainOfThoughtEngine::new(),
        }
    }
}

impl Default for OptimizeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for OptimizeCommand {
    async fn execute(&self, matches: &ArgMatches) -> Result<Value> {
        let path = matches
            .get_one::<String>("chain")
            .ok_or_else(|| CliError::ArgParse("--chain is required".to_string()))?;
        let steps = load_chain_input(path)?.into_steps();
        let config = load_config(matches)?;

        let before = steps.len();
        let optimized = self.engine.optimize_steps(steps, &config).await;
        info!("Optimized {} steps down to {}", before, optimized.steps.len());

        Ok(serde_json::to_value(optimized)?)
    }
}
