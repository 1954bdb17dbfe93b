use anyhow::Result;
use clap::ArgMatches;
use promptforge_reasoning::{ChainEngine, ChainOfThoughtEngine};
use serde_json::Value;

use super::CommandHandler;
use crate::error::CliError;
use crate::loader::load_chain_input;

/// Validate command handler
pub struct ValidateCommand {
    engine: ChainOfThoughtEngine,
}

impl ValidateCommand {
    pub fn new() -> Self {
        Self {
            engine: ChainOfThoughtEngine::new(),
        }
    }
}

impl Default for ValidateCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for ValidateCommand {
    async fn execute(&self, matches: &ArgMatches) -> Result<Value> {
        let path = matches
            .get_one::<String>("chain")
            .ok_or_else(|| CliError::ArgParse("--chain is required".to_string()))?;
        let chain = load_chain_input(path)?.into_chain();
        let result = self.engine.validate_chain(&chain).await;
        Ok(serde_json::to_value(result)?)
    }
}
