use anyhow::Result;
use clap::ArgMatches;
use promptforge_reasoning::{ChainEngine, ChainOfThoughtEngine, ReasoningPattern};
use serde_json::Value;
use strum::IntoEnumIterator;

use super::CommandHandler;
use crate::error::CliError;

/// Pattern command handler
pub struct PatternCommand {
    engine: ChainOfThoughtEngine,
}

impl PatternCommand {
    pub fn new() -> Self {
        Self {
            engine: ChainOfThoughtEngine::new(),
        }
    }

    fn parse_pattern(name: &str) -> Result<ReasoningPattern, CliError> {
        name.trim()
            .parse::<ReasoningPattern>()
            .map_err(|_| CliError::UnknownPattern {
                name: name.to_string(),
                expected: ReasoningPattern::iter()
                    .map(|pattern| pattern.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl Default for PatternCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for PatternCommand {
    async fn execute(&self, matches: &ArgMatches) -> Result<Value> {
        let name = matches
            .get_one::<String>("name")
            .ok_or_else(|| CliError::ArgParse("pattern name is required".to_string()))?;
        let text = matches
            .get_one::<String>("text")
            .ok_or_else(|| CliError::ArgParse("pattern text is required".to_string()))?;

        let pattern = Self::parse_pattern(name)?;
        let chain = self.engine.generate_from_pattern(pattern, text).await;
        Ok(serde_json::to_value(chain)?)
    }
}
