use anyhow::Result;
use clap::ArgMatches;
use log::info;
use promptforge_core::{ChainValidationResult, ReasoningChain};
use promptforge_reasoning::{generate_chain_report, render_chain, ChainReport, DependencyCycle};
use serde::Serialize;
use serde_json::Value;

use super::CommandHandler;
use crate::loader::{load_config, load_template, read_prompt};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateOutput {
    chain: ReasoningChain,
    reasoning: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<ChainValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycles: Option<Vec<DependencyCycle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
}

impl GenerateOutput {
    /// Cycles are listed whenever ordering met one, and always with validation.
    fn new(report: ChainReport, with_validation: bool, render: bool) -> Self {
        let ChainReport {
            chain,
            validation,
            cycles,
        } = report;
        let show_cycles = with_validation || !cycles.is_empty();
        Self {
            reasoning: chain.reasoning_lines(),
            rendered: render.then(|| render_chain(&chain)),
            validation: with_validation.then_some(validation),
            cycles: show_cycles.then_some(cycles),
            chain,
        }
    }
}

/// Generate command handler
pub struct GenerateCommand;

impl GenerateCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenerateCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for GenerateCommand {
    async fn execute(&self, matches: &ArgMatches) -> Result<Value> {
        let prompt = read_prompt(matches)?;
        let template = load_template(matches)?;
        let config = load_config(matches)?;

        let report = generate_chain_report(&prompt, &template, &config);
        info!(
            "Generated {} steps with effectiveness {:.2}",
            report.chain.len(),
            report.chain.effectiveness
        );

        let output = GenerateOutput::new(
            report,
            matches.get_flag("with_validation"),
            matches.get_flag("render"),
        );
        Ok(serde_json::to_value(output)?)
    }
}
