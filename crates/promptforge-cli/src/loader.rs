//! Reading prompts, templates, configuration and chains from disk.

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::debug;
use promptforge_core::config::{apply_overrides, load_chain_config_file, parse_key_value_pair};
use promptforge_core::error::Result as ForgeResult;
use promptforge_core::{ChainOptimizationConfig, PromptTemplate, ReasoningChain, ReasoningStep};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Chain files hold either a full chain or a bare list of steps.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChainInput {
    Chain(ReasoningChain),
    Steps(Vec<ReasoningStep>),
}

impl ChainInput {
    pub fn into_chain(self) -> ReasoningChain {
        match self {
            ChainInput::Chain(chain) => chain,
            ChainInput::Steps(steps) => ReasoningChain::new(steps, "", ""),
        }
    }

    pub fn into_steps(self) -> Vec<ReasoningStep> {
        match self {
            ChainInput::Chain(chain) => chain.steps,
            ChainInput::Steps(steps) => steps,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// `.json` files are read as JSON, anything else as YAML.
fn parse_structured<T: DeserializeOwned>(path: &Path, content: &str) -> ForgeResult<T> {
    if is_json(path) {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    parse_structured(path, &content)
        .with_context(|| format!("Failed to parse '{}'", path.display()))
}

/// The prompt passed inline with `--prompt` or read from `--prompt-file`.
pub fn read_prompt(matches: &ArgMatches) -> Result<String> {
    if let Some(prompt) = matches.get_one::<String>("prompt") {
        return Ok(prompt.clone());
    }
    match matches.get_one::<String>("prompt_file") {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file '{}'", path)),
        None => Err(CliError::ArgParse(
            "either --prompt or --prompt-file is required".to_string(),
        )
        .into()),
    }
}

pub fn load_template(matches: &ArgMatches) -> Result<PromptTemplate> {
    match matches.get_one::<String>("template") {
        Some(path) => read_structured(Path::new(path)),
        None => Ok(PromptTemplate::default()),
    }
}

/// Collect `-o KEY=VALUE` pairs.
pub fn parse_overrides(matches: &ArgMatches) -> Result<Vec<(String, String)>> {
    let Some(raw) = matches.get_many::<String>("override") else {
        return Ok(Vec::new());
    };
    raw.map(|pair| {
        parse_key_value_pair(pair).ok_or_else(|| {
            anyhow::Error::from(CliError::ArgParse(format!(
                "invalid override '{}', expected KEY=VALUE",
                pair
            )))
        })
    })
    .collect()
}

/// Config file (if any) with command-line overrides applied on top.
pub fn load_config(matches: &ArgMatches) -> Result<ChainOptimizationConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => load_chain_config_file(Path::new(path))?,
        None => ChainOptimizationConfig::default(),
    };

    let overrides = parse_overrides(matches)?;
    if !overrides.is_empty() {
        apply_overrides(&mut config, &overrides).map_err(CliError::from)?;
    }
    debug!("Effective chain config: {:?}", config);
    Ok(config)
}

pub fn load_chain_input(path: &str) -> Result<ChainInput> {
    read_structured(Path::new(path))
}
