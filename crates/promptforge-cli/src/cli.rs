use anyhow::Result;
use clap::ArgMatches;
use log::debug;
use serde_json::Value;

use crate::cli_builder::build_cli;
use crate::commands::{
    CommandHandler, GenerateCommand, ModelsCommand, OptimizeCommand, PatternCommand,
    ValidateCommand,
};
use crate::error::CliError;

/// Route parsed arguments to the matching command handler.
pub async fn execute_matches(matches: &ArgMatches) -> Result<Value> {
    match matches.subcommand() {
        Some(("generate", sub_matches)) => GenerateCommand::new().execute(sub_matches).await,
        Some(("optimize", sub_matches)) => OptimizeCommand::new().execute(sub_matches).await,
        Some(("validate", sub_matches)) => ValidateCommand::new().execute(sub_matches).await,
        Some(("pattern", sub_matches)) => PatternCommand::new().execute(sub_matches).await,
        Some(("models", sub_matches)) => ModelsCommand::new().execute(sub_matches).await,
        Some((other, _)) => Err(CliError::ArgParse(format!("unknown command '{}'", other)).into()),
        None => Err(CliError::ArgParse("no command given".to_string()).into()),
    }
}

/// Parse `args`, run the command and return its JSON output.
pub async fn run_with_args<I, T>(args: I) -> Result<Value>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_cli()
        .try_get_matches_from(args)
        .map_err(|e| CliError::ArgParse(e.to_string()))?;
    execute_matches(&matches).await
}

pub async fn run() -> Result<()> {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => err.exit(),
    };
    if let Some((name, _)) = matches.subcommand() {
        debug!("Running '{}' command", name);
    }

    let output = execute_matches(&matches).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
