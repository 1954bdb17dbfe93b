/// CLI command modules, one per subcommand
pub mod generate;
pub mod models;
pub mod optimize;
pub mod pattern;
pub mod validate;

use anyhow::Result;
use clap::ArgMatches;
use serde_json::Value;

pub use generate::GenerateCommand;
pub use models::ModelsCommand;
pub use optimize::OptimizeCommand;
pub use pattern::PatternCommand;
pub use validate::ValidateCommand;

/// Trait for CLI command handlers
#[allow(async_fn_in_trait)]
pub trait CommandHandler {
    /// Execute the command and return the JSON document to print
    async fn execute(&self, matches: &ArgMatches) -> Result<Value>;
}
