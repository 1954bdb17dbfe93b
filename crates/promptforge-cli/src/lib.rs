//! PromptForge CLI Library
//!
//! Command-line access to the reasoning-chain engine: generating chains
//! from prompts, re-optimizing and validating stored chains, expanding
//! reasoning patterns and listing the known model profiles.
//!
//! # Key Modules
//!
//! - [`cli_builder`] - Argument definitions
//! - [`commands`] - One handler per subcommand
//! - [`loader`] - Reading prompts, templates, configuration and chains
//! - [`cli`] - Dispatch and output
//!
//! # Examples
//!
//! ```rust,no_run
//! use promptforge_cli::cli::run;
//!
//! # async fn example() -> anyhow::Result<()> {
//! run().await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod cli_builder;
pub mod commands;
pub mod error;
pub mod loader;

pub use error::CliError;
