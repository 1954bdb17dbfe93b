//! CLI argument parsing and command building

use clap::{Arg, ArgAction, ArgGroup, Command};

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Chain optimization config (YAML, JSON or TOML)")
        .required(false)
}

fn override_arg() -> Arg {
    Arg::new("override")
        .short('o')
        .long("override")
        .value_name("KEY=VALUE")
        .help("Override configuration values")
        .action(ArgAction::Append)
        .num_args(1..)
}

fn chain_arg() -> Arg {
    Arg::new("chain")
        .long("chain")
        .value_name("FILE")
        .help("Chain or step list to read (JSON or YAML)")
        .required(true)
}

/// Build the main CLI command structure
pub fn build_cli() -> Command {
    Command::new("promptforge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build, optimize and validate chain-of-thought reasoning scaffolds")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generate a reasoning chain for a prompt")
                .arg(
                    Arg::new("prompt")
                        .short('p')
                        .long("prompt")
                        .value_name("TEXT")
                        .help("Prompt text"),
                )
                .arg(
                    Arg::new("prompt_file")
                        .long("prompt-file")
                        .value_name("FILE")
                        .help("Read the prompt from a file"),
                )
                .group(
                    ArgGroup::new("input")
                        .args(["prompt", "prompt_file"])
                        .required(true),
                )
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .value_name("FILE")
                        .help("Prompt template supplying fallback goal and context"),
                )
                .arg(config_arg())
                .arg(override_arg())
                .arg(
                    Arg::new("with_validation")
                        .long("with-validation")
                        .help("Include the validation result and any dependency cycles")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("render")
                        .long("render")
                        .help("Include the chain rendered as prompt text")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("optimize")
                .about("Run the optimization pipeline over stored steps")
                .arg(chain_arg())
                .arg(config_arg())
                .arg(override_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a stored chain")
                .arg(chain_arg()),
        )
        .subcommand(
            Command::new("pattern")
                .about("Expand a reasoning pattern over some text")
                .arg(
                    Arg::new("name")
                        .help("deductive, inductive, abductive or analogical")
                        .required(true),
                )
                .arg(Arg::new("text").help("Text to reason about").required(true)),
        )
        .subcommand(Command::new("models").about("List the known model profiles"))
}
