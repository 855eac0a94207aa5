//! extaudit CLI - Browser extension inventory for endpoint agents
//!
//! This binary checks host preconditions, inventories the extensions of a
//! browser profile and writes typed output fields to the output channel.

use clap::Parser;
use std::process::ExitCode;

use extaudit_cli::cli_args::{Cli, Commands};
use extaudit_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command.unwrap_or(Commands::Collect) {
        Commands::Collect => commands::collect::run(&cli.profile, cli.output),
        Commands::Doctor { json } => commands::doctor::run(&cli.profile, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
