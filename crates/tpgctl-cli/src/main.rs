// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

mod error;
mod info;
mod set;
mod setup;
mod utils;

use clap::{Parser, Subcommand};
use error::result_to_exit_code;
use std::process::ExitCode;

/// tpgctl - Test Pattern Generator inspection and configuration tool
#[derive(Parser)]
#[command(name = "tpgctl")]
#[command(version)]
#[command(about = "tpgctl - Test Pattern Generator inspection and configuration tool")]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (use RUST_LOG=debug for more)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display media device information and the entity graph
    Info(info::Args),

    /// Bring up the TPG: defaults, input format, optional control overrides
    Setup(setup::Args),

    /// Push individual TPG control values
    Set(set::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Execute the subcommand and convert result to exit code
    let result = match cli.command {
        Commands::Info(args) => info::execute(args, cli.json),
        Commands::Setup(args) => setup::execute(args, cli.json),
        Commands::Set(args) => set::execute(args, cli.json),
    };

    result_to_exit_code(result)
}

/// Initialize env_logger based on verbosity flags
fn init_logging(verbose: bool, quiet: bool) {
    let env = env_logger::Env::default();

    let env = if quiet {
        env.default_filter_or("error")
    } else if verbose {
        env.default_filter_or("debug")
    } else {
        env.default_filter_or("info")
    };

    env_logger::Builder::from_env(env)
        .format_timestamp(None) // Disable timestamps for cleaner CLI output
        .format_target(false) // Disable target (module path) for cleaner output
        .init();

    log::debug!("Logging initialized");
}
