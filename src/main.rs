//! gendeps CLI entry point
//!
//! Parses arguments, sets up logging, runs the generator, and converts the
//! outcome into the process exit status. A failing dependency writer's exit
//! status is passed through unchanged; every other failure, including a
//! command-line usage error, exits with 1.

use anyhow::Result;
use clap::Parser;
use gendeps::cli;
use gendeps::core::{GENERIC_FAILURE_EXIT_CODE, exit_code_for, user_friendly_error};

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors exit 1 so they never look like a dependency writer failure;
    // --help and --version keep clap's own handling
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(GENERIC_FAILURE_EXIT_CODE);
        }
        Err(e) => e.exit(),
    };

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli.build_config().init_logging();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let code = exit_code_for(&e);
            user_friendly_error(e).display();
            std::process::exit(code);
        }
    }
}
