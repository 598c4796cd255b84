//! Command-line front end.
//!
//! `main` parses arguments, handles `--version` and `--help` itself and hands
//! everything else to [`run_cli_command`]:
//!
//! ```ignore
//! use indexnow::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command).await?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, wants_verbose, CliCommand, USAGE};
pub use commands::{
    build_notifier, handle_key_command, handle_serve_command, handle_submit_command, report,
};
pub use version::{handle_version_command, version_string, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::IndexNowConfig;

/// Run a parsed command against the configuration on disk.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Invalid(reason) => Err(eyre!("{}\n\n{}", reason, USAGE)),
        command => {
            let config = IndexNowConfig::load().map_err(report)?;
            match command {
                CliCommand::Key => handle_key_command(&config).await,
                CliCommand::Submit { url, action } => {
                    handle_submit_command(&config, &url, action).await
                }
                _ => handle_serve_command(&config).await,
            }
        }
    }
}
