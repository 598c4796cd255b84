use color_eyre::Result;
use indexnow::cli::{handle_version_command, parse_args, run_cli_command, wants_verbose, CliCommand};
use indexnow::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    if command == CliCommand::Version {
        handle_version_command();
    }

    color_eyre::install()?;
    init_tracing(wants_verbose(std::env::args()));

    run_cli_command(command).await
}
