//! Command-line argument parsing.

use crate::models::SubmissionAction;

/// Usage text for `--help` and argument errors.
pub const USAGE: &str = "\
Usage: indexnow [OPTIONS] [COMMAND]

Commands:
  serve              Serve the key file and the transition hook (default)
  key                Print the active verification key, creating it if needed
  submit <URL>       Notify every provider that URL changed
    --delete         Report the URL as removed

Options:
  -v, --verbose      Debug logging
  -V, --version      Print version
  -h, --help         Print this help";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    /// Run the verification server (default)
    Serve,
    Key,
    Submit {
        url: String,
        action: SubmissionAction,
    },
    /// Arguments could not be understood; carries the reason.
    Invalid(String),
}

/// Parse command-line arguments, program name first.
///
/// # Examples
///
/// ```
/// use indexnow::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["indexnow".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut command: Option<&'static str> = None;
    let mut url: Option<String> = None;
    let mut delete = false;

    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--verbose" | "-v" => {}
            "--delete" => delete = true,
            "serve" if command.is_none() => command = Some("serve"),
            "key" if command.is_none() => command = Some("key"),
            "submit" if command.is_none() => command = Some("submit"),
            other if command == Some("submit") && url.is_none() && !other.starts_with('-') => {
                url = Some(other.to_string())
            }
            other => return CliCommand::Invalid(format!("unexpected argument '{}'", other)),
        }
    }

    match command {
        Some("submit") => match url {
            Some(url) => CliCommand::Submit {
                url,
                action: if delete {
                    SubmissionAction::Delete
                } else {
                    SubmissionAction::Update
                },
            },
            None => CliCommand::Invalid("submit requires a URL".to_string()),
        },
        _ if delete => CliCommand::Invalid("--delete only applies to submit".to_string()),
        Some("key") => CliCommand::Key,
        _ => CliCommand::Serve,
    }
}

/// Whether `--verbose`/`-v` was passed.
pub fn wants_verbose<I>(args: I) -> bool
where
    I: Iterator<Item = String>,
{
    args.skip(1).any(|arg| arg == "--verbose" || arg == "-v")
}
