//! warrant - delegate account-level capabilities to server agents.
//!
//! The CLI is a thin front end: it validates arguments, loads the local
//! agent from its credential store, mints a delegation bounded to the
//! target agent and an expiry, and prints the encoded result. Every
//! failure is terminal and maps to exit status 1; help and success exit 0.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use warrant_store::StoreConf;

use warrant_cli::delegate;

const EXAMPLES: &str = "examples:
  warrant plan/get did:key:z6Mk... alice@example.com
  warrant \"plan/*\" did:key:z6Mk... alice@example.com --expiry 30
";

/// Delegate account-level capabilities to server agents.
#[derive(Parser, Debug)]
#[command(name = "warrant", version, after_help = EXAMPLES)]
#[command(about = "Delegate account-level capabilities to server agents")]
struct Cli {
    /// Capability to delegate (e.g. plan/get, plan/*)
    capability: String,

    /// DID of the server agent you're delegating to (did:key:...)
    server_agent_did: String,

    /// Email associated with your account
    account_email: String,

    /// Delegation expiry in days
    #[arg(long, value_name = "DAYS", default_value_t = 365, allow_negative_numbers = true)]
    expiry: i64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Check the parsed arguments, returning the expiry in days.
fn validate(cli: &Cli) -> Result<u64, String> {
    if !cli.server_agent_did.starts_with("did:key:") {
        return Err("server-agent-did must be a did:key:... identifier".into());
    }
    if !cli.account_email.contains('@') {
        return Err("invalid email format".into());
    }
    u64::try_from(cli.expiry)
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(|| "--expiry must be a positive number".into())
}

/// Map a clap parse failure onto the exit contract: help and version are
/// informational (0), everything else is a one-line diagnostic (1).
fn handle_parse_error(err: &clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::MissingRequiredArgument => {
            eprintln!("missing arguments, run with --help for usage");
            ExitCode::FAILURE
        }
        // --expiry is the only value-parsed argument.
        ErrorKind::ValueValidation | ErrorKind::InvalidValue => {
            eprintln!("--expiry must be a positive number");
            ExitCode::FAILURE
        }
        _ => {
            eprintln!("invalid arguments, run with --help for usage");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Diagnostics go to stderr; stdout carries only the delegation block.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Bare invocation is a request for usage, not an error.
    if std::env::args_os().len() <= 1 {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(&err),
    };

    let expiry_days = match validate(&cli) {
        Ok(days) => days,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);

    let result = delegate::create_delegation(
        &StoreConf::default_profile(),
        &cli.capability,
        &cli.server_agent_did,
        &cli.account_email,
        expiry_days,
    )
    .await;

    match result {
        Ok(encoded) => {
            println!();
            println!("--- DELEGATION (base64) ---");
            println!("{encoded}");
            println!("--- END ---");
            println!();
            println!("set this as an environment variable on your server");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!();
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
