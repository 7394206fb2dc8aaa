//! CLI entry point for the sitelogin tool.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Cli carries the password when passed as a flag; log only the safe fields.
    debug!(
        base_url = %cli.base_url,
        session_file = %cli.session_file.display(),
        "CLI arguments parsed"
    );

    match cli.command {
        Command::Login { email, password } => {
            let ok =
                commands::run_login_command(cli.base_url, cli.session_file, email, password)
                    .await?;
            if !ok {
                std::process::exit(1);
            }
        }
        Command::Status => commands::run_status_command(cli.session_file)?,
        Command::Logout => commands::run_logout_command(cli.session_file)?,
    }

    Ok(())
}
