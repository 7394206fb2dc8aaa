//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use sitelogin_core::{DEFAULT_BASE_URL, SESSION_FILE};

/// Log in to the site and keep the session for reuse.
///
/// Sitelogin scrapes the login form, submits credentials with the one-time
/// nonce token, and persists the resulting cookies to a local session file
/// so follow-up runs skip the login handshake.
#[derive(Parser, Debug)]
#[command(name = "sitelogin")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Site base URL (override is primarily for testing against a mock)
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: Url,

    /// Session file path
    #[arg(long, default_value = SESSION_FILE, global = true)]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate and persist the session
    Login {
        /// Account email (falls back to SITELOGIN_EMAIL)
        #[arg(long)]
        email: Option<String>,

        /// Account password (falls back to SITELOGIN_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },
    /// Report whether a stored session exists and when it expires
    Status,
    /// Delete the stored session
    Logout,
}
