//! CLI command handlers.

mod auth;

pub use auth::{run_login_command, run_logout_command, run_status_command};
