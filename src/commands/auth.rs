//! Session command handlers: login, status, and logout.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use sitelogin_core::{Credentials, SessionAuthenticator, SessionStore, now_ms};
use tracing::{info, warn};
use url::Url;

/// Environment fallback for the account email.
const EMAIL_ENV: &str = "SITELOGIN_EMAIL";
/// Environment fallback for the account password.
const PASSWORD_ENV: &str = "SITELOGIN_PASSWORD";

/// Runs the login flow and returns whether authentication succeeded.
///
/// # Errors
///
/// Returns an error for setup problems (missing credentials, unusable base
/// URL); a rejected or failed login is the `false` return, not an error.
pub async fn run_login_command(
    base_url: Url,
    session_file: PathBuf,
    email: Option<String>,
    password: Option<String>,
) -> Result<bool> {
    let credentials = resolve_credentials(email, password, env_var(EMAIL_ENV), env_var(PASSWORD_ENV))?;

    let store = SessionStore::new(session_file);
    let mut authenticator =
        SessionAuthenticator::new(base_url, store).context("Failed to set up authenticator")?;

    let ok = authenticator.authenticate(&credentials).await;
    if ok {
        info!("Authentication successful");
    } else {
        warn!("Authentication failed");
    }
    Ok(ok)
}

/// Reports whether a stored session exists and how long it remains valid.
/// Never touches the network.
///
/// # Errors
///
/// Currently infallible; returns `Result` for handler uniformity.
pub fn run_status_command(session_file: PathBuf) -> Result<()> {
    let store = SessionStore::new(session_file);
    match store.load(now_ms()) {
        Ok(Some(session)) => {
            let minutes_left = session.remaining_ms(now_ms()) / 60_000;
            info!(
                path = %store.path().display(),
                minutes_left,
                "Stored session is valid"
            );
        }
        Ok(None) => {
            info!(path = %store.path().display(), "No stored session");
        }
        Err(error) => {
            warn!(error = %error, "Stored session is unreadable");
        }
    }
    Ok(())
}

/// Deletes the stored session file if present.
///
/// # Errors
///
/// Returns an error when an existing session file cannot be removed.
pub fn run_logout_command(session_file: PathBuf) -> Result<()> {
    let store = SessionStore::new(session_file);
    let removed = store
        .clear()
        .context("Failed to clear stored session")?;

    if removed {
        info!(path = %store.path().display(), "Cleared stored session");
    } else {
        info!("No stored session found");
    }

    Ok(())
}

/// Resolves credentials from flags with environment fallback. Flags win.
fn resolve_credentials(
    flag_email: Option<String>,
    flag_password: Option<String>,
    env_email: Option<String>,
    env_password: Option<String>,
) -> Result<Credentials> {
    let Some(email) = flag_email.or(env_email) else {
        bail!("No email provided; pass --email or set {EMAIL_ENV}");
    };
    let Some(password) = flag_password.or(env_password) else {
        bail!("No password provided; pass --password or set {PASSWORD_ENV}");
    };
    Ok(Credentials::new(email, password))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credentials_prefers_flags_over_env() {
        let credentials = resolve_credentials(
            Some("flag@example.com".to_string()),
            Some("flag-pw".to_string()),
            Some("env@example.com".to_string()),
            Some("env-pw".to_string()),
        )
        .unwrap();
        assert_eq!(credentials.email, "flag@example.com");
        assert_eq!(credentials.password(), "flag-pw");
    }

    #[test]
    fn test_resolve_credentials_falls_back_to_env() {
        let credentials = resolve_credentials(
            None,
            None,
            Some("env@example.com".to_string()),
            Some("env-pw".to_string()),
        )
        .unwrap();
        assert_eq!(credentials.email, "env@example.com");
        assert_eq!(credentials.password(), "env-pw");
    }

    #[test]
    fn test_resolve_credentials_missing_email_errors() {
        let result = resolve_credentials(None, Some("pw".to_string()), None, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(EMAIL_ENV));
    }

    #[test]
    fn test_resolve_credentials_missing_password_errors() {
        let result = resolve_credentials(Some("a@b.c".to_string()), None, None, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(PASSWORD_ENV));
    }
}
