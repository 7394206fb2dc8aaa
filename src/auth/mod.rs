//! Authentication and session management.
//!
//! This module drives the form-login handshake against the site and
//! persists the captured cookie set for reuse across invocations.

mod authenticator;
mod cookies;
mod nonce;
mod session;

pub use authenticator::{
    AuthError, AuthedClient, Credentials, DEFAULT_BASE_URL, SessionAuthenticator,
};
pub use cookies::CookieSet;
pub use nonce::extract_nonce;
pub use session::{SESSION_FILE, SessionData, SessionStore, StoreError, now_ms};
