//! Sitelogin Core Library
//!
//! This library authenticates against a single web property by scraping its
//! login form, extracting the one-time nonce token, submitting credentials,
//! and persisting the resulting session cookies for reuse.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`auth`] - Session authenticator, cookie set, nonce scan, session store
//! - [`http`] - Shared HTTP client construction policy

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod http;

mod user_agent;

// Re-export commonly used types
pub use auth::{
    AuthError, AuthedClient, CookieSet, Credentials, DEFAULT_BASE_URL, SESSION_FILE,
    SessionAuthenticator, SessionData, SessionStore, StoreError, extract_nonce, now_ms,
};
