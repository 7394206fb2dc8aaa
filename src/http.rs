//! Shared HTTP client construction policy.
//!
//! This module centralizes site networking defaults so the login flow and
//! authenticated follow-up requests stay consistent on timeout, header
//! profile, compression, and redirect policy.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};

use crate::user_agent;

/// Per-request deadline in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Redirect hop limit when following is enabled.
const MAX_REDIRECTS: usize = 5;

/// Builds the browsing client: follows redirects (bounded) for the
/// login-page GET and for authenticated follow-up requests.
///
/// # Errors
///
/// Returns [`reqwest::Error`] when client construction fails.
pub fn build_browse_client() -> Result<Client, reqwest::Error> {
    base_builder()
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
}

/// Builds the login POST client: redirect following disabled so the 302 a
/// successful login issues is observed rather than followed.
///
/// # Errors
///
/// Returns [`reqwest::Error`] when client construction fails.
pub fn build_login_client() -> Result<Client, reqwest::Error> {
    base_builder().redirect(Policy::none()).build()
}

fn base_builder() -> ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(user_agent::browser_user_agent())
        .default_headers(default_headers())
        .gzip(true)
}

/// Browser header profile sent with every request. `Accept-Encoding` is
/// handled by the gzip feature; `Connection: keep-alive` by the pool.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers
}
