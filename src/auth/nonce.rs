//! Hidden nonce field extraction from the login page.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Regex pattern for the hidden `nonce` form field.
/// Matches `name="nonce"` followed by a `value="..."` attribute on the same tag.
#[allow(clippy::expect_used)]
static NONCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"name="nonce"[^>]*value="([^"]+)""#).expect("nonce regex is valid") // Static pattern, safe to panic
});

/// Scans login-page markup for the hidden `nonce` field.
///
/// Returns `None` when the page carries no such field; callers proceed
/// with an empty token rather than failing.
#[must_use]
pub fn extract_nonce(html: &str) -> Option<String> {
    let token = NONCE_PATTERN
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    if token.is_some() {
        debug!("found nonce token in login page");
    }
    token
}
