//! Shared User-Agent string for all site HTTP clients.
//!
//! Single source for the browser profile so login-page and follow-up traffic
//! present the same client identity.

/// Desktop-browser User-Agent sent with every request. The login form is
/// served to browsers; a tool-identifying UA gets a different (sometimes
/// broken) markup variant.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Returns the User-Agent for site requests.
#[must_use]
pub(crate) fn browser_user_agent() -> &'static str {
    BROWSER_UA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_user_agent_is_browser_profile() {
        let ua = browser_user_agent();
        assert!(ua.starts_with("Mozilla/5.0"), "UA must be a browser profile");
        assert!(ua.contains("Chrome/"), "UA must carry a Chrome token");
    }
}
