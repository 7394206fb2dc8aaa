//! `Set-Cookie` reduction and the ordered session cookie set.
//!
//! Response cookies are reduced to their `name=value` prefix (attributes
//! after the first `;` are dropped) and carried in arrival order: login-page
//! cookies first, then any cookies the login POST sets. The combined set
//! renders into a single `Cookie` request header.

use std::fmt;

use reqwest::header::{HeaderMap, SET_COOKIE};
use tracing::debug;

/// Ordered collection of `name=value` cookie pairs captured during login.
///
/// Cookie values are sensitive; the `Debug` impl prints names only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CookieSet {
    pairs: Vec<String>,
}

impl CookieSet {
    /// Creates an empty cookie set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cookie set from already-reduced `name=value` pairs, e.g.
    /// the `cookies` list of a stored session.
    #[must_use]
    pub fn from_pairs(pairs: Vec<String>) -> Self {
        Self { pairs }
    }

    /// Reduces every `Set-Cookie` value in `headers` to its `name=value`
    /// prefix and appends them in arrival order.
    ///
    /// Returns the number of cookies appended. Values that are not valid
    /// header text or have no `name=value` prefix are skipped.
    pub fn collect_from_response(&mut self, headers: &HeaderMap) -> usize {
        let mut appended = 0;
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                debug!("skipping non-text Set-Cookie header");
                continue;
            };
            if let Some(pair) = reduce_set_cookie(raw) {
                self.pairs.push(pair);
                appended += 1;
            } else {
                debug!("skipping Set-Cookie with no name=value prefix");
            }
        }
        appended
    }

    /// Renders the set as a `Cookie` request-header value, or `None` when
    /// the set is empty.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        if self.pairs.is_empty() {
            None
        } else {
            Some(self.pairs.join("; "))
        }
    }

    /// The reduced `name=value` pairs in arrival order.
    #[must_use]
    pub fn pairs(&self) -> &[String] {
        &self.pairs
    }

    /// Consumes the set, yielding the pairs for persistence.
    #[must_use]
    pub fn into_pairs(self) -> Vec<String> {
        self.pairs
    }

    /// Number of cookies in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the set holds no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// Custom Debug impl that shows cookie names but never values.
impl fmt::Debug for CookieSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .pairs
            .iter()
            .map(|pair| pair.split('=').next().unwrap_or(""))
            .collect();
        f.debug_struct("CookieSet")
            .field("count", &self.pairs.len())
            .field("names", &names)
            .finish()
    }
}

/// Reduces a raw `Set-Cookie` header value to its `name=value` prefix.
fn reduce_set_cookie(raw: &str) -> Option<String> {
    let prefix = raw.split(';').next().unwrap_or(raw).trim();
    if prefix.is_empty() || !prefix.contains('=') {
        return None;
    }
    Some(prefix.to_string())
}
