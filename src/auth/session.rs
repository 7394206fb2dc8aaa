//! Session persistence: the stored record and its JSON file store.
//!
//! A session is the captured cookie set plus an absolute expiry instant,
//! written to `session.json` in the process working directory. A stored
//! record is only usable while the current time is before its expiry; an
//! expired record is deleted on read.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::cookies::CookieSet;

/// Session file name, resolved against the process working directory.
pub const SESSION_FILE: &str = "session.json";

/// Session lifetime in milliseconds (24 hours).
const SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Errors for session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The stored record is not valid session JSON.
    #[error("stored session is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted session record.
///
/// Serializes to the on-disk shape
/// `{cookies: [string], csrfToken?: string, expiryTime: number}` with
/// `expiryTime` in milliseconds since the Unix epoch.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// Reduced `name=value` cookie pairs in capture order.
    pub cookies: Vec<String>,
    /// Nonce captured at login time; absent when the login page had none.
    #[serde(
        rename = "csrfToken",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub csrf_token: Option<String>,
    /// Absolute expiry instant in milliseconds since the Unix epoch.
    #[serde(rename = "expiryTime")]
    pub expiry_time: u64,
}

impl SessionData {
    /// Builds a fresh record expiring 24 hours after `now_ms`.
    #[must_use]
    pub fn new(cookies: CookieSet, csrf_token: Option<String>, now_ms: u64) -> Self {
        Self {
            cookies: cookies.into_pairs(),
            csrf_token,
            expiry_time: now_ms.saturating_add(SESSION_TTL_MS),
        }
    }

    /// A record is expired once the current time reaches its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expiry_time
    }

    /// Milliseconds until expiry (zero when already expired).
    #[must_use]
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expiry_time.saturating_sub(now_ms)
    }

    /// The stored cookies as a [`CookieSet`] ready for installation.
    #[must_use]
    pub fn cookie_set(&self) -> CookieSet {
        CookieSet::from_pairs(self.cookies.clone())
    }
}

// Custom Debug impl: the cookie pairs carry values, so only counts and the
// expiry instant are printed.
impl fmt::Debug for SessionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionData")
            .field("cookies", &self.cookies.len())
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "[REDACTED]"))
            .field("expiry_time", &self.expiry_time)
            .finish()
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// File store for the session record.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store over the given session file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store over [`SESSION_FILE`] in the process working directory.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(SESSION_FILE)
    }

    /// The session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session.
    ///
    /// Returns `Ok(None)` when no file exists or when the stored record has
    /// expired. An expired record is deleted before returning.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file cannot be read, is not valid
    /// session JSON, or an expired record cannot be removed.
    pub fn load(&self, now_ms: u64) -> Result<Option<SessionData>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored session");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let data: SessionData = serde_json::from_str(&contents)?;

        if data.is_expired(now_ms) {
            info!(path = %self.path.display(), "stored session has expired, removing");
            std::fs::remove_file(&self.path)?;
            return Ok(None);
        }

        Ok(Some(data))
    }

    /// Writes the session record, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when serialization or the file write fails.
    pub fn save(&self, data: &SessionData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Removes the stored session.
    ///
    /// Returns `true` when a file existed and was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when file removal fails.
    pub fn clear(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
