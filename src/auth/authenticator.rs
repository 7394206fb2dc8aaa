//! The login flow: session reuse, form scrape, credential POST, persistence.
//!
//! [`SessionAuthenticator`] owns the outgoing request context (clients plus
//! the current cookie set) and drives the two-request handshake against the
//! site's `/login` endpoint. The flow fails closed: every internal error is
//! logged and collapsed into a `false` return from [`authenticate`].
//!
//! [`authenticate`]: SessionAuthenticator::authenticate

use std::fmt;

use reqwest::header::{CONTENT_TYPE, COOKIE, REFERER};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{error, info, warn};
use url::Url;

use crate::http;

use super::cookies::CookieSet;
use super::nonce::extract_nonce;
use super::session::{self, SessionData, SessionStore};

/// Base URL of the web property this tool authenticates against.
pub const DEFAULT_BASE_URL: &str = "https://challenge.sunvoy.com";

/// Login endpoint path, relative to the base URL. Serves the form on GET
/// and accepts the credential POST.
const LOGIN_PATH: &str = "login";

/// Login credentials. Caller-supplied, never persisted.
///
/// The password is redacted in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    /// Account email; submitted as the `username` form field.
    pub email: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the password.
    ///
    /// The password is sensitive; avoid logging the return value.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Custom Debug impl that redacts the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Errors inside the login flow. Logged and collapsed to `false` by
/// [`SessionAuthenticator::authenticate`]; never surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Network-level failure on one of the two handshake requests.
    #[error("network error during {stage}: {source}")]
    Network {
        /// Which request failed.
        stage: &'static str,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The login POST came back with a non-success status.
    #[error("login rejected with HTTP {status}")]
    Rejected {
        /// The HTTP status code of the POST response.
        status: u16,
    },

    /// The base URL cannot produce a login endpoint URL.
    #[error("cannot derive login URL from base: {0}")]
    LoginUrl(#[from] url::ParseError),

    /// HTTP client construction failed.
    #[error("failed to construct HTTP client: {0}")]
    Client(reqwest::Error),
}

/// Explicit request context for authenticated follow-up calls: a client
/// handle plus an immutable snapshot of the session cookies.
///
/// Obtained from [`SessionAuthenticator::client`]. Each snapshot is
/// self-contained: later logins do not mutate contexts already handed out.
#[derive(Clone, Debug)]
pub struct AuthedClient {
    client: Client,
    base_url: Url,
    cookies: CookieSet,
}

impl AuthedClient {
    /// Builds a GET request for `path` relative to the site base, with the
    /// session cookies installed.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when `path` cannot be joined to the base.
    pub fn get(&self, path: &str) -> Result<RequestBuilder, url::ParseError> {
        let url = self.base_url.join(path)?;
        Ok(self.apply_cookies(self.client.get(url)))
    }

    /// Builds a POST request for `path` relative to the site base, with the
    /// session cookies installed.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when `path` cannot be joined to the base.
    pub fn post(&self, path: &str) -> Result<RequestBuilder, url::ParseError> {
        let url = self.base_url.join(path)?;
        Ok(self.apply_cookies(self.client.post(url)))
    }

    /// The cookie snapshot this context carries.
    #[must_use]
    pub fn cookies(&self) -> &CookieSet {
        &self.cookies
    }

    /// The underlying HTTP client, for requests outside the site base.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    fn apply_cookies(&self, request: RequestBuilder) -> RequestBuilder {
        match self.cookies.header_value() {
            Some(header) => request.header(COOKIE, header),
            None => request,
        }
    }
}

/// Authenticates against the site and persists the resulting session.
pub struct SessionAuthenticator {
    browse: Client,
    login_post: Client,
    base_url: Url,
    login_url: Url,
    store: SessionStore,
    cookies: CookieSet,
    session: Option<SessionData>,
}

impl SessionAuthenticator {
    /// Creates an authenticator for `base_url`, persisting sessions through
    /// `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the login URL cannot be derived or HTTP
    /// client construction fails.
    pub fn new(base_url: Url, store: SessionStore) -> Result<Self, AuthError> {
        let login_url = base_url.join(LOGIN_PATH)?;
        Ok(Self {
            browse: http::build_browse_client().map_err(AuthError::Client)?,
            login_post: http::build_login_client().map_err(AuthError::Client)?,
            base_url,
            login_url,
            store,
            cookies: CookieSet::new(),
            session: None,
        })
    }

    /// Authenticator against [`DEFAULT_BASE_URL`] with the session file in
    /// the process working directory.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when HTTP client construction fails.
    pub fn with_defaults() -> Result<Self, AuthError> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        Self::new(base_url, SessionStore::default_location())
    }

    /// Establishes a session, reusing a stored one when still valid.
    ///
    /// Fails closed: any error at any step is logged and converted to a
    /// `false` return. A `true` return means the cookie context is installed
    /// and (for fresh logins) the session has been persisted.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> bool {
        match self.store.load(session::now_ms()) {
            Ok(Some(data)) => {
                info!("using existing valid session");
                self.cookies = data.cookie_set();
                self.session = Some(data);
                return true;
            }
            Ok(None) => {}
            Err(source) => {
                warn!(error = %source, "could not load stored session, continuing with fresh login");
            }
        }
        self.session = None;

        match self.login(credentials).await {
            Ok(()) => true,
            Err(source) => {
                error!(error = %source, "authentication failed");
                false
            }
        }
    }

    /// The two-request login handshake.
    async fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        info!("authenticating with fresh credentials");

        let response = self
            .browse
            .get(self.login_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| AuthError::Network {
                stage: "login page fetch",
                source,
            })?;

        self.cookies = CookieSet::new();
        let collected = self.cookies.collect_from_response(response.headers());
        info!(cookies = collected, "collected login page cookies");

        let body = response
            .text()
            .await
            .map_err(|source| AuthError::Network {
                stage: "login page read",
                source,
            })?;
        let csrf_token = extract_nonce(&body);

        // Absent nonce is not a failure; the form is posted with an empty token.
        let form_body = login_form_body(credentials, csrf_token.as_deref().unwrap_or(""));

        info!("submitting login form");
        let mut request = self
            .login_post
            .post(self.login_url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(REFERER, self.login_url.as_str())
            .body(form_body);
        if let Some(header) = self.cookies.header_value() {
            request = request.header(COOKIE, header);
        }

        let response = request.send().await.map_err(|source| AuthError::Network {
            stage: "login submit",
            source,
        })?;
        let status = response.status();

        // POST cookies are merged before the status check so a rejection
        // still leaves the freshest cookie context installed.
        let merged = self.cookies.collect_from_response(response.headers());
        if merged > 0 {
            info!(cookies = merged, "merged login response cookies");
        }

        // 302 is the redirect-based success; the site has also been observed
        // answering 200 with redirects disabled, so both count.
        if status == StatusCode::OK || status == StatusCode::FOUND {
            let data = SessionData::new(self.cookies.clone(), csrf_token, session::now_ms());
            match self.store.save(&data) {
                Ok(()) => {
                    info!(path = %self.store.path().display(), "session saved for future use");
                }
                Err(source) => {
                    warn!(error = %source, "could not save session for reuse");
                }
            }
            self.session = Some(data);
            info!("login successful");
            Ok(())
        } else {
            Err(AuthError::Rejected {
                status: status.as_u16(),
            })
        }
    }

    /// The configured request context with the current cookies installed,
    /// for subsequent authenticated requests.
    #[must_use]
    pub fn client(&self) -> AuthedClient {
        AuthedClient {
            client: self.browse.clone(),
            base_url: self.base_url.clone(),
            cookies: self.cookies.clone(),
        }
    }

    /// Whether the last [`authenticate`](Self::authenticate) call
    /// established a session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The active session record, when authenticated.
    #[must_use]
    pub fn session(&self) -> Option<&SessionData> {
        self.session.as_ref()
    }
}

/// Builds the URL-encoded login body. Field names are fixed by the site:
/// the email is submitted as `username`.
fn login_form_body(credentials: &Credentials, nonce: &str) -> String {
    format!(
        "username={}&password={}&nonce={}",
        urlencoding::encode(&credentials.email),
        urlencoding::encode(credentials.password()),
        urlencoding::encode(nonce)
    )
}
