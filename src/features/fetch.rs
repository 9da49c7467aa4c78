//! Session cookie retrieval.
//!
//! Fetches a target URL once and extracts the session cookie from the
//! response, so an operator can point the tool at a live application instead
//! of pasting a token by hand.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::{ForgeError, Result};

/// Cookie name Flask-style frameworks use for their session token.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Performs one GET request and returns the value of the named cookie from
/// the response.
///
/// Best effort by design: a single request with a bounded timeout and no
/// retries. A non-success status counts as a failure even when the response
/// carries cookies.
///
/// # Errors
///
/// - [`ForgeError::Network`] on transport errors, timeouts, and non-2xx
///   statuses.
/// - [`ForgeError::CookieAbsent`] when the response sets no cookie under
///   `cookie_name`.
pub fn fetch_session_cookie(url: &str, cookie_name: &str, timeout_secs: u64) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ForgeError::Network(e.to_string()))?;

    debug!(url, "requesting session cookie");
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| ForgeError::Network(e.to_string()))?;

    response
        .cookies()
        .find(|cookie| cookie.name() == cookie_name)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ForgeError::CookieAbsent {
            name: cookie_name.to_string(),
        })
}
