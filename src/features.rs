//! Auxiliary features.
//!
//! HTTP retrieval of a live session cookie.

pub mod fetch;

pub use fetch::{fetch_session_cookie, DEFAULT_TIMEOUT_SECS, SESSION_COOKIE_NAME};
