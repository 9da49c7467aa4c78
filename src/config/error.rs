//! Error types and result aliases.
//!
//! Defines the core `ForgeError` enumeration and common `Result` type.

use thiserror::Error;

/// Errors produced by the token codec, the secret search, and their
/// collaborators. Every variant renders with a distinct tag so callers can
/// tell a signature failure from a structural one from a network one.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Token text does not have the expected delimited shape.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Signature does not match the key-derived digest.
    #[error("bad signature: token was not signed with this secret")]
    BadSignature,

    /// Compressed payload segment could not be inflated.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Payload segment is not a valid serialized session structure.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Encoding a structure into a token failed.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Token is older than the configured maximum age (opt-in check).
    #[error("token expired: age {age}s exceeds allowed {max_age}s")]
    TokenExpired { age: u64, max_age: u64 },

    /// Operator-supplied structure text could not be parsed by any format.
    #[error("cannot parse session structure: {0}")]
    InvalidStructure(String),

    /// Candidate list exhausted without a verifying secret.
    #[error("no candidate secret verified the token")]
    SecretNotFound,

    /// HTTP request failed or returned an error status.
    #[error("network error: {0}")]
    Network(String),

    /// Response carried no cookie under the expected name.
    #[error("no '{name}' cookie found in the response")]
    CookieAbsent { name: String },

    /// Candidate list file could not be read.
    #[error("cannot read wordlist '{path}': {detail}")]
    Wordlist { path: String, detail: String },
}

/// Result type alias for `ForgeError`.
pub type Result<T> = std::result::Result<T, ForgeError>;
