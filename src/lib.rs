//! Library definitions.
//!
//! Exports the token codec, session transforms, secret search, and cookie
//! retrieval used by the `cookieforge` binary.

pub mod config;
pub mod features;
pub mod security;
pub mod session;

pub use config::{CompressionMode, DigestMethod, ForgeError, Result, SignerConfig, DEFAULT_SALT};
pub use features::fetch::{fetch_session_cookie, DEFAULT_TIMEOUT_SECS, SESSION_COOKIE_NAME};
pub use security::search::{load_candidates, CancelFlag, SearchOutcome, SecretSearch};
pub use security::signer::SessionSigner;
pub use session::{parse_structure, render, SessionStructure};
