//! Security primitives.
//!
//! Token signing and verification plus the secret recovery search.

pub mod search;
pub mod signer;

pub use search::{load_candidates, CancelFlag, SearchOutcome, SecretSearch};
pub use signer::SessionSigner;
