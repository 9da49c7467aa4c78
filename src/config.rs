//! Configuration management.
//!
//! Error taxonomy and codec settings shared by the library and the CLI.

mod error;
mod settings;

pub use error::{ForgeError, Result};
pub use settings::{CompressionMode, DigestMethod, SignerConfig, DEFAULT_SALT};
