//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cookieforge::{SignerConfig, DEFAULT_SALT, DEFAULT_TIMEOUT_SECS, SESSION_COOKIE_NAME};

/// cookieforge - forge, decode and crack HMAC-signed session cookies
#[derive(Parser, Debug)]
#[command(name = "cookieforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Key-derivation salt the target framework uses
    #[arg(long, global = true, default_value = DEFAULT_SALT)]
    pub salt: String,

    /// Digest behind key derivation and signing
    #[arg(long, global = true, default_value = "sha1", value_parser = ["sha1", "sha256", "sha512"])]
    pub digest: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Codec configuration assembled from the global flags.
    #[must_use]
    pub fn signer_config(&self) -> SignerConfig {
        SignerConfig {
            salt: self.salt.clone(),
            digest: self.digest.parse().unwrap_or_default(),
            ..SignerConfig::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forge and sign a session token
    Encode(EncodeArgs),

    /// Decode a session token, verifying it when a secret is given
    Decode(DecodeArgs),

    /// Fetch the session cookie from a URL and decode it
    Guess(GuessArgs),

    /// Recover the signing secret by running a wordlist against a token
    Bruteforce(BruteforceArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Secret signing key
    #[arg(short, long)]
    pub secret: String,

    /// Session structure as JSON or a Python literal; pass `auto` to build
    /// one interactively
    #[arg(short = 't', long = "structure")]
    pub structure: String,

    /// Compression policy
    #[arg(long, default_value = "auto", value_parser = ["auto", "always", "never"])]
    pub compress: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Session token to decode
    #[arg(short = 'c', long = "cookie")]
    pub cookie: String,

    /// Secret signing key; omit to decode the payload without verification
    #[arg(short, long)]
    pub secret: Option<String>,

    /// Reject verified tokens older than this many seconds
    #[arg(long)]
    pub max_age: Option<u64>,

    /// Pretty-print the decoded structure
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct GuessArgs {
    /// URL to fetch the session cookie from
    #[arg(short, long)]
    pub url: String,

    /// Secret signing key; omit to decode the payload without verification
    #[arg(short, long)]
    pub secret: Option<String>,

    /// Cookie name carrying the session token
    #[arg(short = 'n', long = "name", default_value = SESSION_COOKIE_NAME)]
    pub name: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Pretty-print the decoded structure
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct BruteforceArgs {
    /// Session token to attack
    #[arg(short = 'c', long = "cookie")]
    pub cookie: String,

    /// Newline-delimited wordlist of candidate secrets
    #[arg(short, long)]
    pub wordlist: PathBuf,

    /// Suppress the progress bar
    #[arg(long)]
    pub quiet: bool,
}
