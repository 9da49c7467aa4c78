//! Configuration settings.
//!
//! Defines the signer configuration and the enumerations for the digest and
//! compression choices a target framework may require.

use std::str::FromStr;

/// Key-derivation salt used by the target framework's session interface.
///
/// Interoperability depends on this constant byte-for-byte; override it only
/// for frameworks that document a different derivation context.
pub const DEFAULT_SALT: &str = "cookie-session";

/// Digest algorithm driving both key derivation and the keyed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestMethod {
    /// HMAC-SHA1, the target framework's current default signer.
    #[default]
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

impl FromStr for DigestMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(format!("unknown digest '{other}' (sha1, sha256, sha512)")),
        }
    }
}

/// When to run the payload through the compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMode {
    /// Compress, and keep the result only when it beats the plain payload
    /// after accounting for the marker byte. Wire-compatible default.
    #[default]
    Auto,
    /// Compress unconditionally and set the marker.
    Always,
    /// Never compress.
    Never,
}

impl FromStr for CompressionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown compression mode '{other}' (auto, always, never)")),
        }
    }
}

/// Parameters of the token codec.
///
/// The defaults reproduce the target framework's signing scheme exactly:
/// HMAC-SHA1 keyed through a single HMAC derivation over the
/// `"cookie-session"` salt, compress-when-smaller payloads, and no age check.
#[derive(Debug, Clone)]
pub struct SignerConfig {
    /// Key-derivation context string.
    pub salt: String,
    /// Digest for derivation and signing.
    pub digest: DigestMethod,
    /// Payload compression policy.
    pub compression: CompressionMode,
    /// Opt-in maximum token age in seconds. `None` skips the age check,
    /// matching the framework default of never enforcing expiry.
    pub max_age: Option<u64>,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_string(),
            digest: DigestMethod::default(),
            compression: CompressionMode::default(),
            max_age: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_parsing() {
        assert_eq!("sha1".parse::<DigestMethod>(), Ok(DigestMethod::Sha1));
        assert_eq!("SHA1".parse::<DigestMethod>(), Ok(DigestMethod::Sha1));
        assert_eq!("sha256".parse::<DigestMethod>(), Ok(DigestMethod::Sha256));
        assert_eq!("sha512".parse::<DigestMethod>(), Ok(DigestMethod::Sha512));
        assert!("md5".parse::<DigestMethod>().is_err());
    }

    #[test]
    fn test_compression_parsing() {
        assert_eq!("auto".parse::<CompressionMode>(), Ok(CompressionMode::Auto));
        assert_eq!(
            "Always".parse::<CompressionMode>(),
            Ok(CompressionMode::Always)
        );
        assert_eq!(
            "NEVER".parse::<CompressionMode>(),
            Ok(CompressionMode::Never)
        );
        assert!("sometimes".parse::<CompressionMode>().is_err());
    }

    #[test]
    fn test_defaults_match_target_framework() {
        let config = SignerConfig::default();
        assert_eq!(config.salt, "cookie-session");
        assert_eq!(config.digest, DigestMethod::Sha1);
        assert_eq!(config.compression, CompressionMode::Auto);
        assert_eq!(config.max_age, None);
    }
}
