//! Token signing and verification.
//!
//! Implements the signed-token wire format used by Flask-style session
//! cookies: `[.]payload.timestamp.signature` with unpadded URL-safe base64
//! segments, signed by an HMAC whose key is derived from the framework
//! secret. Byte-for-byte interoperable with tokens minted by the target
//! frameworks.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::config::{CompressionMode, DigestMethod, ForgeError, Result, SignerConfig};
use crate::session::{payload, SessionStructure};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Leading character marking a compressed payload segment. The wire format
/// overloads the segment separator for this.
const COMPRESSION_MARKER: char = '.';

/// Segment separator.
const SEPARATOR: char = '.';

/// Widest timestamp the wire format admits, in bytes.
const MAX_TIMESTAMP_BYTES: usize = 8;

/// Signs and verifies session tokens for one secret.
///
/// The signing key is derived once at construction:
/// `HMAC_<digest>(key = secret, message = salt)`, the derivation the target
/// frameworks document for their session interface.
#[derive(Clone)]
pub struct SessionSigner {
    derived_key: Vec<u8>,
    config: SignerConfig,
}

impl SessionSigner {
    /// Creates a signer for `secret` under the given codec configuration.
    #[must_use]
    pub fn new(secret: &str, config: SignerConfig) -> Self {
        let derived_key = derive_key(config.digest, secret.as_bytes(), config.salt.as_bytes());
        Self {
            derived_key,
            config,
        }
    }

    /// Signs a structure into a complete token issued at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Encoding`] when serialization fails or the
    /// system clock predates the Unix epoch.
    pub fn sign(&self, structure: &SessionStructure) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ForgeError::Encoding(format!("system clock predates the epoch: {e}")))?
            .as_secs();
        self.sign_at(structure, now)
    }

    /// Signs a structure with an explicit issue time in seconds since the
    /// Unix epoch. Deterministic; [`sign`](Self::sign) passes the current
    /// time. Useful for backdating a forged token.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Encoding`] when serialization fails.
    pub fn sign_at(&self, structure: &SessionStructure, issued_at: u64) -> Result<String> {
        let serialized = payload::serialize(structure)?;
        let (compressed, body) = self.encode_body(&serialized);

        let mut value = String::new();
        if compressed {
            value.push(COMPRESSION_MARKER);
        }
        value.push_str(&URL_SAFE_NO_PAD.encode(&body));
        value.push(SEPARATOR);
        value.push_str(&URL_SAFE_NO_PAD.encode(timestamp_to_bytes(issued_at)));

        // The signature covers every byte before the final separator,
        // including the compression marker.
        let signature = self.keyed_digest(value.as_bytes());
        value.push(SEPARATOR);
        value.push_str(&URL_SAFE_NO_PAD.encode(&signature));
        Ok(value)
    }

    /// Verifies a token and returns the decoded session structure.
    ///
    /// # Errors
    ///
    /// - [`ForgeError::MalformedToken`] for fewer than three segments or an
    ///   undecodable timestamp.
    /// - [`ForgeError::BadSignature`] when the signature segment does not
    ///   decode or does not match (constant-time comparison).
    /// - [`ForgeError::TokenExpired`] when `max_age` is configured and the
    ///   token is older.
    /// - [`ForgeError::Decompression`] / [`ForgeError::MalformedPayload`]
    ///   when the payload segment does not decode to a session mapping.
    pub fn verify(&self, token: &str) -> Result<SessionStructure> {
        let token = token.trim();
        if token.split(SEPARATOR).count() < 3 {
            return Err(ForgeError::MalformedToken(
                "expected three dot-separated segments".into(),
            ));
        }
        let (signed, signature_b64) = token
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| ForgeError::MalformedToken("missing signature separator".into()))?;
        let signature = decode_segment(signature_b64).map_err(|_| ForgeError::BadSignature)?;
        if !self.signature_matches(signed.as_bytes(), &signature) {
            return Err(ForgeError::BadSignature);
        }

        let (body, timestamp_b64) = signed
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| ForgeError::MalformedToken("missing timestamp separator".into()))?;
        let timestamp_bytes = decode_segment(timestamp_b64)
            .map_err(|e| ForgeError::MalformedToken(format!("timestamp segment: {e}")))?;
        let issued_at = timestamp_from_bytes(&timestamp_bytes)?;

        if let Some(max_age) = self.config.max_age {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|e| ForgeError::Encoding(format!("system clock predates the epoch: {e}")))?
                .as_secs();
            let age = now.saturating_sub(issued_at);
            if age > max_age {
                return Err(ForgeError::TokenExpired { age, max_age });
            }
        }

        decode_payload_segment(body)
    }

    /// Extracts the payload bytes without consulting any key.
    ///
    /// Strips the optional compression marker, takes the text up to the
    /// first separator (or all of it when there is none), decodes it and
    /// decompresses when marked. The output is untrusted by construction:
    /// no signature is checked.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::MalformedPayload`] or
    /// [`ForgeError::Decompression`] when the segment does not decode.
    pub fn decode_raw(token: &str) -> Result<Vec<u8>> {
        let token = token.trim();
        let (compressed, rest) = match token.strip_prefix(COMPRESSION_MARKER) {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let encoded = rest.split(SEPARATOR).next().unwrap_or(rest);
        let raw = decode_segment(encoded)
            .map_err(|e| ForgeError::MalformedPayload(format!("payload segment: {e}")))?;
        if compressed {
            payload::decompress(&raw)
        } else {
            Ok(raw)
        }
    }

    /// Applies the compression policy, returning the marker flag and the
    /// bytes to encode.
    fn encode_body(&self, serialized: &[u8]) -> (bool, Vec<u8>) {
        match self.config.compression {
            CompressionMode::Never => (false, serialized.to_vec()),
            CompressionMode::Always => (true, payload::compress(serialized)),
            CompressionMode::Auto => {
                let compressed = payload::compress(serialized);
                // The marker itself costs one character, so compression has
                // to win by more than one byte to pay off.
                if compressed.len() < serialized.len().saturating_sub(1) {
                    (true, compressed)
                } else {
                    (false, serialized.to_vec())
                }
            }
        }
    }

    fn keyed_digest(&self, message: &[u8]) -> Vec<u8> {
        match self.config.digest {
            DigestMethod::Sha1 => digest_with::<HmacSha1>(&self.derived_key, message),
            DigestMethod::Sha256 => digest_with::<HmacSha256>(&self.derived_key, message),
            DigestMethod::Sha512 => digest_with::<HmacSha512>(&self.derived_key, message),
        }
    }

    fn signature_matches(&self, message: &[u8], signature: &[u8]) -> bool {
        match self.config.digest {
            DigestMethod::Sha1 => verify_with::<HmacSha1>(&self.derived_key, message, signature),
            DigestMethod::Sha256 => {
                verify_with::<HmacSha256>(&self.derived_key, message, signature)
            }
            DigestMethod::Sha512 => {
                verify_with::<HmacSha512>(&self.derived_key, message, signature)
            }
        }
    }
}

/// Derives the signing key: `HMAC_<digest>(key = secret, message = salt)`.
fn derive_key(digest: DigestMethod, secret: &[u8], salt: &[u8]) -> Vec<u8> {
    match digest {
        DigestMethod::Sha1 => digest_with::<HmacSha1>(secret, salt),
        DigestMethod::Sha256 => digest_with::<HmacSha256>(secret, salt),
        DigestMethod::Sha512 => digest_with::<HmacSha512>(secret, salt),
    }
}

/// # Panics
///
/// Panics if HMAC initialization fails, which cannot happen: HMAC accepts
/// keys of any length.
fn digest_with<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = <M as Mac>::new_from_slice(key).expect("HMAC accepts any key size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Constant-time signature comparison via the MAC's own verifier.
fn verify_with<M: Mac + KeyInit>(key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let mut mac = <M as Mac>::new_from_slice(key).expect("HMAC accepts any key size");
    mac.update(message);
    mac.verify_slice(signature).is_ok()
}

/// Decodes unpadded URL-safe base64, tolerating trailing `=` padding left in
/// by careless copy-paste.
fn decode_segment(segment: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))
}

/// Decodes a payload segment: optional marker, base64, optional zlib.
fn decode_payload_segment(body: &str) -> Result<SessionStructure> {
    let (compressed, encoded) = match body.strip_prefix(COMPRESSION_MARKER) {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let raw = decode_segment(encoded)
        .map_err(|e| ForgeError::MalformedPayload(format!("payload segment: {e}")))?;
    let bytes = if compressed {
        payload::decompress(&raw)?
    } else {
        raw
    };
    payload::deserialize(&bytes)
}

/// Encodes seconds since the Unix epoch as a minimal big-endian byte string.
/// No leading zero bytes; zero encodes as the empty string.
fn timestamp_to_bytes(seconds: u64) -> Vec<u8> {
    let bytes = seconds.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

/// Decodes a minimal big-endian byte string into seconds since the epoch.
fn timestamp_from_bytes(bytes: &[u8]) -> Result<u64> {
    if bytes.len() > MAX_TIMESTAMP_BYTES {
        return Err(ForgeError::MalformedToken(
            "timestamp wider than 64 bits".into(),
        ));
    }
    Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}
