//! Payload transforms.
//!
//! Converts session structures to and from the compact byte payload carried
//! inside a token: JSON serialization plus optional zlib compression. Pure
//! data transforms with no I/O.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde_json::Value;

use crate::config::{ForgeError, Result};
use crate::session::structure::{value_kind, SessionStructure};

/// Serializes a structure to compact JSON bytes, preserving key order.
///
/// # Errors
///
/// Returns [`ForgeError::Encoding`] if serialization fails.
pub fn serialize(structure: &SessionStructure) -> Result<Vec<u8>> {
    serde_json::to_vec(structure).map_err(|e| ForgeError::Encoding(e.to_string()))
}

/// Deserializes payload bytes back into a session structure.
///
/// # Errors
///
/// Returns [`ForgeError::MalformedPayload`] when the bytes are not JSON or
/// the top-level value is not a mapping. The mapping requirement is part of
/// the session contract and is what lets the secret search discard payloads
/// that merely happen to decode under a wrong key.
pub fn deserialize(bytes: &[u8]) -> Result<SessionStructure> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ForgeError::MalformedPayload(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ForgeError::MalformedPayload(format!(
            "session payload must be a mapping, got {}",
            value_kind(&other)
        ))),
    }
}

/// Compresses payload bytes with zlib at the default level, matching the
/// level the target framework uses. The zlib-rs backend keeps the emitted
/// stream byte-identical to the framework's, so forged compressed tokens do
/// not stand out.
#[must_use]
pub fn compress(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .expect("writing to a Vec cannot fail");
    encoder.finish().expect("writing to a Vec cannot fail")
}

/// Decompresses a zlib-compressed payload.
///
/// # Errors
///
/// Returns [`ForgeError::Decompression`] when the bytes are not a valid zlib
/// stream.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| ForgeError::Decompression(e.to_string()))?;
    Ok(out)
}
