use cookieforge::{SessionSigner, SessionStructure, SignerConfig};
use serde_json::Value;

pub fn structure(value: Value) -> SessionStructure {
    match value {
        Value::Object(map) => map,
        other => panic!("test structure must be a mapping, got {other:?}"),
    }
}

pub fn default_signer(secret: &str) -> SessionSigner {
    SessionSigner::new(secret, SignerConfig::default())
}
