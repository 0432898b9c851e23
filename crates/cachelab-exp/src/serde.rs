//! Canonical JSON helpers shared by the experiment tooling.

use cachelab_core::errors::{CachelabError, ErrorInfo};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes `value` as canonical JSON bytes.
///
/// The payload is first converted into a JSON value tree, which sorts every
/// object by key, so two structurally equal payloads always produce the
/// same bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CachelabError> {
    let tree = serde_json::to_value(value)
        .map_err(|err| wrap("json-encode", "failed to build JSON value tree", err))?;
    serde_json::to_vec(&tree)
        .map_err(|err| wrap("json-encode", "failed to encode canonical JSON", err))
}

/// Decodes a payload from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CachelabError> {
    serde_json::from_slice(bytes)
        .map_err(|err| wrap("json-decode", "failed to decode JSON payload", err))
}

fn wrap(code: &str, message: &str, err: serde_json::Error) -> CachelabError {
    CachelabError::Serde(ErrorInfo::new(code, message).with_hint(err.to_string()))
}
