//! # Collection Codec
//!
//! Converts whole collections to and from the opaque bytes kept under each
//! store key. Values are JSON; `serde_json` is built with `float_roundtrip`
//! so weights and readings decode to exactly the value that was encoded, and
//! chrono timestamps keep their full sub-second precision.
//!
//! JSON has no NaN or infinity; `serde_json` writes them as `null`, which the
//! record types cannot read back. [`encode`] therefore checks that its output
//! decodes and refuses the value otherwise.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::CodecError;

/// Encode a value into bytes suitable for the key-value store
///
/// Fails with [`CodecError::Encode`] if the bytes would not decode back into `T`,
/// e.g. a non-finite float.
pub fn encode<T: Serialize + DeserializeOwned>(value: &T) -> Result<Vec<u8>, CodecError> {
    let bytes = serde_json::to_vec(value).map_err(CodecError::Encode)?;
    serde_json::from_slice::<T>(&bytes).map_err(CodecError::Encode)?;
    Ok(bytes)
}

/// Decode bytes previously produced by [`encode`]
///
/// Malformed, truncated or schema-mismatched input is reported as
/// [`CodecError::Decode`], never a panic.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}
