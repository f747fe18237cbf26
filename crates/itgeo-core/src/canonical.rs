//! # Canonical Serialization — Reproducible Deck Payload Bytes
//!
//! Defines [`CanonicalBytes`], the only construction path for bytes that feed
//! digest computation: the deck payload written into the archive and the
//! digest the build prints for it.
//!
//! ## Invariant
//!
//! The inner buffer is private and the sole constructor is
//! [`CanonicalBytes::new`], which walks the value as a JSON tree (rejecting
//! floats, which have no stable canonical rendering) and then serializes it
//! with `serde_jcs` per RFC 8785: sorted keys, compact separators, UTF-8.
//! Any function that hashes or writes payload bytes accepts `&CanonicalBytes`,
//! so a non-canonical byte sequence cannot reach a digest by construction.
//!
//! Rebuilding the deck from an unchanged entity table therefore produces a
//! byte-identical payload, which is what keeps the printed payload digest
//! meaningful as a change detector.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is [`CanonicalBytes::new`].
/// - Numeric values are integers; floats are rejected.
/// - Object keys are sorted, separators are compact (RFC 8785).
/// - The byte sequence is valid UTF-8 JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value contains
    /// a float, or [`CanonicalizationError::SerializationFailed`] if JSON
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let checked = reject_floats(value)?;
        let s = serde_jcs::to_string(&checked)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation or writing.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively validate that a JSON tree is float-free.
///
/// Integers, strings, booleans and null pass through unchanged; objects and
/// arrays are recursed. A number not representable as i64/u64 is a float and
/// is rejected.
fn reject_floats(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut checked = serde_json::Map::new();
            for (k, v) in map {
                checked.insert(k, reject_floats(v)?);
            }
            Ok(Value::Object(checked))
        }
        Value::Array(arr) => {
            let checked: Result<Vec<_>, _> = arr.into_iter().map(reject_floats).collect();
            Ok(Value::Array(checked?))
        }
    }
}
