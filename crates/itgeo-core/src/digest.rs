//! SHA-256 digest helpers.
//!
//! Two digest paths exist in the deck pipeline and both live here:
//!
//! - [`sha256_hex`] hashes a complete [`CanonicalBytes`] payload, used for
//!   the `deck.json` digest the build prints.
//! - [`Sha256Accumulator`] feeds a hasher incrementally, used for the
//!   domain-prefixed note identity digest where the input is a prefix plus
//!   a code rather than one canonical document.

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// Compute the SHA-256 of canonical bytes as 64 lowercase hex digits.
///
/// Accepts only `&CanonicalBytes`, never raw `&[u8]`, so every payload
/// digest in the system is computed over the canonical serialization.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    let hash = Sha256::digest(data.as_bytes());
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Incremental SHA-256 for composite, domain-prefixed digests.
///
/// Callers feed a domain separation prefix first, then the payload parts,
/// and finish with [`finalize_hex`](Self::finalize_hex).
#[derive(Debug, Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the digest.
    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Consume the accumulator and return 64 lowercase hex digits.
    pub fn finalize_hex(self) -> String {
        self.hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
