//! Deterministic fingerprints of kernel values.
//!
//! Re-deriving a partition level from the same cuts must yield the
//! same fingerprint: the construction is pure, and the fingerprint is
//! the witness. Fields are fed in a stable order.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 fingerprint, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    /// Fingerprint raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{hash:x}"))
    }

    /// A builder for incrementally fingerprinting structured values.
    pub fn builder() -> FingerprintBuilder {
        FingerprintBuilder {
            hasher: Sha256::new(),
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Incremental fingerprint builder feeding `name:value` fields.
pub struct FingerprintBuilder {
    hasher: Sha256,
}

impl FingerprintBuilder {
    /// Feed a string field.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.hasher.update(name.as_bytes());
        self.hasher.update(b":");
        self.hasher.update(value.as_bytes());
        self.hasher.update(b"\n");
        self
    }

    /// Feed an unsigned integer field.
    pub fn field_u64(self, name: &str, value: u64) -> Self {
        self.field(name, &value.to_string())
    }

    /// Finalize and produce the fingerprint.
    pub fn finish(self) -> Fingerprint {
        let hash = self.hasher.finalize();
        Fingerprint(format!("{hash:x}"))
    }
}
