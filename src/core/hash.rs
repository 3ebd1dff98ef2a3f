//! Content hashes for module descriptors.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 digest of a module's descriptor content.
///
/// Rendered as `sha256:<lowercase hex>`, the same format used for checksums
/// throughout the crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashValue([u8; 32]);

impl HashValue {
    /// Hash the given bytes.
    pub fn of(content: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_ref());
        Self(hasher.finalize().into())
    }

    /// Hash of the empty string, the content hash of a module with no descriptor.
    pub fn empty() -> Self {
        Self::of(b"")
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Default for HashValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", hex::encode(self.0))
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({self})")
    }
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
