//! Snapshot fingerprints.
//!
//! A BLAKE3 hash of a snapshot's canonical bytes. Two snapshots folded from
//! the same ledger carry the same digest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 fingerprint of a projected snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Hash canonical snapshot bytes
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Full 64-character hex form
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First six bytes in hex, for scorecards and logs
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_bytes_same_digest() {
        let d1 = Digest::compute(b"4 1 W 0 6 1");
        assert_eq!(d1, Digest::compute(b"4 1 W 0 6 1"));
        assert_ne!(d1, Digest::compute(b"4 1 W 0 6 2"));
    }

    #[test]
    fn test_hex_forms() {
        let digest = Digest::compute(b"ledger");
        assert_eq!(digest.to_hex().len(), 64);
        assert_eq!(digest.to_string(), digest.to_hex());
        assert_eq!(digest.short().len(), 12);
        assert!(digest.to_hex().starts_with(&digest.short()));
    }
}
