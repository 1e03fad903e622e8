//! Canonical encoding for ledgers and snapshots.
//!
//! Uses postcard for byte-stable encoding. Equal values always produce
//! equal bytes, which is what snapshot digests rely on.

use scorebook_core::{Digest, ScoreResult};
use serde::{Deserialize, Serialize};

/// Trait for canonical serialization
pub trait CanonicalEncode: Serialize {
    /// Encode to canonical bytes
    ///
    /// # Errors
    ///
    /// Returns [`scorebook_core::ScoreError::Encoding`] if postcard rejects the value
    fn encode(&self) -> ScoreResult<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// BLAKE3 digest of the canonical bytes
    ///
    /// # Errors
    ///
    /// Propagates encoding failures
    fn canonical_digest(&self) -> ScoreResult<Digest> {
        Ok(Digest::compute(&self.encode()?))
    }
}

/// Trait for canonical deserialization
pub trait CanonicalDecode<'de>: Deserialize<'de> {
    /// Decode from canonical bytes
    ///
    /// # Errors
    ///
    /// Returns [`scorebook_core::ScoreError::Encoding`] for malformed input
    fn decode(data: &'de [u8]) -> ScoreResult<Self>
    where
        Self: Sized,
    {
        Ok(postcard::from_bytes(data)?)
    }
}

impl<'de, T: Deserialize<'de>> CanonicalDecode<'de> for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{Delivery, Dismissal, Outcome, WicketKind};
    use crate::ledger::Ledger;
    use proptest::prelude::*;
    use scorebook_core::ScoreError;

    fn sample() -> Ledger {
        [Delivery::new(Outcome::NoBall { bat_runs: 2 }, "Rohit", "Gill", "Starc")
            .with_dismissal(Dismissal::new(WicketKind::RunOut, "Gill").with_fielder("Head"))]
        .into_iter()
        .collect()
    }

    fn single(runs: u8) -> Ledger {
        [Delivery::new(Outcome::Runs { runs }, "Rohit", "Gill", "Starc")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_encode_decode_ledger() {
        let original = sample();
        let encoded = original.encode().unwrap();
        let decoded = Ledger::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_encode_deterministic() {
        assert_eq!(sample().encode().unwrap(), sample().encode().unwrap());
        assert_eq!(
            sample().canonical_digest().unwrap(),
            sample().canonical_digest().unwrap()
        );
    }

    #[test]
    fn test_invalid_decode() {
        let result = Ledger::decode(&[0xFF, 0xFF, 0xFF]);
        assert!(matches!(result, Err(ScoreError::Encoding { .. })));
    }

    proptest::proptest! {
        #[test]
        fn prop_digest_tracks_content(a in 0u8..=6, b in 0u8..=6) {
            let same = single(a).canonical_digest().unwrap() == single(b).canonical_digest().unwrap();
            prop_assert_eq!(same, a == b);
        }
    }
}
