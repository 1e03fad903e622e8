//! Innings snapshots and replay verification.
//!
//! A snapshot is everything derivable from one ledger: totals, batting and
//! bowling cards, and the coordinate of the next ball. Its digest is the
//! BLAKE3 hash of its canonical bytes, so two folds of the same ledger can
//! be compared without walking the figures.

use crate::aggregate::InningsTotals;
use crate::figures::{BattingFigure, BowlingFigure, PlayerFigures};
use scorebook_core::{Digest, PlayerName, ScoreResult};
use scorebook_ledger::{BallCoordinate, CanonicalDecode, CanonicalEncode, Ledger};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Derived state of one innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsSnapshot {
    /// Running totals
    pub totals: InningsTotals,
    /// Batting card in order of appearance
    pub batting: Vec<BattingFigure>,
    /// Bowling card in order of first delivery
    pub bowling: Vec<BowlingFigure>,
    /// Where the next delivery will be shown
    pub next_ball: BallCoordinate,
}

impl InningsSnapshot {
    /// Fold a ledger into a snapshot
    #[must_use]
    pub fn project(ledger: &Ledger, at_crease: &[PlayerName], squad: &[PlayerName]) -> Self {
        let totals = InningsTotals::fold(ledger);
        let figures = PlayerFigures::fold(ledger, at_crease, squad);
        Self {
            totals,
            batting: figures.batting.into_values().collect(),
            bowling: figures.bowling.into_values().collect(),
            next_ball: ledger.next_coordinate(),
        }
    }

    /// Figure for a named batter
    #[must_use]
    pub fn batter(&self, name: &str) -> Option<&BattingFigure> {
        self.batting.iter().find(|b| b.name.as_str() == name)
    }

    /// Figure for a named bowler
    #[must_use]
    pub fn bowler(&self, name: &str) -> Option<&BowlingFigure> {
        self.bowling.iter().find(|b| b.name.as_str() == name)
    }

    /// BLAKE3 digest of the canonical encoding
    ///
    /// # Errors
    ///
    /// Propagates encoding failures
    pub fn digest(&self) -> ScoreResult<Digest> {
        self.canonical_digest()
    }

    /// Encode to canonical bytes
    ///
    /// # Errors
    ///
    /// Propagates encoding failures
    pub fn to_bytes(&self) -> ScoreResult<Vec<u8>> {
        self.encode()
    }

    /// Decode from canonical bytes
    ///
    /// # Errors
    ///
    /// Returns [`scorebook_core::ScoreError::Encoding`] for malformed input
    pub fn from_bytes(bytes: &[u8]) -> ScoreResult<Self> {
        Self::decode(bytes)
    }
}

impl CanonicalEncode for InningsSnapshot {}

/// Outcome of folding one ledger twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayCheck {
    /// Deliveries replayed
    pub deliveries: usize,
    /// Digest of the first fold
    pub first: Digest,
    /// Digest of the second fold
    pub second: Digest,
}

impl ReplayCheck {
    /// Whether both folds produced identical bytes
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.first == self.second
    }
}

/// Fold the same ledger twice and compare digests
///
/// # Errors
///
/// Propagates encoding failures
pub fn verify_replay(
    ledger: &Ledger,
    at_crease: &[PlayerName],
    squad: &[PlayerName],
) -> ScoreResult<ReplayCheck> {
    let first = InningsSnapshot::project(ledger, at_crease, squad).digest()?;
    let second = InningsSnapshot::project(ledger, at_crease, squad).digest()?;
    let check = ReplayCheck {
        deliveries: ledger.len(),
        first,
        second,
    };
    debug!(
        deliveries = check.deliveries,
        digest = %first.short(),
        consistent = check.is_consistent(),
        "replay verified"
    );
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebook_ledger::{Delivery, Dismissal, Outcome, WicketKind};

    fn ball(outcome: Outcome) -> Delivery {
        Delivery::new(outcome, "Rohit", "Gill", "Starc")
    }

    fn sample() -> Ledger {
        [
            ball(Outcome::Runs { runs: 4 }),
            ball(Outcome::Wide { additional: 0 }),
            ball(Outcome::DOT).with_dismissal(Dismissal::new(WicketKind::Lbw, "Rohit")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_project() {
        let snapshot = InningsSnapshot::project(&sample(), &[], &[]);
        assert_eq!(snapshot.totals.runs, 5);
        assert_eq!(snapshot.totals.wickets, 1);
        assert_eq!(snapshot.next_ball.to_string(), "0.3");
        assert_eq!(snapshot.batter("Rohit").unwrap().runs, 4);
        assert_eq!(snapshot.bowler("Starc").unwrap().wickets, 1);
        assert!(snapshot.batter("Kohli").is_none());
    }

    #[test]
    fn test_digest_stable() {
        let a = InningsSnapshot::project(&sample(), &[], &[]);
        let b = InningsSnapshot::project(&sample(), &[], &[]);
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());

        let shorter = sample().pop().unwrap().0;
        let c = InningsSnapshot::project(&shorter, &[], &[]);
        assert_ne!(a.digest().unwrap(), c.digest().unwrap());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let snapshot = InningsSnapshot::project(&sample(), &[], &[]);
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(InningsSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_verify_replay() {
        let check = verify_replay(&sample(), &[], &[]).unwrap();
        assert!(check.is_consistent());
        assert_eq!(check.deliveries, 3);
    }

    proptest::proptest! {
        #[test]
        fn prop_replay_is_bit_identical(runs in proptest::collection::vec(0u8..=6, 0..150)) {
            let ledger: Ledger = runs.iter().map(|r| ball(Outcome::Runs { runs: *r })).collect();
            let check = verify_replay(&ledger, &[], &[]).unwrap();
            proptest::prop_assert!(check.is_consistent());
            let a = InningsSnapshot::project(&ledger, &[], &[]).to_bytes().unwrap();
            let b = InningsSnapshot::project(&ledger, &[], &[]).to_bytes().unwrap();
            proptest::prop_assert_eq!(a, b);
        }
    }
}
