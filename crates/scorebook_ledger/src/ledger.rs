//! Append-only ball-event ledger.
//!
//! The ledger is the only source of truth for an innings. Appends and pops
//! return a new ledger; every figure on a scorecard is folded from it.

use crate::delivery::Delivery;
use crate::encoding::{CanonicalDecode, CanonicalEncode};
use crate::indexer::{count_legal, BallCoordinate, OverBallIndexer};
use scorebook_core::{ScoreError, ScoreResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered sequence of deliveries for one innings
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    deliveries: Vec<Delivery>,
}

impl Ledger {
    /// Empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger holding `deliveries` in order
    #[must_use]
    pub fn from_deliveries(deliveries: Vec<Delivery>) -> Self {
        Self { deliveries }
    }

    /// New ledger with `delivery` appended at the end
    #[must_use]
    pub fn push(&self, delivery: Delivery) -> Self {
        let mut deliveries = Vec::with_capacity(self.deliveries.len() + 1);
        deliveries.extend_from_slice(&self.deliveries);
        deliveries.push(delivery);
        debug!(len = deliveries.len(), "delivery appended");
        Self { deliveries }
    }

    /// New ledger without its last entry, plus the entry removed
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::EmptyLedger`] when there is nothing to remove
    pub fn pop(&self) -> ScoreResult<(Self, Delivery)> {
        let (last, rest) = self.deliveries.split_last().ok_or(ScoreError::EmptyLedger)?;
        debug!(len = rest.len(), "delivery removed");
        Ok((Self::from_deliveries(rest.to_vec()), last.clone()))
    }

    /// Number of deliveries, legal or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    /// Whether nothing has been bowled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// All deliveries in order
    #[must_use]
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Iterate deliveries in order
    pub fn iter(&self) -> std::slice::Iter<'_, Delivery> {
        self.deliveries.iter()
    }

    /// Iterate deliveries with their over/ball coordinates
    #[must_use]
    pub fn indexed(&self) -> OverBallIndexer<'_> {
        OverBallIndexer::new(&self.deliveries)
    }

    /// Most recent delivery
    #[must_use]
    pub fn last(&self) -> Option<&Delivery> {
        self.deliveries.last()
    }

    /// Legal balls bowled
    #[must_use]
    pub fn legal_balls(&self) -> u32 {
        count_legal(&self.deliveries)
    }

    /// Coordinate the next delivery would be shown at
    #[must_use]
    pub fn next_coordinate(&self) -> BallCoordinate {
        BallCoordinate::next_slot(self.legal_balls())
    }

    /// Canonical bytes of the ledger
    ///
    /// # Errors
    ///
    /// Propagates postcard failures
    pub fn to_bytes(&self) -> ScoreResult<Vec<u8>> {
        self.encode()
    }

    /// Rebuild a ledger from canonical bytes, validating every delivery
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Encoding`] for malformed bytes or
    /// [`ScoreError::InvalidDeliveryShape`] for a record that fails validation
    pub fn from_bytes(bytes: &[u8]) -> ScoreResult<Self> {
        let ledger = Self::decode(bytes)?;
        for delivery in ledger.iter() {
            delivery.validate()?;
        }
        Ok(ledger)
    }
}

impl CanonicalEncode for Ledger {}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Delivery;
    type IntoIter = std::slice::Iter<'a, Delivery>;

    fn into_iter(self) -> Self::IntoIter {
        self.deliveries.iter()
    }
}

impl FromIterator<Delivery> for Ledger {
    fn from_iter<I: IntoIterator<Item = Delivery>>(iter: I) -> Self {
        Self::from_deliveries(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::Outcome;

    fn ball(outcome: Outcome) -> Delivery {
        Delivery::new(outcome, "Rohit", "Gill", "Starc")
    }

    #[test]
    fn test_push_leaves_original() {
        let empty = Ledger::new();
        let one = empty.push(ball(Outcome::Runs { runs: 1 }));
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(one.last(), Some(&ball(Outcome::Runs { runs: 1 })));
    }

    #[test]
    fn test_pop_returns_last() {
        let ledger = Ledger::new()
            .push(ball(Outcome::DOT))
            .push(ball(Outcome::Wide { additional: 0 }));
        let (rest, removed) = ledger.pop().unwrap();
        assert_eq!(removed.outcome, Outcome::Wide { additional: 0 });
        assert_eq!(rest.len(), 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_pop_empty() {
        assert_eq!(Ledger::new().pop().unwrap_err(), ScoreError::EmptyLedger);
    }

    #[test]
    fn test_legal_balls_and_next_coordinate() {
        let ledger: Ledger = [
            ball(Outcome::DOT),
            ball(Outcome::NoBall { bat_runs: 0 }),
            ball(Outcome::Bye { runs: 1 }),
        ]
        .into_iter()
        .collect();
        assert_eq!(ledger.legal_balls(), 2);
        assert_eq!(ledger.next_coordinate().to_string(), "0.3");
        assert_eq!(ledger.indexed().count(), 3);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let ledger = Ledger::new()
            .push(ball(Outcome::Runs { runs: 6 }))
            .push(ball(Outcome::LegBye { runs: 2 }));
        let bytes = ledger.to_bytes().unwrap();
        assert_eq!(Ledger::from_bytes(&bytes).unwrap(), ledger);
    }

    #[test]
    fn test_from_bytes_validates() {
        let bad = Ledger::new().push(ball(Outcome::Bye { runs: 0 }));
        let bytes = bad.to_bytes().unwrap();
        assert!(matches!(
            Ledger::from_bytes(&bytes),
            Err(ScoreError::InvalidDeliveryShape { .. })
        ));
    }

    #[test]
    fn test_json_is_plain_array() {
        let ledger = Ledger::new().push(ball(Outcome::DOT));
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
    }

    proptest::proptest! {
        #[test]
        fn prop_push_then_pop_is_identity(runs in proptest::collection::vec(0u8..=6, 0..40), last in 0u8..=6) {
            let ledger: Ledger = runs.iter().map(|r| ball(Outcome::Runs { runs: *r })).collect();
            let (back, removed) = ledger.push(ball(Outcome::Runs { runs: last })).pop().unwrap();
            proptest::prop_assert_eq!(back, ledger);
            proptest::prop_assert_eq!(removed.outcome, Outcome::Runs { runs: last });
        }
    }
}
