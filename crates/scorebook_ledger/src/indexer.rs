//! Over/ball indexing of a ledger.
//!
//! A legal delivery takes the next ball slot of the over and advances the
//! legal-ball counter. A wide or no-ball is shown at the slot the next
//! legal delivery will occupy and leaves the counter alone.

use crate::delivery::Delivery;
use scorebook_core::BALLS_PER_OVER;
use serde::{Deserialize, Serialize};

/// Position of a delivery in the innings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallCoordinate {
    /// Zero-based over index
    pub over: u32,
    /// Ball within the over, 1 to 6
    pub ball: u32,
}

impl BallCoordinate {
    /// Slot taken by the next legal ball after `legal_balls` have been bowled
    #[must_use]
    pub const fn next_slot(legal_balls: u32) -> Self {
        Self {
            over: legal_balls / BALLS_PER_OVER,
            ball: legal_balls % BALLS_PER_OVER + 1,
        }
    }
}

impl std::fmt::Display for BallCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.over, self.ball)
    }
}

/// A delivery with its derived coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedDelivery<'a> {
    /// Position in the ledger
    pub seq: usize,
    /// Over and ball
    pub coordinate: BallCoordinate,
    /// Legal balls bowled once this delivery is counted
    pub legal_balls: u32,
    /// The record itself
    pub delivery: &'a Delivery,
}

impl IndexedDelivery<'_> {
    /// Whether the delivery consumed a ball of the over
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.delivery.is_legal()
    }

    /// Whether this legal delivery was the sixth of its over
    #[must_use]
    pub fn completes_over(&self) -> bool {
        self.is_legal() && self.coordinate.ball == BALLS_PER_OVER
    }
}

/// Forward-only walk over a ledger assigning coordinates
#[derive(Debug, Clone)]
pub struct OverBallIndexer<'a> {
    deliveries: &'a [Delivery],
    position: usize,
    legal_balls: u32,
}

impl<'a> OverBallIndexer<'a> {
    /// Start indexing from the first delivery
    #[must_use]
    pub fn new(deliveries: &'a [Delivery]) -> Self {
        Self {
            deliveries,
            position: 0,
            legal_balls: 0,
        }
    }

    /// Legal balls counted so far
    #[must_use]
    pub const fn legal_balls(&self) -> u32 {
        self.legal_balls
    }

    /// Coordinate the next delivery would receive
    #[must_use]
    pub const fn next_coordinate(&self) -> BallCoordinate {
        BallCoordinate::next_slot(self.legal_balls)
    }
}

impl<'a> Iterator for OverBallIndexer<'a> {
    type Item = IndexedDelivery<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let delivery = self.deliveries.get(self.position)?;
        let coordinate = BallCoordinate::next_slot(self.legal_balls);
        if delivery.is_legal() {
            self.legal_balls += 1;
        }
        let indexed = IndexedDelivery {
            seq: self.position,
            coordinate,
            legal_balls: self.legal_balls,
            delivery,
        };
        self.position += 1;
        Some(indexed)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.deliveries.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OverBallIndexer<'_> {}

/// Count legal deliveries
#[must_use]
pub fn count_legal(deliveries: &[Delivery]) -> u32 {
    deliveries.iter().filter(|d| d.is_legal()).count() as u32
}
