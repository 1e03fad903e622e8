//! Scorebook Ball-Event Ledger
//!
//! Delivery records, extras classification, over/ball indexing and the
//! append-only ledger they live in. Everything here is canonically encoded
//! so a ledger replays to the same bytes on every platform.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod delivery;
pub mod encoding;
pub mod extras;
pub mod indexer;
pub mod input;
pub mod ledger;

pub use delivery::{Delivery, Dismissal, MAX_BAT_RUNS, MAX_RUN_OUT_RUNS, Outcome, WicketKind};
pub use encoding::{CanonicalDecode, CanonicalEncode};
pub use extras::{Classification, ExtraKind, ExtrasBreakdown, classify};
pub use indexer::{BallCoordinate, IndexedDelivery, OverBallIndexer, count_legal};
pub use input::{Crease, CreaseEnd, DeliveryInput, ExtrasInput, WicketInfo};
pub use ledger::Ledger;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_basic() {
        let crease = Crease::new("Rohit", "Gill", "Starc");
        let ledger = Ledger::new()
            .push(DeliveryInput::runs(4).into_delivery(&crease).unwrap())
            .push(DeliveryInput::wide(0).into_delivery(&crease).unwrap());

        let mut extras = ExtrasBreakdown::default();
        let mut total = 0;
        for delivery in &ledger {
            let c = classify(delivery);
            extras.add(&c);
            total += c.total();
        }
        assert_eq!(total, 5);
        assert_eq!(extras.wides, 1);
        assert_eq!(ledger.legal_balls(), 1);
    }
}
