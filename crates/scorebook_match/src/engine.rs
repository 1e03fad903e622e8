//! The engine surface a transport layer drives.
//!
//! Thin free functions over [`Innings`] and [`Match`]. None of them
//! mutate their input; callers keep the returned value.

use crate::innings::Innings;
use crate::match_state::{InningsTransition, Match};
use crate::result::MatchResult;
use crate::scorecard::ScorecardView;
use scorebook_core::ScoreResult;
use scorebook_ledger::Delivery;
use scorebook_projection::ViewConfig;

/// Append one delivery to an innings
///
/// # Errors
///
/// - [`scorebook_core::ScoreError::InningsAlreadyCompleted`] if the innings is not live
/// - [`scorebook_core::ScoreError::OverLimitExceeded`] past the legal-ball allowance
/// - [`scorebook_core::ScoreError::InvalidDeliveryShape`] for an inconsistent record
pub fn append_delivery(innings: &Innings, delivery: Delivery) -> ScoreResult<Innings> {
    innings.append(delivery)
}

/// Remove the last delivery of an innings
///
/// # Errors
///
/// Returns [`scorebook_core::ScoreError::EmptyLedger`] if there is nothing to remove
pub fn undo_last_delivery(innings: &Innings) -> ScoreResult<Innings> {
    innings.undo()
}

/// Close the first innings, fixing the target and opening the second
///
/// # Errors
///
/// - [`scorebook_core::ScoreError::NothingBowledYet`] before the first legal ball
/// - [`scorebook_core::ScoreError::NotFirstInnings`] once the second innings is open
pub fn end_innings_manually(m: &Match) -> ScoreResult<(Match, InningsTransition)> {
    m.end_innings_manually()
}

/// Scorecard for innings `number`; a placeholder when it has not started
#[must_use]
pub fn get_scorecard(m: &Match, number: u8, config: &ViewConfig) -> ScorecardView {
    m.scorecard(number, config)
}

/// Result of a completed match
#[must_use]
pub fn resolve_match_result(m: &Match) -> MatchResult {
    m.result()
}
