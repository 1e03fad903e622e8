//! Scorebook Match Engine
//!
//! Two innings over an append-only ball ledger: setup, crease selection,
//! innings transition, chase arithmetic and result resolution.
//! Every operation takes a value and returns the next one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chase;
pub mod config;
pub mod engine;
pub mod innings;
pub mod match_state;
pub mod result;
pub mod scorecard;

pub use chase::ChaseState;
pub use config::{
    DEFAULT_TOTAL_OVERS, MAX_PLAYERS, MAX_TOTAL_OVERS, MatchSetup, TeamSheet, TeamSide, Toss,
    TossDecision,
};
pub use engine::{
    append_delivery, end_innings_manually, get_scorecard, resolve_match_result,
    undo_last_delivery,
};
pub use innings::{CompletionReason, Innings};
pub use match_state::{InningsTransition, Match, MatchPhase, MatchStatus};
pub use result::{Margin, MatchResult};
pub use scorecard::{InningsState, NOT_REQUIRED_TEXT, NOT_STARTED_TEXT, ScorecardView};
