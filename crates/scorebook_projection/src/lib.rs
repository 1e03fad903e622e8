//! Scorebook Scorecard Projection
//!
//! Folds an innings ledger into totals, player figures, snapshots and the
//! read-only views a scoreboard renders. Every output is a pure function of
//! the ledger, so replaying the same ledger always yields the same bytes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod figures;
pub mod snapshot;
pub mod views;

pub use aggregate::InningsTotals;
pub use figures::{BattingFigure, BattingStatus, BowlingFigure, PlayerFigures};
pub use snapshot::{InningsSnapshot, ReplayCheck, verify_replay};
pub use views::{
    BallCell, CurrentOverProgress, DEFAULT_RECENT_BALLS, OverGrid, OverRow, RecentBall, ViewConfig,
    describe, glyph, recent_balls,
};
