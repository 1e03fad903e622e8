//! Extras classification.
//!
//! Splits the runs of a delivery into the part credited to the striker and
//! the part booked as extras. `bat_runs + extra_runs` is always what the
//! delivery adds to the innings total.

use crate::delivery::{Delivery, Outcome};
use serde::{Deserialize, Serialize};

/// Extra category that governs a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtraKind {
    /// No extra (runs off the bat or a dot)
    None,
    /// Wide
    Wide,
    /// No-ball
    NoBall,
    /// Bye
    Bye,
    /// Leg-bye
    LegBye,
}

/// Run split for a single delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Runs credited to the striker
    pub bat_runs: u32,
    /// All extras, penalty included
    pub extra_runs: u32,
    /// Category of the extra
    pub kind: ExtraKind,
    /// Penalty runs inside `extra_runs`
    pub penalty: u32,
}

impl Classification {
    /// Runs added to the innings total
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.bat_runs + self.extra_runs
    }

    /// Runs charged against the bowler (byes, leg-byes and penalties are not)
    #[must_use]
    pub const fn charged_to_bowler(&self) -> u32 {
        match self.kind {
            ExtraKind::Wide | ExtraKind::NoBall => self.bat_runs + self.extra_runs - self.penalty,
            ExtraKind::None | ExtraKind::Bye | ExtraKind::LegBye => self.bat_runs,
        }
    }

    /// Whether the delivery consumes a ball of the over
    #[must_use]
    pub const fn is_legal(&self) -> bool {
        !matches!(self.kind, ExtraKind::Wide | ExtraKind::NoBall)
    }

    /// Whether the striker faced the ball (everything but a wide)
    #[must_use]
    pub const fn faced_by_striker(&self) -> bool {
        !matches!(self.kind, ExtraKind::Wide)
    }

    /// Boundary four off the bat
    #[must_use]
    pub const fn is_four(&self) -> bool {
        self.bat_runs == 4
    }

    /// Six off the bat
    #[must_use]
    pub const fn is_six(&self) -> bool {
        self.bat_runs == 6
    }
}

/// Classify one delivery
#[must_use]
pub fn classify(delivery: &Delivery) -> Classification {
    let penalty = u32::from(delivery.penalty);
    let (bat_runs, extra_runs, kind) = match delivery.outcome {
        Outcome::Runs { runs } => (u32::from(runs), 0, ExtraKind::None),
        Outcome::Wide { additional } => (0, 1 + u32::from(additional), ExtraKind::Wide),
        Outcome::NoBall { bat_runs } => (u32::from(bat_runs), 1, ExtraKind::NoBall),
        Outcome::Bye { runs } => (0, u32::from(runs), ExtraKind::Bye),
        Outcome::LegBye { runs } => (0, u32::from(runs), ExtraKind::LegBye),
    };
    Classification {
        bat_runs,
        extra_runs: extra_runs + penalty,
        kind,
        penalty,
    }
}

/// Innings extras by category, in runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasBreakdown {
    /// Wide runs
    pub wides: u32,
    /// No-ball extras
    pub no_balls: u32,
    /// Byes
    pub byes: u32,
    /// Leg-byes
    pub leg_byes: u32,
    /// Penalty runs
    pub penalties: u32,
}

impl ExtrasBreakdown {
    /// Add one classified delivery
    pub fn add(&mut self, c: &Classification) {
        let without_penalty = c.extra_runs - c.penalty;
        match c.kind {
            ExtraKind::None => {}
            ExtraKind::Wide => self.wides += without_penalty,
            ExtraKind::NoBall => self.no_balls += without_penalty,
            ExtraKind::Bye => self.byes += without_penalty,
            ExtraKind::LegBye => self.leg_byes += without_penalty,
        }
        self.penalties += c.penalty;
    }

    /// All extras
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes + self.penalties
    }
}
