//! A single innings: the ledger owner.
//!
//! An innings is an immutable value. Appending, undoing and selecting
//! players return a new innings and leave the receiver untouched, so a
//! rejected request never needs rolling back.

use crate::config::TeamSide;
use scorebook_core::{BALLS_PER_OVER, MAX_WICKETS, PlayerName, ScoreError, ScoreResult};
use scorebook_ledger::{Crease, Delivery, Ledger};
use scorebook_projection::{BattingStatus, InningsSnapshot, InningsTotals};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Why an innings stopped accepting deliveries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionReason {
    /// Every available wicket has fallen
    AllOut,
    /// The legal-ball allowance is used up
    OversExhausted,
    /// The chasing side passed the target
    TargetReached,
    /// The scorer closed the innings
    Manual,
}

impl std::fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::AllOut => "all out",
            Self::OversExhausted => "overs completed",
            Self::TargetReached => "target reached",
            Self::Manual => "ended by scorer",
        })
    }
}

/// One side's turn to bat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    number: u8,
    batting: TeamSide,
    batting_squad: Vec<PlayerName>,
    bowling_squad: Vec<PlayerName>,
    total_overs: u32,
    target: Option<u32>,
    ledger: Ledger,
    striker: Option<PlayerName>,
    non_striker: Option<PlayerName>,
    bowler: Option<PlayerName>,
    ended_manually: bool,
}

impl Innings {
    /// Open innings `number` for `batting` with `total_overs` overs
    #[must_use]
    pub fn new(number: u8, batting: TeamSide, total_overs: u32) -> Self {
        Self {
            number,
            batting,
            batting_squad: Vec::new(),
            bowling_squad: Vec::new(),
            total_overs,
            target: None,
            ledger: Ledger::new(),
            striker: None,
            non_striker: None,
            bowler: None,
            ended_manually: false,
        }
    }

    /// Restrict batters and bowlers to the given squads
    #[must_use]
    pub fn with_squads(mut self, batting: Vec<PlayerName>, bowling: Vec<PlayerName>) -> Self {
        self.batting_squad = batting;
        self.bowling_squad = bowling;
        self
    }

    /// Set the chase target
    #[must_use]
    pub fn with_target(mut self, target: u32) -> Self {
        self.target = Some(target);
        self
    }

    /// 1 or 2
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Side batting
    #[must_use]
    pub const fn batting(&self) -> TeamSide {
        self.batting
    }

    /// Side bowling
    #[must_use]
    pub const fn bowling(&self) -> TeamSide {
        self.batting.other()
    }

    /// Overs allowed
    #[must_use]
    pub const fn total_overs(&self) -> u32 {
        self.total_overs
    }

    /// Legal balls allowed
    #[must_use]
    pub const fn limit_balls(&self) -> u32 {
        self.total_overs * BALLS_PER_OVER
    }

    /// Target to chase, second innings only
    #[must_use]
    pub const fn target(&self) -> Option<u32> {
        self.target
    }

    /// The ball-by-ball record
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Batting squad, empty when players are not tracked
    #[must_use]
    pub fn batting_squad(&self) -> &[PlayerName] {
        &self.batting_squad
    }

    /// Batter on strike
    #[must_use]
    pub const fn striker(&self) -> Option<&PlayerName> {
        self.striker.as_ref()
    }

    /// Batter at the other end
    #[must_use]
    pub const fn non_striker(&self) -> Option<&PlayerName> {
        self.non_striker.as_ref()
    }

    /// Current bowler
    #[must_use]
    pub const fn bowler(&self) -> Option<&PlayerName> {
        self.bowler.as_ref()
    }

    /// Whether the scorer closed the innings
    #[must_use]
    pub const fn ended_manually(&self) -> bool {
        self.ended_manually
    }

    /// Wickets that end the innings: ten, or one fewer than a smaller squad
    #[must_use]
    pub fn all_out_wickets(&self) -> u32 {
        match self.batting_squad.len() {
            0 | 1 => MAX_WICKETS,
            n => MAX_WICKETS.min(n as u32 - 1),
        }
    }

    /// Totals folded from the ledger
    #[must_use]
    pub fn totals(&self) -> InningsTotals {
        InningsTotals::fold(&self.ledger)
    }

    /// Batters in the middle, in order
    #[must_use]
    pub fn at_crease(&self) -> Vec<PlayerName> {
        self.striker
            .iter()
            .chain(self.non_striker.iter())
            .cloned()
            .collect()
    }

    /// Everything derivable from the ledger
    #[must_use]
    pub fn snapshot(&self) -> InningsSnapshot {
        InningsSnapshot::project(&self.ledger, &self.at_crease(), &self.batting_squad)
    }

    /// Why the innings is over, if it is
    #[must_use]
    pub fn completion(&self) -> Option<CompletionReason> {
        if self.ended_manually {
            return Some(CompletionReason::Manual);
        }
        let totals = self.totals();
        self.completion_from(&totals)
    }

    fn completion_from(&self, totals: &InningsTotals) -> Option<CompletionReason> {
        if self.target.is_some_and(|t| totals.runs >= t) {
            Some(CompletionReason::TargetReached)
        } else if totals.wickets >= self.all_out_wickets() {
            Some(CompletionReason::AllOut)
        } else if totals.legal_balls >= self.limit_balls() {
            Some(CompletionReason::OversExhausted)
        } else {
            None
        }
    }

    /// Whether the innings has stopped accepting deliveries
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion().is_some()
    }

    /// Whether anyone has come out to bat or a ball has been bowled
    #[must_use]
    pub fn has_started(&self) -> bool {
        !self.ledger.is_empty() || self.striker.is_some() || self.non_striker.is_some()
    }

    /// Players for the next ball
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::MissingPlayer`] for the first empty role
    pub fn crease(&self) -> ScoreResult<Crease> {
        let missing = |role: &str| ScoreError::MissingPlayer {
            role: role.to_string(),
        };
        Ok(Crease {
            striker: self.striker.clone().ok_or_else(|| missing("striker"))?,
            non_striker: self.non_striker.clone().ok_or_else(|| missing("non-striker"))?,
            bowler: self.bowler.clone().ok_or_else(|| missing("bowler"))?,
        })
    }

    fn check_batter(&self, name: &PlayerName) -> ScoreResult<()> {
        if name.is_empty() {
            return Err(ScoreError::validation("batter", "name cannot be blank"));
        }
        if !self.batting_squad.is_empty() && !self.batting_squad.contains(name) {
            return Err(ScoreError::UnknownPlayer {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_bowler(&self, name: &PlayerName) -> ScoreResult<()> {
        if name.is_empty() {
            return Err(ScoreError::validation("bowler", "name cannot be blank"));
        }
        if !self.bowling_squad.is_empty() && !self.bowling_squad.contains(name) {
            return Err(ScoreError::UnknownPlayer {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Put two batters at the crease
    ///
    /// # Errors
    ///
    /// Fails if the innings is over, the names are equal or unknown, or a
    /// batter has already been dismissed
    pub fn with_batters(&self, striker: PlayerName, non_striker: PlayerName) -> ScoreResult<Self> {
        if self.is_complete() {
            return Err(ScoreError::InningsAlreadyCompleted);
        }
        self.check_batter(&striker)?;
        self.check_batter(&non_striker)?;
        if striker == non_striker {
            return Err(ScoreError::validation(
                "nonStriker",
                "striker and non-striker must differ",
            ));
        }
        let snapshot = self.snapshot();
        for name in [&striker, &non_striker] {
            if snapshot
                .batter(name.as_str())
                .is_some_and(|b| b.status == BattingStatus::Out)
            {
                return Err(ScoreError::validation("batter", format!("{} is already out", name)));
            }
        }
        let mut next = self.clone();
        next.striker = Some(striker);
        next.non_striker = Some(non_striker);
        Ok(next)
    }

    /// Hand the ball to a bowler
    ///
    /// # Errors
    ///
    /// Fails if the innings is over or the bowler is not in the fielding squad
    pub fn with_bowler(&self, bowler: PlayerName) -> ScoreResult<Self> {
        if self.is_complete() {
            return Err(ScoreError::InningsAlreadyCompleted);
        }
        self.check_bowler(&bowler)?;
        let mut next = self.clone();
        next.bowler = Some(bowler);
        Ok(next)
    }

    /// Append one delivery.
    ///
    /// # Errors
    ///
    /// - [`ScoreError::InningsAlreadyCompleted`] once the innings has ended
    /// - [`ScoreError::OverLimitExceeded`] for a legal ball past the allowance
    /// - [`ScoreError::InvalidDeliveryShape`] for an inconsistent record
    /// - [`ScoreError::UnknownPlayer`] for a player outside the squads
    pub fn append(&self, delivery: Delivery) -> ScoreResult<Self> {
        if self.ended_manually {
            return Err(ScoreError::InningsAlreadyCompleted);
        }
        let totals = self.totals();
        if delivery.is_legal() && totals.legal_balls >= self.limit_balls() {
            return Err(ScoreError::OverLimitExceeded {
                limit_balls: self.limit_balls(),
            });
        }
        if self.completion_from(&totals).is_some() {
            return Err(ScoreError::InningsAlreadyCompleted);
        }
        delivery.validate()?;
        self.check_batter(&delivery.striker)?;
        self.check_batter(&delivery.non_striker)?;
        self.check_bowler(&delivery.bowler)?;

        debug!(
            innings = self.number,
            ball = %self.ledger.next_coordinate(),
            outcome = %delivery.outcome.glyph(),
            wicket = delivery.is_wicket(),
            "appending delivery"
        );
        let mut next = self.clone();
        next.ledger = self.ledger.push(delivery);
        Ok(next)
    }

    /// Remove the last delivery, reopening an innings that ended on it
    ///
    /// # Errors
    ///
    /// - [`ScoreError::InningsAlreadyCompleted`] if the scorer closed the innings
    /// - [`ScoreError::EmptyLedger`] if nothing has been bowled
    pub fn undo(&self) -> ScoreResult<Self> {
        if self.ended_manually {
            return Err(ScoreError::InningsAlreadyCompleted);
        }
        let (ledger, removed) = self.ledger.pop()?;
        debug!(
            innings = self.number,
            outcome = %removed.outcome.glyph(),
            remaining = ledger.len(),
            "undoing delivery"
        );
        let mut next = self.clone();
        next.ledger = ledger;
        Ok(next)
    }

    /// Like [`Innings::undo`], also returning the removed delivery
    pub(crate) fn undo_with_removed(&self) -> ScoreResult<(Self, Delivery)> {
        let removed = self.ledger.last().cloned().ok_or(ScoreError::EmptyLedger)?;
        Ok((self.undo()?, removed))
    }

    /// Close the innings
    ///
    /// # Errors
    ///
    /// - [`ScoreError::NothingBowledYet`] before the first legal ball
    /// - [`ScoreError::InningsAlreadyCompleted`] if it is already over
    pub fn end_manually(&self) -> ScoreResult<Self> {
        if self.is_complete() {
            return Err(ScoreError::InningsAlreadyCompleted);
        }
        if self.ledger.legal_balls() == 0 {
            return Err(ScoreError::NothingBowledYet);
        }
        let mut next = self.clone();
        next.ended_manually = true;
        Ok(next)
    }

    /// Clear crease slots after a wicket so the next batter must be named
    pub(crate) fn clear_dismissed(&self) -> Self {
        let mut next = self.clone();
        if let Some(dismissal) = self.ledger.last().and_then(|d| d.dismissal.as_ref()) {
            if next.striker.as_ref() == Some(&dismissal.player_out) {
                next.striker = None;
            }
            if next.non_striker.as_ref() == Some(&dismissal.player_out) {
                next.non_striker = None;
            }
        }
        next
    }

    /// Put back the players who were in for `delivery`
    pub(crate) fn restore_crease(&self, delivery: &Delivery) -> Self {
        let mut next = self.clone();
        next.striker = Some(delivery.striker.clone());
        next.non_striker = Some(delivery.non_striker.clone());
        next.bowler = Some(delivery.bowler.clone());
        next
    }
}
