//! Delivery records for the ball-event ledger.
//!
//! A delivery is one ball bowled, legal or not. Its outcome is a closed
//! variant, so a wide can never carry bat runs and a bye can never be a
//! boundary off the bat. A dismissal rides on top of the outcome and is
//! checked against it when the record is validated.

use scorebook_core::{PlayerName, ScoreError, ScoreResult};
use serde::{Deserialize, Serialize};

/// Most runs a batter can be credited with off one delivery
pub const MAX_BAT_RUNS: u8 = 6;

/// Most runs completed before a run-out
pub const MAX_RUN_OUT_RUNS: u8 = 3;

/// What happened off the ball, ignoring any dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Outcome {
    /// Legal ball, runs credited to the striker (0 is a dot ball)
    Runs {
        /// Runs off the bat
        runs: u8,
    },
    /// Wide: one run plus whatever was run or went to the boundary
    Wide {
        /// Runs beyond the mandatory one
        additional: u8,
    },
    /// No-ball: one extra plus anything the striker hit
    NoBall {
        /// Runs off the bat
        bat_runs: u8,
    },
    /// Legal ball, runs taken without touching bat or body
    Bye {
        /// Runs taken
        runs: u8,
    },
    /// Legal ball, runs taken off the body
    LegBye {
        /// Runs taken
        runs: u8,
    },
}

impl Outcome {
    /// Dot ball
    pub const DOT: Self = Self::Runs { runs: 0 };

    /// Legal deliveries consume a ball of the over
    #[must_use]
    pub const fn is_legal(self) -> bool {
        !matches!(self, Self::Wide { .. } | Self::NoBall { .. })
    }

    /// Runs physically completed (or reached by boundary) off the ball
    #[must_use]
    pub const fn runs_run(self) -> u8 {
        match self {
            Self::Runs { runs } | Self::Bye { runs } | Self::LegBye { runs } => runs,
            Self::Wide { additional } => additional,
            Self::NoBall { bat_runs } => bat_runs,
        }
    }

    /// Short scorer glyph (`WD`, `NB`, `B`, `LB`, or the run count)
    #[must_use]
    pub fn glyph(self) -> String {
        match self {
            Self::Runs { runs } => runs.to_string(),
            Self::Wide { .. } => "WD".to_string(),
            Self::NoBall { .. } => "NB".to_string(),
            Self::Bye { .. } => "B".to_string(),
            Self::LegBye { .. } => "LB".to_string(),
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::DOT
    }
}

/// Mode of dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WicketKind {
    /// Bowled
    Bowled,
    /// Caught
    Caught,
    /// Leg before wicket
    Lbw,
    /// Run out
    #[serde(alias = "run out", alias = "runout")]
    RunOut,
    /// Stumped
    Stumped,
    /// Hit wicket
    #[serde(alias = "hit wicket")]
    HitWicket,
    /// Retired (hurt or otherwise)
    #[serde(alias = "retired hurt")]
    Retired,
}

impl WicketKind {
    /// All dismissal kinds in scorer order
    pub const ALL: [Self; 7] = [
        Self::Bowled,
        Self::Caught,
        Self::Lbw,
        Self::RunOut,
        Self::Stumped,
        Self::HitWicket,
        Self::Retired,
    ];

    /// Whether the bowler is credited with the wicket
    #[must_use]
    pub const fn credited_to_bowler(self) -> bool {
        !matches!(self, Self::RunOut)
    }

    /// Whether the non-striker can be the player out
    #[must_use]
    pub const fn can_dismiss_non_striker(self) -> bool {
        matches!(self, Self::RunOut | Self::Retired)
    }

    /// Whether this dismissal can happen on the given outcome
    #[must_use]
    pub const fn allowed_on(self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Runs { .. } => true,
            Outcome::Wide { .. } => {
                matches!(self, Self::Stumped | Self::RunOut | Self::HitWicket | Self::Retired)
            }
            Outcome::NoBall { .. } | Outcome::Bye { .. } | Outcome::LegBye { .. } => {
                matches!(self, Self::RunOut | Self::Retired)
            }
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bowled => "bowled",
            Self::Caught => "caught",
            Self::Lbw => "lbw",
            Self::RunOut => "run out",
            Self::Stumped => "stumped",
            Self::HitWicket => "hit wicket",
            Self::Retired => "retired hurt",
        }
    }
}

impl std::fmt::Display for WicketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A wicket that fell on a delivery
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dismissal {
    /// How the batter got out
    pub kind: WicketKind,
    /// Who got out
    pub player_out: PlayerName,
    /// Catcher, thrower or keeper, when the scorer recorded one
    #[serde(default)]
    pub fielder: Option<PlayerName>,
}

impl Dismissal {
    /// Dismissal of `player_out` with no fielder recorded
    #[must_use]
    pub fn new(kind: WicketKind, player_out: impl Into<PlayerName>) -> Self {
        Self {
            kind,
            player_out: player_out.into(),
            fielder: None,
        }
    }

    /// Record the fielder involved
    #[must_use]
    pub fn with_fielder(mut self, fielder: impl Into<PlayerName>) -> Self {
        self.fielder = Some(fielder.into());
        self
    }

    /// Scorecard text for the dismissal (`c Jones b Smith`)
    #[must_use]
    pub fn describe(&self, bowler: &PlayerName) -> String {
        let fielder = self.fielder.as_ref().map(PlayerName::as_str);
        match (self.kind, fielder) {
            (WicketKind::Bowled, _) => format!("b {}", bowler),
            (WicketKind::Caught, Some(f)) if f == bowler.as_str() => format!("c & b {}", bowler),
            (WicketKind::Caught, Some(f)) => format!("c {} b {}", f, bowler),
            (WicketKind::Caught, None) => format!("c ? b {}", bowler),
            (WicketKind::Lbw, _) => format!("lbw b {}", bowler),
            (WicketKind::RunOut, Some(f)) => format!("run out ({})", f),
            (WicketKind::RunOut, None) => "run out".to_string(),
            (WicketKind::Stumped, Some(f)) => format!("st {} b {}", f, bowler),
            (WicketKind::Stumped, None) => format!("st ? b {}", bowler),
            (WicketKind::HitWicket, _) => format!("hit wicket b {}", bowler),
            (WicketKind::Retired, _) => "retired hurt".to_string(),
        }
    }
}

/// One ball bowled
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Runs and extras off the ball
    pub outcome: Outcome,
    /// Penalty runs awarded to the batting side on this ball
    #[serde(default)]
    pub penalty: u8,
    /// Wicket, if one fell
    #[serde(default)]
    pub dismissal: Option<Dismissal>,
    /// Batter on strike
    pub striker: PlayerName,
    /// Batter at the other end
    pub non_striker: PlayerName,
    /// Bowler of the over
    pub bowler: PlayerName,
}

impl Delivery {
    /// Create a delivery with no wicket and no penalty
    #[must_use]
    pub fn new(
        outcome: Outcome,
        striker: impl Into<PlayerName>,
        non_striker: impl Into<PlayerName>,
        bowler: impl Into<PlayerName>,
    ) -> Self {
        Self {
            outcome,
            penalty: 0,
            dismissal: None,
            striker: striker.into(),
            non_striker: non_striker.into(),
            bowler: bowler.into(),
        }
    }

    /// Attach a dismissal
    #[must_use]
    pub fn with_dismissal(mut self, dismissal: Dismissal) -> Self {
        self.dismissal = Some(dismissal);
        self
    }

    /// Attach penalty runs
    #[must_use]
    pub fn with_penalty(mut self, penalty: u8) -> Self {
        self.penalty = penalty;
        self
    }

    /// Legal deliveries consume a ball of the over
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.outcome.is_legal()
    }

    /// Whether a wicket fell
    #[must_use]
    pub fn is_wicket(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Check the record against the laws the outcome variant cannot express
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidDeliveryShape`] naming the first inconsistency
    pub fn validate(&self) -> ScoreResult<()> {
        if self.striker.is_empty() || self.non_striker.is_empty() || self.bowler.is_empty() {
            return Err(ScoreError::shape("striker, non-striker and bowler must be named"));
        }
        if self.striker == self.non_striker {
            return Err(ScoreError::shape("striker and non-striker must differ"));
        }

        match self.outcome {
            Outcome::Runs { runs } | Outcome::NoBall { bat_runs: runs } if runs > MAX_BAT_RUNS => {
                return Err(ScoreError::shape(format!(
                    "bat runs must be between 0 and {}",
                    MAX_BAT_RUNS
                )));
            }
            Outcome::Bye { runs: 0 } | Outcome::LegBye { runs: 0 } => {
                return Err(ScoreError::shape("byes and leg-byes need at least one run"));
            }
            _ => {}
        }

        if let Some(dismissal) = &self.dismissal {
            if !dismissal.kind.allowed_on(self.outcome) {
                return Err(ScoreError::shape(format!(
                    "{} is not possible on {}",
                    dismissal.kind,
                    self.outcome.glyph()
                )));
            }
            if dismissal.player_out == self.non_striker {
                if !dismissal.kind.can_dismiss_non_striker() {
                    return Err(ScoreError::shape(format!(
                        "{} can only dismiss the striker",
                        dismissal.kind
                    )));
                }
            } else if dismissal.player_out != self.striker {
                return Err(ScoreError::shape(format!(
                    "{} is not at the crease",
                    dismissal.player_out
                )));
            }
            if dismissal.kind == WicketKind::RunOut && self.outcome.runs_run() > MAX_RUN_OUT_RUNS {
                return Err(ScoreError::shape(format!(
                    "at most {} runs can be completed before a run-out",
                    MAX_RUN_OUT_RUNS
                )));
            }
        }

        Ok(())
    }
}
