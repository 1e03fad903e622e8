//! Raw scorer input and its translation into delivery records.
//!
//! The scoring panel sends a flat object: runs, an extras breakdown, a
//! wicket flag and optional run-out details. Everything that does not fit
//! the closed [`Outcome`] variant is rejected here, before any ledger sees it.

use crate::delivery::{Delivery, Dismissal, Outcome, WicketKind};
use scorebook_core::{PlayerName, ScoreError, ScoreResult};
use serde::{Deserialize, Serialize};

/// Extras as the scorer enters them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtrasInput {
    /// Total wide runs (1 + runs taken)
    pub wide: u8,
    /// No-ball extra (always 1 when present)
    pub no_ball: u8,
    /// Byes taken
    pub bye: u8,
    /// Leg-byes taken
    pub leg_bye: u8,
    /// Penalty runs
    pub penalty: u8,
}

/// End of the pitch a run-out happened at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreaseEnd {
    /// The batter on strike
    #[default]
    Striker,
    /// The batter at the bowler's end
    NonStriker,
}

/// Optional wicket details from the run-out form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WicketInfo {
    /// Which batter is out
    pub player_out: CreaseEnd,
    /// Runs completed before the wicket
    pub runs_completed: Option<u8>,
    /// Fielder involved
    pub fielder: Option<String>,
}

/// Players in the middle when the ball is bowled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crease {
    /// Batter on strike
    pub striker: PlayerName,
    /// Batter at the other end
    pub non_striker: PlayerName,
    /// Bowler of the over
    pub bowler: PlayerName,
}

impl Crease {
    /// Players for the next ball
    #[must_use]
    pub fn new(
        striker: impl Into<PlayerName>,
        non_striker: impl Into<PlayerName>,
        bowler: impl Into<PlayerName>,
    ) -> Self {
        Self {
            striker: striker.into(),
            non_striker: non_striker.into(),
            bowler: bowler.into(),
        }
    }
}

/// One press of the scoring panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryInput {
    /// Runs off the bat
    pub runs: u8,
    /// Extras breakdown
    pub extras: ExtrasInput,
    /// Whether a wicket fell
    pub is_wicket: bool,
    /// Mode of dismissal, required when `is_wicket`
    pub wicket_type: Option<WicketKind>,
    /// Run-out details
    pub wicket_info: WicketInfo,
}

impl DeliveryInput {
    /// Runs off the bat from a legal ball
    #[must_use]
    pub fn runs(runs: u8) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// Dot ball
    #[must_use]
    pub fn dot() -> Self {
        Self::runs(0)
    }

    /// Wide with `additional` runs beyond the mandatory one
    #[must_use]
    pub fn wide(additional: u8) -> Self {
        Self {
            extras: ExtrasInput {
                wide: additional.saturating_add(1),
                ..ExtrasInput::default()
            },
            ..Self::default()
        }
    }

    /// No-ball with `bat_runs` off the bat
    #[must_use]
    pub fn no_ball(bat_runs: u8) -> Self {
        Self {
            runs: bat_runs,
            extras: ExtrasInput {
                no_ball: 1,
                ..ExtrasInput::default()
            },
            ..Self::default()
        }
    }

    /// Byes
    #[must_use]
    pub fn bye(runs: u8) -> Self {
        Self {
            extras: ExtrasInput {
                bye: runs,
                ..ExtrasInput::default()
            },
            ..Self::default()
        }
    }

    /// Leg-byes
    #[must_use]
    pub fn leg_bye(runs: u8) -> Self {
        Self {
            extras: ExtrasInput {
                leg_bye: runs,
                ..ExtrasInput::default()
            },
            ..Self::default()
        }
    }

    /// Mark a wicket of the given kind (striker out)
    #[must_use]
    pub fn wicket(mut self, kind: WicketKind) -> Self {
        self.is_wicket = true;
        self.wicket_type = Some(kind);
        self
    }

    /// Mark a run-out at `end` once the runs already entered were completed
    #[must_use]
    pub fn run_out(mut self, end: CreaseEnd, fielder: Option<&str>) -> Self {
        self.is_wicket = true;
        self.wicket_type = Some(WicketKind::RunOut);
        self.wicket_info = WicketInfo {
            player_out: end,
            runs_completed: Some(self.runs_taken()),
            fielder: fielder.map(str::to_string),
        };
        self
    }

    /// Record the fielder for the wicket
    #[must_use]
    pub fn fielder(mut self, fielder: &str) -> Self {
        self.wicket_info.fielder = Some(fielder.to_string());
        self
    }

    /// Add penalty runs
    #[must_use]
    pub fn penalty(mut self, runs: u8) -> Self {
        self.extras.penalty = runs;
        self
    }

    fn runs_taken(&self) -> u8 {
        self.runs
            .saturating_add(self.extras.wide.saturating_sub(1))
            .saturating_add(self.extras.bye)
            .saturating_add(self.extras.leg_bye)
    }

    /// Decide the outcome variant from the flat fields
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidDeliveryShape`] when the extras contradict each other
    pub fn outcome(&self) -> ScoreResult<Outcome> {
        let ExtrasInput {
            wide,
            no_ball,
            bye,
            leg_bye,
            ..
        } = self.extras;

        let kinds = [wide, no_ball, bye, leg_bye].iter().filter(|v| **v > 0).count();
        if kinds > 1 {
            return Err(ScoreError::shape(
                "only one of wide, no-ball, bye or leg-bye per delivery",
            ));
        }

        if wide > 0 {
            if self.runs > 0 {
                return Err(ScoreError::shape("a wide cannot carry bat runs"));
            }
            return Ok(Outcome::Wide {
                additional: wide - 1,
            });
        }
        if no_ball > 0 {
            if no_ball != 1 {
                return Err(ScoreError::shape("a no-ball is worth exactly one extra"));
            }
            return Ok(Outcome::NoBall {
                bat_runs: self.runs,
            });
        }
        if bye > 0 {
            if self.runs > 0 {
                return Err(ScoreError::shape("byes cannot carry bat runs"));
            }
            return Ok(Outcome::Bye { runs: bye });
        }
        if leg_bye > 0 {
            if self.runs > 0 {
                return Err(ScoreError::shape("leg-byes cannot carry bat runs"));
            }
            return Ok(Outcome::LegBye { runs: leg_bye });
        }
        Ok(Outcome::Runs { runs: self.runs })
    }

    /// Build a validated delivery for the players at the crease
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidDeliveryShape`] for any inconsistent combination
    pub fn into_delivery(self, crease: &Crease) -> ScoreResult<Delivery> {
        let outcome = self.outcome()?;

        let dismissal = match (self.is_wicket, self.wicket_type) {
            (false, None) => None,
            (true, None) => return Err(ScoreError::shape("wicket without a dismissal type")),
            (false, Some(kind)) => {
                return Err(ScoreError::shape(format!("{} given but no wicket fell", kind)));
            }
            (true, Some(kind)) => {
                let info = &self.wicket_info;
                if kind == WicketKind::RunOut {
                    if let Some(completed) = info.runs_completed {
                        if completed != outcome.runs_run() {
                            return Err(ScoreError::shape(format!(
                                "run-out after {} runs but {} recorded",
                                completed,
                                outcome.runs_run()
                            )));
                        }
                    }
                }
                let player_out = match info.player_out {
                    CreaseEnd::Striker => crease.striker.clone(),
                    CreaseEnd::NonStriker => crease.non_striker.clone(),
                };
                let mut dismissal = Dismissal::new(kind, player_out);
                if let Some(fielder) = info.fielder.as_deref().map(str::trim) {
                    if !fielder.is_empty() {
                        dismissal = dismissal.with_fielder(fielder);
                    }
                }
                Some(dismissal)
            }
        };

        let delivery = Delivery {
            outcome,
            penalty: self.extras.penalty,
            dismissal,
            striker: crease.striker.clone(),
            non_striker: crease.non_striker.clone(),
            bowler: crease.bowler.clone(),
        };
        delivery.validate()?;
        Ok(delivery)
    }
}
