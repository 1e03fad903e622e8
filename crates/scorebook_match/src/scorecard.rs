//! The scorecard for one innings, assembled from projections.
//!
//! Building a scorecard never fails. An innings that has not been opened,
//! or a number that is neither 1 nor 2, yields a placeholder card.

use crate::chase::ChaseState;
use crate::innings::CompletionReason;
use crate::match_state::{Match, MatchStatus};
use scorebook_core::format_rate;
use scorebook_ledger::Ledger;
use scorebook_projection::{
    BattingFigure, BattingStatus, BowlingFigure, CurrentOverProgress, InningsTotals, OverGrid,
    RecentBall, ViewConfig, recent_balls,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Placeholder for an innings that has not begun
pub const NOT_STARTED_TEXT: &str = "Innings not started yet";

/// Placeholder for a second innings the match finished without
pub const NOT_REQUIRED_TEXT: &str = "Innings was not required";

/// Where the innings stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InningsState {
    /// No batter named and no ball bowled
    NotStarted,
    /// Accepting deliveries
    Live,
    /// Finished
    Completed,
}

/// Everything a scoreboard shows for one innings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardView {
    /// Innings number asked for
    pub innings: u8,
    /// Where the innings stands
    pub state: InningsState,
    /// Batting team name
    pub batting_team: String,
    /// Bowling team name
    pub bowling_team: String,
    /// Text shown instead of figures for an innings not started
    pub placeholder: Option<String>,
    /// Runs, wickets, balls and extras
    pub totals: InningsTotals,
    /// `runs/wickets`
    pub score: String,
    /// Overs notation
    pub overs: String,
    /// Runs per over
    pub run_rate: f64,
    /// Score at the current rate over the full allowance, live innings only
    pub projected_score: Option<u32>,
    /// Why the innings finished
    pub completion: Option<CompletionReason>,
    /// Target being chased
    pub target: Option<u32>,
    /// Batting card, batters who came in first
    pub batting: Vec<BattingFigure>,
    /// Bowling card
    pub bowling: Vec<BowlingFigure>,
    /// Over-by-over grid
    pub over_grid: OverGrid,
    /// The over in progress
    pub current_over: CurrentOverProgress,
    /// Latest balls, newest first
    pub recent_balls: Vec<RecentBall>,
    /// Chase arithmetic while the chase is live
    pub chase: Option<ChaseState>,
    /// Hex fingerprint of the innings snapshot
    pub digest: Option<String>,
}

impl ScorecardView {
    /// Assemble the card for innings `number` of `m`
    #[must_use]
    pub fn build(m: &Match, number: u8, config: &ViewConfig) -> Self {
        let batting_side = m.batting_side(number);
        let batting_team = m.setup().team(batting_side).name.clone();
        let bowling_team = m.setup().team(batting_side.other()).name.clone();

        let Some(innings) = m.innings(number).filter(|i| i.has_started()) else {
            let not_required = m.status() == MatchStatus::Completed;
            let mut card = Self::placeholder(number, m.setup().total_overs, not_required);
            card.batting_team = batting_team;
            card.bowling_team = bowling_team;
            card.target = m.target().filter(|_| number == 2);
            return card;
        };

        let snapshot = innings.snapshot();
        let completion = m.completion(number);
        let state = if completion.is_some() {
            InningsState::Completed
        } else {
            InningsState::Live
        };
        let totals = snapshot.totals.clone();
        let chase = m.chase().filter(|_| number == 2);

        Self {
            innings: number,
            state,
            batting_team,
            bowling_team,
            placeholder: None,
            score: totals.score(),
            overs: totals.overs(),
            run_rate: totals.run_rate(),
            projected_score: (state == InningsState::Live)
                .then(|| totals.projected_score(innings.total_overs())),
            completion,
            target: innings.target(),
            over_grid: OverGrid::build(innings.ledger(), innings.total_overs()),
            current_over: CurrentOverProgress::build(innings.ledger()),
            recent_balls: recent_balls(innings.ledger(), config),
            chase,
            digest: snapshot
                .digest()
                .inspect_err(|e| warn!(innings = number, error = %e, "snapshot digest unavailable"))
                .ok()
                .map(|d| d.to_hex()),
            batting: snapshot.batting,
            bowling: snapshot.bowling,
            totals,
        }
    }

    fn placeholder(number: u8, total_overs: u32, not_required: bool) -> Self {
        let text = if not_required && number == 2 {
            NOT_REQUIRED_TEXT
        } else {
            NOT_STARTED_TEXT
        };
        let totals = InningsTotals::default();
        let empty = Ledger::new();
        Self {
            innings: number,
            state: InningsState::NotStarted,
            batting_team: String::new(),
            bowling_team: String::new(),
            placeholder: Some(text.to_string()),
            score: totals.score(),
            overs: totals.overs(),
            run_rate: 0.0,
            projected_score: None,
            completion: None,
            target: None,
            batting: Vec::new(),
            bowling: Vec::new(),
            over_grid: OverGrid::build(&empty, total_overs),
            current_over: CurrentOverProgress::build(&empty),
            recent_balls: Vec::new(),
            chase: None,
            digest: None,
            totals,
        }
    }

    /// Run rate to two decimals
    #[must_use]
    pub fn run_rate_text(&self) -> String {
        format_rate(self.run_rate)
    }

    /// Batters who have come in
    pub fn batted(&self) -> impl Iterator<Item = &BattingFigure> {
        self.batting
            .iter()
            .filter(|b| b.status != BattingStatus::YetToBat)
    }

    /// Squad members still waiting to bat
    pub fn yet_to_bat(&self) -> impl Iterator<Item = &BattingFigure> {
        self.batting
            .iter()
            .filter(|b| b.status == BattingStatus::YetToBat)
    }
}
