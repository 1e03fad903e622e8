//! Batting and bowling figures folded from the ledger.
//!
//! Figures are keyed by player name and kept in order of first appearance,
//! which is the order a scorecard lists them in.

use indexmap::IndexMap;
use scorebook_core::{BALLS_PER_OVER, PlayerName, format_overs, per_over_rate};
use scorebook_ledger::{ExtraKind, Ledger, classify};
use serde::{Deserialize, Serialize};

/// Where a batter stands in the innings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattingStatus {
    /// In the squad, not yet in the middle
    YetToBat,
    /// At the crease (or not out at the end)
    Batting,
    /// Dismissed
    Out,
}

/// One batter's innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingFigure {
    /// Batter
    pub name: PlayerName,
    /// Runs off the bat
    pub runs: u32,
    /// Legal balls and no-balls received
    pub balls_faced: u32,
    /// Fours
    pub fours: u32,
    /// Sixes
    pub sixes: u32,
    /// Current status
    pub status: BattingStatus,
    /// Scorecard dismissal text, once out
    pub dismissal: Option<String>,
}

impl BattingFigure {
    fn new(name: PlayerName, status: BattingStatus) -> Self {
        Self {
            name,
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            status,
            dismissal: None,
        }
    }

    /// Runs per hundred balls, `0.0` before the first ball faced
    #[must_use]
    pub fn strike_rate(&self) -> f64 {
        if self.balls_faced == 0 {
            return 0.0;
        }
        f64::from(self.runs) / f64::from(self.balls_faced) * 100.0
    }

    /// Status line for the scorecard (`not out`, `c Smith b Jones`, ...)
    #[must_use]
    pub fn status_text(&self) -> &str {
        match self.status {
            BattingStatus::YetToBat => "yet to bat",
            BattingStatus::Batting => "not out",
            BattingStatus::Out => self.dismissal.as_deref().unwrap_or("out"),
        }
    }
}

/// One bowler's spell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingFigure {
    /// Bowler
    pub name: PlayerName,
    /// Legal balls bowled
    pub legal_balls: u32,
    /// Bat runs plus wide and no-ball runs
    pub runs_conceded: u32,
    /// Wickets credited to the bowler
    pub wickets: u32,
    /// Complete overs bowled without conceding a run
    pub maidens: u32,
    /// Wides bowled
    pub wides: u32,
    /// No-balls bowled
    pub no_balls: u32,
}

impl BowlingFigure {
    fn new(name: PlayerName) -> Self {
        Self {
            name,
            legal_balls: 0,
            runs_conceded: 0,
            wickets: 0,
            maidens: 0,
            wides: 0,
            no_balls: 0,
        }
    }

    /// Runs conceded per over, `0.0` before the first legal ball
    #[must_use]
    pub fn economy(&self) -> f64 {
        per_over_rate(self.runs_conceded, self.legal_balls)
    }

    /// Overs bowled in `3.4` notation
    #[must_use]
    pub fn overs(&self) -> String {
        format_overs(self.legal_balls)
    }
}

/// Batting and bowling cards for an innings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFigures {
    /// Batters in order of appearance, then those yet to bat
    pub batting: IndexMap<PlayerName, BattingFigure>,
    /// Bowlers in order of first delivery
    pub bowling: IndexMap<PlayerName, BowlingFigure>,
}

/// State of the over being folded, for bowler maidens
#[derive(Default)]
struct OverSpell {
    bowler: Option<PlayerName>,
    single_bowler: bool,
    charged: u32,
}

impl PlayerFigures {
    /// Fold a ledger into figures.
    ///
    /// `at_crease` lists batters who are in but may not have faced yet;
    /// `squad` lists the batting side so the card can show who is yet to bat.
    #[must_use]
    pub fn fold(ledger: &Ledger, at_crease: &[PlayerName], squad: &[PlayerName]) -> Self {
        let mut figures = Self::default();
        let mut spell = OverSpell::default();

        for indexed in ledger.indexed() {
            let delivery = indexed.delivery;
            let c = classify(delivery);

            figures.batter(&delivery.striker);
            figures.batter(&delivery.non_striker);
            if let Some(striker) = figures.batting.get_mut(&delivery.striker) {
                striker.runs += c.bat_runs;
                if c.faced_by_striker() {
                    striker.balls_faced += 1;
                }
                if c.is_four() {
                    striker.fours += 1;
                }
                if c.is_six() {
                    striker.sixes += 1;
                }
            }

            let bowler = figures
                .bowling
                .entry(delivery.bowler.clone())
                .or_insert_with(|| BowlingFigure::new(delivery.bowler.clone()));
            bowler.runs_conceded += c.charged_to_bowler();
            match c.kind {
                ExtraKind::Wide => bowler.wides += 1,
                ExtraKind::NoBall => bowler.no_balls += 1,
                _ => bowler.legal_balls += 1,
            }

            if let Some(dismissal) = &delivery.dismissal {
                if dismissal.kind.credited_to_bowler() {
                    bowler.wickets += 1;
                }
                let out = figures
                    .batting
                    .entry(dismissal.player_out.clone())
                    .or_insert_with(|| {
                        BattingFigure::new(dismissal.player_out.clone(), BattingStatus::Batting)
                    });
                out.status = BattingStatus::Out;
                out.dismissal = Some(dismissal.describe(&delivery.bowler));
            }

            match &spell.bowler {
                None => {
                    spell.bowler = Some(delivery.bowler.clone());
                    spell.single_bowler = true;
                }
                Some(current) if *current != delivery.bowler => spell.single_bowler = false,
                Some(_) => {}
            }
            spell.charged += c.charged_to_bowler();

            if indexed.completes_over() {
                if spell.single_bowler && spell.charged == 0 {
                    if let Some(bowler) = figures.bowling.get_mut(&delivery.bowler) {
                        bowler.maidens += 1;
                    }
                }
                spell = OverSpell::default();
            }
        }

        for name in at_crease {
            figures.batter(name);
        }
        for name in squad {
            if !figures.batting.contains_key(name) {
                figures
                    .batting
                    .insert(name.clone(), BattingFigure::new(name.clone(), BattingStatus::YetToBat));
            }
        }

        figures
    }

    fn batter(&mut self, name: &PlayerName) {
        if !self.batting.contains_key(name) {
            self.batting
                .insert(name.clone(), BattingFigure::new(name.clone(), BattingStatus::Batting));
        }
    }

    /// Batters who have come to the crease
    pub fn batted(&self) -> impl Iterator<Item = &BattingFigure> {
        self.batting
            .values()
            .filter(|b| b.status != BattingStatus::YetToBat)
    }

    /// Batters still to come in
    pub fn yet_to_bat(&self) -> impl Iterator<Item = &BattingFigure> {
        self.batting
            .values()
            .filter(|b| b.status == BattingStatus::YetToBat)
    }

    /// Total legal balls across all bowlers
    #[must_use]
    pub fn balls_bowled(&self) -> u32 {
        self.bowling.values().map(|b| b.legal_balls).sum()
    }

    /// Completed overs across all bowlers
    #[must_use]
    pub fn overs_bowled(&self) -> u32 {
        self.balls_bowled() / BALLS_PER_OVER
    }
}
