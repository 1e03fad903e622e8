//! Read-only views for a presentation layer.
//!
//! Over grid, current-over progress and the recent-balls feed. Each view is
//! rebuilt from the ledger on demand and holds no state of its own.

use scorebook_core::{BALLS_PER_OVER, PlayerName};
use scorebook_ledger::{BallCoordinate, Delivery, IndexedDelivery, Ledger, Outcome, classify};
use serde::{Deserialize, Serialize};

/// Balls the recent feed shows before "show all"
pub const DEFAULT_RECENT_BALLS: usize = 6;

/// Presentation knobs for the views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Balls in the recent feed; `None` shows the whole innings
    pub recent_balls_limit: Option<usize>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            recent_balls_limit: Some(DEFAULT_RECENT_BALLS),
        }
    }
}

impl ViewConfig {
    /// Show every ball in the recent feed
    #[must_use]
    pub fn show_all(mut self) -> Self {
        self.recent_balls_limit = None;
        self
    }
}

/// Scorer glyph for a delivery: `W` for a wicket, otherwise the outcome glyph
#[must_use]
pub fn glyph(delivery: &Delivery) -> String {
    if delivery.is_wicket() {
        "W".to_string()
    } else {
        delivery.outcome.glyph()
    }
}

/// Human-readable description of a delivery (`FOUR`, `wide +2`, `OUT! lbw b Starc`)
#[must_use]
pub fn describe(delivery: &Delivery) -> String {
    let mut text = match delivery.outcome {
        Outcome::Runs { runs: 0 } => "dot ball".to_string(),
        Outcome::Runs { runs: 1 } => "1 run".to_string(),
        Outcome::Runs { runs: 4 } => "FOUR".to_string(),
        Outcome::Runs { runs: 6 } => "SIX".to_string(),
        Outcome::Runs { runs } => format!("{} runs", runs),
        Outcome::Wide { additional: 0 } => "wide".to_string(),
        Outcome::Wide { additional } => format!("wide +{}", additional),
        Outcome::NoBall { bat_runs: 0 } => "no-ball".to_string(),
        Outcome::NoBall { bat_runs } => format!("no-ball +{}", bat_runs),
        Outcome::Bye { runs: 1 } => "1 bye".to_string(),
        Outcome::Bye { runs } => format!("{} byes", runs),
        Outcome::LegBye { runs: 1 } => "1 leg-bye".to_string(),
        Outcome::LegBye { runs } => format!("{} leg-byes", runs),
    };
    if delivery.penalty > 0 {
        text.push_str(&format!(", {} penalty", delivery.penalty));
    }
    if let Some(dismissal) = &delivery.dismissal {
        text = format!(
            "{}, OUT! {} {}",
            text,
            dismissal.player_out,
            dismissal.describe(&delivery.bowler)
        );
    }
    text
}

/// One slot in an over row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BallCell {
    /// A delivery that has happened
    Bowled {
        /// Scorer glyph
        glyph: String,
        /// Runs added to the total
        runs: u32,
        /// Whether it counted towards the over
        legal: bool,
        /// Whether a wicket fell
        wicket: bool,
    },
    /// A legal ball still to come
    NotYetBowled,
}

/// One over of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverRow {
    /// Zero-based over index
    pub over: u32,
    /// Deliveries in order, then placeholders for the legal balls to come
    pub cells: Vec<BallCell>,
    /// Runs scored in the over, extras included
    pub runs: u32,
    /// Runs off the bat in the over
    pub bat_runs: u32,
    /// Wickets in the over
    pub wickets: u32,
    /// Legal balls bowled in the over
    pub legal_balls: u32,
    /// Bowlers who bowled in the over, in order
    pub bowlers: Vec<PlayerName>,
}

impl OverRow {
    fn empty(over: u32) -> Self {
        Self {
            over,
            cells: Vec::new(),
            runs: 0,
            bat_runs: 0,
            wickets: 0,
            legal_balls: 0,
            bowlers: Vec::new(),
        }
    }

    fn push(&mut self, indexed: &IndexedDelivery<'_>) {
        let delivery = indexed.delivery;
        let c = classify(delivery);
        let runs = c.total();
        self.runs += runs;
        self.bat_runs += c.bat_runs;
        if delivery.is_wicket() {
            self.wickets += 1;
        }
        if indexed.is_legal() {
            self.legal_balls += 1;
        }
        if !self.bowlers.contains(&delivery.bowler) {
            self.bowlers.push(delivery.bowler.clone());
        }
        self.cells.push(BallCell::Bowled {
            glyph: glyph(delivery),
            runs,
            legal: indexed.is_legal(),
            wicket: delivery.is_wicket(),
        });
    }

    fn pad(&mut self) {
        for _ in self.legal_balls..BALLS_PER_OVER {
            self.cells.push(BallCell::NotYetBowled);
        }
    }

    /// All six legal balls have been bowled
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.legal_balls == BALLS_PER_OVER
    }

    /// A complete over with no runs off the bat
    #[must_use]
    pub const fn is_maiden(&self) -> bool {
        self.is_complete() && self.bat_runs == 0
    }

    /// Row total as shown in the grid (`7/1`, `0`)
    #[must_use]
    pub fn summary(&self) -> String {
        if self.wickets > 0 {
            format!("{}/{}", self.runs, self.wickets)
        } else {
            self.runs.to_string()
        }
    }
}

/// Over-by-over grid for an innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverGrid {
    /// One row per over of the allowance
    pub rows: Vec<OverRow>,
}

impl OverGrid {
    /// Build the grid for an innings of `total_overs` overs
    #[must_use]
    pub fn build(ledger: &Ledger, total_overs: u32) -> Self {
        let mut rows: Vec<OverRow> = (0..total_overs).map(OverRow::empty).collect();
        for indexed in ledger.indexed() {
            let over = indexed.coordinate.over;
            while rows.len() <= over as usize {
                rows.push(OverRow::empty(rows.len() as u32));
            }
            rows[over as usize].push(&indexed);
        }
        for row in &mut rows {
            row.pad();
        }
        Self { rows }
    }

    /// Rows with at least one delivery
    pub fn started(&self) -> impl Iterator<Item = &OverRow> {
        self.rows
            .iter()
            .filter(|r| r.cells.iter().any(|c| matches!(c, BallCell::Bowled { .. })))
    }
}

/// Progress through the over being bowled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOverProgress {
    /// Zero-based index of the over in progress
    pub over: u32,
    /// Legal balls bowled in it, 0 to 5
    pub legal_balls: u32,
    /// Glyphs of every delivery in it, illegal ones included
    pub glyphs: Vec<String>,
    /// Runs scored in it
    pub runs: u32,
}

impl CurrentOverProgress {
    /// Progress of the over after the last recorded delivery
    #[must_use]
    pub fn build(ledger: &Ledger) -> Self {
        let next = ledger.next_coordinate();
        let mut progress = Self {
            over: next.over,
            legal_balls: next.ball - 1,
            glyphs: Vec::new(),
            runs: 0,
        };
        for indexed in ledger.indexed().filter(|i| i.coordinate.over == next.over) {
            progress.glyphs.push(glyph(indexed.delivery));
            progress.runs += classify(indexed.delivery).total();
        }
        progress
    }

    /// Share of the over bowled, 0.0 to 1.0
    #[must_use]
    pub fn fraction(&self) -> f64 {
        f64::from(self.legal_balls) / f64::from(BALLS_PER_OVER)
    }
}

/// One entry of the recent-balls feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBall {
    /// Over and ball
    pub coordinate: BallCoordinate,
    /// Coordinate in `over.ball` form
    pub label: String,
    /// Scorer glyph
    pub glyph: String,
    /// What happened, in words
    pub description: String,
    /// Runs added to the total
    pub runs: u32,
    /// Extras inside `runs`
    pub extras: u32,
    /// Whether a wicket fell
    pub wicket: bool,
    /// Batter on strike
    pub striker: PlayerName,
    /// Bowler
    pub bowler: PlayerName,
}

/// Recent deliveries, newest first
#[must_use]
pub fn recent_balls(ledger: &Ledger, config: &ViewConfig) -> Vec<RecentBall> {
    let limit = config.recent_balls_limit.unwrap_or(usize::MAX);
    let indexed: Vec<_> = ledger.indexed().collect();
    indexed
        .iter()
        .rev()
        .take(limit)
        .map(|i| {
            let c = classify(i.delivery);
            RecentBall {
                coordinate: i.coordinate,
                label: i.coordinate.to_string(),
                glyph: glyph(i.delivery),
                description: describe(i.delivery),
                runs: c.total(),
                extras: c.extra_runs,
                wicket: i.delivery.is_wicket(),
                striker: i.delivery.striker.clone(),
                bowler: i.delivery.bowler.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebook_ledger::{Dismissal, WicketKind};

    fn ball(outcome: Outcome) -> Delivery {
        Delivery::new(outcome, "Rohit", "Gill", "Starc")
    }

    fn runs(n: u8) -> Delivery {
        ball(Outcome::Runs { runs: n })
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(&runs(4)), "4");
        assert_eq!(glyph(&ball(Outcome::Wide { additional: 1 })), "WD");
        assert_eq!(glyph(&ball(Outcome::LegBye { runs: 1 })), "LB");
        let out = runs(0).with_dismissal(Dismissal::new(WicketKind::Bowled, "Rohit"));
        assert_eq!(glyph(&out), "W");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&runs(4)), "FOUR");
        assert_eq!(describe(&runs(0)), "dot ball");
        assert_eq!(describe(&ball(Outcome::Wide { additional: 2 })), "wide +2");
        assert_eq!(describe(&ball(Outcome::Bye { runs: 2 })), "2 byes");
        let out = runs(0).with_dismissal(Dismissal::new(WicketKind::Lbw, "Rohit"));
        assert_eq!(describe(&out), "dot ball, OUT! Rohit lbw b Starc");
    }

    #[test]
    fn test_grid_has_row_per_over() {
        let ledger: Ledger = [runs(1), ball(Outcome::Wide { additional: 0 }), runs(4)]
            .into_iter()
            .collect();
        let grid = OverGrid::build(&ledger, 5);
        assert_eq!(grid.rows.len(), 5);
        assert_eq!(grid.started().count(), 1);

        let first = &grid.rows[0];
        assert_eq!(first.cells.len(), 3 + 4);
        assert_eq!(first.runs, 6);
        assert_eq!(first.legal_balls, 2);
        assert_eq!(first.cells[6], BallCell::NotYetBowled);
        assert!(!first.is_complete());
        assert_eq!(grid.rows[1].cells, vec![BallCell::NotYetBowled; 6]);
    }

    #[test]
    fn test_grid_over_summary() {
        let mut deliveries: Vec<_> = (0..5).map(|_| runs(0)).collect();
        deliveries.push(runs(0).with_dismissal(Dismissal::new(WicketKind::Bowled, "Rohit")));
        deliveries.push(runs(2));
        let grid = OverGrid::build(&deliveries.into_iter().collect(), 2);
        assert!(grid.rows[0].is_maiden());
        assert_eq!(grid.rows[0].summary(), "0/1");
        assert!(!grid.rows[1].is_maiden());
        assert_eq!(grid.rows[1].summary(), "2");
        assert_eq!(grid.rows[1].bowlers, vec![PlayerName::from("Starc")]);
    }

    #[test]
    fn test_current_over_progress() {
        let ledger: Ledger = (0..7)
            .map(|_| runs(1))
            .chain([ball(Outcome::NoBall { bat_runs: 0 })])
            .collect();
        let progress = CurrentOverProgress::build(&ledger);
        assert_eq!(progress.over, 1);
        assert_eq!(progress.legal_balls, 1);
        assert_eq!(progress.glyphs, vec!["1", "NB"]);
        assert_eq!(progress.runs, 2);

        let fresh = CurrentOverProgress::build(&(0..6).map(|_| runs(0)).collect());
        assert_eq!((fresh.over, fresh.legal_balls), (1, 0));
        assert!(fresh.glyphs.is_empty());
        assert_eq!(fresh.fraction(), 0.0);
    }

    #[test]
    fn test_recent_balls_newest_first() {
        let ledger: Ledger = (0..8).map(|n| runs(n % 4)).collect();
        let feed = recent_balls(&ledger, &ViewConfig::default());
        assert_eq!(feed.len(), 6);
        assert_eq!(feed[0].label, "1.2");
        assert_eq!(feed[5].label, "0.3");

        let all = recent_balls(&ledger, &ViewConfig::default().show_all());
        assert_eq!(all.len(), 8);
        assert_eq!(all[7].label, "0.1");
    }

    #[test]
    fn test_recent_balls_extras() {
        let ledger: Ledger = [ball(Outcome::Wide { additional: 1 })].into_iter().collect();
        let feed = recent_balls(&ledger, &ViewConfig::default());
        assert_eq!(feed[0].runs, 2);
        assert_eq!(feed[0].extras, 2);
        assert_eq!(feed[0].label, "0.1");
    }

    #[test]
    fn test_empty_views() {
        let ledger = Ledger::new();
        assert!(recent_balls(&ledger, &ViewConfig::default()).is_empty());
        let progress = CurrentOverProgress::build(&ledger);
        assert_eq!((progress.over, progress.legal_balls), (0, 0));
        assert_eq!(OverGrid::build(&ledger, 0).rows.len(), 0);
    }

    #[test]
    fn test_view_config_json() {
        let config: ViewConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ViewConfig::default());
        let config: ViewConfig = serde_json::from_str(r#"{"recentBallsLimit": null}"#).unwrap();
        assert_eq!(config.recent_balls_limit, None);
    }
}
