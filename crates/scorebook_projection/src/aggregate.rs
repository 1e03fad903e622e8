//! Innings aggregation.
//!
//! One pass over the ledger produces the running totals of an innings.
//! Nothing here is stored between calls: the totals are a pure function of
//! the ledger they were folded from.

use scorebook_core::{BALLS_PER_OVER, format_overs, per_over_rate};
use scorebook_ledger::{ExtrasBreakdown, Ledger, classify};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Running totals of one innings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsTotals {
    /// Bat runs plus extras
    pub runs: u32,
    /// Wickets fallen
    pub wickets: u32,
    /// Legal balls bowled
    pub legal_balls: u32,
    /// Extras by category
    pub extras: ExtrasBreakdown,
    /// Completed overs with no runs off the bat
    pub maiden_overs: u32,
    /// Boundary fours off the bat
    pub fours: u32,
    /// Sixes off the bat
    pub sixes: u32,
    /// Deliveries recorded, legal or not
    pub deliveries: u32,
}

impl InningsTotals {
    /// Fold a ledger into totals
    #[must_use]
    pub fn fold(ledger: &Ledger) -> Self {
        let mut totals = Self::default();
        let mut over_runs = 0u32;
        let mut over_bat_runs = 0u32;

        for indexed in ledger.indexed() {
            let c = classify(indexed.delivery);
            totals.runs += c.total();
            totals.extras.add(&c);
            totals.deliveries += 1;
            if indexed.delivery.is_wicket() {
                totals.wickets += 1;
            }
            if c.is_four() {
                totals.fours += 1;
            }
            if c.is_six() {
                totals.sixes += 1;
            }

            over_runs += c.total();
            over_bat_runs += c.bat_runs;
            if indexed.completes_over() {
                if over_bat_runs == 0 {
                    totals.maiden_overs += 1;
                }
                trace!(over = indexed.coordinate.over, runs = over_runs, "over completed");
                over_runs = 0;
                over_bat_runs = 0;
            }
        }

        totals.legal_balls = ledger.legal_balls();
        totals
    }

    /// Runs per over, `0.0` before the first legal ball
    #[must_use]
    pub fn run_rate(&self) -> f64 {
        per_over_rate(self.runs, self.legal_balls)
    }

    /// Score at the current rate over the full allowance, `0` before the first legal ball
    #[must_use]
    pub fn projected_score(&self, total_overs: u32) -> u32 {
        if self.legal_balls == 0 {
            return 0;
        }
        let limit = f64::from(total_overs * BALLS_PER_OVER);
        (f64::from(self.runs) / f64::from(self.legal_balls) * limit).round() as u32
    }

    /// Overs bowled in `4.2` notation
    #[must_use]
    pub fn overs(&self) -> String {
        format_overs(self.legal_balls)
    }

    /// Completed overs
    #[must_use]
    pub const fn completed_overs(&self) -> u32 {
        self.legal_balls / BALLS_PER_OVER
    }

    /// Score as `runs/wickets`
    #[must_use]
    pub fn score(&self) -> String {
        format!("{}/{}", self.runs, self.wickets)
    }
}
