//! Chase arithmetic for the second innings.

use scorebook_core::{BALLS_PER_OVER, format_overs};
use scorebook_projection::InningsTotals;
use serde::{Deserialize, Serialize};

/// Where the chasing side stands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaseState {
    /// First-innings runs plus one
    pub target: u32,
    /// Runs scored so far
    pub runs: u32,
    /// Runs still needed, never negative
    pub runs_needed: u32,
    /// Legal balls left; zero or less once the allowance is used
    pub balls_remaining: i64,
    /// Runs per over needed; `None` when no balls remain
    pub required_run_rate: Option<f64>,
}

impl ChaseState {
    /// Compute the chase for `second` against a first innings of `first_runs`
    #[must_use]
    pub fn compute(first_runs: u32, second: &InningsTotals, total_overs: u32) -> Self {
        let target = first_runs + 1;
        let runs_needed = target.saturating_sub(second.runs);
        let balls_remaining =
            i64::from(total_overs) * i64::from(BALLS_PER_OVER) - i64::from(second.legal_balls);
        let required_run_rate = (balls_remaining > 0)
            .then(|| f64::from(runs_needed) / (balls_remaining as f64 / f64::from(BALLS_PER_OVER)));
        Self {
            target,
            runs: second.runs,
            runs_needed,
            balls_remaining,
            required_run_rate,
        }
    }

    /// Remaining allowance in overs notation
    #[must_use]
    pub fn overs_remaining(&self) -> String {
        format_overs(self.balls_remaining.max(0) as u32)
    }

    /// Whether the target has been reached
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.runs_needed == 0
    }

    /// One-line summary (`Need 71 runs from 12 balls`)
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_won() {
            return "Target reached".to_string();
        }
        let runs = if self.runs_needed == 1 { "run" } else { "runs" };
        if self.balls_remaining <= 0 {
            return format!("Needed {} {}, no balls remaining", self.runs_needed, runs);
        }
        let balls = if self.balls_remaining == 1 { "ball" } else { "balls" };
        format!(
            "Need {} {} from {} {}",
            self.runs_needed, runs, self.balls_remaining, balls
        )
    }
}
