//! Match result resolution.
//!
//! The result is computed from the two innings every time it is asked for;
//! it is never stored as text.

use crate::config::TeamSide;
use scorebook_core::MAX_WICKETS;
use serde::{Deserialize, Serialize};

/// How a win was achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Margin {
    /// Defended a total; level scores give a zero margin
    Runs {
        /// Run margin
        runs: u32,
    },
    /// Chased a total
    Wickets {
        /// Wickets in hand
        wickets: u32,
    },
    /// The second side never batted
    FirstInningsScore {
        /// First-innings runs
        runs: u32,
    },
}

impl std::fmt::Display for Margin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Runs { runs } => write!(f, "{} {}", runs, plural(runs, "run", "runs")),
            Self::Wickets { wickets } => {
                write!(f, "{} {}", wickets, plural(wickets, "wicket", "wickets"))
            }
            Self::FirstInningsScore { runs } => write!(
                f,
                "first-innings score ({} {})",
                runs,
                plural(runs, "run", "runs")
            ),
        }
    }
}

fn plural<'a>(n: u32, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

/// Outcome of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MatchResult {
    /// One side won
    Won {
        /// Winning side
        winner: TeamSide,
        /// Winning team name
        team: String,
        /// How they won
        margin: Margin,
    },
    /// Not enough cricket to decide
    NoResult,
}

impl MatchResult {
    /// Winning side, if any
    #[must_use]
    pub const fn winner(&self) -> Option<TeamSide> {
        match self {
            Self::Won { winner, .. } => Some(*winner),
            Self::NoResult => None,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won { team, margin, .. } => write!(f, "{} won by {}", team, margin),
            Self::NoResult => f.write_str("No result"),
        }
    }
}

/// What the resolver needs to know about one innings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InningsSummary<'a> {
    /// Batting side
    pub side: TeamSide,
    /// Batting team name
    pub team: &'a str,
    /// Runs scored
    pub runs: u32,
    /// Wickets lost
    pub wickets: u32,
    /// Deliveries recorded
    pub deliveries: usize,
    /// Whether batters were named or a ball was bowled
    pub started: bool,
}

/// Decide the result from the innings played
#[must_use]
pub fn resolve(first: Option<InningsSummary<'_>>, second: Option<InningsSummary<'_>>) -> MatchResult {
    let Some(first) = first else {
        return MatchResult::NoResult;
    };
    let second_balls = second.map_or(0, |s| s.deliveries);
    if first.deliveries == 0 && second_balls == 0 {
        return MatchResult::NoResult;
    }

    let second = match second {
        Some(second) if second.started => second,
        _ => {
            return MatchResult::Won {
                winner: first.side,
                team: first.team.to_string(),
                margin: Margin::FirstInningsScore { runs: first.runs },
            };
        }
    };

    let target = first.runs + 1;
    if second.runs >= target {
        MatchResult::Won {
            winner: second.side,
            team: second.team.to_string(),
            margin: Margin::Wickets {
                wickets: MAX_WICKETS.saturating_sub(second.wickets),
            },
        }
    } else {
        MatchResult::Won {
            winner: first.side,
            team: first.team.to_string(),
            margin: Margin::Runs {
                runs: target - second.runs - 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(side: TeamSide, runs: u32, wickets: u32, deliveries: usize) -> InningsSummary<'static> {
        InningsSummary {
            side,
            team: match side {
                TeamSide::A => "India",
                TeamSide::B => "Australia",
            },
            runs,
            wickets,
            deliveries,
            started: deliveries > 0,
        }
    }

    #[test]
    fn test_no_balls_no_result() {
        assert_eq!(resolve(None, None), MatchResult::NoResult);
        let first = summary(TeamSide::A, 0, 0, 0);
        assert_eq!(resolve(Some(first), None), MatchResult::NoResult);
        assert_eq!(resolve(Some(first), Some(summary(TeamSide::B, 0, 0, 0))), MatchResult::NoResult);
    }

    #[test]
    fn test_second_innings_not_required() {
        let result = resolve(Some(summary(TeamSide::A, 150, 6, 31)), None);
        assert_eq!(result.winner(), Some(TeamSide::A));
        assert_eq!(result.to_string(), "India won by first-innings score (150 runs)");

        let unstarted = InningsSummary {
            started: false,
            ..summary(TeamSide::B, 0, 0, 0)
        };
        assert_eq!(resolve(Some(summary(TeamSide::A, 150, 6, 31)), Some(unstarted)), result);
    }

    #[test]
    fn test_chase_won_by_wickets() {
        let result = resolve(
            Some(summary(TeamSide::A, 150, 6, 31)),
            Some(summary(TeamSide::B, 151, 3, 25)),
        );
        assert_eq!(
            result,
            MatchResult::Won {
                winner: TeamSide::B,
                team: "Australia".to_string(),
                margin: Margin::Wickets { wickets: 7 },
            }
        );
        assert_eq!(result.to_string(), "Australia won by 7 wickets");
    }

    #[test]
    fn test_defended_by_runs() {
        let result = resolve(
            Some(summary(TeamSide::A, 150, 6, 31)),
            Some(summary(TeamSide::B, 149, 10, 28)),
        );
        assert_eq!(result.to_string(), "India won by 1 run");
    }

    #[test]
    fn test_level_scores_go_to_first_innings_side() {
        let result = resolve(
            Some(summary(TeamSide::A, 120, 6, 31)),
            Some(summary(TeamSide::B, 120, 8, 30)),
        );
        assert_eq!(
            result,
            MatchResult::Won {
                winner: TeamSide::A,
                team: "India".to_string(),
                margin: Margin::Runs { runs: 0 },
            }
        );
        assert_eq!(result.to_string(), "India won by 0 runs");
    }

    #[test]
    fn test_wickets_margin_counts_from_ten() {
        let result = resolve(
            Some(summary(TeamSide::A, 150, 6, 31)),
            Some(summary(TeamSide::B, 151, 0, 26)),
        );
        assert_eq!(result.to_string(), "Australia won by 10 wickets");
    }

    #[test]
    fn test_margin_display() {
        assert_eq!(Margin::Wickets { wickets: 1 }.to_string(), "1 wicket");
        assert_eq!(Margin::Runs { runs: 20 }.to_string(), "20 runs");
    }
}
