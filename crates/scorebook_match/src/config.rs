//! Match setup and its validation.

use scorebook_core::{PlayerName, ScoreError, ScoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Overs per innings when the setup does not say
pub const DEFAULT_TOTAL_OVERS: u32 = 5;

/// Longest innings allowed
pub const MAX_TOTAL_OVERS: u32 = 50;

/// Largest squad per side
pub const MAX_PLAYERS: usize = 11;

const TEAM_NAME_LEN: std::ops::RangeInclusive<usize> = 2..=50;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    /// First listed team
    #[serde(rename = "teamA")]
    A,
    /// Second listed team
    #[serde(rename = "teamB")]
    B,
}

impl TeamSide {
    /// The opposing side
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// What the toss winner chose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TossDecision {
    /// Bat first
    Bat,
    /// Bowl first
    Bowl,
}

/// Toss outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toss {
    /// Side that won the toss
    pub winner: TeamSide,
    /// Their choice
    pub decision: TossDecision,
}

impl Toss {
    /// Side that bats first
    #[must_use]
    pub const fn batting_first(&self) -> TeamSide {
        match self.decision {
            TossDecision::Bat => self.winner,
            TossDecision::Bowl => self.winner.other(),
        }
    }
}

/// A team and its squad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSheet {
    /// Team name
    pub name: String,
    /// Squad; may be empty when players are not tracked
    #[serde(default)]
    pub players: Vec<PlayerName>,
}

impl TeamSheet {
    /// Team with the given squad
    #[must_use]
    pub fn new(name: impl Into<String>, players: &[&str]) -> Self {
        Self {
            name: name.into(),
            players: players.iter().map(|p| PlayerName::from(*p)).collect(),
        }
    }

    /// Whether `player` may play for this side
    #[must_use]
    pub fn admits(&self, player: &PlayerName) -> bool {
        self.players.is_empty() || self.players.contains(player)
    }

    fn validate(&self, field: &str) -> ScoreResult<()> {
        let name_len = self.name.trim().chars().count();
        if !TEAM_NAME_LEN.contains(&name_len) {
            return Err(ScoreError::validation(
                format!("{}.name", field),
                format!(
                    "must be between {} and {} characters",
                    TEAM_NAME_LEN.start(),
                    TEAM_NAME_LEN.end()
                ),
            ));
        }
        if self.players.len() > MAX_PLAYERS {
            return Err(ScoreError::validation(
                format!("{}.players", field),
                format!("at most {} players", MAX_PLAYERS),
            ));
        }
        let mut seen = HashSet::new();
        for player in &self.players {
            if player.is_empty() {
                return Err(ScoreError::validation(
                    format!("{}.players", field),
                    "player names cannot be blank",
                ));
            }
            if !seen.insert(player) {
                return Err(ScoreError::validation(
                    format!("{}.players", field),
                    format!("{} is listed twice", player),
                ));
            }
        }
        Ok(())
    }
}

fn default_total_overs() -> u32 {
    DEFAULT_TOTAL_OVERS
}

/// Everything fixed before the first ball
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    /// First team
    pub team_a: TeamSheet,
    /// Second team
    pub team_b: TeamSheet,
    /// Toss outcome
    pub toss: Toss,
    /// Overs per innings
    #[serde(default = "default_total_overs")]
    pub total_overs: u32,
}

impl MatchSetup {
    /// Setup for two teams with the toss and overs given
    #[must_use]
    pub fn new(team_a: TeamSheet, team_b: TeamSheet, toss: Toss, total_overs: u32) -> Self {
        Self {
            team_a,
            team_b,
            toss,
            total_overs,
        }
    }

    /// Team sheet for a side
    #[must_use]
    pub const fn team(&self, side: TeamSide) -> &TeamSheet {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    /// Check names, squads and overs
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Validation`] naming the first offending field
    pub fn validate(&self) -> ScoreResult<()> {
        self.team_a.validate("teamA")?;
        self.team_b.validate("teamB")?;
        if self.team_a.name.trim().eq_ignore_ascii_case(self.team_b.name.trim()) {
            return Err(ScoreError::validation("teamB.name", "teams must have different names"));
        }
        if !(1..=MAX_TOTAL_OVERS).contains(&self.total_overs) {
            return Err(ScoreError::validation(
                "totalOvers",
                format!("must be between 1 and {}", MAX_TOTAL_OVERS),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn setup() -> MatchSetup {
        MatchSetup::new(
            TeamSheet::new("India", &["Rohit", "Gill", "Kohli", "Iyer"]),
            TeamSheet::new("Australia", &["Head", "Warner", "Starc", "Cummins"]),
            Toss {
                winner: TeamSide::A,
                decision: TossDecision::Bat,
            },
            5,
        )
    }

    #[test]
    fn test_valid_setup() {
        assert!(setup().validate().is_ok());
    }

    #[test]
    fn test_toss_decides_batting_side() {
        let mut toss = Toss {
            winner: TeamSide::B,
            decision: TossDecision::Bat,
        };
        assert_eq!(toss.batting_first(), TeamSide::B);
        toss.decision = TossDecision::Bowl;
        assert_eq!(toss.batting_first(), TeamSide::A);
    }

    #[test]
    fn test_team_name_length() {
        let mut s = setup();
        s.team_a.name = "I".to_string();
        let err = s.validate().unwrap_err();
        assert_eq!(
            err,
            ScoreError::validation("teamA.name", "must be between 2 and 50 characters")
        );
    }

    #[test]
    fn test_team_names_distinct() {
        let mut s = setup();
        s.team_b.name = "india".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_squad_limits() {
        let mut s = setup();
        s.team_a.players = (0..12).map(|n| PlayerName::new(format!("P{}", n))).collect();
        assert!(s.validate().is_err());

        let mut s = setup();
        s.team_b.players.push(PlayerName::from("Head"));
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_overs_range() {
        let mut s = setup();
        s.total_overs = 0;
        assert!(s.validate().is_err());
        s.total_overs = 51;
        assert!(s.validate().is_err());
        s.total_overs = 50;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_setup_json_defaults() {
        let json = r#"{
            "teamA": { "name": "India" },
            "teamB": { "name": "Australia" },
            "toss": { "winner": "teamB", "decision": "bowl" }
        }"#;
        let s: MatchSetup = serde_json::from_str(json).unwrap();
        assert_eq!(s.total_overs, DEFAULT_TOTAL_OVERS);
        assert!(s.team_a.players.is_empty());
        assert_eq!(s.toss.batting_first(), TeamSide::A);
        assert!(s.team(TeamSide::A).admits(&PlayerName::from("Anyone")));
    }
}
