//! JSON match scripts: a setup and the scorer's actions in order.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use scorebook_ledger::DeliveryInput;
use scorebook_match::{Match, MatchSetup};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One scorer action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScriptEvent {
    /// Begin the first innings
    Start,
    /// Name the two batters
    SetBatters {
        /// On strike
        striker: String,
        /// Other end
        non_striker: String,
    },
    /// Name the bowler
    SetBowler {
        /// Bowler
        bowler: String,
    },
    /// A ball from the scoring panel
    Delivery(DeliveryInput),
    /// Remove the last ball
    Undo,
    /// Close the first innings
    EndInnings,
    /// Finish the match
    EndMatch,
}

impl ScriptEvent {
    /// Short name for error context
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SetBatters { .. } => "setBatters",
            Self::SetBowler { .. } => "setBowler",
            Self::Delivery(_) => "delivery",
            Self::Undo => "undo",
            Self::EndInnings => "endInnings",
            Self::EndMatch => "endMatch",
        }
    }

    fn apply(&self, m: &Match) -> scorebook_core::ScoreResult<Match> {
        match self {
            Self::Start => m.start(),
            Self::SetBatters {
                striker,
                non_striker,
            } => m.set_batters(striker.as_str(), non_striker.as_str()),
            Self::SetBowler { bowler } => m.set_bowler(bowler.as_str()),
            Self::Delivery(input) => m.record_delivery(input.clone()),
            Self::Undo => m.undo(),
            Self::EndInnings => m.end_innings_manually().map(|(next, _)| next),
            Self::EndMatch => m.end_match(),
        }
    }
}

/// A whole match as the scorer entered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScript {
    /// Teams, toss and overs
    pub setup: MatchSetup,
    /// Actions in order
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl MatchScript {
    /// Read a script from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).wrap_err_with(|| format!("parsing {}", path.display()))
    }

    /// Apply every event, stopping at the first rejected one
    pub fn play(&self) -> Result<Match> {
        let start = Match::new(self.setup.clone()).wrap_err("invalid match setup")?;
        self.events
            .iter()
            .enumerate()
            .try_fold(start, |m, (index, event)| {
                debug!(event = index + 1, kind = event.name(), "applying");
                event
                    .apply(&m)
                    .wrap_err_with(|| format!("event {} ({}) rejected", index + 1, event.name()))
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use scorebook_match::{MatchPhase, MatchStatus};
    use std::io::Write;

    pub(crate) const SCRIPT: &str = r#"{
        "setup": {
            "teamA": { "name": "India", "players": ["Rohit", "Gill", "Kohli", "Iyer"] },
            "teamB": { "name": "Australia", "players": ["Head", "Warner", "Starc", "Cummins"] },
            "toss": { "winner": "teamA", "decision": "bat" },
            "totalOvers": 1
        },
        "events": [
            { "type": "start" },
            { "type": "setBatters", "striker": "Rohit", "nonStriker": "Gill" },
            { "type": "setBowler", "bowler": "Starc" },
            { "type": "delivery", "runs": 4 },
            { "type": "delivery", "runs": 1 },
            { "type": "delivery", "isWicket": true, "wicketType": "bowled" },
            { "type": "setBatters", "striker": "Kohli", "nonStriker": "Gill" },
            { "type": "delivery", "extras": { "wide": 3 } },
            { "type": "delivery" },
            { "type": "delivery", "runs": 6 },
            { "type": "delivery", "runs": 2 },
            { "type": "undo" },
            { "type": "delivery", "runs": 1 }
        ]
    }"#;

    #[test]
    fn test_parse_and_play() {
        let script: MatchScript = serde_json::from_str(SCRIPT).unwrap();
        assert_eq!(script.events.len(), 13);
        assert_eq!(script.events[11], ScriptEvent::Undo);
        let m = script.play().unwrap();
        assert_eq!(m.phase(), MatchPhase::Innings1Ended);
        assert_eq!(m.target(), Some(16));
    }

    #[test]
    fn test_rejected_event_names_position() {
        let mut script: MatchScript = serde_json::from_str(SCRIPT).unwrap();
        script.events.push(ScriptEvent::EndInnings);
        let err = script.play().unwrap_err();
        assert!(err.to_string().contains("event 14 (endInnings)"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();
        let script = MatchScript::load(file.path()).unwrap();
        let m = script.play().unwrap();
        assert_eq!(m.status(), MatchStatus::Live);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MatchScript::load(&dir.path().join("absent.json")).is_err());
    }
}
