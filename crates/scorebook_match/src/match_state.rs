//! Match lifecycle: toss, two innings, result.
//!
//! Like [`Innings`], a [`Match`] is a value. Each operation returns the next
//! match; the caller owns the single "current match" reference and decides
//! what to broadcast.

use crate::chase::ChaseState;
use crate::config::{MatchSetup, TeamSide};
use crate::innings::{CompletionReason, Innings};
use crate::result::{InningsSummary, MatchResult, resolve};
use crate::scorecard::ScorecardView;
use scorebook_core::{MatchId, PlayerName, ScoreError, ScoreResult};
use scorebook_ledger::{Delivery, DeliveryInput};
use scorebook_projection::ViewConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Stored match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStatus {
    /// Set up, toss done, no ball bowled
    Upcoming,
    /// In progress
    Live,
    /// Finished
    Completed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Completed => "completed",
        })
    }
}

/// Where the match is, derived from status and innings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchPhase {
    /// Not started
    NotStarted,
    /// First innings in progress
    Innings1Live,
    /// First innings over, second side not yet in
    Innings1Ended,
    /// Second innings in progress
    Innings2Live,
    /// Finished
    Completed,
}

/// Returned when the first innings is closed by hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InningsTransition {
    /// Runs the second side needs
    pub target: u32,
    /// The freshly opened second innings
    pub next_innings: Innings,
}

/// A two-innings limited-overs match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    id: MatchId,
    setup: MatchSetup,
    status: MatchStatus,
    innings: Vec<Innings>,
    ended_manually: bool,
}

fn log_rejection(op: &'static str) -> impl Fn(&ScoreError) {
    move |err| {
        if err.is_state_error() {
            warn!(op, error = %err, "rejected");
        }
    }
}

impl Match {
    /// Create an upcoming match
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Validation`] if the setup is invalid
    pub fn new(setup: MatchSetup) -> ScoreResult<Self> {
        Self::with_id(MatchId::new(), setup)
    }

    /// Create an upcoming match with a known id
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Validation`] if the setup is invalid
    pub fn with_id(id: MatchId, setup: MatchSetup) -> ScoreResult<Self> {
        setup.validate()?;
        info!(
            match_id = %id,
            team_a = %setup.team_a.name,
            team_b = %setup.team_b.name,
            overs = setup.total_overs,
            "match created"
        );
        Ok(Self {
            id,
            setup,
            status: MatchStatus::Upcoming,
            innings: Vec::new(),
            ended_manually: false,
        })
    }

    /// Match id
    #[must_use]
    pub const fn id(&self) -> MatchId {
        self.id
    }

    /// Teams, toss and overs
    #[must_use]
    pub const fn setup(&self) -> &MatchSetup {
        &self.setup
    }

    /// Stored status
    #[must_use]
    pub const fn status(&self) -> MatchStatus {
        self.status
    }

    /// Whether the scorer ended the match
    #[must_use]
    pub const fn ended_manually(&self) -> bool {
        self.ended_manually
    }

    /// Derived phase
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        match (self.status, self.current()) {
            (MatchStatus::Upcoming, _) | (MatchStatus::Live, None) => MatchPhase::NotStarted,
            (MatchStatus::Completed, _) => MatchPhase::Completed,
            (MatchStatus::Live, Some(i)) if i.number() == 1 => MatchPhase::Innings1Live,
            (MatchStatus::Live, Some(i)) if i.has_started() => MatchPhase::Innings2Live,
            (MatchStatus::Live, Some(_)) => MatchPhase::Innings1Ended,
        }
    }

    /// Innings 1 or 2, if opened
    #[must_use]
    pub fn innings(&self, number: u8) -> Option<&Innings> {
        number
            .checked_sub(1)
            .and_then(|index| self.innings.get(usize::from(index)))
    }

    /// The innings receiving deliveries
    #[must_use]
    pub fn current(&self) -> Option<&Innings> {
        self.innings.last()
    }

    /// Side that bats in innings `number`
    #[must_use]
    pub fn batting_side(&self, number: u8) -> TeamSide {
        let first = self.setup.toss.batting_first();
        if number == 2 { first.other() } else { first }
    }

    /// Second-innings target, once fixed
    #[must_use]
    pub fn target(&self) -> Option<u32> {
        self.innings(2).and_then(Innings::target)
    }

    fn ensure_live(&self) -> ScoreResult<()> {
        if self.status == MatchStatus::Live {
            Ok(())
        } else {
            Err(ScoreError::MatchNotLive {
                status: self.status.to_string(),
            })
        }
    }

    fn live_innings(&self) -> ScoreResult<&Innings> {
        self.ensure_live()?;
        self.current().ok_or(ScoreError::MatchNotLive {
            status: self.status.to_string(),
        })
    }

    fn open_innings(&self, number: u8) -> Innings {
        let batting = self.batting_side(number);
        Innings::new(number, batting, self.setup.total_overs).with_squads(
            self.setup.team(batting).players.clone(),
            self.setup.team(batting.other()).players.clone(),
        )
    }

    fn replace_current(&self, innings: Innings) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.innings.last_mut() {
            *slot = innings;
        }
        next
    }

    /// Move past a completed innings: open the chase or finish the match
    fn settle(mut self) -> Self {
        let Some(current) = self.current() else {
            return self;
        };
        let Some(reason) = current.completion() else {
            return self;
        };
        let runs = current.totals().runs;
        let number = current.number();
        if number == 1 {
            let target = runs + 1;
            info!(match_id = %self.id, %reason, runs, target, "first innings ended");
            let second = self.open_innings(2).with_target(target);
            self.innings.push(second);
        } else {
            self.status = MatchStatus::Completed;
            info!(match_id = %self.id, %reason, result = %self.result(), "match completed");
        }
        self
    }

    /// Toss done, first innings opens
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::MatchAlreadyStarted`] unless the match is upcoming
    pub fn start(&self) -> ScoreResult<Self> {
        if self.status != MatchStatus::Upcoming {
            let err = ScoreError::MatchAlreadyStarted;
            log_rejection("start")(&err);
            return Err(err);
        }
        let mut next = self.clone();
        next.status = MatchStatus::Live;
        next.innings = vec![self.open_innings(1)];
        info!(
            match_id = %self.id,
            batting = %self.setup.team(self.batting_side(1)).name,
            "match started"
        );
        Ok(next)
    }

    /// Put two batters at the crease of the current innings
    ///
    /// # Errors
    ///
    /// Fails if the match is not live or the batters are not acceptable
    pub fn set_batters(
        &self,
        striker: impl Into<PlayerName>,
        non_striker: impl Into<PlayerName>,
    ) -> ScoreResult<Self> {
        self.live_innings()
            .and_then(|i| i.with_batters(striker.into(), non_striker.into()))
            .map(|i| self.replace_current(i))
            .inspect_err(log_rejection("set_batters"))
    }

    /// Hand the ball to a bowler
    ///
    /// # Errors
    ///
    /// Fails if the match is not live or the bowler is not in the fielding side
    pub fn set_bowler(&self, bowler: impl Into<PlayerName>) -> ScoreResult<Self> {
        self.live_innings()
            .and_then(|i| i.with_bowler(bowler.into()))
            .map(|i| self.replace_current(i))
            .inspect_err(log_rejection("set_bowler"))
    }

    /// Record a scorer's input against the players at the crease
    ///
    /// # Errors
    ///
    /// Fails if a player is missing, the input is inconsistent, or the
    /// innings cannot accept the delivery
    pub fn record_delivery(&self, input: DeliveryInput) -> ScoreResult<Self> {
        let crease = self
            .live_innings()
            .and_then(Innings::crease)
            .inspect_err(log_rejection("record_delivery"))?;
        self.append(input.into_delivery(&crease)?)
    }

    /// Append a delivery to the current innings
    ///
    /// # Errors
    ///
    /// Fails if the match is not live or the innings rejects the delivery
    pub fn append(&self, delivery: Delivery) -> ScoreResult<Self> {
        self.live_innings()
            .and_then(|i| i.append(delivery))
            .map(|i| self.replace_current(i.clear_dismissed()).settle())
            .inspect_err(log_rejection("append"))
    }

    /// Remove the last delivery, reopening whatever it closed
    ///
    /// # Errors
    ///
    /// - [`ScoreError::MatchNotLive`] before the start or after a manual end
    /// - [`ScoreError::EmptyLedger`] if nothing has been bowled
    /// - [`ScoreError::InningsAlreadyCompleted`] to reach past a manually
    ///   ended innings
    pub fn undo(&self) -> ScoreResult<Self> {
        self.undo_inner().inspect_err(log_rejection("undo"))
    }

    fn undo_inner(&self) -> ScoreResult<Self> {
        if self.status == MatchStatus::Upcoming || self.ended_manually {
            return Err(ScoreError::MatchNotLive {
                status: self.status.to_string(),
            });
        }
        let mut next = self.clone();
        let step_back = next
            .current()
            .is_some_and(|i| i.number() == 2 && i.ledger().is_empty());
        if step_back {
            let first = self.innings(1).ok_or(ScoreError::EmptyLedger)?;
            let (first, removed) = first.undo_with_removed()?;
            next.innings = vec![first.restore_crease(&removed)];
        } else {
            let current = self.current().ok_or(ScoreError::EmptyLedger)?;
            let (current, removed) = current.undo_with_removed()?;
            next = next.replace_current(current.restore_crease(&removed));
        }
        if next.status == MatchStatus::Completed {
            info!(match_id = %self.id, "match reopened by undo");
        }
        next.status = MatchStatus::Live;
        Ok(next)
    }

    /// Close the first innings and open the chase
    ///
    /// # Errors
    ///
    /// - [`ScoreError::NotFirstInnings`] once the second innings is open
    /// - [`ScoreError::NothingBowledYet`] before the first legal ball
    pub fn end_innings_manually(&self) -> ScoreResult<(Self, InningsTransition)> {
        self.end_innings_inner()
            .inspect_err(log_rejection("end_innings"))
    }

    fn end_innings_inner(&self) -> ScoreResult<(Self, InningsTransition)> {
        let current = self.live_innings()?;
        if current.number() != 1 {
            return Err(ScoreError::NotFirstInnings);
        }
        let next = self.replace_current(current.end_manually()?).settle();
        let next_innings = next.innings(2).cloned().ok_or(ScoreError::NotFirstInnings)?;
        let target = next_innings.target().unwrap_or(1);
        Ok((
            next,
            InningsTransition {
                target,
                next_innings,
            },
        ))
    }

    /// Finish the match now
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::MatchNotLive`] unless the match is live
    pub fn end_match(&self) -> ScoreResult<Self> {
        self.ensure_live().inspect_err(log_rejection("end_match"))?;
        let mut next = self.clone();
        next.status = MatchStatus::Completed;
        next.ended_manually = true;
        info!(match_id = %self.id, result = %next.result(), "match ended by scorer");
        Ok(next)
    }

    /// Why innings `number` finished, if it did
    #[must_use]
    pub fn completion(&self, number: u8) -> Option<CompletionReason> {
        let innings = self.innings(number)?;
        innings.completion().or_else(|| {
            let closed = self.status == MatchStatus::Completed
                || self.current().is_some_and(|c| c.number() > number);
            (closed && innings.has_started()).then_some(CompletionReason::Manual)
        })
    }

    fn summary(&self, number: u8) -> Option<InningsSummary<'_>> {
        let innings = self.innings(number)?;
        let totals = innings.totals();
        Some(InningsSummary {
            side: innings.batting(),
            team: &self.setup.team(innings.batting()).name,
            runs: totals.runs,
            wickets: totals.wickets,
            deliveries: innings.ledger().len(),
            started: innings.has_started(),
        })
    }

    /// Result of a completed match; [`MatchResult::NoResult`] until then
    #[must_use]
    pub fn result(&self) -> MatchResult {
        if self.status != MatchStatus::Completed {
            return MatchResult::NoResult;
        }
        resolve(self.summary(1), self.summary(2))
    }

    /// Chase arithmetic while the second innings is live
    #[must_use]
    pub fn chase(&self) -> Option<ChaseState> {
        if self.status != MatchStatus::Live {
            return None;
        }
        let second = self.current().filter(|i| i.number() == 2)?;
        let first = self.innings(1)?;
        Some(ChaseState::compute(
            first.totals().runs,
            &second.totals(),
            second.total_overs(),
        ))
    }

    /// Scorecard for innings `number`
    #[must_use]
    pub fn scorecard(&self, number: u8, config: &ViewConfig) -> ScorecardView {
        ScorecardView::build(self, number, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::setup;
    use crate::result::Margin;
    use scorebook_ledger::WicketKind;

    fn live() -> Match {
        Match::new(setup())
            .unwrap()
            .start()
            .unwrap()
            .set_batters("Rohit", "Gill")
            .unwrap()
            .set_bowler("Starc")
            .unwrap()
    }

    fn bowl(m: Match, inputs: impl IntoIterator<Item = DeliveryInput>) -> Match {
        inputs
            .into_iter()
            .fold(m, |m, input| m.record_delivery(input).unwrap())
    }

    /// India bat out their five overs without losing a wicket
    fn first_innings(runs_per_ball: &[u8]) -> Match {
        let m = bowl(live(), runs_per_ball.iter().map(|r| DeliveryInput::runs(*r)));
        assert_eq!(m.phase(), MatchPhase::Innings1Ended);
        m
    }

    fn thirty(runs: u8) -> Vec<u8> {
        vec![runs; 30]
    }

    #[test]
    fn test_lifecycle_start() {
        let m = Match::new(setup()).unwrap();
        assert_eq!(m.phase(), MatchPhase::NotStarted);
        assert!(matches!(m.undo().unwrap_err(), ScoreError::MatchNotLive { .. }));
        let started = m.start().unwrap();
        assert_eq!(started.status(), MatchStatus::Live);
        assert_eq!(started.phase(), MatchPhase::Innings1Live);
        assert_eq!(started.current().unwrap().batting(), TeamSide::A);
        assert_eq!(started.start().unwrap_err(), ScoreError::MatchAlreadyStarted);
    }

    #[test]
    fn test_invalid_setup_rejected() {
        let mut s = setup();
        s.total_overs = 0;
        assert!(Match::new(s).is_err());
    }

    #[test]
    fn test_delivery_requires_crease() {
        let m = Match::new(setup()).unwrap().start().unwrap();
        assert_eq!(
            m.record_delivery(DeliveryInput::dot()).unwrap_err(),
            ScoreError::MissingPlayer {
                role: "striker".to_string()
            }
        );
    }

    #[test]
    fn test_bowler_must_field() {
        let m = Match::new(setup()).unwrap().start().unwrap();
        assert_eq!(
            m.set_bowler("Kohli").unwrap_err(),
            ScoreError::UnknownPlayer {
                name: "Kohli".to_string()
            }
        );
    }

    #[test]
    fn test_wicket_clears_crease() {
        let m = live()
            .record_delivery(DeliveryInput::dot().wicket(WicketKind::Bowled))
            .unwrap();
        assert!(m.current().unwrap().striker().is_none());
        assert!(matches!(
            m.record_delivery(DeliveryInput::dot()).unwrap_err(),
            ScoreError::MissingPlayer { .. }
        ));
        let m = m.set_batters("Kohli", "Gill").unwrap();
        assert!(m.record_delivery(DeliveryInput::dot()).is_ok());
    }

    #[test]
    fn test_innings_transition_sets_target() {
        let m = first_innings(&thirty(5));
        assert_eq!(m.target(), Some(151));
        let second = m.current().unwrap();
        assert_eq!(second.number(), 2);
        assert_eq!(second.batting(), TeamSide::B);
        assert!(second.striker().is_none());
        assert_eq!(m.completion(1), Some(CompletionReason::OversExhausted));
    }

    #[test]
    fn test_chase_mid_innings() {
        // 150 in the first innings, 80/2 after three overs of the chase
        let mut m = first_innings(&thirty(5));
        assert_eq!(m.target(), Some(151));

        m = m.set_batters("Head", "Warner").unwrap().set_bowler("Kohli").unwrap();
        assert_eq!(m.phase(), MatchPhase::Innings2Live);
        m = m
            .record_delivery(DeliveryInput::dot().wicket(WicketKind::Bowled))
            .unwrap()
            .set_batters("Starc", "Warner")
            .unwrap()
            .record_delivery(DeliveryInput::dot().wicket(WicketKind::Lbw))
            .unwrap()
            .set_batters("Cummins", "Warner")
            .unwrap();
        let mut scored = 0;
        for n in 0..16 {
            let runs = if n < 13 { 6 } else { 0 };
            scored += u32::from(runs);
            m = m.record_delivery(DeliveryInput::runs(runs)).unwrap();
        }
        assert_eq!(scored, 78);
        m = m.record_delivery(DeliveryInput::wide(1)).unwrap();

        let chase = m.chase().unwrap();
        assert_eq!(chase.runs, 80);
        assert_eq!(chase.runs_needed, 71);
        assert_eq!(chase.balls_remaining, 12);
        assert_eq!(scorebook_core::format_rate(chase.required_run_rate.unwrap()), "35.50");
        assert_eq!(m.current().unwrap().totals().wickets, 2);
    }

    #[test]
    fn test_second_innings_never_started() {
        let m = first_innings(&thirty(5));
        let ended = m.end_match().unwrap();
        assert_eq!(ended.phase(), MatchPhase::Completed);
        let result = ended.result();
        assert_eq!(result.winner(), Some(TeamSide::A));
        assert_eq!(result.to_string(), "India won by first-innings score (150 runs)");
        assert!(ended.undo().is_err());
    }

    #[test]
    fn test_chase_completed_by_wickets() {
        let m = first_innings(&thirty(5))
            .set_batters("Head", "Warner")
            .unwrap()
            .set_bowler("Kohli")
            .unwrap();
        let m = bowl(m, (0..26).map(|_| DeliveryInput::runs(6)));
        assert_eq!(m.status(), MatchStatus::Completed);
        assert_eq!(m.completion(2), Some(CompletionReason::TargetReached));
        assert_eq!(
            m.result(),
            MatchResult::Won {
                winner: TeamSide::B,
                team: "Australia".to_string(),
                margin: Margin::Wickets { wickets: 10 },
            }
        );
        assert!(m.chase().is_none());
        assert!(matches!(
            m.record_delivery(DeliveryInput::dot()).unwrap_err(),
            ScoreError::MatchNotLive { .. }
        ));
    }

    #[test]
    fn test_defended_and_level() {
        let chase = |runs: u8| {
            let m = first_innings(&thirty(5))
                .set_batters("Head", "Warner")
                .unwrap()
                .set_bowler("Kohli")
                .unwrap();
            bowl(m, (0..30).map(move |_| DeliveryInput::runs(runs)))
        };
        let defended = chase(4);
        assert_eq!(defended.result().to_string(), "India won by 30 runs");
        assert_eq!(defended.completion(2), Some(CompletionReason::OversExhausted));

        let level = first_innings(&thirty(4))
            .set_batters("Head", "Warner")
            .unwrap()
            .set_bowler("Kohli")
            .unwrap();
        let level = bowl(level, (0..30).map(|_| DeliveryInput::runs(4)));
        assert_eq!(level.result().winner(), Some(TeamSide::A));
        assert_eq!(level.result().to_string(), "India won by 0 runs");
    }

    #[test]
    fn test_no_result_without_balls() {
        let m = Match::new(setup()).unwrap().start().unwrap().end_match().unwrap();
        assert_eq!(m.result(), MatchResult::NoResult);
        assert_eq!(live().result(), MatchResult::NoResult);
    }

    #[test]
    fn test_end_innings_manually() {
        let m = live();
        assert_eq!(m.end_innings_manually().unwrap_err(), ScoreError::NothingBowledYet);

        let m = bowl(m, [DeliveryInput::runs(4), DeliveryInput::runs(2)]);
        let (next, transition) = m.end_innings_manually().unwrap();
        assert_eq!(transition.target, 7);
        assert_eq!(transition.next_innings.number(), 2);
        assert_eq!(next.phase(), MatchPhase::Innings1Ended);
        assert_eq!(next.completion(1), Some(CompletionReason::Manual));
        assert_eq!(next.end_innings_manually().unwrap_err(), ScoreError::NotFirstInnings);
        assert_eq!(next.undo().unwrap_err(), ScoreError::InningsAlreadyCompleted);
    }

    #[test]
    fn test_undo_steps_back_into_first_innings() {
        let before = bowl(live(), (0..29).map(|_| DeliveryInput::runs(1)));
        let after = before.record_delivery(DeliveryInput::runs(1)).unwrap();
        assert_eq!(after.phase(), MatchPhase::Innings1Ended);
        assert_eq!(after.undo().unwrap(), before);
    }

    #[test]
    fn test_undo_reopens_completed_match() {
        let m = first_innings(&thirty(5))
            .set_batters("Head", "Warner")
            .unwrap()
            .set_bowler("Kohli")
            .unwrap();
        let before = bowl(m, (0..25).map(|_| DeliveryInput::runs(6)));
        let done = before.record_delivery(DeliveryInput::runs(6)).unwrap();
        assert_eq!(done.status(), MatchStatus::Completed);
        assert_eq!(done.undo().unwrap(), before);
    }

    #[test]
    fn test_undo_restores_dismissed_batter() {
        let before = live();
        let out = before
            .record_delivery(DeliveryInput::dot().wicket(WicketKind::Caught).fielder("Head"))
            .unwrap();
        assert_eq!(out.undo().unwrap(), before);
    }

    proptest::proptest! {
        #[test]
        fn prop_undo_inverts_record(runs in proptest::collection::vec(0u8..=6, 0..30), last in 0u8..=6) {
            let m = runs
                .iter()
                .try_fold(live(), |m, r| m.record_delivery(DeliveryInput::runs(*r)))
                .unwrap();
            if let Ok(next) = m.record_delivery(DeliveryInput::runs(last)) {
                proptest::prop_assert_eq!(next.undo().unwrap(), m);
            }
        }
    }
}
