//! Game orchestrator: the step loop that drives one simulated game.
//!
//! ```text
//!            play                clock hits 0 (Q1-Q3, or tied Q4 with overtime)
//!   InProgress ──► InProgress ─────────────────────────► QuarterBreak
//!        ▲                                                   │
//!        └──────────────────── next period ◄─────────────────┘
//!
//!   InProgress ──► Ended(Regulation | Overtime | PlayCap)
//! ```
//!
//! One orchestrator owns everything a game mutates: the state, its RNG, the
//! history buffer, the momentum tracker and the drive recorder. Nothing is
//! shared between games.

use super::audit_gates::{self, ScoreSnapshot};
use super::budget::PlayBudget;
use super::config::GameConfig;
use super::drive_recorder::DriveRecorder;
use super::game_state::{
    GameEnd, GamePhase, GameState, FIELD_GOAL_POINTS, GOAL_LINE, OVERTIME_QUARTER,
    OVERTIME_SECONDS, QUARTER_SECONDS, REGULATION_QUARTERS, SAFETY_POINTS, TOUCHBACK_SPOT,
    TOUCHDOWN_POINTS,
};
use super::history::{HistoryBuffer, HistoryEntry};
use super::momentum::{MomentumEvent, MomentumTracker};
use super::sampler::PlayOutcomeSampler;
use super::situation::{classify, Situation};
use crate::error::{Result, SimError};
use crate::models::{DriveResult, DriveSummary, PlayRecord, PlayResult, Side, TeamProfile};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Everything a finished game produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub home_team: TeamProfile,
    pub away_team: TeamProfile,
    /// Seed actually used (drawn fresh when none was supplied).
    pub seed: u64,
    pub home_score: u16,
    pub away_score: u16,
    pub end: GameEnd,
    pub plays: Vec<PlayRecord>,
    pub drives: Vec<DriveSummary>,
}

impl GameResult {
    /// `None` on a tie.
    pub fn winner(&self) -> Option<Side> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.end == GameEnd::PlayCap
    }

    pub fn final_score(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.home_team.id, self.home_score, self.away_team.id, self.away_score
        )
    }
}

/// Effect of one play on the state, as needed by the bookkeeping that follows.
#[derive(Debug, Clone, Copy)]
struct AppliedPlay {
    yards: i32,
    touchdown: bool,
    /// Points scored by the offense on this play.
    offense_scored: bool,
    /// Any points on this play, either side.
    points_scored: bool,
    drive_end: Option<DriveResult>,
    event: MomentumEvent,
}

impl AppliedPlay {
    fn gain(yards: i32) -> Self {
        Self {
            yards,
            touchdown: false,
            offense_scored: false,
            points_scored: false,
            drive_end: None,
            event: MomentumEvent::Play,
        }
    }

    fn ends_drive(mut self, result: DriveResult) -> Self {
        self.drive_end = Some(result);
        self
    }
}

pub struct GameOrchestrator {
    config: GameConfig,
    seed: u64,
    rng: ChaCha8Rng,
    state: GameState,
    history: HistoryBuffer,
    momentum: MomentumTracker,
    sampler: PlayOutcomeSampler,
    recorder: DriveRecorder,
    budget: PlayBudget,
    drives: Vec<DriveSummary>,
}

impl GameOrchestrator {
    /// Set up a game. `None` draws a fresh seed; the seed in use is always
    /// reported by [`GameOrchestrator::seed`] and in the result.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let config = config.sanitized();
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let receiver = coin_toss(&mut rng);
        let state = GameState::new(config.home.clone(), config.away.clone(), receiver);

        Self {
            history: HistoryBuffer::new(config.history_capacity),
            momentum: MomentumTracker::new(),
            sampler: PlayOutcomeSampler::new(config.weather),
            recorder: DriveRecorder::new(config.efficiency_threshold),
            budget: PlayBudget::new(config.max_plays),
            drives: Vec::new(),
            config,
            seed,
            rng,
            state,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn drives(&self) -> &[DriveSummary] {
        &self.drives
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Run until the game ends.
    pub fn run(mut self) -> Result<GameResult> {
        while !self.state.phase.is_ended() {
            self.step()?;
        }
        self.into_result()
    }

    /// Advance the state machine by one transition: either one play, or the
    /// start of the next period after a break.
    pub fn step(&mut self) -> Result<GamePhase> {
        match self.state.phase {
            GamePhase::Ended(_) => return Err(SimError::GameOver),
            GamePhase::QuarterBreak => {
                self.start_next_period();
                return Ok(self.state.phase);
            }
            GamePhase::InProgress => {}
        }
        debug_assert!(self.state.time_remaining > 0, "snap with no time on the clock");

        let before = ScoreSnapshot::capture(&self.state);
        let snap_field_position = self.state.field_position;
        let time_at_snap = self.state.time_remaining;
        let offense = self.state.possession;

        let situation = classify(&self.state);
        let result = self.sampler.sample(&self.state, situation, &self.history, &mut self.rng);
        let elapsed = self.elapsed_for(&result, situation);
        self.state.time_remaining -= elapsed;

        let applied = self.apply(result, offense);

        self.momentum.update(&mut self.state, applied.event, applied.yards, &mut self.rng);
        let play_type = result.play_type();
        self.history.push(HistoryEntry::from_play(
            play_type,
            applied.yards,
            applied.offense_scored,
            self.config.efficiency_threshold,
        ));

        let record = PlayRecord {
            index: self.state.plays.len(),
            quarter: self.state.quarter,
            time_at_snap,
            elapsed,
            possession: offense,
            situation,
            play_type,
            yards: applied.yards,
            touchdown: applied.touchdown,
            field_position: self.state.field_position,
            down: self.state.down,
            yards_to_go: self.state.yards_to_go,
            momentum: self.state.momentum,
            momentum_trend: self.momentum.trend(),
            home_score: self.state.home_score,
            away_score: self.state.away_score,
            drive_end: applied.drive_end,
        };
        log::trace!(
            "Q{} {:>3}s {:?} {} {} yds -> fp {} {}&{} m={:.3}",
            record.quarter,
            record.time_at_snap,
            record.possession,
            record.play_type,
            record.yards,
            record.field_position,
            record.down,
            record.yards_to_go,
            record.momentum
        );

        self.recorder.record(&record, snap_field_position);
        let index = record.index;
        self.state.plays.push(record);
        if let Some(drive_result) = applied.drive_end {
            self.close_drive(drive_result);
        }

        audit_gates::validate_state(&self.state, before, index)?;

        if self.state.overtime && applied.points_scored {
            self.finish(GameEnd::Overtime);
        } else if self.state.time_remaining == 0 {
            self.end_of_period();
        }

        if !self.budget.tick_play() && !self.state.phase.is_ended() {
            if let Some(reason) = self.budget.exceeded_reason() {
                log::warn!("{} {}: {}", self.state.home_team.id, self.state.away_team.id, reason);
            }
            self.finish(GameEnd::PlayCap);
        }

        Ok(self.state.phase)
    }

    /// Package the finished game. Fails if it has not ended yet.
    pub fn into_result(self) -> Result<GameResult> {
        let end = match self.state.phase {
            GamePhase::Ended(end) => end,
            _ => return Err(SimError::GameNotFinished),
        };
        Ok(GameResult {
            home_team: self.state.home_team,
            away_team: self.state.away_team,
            seed: self.seed,
            home_score: self.state.home_score,
            away_score: self.state.away_score,
            end,
            plays: self.state.plays,
            drives: self.drives,
        })
    }

    // ========================================================================
    // Play resolution
    // ========================================================================

    fn apply(&mut self, result: PlayResult, offense: Side) -> AppliedPlay {
        match result {
            PlayResult::Run { yards, .. } | PlayResult::Pass { yards, .. } => {
                self.advance_ball(yards, offense)
            }
            PlayResult::IncompletePass => self.next_down(AppliedPlay::gain(0)),
            PlayResult::Interception => {
                self.turn_over_at_spot();
                AppliedPlay { event: MomentumEvent::Giveaway, ..AppliedPlay::gain(0) }
                    .ends_drive(DriveResult::Interception)
            }
            PlayResult::Fumble => {
                self.turn_over_at_spot();
                AppliedPlay { event: MomentumEvent::Giveaway, ..AppliedPlay::gain(0) }
                    .ends_drive(DriveResult::Fumble)
            }
            PlayResult::Punt { net_yards, .. } => {
                let landing = self.state.field_position as i32 + net_yards;
                let spot = if landing >= GOAL_LINE as i32 {
                    TOUCHBACK_SPOT
                } else {
                    (GOAL_LINE as i32 - landing) as u8
                };
                self.state.change_possession(spot);
                AppliedPlay::gain(0).ends_drive(DriveResult::Punt)
            }
            PlayResult::FieldGoal { made: true, .. } => {
                self.state.add_score(offense, FIELD_GOAL_POINTS);
                self.state.change_possession(TOUCHBACK_SPOT);
                AppliedPlay {
                    offense_scored: true,
                    points_scored: true,
                    event: MomentumEvent::FieldGoal,
                    ..AppliedPlay::gain(0)
                }
                .ends_drive(DriveResult::FieldGoal)
            }
            PlayResult::FieldGoal { made: false, .. } => {
                self.turn_over_at_spot();
                AppliedPlay::gain(0).ends_drive(DriveResult::MissedFieldGoal)
            }
            PlayResult::NoPlay => AppliedPlay::gain(0),
        }
    }

    /// Move the ball `yards` from scrimmage, handling both goal lines.
    fn advance_ball(&mut self, yards: i32, offense: Side) -> AppliedPlay {
        let from = self.state.field_position as i32;
        let target = from + yards;

        if target >= GOAL_LINE as i32 {
            self.state.add_score(offense, TOUCHDOWN_POINTS);
            self.state.change_possession(TOUCHBACK_SPOT);
            return AppliedPlay {
                touchdown: true,
                offense_scored: true,
                points_scored: true,
                event: MomentumEvent::Touchdown,
                ..AppliedPlay::gain(GOAL_LINE as i32 - from)
            }
            .ends_drive(DriveResult::Touchdown);
        }

        if target <= 0 {
            self.state.add_score(offense.opponent(), SAFETY_POINTS);
            self.state.change_possession(TOUCHBACK_SPOT);
            return AppliedPlay { points_scored: true, ..AppliedPlay::gain(-from) }
                .ends_drive(DriveResult::Safety);
        }

        self.state.field_position = target as u8;
        if yards >= self.state.yards_to_go as i32 {
            self.state.reset_downs();
            AppliedPlay::gain(yards)
        } else {
            // yards < yards_to_go keeps the new distance >= 1
            self.state.yards_to_go = (self.state.yards_to_go as i32 - yards) as u8;
            self.next_down(AppliedPlay::gain(yards))
        }
    }

    /// Burn a down; failing on fourth down hands the ball over at the spot.
    fn next_down(&mut self, applied: AppliedPlay) -> AppliedPlay {
        if self.state.down >= 4 {
            self.turn_over_at_spot();
            return applied.ends_drive(DriveResult::TurnoverOnDowns);
        }
        self.state.down += 1;
        applied
    }

    fn turn_over_at_spot(&mut self) {
        let spot = self.state.mirrored_spot();
        self.state.change_possession(spot);
    }

    fn elapsed_for(&mut self, result: &PlayResult, situation: Situation) -> u16 {
        let (lo, hi): (u16, u16) = match result {
            PlayResult::Run { .. } => (25, 40),
            PlayResult::Pass { .. } => (20, 35),
            PlayResult::IncompletePass | PlayResult::Interception | PlayResult::Fumble => (5, 10),
            PlayResult::Punt { .. } | PlayResult::FieldGoal { .. } => (5, 10),
            PlayResult::NoPlay => (3, 6),
        };
        let mut secs = self.rng.gen_range(lo..=hi);
        if situation == Situation::TwoMinute {
            secs = (secs / 2).max(1);
        }
        secs.min(self.state.time_remaining).max(1)
    }

    // ========================================================================
    // Drives and periods
    // ========================================================================

    fn close_drive(&mut self, result: DriveResult) {
        if let Some(summary) = self.recorder.close(result) {
            log::debug!(
                "drive {:?}: {} plays, {} yds, {} ({}-{})",
                summary.team,
                summary.play_count,
                summary.total_yards,
                summary.result,
                self.state.home_score,
                self.state.away_score
            );
            self.drives.push(summary);
        }
    }

    fn end_of_period(&mut self) {
        if self.state.overtime {
            self.finish(GameEnd::Overtime);
        } else if self.state.quarter < REGULATION_QUARTERS
            || (self.config.allow_overtime && self.state.is_tied())
        {
            self.state.phase = GamePhase::QuarterBreak;
        } else {
            self.finish(GameEnd::Regulation);
        }
    }

    fn start_next_period(&mut self) {
        match self.state.quarter {
            2 if self.config.halftime_kickoff => {
                self.close_drive(DriveResult::EndOfHalf);
                let receiver = self.state.opening_receiver.opponent();
                self.kick_off_to(receiver);
                self.state.quarter = 3;
                self.state.time_remaining = QUARTER_SECONDS;
            }
            REGULATION_QUARTERS => {
                self.close_drive(DriveResult::EndOfHalf);
                let receiver = coin_toss(&mut self.rng);
                self.kick_off_to(receiver);
                self.state.quarter = OVERTIME_QUARTER;
                self.state.overtime = true;
                self.state.time_remaining = OVERTIME_SECONDS;
            }
            _ => {
                self.state.quarter += 1;
                self.state.time_remaining = QUARTER_SECONDS;
            }
        }
        log::debug!(
            "start of period {} ({}-{})",
            self.state.quarter,
            self.state.home_score,
            self.state.away_score
        );
        self.state.phase = GamePhase::InProgress;
    }

    fn kick_off_to(&mut self, receiver: Side) {
        self.state.possession = receiver;
        self.state.field_position = TOUCHBACK_SPOT;
        self.state.reset_downs();
    }

    fn finish(&mut self, end: GameEnd) {
        let result = if end == GameEnd::PlayCap { DriveResult::Capped } else { DriveResult::EndOfHalf };
        self.close_drive(result);
        self.state.phase = GamePhase::Ended(end);
        log::info!(
            "final: {} {} - {} {} ({} plays, {:?}, seed {})",
            self.state.home_team.id,
            self.state.home_score,
            self.state.away_team.id,
            self.state.away_score,
            self.state.plays.len(),
            end,
            self.seed
        );
    }
}

fn coin_toss<R: Rng + ?Sized>(rng: &mut R) -> Side {
    if rng.gen_bool(0.5) {
        Side::Home
    } else {
        Side::Away
    }
}

/// Simulate one game to completion.
pub fn simulate_game(config: GameConfig, seed: Option<u64>) -> Result<GameResult> {
    GameOrchestrator::new(config, seed).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orchestrator(seed: u64) -> GameOrchestrator {
        GameOrchestrator::new(
            GameConfig::new(TeamProfile::new("GB"), TeamProfile::new("CHI")),
            Some(seed),
        )
    }

    /// Put the game in a hand-built spot for resolution tests.
    fn at(seed: u64, field_position: u8, down: u8, yards_to_go: u8) -> GameOrchestrator {
        let mut orch = orchestrator(seed);
        orch.state.possession = Side::Home;
        orch.state.field_position = field_position;
        orch.state.down = down;
        orch.state.yards_to_go = yards_to_go;
        orch
    }

    #[test]
    fn test_touchdown_scores_seven_and_flips() {
        let mut orch = at(1, 90, 2, 10);
        let applied = orch.apply(PlayResult::Run { yards: 15, breakaway: false }, Side::Home);
        assert!(applied.touchdown);
        assert_eq!(applied.yards, 10);
        assert_eq!(applied.drive_end, Some(DriveResult::Touchdown));
        assert_eq!(orch.state.home_score, 7);
        assert_eq!(orch.state.away_score, 0);
        assert_eq!(orch.state.possession, Side::Away);
        assert_eq!(orch.state.field_position, 20);
        assert_eq!((orch.state.down, orch.state.yards_to_go), (1, 10));
    }

    #[test]
    fn test_field_goal_made_and_missed() {
        let mut orch = at(2, 75, 4, 6);
        orch.apply(PlayResult::FieldGoal { made: true, distance: 42 }, Side::Home);
        assert_eq!(orch.state.home_score, 3);
        assert_eq!(orch.state.possession, Side::Away);
        assert_eq!(orch.state.field_position, 20);

        let mut orch = at(2, 70, 4, 6);
        let applied = orch.apply(PlayResult::FieldGoal { made: false, distance: 47 }, Side::Home);
        assert_eq!((orch.state.home_score, orch.state.away_score), (0, 0));
        assert_eq!(orch.state.possession, Side::Away);
        assert_eq!(orch.state.field_position, 30);
        assert_eq!(applied.drive_end, Some(DriveResult::MissedFieldGoal));
    }

    #[test]
    fn test_punt_flips_without_scoring() {
        let mut orch = at(3, 30, 4, 8);
        orch.apply(PlayResult::Punt { net_yards: 40, returned: false }, Side::Home);
        assert_eq!((orch.state.home_score, orch.state.away_score), (0, 0));
        assert_eq!(orch.state.possession, Side::Away);
        assert_eq!(orch.state.field_position, 30);

        let mut orch = at(3, 60, 4, 8);
        orch.apply(PlayResult::Punt { net_yards: 55, returned: false }, Side::Home);
        assert_eq!(orch.state.field_position, TOUCHBACK_SPOT);
    }

    #[test]
    fn test_fourth_down_failure_mirrors_spot() {
        let mut orch = at(4, 45, 4, 5);
        let applied = orch.apply(PlayResult::Run { yards: 3, breakaway: false }, Side::Home);
        assert_eq!(applied.drive_end, Some(DriveResult::TurnoverOnDowns));
        assert_eq!(orch.state.possession, Side::Away);
        assert_eq!(orch.state.field_position, 100 - 48);
        assert_eq!(orch.state.down, 1);

        let mut orch = at(4, 45, 4, 5);
        orch.apply(PlayResult::IncompletePass, Side::Home);
        assert_eq!(orch.state.field_position, 55);
        assert_eq!(orch.state.possession, Side::Away);
    }

    #[test]
    fn test_conversion_and_down_progression() {
        let mut orch = at(5, 30, 3, 4);
        orch.apply(PlayResult::Pass { yards: 6, breakaway: false }, Side::Home);
        assert_eq!((orch.state.down, orch.state.yards_to_go), (1, 10));
        assert_eq!(orch.state.field_position, 36);

        orch.apply(PlayResult::Run { yards: -3, breakaway: false }, Side::Home);
        assert_eq!((orch.state.down, orch.state.yards_to_go), (2, 13));
        assert_eq!(orch.state.field_position, 33);
    }

    #[test]
    fn test_safety_scores_for_defense() {
        let mut orch = at(6, 2, 1, 10);
        let applied = orch.apply(PlayResult::Run { yards: -4, breakaway: false }, Side::Home);
        assert_eq!(applied.yards, -2);
        assert_eq!(applied.drive_end, Some(DriveResult::Safety));
        assert_eq!(orch.state.away_score, 2);
        assert_eq!(orch.state.possession, Side::Away);
    }

    #[test]
    fn test_giveaway_flips_at_spot() {
        let mut orch = at(7, 62, 2, 7);
        let applied = orch.apply(PlayResult::Interception, Side::Home);
        assert_eq!(applied.event, MomentumEvent::Giveaway);
        assert_eq!(orch.state.possession, Side::Away);
        assert_eq!(orch.state.field_position, 38);
    }

    #[test]
    fn test_step_after_end_is_game_over() {
        let mut orch = GameOrchestrator::new(GameConfig::default().with_max_plays(1), Some(8));
        assert_eq!(orch.step().unwrap(), GamePhase::Ended(GameEnd::PlayCap));
        assert!(matches!(orch.step(), Err(SimError::GameOver)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "snap with no time on the clock")]
    fn test_snap_with_expired_clock_panics() {
        let mut orch = orchestrator(12);
        orch.state.time_remaining = 0;
        let _ = orch.step();
    }

    #[test]
    fn test_result_before_end_is_refused() {
        let orch = orchestrator(9);
        assert!(matches!(orch.into_result(), Err(SimError::GameNotFinished)));
    }

    #[test]
    fn test_fresh_seed_is_reported() {
        let orch = GameOrchestrator::new(GameConfig::default(), None);
        let seed = orch.seed();
        let result = orch.run().unwrap();
        assert_eq!(result.seed, seed);
    }

    #[test]
    fn test_quarter_break_is_transient() {
        let mut orch = orchestrator(10);
        let mut saw_break = false;
        while !orch.phase().is_ended() {
            let quarter = orch.state.quarter;
            if orch.step().unwrap() == GamePhase::QuarterBreak {
                saw_break = true;
                assert_eq!(orch.state.time_remaining, 0);
                assert_eq!(orch.step().unwrap(), GamePhase::InProgress);
                assert_eq!(orch.state.quarter, quarter + 1);
                assert_eq!(orch.state.time_remaining, QUARTER_SECONDS);
            }
        }
        assert!(saw_break);
    }
}
