//! Mutable record of one game's progress.
//!
//! Field position is always measured from the possessing team's own goal
//! line: 0 is its own goal line, 100 the opponent's. Every possession change
//! re-expresses the spot from the new offense's point of view.

use crate::models::{PlayRecord, Side, TeamId, TeamProfile};
use serde::{Deserialize, Serialize};

pub const QUARTER_SECONDS: u16 = 900;
pub const OVERTIME_SECONDS: u16 = 600;
pub const REGULATION_QUARTERS: u8 = 4;
pub const OVERTIME_QUARTER: u8 = 5;

/// Where a drive starts after a score or a touchback.
pub const TOUCHBACK_SPOT: u8 = 20;
pub const GOAL_LINE: u8 = 100;
pub const FIRST_DOWN_DISTANCE: u8 = 10;

pub const TOUCHDOWN_POINTS: u16 = 7;
pub const FIELD_GOAL_POINTS: u16 = 3;
pub const SAFETY_POINTS: u16 = 2;

/// Why the game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    /// Fourth-quarter clock expired.
    Regulation,
    /// Overtime period ended by a score or by its clock.
    Overtime,
    /// The play-count safety cap was reached.
    PlayCap,
}

/// Orchestrator state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    InProgress,
    /// Transient: the period clock hit zero and the next period has not started.
    QuarterBreak,
    Ended(GameEnd),
}

impl GamePhase {
    pub fn is_ended(self) -> bool {
        matches!(self, GamePhase::Ended(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub home_team: TeamProfile,
    pub away_team: TeamProfile,
    pub home_score: u16,
    pub away_score: u16,
    pub quarter: u8,
    pub overtime: bool,
    pub time_remaining: u16,
    pub possession: Side,
    /// Coin-toss winner; the other side receives the second-half kickoff.
    pub opening_receiver: Side,
    pub field_position: u8,
    pub down: u8,
    pub yards_to_go: u8,
    pub momentum: f64,
    pub phase: GamePhase,
    pub plays: Vec<PlayRecord>,
}

impl GameState {
    /// Kickoff state: `receiver` starts at its own 20, 1st-and-10.
    pub fn new(home_team: TeamProfile, away_team: TeamProfile, receiver: Side) -> Self {
        Self {
            home_team,
            away_team,
            home_score: 0,
            away_score: 0,
            quarter: 1,
            overtime: false,
            time_remaining: QUARTER_SECONDS,
            possession: receiver,
            opening_receiver: receiver,
            field_position: TOUCHBACK_SPOT,
            down: 1,
            yards_to_go: FIRST_DOWN_DISTANCE,
            momentum: 0.5,
            phase: GamePhase::InProgress,
            plays: Vec::new(),
        }
    }

    pub fn team(&self, side: Side) -> &TeamProfile {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn possession_team(&self) -> &TeamId {
        &self.team(self.possession).id
    }

    /// Strength rating of the team with the ball.
    pub fn offense_strength(&self) -> f64 {
        self.team(self.possession).strength
    }

    pub fn score(&self, side: Side) -> u16 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    pub fn add_score(&mut self, side: Side, points: u16) {
        match side {
            Side::Home => self.home_score += points,
            Side::Away => self.away_score += points,
        }
    }

    pub fn is_tied(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Length of the current period in seconds.
    pub fn period_length(&self) -> u16 {
        if self.overtime {
            OVERTIME_SECONDS
        } else {
            QUARTER_SECONDS
        }
    }

    /// Yards left to the opponent's goal line.
    pub fn yards_to_goal(&self) -> u8 {
        GOAL_LINE - self.field_position
    }

    /// 1st-and-10 (or 1st-and-goal) from the current spot.
    pub fn reset_downs(&mut self) {
        self.down = 1;
        self.yards_to_go = FIRST_DOWN_DISTANCE.min(self.yards_to_goal()).max(1);
    }

    /// Hand the ball to the other team at `field_position` (new offense's perspective).
    pub fn change_possession(&mut self, field_position: u8) {
        self.possession = self.possession.opponent();
        self.field_position = field_position.clamp(1, GOAL_LINE - 1);
        self.reset_downs();
    }

    /// Spot mirrored for the other team (`100 - field_position`).
    pub fn mirrored_spot(&self) -> u8 {
        GOAL_LINE - self.field_position
    }
}
