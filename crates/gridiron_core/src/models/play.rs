//! Play-level types: what the sampler produces and what the play log stores.

use super::drive::DriveResult;
use super::team::Side;
use crate::engine::momentum::MomentumTrend;
use crate::engine::situation::Situation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completed passes gaining more than this are tagged as deep passes.
pub const DEEP_PASS_YARDS: i32 = 30;

/// Outcome of one sampled play, before it is applied to the game state.
///
/// Turnovers carry no yardage: the ball changes hands at the spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayResult {
    Run { yards: i32, breakaway: bool },
    Pass { yards: i32, breakaway: bool },
    IncompletePass,
    Interception,
    Fumble,
    /// Net punt distance (gross minus any return).
    Punt { net_yards: i32, returned: bool },
    /// `distance` is the attempt length in yards (line of scrimmage + 17).
    FieldGoal { made: bool, distance: i32 },
    NoPlay,
}

impl PlayResult {
    /// Yards gained from scrimmage; zero for everything but runs and completions.
    pub fn scrimmage_yards(&self) -> i32 {
        match *self {
            PlayResult::Run { yards, .. } | PlayResult::Pass { yards, .. } => yards,
            _ => 0,
        }
    }

    pub fn play_type(&self) -> PlayType {
        match *self {
            PlayResult::Run { breakaway: true, .. } => PlayType::BreakawayRun,
            PlayResult::Run { .. } => PlayType::Run,
            PlayResult::Pass { yards, .. } if yards > DEEP_PASS_YARDS => PlayType::DeepPass,
            PlayResult::Pass { .. } => PlayType::Pass,
            PlayResult::IncompletePass => PlayType::IncompletePass,
            PlayResult::Interception => PlayType::Interception,
            PlayResult::Fumble => PlayType::Fumble,
            PlayResult::Punt { returned: true, .. } => PlayType::PuntReturn,
            PlayResult::Punt { .. } => PlayType::Punt,
            PlayResult::FieldGoal { made: true, .. } => PlayType::FieldGoal,
            PlayResult::FieldGoal { made: false, .. } => PlayType::MissedFieldGoal,
            PlayResult::NoPlay => PlayType::NoPlay,
        }
    }
}

/// Play tag stored in the play log and the history buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Run,
    BreakawayRun,
    Pass,
    DeepPass,
    IncompletePass,
    Interception,
    Fumble,
    Punt,
    PuntReturn,
    FieldGoal,
    MissedFieldGoal,
    NoPlay,
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            PlayType::Run => "Run",
            PlayType::BreakawayRun => "Breakaway run",
            PlayType::Pass => "Pass complete",
            PlayType::DeepPass => "Deep pass complete",
            PlayType::IncompletePass => "Incomplete pass",
            PlayType::Interception => "Interception",
            PlayType::Fumble => "Fumble",
            PlayType::Punt => "Punt",
            PlayType::PuntReturn => "Punt and return",
            PlayType::FieldGoal => "Field goal",
            PlayType::MissedFieldGoal => "Missed field goal",
            PlayType::NoPlay => "No play",
        };
        f.write_str(label)
    }
}

/// One entry of the game's play log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Position in the play log (0-based).
    pub index: usize,
    pub quarter: u8,
    /// Seconds left in the period when the ball was snapped.
    pub time_at_snap: u16,
    /// Seconds this play took off the clock.
    pub elapsed: u16,
    /// Team that ran the play.
    pub possession: Side,
    pub situation: Situation,
    pub play_type: PlayType,
    /// Effective yards gained, truncated at either goal line.
    pub yards: i32,
    /// Touchdown on this play.
    pub touchdown: bool,
    /// Field position after the play, from the point of view of the team
    /// in possession after the play.
    pub field_position: u8,
    pub down: u8,
    pub yards_to_go: u8,
    pub momentum: f64,
    /// Direction of the momentum swing this play caused.
    #[serde(default)]
    pub momentum_trend: MomentumTrend,
    pub home_score: u16,
    pub away_score: u16,
    /// Set when this play ended the drive.
    pub drive_end: Option<DriveResult>,
}
