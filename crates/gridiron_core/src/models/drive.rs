use super::team::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a drive ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveResult {
    Touchdown,
    FieldGoal,
    MissedFieldGoal,
    Punt,
    TurnoverOnDowns,
    Interception,
    Fumble,
    /// Ball carrier downed in his own end zone.
    Safety,
    /// Clock ran out at halftime or at the end of the game.
    EndOfHalf,
    /// The play-count safety cap stopped the game mid-drive.
    Capped,
}

impl DriveResult {
    pub fn is_score(self) -> bool {
        matches!(self, DriveResult::Touchdown | DriveResult::FieldGoal)
    }

    /// Possession lost without a punt.
    pub fn is_turnover(self) -> bool {
        matches!(
            self,
            DriveResult::Interception
                | DriveResult::Fumble
                | DriveResult::TurnoverOnDowns
                | DriveResult::MissedFieldGoal
        )
    }
}

impl fmt::Display for DriveResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            DriveResult::Touchdown => "Touchdown",
            DriveResult::FieldGoal => "Field goal",
            DriveResult::MissedFieldGoal => "Missed field goal",
            DriveResult::Punt => "Punt",
            DriveResult::TurnoverOnDowns => "Turnover on downs",
            DriveResult::Interception => "Interception",
            DriveResult::Fumble => "Fumble",
            DriveResult::Safety => "Safety",
            DriveResult::EndOfHalf => "End of half",
            DriveResult::Capped => "Capped",
        };
        f.write_str(label)
    }
}

/// Summary of one completed drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveSummary {
    pub team: Side,
    pub start_quarter: u8,
    pub start_field_position: u8,
    pub play_count: usize,
    pub total_yards: i32,
    /// Fraction of plays gaining more than the efficiency threshold.
    pub success_rate: f64,
    pub result: DriveResult,
}
