//! Situation classifier: maps a game state to the tag that biases sampling.

use super::game_state::GameState;
use serde::{Deserialize, Serialize};

/// Field position at or beyond which the offense is in the red zone.
pub const RED_ZONE_START: u8 = 80;
/// Fourth-quarter seconds at or below which the two-minute drill starts.
pub const TWO_MINUTE_WARNING: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    Normal,
    RedZone,
    ThirdDown,
    FourthDown,
    TwoMinute,
}

impl Situation {
    /// Multiplier applied to every adjusted probability in this situation.
    pub fn probability_factor(self) -> f64 {
        match self {
            Situation::Normal => 1.0,
            Situation::RedZone => 1.2,
            Situation::ThirdDown => 1.1,
            Situation::FourthDown => 0.9,
            Situation::TwoMinute => 1.15,
        }
    }
}

/// First matching rule wins: red zone, third down, fourth down, two-minute drill.
pub fn classify(state: &GameState) -> Situation {
    if state.field_position >= RED_ZONE_START {
        Situation::RedZone
    } else if state.down == 3 {
        Situation::ThirdDown
    } else if state.down == 4 {
        Situation::FourthDown
    } else if state.quarter >= 4 && state.time_remaining <= TWO_MINUTE_WARNING {
        Situation::TwoMinute
    } else {
        Situation::Normal
    }
}
