//! Momentum tracker
//!
//! Keeps the game's momentum scalar, nudged after every play:
//! - Big gains and scores push it up
//! - Giveaways and lost yardage pull it down
//! - Each swing is scaled by multiplicative noise so identical plays do not
//!   move it identically
//!
//! Value range: 0.0 (offense deflated) to 1.0 (offense rolling), neutral 0.5.
//! The tracker is the only writer of [`GameState::momentum`].

use super::game_state::GameState;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Momentum swing constants.
pub mod events {
    /// Gain of more than 20 yards.
    pub const BIG_PLAY: f64 = 0.15;
    /// Gain of 11 to 20 yards.
    pub const CHUNK_PLAY: f64 = 0.10;
    pub const TOUCHDOWN: f64 = 0.20;
    pub const FIELD_GOAL: f64 = 0.10;
    /// Interception or fumble.
    pub const GIVEAWAY: f64 = -0.20;
    /// Any other play losing yards.
    pub const LOSS: f64 = -0.05;
}

/// Multiplicative noise: Normal(1.0, 0.2), clamped.
const NOISE_MEAN: f64 = 1.0;
const NOISE_STD: f64 = 0.2;
const NOISE_MIN: f64 = 0.4;
const NOISE_MAX: f64 = 1.6;

/// What kind of play the momentum update is reacting to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumEvent {
    Touchdown,
    FieldGoal,
    Giveaway,
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumTrend {
    Rising,
    Falling,
    #[default]
    Stable,
}

/// Applied swings within this band count as [`MomentumTrend::Stable`].
pub const TREND_DEADBAND: f64 = 0.01;

impl MomentumTrend {
    /// Trend for a momentum change already clamped to the unit interval.
    pub fn from_delta(delta: f64) -> Self {
        if delta > TREND_DEADBAND {
            MomentumTrend::Rising
        } else if delta < -TREND_DEADBAND {
            MomentumTrend::Falling
        } else {
            MomentumTrend::Stable
        }
    }
}

/// Raw swing before noise. Later rules override earlier ones.
pub fn raw_delta(event: MomentumEvent, yards: i32) -> f64 {
    let mut delta = if yards > 20 {
        events::BIG_PLAY
    } else if yards > 10 {
        events::CHUNK_PLAY
    } else {
        0.0
    };

    match event {
        MomentumEvent::Touchdown => delta = events::TOUCHDOWN,
        MomentumEvent::FieldGoal => delta = events::FIELD_GOAL,
        _ => {}
    }

    if event == MomentumEvent::Giveaway {
        delta = events::GIVEAWAY;
    } else if yards < 0 {
        delta = events::LOSS;
    }
    delta
}

#[derive(Debug, Clone, Default)]
pub struct MomentumTracker {
    trend: MomentumTrend,
}

impl MomentumTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the play's swing to `state.momentum` and return the new value.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        event: MomentumEvent,
        yards: i32,
        rng: &mut R,
    ) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        let noise = (NOISE_MEAN + NOISE_STD * z).clamp(NOISE_MIN, NOISE_MAX);
        let delta = raw_delta(event, yards) * noise;

        let before = state.momentum;
        state.momentum = (state.momentum + delta).clamp(0.0, 1.0);
        self.trend = MomentumTrend::from_delta(state.momentum - before);
        state.momentum
    }

    /// Direction of the last update.
    pub fn trend(&self) -> MomentumTrend {
        self.trend
    }
}
