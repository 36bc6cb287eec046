//! # Game configuration
//!
//! Every tunable input of a single simulated game lives here. Out-of-range
//! values are never an error: [`GameConfig::sanitized`] clamps or defaults
//! them and logs a warning.
//!
//! ```rust
//! use gridiron_core::engine::config::GameConfig;
//! use gridiron_core::models::TeamProfile;
//!
//! let config = GameConfig::new(TeamProfile::new("GB"), TeamProfile::new("CHI"))
//!     .with_weather(0.9)
//!     .with_max_plays(180);
//! assert_eq!(config.max_plays, 180);
//! ```

use crate::models::TeamProfile;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PLAYS: usize = 200;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_EFFICIENCY_THRESHOLD: i32 = 4;
pub const DEFAULT_WEATHER: f64 = 1.0;

/// Weather multipliers outside this range are clamped.
pub const WEATHER_MIN: f64 = 0.5;
pub const WEATHER_MAX: f64 = 1.5;

/// Seed for a caller-supplied signed value. A negative seed warns and plays
/// with its magnitude, so the same input always replays the same game.
pub fn seed_from_signed(seed: i64) -> u64 {
    if seed < 0 {
        log::warn!("negative seed {} replaced by {}", seed, seed.unsigned_abs());
    }
    seed.unsigned_abs()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub home: TeamProfile,
    pub away: TeamProfile,
    /// Uniform scale on every sampled probability (1.0 = neutral).
    #[serde(default = "default_weather")]
    pub weather: f64,
    /// Safety cap on the number of plays in one game.
    #[serde(default = "default_max_plays")]
    pub max_plays: usize,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// A play is "successful" when it gains more than this many yards.
    #[serde(default = "default_efficiency_threshold")]
    pub efficiency_threshold: i32,
    /// Play one sudden-death period when regulation ends tied.
    #[serde(default)]
    pub allow_overtime: bool,
    /// Kick off to the other team at the start of the third quarter. Off by
    /// default: every quarter break keeps the ball where it was.
    #[serde(default)]
    pub halftime_kickoff: bool,
}

fn default_weather() -> f64 {
    DEFAULT_WEATHER
}

fn default_max_plays() -> usize {
    DEFAULT_MAX_PLAYS
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_efficiency_threshold() -> i32 {
    DEFAULT_EFFICIENCY_THRESHOLD
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(TeamProfile::new("HOME"), TeamProfile::new("AWAY"))
    }
}

impl GameConfig {
    pub fn new(home: TeamProfile, away: TeamProfile) -> Self {
        Self {
            home,
            away,
            weather: DEFAULT_WEATHER,
            max_plays: DEFAULT_MAX_PLAYS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            efficiency_threshold: DEFAULT_EFFICIENCY_THRESHOLD,
            allow_overtime: false,
            halftime_kickoff: false,
        }
    }

    pub fn with_weather(mut self, weather: f64) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_max_plays(mut self, max_plays: usize) -> Self {
        self.max_plays = max_plays;
        self
    }

    pub fn with_overtime(mut self, allow: bool) -> Self {
        self.allow_overtime = allow;
        self
    }

    pub fn with_halftime_kickoff(mut self, kickoff: bool) -> Self {
        self.halftime_kickoff = kickoff;
        self
    }

    /// Clamp every field into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.home = self.home.sanitized();
        self.away = self.away.sanitized();

        if !self.weather.is_finite() || self.weather <= 0.0 {
            log::warn!("weather multiplier {} unusable, using {}", self.weather, DEFAULT_WEATHER);
            self.weather = DEFAULT_WEATHER;
        } else if !(WEATHER_MIN..=WEATHER_MAX).contains(&self.weather) {
            log::warn!(
                "weather multiplier {} clamped to [{}, {}]",
                self.weather,
                WEATHER_MIN,
                WEATHER_MAX
            );
            self.weather = self.weather.clamp(WEATHER_MIN, WEATHER_MAX);
        }

        if self.max_plays == 0 {
            log::warn!("max_plays 0 raised to 1");
            self.max_plays = 1;
        }
        if self.history_capacity == 0 {
            log::warn!("history_capacity 0 raised to 1");
            self.history_capacity = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.max_plays, 200);
        assert_eq!(cfg.history_capacity, 10);
        assert_eq!(cfg.efficiency_threshold, 4);
        assert_eq!(cfg.weather, 1.0);
        assert!(!cfg.allow_overtime);
        assert!(!cfg.halftime_kickoff);
    }

    #[test]
    fn test_sanitize_weather() {
        assert_eq!(GameConfig::default().with_weather(f64::NAN).sanitized().weather, 1.0);
        assert_eq!(GameConfig::default().with_weather(-2.0).sanitized().weather, 1.0);
        assert_eq!(GameConfig::default().with_weather(3.0).sanitized().weather, WEATHER_MAX);
        assert_eq!(GameConfig::default().with_weather(0.8).sanitized().weather, 0.8);
    }

    #[test]
    fn test_negative_seed_uses_magnitude() {
        assert_eq!(seed_from_signed(42), 42);
        assert_eq!(seed_from_signed(-1), 1);
        assert_eq!(seed_from_signed(i64::MIN), 1u64 << 63);
    }

    #[test]
    fn test_sanitize_caps() {
        let mut cfg = GameConfig::default().with_max_plays(0);
        cfg.history_capacity = 0;
        let cfg = cfg.sanitized();
        assert_eq!(cfg.max_plays, 1);
        assert_eq!(cfg.history_capacity, 1);
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{"home":{"id":"GB","strength":0.7},"away":{"id":"CHI"}}"#)
                .unwrap();
        assert_eq!(cfg.home.strength, 0.7);
        assert_eq!(cfg.away.strength, 0.5);
        assert_eq!(cfg.max_plays, DEFAULT_MAX_PLAYS);
        assert!(!cfg.halftime_kickoff);
    }
}
