//! # gridiron_core - Stochastic American Football Game Simulation
//!
//! Plays a game snap by snap: each play is sampled from situation-dependent
//! distributions, biased by team strength, a game-wide momentum signal and
//! a short memory of recent outcomes.
//!
//! ## Features
//! - Deterministic for a given seed (`ChaCha8Rng`)
//! - Down-and-distance, field position, four quarters, optional overtime
//! - Drive log, play log, post-game report and highlights
//! - Parallel Monte-Carlo batches (rayon)
//! - JSON API with a versioned schema
//!
//! ```
//! use gridiron_core::{simulate_game, GameConfig, TeamProfile};
//!
//! let config = GameConfig::new(
//!     TeamProfile::with_strength("GB", 0.7),
//!     TeamProfile::new("CHI"),
//! );
//! let result = simulate_game(config, Some(42)).unwrap();
//! assert!(!result.plays.is_empty());
//! ```

pub mod analysis;
pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use analysis::{highlights, Highlight, HighlightKind, PostGameAnalyzer, PostGameReport};
pub use api::{simulate_batch_json, simulate_game_json, GameResponse};
pub use engine::{
    simulate_batch, simulate_game, BatchConfig, BatchSummary, GameConfig, GameEnd,
    GameOrchestrator, GamePhase, GameResult, GameState, Situation,
};
pub use error::{Result, SimError};
pub use models::{
    DriveResult, DriveSummary, PlayRecord, PlayResult, PlayType, Side, TeamId, TeamProfile,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub use api::SCHEMA_VERSION;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_simulation() {
        let request = json!({
            "schema_version": 1,
            "seed": 42,
            "home": {"id": "GB"},
            "away": {"id": "CHI"}
        });

        let result = simulate_game_json(&request.to_string());
        assert!(result.is_ok(), "Simulation should succeed");

        let parsed: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert!(parsed["home_score"].is_number());
        assert!(parsed["away_score"].is_number());
        assert!(parsed["drives"].is_array());
        assert!(parsed["highlights"].is_array());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
