//! JSON request/response surface.
//!
//! Every entry point takes a request string and returns the response string,
//! or an error message. Requests carry `schema_version`; only version 1 is
//! understood.

use crate::analysis::{highlights, Highlight, PostGameAnalyzer, PostGameReport};
use crate::engine::batch::{simulate_batch, BatchConfig, BatchSummary};
use crate::engine::config::{seed_from_signed, GameConfig};
use crate::engine::game_state::GameEnd;
use crate::engine::orchestrator::{simulate_game, GameResult};
use crate::error::{Result, SimError};
use crate::models::{DriveSummary, PlayRecord, TeamId, TeamProfile};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u8 = 1;

/// Upper bound on games per batch request.
pub const MAX_BATCH_GAMES: usize = 100_000;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TeamData {
    /// Blank or missing ids fall back to `HOME` / `AWAY`.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub strength: Option<f64>,
}

impl TeamData {
    fn into_profile(self, fallback: &str) -> TeamProfile {
        let id = TeamId::or_fallback(&self.id, fallback).0;
        match self.strength {
            Some(strength) => TeamProfile::with_strength(id, strength),
            None => TeamProfile::new(id),
        }
    }
}

/// Seed as written in a request. Anything representable as `u64` is used
/// as is; a negative value is recovered with [`seed_from_signed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RequestSeed {
    Unsigned(u64),
    Signed(i64),
}

impl RequestSeed {
    pub fn resolve(self) -> u64 {
        match self {
            RequestSeed::Unsigned(seed) => seed,
            RequestSeed::Signed(seed) => seed_from_signed(seed),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub seed: Option<RequestSeed>,
    pub home: TeamData,
    pub away: TeamData,
    #[serde(default)]
    pub weather: Option<f64>,
    #[serde(default)]
    pub max_plays: Option<usize>,
    #[serde(default)]
    pub allow_overtime: bool,
    /// Include the full play log in the response.
    #[serde(default)]
    pub include_plays: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub seed: Option<RequestSeed>,
    pub home: TeamData,
    pub away: TeamData,
    #[serde(default)]
    pub weather: Option<f64>,
    #[serde(default)]
    pub max_plays: Option<usize>,
    #[serde(default)]
    pub allow_overtime: bool,
    pub games: usize,
}

fn check_schema(version: u8) -> Result<()> {
    if version != SCHEMA_VERSION {
        return Err(SimError::InvalidRequest(format!("Unsupported schema version: {}", version)));
    }
    Ok(())
}

fn game_config(
    home: TeamData,
    away: TeamData,
    weather: Option<f64>,
    max_plays: Option<usize>,
    allow_overtime: bool,
) -> GameConfig {
    let mut config = GameConfig::new(home.into_profile("HOME"), away.into_profile("AWAY"))
        .with_overtime(allow_overtime);
    if let Some(weather) = weather {
        config = config.with_weather(weather);
    }
    if let Some(max_plays) = max_plays {
        config = config.with_max_plays(max_plays);
    }
    config.sanitized()
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: TeamProfile,
    pub away_team: TeamProfile,
    pub home_score: u16,
    pub away_score: u16,
    pub end: GameEnd,
    pub drives: Vec<DriveSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plays: Option<Vec<PlayRecord>>,
    pub report: PostGameReport,
    pub highlights: Vec<Highlight>,
}

impl GameResponse {
    pub fn from_result(result: GameResult, include_plays: bool) -> Result<Self> {
        let report = PostGameAnalyzer::analyze(&result)?;
        let highlights = highlights(&result.plays);
        Ok(Self {
            schema_version: SCHEMA_VERSION,
            seed: result.seed,
            home_team: result.home_team,
            away_team: result.away_team,
            home_score: result.home_score,
            away_score: result.away_score,
            end: result.end,
            drives: result.drives,
            plays: include_plays.then_some(result.plays),
            report,
            highlights,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub schema_version: u8,
    pub base_seed: u64,
    pub home_team: TeamProfile,
    pub away_team: TeamProfile,
    pub summary: BatchSummary,
}

// ============================================================================
// Entry points
// ============================================================================

pub fn run_game_request(request: GameRequest) -> Result<GameResponse> {
    check_schema(request.schema_version)?;
    let include_plays = request.include_plays;
    let config = game_config(
        request.home,
        request.away,
        request.weather,
        request.max_plays,
        request.allow_overtime,
    );
    let result = simulate_game(config, request.seed.map(RequestSeed::resolve))?;
    GameResponse::from_result(result, include_plays)
}

pub fn run_batch_request(request: BatchRequest) -> Result<BatchResponse> {
    check_schema(request.schema_version)?;
    if request.games == 0 || request.games > MAX_BATCH_GAMES {
        return Err(SimError::InvalidRequest(format!(
            "games must be 1..={}, got {}",
            MAX_BATCH_GAMES, request.games
        )));
    }
    let config = game_config(
        request.home,
        request.away,
        request.weather,
        request.max_plays,
        request.allow_overtime,
    );
    let base_seed = match request.seed {
        Some(seed) => seed.resolve(),
        None => rand::thread_rng().gen(),
    };
    let batch = BatchConfig::new(config, request.games, base_seed);
    let summary = simulate_batch(&batch)?;
    Ok(BatchResponse {
        schema_version: SCHEMA_VERSION,
        base_seed,
        home_team: batch.game.home,
        away_team: batch.game.away,
        summary,
    })
}

/// Simulate one game from a JSON request.
///
/// ```
/// use gridiron_core::api::json_api::simulate_game_json;
///
/// let request = r#"{"schema_version":1,"seed":7,"home":{"id":"GB"},"away":{"id":"CHI"}}"#;
/// let response: serde_json::Value =
///     serde_json::from_str(&simulate_game_json(request).unwrap()).unwrap();
/// assert_eq!(response["seed"], 7);
/// ```
pub fn simulate_game_json(request_json: &str) -> std::result::Result<String, String> {
    let request: GameRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    let response = run_game_request(request).map_err(|e| e.to_string())?;
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize result: {}", e))
}

pub fn simulate_batch_json(request_json: &str) -> std::result::Result<String, String> {
    let request: BatchRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    let response = run_batch_request(request).map_err(|e| e.to_string())?;
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize result: {}", e))
}
