//! Monte-Carlo batches of independent games.
//!
//! Game `i` runs with seed `base_seed + i` on its own orchestrator, so the
//! summary depends only on the config and the base seed, never on how rayon
//! schedules the work.

use super::config::GameConfig;
use super::orchestrator::{simulate_game, GameResult};
use crate::error::Result;
use crate::models::Side;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Below this many games the batch runs sequentially.
const PARALLEL_THRESHOLD: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub game: GameConfig,
    pub games: usize,
    #[serde(default)]
    pub base_seed: u64,
}

impl BatchConfig {
    pub fn new(game: GameConfig, games: usize, base_seed: u64) -> Self {
        Self { game, games, base_seed }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    pub ties: usize,
    pub home_win_rate: f64,
    pub away_win_rate: f64,
    pub mean_home_score: f64,
    pub mean_away_score: f64,
    /// Games stopped by the play cap rather than the clock.
    pub capped: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[GameResult]) -> Self {
        let games = results.len();
        let mut summary = Self {
            games,
            home_wins: 0,
            away_wins: 0,
            ties: 0,
            home_win_rate: 0.0,
            away_win_rate: 0.0,
            mean_home_score: 0.0,
            mean_away_score: 0.0,
            capped: 0,
        };
        if games == 0 {
            return summary;
        }

        let mut home_points = 0u64;
        let mut away_points = 0u64;
        for result in results {
            match result.winner() {
                Some(Side::Home) => summary.home_wins += 1,
                Some(Side::Away) => summary.away_wins += 1,
                None => summary.ties += 1,
            }
            if result.is_capped() {
                summary.capped += 1;
            }
            home_points += u64::from(result.home_score);
            away_points += u64::from(result.away_score);
        }

        let n = games as f64;
        summary.home_win_rate = summary.home_wins as f64 / n;
        summary.away_win_rate = summary.away_wins as f64 / n;
        summary.mean_home_score = home_points as f64 / n;
        summary.mean_away_score = away_points as f64 / n;
        summary
    }
}

/// Run every game of the batch and return the individual results in seed order.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<GameResult>> {
    let seeds: Vec<u64> =
        (0..config.games as u64).map(|i| config.base_seed.wrapping_add(i)).collect();

    if seeds.len() > PARALLEL_THRESHOLD {
        seeds.par_iter().map(|&seed| simulate_game(config.game.clone(), Some(seed))).collect()
    } else {
        seeds.iter().map(|&seed| simulate_game(config.game.clone(), Some(seed))).collect()
    }
}

pub fn simulate_batch(config: &BatchConfig) -> Result<BatchSummary> {
    let results = run_batch(config)?;
    let summary = BatchSummary::from_results(&results);
    log::info!(
        "batch {} vs {}: {} games, home {:.3} away {:.3} ties {} capped {}",
        config.game.home.id,
        config.game.away.id,
        summary.games,
        summary.home_win_rate,
        summary.away_win_rate,
        summary.ties,
        summary.capped
    );
    Ok(summary)
}
