//! # Post-game analysis
//!
//! Aggregate statistics over a finished play log:
//! - momentum volatility (population standard deviation)
//! - lag-1 autocorrelation of yards gained
//! - coherence: how steady momentum stayed from play to play
//! - drive totals
//!
//! Pure functions over the log; nothing here feeds back into a game.

use crate::engine::game_state::{GameEnd, GameState, REGULATION_QUARTERS};
use crate::engine::orchestrator::GameResult;
use crate::error::{Result, SimError};
use crate::models::{DriveSummary, PlayRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostGameReport {
    pub momentum_volatility: f64,
    pub yards_autocorrelation: f64,
    /// 1.0 = momentum never moved, 0.0 = it swung by 0.5 or more per play on average.
    pub coherence: f64,
    pub total_plays: usize,
    pub total_drives: usize,
    pub scoring_drives: usize,
    pub mean_drive_yards: f64,
    pub mean_success_rate: f64,
}

pub struct PostGameAnalyzer;

impl PostGameAnalyzer {
    /// Analyze a finished game. Refuses a result whose play log could not
    /// have come from a completed game: no plays, drives that do not cover
    /// the log, or a regulation ending with time left on the clock.
    pub fn analyze(result: &GameResult) -> Result<PostGameReport> {
        if !is_complete(result) {
            return Err(SimError::GameNotFinished);
        }
        Ok(Self::report(&result.plays, &result.drives))
    }

    /// Analyze a game still held by its orchestrator. Refuses unfinished games.
    pub fn analyze_state(state: &GameState, drives: &[DriveSummary]) -> Result<PostGameReport> {
        if !state.phase.is_ended() {
            return Err(SimError::GameNotFinished);
        }
        Ok(Self::report(&state.plays, drives))
    }

    fn report(plays: &[PlayRecord], drives: &[DriveSummary]) -> PostGameReport {
        let momentum: Vec<f64> = plays.iter().map(|p| p.momentum).collect();
        let yards: Vec<f64> = plays.iter().map(|p| p.yards as f64).collect();

        let total_drives = drives.len();
        let (mean_drive_yards, mean_success_rate) = if total_drives == 0 {
            (0.0, 0.0)
        } else {
            let n = total_drives as f64;
            (
                drives.iter().map(|d| d.total_yards as f64).sum::<f64>() / n,
                drives.iter().map(|d| d.success_rate).sum::<f64>() / n,
            )
        };

        PostGameReport {
            momentum_volatility: std_dev(&momentum).unwrap_or(0.0),
            yards_autocorrelation: lag1_autocorrelation(&yards).unwrap_or(0.0),
            coherence: coherence(&momentum),
            total_plays: plays.len(),
            total_drives,
            scoring_drives: drives.iter().filter(|d| d.result.is_score()).count(),
            mean_drive_yards,
            mean_success_rate,
        }
    }
}

fn is_complete(result: &GameResult) -> bool {
    let Some(last) = result.plays.last() else {
        return false;
    };
    let covered: usize = result.drives.iter().map(|d| d.play_count).sum();
    if covered != result.plays.len() {
        log::debug!("drives cover {} of {} plays", covered, result.plays.len());
        return false;
    }
    match result.end {
        GameEnd::Regulation => last.quarter >= REGULATION_QUARTERS && last.elapsed == last.time_at_snap,
        GameEnd::Overtime | GameEnd::PlayCap => true,
    }
}

// ============================================================================
// Metrics
// ============================================================================

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population standard deviation. `None` for an empty slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Lag-1 Pearson autocorrelation.
///
/// `None` with fewer than 3 values or when either lagged series is constant.
///
/// ```
/// use gridiron_core::analysis::postgame::lag1_autocorrelation;
///
/// let trending = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!(lag1_autocorrelation(&trending).unwrap() > 0.99);
/// assert!(lag1_autocorrelation(&[3.0, 3.0, 3.0]).is_none());
/// ```
pub fn lag1_autocorrelation(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }
    let head = &values[..values.len() - 1];
    let tail = &values[1..];
    let (mh, mt) = (mean(head)?, mean(tail)?);

    let mut cov = 0.0;
    let mut var_h = 0.0;
    let mut var_t = 0.0;
    for (h, t) in head.iter().zip(tail) {
        cov += (h - mh) * (t - mt);
        var_h += (h - mh).powi(2);
        var_t += (t - mt).powi(2);
    }
    if var_h <= f64::EPSILON || var_t <= f64::EPSILON {
        return None;
    }
    Some((cov / (var_h.sqrt() * var_t.sqrt())).clamp(-1.0, 1.0))
}

/// `1 - 2 * mean(|Δ|)` over consecutive values, clamped to [0, 1].
pub fn coherence(momentum: &[f64]) -> f64 {
    if momentum.len() < 2 {
        return 1.0;
    }
    let swings: Vec<f64> = momentum.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let mean_swing = mean(&swings).unwrap_or(0.0);
    (1.0 - 2.0 * mean_swing).clamp(0.0, 1.0)
}
