//! Probability adjustment shared by every sub-sampler.
//!
//! All functions are pure apart from the explicit RNG argument, so they can
//! be unit tested without running a game.

use crate::engine::game_state::GameState;
use crate::engine::situation::Situation;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

// ============================================================================
// Edge
// ============================================================================

pub const STRENGTH_WEIGHT: f64 = 0.6;
pub const MOMENTUM_WEIGHT: f64 = 0.2;
pub const HISTORY_WEIGHT: f64 = 0.2;
pub const EDGE_LIMIT: f64 = 0.5;

/// Uniform noise half-width added to every adjusted probability.
pub const PROBABILITY_NOISE: f64 = 0.05;

/// Offense's combined advantage in [-0.5, 0.5]; 0.0 for a neutral team in a
/// neutral game.
pub fn edge(strength: f64, momentum: f64, success_rate: f64) -> f64 {
    let raw = STRENGTH_WEIGHT * (strength - 0.5)
        + MOMENTUM_WEIGHT * (momentum - 0.5)
        + HISTORY_WEIGHT * (success_rate - 0.5);
    raw.clamp(-EDGE_LIMIT, EDGE_LIMIT)
}

/// Inputs for adjusting a base probability on the current snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityContext {
    pub edge: f64,
    pub situation_factor: f64,
    pub weather: f64,
}

impl ProbabilityContext {
    pub fn new(state: &GameState, situation: Situation, success_rate: f64, weather: f64) -> Self {
        Self {
            edge: edge(state.offense_strength(), state.momentum, success_rate),
            situation_factor: situation.probability_factor(),
            weather,
        }
    }

    /// `(base + edge * edge_weight + noise) * situation * weather`, clamped to [0, 1].
    ///
    /// Positive `edge_weight` for outcomes good for the offense, negative for
    /// outcomes that hurt it.
    pub fn adjusted<R: Rng + ?Sized>(&self, base: f64, edge_weight: f64, rng: &mut R) -> f64 {
        let noise = rng.gen_range(-PROBABILITY_NOISE..=PROBABILITY_NOISE);
        ((base + self.edge * edge_weight + noise) * self.situation_factor * self.weather)
            .clamp(0.0, 1.0)
    }

    /// Fixed probability scaled by weather only.
    pub fn scaled(&self, p: f64) -> f64 {
        (p * self.weather).clamp(0.0, 1.0)
    }
}

// ============================================================================
// Play category selection
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCategory {
    Run,
    Pass,
    SpecialTeams,
}

const CATEGORIES: [PlayCategory; 3] =
    [PlayCategory::Run, PlayCategory::Pass, PlayCategory::SpecialTeams];

/// Every category keeps at least this weight after adjustment.
const MIN_CATEGORY_WEIGHT: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub run: f64,
    pub pass: f64,
    pub special: f64,
}

impl CategoryWeights {
    /// Base mix for a situation.
    pub fn base(situation: Situation) -> Self {
        let (run, pass, special) = match situation {
            Situation::Normal => (0.45, 0.50, 0.05),
            Situation::RedZone => (0.40, 0.55, 0.05),
            Situation::ThirdDown => (0.35, 0.60, 0.05),
            Situation::FourthDown => (0.15, 0.20, 0.65),
            Situation::TwoMinute => (0.25, 0.70, 0.05),
        };
        Self { run, pass, special }
    }

    /// Base mix for the snap. Fourth down always uses the fourth-down mix,
    /// even when the red zone took classification priority.
    pub fn for_snap(state: &GameState, situation: Situation) -> Self {
        if state.down == 4 {
            Self::base(Situation::FourthDown)
        } else {
            Self::base(situation)
        }
    }

    /// Teams with an edge throw more and run less.
    pub fn adjusted(self, edge: f64) -> Self {
        Self {
            run: (self.run - edge * 0.25).clamp(MIN_CATEGORY_WEIGHT, 1.0),
            pass: (self.pass + edge * 0.5).clamp(MIN_CATEGORY_WEIGHT, 1.0),
            special: self.special.clamp(MIN_CATEGORY_WEIGHT, 1.0),
        }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> PlayCategory {
        match WeightedIndex::new([self.run, self.pass, self.special]) {
            Ok(dist) => CATEGORIES[dist.sample(rng)],
            // Weights are clamped positive above; only reachable on NaN input.
            Err(_) => PlayCategory::Run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx(edge: f64) -> ProbabilityContext {
        ProbabilityContext { edge, situation_factor: 1.0, weather: 1.0 }
    }

    #[test]
    fn test_edge_neutral_and_bounded() {
        assert_eq!(edge(0.5, 0.5, 0.5), 0.0);
        assert!(edge(1.0, 1.0, 1.0) <= EDGE_LIMIT);
        assert!(edge(0.0, 0.0, 0.0) >= -EDGE_LIMIT);
        assert!(edge(0.95, 0.5, 0.5) > edge(0.10, 0.5, 0.5));
    }

    #[test]
    fn test_adjusted_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            let high = ProbabilityContext { edge: 0.5, situation_factor: 1.2, weather: 1.5 };
            let p = high.adjusted(0.9, 1.0, &mut rng);
            assert!((0.0..=1.0).contains(&p));
            let p = ctx(-0.5).adjusted(0.01, 1.0, &mut rng);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_adjusted_noise_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let p = ctx(0.0).adjusted(0.5, 1.0, &mut rng);
            assert!(p >= 0.5 - PROBABILITY_NOISE - 1e-12 && p <= 0.5 + PROBABILITY_NOISE + 1e-12);
        }
    }

    #[test]
    fn test_fourth_down_weights_favor_kicking() {
        let w = CategoryWeights::base(Situation::FourthDown);
        assert!(w.special > w.run + w.pass);
        let w = CategoryWeights::base(Situation::TwoMinute);
        assert!(w.pass > w.run);
    }

    #[test]
    fn test_adjusted_weights_stay_positive() {
        let w = CategoryWeights::base(Situation::TwoMinute).adjusted(-0.5);
        assert!(w.run > 0.0 && w.pass > 0.0 && w.special > 0.0);
        let w = CategoryWeights::base(Situation::Normal).adjusted(0.5);
        assert!(w.run >= MIN_CATEGORY_WEIGHT);
    }

    #[test]
    fn test_choose_respects_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let w = CategoryWeights { run: 1.0, pass: 0.0001, special: 0.0001 }.adjusted(0.0);
        let runs = (0..1000).filter(|_| w.choose(&mut rng) == PlayCategory::Run).count();
        assert!(runs > 900);
    }
}
