//! # Play outcome sampler
//!
//! Picks a play category for the snap, then samples the result within it:
//!
//! 1. Base run/pass/special-teams mix from the [`Situation`]
//! 2. Shifted by the offense's edge (strength rating, momentum, recent success)
//! 3. Category drawn by weighted selection
//! 4. Result drawn by the category's sub-sampler ([`run`], [`pass`], [`special`])
//!
//! Never fails: every probability and yardage is clamped into its declared
//! range before it is returned.

pub mod pass;
pub mod probability;
pub mod run;
pub mod special;

pub use probability::{CategoryWeights, PlayCategory, ProbabilityContext};

use super::game_state::GameState;
use super::history::HistoryBuffer;
use super::situation::Situation;
use crate::models::PlayResult;
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct PlayOutcomeSampler {
    weather: f64,
}

impl Default for PlayOutcomeSampler {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PlayOutcomeSampler {
    pub fn new(weather: f64) -> Self {
        Self { weather }
    }

    pub fn sample<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        situation: Situation,
        history: &HistoryBuffer,
        rng: &mut R,
    ) -> PlayResult {
        let ctx =
            ProbabilityContext::new(state, situation, history.recent_success_rate(), self.weather);
        let category = CategoryWeights::for_snap(state, situation).adjusted(ctx.edge).choose(rng);

        match category {
            PlayCategory::Run => run::sample_run(&ctx, rng),
            PlayCategory::Pass => pass::sample_pass(&ctx, rng),
            PlayCategory::SpecialTeams => special::sample_special(state, &ctx, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::situation::classify;
    use crate::models::{Side, TeamProfile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state(strength: f64) -> GameState {
        GameState::new(TeamProfile::with_strength("GB", strength), TeamProfile::new("CHI"), Side::Home)
    }

    #[test]
    fn test_fourth_down_mostly_kicks() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let sampler = PlayOutcomeSampler::default();
        let history = HistoryBuffer::default();
        let mut s = state(0.5);
        s.down = 4;
        s.field_position = 40;
        let situation = classify(&s);
        let punts = (0..1000)
            .filter(|_| {
                matches!(sampler.sample(&s, situation, &history, &mut rng), PlayResult::Punt { .. })
            })
            .count();
        assert!(punts > 500, "punts {}", punts);
    }

    #[test]
    fn test_fourth_down_in_red_zone_kicks_field_goals() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let sampler = PlayOutcomeSampler::default();
        let history = HistoryBuffer::default();
        let mut s = state(0.5);
        s.down = 4;
        s.field_position = 85;
        let situation = classify(&s);
        assert_eq!(situation, Situation::RedZone);
        let kicks = (0..1000)
            .filter(|_| {
                matches!(
                    sampler.sample(&s, situation, &history, &mut rng),
                    PlayResult::FieldGoal { .. }
                )
            })
            .count();
        assert!(kicks > 500, "kicks {}", kicks);
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let sampler = PlayOutcomeSampler::default();
        let history = HistoryBuffer::default();
        let s = state(0.7);
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..100)
                .map(|_| sampler.sample(&s, Situation::Normal, &history, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_stronger_offense_gains_more() {
        let sampler = PlayOutcomeSampler::default();
        let history = HistoryBuffer::default();
        let total = |strength| {
            let mut rng = ChaCha8Rng::seed_from_u64(77);
            let s = state(strength);
            (0..3000)
                .map(|_| sampler.sample(&s, Situation::Normal, &history, &mut rng).scrimmage_yards())
                .sum::<i32>()
        };
        assert!(total(0.95) > total(0.10));
    }
}
