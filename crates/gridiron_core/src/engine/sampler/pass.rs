use super::probability::ProbabilityContext;
use super::run::BREAKAWAY_PROB;
use crate::models::PlayResult;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub const COMPLETION_BASE: f64 = 0.62;
/// Chance an incompletion is picked off instead.
pub const INTERCEPTION_BASE: f64 = 0.12;
/// Full edge on completions.
pub const COMPLETION_EDGE_WEIGHT: f64 = 1.0;
/// Share of the edge that moves the interception chance, against the offense.
pub const INTERCEPTION_EDGE_WEIGHT: f64 = -0.2;
pub const PASS_MEAN_YARDS: f64 = 8.0;
pub const PASS_STD_YARDS: f64 = 6.0;
pub const PASS_YARDS_MIN: i32 = -5;
pub const PASS_YARDS_MAX: i32 = 99;

pub fn sample_pass<R: Rng + ?Sized>(ctx: &ProbabilityContext, rng: &mut R) -> PlayResult {
    let completion = ctx.adjusted(COMPLETION_BASE, COMPLETION_EDGE_WEIGHT, rng);
    if !rng.gen_bool(completion) {
        let interception = ctx.adjusted(INTERCEPTION_BASE, INTERCEPTION_EDGE_WEIGHT, rng);
        return if rng.gen_bool(interception) {
            PlayResult::Interception
        } else {
            PlayResult::IncompletePass
        };
    }

    let z: f64 = StandardNormal.sample(rng);
    let mean = PASS_MEAN_YARDS * (1.0 + ctx.edge);
    let mut yards = (mean + PASS_STD_YARDS * z).round() as i32;
    yards = yards.clamp(PASS_YARDS_MIN, PASS_YARDS_MAX);

    let breakaway = yards > 0 && rng.gen_bool(ctx.scaled(BREAKAWAY_PROB));
    if breakaway {
        yards = (yards * 2).min(PASS_YARDS_MAX);
    }
    PlayResult::Pass { yards, breakaway }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx(edge: f64) -> ProbabilityContext {
        ProbabilityContext { edge, situation_factor: 1.0, weather: 1.0 }
    }

    fn completion_rate(edge: f64) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let n = 3000;
        let completed = (0..n)
            .filter(|_| matches!(sample_pass(&ctx(edge), &mut rng), PlayResult::Pass { .. }))
            .count();
        completed as f64 / n as f64
    }

    #[test]
    fn test_outcomes_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..3000 {
            match sample_pass(&ctx(0.0), &mut rng) {
                PlayResult::Pass { yards, .. } => {
                    assert!((PASS_YARDS_MIN..=PASS_YARDS_MAX).contains(&yards))
                }
                PlayResult::IncompletePass | PlayResult::Interception => {}
                other => panic!("unexpected pass outcome {:?}", other),
            }
        }
    }

    #[test]
    fn test_neutral_completion_rate() {
        let rate = completion_rate(0.0);
        assert!(rate > 0.55 && rate < 0.70, "completion rate {}", rate);
    }

    #[test]
    fn test_edge_improves_completion() {
        assert!(completion_rate(0.3) > completion_rate(-0.3) + 0.2);
    }

    #[test]
    fn test_interceptions_happen_but_rarely() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let n = 5000;
        let picks = (0..n)
            .filter(|_| sample_pass(&ctx(0.0), &mut rng) == PlayResult::Interception)
            .count();
        let rate = picks as f64 / n as f64;
        assert!(rate > 0.01 && rate < 0.10, "interception rate {}", rate);
    }
}
