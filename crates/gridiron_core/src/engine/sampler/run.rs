use super::probability::ProbabilityContext;
use crate::models::PlayResult;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub const RUN_MEAN_YARDS: f64 = 4.0;
pub const RUN_STD_YARDS: f64 = 3.0;
pub const RUN_YARDS_MIN: i32 = -10;
pub const RUN_YARDS_MAX: i32 = 99;
pub const FUMBLE_BASE: f64 = 0.02;
/// Share of the edge that moves the fumble chance, against the offense.
pub const FUMBLE_EDGE_WEIGHT: f64 = -0.05;
/// Fixed chance that a positive run breaks loose (yardage doubled).
pub const BREAKAWAY_PROB: f64 = 0.05;

pub fn sample_run<R: Rng + ?Sized>(ctx: &ProbabilityContext, rng: &mut R) -> PlayResult {
    let fumble = ctx.adjusted(FUMBLE_BASE, FUMBLE_EDGE_WEIGHT, rng);
    if rng.gen_bool(fumble) {
        return PlayResult::Fumble;
    }

    let z: f64 = StandardNormal.sample(rng);
    let mean = RUN_MEAN_YARDS * (1.0 + ctx.edge);
    let mut yards = (mean + RUN_STD_YARDS * z).round() as i32;
    yards = yards.clamp(RUN_YARDS_MIN, RUN_YARDS_MAX);

    let breakaway = yards > 0 && rng.gen_bool(ctx.scaled(BREAKAWAY_PROB));
    if breakaway {
        yards = (yards * 2).min(RUN_YARDS_MAX);
    }
    PlayResult::Run { yards, breakaway }
}
