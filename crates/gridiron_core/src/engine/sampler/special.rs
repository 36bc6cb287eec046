use super::probability::ProbabilityContext;
use crate::engine::game_state::{GameState, GOAL_LINE};
use crate::models::PlayResult;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Inside this field position the offense punts; from here on it kicks.
pub const FIELD_GOAL_RANGE: u8 = 65;
/// End zone depth plus holder spot.
pub const FIELD_GOAL_SNAP_OFFSET: i32 = 17;

pub const PUNT_MEAN_YARDS: f64 = 42.0;
pub const PUNT_STD_YARDS: f64 = 6.0;
pub const PUNT_RETURN_BASE: f64 = 0.2;
/// A stronger kicking offense sees slightly fewer returns.
pub const PUNT_RETURN_EDGE_WEIGHT: f64 = -0.1;
/// Half the edge on kicks.
pub const FIELD_GOAL_EDGE_WEIGHT: f64 = 0.5;
pub const RETURN_MEAN_YARDS: f64 = 8.0;
pub const RETURN_STD_YARDS: f64 = 5.0;
pub const PUNT_NET_MIN: i32 = 10;
pub const PUNT_NET_MAX: i32 = 70;

pub fn field_goal_distance(field_position: u8) -> i32 {
    (GOAL_LINE - field_position) as i32 + FIELD_GOAL_SNAP_OFFSET
}

/// Success chance before adjustment: 1.0 at 20 yards, falling 2% per yard.
pub fn field_goal_base(distance: i32) -> f64 {
    (1.0 - (distance - 20) as f64 / 50.0).clamp(0.0, 1.0)
}

/// Special teams only have a snap to take on fourth down; otherwise nothing happens.
pub fn sample_special<R: Rng + ?Sized>(
    state: &GameState,
    ctx: &ProbabilityContext,
    rng: &mut R,
) -> PlayResult {
    if state.down != 4 {
        return PlayResult::NoPlay;
    }
    if state.field_position < FIELD_GOAL_RANGE {
        sample_punt(ctx, rng)
    } else {
        sample_field_goal(state.field_position, ctx, rng)
    }
}

fn sample_punt<R: Rng + ?Sized>(ctx: &ProbabilityContext, rng: &mut R) -> PlayResult {
    let z: f64 = StandardNormal.sample(rng);
    let gross = PUNT_MEAN_YARDS + PUNT_STD_YARDS * z;

    let return_chance = ctx.adjusted(PUNT_RETURN_BASE, PUNT_RETURN_EDGE_WEIGHT, rng);
    let returned = rng.gen_bool(return_chance);
    let return_yards = if returned {
        let z: f64 = StandardNormal.sample(rng);
        (RETURN_MEAN_YARDS + RETURN_STD_YARDS * z).max(0.0)
    } else {
        0.0
    };

    let net_yards = ((gross - return_yards).round() as i32).clamp(PUNT_NET_MIN, PUNT_NET_MAX);
    PlayResult::Punt { net_yards, returned }
}

fn sample_field_goal<R: Rng + ?Sized>(
    field_position: u8,
    ctx: &ProbabilityContext,
    rng: &mut R,
) -> PlayResult {
    let distance = field_goal_distance(field_position);
    let success = ctx.adjusted(field_goal_base(distance), FIELD_GOAL_EDGE_WEIGHT, rng);
    PlayResult::FieldGoal { made: rng.gen_bool(success), distance }
}
