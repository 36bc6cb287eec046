//! Audit gates - game-state contract checks
//!
//! Run by the orchestrator after every play. A failed gate means the
//! sampler or one of the updaters has a bug; it is never a runtime condition
//! to recover from.
//!
//! ## Gates
//! - G1: field position in 0..=100
//! - G2: down in 1..=4, yards to go >= 1
//! - G3: momentum in [0, 1] (and finite)
//! - G4: clock within the current period
//! - G5: scores never decrease
//!
//! ## Failure handling
//! - default: `log::error!` and [`SimError::InvariantViolation`] returned to the caller
//! - `strict_contracts` feature (CI/test builds): panic at the violation site

use super::game_state::{GameState, GOAL_LINE};
use crate::error::{Invariant, Result, SimError};

/// Scores before the play, for the monotonicity gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub home: u16,
    pub away: u16,
}

impl ScoreSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self { home: state.home_score, away: state.away_score }
    }
}

pub fn validate_state(state: &GameState, before: ScoreSnapshot, play: usize) -> Result<()> {
    // G1
    if state.field_position > GOAL_LINE {
        return violation(play, Invariant::FieldPosition, format!("field_position={}", state.field_position));
    }

    // G2
    if !(1..=4).contains(&state.down) {
        return violation(play, Invariant::Down, format!("down={}", state.down));
    }
    if state.yards_to_go < 1 {
        return violation(play, Invariant::YardsToGo, format!("yards_to_go={}", state.yards_to_go));
    }

    // G3
    if !state.momentum.is_finite() || !(0.0..=1.0).contains(&state.momentum) {
        return violation(play, Invariant::Momentum, format!("momentum={}", state.momentum));
    }

    // G4
    if state.time_remaining > state.period_length() {
        return violation(
            play,
            Invariant::Clock,
            format!("time_remaining={} > {}", state.time_remaining, state.period_length()),
        );
    }

    // G5
    if state.home_score < before.home || state.away_score < before.away {
        return violation(
            play,
            Invariant::Score,
            format!(
                "score {}-{} after {}-{}",
                state.home_score, state.away_score, before.home, before.away
            ),
        );
    }

    Ok(())
}

fn violation(play: usize, invariant: Invariant, detail: String) -> Result<()> {
    #[cfg(feature = "strict_contracts")]
    panic!("STRICT: invariant '{}' violated after play {}: {}", invariant, play, detail);

    #[cfg(not(feature = "strict_contracts"))]
    {
        log::error!("[AUDIT] invariant '{}' violated after play {}: {}", invariant, play, detail);
        Err(SimError::InvariantViolation { play, invariant, detail })
    }
}

#[cfg(all(test, not(feature = "strict_contracts")))]
mod tests {
    use super::*;
    use crate::models::{Side, TeamProfile};

    fn state() -> GameState {
        GameState::new(TeamProfile::new("GB"), TeamProfile::new("CHI"), Side::Home)
    }

    fn invariant_of(result: Result<()>) -> Invariant {
        match result {
            Err(SimError::InvariantViolation { invariant, .. }) => invariant,
            other => panic!("expected violation, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_state_passes() {
        let s = state();
        assert!(validate_state(&s, ScoreSnapshot::capture(&s), 0).is_ok());
    }

    #[test]
    fn test_each_gate_fires() {
        let before = ScoreSnapshot::capture(&state());

        let mut s = state();
        s.field_position = 101;
        assert_eq!(invariant_of(validate_state(&s, before, 1)), Invariant::FieldPosition);

        let mut s = state();
        s.down = 5;
        assert_eq!(invariant_of(validate_state(&s, before, 1)), Invariant::Down);

        let mut s = state();
        s.yards_to_go = 0;
        assert_eq!(invariant_of(validate_state(&s, before, 1)), Invariant::YardsToGo);

        let mut s = state();
        s.momentum = 1.2;
        assert_eq!(invariant_of(validate_state(&s, before, 1)), Invariant::Momentum);

        let mut s = state();
        s.momentum = f64::NAN;
        assert_eq!(invariant_of(validate_state(&s, before, 1)), Invariant::Momentum);

        let mut s = state();
        s.time_remaining = 901;
        assert_eq!(invariant_of(validate_state(&s, before, 1)), Invariant::Clock);
    }

    #[test]
    fn test_score_decrease_fires() {
        let mut s = state();
        s.home_score = 7;
        let before = ScoreSnapshot::capture(&s);
        s.home_score = 3;
        let err = validate_state(&s, before, 4).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(invariant_of(Err(err)), Invariant::Score);
    }
}
