use super::config::DEFAULT_MAX_PLAYS;

/// Play-count budget: the only guard against a game that never ends.
///
/// There is no wall-clock limit; a game is a pure function of its seed and
/// stopping on elapsed time would break reproducibility.
#[derive(Debug, Clone)]
pub struct PlayBudget {
    max_plays: usize,
    plays_done: usize,
}

impl Default for PlayBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PLAYS)
    }
}

impl PlayBudget {
    pub fn new(max_plays: usize) -> Self {
        Self { max_plays: max_plays.max(1), plays_done: 0 }
    }

    /// Count one play and report whether another one may be run.
    #[inline]
    pub fn tick_play(&mut self) -> bool {
        self.plays_done += 1;
        !self.is_exceeded()
    }

    /// True once the cap has been reached.
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.plays_done >= self.max_plays
    }

    pub fn plays_done(&self) -> usize {
        self.plays_done
    }

    pub fn max_plays(&self) -> usize {
        self.max_plays
    }

    pub fn remaining(&self) -> usize {
        self.max_plays.saturating_sub(self.plays_done)
    }

    pub fn exceeded_reason(&self) -> Option<String> {
        if self.is_exceeded() {
            Some(format!("Play cap reached: {} >= {}", self.plays_done, self.max_plays))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_counts_to_cap() {
        let mut budget = PlayBudget::new(3);
        assert!(budget.tick_play());
        assert!(budget.tick_play());
        assert!(!budget.tick_play());
        assert!(budget.is_exceeded());
        assert_eq!(budget.plays_done(), 3);
        assert_eq!(budget.remaining(), 0);
        assert!(budget.exceeded_reason().is_some());
    }

    #[test]
    fn test_zero_cap_raised_to_one() {
        let mut budget = PlayBudget::new(0);
        assert_eq!(budget.max_plays(), 1);
        assert!(budget.exceeded_reason().is_none());
        assert!(!budget.tick_play());
    }
}
