//! Groups consecutive plays into drives.

use crate::models::{DriveResult, DriveSummary, PlayRecord};

#[derive(Debug, Clone)]
pub struct DriveRecorder {
    current: Vec<PlayRecord>,
    /// Spot of the first snap of the open drive.
    start_field_position: Option<u8>,
    efficiency_threshold: i32,
}

impl DriveRecorder {
    pub fn new(efficiency_threshold: i32) -> Self {
        Self { current: Vec::new(), start_field_position: None, efficiency_threshold }
    }

    /// Add a play to the open drive. `snap_field_position` is where the ball
    /// was snapped (the record itself stores the spot after the play).
    pub fn record(&mut self, play: &PlayRecord, snap_field_position: u8) {
        if self.current.is_empty() {
            self.start_field_position = Some(snap_field_position);
        }
        self.current.push(play.clone());
    }

    /// Close the open drive. `None` when no play has been recorded since the
    /// last close.
    pub fn close(&mut self, result: DriveResult) -> Option<DriveSummary> {
        let first = self.current.first()?;
        let play_count = self.current.len();
        let total_yards = self.current.iter().map(|p| p.yards).sum();
        let successes =
            self.current.iter().filter(|p| p.yards > self.efficiency_threshold).count();

        let summary = DriveSummary {
            team: first.possession,
            start_quarter: first.quarter,
            start_field_position: self.start_field_position.unwrap_or_default(),
            play_count,
            total_yards,
            success_rate: successes as f64 / play_count as f64,
            result,
        };

        self.current.clear();
        self.start_field_position = None;
        Some(summary)
    }

    pub fn open_plays(&self) -> usize {
        self.current.len()
    }

    pub fn is_open(&self) -> bool {
        !self.current.is_empty()
    }
}
