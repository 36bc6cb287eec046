//! Fixed-capacity ring of recent play outcomes, fed back into sampling.

use crate::models::PlayType;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::config::DEFAULT_HISTORY_CAPACITY;

/// Success rate reported by an empty buffer.
pub const NEUTRAL_SUCCESS_RATE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub play_type: PlayType,
    pub success: bool,
}

impl HistoryEntry {
    /// A play succeeds when it beats the efficiency threshold or scores.
    pub fn from_play(play_type: PlayType, yards: i32, scoring: bool, threshold: i32) -> Self {
        Self { play_type, success: yards > threshold || scoring }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Capacity below 1 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append, evicting the oldest entry once full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Mean of the success flags; [`NEUTRAL_SUCCESS_RATE`] when empty.
    pub fn recent_success_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return NEUTRAL_SUCCESS_RATE;
        }
        let successes = self.entries.iter().filter(|e| e.success).count();
        successes as f64 / self.entries.len() as f64
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(success: bool) -> HistoryEntry {
        HistoryEntry { play_type: PlayType::Run, success }
    }

    #[test]
    fn test_empty_is_neutral() {
        let buf = HistoryBuffer::default();
        assert!(buf.is_empty());
        assert_eq!(buf.recent_success_rate(), 0.5);
    }

    #[test]
    fn test_success_rate() {
        let mut buf = HistoryBuffer::default();
        buf.push(entry(true));
        buf.push(entry(false));
        buf.push(entry(true));
        buf.push(entry(true));
        assert_eq!(buf.recent_success_rate(), 0.75);
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let mut buf = HistoryBuffer::new(10);
        for _ in 0..10 {
            buf.push(entry(false));
        }
        assert_eq!(buf.recent_success_rate(), 0.0);
        for _ in 0..10 {
            buf.push(entry(true));
        }
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.recent_success_rate(), 1.0);
    }

    #[test]
    fn test_zero_capacity_raised() {
        let mut buf = HistoryBuffer::new(0);
        assert_eq!(buf.capacity(), 1);
        buf.push(entry(true));
        buf.push(entry(false));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.recent_success_rate(), 0.0);
    }

    #[test]
    fn test_entry_from_play() {
        assert!(HistoryEntry::from_play(PlayType::Run, 5, false, 4).success);
        assert!(!HistoryEntry::from_play(PlayType::Run, 4, false, 4).success);
        assert!(HistoryEntry::from_play(PlayType::FieldGoal, 0, true, 4).success);
    }
}
