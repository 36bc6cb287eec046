//! Notable plays pulled from a play log.

use crate::models::{PlayRecord, PlayType, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    DeepPass,
    BreakawayRun,
    Touchdown,
    FieldGoal,
    Interception,
    Fumble,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub kind: HighlightKind,
    pub play_index: usize,
    pub quarter: u8,
    pub time_at_snap: u16,
    pub team: Side,
    pub play_type: PlayType,
    pub yards: i32,
    pub home_score: u16,
    pub away_score: u16,
}

impl Highlight {
    fn from_record(kind: HighlightKind, record: &PlayRecord) -> Self {
        Self {
            kind,
            play_index: record.index,
            quarter: record.quarter,
            time_at_snap: record.time_at_snap,
            team: record.possession,
            play_type: record.play_type,
            yards: record.yards,
            home_score: record.home_score,
            away_score: record.away_score,
        }
    }
}

/// A touchdown takes precedence over the play that produced it.
fn classify(record: &PlayRecord) -> Option<HighlightKind> {
    if record.touchdown {
        return Some(HighlightKind::Touchdown);
    }
    match record.play_type {
        PlayType::DeepPass => Some(HighlightKind::DeepPass),
        PlayType::BreakawayRun => Some(HighlightKind::BreakawayRun),
        PlayType::FieldGoal => Some(HighlightKind::FieldGoal),
        PlayType::Interception => Some(HighlightKind::Interception),
        PlayType::Fumble => Some(HighlightKind::Fumble),
        _ => None,
    }
}

/// Highlights in play order.
pub fn highlights(plays: &[PlayRecord]) -> Vec<Highlight> {
    plays
        .iter()
        .filter_map(|record| classify(record).map(|kind| Highlight::from_record(kind, record)))
        .collect()
}
