//! # Analysis Module
//!
//! Read-only views over a finished game.
//!
//! - `postgame` - momentum volatility, yardage autocorrelation, coherence, drive totals
//! - `highlights` - notable plays from the play log

pub mod highlights;
pub mod postgame;

pub use highlights::{highlights, Highlight, HighlightKind};
pub use postgame::{PostGameAnalyzer, PostGameReport};
