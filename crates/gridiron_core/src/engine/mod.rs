//! Simulation engine: state, samplers, and the orchestrator that ties them together.

pub mod audit_gates;
pub mod batch;
pub mod budget;
pub mod config;
pub mod drive_recorder;
pub mod game_state;
pub mod history;
pub mod momentum;
pub mod orchestrator;
pub mod sampler;
pub mod situation;


pub use batch::{run_batch, simulate_batch, BatchConfig, BatchSummary};
pub use budget::PlayBudget;
pub use config::GameConfig;
pub use drive_recorder::DriveRecorder;
pub use game_state::{GameEnd, GamePhase, GameState};
pub use history::{HistoryBuffer, HistoryEntry};
pub use momentum::{MomentumEvent, MomentumTracker, MomentumTrend};
pub use orchestrator::{simulate_game, GameOrchestrator, GameResult};
pub use sampler::PlayOutcomeSampler;
pub use situation::{classify, Situation};
