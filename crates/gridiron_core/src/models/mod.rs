pub mod drive;
pub mod play;
pub mod team;

pub use drive::{DriveResult, DriveSummary};
pub use play::{PlayRecord, PlayResult, PlayType, DEEP_PASS_YARDS};
pub use team::{Side, TeamId, TeamProfile, DEFAULT_STRENGTH};
