pub mod json_api;

pub use json_api::{simulate_batch_json, simulate_game_json, GameResponse, SCHEMA_VERSION};
