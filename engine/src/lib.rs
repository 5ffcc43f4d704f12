pub mod types;
pub mod map;
pub mod decks;
pub mod infection;
pub mod distance;
pub mod actions;
pub mod engine;
pub mod setup;
pub mod snapshot;


pub use types::*;
pub use map::CITIES;
pub use actions::{available_actions, legal_discards, Action, EngineFault};
pub use setup::{create_game, create_game_with_roles};
pub use snapshot::Snapshot;
