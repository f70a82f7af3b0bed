//! Last War - a corridor horde-survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, power-ups)
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD, game-over and render-list sinks for whatever draws the game

pub mod sim;
pub mod tuning;
pub mod ui;

pub use sim::{GameEvent, GameState, GameStatus, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
