//! Events emitted by the simulation for UI, audio and effects hooks.
//!
//! The simulation pushes these onto [`GameState::events`](super::GameState)
//! and the host drains them once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;

/// Final numbers shown on the game-over screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub wave: u32,
    /// `M:SS`
    pub elapsed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A spawn cycle fired
    WaveStarted { wave: u32, boss: bool },
    BossSpawned { id: u32, boss_number: u32 },
    EnemyKilled { id: u32, pos: Vec2, points: u64 },
    BossDefeated { id: u32, pos: Vec2, points: u64 },
    /// Enemies caught in a boss death blast
    BossBlast { pos: Vec2, radius: f32, killed: u32 },
    PlayerHit { damage: u32, army: u32 },
    BonusCollected { id: u32, pos: Vec2, gained: u32, army: u32 },
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    /// Triple Shot and Big Bullets running together
    Combo,
    ShieldTrapTriggered { destroyed: u32 },
    ArmyCapRaised { cap: u32 },
    Paused,
    Resumed,
    GameOver(GameOverSummary),
    RestartRequested,
}
