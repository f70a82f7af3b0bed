//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Deferred spawns keyed by game-clock time, never wall-clock
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod entities;
pub mod events;
pub mod powerup;
pub mod resolve;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use background::{Star, Starfield};
pub use collision::{Aabb, Collider, Corridor, collide, overlaps};
pub use entities::{Bonus, Boss, Bullet, Chase, Enemy, Player, PlayerClone, PowerUpDrop};
pub use events::{GameEvent, GameOverSummary};
pub use powerup::{PowerUpKind, PowerUpSlot, PowerUpTimers};
pub use resolve::{activate_power_up, damage_player, resolve_collisions};
pub use spawn::{SpawnDirector, SpawnOrder, WaveReport, enemy_count, is_boss_wave, spawn_interval};
pub use state::{Entities, GameState, GameStatus, Resources};
pub use tick::{TickInput, tick};
pub use weapon::{bullet_damage, effective_fire_rate, fire_rate, fire_volley};
