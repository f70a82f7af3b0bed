//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], grouped into
//! status, resources, entities, power-up timers and the spawn director.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Starfield;
use super::collision::Corridor;
use super::entities::{Bonus, Boss, Bullet, Enemy, Player, PlayerClone, PowerUpDrop};
use super::events::{GameEvent, GameOverSummary};
use super::powerup::PowerUpTimers;
use super::spawn::SpawnDirector;
use crate::tuning::{Tuning, TuningError};
use crate::ui::format_game_time;

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    Playing,
    /// Game is paused; nothing mutates
    Paused,
    /// Army reached zero; terminal until the host builds a new state
    Over,
}

/// Scalar resources of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resources {
    pub army: u32,
    pub army_cap: u32,
    pub score: u64,
    /// Game clock (ms of `Playing` time)
    pub time_ms: f64,
    /// Clock value at which the army cap next grows
    pub next_cap_at_ms: f64,
    /// Auto-fire accumulator (ms)
    pub shoot_timer_ms: f32,
}

/// Every live entity collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entities {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bosses: Vec<Boss>,
    pub bullets: Vec<Bullet>,
    pub bonuses: Vec<Bonus>,
    pub power_ups: Vec<PowerUpDrop>,
    pub clones: Vec<PlayerClone>,
}

impl Entities {
    /// Destroy everything except the player
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.bosses.clear();
        self.bullets.clear();
        self.bonuses.clear();
        self.power_ups.clear();
        self.clones.clear();
    }

    /// Entity count excluding the player
    pub fn live_count(&self) -> usize {
        self.enemies.len()
            + self.bosses.len()
            + self.bullets.len()
            + self.bonuses.len()
            + self.power_ups.len()
            + self.clones.len()
    }
}

/// Complete game state (deterministic for a given seed, tuning and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub status: GameStatus,
    pub resources: Resources,
    pub entities: Entities,
    pub power_ups: PowerUpTimers,
    pub spawner: SpawnDirector,
    /// Cosmetic backdrop; keeps scrolling only while playing
    pub starfield: Starfield,
    /// Set when the confirm signal arrives after game over
    pub restart_requested: bool,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) corridor: Corridor,
    tuning: Arc<Tuning>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the opening spawns already queued
    pub fn new(seed: u64, tuning: Arc<Tuning>) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::opening(seed, tuning))
    }

    /// Fresh run using the default balance
    pub fn with_default_tuning(seed: u64) -> Self {
        Self::opening(seed, Arc::new(Tuning::default()))
    }

    /// A run with nothing queued (useful for hand-built scenarios)
    pub fn empty(seed: u64, tuning: Arc<Tuning>) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn opening(seed: u64, tuning: Arc<Tuning>) -> Self {
        let mut state = Self::build(seed, tuning);
        let tuning = Arc::clone(&state.tuning);
        state
            .spawner
            .schedule_opening(0.0, &mut state.rng, &tuning);
        log::info!("New run with seed {}", seed);
        state
    }

    /// Assemble a state from an already validated bundle
    fn build(seed: u64, tuning: Arc<Tuning>) -> Self {
        Self {
            seed,
            status: GameStatus::Playing,
            resources: Resources {
                army: tuning.army.starting,
                army_cap: tuning.army.base_cap,
                score: 0,
                time_ms: 0.0,
                next_cap_at_ms: f64::from(tuning.army.cap_interval_ms),
                shoot_timer_ms: 0.0,
            },
            entities: Entities {
                player: Player::new(&tuning.player),
                enemies: Vec::new(),
                bosses: Vec::new(),
                bullets: Vec::new(),
                bonuses: Vec::new(),
                power_ups: Vec::new(),
                clones: Vec::new(),
            },
            power_ups: PowerUpTimers::new(),
            spawner: SpawnDirector::new(),
            starfield: Starfield::new(seed, &tuning.background, &tuning.field),
            restart_requested: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            corridor: Corridor::new(&tuning.corridor, &tuning.barrier),
            tuning,
            next_id: 1,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub(crate) fn tuning_handle(&self) -> Arc<Tuning> {
        Arc::clone(&self.tuning)
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    pub fn wave(&self) -> u32 {
        self.spawner.wave()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    pub fn summary(&self) -> GameOverSummary {
        GameOverSummary {
            score: self.resources.score,
            wave: self.wave(),
            elapsed: format_game_time(self.resources.time_ms),
        }
    }
}
