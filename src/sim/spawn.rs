//! Wave timing and spawn scheduling
//!
//! The director owns the wave counter and a min-heap of pending spawns keyed
//! by game-clock time. Nothing spawns directly from here: due orders are
//! drained by the tick, which materializes them into entities. Clearing the
//! heap cancels every in-flight spawn.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::Boss;
use super::powerup::PowerUpKind;
use crate::tuning::{BossTuning, CorridorTuning, PowerUpTuning, Tuning, WaveTuning};

/// What to spawn, with its position already rolled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpawnOrder {
    /// `wave` is the wave whose stats the enemy uses
    Enemy { x: f32, wave: u32 },
    Boss { x: f32, boss_number: u32 },
    /// `wave` selects the bonus tier
    Bonus { x: f32, wave: u32 },
    PowerUp { x: f32, kind: PowerUpKind },
}

/// An order waiting for the clock to reach `due_ms`
#[derive(Debug, Clone)]
pub struct PendingSpawn {
    pub due_ms: f64,
    seq: u64,
    pub order: SpawnOrder,
}

impl PartialEq for PendingSpawn {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingSpawn {}

impl PartialOrd for PendingSpawn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingSpawn {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .total_cmp(&other.due_ms)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Summary of one spawn cycle
#[derive(Debug, Clone, PartialEq)]
pub struct WaveReport {
    pub wave: u32,
    pub boss: bool,
    pub enemies: u32,
    pub bonus: bool,
    pub power_up: Option<PowerUpKind>,
}

/// Interval (ms) between spawn cycles at `wave`: shrinks with wave, floored
pub fn spawn_interval(wave: u32, waves: &WaveTuning) -> f32 {
    let interval = waves.base_interval_ms - wave as f32 * waves.interval_reduction_ms;
    interval.clamp(waves.min_interval_ms, waves.base_interval_ms)
}

/// Regular enemies in a non-boss wave
pub fn enemy_count(wave: u32, waves: &WaveTuning) -> u32 {
    *waves.enemies_per_wave.lookup(wave)
}

pub fn is_boss_wave(wave: u32, boss: &BossTuning) -> bool {
    boss.spawn_interval > 0 && wave % boss.spawn_interval == 0
}

fn roll_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

fn enemy_x(rng: &mut impl Rng, corridor: &CorridorTuning, inset: f32) -> f32 {
    let (lo, hi) = (corridor.enemy_min_x + inset, corridor.enemy_max_x - inset);
    if lo <= hi {
        roll_range(rng, lo, hi)
    } else {
        roll_range(rng, corridor.enemy_min_x, corridor.enemy_max_x)
    }
}

/// X inside the left or right bonus corridor, picked with equal odds
fn side_x(rng: &mut impl Rng, corridor: &CorridorTuning) -> f32 {
    if rng.random::<f32>() < 0.5 {
        roll_range(rng, corridor.left_bonus_min_x, corridor.left_bonus_max_x)
    } else {
        roll_range(rng, corridor.right_bonus_min_x, corridor.right_bonus_max_x)
    }
}

/// Uniform pick from the configured pool, occasionally upgraded to a jackpot
fn roll_power_up_kind(rng: &mut impl Rng, powerup: &PowerUpTuning) -> PowerUpKind {
    let kind = if powerup.spawn_pool.is_empty() {
        PowerUpKind::TIMED[rng.random_range(0..PowerUpKind::TIMED.len())]
    } else {
        let name = &powerup.spawn_pool[rng.random_range(0..powerup.spawn_pool.len())];
        PowerUpKind::from_name_or_fallback(name)
    };
    if rng.random::<f32>() < powerup.jackpot_chance {
        PowerUpKind::Jackpot
    } else {
        kind
    }
}

/// Wave counter, spawn timer and pending spawn queue
#[derive(Debug, Clone)]
pub struct SpawnDirector {
    wave: u32,
    spawn_timer_ms: f32,
    pending: BinaryHeap<Reverse<PendingSpawn>>,
    next_seq: u64,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self {
            wave: 1,
            spawn_timer_ms: 0.0,
            pending: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Current wave (starts at 1, bumped once per spawn cycle)
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Jump the counter, e.g. to start a practice run deep into the curve
    pub fn set_wave(&mut self, wave: u32) {
        self.wave = wave.max(1);
    }

    pub fn spawn_timer_ms(&self) -> f32 {
        self.spawn_timer_ms
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Orders still waiting, earliest first
    pub fn pending(&self) -> Vec<&PendingSpawn> {
        let mut pending: Vec<_> = self.pending.iter().map(|Reverse(p)| p).collect();
        pending.sort();
        pending
    }

    pub fn schedule(&mut self, due_ms: f64, order: SpawnOrder) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(PendingSpawn { due_ms, seq, order }));
    }

    /// Queue the scripted opening hordes and bonuses relative to `start_ms`
    pub fn schedule_opening(&mut self, start_ms: f64, rng: &mut impl Rng, tuning: &Tuning) {
        let spacing = f64::from(tuning.spawn.enemy_spacing_ms);
        for horde in &tuning.spawn.opening_hordes {
            for i in 0..horde.count {
                let x = enemy_x(rng, &tuning.corridor, 0.0);
                let due = start_ms + f64::from(horde.at_ms) + f64::from(i) * spacing;
                self.schedule(due, SpawnOrder::Enemy { x, wave: 1 });
            }
        }
        for &at_ms in &tuning.spawn.opening_bonuses_ms {
            let x = side_x(rng, &tuning.corridor);
            self.schedule(start_ms + f64::from(at_ms), SpawnOrder::Bonus { x, wave: 1 });
        }
    }

    /// Accumulate `dt_ms`; once the accumulator exceeds the current interval,
    /// launch a wave and reset it.
    pub fn advance(
        &mut self,
        dt_ms: f32,
        now_ms: f64,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> Option<WaveReport> {
        self.spawn_timer_ms += dt_ms;
        if self.spawn_timer_ms > spawn_interval(self.wave, &tuning.waves) {
            self.spawn_timer_ms = 0.0;
            Some(self.launch_wave(now_ms, rng, tuning))
        } else {
            None
        }
    }

    /// Run one spawn cycle for the current wave and bump the counter
    pub fn launch_wave(&mut self, now_ms: f64, rng: &mut impl Rng, tuning: &Tuning) -> WaveReport {
        let wave = self.wave;
        let boss = is_boss_wave(wave, &tuning.boss);

        let enemies = if boss {
            let x = enemy_x(rng, &tuning.corridor, 20.0);
            let boss_number = Boss::number_for_wave(wave, tuning.boss.spawn_interval);
            let due = now_ms + f64::from(tuning.boss.announce_delay_ms);
            self.schedule(due, SpawnOrder::Boss { x, boss_number });
            0
        } else {
            let count = enemy_count(wave, &tuning.waves);
            let spacing = f64::from(tuning.spawn.enemy_spacing_ms);
            for i in 0..count {
                let x = enemy_x(rng, &tuning.corridor, 0.0);
                self.schedule(now_ms + f64::from(i) * spacing, SpawnOrder::Enemy { x, wave });
            }
            count
        };

        let bonus = rng.random::<f32>() < tuning.bonus.spawn_chance.at(wave);
        if bonus {
            let x = side_x(rng, &tuning.corridor);
            let due = now_ms + f64::from(tuning.spawn.bonus_delay_ms);
            self.schedule(due, SpawnOrder::Bonus { x, wave });
        }

        let power_up = if rng.random::<f32>() < tuning.powerup.spawn_chance.at(wave) {
            let kind = roll_power_up_kind(rng, &tuning.powerup);
            let x = side_x(rng, &tuning.corridor);
            let due = now_ms + f64::from(tuning.spawn.powerup_delay_ms);
            self.schedule(due, SpawnOrder::PowerUp { x, kind });
            Some(kind)
        } else {
            None
        };

        self.wave += 1;

        WaveReport {
            wave,
            boss,
            enemies,
            bonus,
            power_up,
        }
    }

    /// Pop every order due at or before `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<SpawnOrder> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.pending.peek() {
            if next.due_ms > now_ms {
                break;
            }
            if let Some(Reverse(spawn)) = self.pending.pop() {
                due.push(spawn.order);
            }
        }
        due
    }

    /// Drop every pending order. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }
}
