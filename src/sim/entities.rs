//! Entity models and their per-entity update rules
//!
//! Positions are box centers in field space: origin top-left, +Y downward.
//! Speeds are px/s and `dt` is seconds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider, Corridor};
use super::powerup::PowerUpKind;
use crate::tuning::{BonusReward, BossTuning, EnemyTuning, PlayerTuning};

/// The player's unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    speed: f32,
    min_x: f32,
    max_x: f32,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.start_x, tuning.start_y),
            size: Vec2::new(tuning.width, tuning.height),
            speed: tuning.speed,
            min_x: tuning.min_x,
            max_x: tuning.max_x,
        }
    }

    /// Move horizontally. `direction` is -1 (left) or +1 (right).
    ///
    /// Outside the passage band a step into a barrier is refused. The result
    /// is always clamped into the playable band.
    pub fn move_x(&mut self, direction: f32, speed_multiplier: f32, dt: f32, corridor: &Corridor) {
        let step = direction.signum() * self.speed * speed_multiplier * dt;
        let candidate = Vec2::new(self.pos.x + step, self.pos.y);

        if corridor.in_passage(self.pos.y) || !corridor.blocked(&self.aabb().at(candidate)) {
            self.pos.x = candidate.x;
        }

        self.pos.x = self.pos.x.clamp(self.min_x, self.max_x);
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }
}

impl Collider for Player {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Movement parameters shared by everything that chases the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Chase {
    /// Drift speed used while blocked by a barrier
    pub base_speed: f32,
    pub chase_speed: f32,
}

impl Chase {
    /// Advance `pos` (a box of `size`) one step toward `target`.
    ///
    /// Inside the passage band the step is always taken. Elsewhere a step
    /// into a barrier is replaced by a downward drift, with a slow slide
    /// toward the nearest opening once close to the passage.
    pub fn step(&self, pos: Vec2, size: Vec2, target: Vec2, dt: f32, corridor: &Corridor) -> Vec2 {
        let to_target = target - pos;
        let distance = to_target.length();
        if distance <= 0.0 {
            return pos;
        }

        let candidate = pos + to_target / distance * self.chase_speed * dt;
        if corridor.in_passage(pos.y) || !corridor.blocked(&Aabb::new(candidate, size)) {
            return candidate;
        }

        let mut next = pos;
        next.y += self.base_speed * dt;
        if corridor.in_funnel(next.y) {
            if let Some(opening_x) = corridor.nearest_opening_x(next.x) {
                let dx = opening_x - next.x;
                let max_slide = corridor.funnel_speed() * dt;
                next.x += dx.clamp(-max_slide, max_slide);
            }
        }
        next
    }
}

/// A regular horde enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub chase: Chase,
    /// Remaining hit-flash time (ms), cosmetic only
    #[serde(default)]
    pub hit_flash_ms: f32,
}

impl Enemy {
    /// Build an enemy whose stats are scaled for `wave` (wave 1 = base stats)
    pub fn spawn(id: u32, pos: Vec2, wave: u32, tuning: &EnemyTuning) -> Self {
        let level = wave.saturating_sub(1) as f32;
        let hp = tuning.hp + level * tuning.hp_per_wave;
        let speed_bonus = level * tuning.speed_per_wave;
        Self {
            id,
            pos,
            size: Vec2::new(tuning.width, tuning.height),
            hp,
            max_hp: hp,
            chase: Chase {
                base_speed: tuning.base_speed + speed_bonus,
                chase_speed: tuning.chase_speed + speed_bonus,
            },
            hit_flash_ms: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, target: Vec2, corridor: &Corridor) {
        self.pos = self.chase.step(self.pos, self.size, target, dt, corridor);
        self.hit_flash_ms = (self.hit_flash_ms - dt * 1000.0).max(0.0);
    }

    /// Apply damage. Returns true once hp is at or below zero.
    pub fn take_damage(&mut self, amount: f32, flash_ms: f32) -> bool {
        self.hp -= amount;
        self.hit_flash_ms = flash_ms;
        self.hp <= 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        health_fraction(self.hp, self.max_hp)
    }
}

impl Collider for Enemy {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Periodic heavy enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub chase: Chase,
    /// Army lost on contact
    pub damage: u32,
    pub points: u64,
    /// 1 for the first boss of a run, 2 for the second...
    pub boss_number: u32,
    #[serde(default)]
    pub hit_flash_ms: f32,
}

impl Boss {
    /// Which boss a given wave produces: `floor(wave / spawn_interval)`, at least 1
    pub fn number_for_wave(wave: u32, spawn_interval: u32) -> u32 {
        (wave / spawn_interval.max(1)).max(1)
    }

    pub fn spawn(id: u32, pos: Vec2, boss_number: u32, tuning: &BossTuning) -> Self {
        let boss_number = boss_number.max(1);
        let level = boss_number - 1;
        let levelf = level as f32;
        let hp = tuning.hp + levelf * tuning.hp_per_boss;
        let speed_bonus = levelf * tuning.speed_per_boss;
        let grow = levelf * tuning.size_per_boss;
        Self {
            id,
            pos,
            size: Vec2::new(tuning.width + grow, tuning.height + grow),
            hp,
            max_hp: hp,
            chase: Chase {
                base_speed: tuning.base_speed + speed_bonus,
                chase_speed: tuning.chase_speed + speed_bonus,
            },
            damage: tuning.damage + level * tuning.damage_per_boss,
            points: tuning.points + u64::from(level) * tuning.points_per_boss,
            boss_number,
            hit_flash_ms: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, target: Vec2, corridor: &Corridor) {
        self.pos = self.chase.step(self.pos, self.size, target, dt, corridor);
        self.hit_flash_ms = (self.hit_flash_ms - dt * 1000.0).max(0.0);
    }

    pub fn take_damage(&mut self, amount: f32, flash_ms: f32) -> bool {
        self.hp -= amount;
        self.hit_flash_ms = flash_ms;
        self.hp <= 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        health_fraction(self.hp, self.max_hp)
    }
}

impl Collider for Boss {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

fn health_fraction(hp: f32, max_hp: f32) -> f32 {
    if max_hp <= 0.0 {
        return 0.0;
    }
    (hp / max_hp).clamp(0.0, 1.0)
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// px/s; straight shots are `(0, -speed)`
    pub vel: Vec2,
    pub damage: f32,
    /// Hitbox size (also used for drawing)
    pub size: Vec2,
}

impl Bullet {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Yellow that brightens with damage
    pub fn color(&self) -> u32 {
        let intensity = (self.damage * 20.0).clamp(0.0, 255.0) as u32;
        (intensity << 16) | (intensity << 8)
    }
}

impl Collider for Bullet {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Falling army pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub reward: BonusReward,
}

impl Bonus {
    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    /// Army after collecting this bonus, before any cap is applied
    pub fn apply_to(&self, army: u32) -> u32 {
        if self.reward.is_multiplier {
            army.saturating_mul(self.reward.amount)
        } else {
            army.saturating_add(self.reward.amount)
        }
    }
}

impl Collider for Bonus {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// Falling power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpDrop {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
}

impl PowerUpDrop {
    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }
}

impl Collider for PowerUpDrop {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// Escort spawned by the Clone power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerClone {
    pub id: u32,
    pub offset_x: f32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl PlayerClone {
    pub fn new(id: u32, offset_x: f32, player: &Player) -> Self {
        let mut clone = Self {
            id,
            offset_x,
            pos: player.pos,
            size: player.size,
        };
        clone.follow(player);
        clone
    }

    /// Mirror the player at a fixed horizontal offset, kept inside the playable band
    pub fn follow(&mut self, player: &Player) {
        self.pos = Vec2::new(player.clamp_x(player.pos.x + self.offset_x), player.pos.y);
    }
}

impl Collider for PlayerClone {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
