//! Auto-fire curves and shot patterns

use glam::Vec2;

use super::entities::Bullet;
use super::powerup::{PowerUpKind, PowerUpTimers};
use crate::tuning::{BulletTuning, PowerUpTuning};

/// Base fire interval (ms) for an army size: shrinks with army, floored
pub fn fire_rate(army: u32, bullet: &BulletTuning) -> f32 {
    let rate = bullet.base_fire_rate_ms - army as f32 * bullet.fire_rate_decrease_per_army;
    rate.clamp(bullet.min_fire_rate_ms, bullet.base_fire_rate_ms)
}

/// Interval actually compared against the shoot timer (Rapid Fire applied)
pub fn effective_fire_rate(
    army: u32,
    timers: &PowerUpTimers,
    bullet: &BulletTuning,
    powerup: &PowerUpTuning,
) -> f32 {
    let rate = fire_rate(army, bullet);
    if timers.is_active(PowerUpKind::RapidFire) {
        rate * powerup.rapid_fire_multiplier
    } else {
        rate
    }
}

/// Per-bullet damage: linear in army, boosted by Big Bullets
pub fn bullet_damage(
    army: u32,
    timers: &PowerUpTimers,
    bullet: &BulletTuning,
    powerup: &PowerUpTuning,
) -> f32 {
    let damage = bullet.base_damage + army as f32 * bullet.damage_per_army;
    if timers.is_active(PowerUpKind::BigBullets) {
        damage * powerup.big_bullet_damage_multiplier
    } else {
        damage
    }
}

/// Hitbox size for a bullet of `damage`
pub fn bullet_size(
    damage: f32,
    timers: &PowerUpTimers,
    bullet: &BulletTuning,
    powerup: &PowerUpTuning,
) -> Vec2 {
    let damage_scale =
        (1.0 + (damage - 1.0).max(0.0) * bullet.damage_size_scale).min(bullet.max_damage_scale);
    let big = if timers.is_active(PowerUpKind::BigBullets) {
        powerup.big_bullet_size_multiplier
    } else {
        1.0
    };
    Vec2::new(bullet.width, bullet.height) * damage_scale * big
}

/// Velocities for one volley: straight up, plus two mirrored diagonals under Triple Shot
pub fn volley_velocities(
    timers: &PowerUpTimers,
    bullet: &BulletTuning,
    powerup: &PowerUpTuning,
) -> Vec<Vec2> {
    let straight = Vec2::new(0.0, -bullet.speed);
    if !timers.is_active(PowerUpKind::TripleShot) {
        return vec![straight];
    }
    let spread = powerup.triple_shot_spread_deg.to_radians();
    let dx = spread.sin() * bullet.speed;
    let dy = -spread.cos() * bullet.speed;
    vec![straight, Vec2::new(-dx, dy), Vec2::new(dx, dy)]
}

/// Build the bullets one shooter at `origin` fires this volley. `next_id`
/// hands out entity ids.
pub fn fire_volley(
    origin: Vec2,
    army: u32,
    timers: &PowerUpTimers,
    bullet: &BulletTuning,
    powerup: &PowerUpTuning,
    mut next_id: impl FnMut() -> u32,
) -> Vec<Bullet> {
    let damage = bullet_damage(army, timers, bullet, powerup);
    let size = bullet_size(damage, timers, bullet, powerup);
    volley_velocities(timers, bullet, powerup)
        .into_iter()
        .map(|vel| Bullet {
            id: next_id(),
            pos: origin,
            vel,
            damage,
            size,
        })
        .collect()
}
