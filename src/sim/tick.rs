//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::entities::{Bonus, Boss, Enemy, PowerUpDrop};
use super::events::GameEvent;
use super::powerup::PowerUpKind;
use super::resolve::{resolve_collisions, teardown_power_up};
use super::spawn::SpawnOrder;
use super::state::{GameState, GameStatus};
use super::weapon::{effective_fire_rate, fire_volley};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Pause/confirm edge: toggles pause, or requests a restart after game over
    pub pause: bool,
    /// Idle/demo mode - autopilot drives the player
    pub idle_mode: bool,
}

impl TickInput {
    /// -1, 0 or +1
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    // Handle pause/confirm edge
    if input.pause {
        match state.status {
            GameStatus::Playing => {
                state.status = GameStatus::Paused;
                state.emit(GameEvent::Paused);
                return;
            }
            GameStatus::Paused => {
                state.status = GameStatus::Playing;
                state.emit(GameEvent::Resumed);
            }
            GameStatus::Over => {
                if !state.restart_requested {
                    state.restart_requested = true;
                    state.emit(GameEvent::RestartRequested);
                }
                return;
            }
        }
    }

    // Nothing mutates while paused or after game over
    if state.status != GameStatus::Playing {
        return;
    }

    let dt_ms = dt_ms.max(0.0);
    let dt = dt_ms / 1000.0;
    state.resources.time_ms += f64::from(dt_ms);

    grow_army_cap(state);
    scroll_background(state, dt);

    let direction = if input.idle_mode {
        autopilot(state)
    } else {
        input.direction()
    };
    move_player(state, direction, dt);

    auto_fire(state, dt_ms);
    update_entities(state, dt);

    resolve_collisions(state);
    if state.status != GameStatus::Playing {
        return;
    }

    for kind in state.power_ups.tick(dt_ms) {
        log::debug!("Power-up {} expired", kind.info().name);
        teardown_power_up(state, kind);
        state.emit(GameEvent::PowerUpExpired { kind });
    }

    cull_out_of_bounds(state);
    advance_spawns(state, dt_ms);
}

fn grow_army_cap(state: &mut GameState) {
    let army = &state.tuning().army;
    let (increase, interval) = (army.cap_increase, f64::from(army.cap_interval_ms));
    if interval <= 0.0 {
        return;
    }
    while state.resources.time_ms >= state.resources.next_cap_at_ms {
        state.resources.army_cap = state.resources.army_cap.saturating_add(increase);
        state.resources.next_cap_at_ms += interval;
        log::info!("Army cap raised to {}", state.resources.army_cap);
        state.emit(GameEvent::ArmyCapRaised {
            cap: state.resources.army_cap,
        });
    }
}

fn scroll_background(state: &mut GameState, dt: f32) {
    let tuning = state.tuning_handle();
    state.starfield.update(dt, &tuning.field);
}

/// Dodge the closest hostile bearing down on the player; otherwise head for
/// the nearest pickup, or line up under the lowest enemy.
fn autopilot(state: &GameState) -> f32 {
    const DANGER_RANGE: f32 = 140.0;
    const DEADZONE: f32 = 4.0;

    let player = state.entities.player.pos;
    let width = state.entities.player.size.x;

    let hostiles = state
        .entities
        .enemies
        .iter()
        .map(|e| (e.pos, e.size))
        .chain(state.entities.bosses.iter().map(|b| (b.pos, b.size)));
    let threat = hostiles
        .filter(|(pos, size)| {
            let above = player.y - pos.y;
            above > 0.0 && above < DANGER_RANGE && (pos.x - player.x).abs() < size.x + width
        })
        .map(|(pos, _)| pos)
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
    if let Some(threat) = threat {
        return if threat.x > player.x { -1.0 } else { 1.0 };
    }

    let pickup = state
        .entities
        .bonuses
        .iter()
        .map(|b| b.pos)
        .chain(state.entities.power_ups.iter().map(|p| p.pos))
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
    let lowest_enemy = state
        .entities
        .enemies
        .iter()
        .map(|e| e.pos)
        .max_by(|a, b| a.y.total_cmp(&b.y));

    match pickup.or(lowest_enemy) {
        Some(target) if (target.x - player.x).abs() > DEADZONE => (target.x - player.x).signum(),
        _ => 0.0,
    }
}

fn move_player(state: &mut GameState, direction: f32, dt: f32) {
    if direction != 0.0 {
        let speed_multiplier = if state.power_ups.is_active(PowerUpKind::SpeedBoost) {
            state.tuning().powerup.speed_boost_multiplier
        } else {
            1.0
        };
        let corridor = &state.corridor;
        state
            .entities
            .player
            .move_x(direction, speed_multiplier, dt, corridor);
    }

    let player = &state.entities.player;
    for clone in &mut state.entities.clones {
        clone.follow(player);
    }
}

/// Fire a volley from the player and every escort once the shoot timer passes the fire rate
fn auto_fire(state: &mut GameState, dt_ms: f32) {
    let tuning = state.tuning_handle();
    state.resources.shoot_timer_ms += dt_ms;
    let rate = effective_fire_rate(
        state.resources.army,
        &state.power_ups,
        &tuning.bullet,
        &tuning.powerup,
    );
    if state.resources.shoot_timer_ms <= rate {
        return;
    }
    state.resources.shoot_timer_ms = 0.0;

    let muzzle = Vec2::new(0.0, -tuning.player.muzzle_offset);
    let origins: Vec<Vec2> = std::iter::once(state.entities.player.pos)
        .chain(state.entities.clones.iter().map(|c| c.pos))
        .map(|pos| pos + muzzle)
        .collect();

    let army = state.resources.army;
    let timers = state.power_ups.clone();
    for origin in origins {
        let volley = fire_volley(
            origin,
            army,
            &timers,
            &tuning.bullet,
            &tuning.powerup,
            || state.next_entity_id(),
        );
        state.entities.bullets.extend(volley);
    }
}

fn update_entities(state: &mut GameState, dt: f32) {
    let target = state.entities.player.pos;
    let corridor = &state.corridor;
    let entities = &mut state.entities;

    for enemy in &mut entities.enemies {
        enemy.update(dt, target, corridor);
    }
    for boss in &mut entities.bosses {
        boss.update(dt, target, corridor);
    }
    for bullet in &mut entities.bullets {
        bullet.update(dt);
    }
    for bonus in &mut entities.bonuses {
        bonus.update(dt);
    }
    for drop in &mut entities.power_ups {
        drop.update(dt);
    }
}

/// Drop anything that left the field (all four edges, plus a margin)
fn cull_out_of_bounds(state: &mut GameState) {
    let field = &state.tuning().field;
    let (min, max) = (
        Vec2::splat(-field.cull_margin),
        Vec2::new(field.width, field.height) + field.cull_margin,
    );
    let inside = |pos: Vec2| pos.cmpge(min).all() && pos.cmple(max).all();

    let entities = &mut state.entities;
    entities.enemies.retain(|e| inside(e.pos));
    entities.bosses.retain(|b| inside(b.pos));
    entities.bullets.retain(|b| inside(b.pos));
    entities.bonuses.retain(|b| inside(b.pos));
    entities.power_ups.retain(|p| inside(p.pos));
}

fn advance_spawns(state: &mut GameState, dt_ms: f32) {
    let tuning = state.tuning_handle();
    let now = state.resources.time_ms;

    if let Some(report) = state.spawner.advance(dt_ms, now, &mut state.rng, &tuning) {
        log::info!(
            "Wave {} started ({})",
            report.wave,
            if report.boss {
                "boss".to_string()
            } else {
                format!("{} enemies", report.enemies)
            }
        );
        state.emit(GameEvent::WaveStarted {
            wave: report.wave,
            boss: report.boss,
        });
    }

    for order in state.spawner.drain_due(now) {
        if state.status != GameStatus::Playing {
            break;
        }
        materialize(state, order);
    }
}

/// Turn a due order into a live entity at the top of the field
fn materialize(state: &mut GameState, order: SpawnOrder) {
    let tuning = state.tuning_handle();
    let spawn_y = tuning.corridor.spawn_y;
    let id = state.next_entity_id();

    match order {
        SpawnOrder::Enemy { x, wave } => {
            let enemy = Enemy::spawn(id, Vec2::new(x, spawn_y), wave, &tuning.enemy);
            state.entities.enemies.push(enemy);
        }
        SpawnOrder::Boss { x, boss_number } => {
            let boss = Boss::spawn(id, Vec2::new(x, spawn_y), boss_number, &tuning.boss);
            log::info!("Boss #{} spawned with {} hp", boss_number, boss.hp);
            state.entities.bosses.push(boss);
            state.emit(GameEvent::BossSpawned { id, boss_number });
        }
        SpawnOrder::Bonus { x, wave } => {
            let reward = tuning.bonus.tiers.lookup(wave).clone();
            log::debug!("Bonus {} spawned at x={:.0}", reward.label, x);
            state.entities.bonuses.push(Bonus {
                id,
                pos: Vec2::new(x, spawn_y),
                radius: tuning.bonus.radius,
                speed: tuning.bonus.speed,
                reward,
            });
        }
        SpawnOrder::PowerUp { x, kind } => {
            log::debug!("Power-up {} spawned at x={:.0}", kind.info().name, x);
            state.entities.power_ups.push(PowerUpDrop {
                id,
                pos: Vec2::new(x, spawn_y),
                radius: tuning.powerup.radius,
                speed: tuning.powerup.speed,
                kind,
            });
        }
    }
}
