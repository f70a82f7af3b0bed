//! Display sinks: HUD snapshot, game-over summary and the per-frame render list
//!
//! The simulation never asks a renderer for anything. Hosts pull these
//! plain-data views after ticking and draw them however they like.

use serde::{Deserialize, Serialize};

use crate::sim::{Collider, GameState, GameStatus, PowerUpKind};

/// Format game time as `M:SS`
pub fn format_game_time(ms: f64) -> String {
    let total_seconds = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// A running power-up as shown in the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub name: String,
    pub icon: String,
    /// Whole seconds left, rounded up
    pub seconds_remaining: u32,
}

/// Everything the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub army: u32,
    pub army_cap: u32,
    pub wave: u32,
    pub score: u64,
    pub elapsed: String,
    pub active_power_ups: Vec<ActivePowerUp>,
    /// Triple Shot and Big Bullets both running
    pub combo: bool,
    pub paused: bool,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let active_power_ups = state
            .power_ups
            .active()
            .map(|(kind, remaining_ms)| {
                let info = kind.info();
                ActivePowerUp {
                    kind,
                    name: info.name.to_string(),
                    icon: info.icon.to_string(),
                    seconds_remaining: (remaining_ms / 1000.0).ceil() as u32,
                }
            })
            .collect();

        Self {
            army: state.resources.army,
            army_cap: state.resources.army_cap,
            wave: state.wave(),
            score: state.resources.score,
            elapsed: format_game_time(state.resources.time_ms),
            active_power_ups,
            combo: state.power_ups.combo(),
            paused: state.status == GameStatus::Paused,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Star,
    Wall,
    ShieldZone,
    Player,
    Clone,
    Enemy,
    Boss,
    Bullet,
    Bonus,
    PowerUp,
}

/// One drawable: a box (or circle of `width` diameter) centered on `x, y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub id: Option<u32>,
    pub kind: RenderKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub label: Option<String>,
    /// Health bar fill for enemies and bosses
    pub health: Option<f32>,
}

const WALL_COLOR: u32 = 0x666666;
const FLASH_COLOR: u32 = 0xffffff;

fn boxed(id: Option<u32>, kind: RenderKind, item: &impl Collider, color: u32) -> RenderItem {
    let bounds = item.aabb();
    let size = bounds.half * 2.0;
    RenderItem {
        id,
        kind,
        x: bounds.center.x,
        y: bounds.center.y,
        width: size.x,
        height: size.y,
        color,
        label: None,
        health: None,
    }
}

/// Draw list back to front: stars, walls, shield zone, pickups, hostiles, bullets, player side
pub fn render_list(state: &GameState) -> Vec<RenderItem> {
    let tuning = state.tuning();
    let entities = &state.entities;
    let stars = &state.starfield.stars;
    let mut items = Vec::with_capacity(stars.len() + entities.live_count() + 8);

    let star_diameter = tuning.background.star_radius * 2.0;
    for star in stars {
        items.push(RenderItem {
            id: None,
            kind: RenderKind::Star,
            x: star.pos.x,
            y: star.pos.y,
            width: star_diameter,
            height: star_diameter,
            color: tuning.background.star_color,
            label: None,
            health: None,
        });
    }

    for wall in state.corridor().walls() {
        items.push(boxed(None, RenderKind::Wall, wall, WALL_COLOR));
    }

    if state.power_ups.is_active(PowerUpKind::ShieldTrap) {
        let diameter = tuning.powerup.shield_radius * 2.0;
        items.push(RenderItem {
            id: None,
            kind: RenderKind::ShieldZone,
            x: entities.player.pos.x,
            y: entities.player.pos.y,
            width: diameter,
            height: diameter,
            color: PowerUpKind::ShieldTrap.info().color,
            label: None,
            health: None,
        });
    }

    for bonus in &entities.bonuses {
        let mut item = boxed(Some(bonus.id), RenderKind::Bonus, bonus, bonus.reward.color);
        item.label = Some(bonus.reward.label.clone());
        items.push(item);
    }
    for drop in &entities.power_ups {
        let info = drop.kind.info();
        let mut item = boxed(Some(drop.id), RenderKind::PowerUp, drop, info.color);
        item.label = Some(info.icon.to_string());
        items.push(item);
    }

    for enemy in &entities.enemies {
        let color = if enemy.hit_flash_ms > 0.0 {
            FLASH_COLOR
        } else {
            tuning.enemy.color
        };
        let mut item = boxed(Some(enemy.id), RenderKind::Enemy, enemy, color);
        item.health = Some(enemy.health_fraction());
        items.push(item);
    }
    for boss in &entities.bosses {
        let color = if boss.hit_flash_ms > 0.0 {
            FLASH_COLOR
        } else {
            tuning.boss.color
        };
        let mut item = boxed(Some(boss.id), RenderKind::Boss, boss, color);
        item.label = Some(format!("BOSS {}", boss.boss_number));
        item.health = Some(boss.health_fraction());
        items.push(item);
    }

    for bullet in &entities.bullets {
        items.push(boxed(Some(bullet.id), RenderKind::Bullet, bullet, bullet.color()));
    }

    for clone in &entities.clones {
        items.push(boxed(
            Some(clone.id),
            RenderKind::Clone,
            clone,
            PowerUpKind::Clone.info().color,
        ));
    }
    let mut player = boxed(None, RenderKind::Player, &entities.player, tuning.player.color);
    player.label = Some(state.resources.army.to_string());
    items.push(player);

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Enemy;
    use glam::Vec2;

    #[test]
    fn test_format_game_time() {
        assert_eq!(format_game_time(0.0), "0:00");
        assert_eq!(format_game_time(9_999.0), "0:09");
        assert_eq!(format_game_time(65_000.0), "1:05");
        assert_eq!(format_game_time(600_000.0), "10:00");
        assert_eq!(format_game_time(-5.0), "0:00");
    }

    #[test]
    fn test_hud_lists_active_power_ups() {
        let mut state = GameState::with_default_tuning(1);
        state.power_ups.activate(PowerUpKind::RapidFire, 14_200.0);
        state.power_ups.activate(PowerUpKind::TripleShot, 900.0);
        state.resources.time_ms = 61_500.0;

        let hud = HudSnapshot::capture(&state);
        assert_eq!(hud.elapsed, "1:01");
        assert_eq!(hud.wave, 1);
        assert!(!hud.combo);
        let shown: Vec<(PowerUpKind, u32)> = hud
            .active_power_ups
            .iter()
            .map(|p| (p.kind, p.seconds_remaining))
            .collect();
        assert_eq!(
            shown,
            vec![(PowerUpKind::TripleShot, 1), (PowerUpKind::RapidFire, 15)]
        );
    }

    #[test]
    fn test_render_list_contents() {
        let mut state = GameState::with_default_tuning(1);
        let id = state.next_entity_id();
        let mut enemy = Enemy::spawn(id, Vec2::new(400.0, 100.0), 1, &state.tuning().enemy);
        enemy.take_damage(1.0, 50.0);
        state.entities.enemies.push(enemy);
        state.power_ups.activate(PowerUpKind::ShieldTrap, 1000.0);

        let items = render_list(&state);
        let stars = items.iter().filter(|i| i.kind == RenderKind::Star).count();
        assert_eq!(stars, state.starfield.stars.len());
        assert_eq!(items.first().map(|i| i.kind), Some(RenderKind::Star));
        let walls = items.iter().filter(|i| i.kind == RenderKind::Wall).count();
        assert_eq!(walls, state.corridor().walls().len());
        assert!(items.iter().any(|i| i.kind == RenderKind::ShieldZone));

        let drawn = items
            .iter()
            .find(|i| i.id == Some(id))
            .map(|i| (i.color, i.health));
        assert_eq!(drawn, Some((FLASH_COLOR, Some(0.5))));

        let player = items.last().map(|i| (i.kind, i.label.clone()));
        assert_eq!(player, Some((RenderKind::Player, Some("1".to_string()))));
    }
}
