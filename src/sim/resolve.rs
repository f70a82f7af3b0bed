//! Collision passes and the state mutations they trigger
//!
//! Every pass walks its outer list by index from the back, so removing the
//! current element (or anything behind it) never skips or revisits an entry.

use glam::Vec2;

use super::collision::{Collider, collide, overlaps};
use super::entities::{Enemy, PlayerClone};
use super::events::GameEvent;
use super::powerup::PowerUpKind;
use super::state::{GameState, GameStatus};

/// Run the four passes in order, stopping as soon as the run ends
pub fn resolve_collisions(state: &mut GameState) {
    let passes: [fn(&mut GameState); 4] = [
        bullets_vs_targets,
        player_vs_hostiles,
        player_vs_bonuses,
        player_vs_power_ups,
    ];
    for pass in passes {
        if state.status != GameStatus::Playing {
            return;
        }
        pass(state);
    }
}

/// Bullets against enemies, then bosses. A bullet is spent on the first
/// target it touches.
pub fn bullets_vs_targets(state: &mut GameState) {
    let tuning = state.tuning_handle();
    let flash_ms = tuning.enemy.hit_flash_ms;

    let mut i = state.entities.bullets.len();
    while i > 0 {
        i -= 1;
        let shot = state.entities.bullets[i].aabb();
        let damage = state.entities.bullets[i].damage;

        if let Some(j) = state
            .entities
            .enemies
            .iter()
            .position(|enemy| overlaps(&shot, &enemy.aabb()))
        {
            state.entities.bullets.remove(i);
            if state.entities.enemies[j].take_damage(damage, flash_ms) {
                let enemy = state.entities.enemies.remove(j);
                score_enemy_kill(state, &enemy);
            }
            continue;
        }

        if let Some(j) = state
            .entities
            .bosses
            .iter()
            .position(|boss| overlaps(&shot, &boss.aabb()))
        {
            state.entities.bullets.remove(i);
            if state.entities.bosses[j].take_damage(damage, flash_ms) {
                let boss = state.entities.bosses.remove(j);
                state.resources.score += boss.points;
                log::info!("Boss #{} defeated (+{})", boss.boss_number, boss.points);
                state.emit(GameEvent::BossDefeated {
                    id: boss.id,
                    pos: boss.pos,
                    points: boss.points,
                });
                boss_blast(state, boss.pos);
            }
        }
    }
}

/// Area damage around a dead boss. Enemies it kills are scored.
pub fn boss_blast(state: &mut GameState, pos: Vec2) {
    let tuning = state.tuning_handle();
    let radius = tuning.boss.explosion_radius;
    let damage = tuning.boss.explosion_damage;
    let flash_ms = tuning.enemy.hit_flash_ms;

    let mut dead = Vec::new();
    state.entities.enemies.retain_mut(|enemy| {
        if enemy.pos.distance(pos) > radius {
            return true;
        }
        if enemy.take_damage(damage, flash_ms) {
            dead.push(enemy.clone());
            false
        } else {
            true
        }
    });

    for enemy in &dead {
        score_enemy_kill(state, enemy);
    }
    state.emit(GameEvent::BossBlast {
        pos,
        radius,
        killed: dead.len() as u32,
    });
}

fn score_enemy_kill(state: &mut GameState, enemy: &Enemy) {
    let points = state.tuning().enemy.points;
    state.resources.score += points;
    state.emit(GameEvent::EnemyKilled {
        id: enemy.id,
        pos: enemy.pos,
        points,
    });
}

/// Player contact with enemies and bosses
pub fn player_vs_hostiles(state: &mut GameState) {
    player_vs_enemies(state);
    if state.status == GameStatus::Playing {
        player_vs_bosses(state);
    }
}

/// Enemy contact costs one army point, unless Shield Trap is up: then the
/// whole field is wiped and the shield is spent.
pub fn player_vs_enemies(state: &mut GameState) {
    let player = state.entities.player.aabb();

    let mut i = state.entities.enemies.len();
    while i > 0 {
        i -= 1;
        if !overlaps(&player, &state.entities.enemies[i].aabb()) {
            continue;
        }

        if state.power_ups.is_active(PowerUpKind::ShieldTrap) {
            trigger_shield_trap(state);
            return;
        }

        state.entities.enemies.remove(i);
        damage_player(state, 1);
        if state.status == GameStatus::Over {
            return;
        }
    }
}

fn trigger_shield_trap(state: &mut GameState) {
    let wiped = std::mem::take(&mut state.entities.enemies);
    for enemy in &wiped {
        score_enemy_kill(state, enemy);
    }
    state.power_ups.deactivate(PowerUpKind::ShieldTrap);
    log::debug!("Shield trap wiped {} enemies", wiped.len());
    state.emit(GameEvent::ShieldTrapTriggered {
        destroyed: wiped.len() as u32,
    });
}

/// Boss contact always lands, shield or not
pub fn player_vs_bosses(state: &mut GameState) {
    let mut i = state.entities.bosses.len();
    while i > 0 {
        i -= 1;
        if !collide(&state.entities.player, &state.entities.bosses[i]) {
            continue;
        }
        let boss = state.entities.bosses.remove(i);
        damage_player(state, boss.damage);
        if state.status == GameStatus::Over {
            return;
        }
    }
}

/// Bonus pickups grow the army up to the current cap; score follows the
/// army actually gained.
pub fn player_vs_bonuses(state: &mut GameState) {
    let score_per_army = state.tuning().bonus.score_per_army;

    let mut i = state.entities.bonuses.len();
    while i > 0 {
        i -= 1;
        if !collide(&state.entities.player, &state.entities.bonuses[i]) {
            continue;
        }
        let bonus = state.entities.bonuses.remove(i);
        let before = state.resources.army;
        let after = bonus.apply_to(before).min(state.resources.army_cap);
        let gained = after.saturating_sub(before);
        state.resources.army = after;
        state.resources.score += u64::from(gained) * score_per_army;
        log::debug!("Bonus {} collected, army {} -> {}", bonus.reward.label, before, after);
        state.emit(GameEvent::BonusCollected {
            id: bonus.id,
            pos: bonus.pos,
            gained,
            army: after,
        });
    }
}

pub fn player_vs_power_ups(state: &mut GameState) {
    let mut i = state.entities.power_ups.len();
    while i > 0 {
        i -= 1;
        if !collide(&state.entities.player, &state.entities.power_ups[i]) {
            continue;
        }
        let drop = state.entities.power_ups.remove(i);
        activate_power_up(state, drop.kind);
    }
}

/// Start a power-up (Jackpot starts all of them) and announce the combo on
/// every pickup made while Triple Shot and Big Bullets both run.
pub fn activate_power_up(state: &mut GameState, kind: PowerUpKind) {
    let tuning = state.tuning_handle();
    let duration = tuning.powerup.duration_ms;

    let activated: Vec<PowerUpKind> = match kind {
        PowerUpKind::Jackpot => {
            log::info!("Jackpot!");
            state
                .power_ups
                .activate_jackpot(duration, tuning.powerup.jackpot_duration_ms)
                .to_vec()
        }
        kind => {
            state.power_ups.activate(kind, duration);
            vec![kind]
        }
    };

    for kind in activated {
        log::debug!("Power-up {} activated", kind.info().name);
        if kind == PowerUpKind::Clone {
            spawn_clones(state);
        }
        state.emit(GameEvent::PowerUpActivated { kind });
    }

    if state.power_ups.combo() {
        state.emit(GameEvent::Combo);
    }
}

/// Two escorts at a symmetric offset. Existing escorts are kept.
fn spawn_clones(state: &mut GameState) {
    if !state.entities.clones.is_empty() {
        return;
    }
    let offset = state.tuning().powerup.clone_offset_x;
    for side in [-1.0, 1.0] {
        let id = state.next_entity_id();
        let clone = PlayerClone::new(id, side * offset, &state.entities.player);
        state.entities.clones.push(clone);
    }
}

/// Run teardown for a kind that just stopped
pub fn teardown_power_up(state: &mut GameState, kind: PowerUpKind) {
    if kind == PowerUpKind::Clone {
        state.entities.clones.clear();
    }
}

/// Take army from the player. Escorts never survive a hit; an empty army
/// ends the run.
pub fn damage_player(state: &mut GameState, amount: u32) {
    state.resources.army = state.resources.army.saturating_sub(amount);
    state.emit(GameEvent::PlayerHit {
        damage: amount,
        army: state.resources.army,
    });

    if state.power_ups.deactivate(PowerUpKind::Clone) {
        state.emit(GameEvent::PowerUpExpired {
            kind: PowerUpKind::Clone,
        });
    }
    teardown_power_up(state, PowerUpKind::Clone);

    if state.resources.army == 0 {
        enter_game_over(state);
    }
}

/// Terminal transition: clear the field, cancel queued spawns, publish the summary
pub fn enter_game_over(state: &mut GameState) {
    if state.status == GameStatus::Over {
        return;
    }
    state.status = GameStatus::Over;
    state.entities.clear();
    state.power_ups.clear();
    let cancelled = state.spawner.cancel_all();
    let summary = state.summary();
    log::info!(
        "Game over: score {} wave {} time {} ({} pending spawns cancelled)",
        summary.score,
        summary.wave,
        summary.elapsed,
        cancelled
    );
    state.emit(GameEvent::GameOver(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Bonus, Boss, Bullet, PowerUpDrop};
    use crate::tuning::{BonusReward, Tuning};
    use std::sync::Arc;

    fn state() -> GameState {
        GameState::empty(3, Arc::new(Tuning::default())).unwrap()
    }

    fn add_enemy(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        let enemy = Enemy::spawn(id, pos, 1, &state.tuning().enemy);
        state.entities.enemies.push(enemy);
        id
    }

    fn add_bullet(state: &mut GameState, pos: Vec2, damage: f32) {
        let id = state.next_entity_id();
        state.entities.bullets.push(Bullet {
            id,
            pos,
            vel: Vec2::new(0.0, -400.0),
            damage,
            size: Vec2::new(6.0, 20.0),
        });
    }

    fn add_bonus(state: &mut GameState, reward: BonusReward) {
        let id = state.next_entity_id();
        let pos = state.entities.player.pos;
        state.entities.bonuses.push(Bonus {
            id,
            pos,
            radius: 22.0,
            speed: 80.0,
            reward,
        });
    }

    #[test]
    fn test_enemy_contact_at_one_army_ends_run() {
        let mut state = state();
        state.spawner.schedule(
            1000.0,
            crate::sim::spawn::SpawnOrder::Enemy { x: 300.0, wave: 1 },
        );
        let player = state.entities.player.pos;
        add_enemy(&mut state, player);
        add_enemy(&mut state, Vec2::new(400.0, 100.0));

        resolve_collisions(&mut state);

        assert_eq!(state.resources.army, 0);
        assert_eq!(state.status, GameStatus::Over);
        assert_eq!(state.entities.live_count(), 0);
        assert_eq!(state.spawner.pending_len(), 0);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver(_)))
        );
    }

    #[test]
    fn test_bonus_add_then_multiplier_clamps_to_cap() {
        let mut state = state();
        state.resources.army = 5;
        state.resources.army_cap = 10;

        add_bonus(&mut state, BonusReward::add(3, 0));
        player_vs_bonuses(&mut state);
        assert_eq!(state.resources.army, 8);
        assert_eq!(state.resources.score, 3 * 15);

        add_bonus(&mut state, BonusReward::multiply(2, 0));
        player_vs_bonuses(&mut state);
        assert_eq!(state.resources.army, 10);
        // Only the two points actually gained are scored
        assert_eq!(state.resources.score, 5 * 15);
        assert!(state.entities.bonuses.is_empty());
    }

    #[test]
    fn test_shield_trap_wipes_field() {
        let mut state = state();
        state.resources.army = 5;
        state.power_ups.activate(PowerUpKind::ShieldTrap, 15_000.0);
        let player = state.entities.player.pos;
        add_enemy(&mut state, Vec2::new(400.0, 100.0));
        add_enemy(&mut state, player);
        add_enemy(&mut state, Vec2::new(500.0, 200.0));
        add_enemy(&mut state, Vec2::new(600.0, 50.0));

        player_vs_enemies(&mut state);

        assert!(state.entities.enemies.is_empty());
        assert!(!state.power_ups.is_active(PowerUpKind::ShieldTrap));
        assert_eq!(state.resources.army, 5);
        assert_eq!(state.resources.score, 4 * 10);
        assert!(
            state
                .events
                .contains(&GameEvent::ShieldTrapTriggered { destroyed: 4 })
        );
    }

    #[test]
    fn test_shield_does_not_block_boss() {
        let mut state = state();
        state.resources.army = 20;
        state.power_ups.activate(PowerUpKind::ShieldTrap, 15_000.0);
        let id = state.next_entity_id();
        let boss = Boss::spawn(id, state.entities.player.pos, 1, &state.tuning().boss);
        state.entities.bosses.push(boss);

        resolve_collisions(&mut state);

        assert_eq!(state.resources.army, 15);
        assert!(state.entities.bosses.is_empty());
        assert!(state.power_ups.is_active(PowerUpKind::ShieldTrap));
    }

    #[test]
    fn test_bullets_on_one_enemy_in_one_pass() {
        let mut state = state();
        let target = Vec2::new(400.0, 200.0);
        add_enemy(&mut state, target);
        for _ in 0..3 {
            add_bullet(&mut state, target, 1.0);
        }

        bullets_vs_targets(&mut state);

        // Two shots kill it, the third has nothing left to hit
        assert!(state.entities.enemies.is_empty());
        assert_eq!(state.entities.bullets.len(), 1);
        assert_eq!(state.resources.score, 10);
    }

    #[test]
    fn test_bullets_on_adjacent_enemies() {
        let mut state = state();
        let left = Vec2::new(300.0, 200.0);
        let right = Vec2::new(345.0, 200.0);
        let far = Vec2::new(600.0, 100.0);
        add_enemy(&mut state, left);
        add_enemy(&mut state, right);
        let survivor = add_enemy(&mut state, far);
        add_bullet(&mut state, left, 5.0);
        add_bullet(&mut state, right, 5.0);
        add_bullet(&mut state, Vec2::new(500.0, 500.0), 5.0);

        bullets_vs_targets(&mut state);

        let ids: Vec<u32> = state.entities.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![survivor]);
        assert_eq!(state.entities.bullets.len(), 1);
        assert_eq!(state.resources.score, 20);
    }

    #[test]
    fn test_bullet_prefers_enemy_over_boss() {
        let mut state = state();
        let spot = Vec2::new(400.0, 200.0);
        add_enemy(&mut state, spot);
        let id = state.next_entity_id();
        let boss = Boss::spawn(id, spot, 1, &state.tuning().boss);
        let boss_hp = boss.hp;
        state.entities.bosses.push(boss);
        add_bullet(&mut state, spot, 1.0);

        bullets_vs_targets(&mut state);

        assert_eq!(state.entities.enemies[0].hp, 1.0);
        assert_eq!(state.entities.bosses[0].hp, boss_hp);
        assert!(state.entities.bullets.is_empty());
    }

    #[test]
    fn test_boss_death_blast_chains() {
        let mut state = state();
        let spot = Vec2::new(400.0, 200.0);
        let id = state.next_entity_id();
        let mut boss = Boss::spawn(id, spot, 1, &state.tuning().boss);
        boss.hp = 1.0;
        let boss_points = boss.points;
        state.entities.bosses.push(boss);
        add_enemy(&mut state, Vec2::new(300.0, 200.0));
        add_enemy(&mut state, Vec2::new(400.0, 320.0));
        let far = add_enemy(&mut state, Vec2::new(700.0, 200.0));
        add_bullet(&mut state, spot, 2.0);

        bullets_vs_targets(&mut state);

        assert!(state.entities.bosses.is_empty());
        let ids: Vec<u32> = state.entities.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![far]);
        assert_eq!(state.resources.score, boss_points + 20);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::BossBlast { killed: 2, .. }
        )));
    }

    #[test]
    fn test_hit_tears_down_clones() {
        let mut state = state();
        state.resources.army = 5;
        activate_power_up(&mut state, PowerUpKind::Clone);
        assert_eq!(state.entities.clones.len(), 2);

        damage_player(&mut state, 1);

        assert_eq!(state.resources.army, 4);
        assert!(state.entities.clones.is_empty());
        assert!(!state.power_ups.is_active(PowerUpKind::Clone));
    }

    #[test]
    fn test_power_up_pickup_and_combo() {
        let mut state = state();
        for kind in [PowerUpKind::TripleShot, PowerUpKind::BigBullets] {
            let id = state.next_entity_id();
            let pos = state.entities.player.pos;
            state.entities.power_ups.push(PowerUpDrop {
                id,
                pos,
                radius: 22.0,
                speed: 80.0,
                kind,
            });
        }

        player_vs_power_ups(&mut state);

        assert!(state.entities.power_ups.is_empty());
        assert!(state.power_ups.combo());
        let combos = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::Combo)
            .count();
        assert_eq!(combos, 1);
    }

    #[test]
    fn test_combo_repeats_on_refresh() {
        let mut state = state();
        activate_power_up(&mut state, PowerUpKind::TripleShot);
        activate_power_up(&mut state, PowerUpKind::BigBullets);
        state.drain_events();

        activate_power_up(&mut state, PowerUpKind::TripleShot);
        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Combo).count(), 1);

        activate_power_up(&mut state, PowerUpKind::SpeedBoost);
        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Combo).count(), 1);
    }

    #[test]
    fn test_jackpot_durations() {
        let mut state = state();
        activate_power_up(&mut state, PowerUpKind::RapidFire);
        activate_power_up(&mut state, PowerUpKind::Jackpot);

        for kind in PowerUpKind::TIMED {
            assert!(state.power_ups.is_active(kind));
        }
        assert_eq!(state.power_ups.remaining_ms(PowerUpKind::RapidFire), 15_000.0);
        assert_eq!(state.power_ups.remaining_ms(PowerUpKind::TripleShot), 25_000.0);
        assert_eq!(state.entities.clones.len(), 2);
    }

    #[test]
    fn test_boss_overkill_floors_army() {
        let mut state = state();
        state.resources.army = 2;
        damage_player(&mut state, 9);
        assert_eq!(state.resources.army, 0);
        assert_eq!(state.status, GameStatus::Over);
    }
}
