//! End-to-end gameplay scenarios driven through the public API

use std::sync::Arc;

use glam::Vec2;

use last_war::consts::SIM_DT_MS;
use last_war::sim::resolve::{player_vs_bonuses, player_vs_enemies};
use last_war::sim::{
    Bonus, Enemy, GameEvent, GameState, GameStatus, PowerUpKind, PowerUpTimers, TickInput,
    fire_volley, tick,
};
use last_war::tuning::{BonusReward, Tuning};

fn fresh() -> GameState {
    GameState::empty(2024, Arc::new(Tuning::default())).unwrap()
}

fn enemy_at(state: &mut GameState, pos: Vec2) {
    let id = state.next_entity_id();
    let enemy = Enemy::spawn(id, pos, 1, &state.tuning().enemy);
    state.entities.enemies.push(enemy);
}

fn bonus_on_player(state: &mut GameState, reward: BonusReward) {
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
fn game_over_is_terminal() {
    let mut state = GameState::with_default_tuning(77);
    state.resources.army = 2;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for _ in 0..60 {
        tick(&mut state, &input, SIM_DT_MS);
    }

    // Two contacts in one tick drain the army
    let player = state.entities.player.pos;
    enemy_at(&mut state, player);
    enemy_at(&mut state, player + Vec2::new(5.0, 0.0));
    tick(&mut state, &TickInput::default(), SIM_DT_MS);
    assert_eq!(state.status, GameStatus::Over);
    assert_eq!(state.resources.army, 0);

    for _ in 0..5_000 {
        tick(&mut state, &input, SIM_DT_MS);
        assert_eq!(state.status, GameStatus::Over);
        assert_eq!(state.resources.army, 0);
        assert_eq!(state.entities.live_count(), 0);
        assert_eq!(state.spawner.pending_len(), 0);
    }

    let events = state.drain_events();
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver(_)))
        .count();
    assert_eq!(game_overs, 1);
}

#[test]
fn single_contact_at_one_army_ends_run() {
    let mut state = fresh();
    assert_eq!(state.resources.army, 1);
    assert_eq!(state.wave(), 1);
    let player = state.entities.player.pos;
    enemy_at(&mut state, player);

    player_vs_enemies(&mut state);

    assert_eq!(state.resources.army, 0);
    assert_eq!(state.status, GameStatus::Over);
}

#[test]
fn bonus_add_then_multiply_hits_cap() {
    let mut state = fresh();
    state.resources.army = 5;
    state.resources.army_cap = 10;

    bonus_on_player(&mut state, BonusReward::add(3, 0x00ff00));
    player_vs_bonuses(&mut state);
    assert_eq!(state.resources.army, 8);

    bonus_on_player(&mut state, BonusReward::multiply(2, 0xffd700));
    player_vs_bonuses(&mut state);
    assert_eq!(state.resources.army, 10);
}

#[test]
fn shield_trap_clears_the_field() {
    let mut state = fresh();
    state.resources.army = 3;
    state.power_ups.activate(PowerUpKind::ShieldTrap, 15_000.0);
    let player = state.entities.player.pos;
    enemy_at(&mut state, player);
    enemy_at(&mut state, Vec2::new(300.0, 80.0));
    enemy_at(&mut state, Vec2::new(450.0, 150.0));
    enemy_at(&mut state, Vec2::new(600.0, 220.0));

    player_vs_enemies(&mut state);

    assert!(state.entities.enemies.is_empty());
    assert!(!state.power_ups.is_active(PowerUpKind::ShieldTrap));
    assert_eq!(state.resources.army, 3);
    assert_eq!(state.resources.score, 4 * state.tuning().enemy.points);
}

#[test]
fn boss_wave_spawns_one_scaled_boss() {
    let mut state = fresh();
    state.spawner.set_wave(10);

    let mut ticks = 0;
    while state.entities.bosses.is_empty() && ticks < 2_000 {
        tick(&mut state, &TickInput::default(), SIM_DT_MS);
        ticks += 1;
    }

    let tuning = Tuning::default();
    assert_eq!(state.entities.bosses.len(), 1);
    assert!(state.entities.enemies.is_empty());
    let boss = &state.entities.bosses[0];
    assert_eq!(boss.boss_number, 1);
    assert_eq!(boss.max_hp, tuning.boss.hp);
    assert_eq!(boss.size, Vec2::new(tuning.boss.width, tuning.boss.height));
    assert_eq!(boss.points, tuning.boss.points);
    assert!(state.events.iter().any(|e| matches!(
        e,
        GameEvent::BossSpawned { boss_number: 1, .. }
    )));
}

#[test]
fn triple_shot_fires_a_symmetric_spread() {
    let tuning = Tuning::default();
    let mut timers = PowerUpTimers::new();
    timers.activate(PowerUpKind::TripleShot, tuning.powerup.duration_ms);

    let mut next = 0;
    let volley = fire_volley(
        Vec2::new(250.0, 415.0),
        4,
        &timers,
        &tuning.bullet,
        &tuning.powerup,
        || {
            next += 1;
            next
        },
    );

    assert_eq!(volley.len(), 3);
    let straight: Vec<_> = volley.iter().filter(|b| b.vel.x == 0.0).collect();
    assert_eq!(straight.len(), 1);
    let angled: Vec<f32> = volley
        .iter()
        .filter(|b| b.vel.x != 0.0)
        .map(|b| b.vel.x)
        .collect();
    assert_eq!(angled.len(), 2);
    assert_eq!(angled[0].abs(), angled[1].abs());
    assert_eq!(angled[0].signum(), -angled[1].signum());
}
