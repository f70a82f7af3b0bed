//! Property tests for the simulation's core invariants

use std::sync::Arc;

use glam::Vec2;
use proptest::prelude::*;

use last_war::sim::resolve::player_vs_bonuses;
use last_war::sim::{
    Aabb, Bonus, GameState, PowerUpKind, PowerUpTimers, enemy_count, fire_rate, overlaps,
};
use last_war::tuning::{BonusReward, BulletTuning, Tier, TierTable, Tuning};

fn vec2() -> impl Strategy<Value = Vec2> {
    (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn size() -> impl Strategy<Value = Vec2> {
    (0.1f32..300.0, 0.1f32..300.0).prop_map(|(w, h)| Vec2::new(w, h))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in vec2(), sa in size(), b in vec2(), sb in size()) {
        let (a, b) = (Aabb::new(a, sa), Aabb::new(b, sb));
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn disjoint_x_never_overlaps(a in vec2(), sa in size(), sb in size(), gap in 1.0f32..500.0, y in -1000.0f32..1000.0) {
        let a = Aabb::new(a, sa);
        // b starts right of a's max x, at any height
        let b_center = Vec2::new(a.max().x + gap + sb.x / 2.0, y);
        let b = Aabb::new(b_center, sb);
        prop_assert!(!overlaps(&a, &b));
    }

    #[test]
    fn disjoint_y_never_overlaps(a in vec2(), sa in size(), sb in size(), gap in 1.0f32..500.0, x in -1000.0f32..1000.0) {
        let a = Aabb::new(a, sa);
        let b = Aabb::new(Vec2::new(x, a.min().y - gap - sb.y / 2.0), sb);
        prop_assert!(!overlaps(&a, &b));
    }

    #[test]
    fn fire_rate_never_rises_with_army(a1 in 0u32..100_000, delta in 0u32..100_000) {
        let bullet = BulletTuning::default();
        let a2 = a1.saturating_add(delta);
        let (r1, r2) = (fire_rate(a1, &bullet), fire_rate(a2, &bullet));
        prop_assert!(r1 >= r2);
        prop_assert!(r2 >= bullet.min_fire_rate_ms);
        prop_assert!(r1 <= bullet.base_fire_rate_ms);
    }

    #[test]
    fn tier_lookup_is_total(wave in 1u32..=10_000) {
        let tuning = Tuning::default();
        let count = enemy_count(wave, &tuning.waves);
        prop_assert!(count > 0);
        let reward = tuning.bonus.tiers.lookup(wave);
        prop_assert!(reward.amount > 0);
    }

    #[test]
    fn arbitrary_tables_always_answer(
        bounds in prop::collection::vec(1u32..200, 1..6),
        open in any::<bool>(),
        wave in 0u32..=10_000,
    ) {
        let mut tiers: Vec<Tier<usize>> = bounds
            .iter()
            .enumerate()
            .map(|(i, &max)| Tier::upto(max, i))
            .collect();
        if open {
            tiers.push(Tier::rest(tiers.len()));
        }
        let len = tiers.len();
        let table = TierTable::new(tiers).expect("non-empty");
        prop_assert!(*table.lookup(wave) < len);
    }

    #[test]
    fn bonus_pickup_respects_cap(
        cap in 1u32..500,
        army_seed in 0u32..500,
        amount in 1u32..50,
        is_multiplier in any::<bool>(),
    ) {
        let mut state = GameState::empty(1, Arc::new(Tuning::default())).unwrap();
        state.resources.army_cap = cap;
        state.resources.army = army_seed % (cap + 1);
        let reward = if is_multiplier {
            BonusReward::multiply(amount, 0)
        } else {
            BonusReward::add(amount, 0)
        };
        let id = state.next_entity_id();
        let pos = state.entities.player.pos;
        state.entities.bonuses.push(Bonus { id, pos, radius: 22.0, speed: 80.0, reward });

        player_vs_bonuses(&mut state);

        prop_assert!(state.entities.bonuses.is_empty());
        prop_assert!(state.resources.army <= cap);
    }

    #[test]
    fn power_up_timer_decays_to_exact_zero(
        duration in 1.0f32..30_000.0,
        steps in prop::collection::vec(0.5f32..2_000.0, 1..200),
    ) {
        let mut timers = PowerUpTimers::new();
        timers.activate(PowerUpKind::BigBullets, duration);
        let mut previous = timers.remaining_ms(PowerUpKind::BigBullets);

        for dt in steps {
            if !timers.is_active(PowerUpKind::BigBullets) {
                break;
            }
            let expired = timers.tick(dt);
            let now = timers.remaining_ms(PowerUpKind::BigBullets);
            if timers.is_active(PowerUpKind::BigBullets) {
                prop_assert!(now < previous);
                prop_assert!(now > 0.0);
                prop_assert!(expired.is_empty());
            } else {
                prop_assert_eq!(now, 0.0);
                prop_assert_eq!(expired, vec![PowerUpKind::BigBullets]);
            }
            previous = now;
        }
    }
}
