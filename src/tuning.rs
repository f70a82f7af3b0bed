//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`Tuning`]. The defaults are the
//! shipped balance; a JSON file may override any subset of sections.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning bundle
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tier table `{0}` must contain at least one tier")]
    EmptyTierTable(&'static str),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// One row of a wave-keyed tier table. `max_wave: None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier<T> {
    #[serde(default)]
    pub max_wave: Option<u32>,
    pub value: T,
}

impl<T> Tier<T> {
    pub fn upto(max_wave: u32, value: T) -> Self {
        Self {
            max_wave: Some(max_wave),
            value,
        }
    }

    pub fn rest(value: T) -> Self {
        Self {
            max_wave: None,
            value,
        }
    }

    fn matches(&self, wave: u32) -> bool {
        self.max_wave.is_none_or(|max| wave <= max)
    }
}

/// Ordered first-match-wins table keyed by wave number.
///
/// Never empty, so [`TierTable::lookup`] is total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier<T>>", into = "Vec<Tier<T>>")]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct TierTable<T> {
    tiers: Vec<Tier<T>>,
}

impl<T> TierTable<T> {
    pub fn new(tiers: Vec<Tier<T>>) -> Result<Self, TuningError> {
        if tiers.is_empty() {
            return Err(TuningError::EmptyTierTable("tiers"));
        }
        Ok(Self { tiers })
    }

    /// First tier whose `max_wave` covers `wave`; falls back to the first tier
    /// when every threshold is below `wave`.
    pub fn lookup(&self, wave: u32) -> &T {
        match self.tiers.iter().find(|tier| tier.matches(wave)) {
            Some(tier) => &tier.value,
            None => {
                log::debug!("wave {} past every tier threshold, using first tier", wave);
                &self.tiers[0].value
            }
        }
    }

    /// Whether the last tier is unbounded (lookups never hit the fallback)
    pub fn is_open_ended(&self) -> bool {
        self.tiers.last().is_some_and(|tier| tier.max_wave.is_none())
    }
}

impl<T> TryFrom<Vec<Tier<T>>> for TierTable<T> {
    type Error = TuningError;

    fn try_from(tiers: Vec<Tier<T>>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl<T> From<TierTable<T>> for Vec<Tier<T>> {
    fn from(table: TierTable<T>) -> Self {
        table.tiers
    }
}

/// An axis-aligned rectangle described by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Play field dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub width: f32,
    pub height: f32,
    /// Entities further than this outside the field are culled
    pub cull_margin: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            cull_margin: 50.0,
        }
    }
}

/// Lane layout: central enemy corridor flanked by two bonus corridors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorTuning {
    pub enemy_min_x: f32,
    pub enemy_max_x: f32,
    pub left_bonus_min_x: f32,
    pub left_bonus_max_x: f32,
    pub right_bonus_min_x: f32,
    pub right_bonus_max_x: f32,
    /// Y at which every spawned entity enters the field
    pub spawn_y: f32,
    pub passage_y: f32,
    pub passage_height: f32,
}

impl Default for CorridorTuning {
    fn default() -> Self {
        Self {
            enemy_min_x: 180.0,
            enemy_max_x: 620.0,
            left_bonus_min_x: 60.0,
            left_bonus_max_x: 120.0,
            right_bonus_min_x: 680.0,
            right_bonus_max_x: 740.0,
            spawn_y: 50.0,
            passage_y: 445.0,
            passage_height: 50.0,
        }
    }
}

/// Barrier walls separating the corridors. Default topology: two flanking
/// walls (x = 150 and x = 650), each split around the passage band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierTuning {
    pub walls: Vec<RectSpec>,
    /// Distance from the passage at which a blocked chaser starts sliding
    pub funnel_band: f32,
    /// Horizontal slide speed toward the opening (px/s)
    pub funnel_speed: f32,
}

impl Default for BarrierTuning {
    fn default() -> Self {
        let wall = |x: f32, top: f32, bottom: f32| RectSpec {
            x,
            y: (top + bottom) / 2.0,
            width: 15.0,
            height: bottom - top,
        };
        Self {
            walls: vec![
                wall(150.0, 0.0, 420.0),
                wall(150.0, 470.0, 600.0),
                wall(650.0, 0.0, 420.0),
                wall(650.0, 470.0, 600.0),
            ],
            funnel_band: 100.0,
            funnel_speed: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (px/s)
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    /// Bullets leave this far above the shooter's center
    pub muzzle_offset: f32,
    pub color: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_x: 250.0,
            start_y: 445.0,
            width: 40.0,
            height: 50.0,
            speed: 480.0,
            min_x: 60.0,
            max_x: 740.0,
            muzzle_offset: 30.0,
            color: 0x0088ff,
        }
    }
}

/// Army resource and its time-based cap growth
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmyTuning {
    pub starting: u32,
    pub base_cap: u32,
    pub cap_increase: u32,
    pub cap_interval_ms: f32,
}

impl Default for ArmyTuning {
    fn default() -> Self {
        Self {
            starting: 1,
            base_cap: 99,
            cap_increase: 25,
            cap_interval_ms: 60_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub base_speed: f32,
    pub chase_speed: f32,
    pub hp: f32,
    pub hp_per_wave: f32,
    pub speed_per_wave: f32,
    pub points: u64,
    pub color: u32,
    pub hit_flash_ms: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 45.0,
            base_speed: 100.0,
            chase_speed: 80.0,
            hp: 2.0,
            hp_per_wave: 1.0,
            speed_per_wave: 2.0,
            points: 10,
            color: 0xff0000,
            hit_flash_ms: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub width: f32,
    pub height: f32,
    pub base_speed: f32,
    pub chase_speed: f32,
    pub hp: f32,
    pub hp_per_boss: f32,
    pub speed_per_boss: f32,
    pub damage: u32,
    pub damage_per_boss: u32,
    pub size_per_boss: f32,
    pub points: u64,
    pub points_per_boss: u64,
    /// A boss replaces the regular horde on waves divisible by this
    pub spawn_interval: u32,
    /// Delay between the wave firing and the boss entering
    pub announce_delay_ms: f32,
    pub explosion_radius: f32,
    pub explosion_damage: f32,
    pub color: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 90.0,
            base_speed: 50.0,
            chase_speed: 40.0,
            hp: 100.0,
            hp_per_boss: 75.0,
            speed_per_boss: 8.0,
            damage: 5,
            damage_per_boss: 2,
            size_per_boss: 10.0,
            points: 500,
            points_per_boss: 200,
            spawn_interval: 10,
            announce_delay_ms: 500.0,
            explosion_radius: 150.0,
            explosion_damage: 10.0,
            color: 0xff6600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub width: f32,
    pub height: f32,
    /// Speed magnitude (px/s); bullets travel toward -Y
    pub speed: f32,
    pub base_fire_rate_ms: f32,
    pub fire_rate_decrease_per_army: f32,
    pub min_fire_rate_ms: f32,
    pub base_damage: f32,
    pub damage_per_army: f32,
    /// Size growth per point of damage above 1, capped at `max_damage_scale`
    pub damage_size_scale: f32,
    pub max_damage_scale: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 20.0,
            speed: 400.0,
            base_fire_rate_ms: 250.0,
            fire_rate_decrease_per_army: 10.0,
            min_fire_rate_ms: 50.0,
            base_damage: 2.0,
            damage_per_army: 0.3,
            damage_size_scale: 0.1,
            max_damage_scale: 2.0,
        }
    }
}

/// Reward carried by a bonus pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusReward {
    pub amount: u32,
    #[serde(default)]
    pub is_multiplier: bool,
    pub color: u32,
    pub label: String,
}

impl BonusReward {
    pub fn add(amount: u32, color: u32) -> Self {
        Self {
            amount,
            is_multiplier: false,
            color,
            label: format!("+{amount}"),
        }
    }

    pub fn multiply(amount: u32, color: u32) -> Self {
        Self {
            amount,
            is_multiplier: true,
            color,
            label: format!("x{amount}"),
        }
    }
}

/// Which way a wave-driven probability moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
}

/// Probability curve `base ± wave × step`, clamped at `limit`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChanceCurve {
    pub base: f32,
    pub step: f32,
    pub limit: f32,
    pub trend: Trend,
}

impl ChanceCurve {
    pub fn at(&self, wave: u32) -> f32 {
        let delta = wave as f32 * self.step;
        let p = match self.trend {
            Trend::Rising => (self.base + delta).min(self.limit),
            Trend::Falling => (self.base - delta).max(self.limit),
        };
        p.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusTuning {
    pub radius: f32,
    /// Fall speed (px/s)
    pub speed: f32,
    /// Score per army point actually gained
    pub score_per_army: u64,
    pub tiers: TierTable<BonusReward>,
    pub spawn_chance: ChanceCurve,
}

impl Default for BonusTuning {
    fn default() -> Self {
        Self {
            radius: 22.0,
            speed: 80.0,
            score_per_army: 15,
            tiers: TierTable {
                tiers: vec![
                    Tier::upto(5, BonusReward::add(1, 0x00ff00)),
                    Tier::upto(10, BonusReward::add(2, 0x00ff88)),
                    Tier::upto(15, BonusReward::add(3, 0x00ffcc)),
                    Tier::upto(25, BonusReward::add(5, 0x00ffff)),
                    Tier::rest(BonusReward::multiply(2, 0xffff00)),
                ],
            },
            spawn_chance: ChanceCurve {
                base: 0.80,
                step: 0.02,
                limit: 0.15,
                trend: Trend::Falling,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub radius: f32,
    pub speed: f32,
    pub duration_ms: f32,
    /// Duration granted by a jackpot to types that were not already running
    pub jackpot_duration_ms: f32,
    pub spawn_chance: ChanceCurve,
    /// Chance that a spawned power-up is replaced by a jackpot
    pub jackpot_chance: f32,
    /// Names of the kinds that may drop; unknown names fall back to the default kind
    pub spawn_pool: Vec<String>,
    pub triple_shot_spread_deg: f32,
    pub big_bullet_size_multiplier: f32,
    pub big_bullet_damage_multiplier: f32,
    pub shield_radius: f32,
    pub clone_offset_x: f32,
    pub speed_boost_multiplier: f32,
    pub rapid_fire_multiplier: f32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            radius: 22.0,
            speed: 80.0,
            duration_ms: 15_000.0,
            jackpot_duration_ms: 25_000.0,
            spawn_chance: ChanceCurve {
                base: 0.04,
                step: 0.01,
                limit: 0.20,
                trend: Trend::Rising,
            },
            jackpot_chance: 0.05,
            spawn_pool: [
                "triple_shot",
                "big_bullets",
                "shield_trap",
                "clone",
                "speed_boost",
                "rapid_fire",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            triple_shot_spread_deg: 15.0,
            big_bullet_size_multiplier: 2.5,
            big_bullet_damage_multiplier: 1.5,
            shield_radius: 35.0,
            clone_offset_x: 60.0,
            speed_boost_multiplier: 1.75,
            rapid_fire_multiplier: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub base_interval_ms: f32,
    pub min_interval_ms: f32,
    pub interval_reduction_ms: f32,
    pub enemies_per_wave: TierTable<u32>,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_interval_ms: 4000.0,
            min_interval_ms: 1500.0,
            interval_reduction_ms: 150.0,
            enemies_per_wave: TierTable {
                tiers: vec![
                    Tier::upto(3, 2),
                    Tier::upto(8, 3),
                    Tier::upto(15, 4),
                    Tier::upto(25, 6),
                    Tier::rest(8),
                ],
            },
        }
    }
}

/// A scripted enemy group queued at scene start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningHorde {
    pub at_ms: f32,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Delay between consecutive enemies of one horde
    pub enemy_spacing_ms: f32,
    pub bonus_delay_ms: f32,
    pub powerup_delay_ms: f32,
    pub opening_hordes: Vec<OpeningHorde>,
    pub opening_bonuses_ms: Vec<f32>,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            enemy_spacing_ms: 400.0,
            bonus_delay_ms: 1200.0,
            powerup_delay_ms: 2000.0,
            opening_hordes: vec![
                OpeningHorde {
                    at_ms: 100.0,
                    count: 2,
                },
                OpeningHorde {
                    at_ms: 3000.0,
                    count: 2,
                },
                OpeningHorde {
                    at_ms: 6000.0,
                    count: 3,
                },
            ],
            opening_bonuses_ms: vec![2000.0, 5000.0],
        }
    }
}

/// Scrolling starfield behind the corridor (cosmetic only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundTuning {
    pub star_count: usize,
    /// Fall speed range (px/s)
    pub min_star_speed: f32,
    pub max_star_speed: f32,
    pub star_radius: f32,
    pub star_color: u32,
}

impl Default for BackgroundTuning {
    fn default() -> Self {
        Self {
            star_count: 30,
            min_star_speed: 30.0,
            max_star_speed: 100.0,
            star_radius: 2.0,
            star_color: 0xffffff,
        }
    }
}

/// The complete immutable balance bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field: FieldTuning,
    pub corridor: CorridorTuning,
    pub barrier: BarrierTuning,
    pub player: PlayerTuning,
    pub army: ArmyTuning,
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub bullet: BulletTuning,
    pub bonus: BonusTuning,
    pub powerup: PowerUpTuning,
    pub waves: WaveTuning,
    pub spawn: SpawnTuning,
    pub background: BackgroundTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON bundle and validate it
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON bundle from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject bundles that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.field.width <= 0.0 || self.field.height <= 0.0 {
            return Err(invalid("field", "width and height must be positive"));
        }
        if self.player.min_x > self.player.max_x {
            return Err(invalid("player.min_x", "must not exceed player.max_x"));
        }
        if self.corridor.enemy_min_x > self.corridor.enemy_max_x {
            return Err(invalid("corridor.enemy_min_x", "must not exceed enemy_max_x"));
        }
        if self.corridor.left_bonus_min_x > self.corridor.left_bonus_max_x
            || self.corridor.right_bonus_min_x > self.corridor.right_bonus_max_x
        {
            return Err(invalid("corridor", "bonus corridor min must not exceed max"));
        }
        if self.bullet.min_fire_rate_ms <= 0.0
            || self.bullet.min_fire_rate_ms > self.bullet.base_fire_rate_ms
        {
            return Err(invalid(
                "bullet.min_fire_rate_ms",
                "must be positive and at most base_fire_rate_ms",
            ));
        }
        if self.waves.min_interval_ms <= 0.0
            || self.waves.min_interval_ms > self.waves.base_interval_ms
        {
            return Err(invalid(
                "waves.min_interval_ms",
                "must be positive and at most base_interval_ms",
            ));
        }
        if self.boss.spawn_interval == 0 {
            return Err(invalid("boss.spawn_interval", "must be at least 1"));
        }
        let rapid = self.powerup.rapid_fire_multiplier;
        if !(rapid > 0.0 && rapid < 1.0) {
            return Err(invalid("powerup.rapid_fire_multiplier", "must lie in (0, 1)"));
        }
        if self.powerup.speed_boost_multiplier <= 1.0 {
            return Err(invalid("powerup.speed_boost_multiplier", "must exceed 1"));
        }
        if self.powerup.duration_ms <= 0.0 || self.powerup.jackpot_duration_ms <= 0.0 {
            return Err(invalid("powerup.duration_ms", "durations must be positive"));
        }
        if self.army.starting == 0 || self.army.starting > self.army.base_cap {
            return Err(invalid("army.starting", "must be within (0, base_cap]"));
        }
        if self.army.cap_interval_ms <= 0.0 {
            return Err(invalid("army.cap_interval_ms", "must be positive"));
        }
        if self.background.min_star_speed > self.background.max_star_speed {
            return Err(invalid(
                "background.min_star_speed",
                "must not exceed max_star_speed",
            ));
        }
        if !self.waves.enemies_per_wave.is_open_ended() {
            log::warn!("enemies_per_wave has no open-ended tier; late waves reuse the first tier");
        }
        if !self.bonus.tiers.is_open_ended() {
            log::warn!("bonus tiers have no open-ended tier; late waves reuse the first tier");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_tier_lookup_first_match_wins() {
        let table = TierTable::new(vec![Tier::upto(3, 'a'), Tier::upto(8, 'b'), Tier::rest('c')])
            .unwrap();
        assert_eq!(*table.lookup(1), 'a');
        assert_eq!(*table.lookup(3), 'a');
        assert_eq!(*table.lookup(4), 'b');
        assert_eq!(*table.lookup(9), 'c');
        assert_eq!(*table.lookup(u32::MAX), 'c');
    }

    #[test]
    fn test_bounded_table_falls_back_to_first_tier() {
        let table = TierTable::new(vec![Tier::upto(3, 10), Tier::upto(8, 20)]).unwrap();
        assert!(!table.is_open_ended());
        assert_eq!(*table.lookup(50), 10);
    }

    #[test]
    fn test_empty_tier_table_rejected() {
        let json = r#"{ "waves": { "enemies_per_wave": [] } }"#;
        assert!(matches!(
            Tuning::from_json_str(json),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            TierTable::<u32>::new(Vec::new()),
            Err(TuningError::EmptyTierTable(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "boss": { "spawn_interval": 5 }, "army": { "base_cap": 20 } }"#;
        let tuning = Tuning::from_json_str(json).unwrap();
        assert_eq!(tuning.boss.spawn_interval, 5);
        assert_eq!(tuning.boss.hp, 100.0);
        assert_eq!(tuning.army.base_cap, 20);
        assert_eq!(tuning.army.starting, 1);
        assert_eq!(tuning.field.width, 800.0);
    }

    #[test]
    fn test_tier_table_json_round_trip_shape() {
        let json = r#"{ "waves": { "enemies_per_wave": [
            { "max_wave": 2, "value": 1 },
            { "value": 9 }
        ] } }"#;
        let tuning = Tuning::from_json_str(json).unwrap();
        assert_eq!(*tuning.waves.enemies_per_wave.lookup(2), 1);
        assert_eq!(*tuning.waves.enemies_per_wave.lookup(3), 9);
    }

    #[test]
    fn test_invalid_rapid_fire_rejected() {
        let json = r#"{ "powerup": { "rapid_fire_multiplier": 1.5 } }"#;
        assert!(matches!(
            Tuning::from_json_str(json),
            Err(TuningError::Invalid { field: "powerup.rapid_fire_multiplier", .. })
        ));
    }

    #[test]
    fn test_army_bounds_rejected() {
        let json = r#"{ "army": { "starting": 0 } }"#;
        assert!(matches!(
            Tuning::from_json_str(json),
            Err(TuningError::Invalid { field: "army.starting", .. })
        ));

        let json = r#"{ "army": { "starting": 5, "base_cap": 4 } }"#;
        assert!(matches!(
            Tuning::from_json_str(json),
            Err(TuningError::Invalid { field: "army.starting", .. })
        ));
    }

    #[test]
    fn test_chance_curves() {
        let falling = ChanceCurve {
            base: 0.8,
            step: 0.02,
            limit: 0.15,
            trend: Trend::Falling,
        };
        assert!((falling.at(1) - 0.78).abs() < 1e-5);
        assert_eq!(falling.at(1000), 0.15);

        let rising = ChanceCurve {
            base: 0.04,
            step: 0.01,
            limit: 0.2,
            trend: Trend::Rising,
        };
        assert!((rising.at(1) - 0.05).abs() < 1e-5);
        assert_eq!(rising.at(1000), 0.2);
    }
}
