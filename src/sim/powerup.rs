//! Power-up kinds and their activation timers
//!
//! Each timed kind owns one `{active, timer_ms}` slot. Activation, countdown
//! and expiry are data-driven over [`PowerUpKind::TIMED`]; the effects of each
//! kind are applied by the tick and resolver, which query this table.

use serde::{Deserialize, Serialize};

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    TripleShot,
    BigBullets,
    ShieldTrap,
    Clone,
    SpeedBoost,
    RapidFire,
    /// Rare drop that activates every timed kind at once
    Jackpot,
}

/// Static display data for a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: u32,
}

impl PowerUpKind {
    /// Kinds that hold a timer slot, in slot order
    pub const TIMED: [PowerUpKind; 6] = [
        PowerUpKind::TripleShot,
        PowerUpKind::BigBullets,
        PowerUpKind::ShieldTrap,
        PowerUpKind::Clone,
        PowerUpKind::SpeedBoost,
        PowerUpKind::RapidFire,
    ];

    /// Used when data names a kind that does not exist
    pub const FALLBACK: PowerUpKind = PowerUpKind::TripleShot;

    pub fn info(self) -> PowerUpInfo {
        match self {
            PowerUpKind::TripleShot => PowerUpInfo {
                name: "TRIPLE SHOT",
                icon: "3X",
                color: 0xff00ff,
            },
            PowerUpKind::BigBullets => PowerUpInfo {
                name: "BIG BULLETS",
                icon: "BIG",
                color: 0x00ffff,
            },
            PowerUpKind::ShieldTrap => PowerUpInfo {
                name: "SHIELD TRAP",
                icon: "SHIELD",
                color: 0xffaa00,
            },
            PowerUpKind::Clone => PowerUpInfo {
                name: "CLONE",
                icon: "CLONE",
                color: 0x00ff88,
            },
            PowerUpKind::SpeedBoost => PowerUpInfo {
                name: "SPEED BOOST",
                icon: "SPEED",
                color: 0xffff00,
            },
            PowerUpKind::RapidFire => PowerUpInfo {
                name: "RAPID FIRE",
                icon: "RAPID",
                color: 0xff0000,
            },
            PowerUpKind::Jackpot => PowerUpInfo {
                name: "JACKPOT",
                icon: "$$$",
                color: 0xffd700,
            },
        }
    }

    /// Parse a data name (`"triple_shot"`, `"RAPID_FIRE"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "triple_shot" => Some(PowerUpKind::TripleShot),
            "big_bullets" => Some(PowerUpKind::BigBullets),
            "shield_trap" => Some(PowerUpKind::ShieldTrap),
            "clone" => Some(PowerUpKind::Clone),
            "speed_boost" => Some(PowerUpKind::SpeedBoost),
            "rapid_fire" => Some(PowerUpKind::RapidFire),
            "jackpot" => Some(PowerUpKind::Jackpot),
            _ => None,
        }
    }

    /// Like [`PowerUpKind::from_name`], but unknown names map to [`PowerUpKind::FALLBACK`]
    pub fn from_name_or_fallback(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!(
                "unknown power-up `{}`, using {:?}",
                name,
                PowerUpKind::FALLBACK
            );
            PowerUpKind::FALLBACK
        })
    }

    fn slot(self) -> Option<usize> {
        PowerUpKind::TIMED.iter().position(|&kind| kind == self)
    }
}

/// One timer slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSlot {
    pub active: bool,
    /// Remaining time (ms), never negative
    pub timer_ms: f32,
}

/// Timer state for every timed kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    slots: [PowerUpSlot; 6],
}

impl PowerUpTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, kind: PowerUpKind) -> PowerUpSlot {
        kind.slot().map(|i| self.slots[i]).unwrap_or_default()
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.slot(kind).active
    }

    pub fn remaining_ms(&self, kind: PowerUpKind) -> f32 {
        self.slot(kind).timer_ms
    }

    /// Start (or restart) a timed kind. Jackpot has no slot and is ignored here.
    pub fn activate(&mut self, kind: PowerUpKind, duration_ms: f32) {
        if let Some(i) = kind.slot() {
            self.slots[i] = PowerUpSlot {
                active: true,
                timer_ms: duration_ms.max(0.0),
            };
        }
    }

    /// Activate every timed kind. Kinds that were idle get `jackpot_ms`,
    /// kinds already running restart at the standard `duration_ms`.
    /// Returns the kinds in slot order.
    pub fn activate_jackpot(&mut self, duration_ms: f32, jackpot_ms: f32) -> [PowerUpKind; 6] {
        for kind in PowerUpKind::TIMED {
            let duration = if self.is_active(kind) {
                duration_ms
            } else {
                jackpot_ms
            };
            self.activate(kind, duration);
        }
        PowerUpKind::TIMED
    }

    /// Stop a kind immediately. Returns whether it was running.
    pub fn deactivate(&mut self, kind: PowerUpKind) -> bool {
        match kind.slot() {
            Some(i) => {
                let was_active = self.slots[i].active;
                self.slots[i] = PowerUpSlot::default();
                was_active
            }
            None => false,
        }
    }

    /// Count every active timer down by `dt_ms`. A timer that reaches zero
    /// deactivates in the same call; those kinds are returned so the caller
    /// can run their teardown.
    pub fn tick(&mut self, dt_ms: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for (slot, kind) in self.slots.iter_mut().zip(PowerUpKind::TIMED) {
            if !slot.active {
                continue;
            }
            slot.timer_ms = (slot.timer_ms - dt_ms.max(0.0)).max(0.0);
            if slot.timer_ms <= 0.0 {
                slot.active = false;
                slot.timer_ms = 0.0;
                expired.push(kind);
            }
        }
        expired
    }

    /// Active kinds with their remaining time, in slot order
    pub fn active(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        PowerUpKind::TIMED
            .into_iter()
            .zip(self.slots.iter())
            .filter(|(_, slot)| slot.active)
            .map(|(kind, slot)| (kind, slot.timer_ms))
    }

    /// Triple Shot and Big Bullets running together
    pub fn combo(&self) -> bool {
        self.is_active(PowerUpKind::TripleShot) && self.is_active(PowerUpKind::BigBullets)
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}
