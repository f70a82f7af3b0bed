//! Cosmetic starfield scrolling behind the corridor
//!
//! Stars draw from their own RNG stream so the backdrop never shifts the
//! gameplay sequence for a seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{BackgroundTuning, FieldTuning};

/// Stream selector mixed into the run seed for the starfield RNG
const STAR_STREAM: u64 = 0x5354_4152;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed (px/s)
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
    rng: Pcg32,
}

impl Starfield {
    /// Scatter `star_count` stars over the whole field
    pub fn new(seed: u64, background: &BackgroundTuning, field: &FieldTuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed ^ STAR_STREAM);
        let stars = (0..background.star_count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..=field.width),
                    rng.random_range(0.0..=field.height),
                ),
                speed: rng.random_range(background.min_star_speed..=background.max_star_speed),
            })
            .collect();
        Self { stars, rng }
    }

    /// Scroll every star down; one that falls past the bottom margin re-enters
    /// above the top at a fresh column
    pub fn update(&mut self, dt: f32, field: &FieldTuning) {
        let bottom = field.height + field.cull_margin;
        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > bottom {
                star.pos.y = -field.cull_margin;
                star.pos.x = self.rng.random_range(0.0..=field.width);
            }
        }
    }
}
