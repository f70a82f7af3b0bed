//! Collision detection for the corridor field
//!
//! Every box in the simulation uses the same convention: `center` plus
//! `half` extents. Entity positions are always box centers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::{BarrierTuning, CorridorTuning, RectSpec};

/// Axis-aligned bounding box (center + half extents)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Same extents, moved to `center`
    #[inline]
    pub fn at(&self, center: Vec2) -> Self {
        Self {
            center,
            half: self.half,
        }
    }
}

impl From<RectSpec> for Aabb {
    fn from(rect: RectSpec) -> Self {
        Aabb::new(
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.width, rect.height),
        )
    }
}

/// Anything with a collision box
pub trait Collider {
    fn aabb(&self) -> Aabb;
}

impl Collider for Aabb {
    fn aabb(&self) -> Aabb {
        *self
    }
}

/// Strict AABB overlap. Touching edges do not count.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let d = (a.center - b.center).abs();
    let reach = a.half + b.half;
    d.x < reach.x && d.y < reach.y
}

/// Overlap test between two colliders
#[inline]
pub fn collide(a: &impl Collider, b: &impl Collider) -> bool {
    overlaps(&a.aabb(), &b.aabb())
}

/// Barrier walls plus the passage band that lets entities cross them
#[derive(Debug, Clone)]
pub struct Corridor {
    walls: Vec<Aabb>,
    passage_y: f32,
    passage_half_height: f32,
    funnel_band: f32,
    funnel_speed: f32,
}

impl Corridor {
    pub fn new(corridor: &CorridorTuning, barrier: &BarrierTuning) -> Self {
        Self {
            walls: barrier.walls.iter().copied().map(Aabb::from).collect(),
            passage_y: corridor.passage_y,
            passage_half_height: corridor.passage_height / 2.0,
            funnel_band: barrier.funnel_band,
            funnel_speed: barrier.funnel_speed,
        }
    }

    /// True iff `y` lies inside the passage band (inclusive)
    pub fn in_passage(&self, y: f32) -> bool {
        y >= self.passage_y - self.passage_half_height
            && y <= self.passage_y + self.passage_half_height
    }

    /// True iff `bounds` intersects any barrier wall
    pub fn blocked(&self, bounds: &Aabb) -> bool {
        self.walls.iter().any(|wall| overlaps(bounds, wall))
    }

    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    pub fn passage_y(&self) -> f32 {
        self.passage_y
    }

    /// Whether a blocked chaser at `y` is close enough to start sliding toward the opening
    pub fn in_funnel(&self, y: f32) -> bool {
        (y - self.passage_y).abs() < self.funnel_band
    }

    pub fn funnel_speed(&self) -> f32 {
        self.funnel_speed
    }

    /// X of the wall line nearest to `x` (where its opening sits)
    pub fn nearest_opening_x(&self, x: f32) -> Option<f32> {
        self.walls
            .iter()
            .map(|wall| wall.center.x)
            .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()))
    }
}
