//! Course obstacles
//!
//! Obstacles are pure data created once per level load. Only the moving block
//! and rotating plank change over time, and both derive their transform from
//! simulation time so they never drift.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::horizontal;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Closest point on (or in) the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    /// Distance from `p` to the box surface (0 when inside)
    #[inline]
    pub fn distance_to(&self, p: Vec3) -> f32 {
        (p - self.closest_point(p)).length()
    }
}

/// Axis a moving block slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillationAxis {
    #[default]
    X,
    Z,
}

/// Immovable box (walls, bumpers)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl StaticBox {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }
}

/// Block sliding back and forth along one axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingBlock {
    pub base: Vec3,
    pub axis: OscillationAxis,
    pub amplitude: f32,
    /// Radians per second of the oscillation phase
    pub angular_speed: f32,
    /// Current position, rewritten from `base` and time every frame
    #[serde(skip)]
    pub position: Vec3,
}

impl MovingBlock {
    pub fn new(base: Vec3, axis: OscillationAxis, amplitude: f32, angular_speed: f32) -> Self {
        let mut block = Self {
            base,
            axis,
            amplitude,
            angular_speed,
            position: base,
        };
        block.position = block.position_at(0.0);
        block
    }

    /// Authoritative position for a given simulation time
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let phase = elapsed * self.angular_speed;
        match self.axis {
            OscillationAxis::X => self.base + Vec3::X * phase.sin() * self.amplitude,
            OscillationAxis::Z => self.base + Vec3::Z * phase.cos() * self.amplitude,
        }
    }
}

/// Plank spinning about the vertical axis through its center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatingPlank {
    pub center: Vec3,
    /// Half extents in the plank's local frame (yaw = 0)
    pub half_extents: Vec3,
    /// Radians per second
    pub angular_speed: f32,
    /// Accumulated yaw (unbounded)
    #[serde(default)]
    pub yaw: f32,
    /// World-space bounds of the rotated plank, refreshed on rotation
    #[serde(skip)]
    pub bounds: Aabb,
}

impl RotatingPlank {
    pub fn new(center: Vec3, half_extents: Vec3, angular_speed: f32) -> Self {
        let mut plank = Self {
            center,
            half_extents,
            angular_speed,
            yaw: 0.0,
            bounds: Aabb::default(),
        };
        plank.refresh_bounds();
        plank
    }

    pub fn rotate(&mut self, dt: f32) {
        self.yaw += self.angular_speed * dt;
        self.refresh_bounds();
    }

    /// Recompute the world AABB enclosing the plank at its current yaw
    pub fn refresh_bounds(&mut self) {
        let (sin, cos) = self.yaw.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let he = self.half_extents.abs();
        let extent = Vec3::new(cos * he.x + sin * he.z, he.y, sin * he.x + cos * he.z);
        self.bounds = Aabb::from_center_half_extents(self.center, extent);
    }
}

/// Incline rising along +Z across its footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ramp {
    pub center: Vec3,
    pub width: f32,
    pub depth: f32,
    pub max_height: f32,
}

impl Ramp {
    pub fn new(center: Vec3, width: f32, depth: f32, max_height: f32) -> Self {
        Self {
            center,
            width,
            depth,
            max_height,
        }
    }

    /// Normalized climb fraction `t ∈ [0, 1]` if `p` is over the footprint
    /// (including the margin), `None` otherwise
    pub fn climb_fraction(&self, p: Vec3, margin: f32) -> Option<f32> {
        let local = p - self.center;
        let half_w = self.width * 0.5 + margin;
        let half_d = self.depth * 0.5 + margin;
        if local.x.abs() > half_w || local.z.abs() > half_d {
            return None;
        }
        if self.depth <= 0.0 {
            return Some(0.0);
        }
        Some(((local.z + self.depth * 0.5) / self.depth).clamp(0.0, 1.0))
    }
}

/// Circular pond that slows the ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Water {
    pub center: Vec3,
    pub radius: f32,
}

impl Water {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Horizontal containment test; height is ignored
    pub fn contains(&self, p: Vec3) -> bool {
        horizontal(p - self.center).length_squared() < self.radius * self.radius
    }
}

/// One obstacle of the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Obstacle {
    Box(StaticBox),
    MovingBlock(MovingBlock),
    RotatingPlank(RotatingPlank),
    Ramp(Ramp),
    Water(Water),
}

impl Obstacle {
    /// Advance time-driven transforms. Runs every frame, whatever the ball does.
    pub fn animate(&mut self, elapsed: f32, dt: f32) {
        match self {
            Obstacle::MovingBlock(block) => block.position = block.position_at(elapsed),
            Obstacle::RotatingPlank(plank) => plank.rotate(dt),
            Obstacle::Box(_) | Obstacle::Ramp(_) | Obstacle::Water(_) => {}
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Obstacle::Box(_) => "box",
            Obstacle::MovingBlock(_) => "moving_block",
            Obstacle::RotatingPlank(_) => "rotating_plank",
            Obstacle::Ramp(_) => "ramp",
            Obstacle::Water(_) => "water",
        }
    }
}
