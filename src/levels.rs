//! Course catalogue
//!
//! Each level is an immutable snapshot: course size, hole, tee and obstacles.
//! Levels can also be supplied as JSON.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_RADIUS;
use crate::sim::obstacle::{
    MovingBlock, Obstacle, OscillationAxis, Ramp, RotatingPlank, StaticBox, Water,
};

/// Number of built-in levels
pub const LEVEL_COUNT: u32 = 5;

/// Level snapshot handed to the simulation on load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    pub id: u32,
    /// Course is the square `[-half_extent, half_extent]` on x and z
    pub half_extent: f32,
    /// Hole center on the ground plane
    pub hole: Vec3,
    /// Ball tee position
    pub spawn: Vec3,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl LevelDef {
    /// Parse a level snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Clamp any level number into the built-in range
#[inline]
pub fn clamp_level_id(id: u32) -> u32 {
    id.clamp(1, LEVEL_COUNT)
}

/// Level after `id`, wrapping back to the first
pub fn next_level(id: u32) -> u32 {
    let id = clamp_level_id(id);
    if id >= LEVEL_COUNT { 1 } else { id + 1 }
}

/// Built-in level snapshot (out-of-range ids are clamped)
pub fn level(id: u32) -> LevelDef {
    let id = clamp_level_id(id);
    let tee = |x: f32, z: f32| Vec3::new(x, BALL_RADIUS, z);

    match id {
        // Straight green, one bumper to play around
        1 => LevelDef {
            id,
            half_extent: 6.0,
            hole: Vec3::new(0.0, 0.0, -4.0),
            spawn: tee(0.0, 4.5),
            obstacles: vec![Obstacle::Box(StaticBox::new(
                Vec3::new(-1.5, 0.4, 0.0),
                Vec3::new(1.5, 0.4, 0.25),
            ))],
        },
        // Sliding blocks across the fairway
        2 => LevelDef {
            id,
            half_extent: 7.0,
            hole: Vec3::new(1.5, 0.0, -5.0),
            spawn: tee(-1.5, 5.5),
            obstacles: vec![
                Obstacle::MovingBlock(MovingBlock::new(
                    Vec3::new(0.0, 0.4, 1.0),
                    OscillationAxis::X,
                    2.5,
                    1.6,
                )),
                Obstacle::MovingBlock(MovingBlock::new(
                    Vec3::new(2.5, 0.4, -2.0),
                    OscillationAxis::Z,
                    1.5,
                    2.2,
                )),
                Obstacle::Box(StaticBox::new(Vec3::new(-3.5, 0.4, -2.0), Vec3::new(0.5, 0.4, 2.0))),
            ],
        },
        // Windmill plank guarding the hole
        3 => LevelDef {
            id,
            half_extent: 7.0,
            hole: Vec3::new(0.0, 0.0, -5.0),
            spawn: tee(0.0, 5.5),
            obstacles: vec![
                Obstacle::RotatingPlank(RotatingPlank::new(
                    Vec3::new(0.0, 0.3, -1.0),
                    Vec3::new(2.2, 0.3, 0.2),
                    1.2,
                )),
                Obstacle::Box(StaticBox::new(Vec3::new(-4.0, 0.4, 1.5), Vec3::new(1.5, 0.4, 0.25))),
                Obstacle::Box(StaticBox::new(Vec3::new(4.0, 0.4, 1.5), Vec3::new(1.5, 0.4, 0.25))),
            ],
        },
        // Ramp up to a raised approach, rails either side
        4 => LevelDef {
            id,
            half_extent: 8.0,
            hole: Vec3::new(0.0, 0.0, 5.5),
            spawn: tee(0.0, -6.0),
            obstacles: vec![
                Obstacle::Ramp(Ramp::new(Vec3::new(0.0, 0.0, 0.0), 3.0, 4.0, 0.8)),
                Obstacle::Box(StaticBox::new(Vec3::new(-2.6, 0.4, 0.0), Vec3::new(0.3, 0.4, 2.5))),
                Obstacle::Box(StaticBox::new(Vec3::new(2.6, 0.4, 0.0), Vec3::new(0.3, 0.4, 2.5))),
            ],
        },
        // Pond, windmill and a slider together
        _ => LevelDef {
            id,
            half_extent: 9.0,
            hole: Vec3::new(5.5, 0.0, -6.0),
            spawn: tee(-6.0, 6.5),
            obstacles: vec![
                Obstacle::Water(Water::new(Vec3::new(-2.0, 0.0, 1.0), 2.0)),
                Obstacle::RotatingPlank(RotatingPlank::new(
                    Vec3::new(3.0, 0.3, -2.5),
                    Vec3::new(1.8, 0.3, 0.2),
                    -1.5,
                )),
                Obstacle::MovingBlock(MovingBlock::new(
                    Vec3::new(0.0, 0.4, -5.0),
                    OscillationAxis::X,
                    3.0,
                    1.3,
                )),
                Obstacle::Ramp(Ramp::new(Vec3::new(5.5, 0.0, 2.0), 2.5, 3.0, 0.6)),
                Obstacle::Box(StaticBox::new(Vec3::new(-5.0, 0.4, -3.0), Vec3::new(1.0, 0.4, 1.0))),
            ],
        },
    }
}
