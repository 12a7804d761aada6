//! Putt Physics - ball, obstacle and hole simulation for a mini-golf game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (motion, collisions, hole sink, confetti)
//! - `levels`: Built-in course snapshots and JSON level loading
//! - `settings`: Player preferences (audio, effects)
//! - `audio`/`web`: Browser bindings (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod levels;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use levels::LevelDef;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the step (tab switches, hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.3;
    /// Below this |v|² the ball counts as stationary
    pub const STATIONARY_EPSILON: f32 = 1e-4;

    /// Linear speed decay (units/s²)
    pub const FRICTION: f32 = 1.5;
    /// Friction while the ball is inside a pond
    pub const WATER_FRICTION: f32 = 4.0;
    /// Velocity kept (and negated) on a course-wall bounce
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Static box: inelastic bounce and anti-stick nudge
    pub const BOX_RESTITUTION: f32 = 0.7;
    pub const BOX_NUDGE: f32 = 0.04;

    /// Moving block: proximity radius added to the ball radius
    pub const BLOCK_REACH: f32 = 0.6;
    /// Impulse added to the ball on block contact
    pub const BLOCK_IMPULSE: f32 = 5.0;
    /// Cosmetic recoil of the block itself
    pub const BLOCK_RECOIL: f32 = 0.04;

    /// Rotating plank contact
    pub const PLANK_CONTACT_SLOP: f32 = 0.02;
    pub const PLANK_RESTITUTION: f32 = 0.75;
    pub const PLANK_NUDGE: f32 = 0.03;

    /// Ramp footprint margin on each axis
    pub const RAMP_MARGIN: f32 = 0.6;
    /// Vertical velocity kept while riding a ramp
    pub const RAMP_VERTICAL_DAMPING: f32 = 0.2;

    /// Hole
    pub const HOLE_RADIUS: f32 = 0.45;
    /// How far below the hole center the ball ends up
    pub const SINK_DEPTH: f32 = 0.25;
    /// Sink animation length (seconds)
    pub const SINK_DURATION: f32 = 1.2;
    /// Ball scale at the end of the sink
    pub const SINK_MIN_SCALE: f32 = 0.3;

    /// Aim gesture
    pub const MAX_DRAG: f32 = 6.0;
    pub const SHOT_POWER: f32 = 5.0;

    /// Trajectory preview
    pub const PREVIEW_SAMPLES: usize = 40;
    pub const PREVIEW_DT: f32 = 0.05;

    /// Confetti
    pub const CONFETTI_CAPACITY: usize = 160;
    pub const CONFETTI_BURST: usize = 120;
    pub const CONFETTI_GRAVITY: f32 = 9.8;
    /// Particles below this height are retired
    pub const CONFETTI_FLOOR: f32 = -0.5;
    pub const CONFETTI_MIN_LIFE: f32 = 1.0;
    pub const CONFETTI_MAX_LIFE: f32 = 2.0;
}

/// Project a vector onto the ground plane (drop the vertical component)
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal direction from `from` to `to`, +X when the two points coincide
#[inline]
pub fn ground_direction(from: Vec3, to: Vec3) -> Vec3 {
    let dir = horizontal(to - from).normalize_or_zero();
    if dir == Vec3::ZERO { Vec3::X } else { dir }
}

/// Cubic smoothstep easing `t²(3 - 2t)` on a clamped `t`
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
