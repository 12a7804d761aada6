//! Mini-golf simulation module
//!
//! All gameplay physics lives here. This module is pure and single-owner:
//! - One `tick` per rendered frame, driven by the frame delta
//! - Seeded RNG only (confetti)
//! - No rendering, audio or platform dependencies

pub mod aim;
pub mod collision;
pub mod motion;
pub mod obstacle;
pub mod particles;
pub mod sink;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use aim::{AimState, shot_velocity};
pub use collision::{CollisionReport, reflect_velocity, resolve_obstacles};
pub use motion::{bounce_off_bounds, decay_velocity, friction_at, integrate};
pub use obstacle::{Aabb, MovingBlock, Obstacle, OscillationAxis, Ramp, RotatingPlank, StaticBox, Water};
pub use particles::{ConfettiPool, Particle};
pub use sink::{HoleState, SinkSequence, SinkStep};
pub use state::{Ball, GameEvent, GameState};
pub use tick::{TickInput, tick};
pub use trajectory::preview;
