//! Ball motion: friction-decayed integration and course-wall bouncing

use glam::Vec3;

use super::obstacle::Obstacle;
use super::state::Ball;
use crate::consts::*;

/// Friction acting on a ball at `pos` this frame
///
/// Ponds override the default while the ball is over them; nothing is
/// persisted, so leaving the pond restores normal friction next frame.
pub fn friction_at(pos: Vec3, obstacles: &[Obstacle]) -> f32 {
    let in_water = obstacles.iter().any(|o| match o {
        Obstacle::Water(pond) => pond.contains(pos),
        _ => false,
    });
    if in_water { WATER_FRICTION } else { FRICTION }
}

/// Reduce speed linearly by `friction * dt`, keeping direction
///
/// Never overshoots: speed bottoms out at exactly zero.
#[inline]
pub fn decay_velocity(vel: Vec3, friction: f32, dt: f32) -> Vec3 {
    let speed = vel.length();
    if speed <= 0.0 {
        return Vec3::ZERO;
    }
    let new_speed = (speed - friction * dt).max(0.0);
    vel * (new_speed / speed)
}

/// Advance ball velocity and position by one frame
///
/// Returns false if the ball was at rest and nothing moved.
pub fn integrate(ball: &mut Ball, dt: f32, friction: f32) -> bool {
    if ball.vel.length_squared() < STATIONARY_EPSILON {
        ball.vel = Vec3::ZERO;
        return false;
    }
    ball.vel = decay_velocity(ball.vel, friction, dt);
    ball.pos += ball.vel * dt;
    true
}

/// Clamp each axis to `[-limit, limit]`, bouncing that axis on contact
///
/// Axes are handled independently so a corner hit bounces on both.
/// Returns true if any wall was hit.
pub fn bounce_off_bounds(ball: &mut Ball, limit: f32) -> bool {
    let mut bounced = false;
    for axis in 0..3 {
        let p = ball.pos[axis];
        if p > limit || p < -limit {
            ball.pos[axis] = p.clamp(-limit, limit);
            ball.vel[axis] = -ball.vel[axis] * WALL_RESTITUTION;
            bounced = true;
        }
    }
    bounced
}
