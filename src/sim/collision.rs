//! Ball-vs-obstacle contact resolution
//!
//! Arcade heuristics rather than constraint physics: on contact the ball's
//! velocity is modified and its position nudged out. Obstacles are resolved
//! independently, so simultaneous overlaps can compound corrections.

use glam::Vec3;

use super::obstacle::{Aabb, MovingBlock, Obstacle, Ramp, RotatingPlank, StaticBox};
use super::state::Ball;
use crate::consts::*;
use crate::ground_direction;

/// Summary of one frame of obstacle resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Solid contacts (box, block, plank)
    pub hits: u32,
    /// Ball is riding a ramp surface
    pub on_ramp: bool,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Shared bounce against an AABB: reflect, damp, push out horizontally
fn bounce_off_aabb(
    ball: &mut Ball,
    bounds: &Aabb,
    center: Vec3,
    threshold: f32,
    restitution: f32,
    nudge: f32,
) -> bool {
    if bounds.distance_to(ball.pos) >= threshold {
        return false;
    }

    let normal = ground_direction(center, ball.pos);
    ball.vel = reflect_velocity(ball.vel, normal) * restitution;
    ball.pos += normal * nudge;
    true
}

/// Static box: inelastic bounce
pub fn resolve_box(ball: &mut Ball, obstacle: &StaticBox) -> bool {
    bounce_off_aabb(
        ball,
        &obstacle.bounds(),
        obstacle.center,
        ball.radius,
        BOX_RESTITUTION,
        BOX_NUDGE,
    )
}

/// Moving block: additive shove away from the block
///
/// The block recoils a little for show; its next animation step restores the
/// time-derived position.
pub fn resolve_moving_block(ball: &mut Ball, block: &mut MovingBlock) -> bool {
    let reach = ball.radius + BLOCK_REACH;
    if ball.pos.distance_squared(block.position) >= reach * reach {
        return false;
    }

    let dir = ground_direction(block.position, ball.pos);
    ball.vel += dir * BLOCK_IMPULSE;
    block.position -= dir * BLOCK_RECOIL;
    true
}

/// Rotating plank: bounce off its current world bounds
pub fn resolve_plank(ball: &mut Ball, plank: &RotatingPlank) -> bool {
    bounce_off_aabb(
        ball,
        &plank.bounds,
        plank.center,
        ball.radius + PLANK_CONTACT_SLOP,
        PLANK_RESTITUTION,
        PLANK_NUDGE,
    )
}

/// Ramp: place the ball on the surface and damp vertical motion
pub fn resolve_ramp(ball: &mut Ball, ramp: &Ramp) -> bool {
    let Some(t) = ramp.climb_fraction(ball.pos, RAMP_MARGIN) else {
        return false;
    };
    ball.pos.y = ball.radius + ramp.max_height * t;
    ball.vel.y *= RAMP_VERTICAL_DAMPING;
    true
}

/// Resolve the ball against every obstacle of the level
pub fn resolve_obstacles(ball: &mut Ball, obstacles: &mut [Obstacle]) -> CollisionReport {
    let mut report = CollisionReport::default();
    for obstacle in obstacles.iter_mut() {
        let hit = match obstacle {
            Obstacle::Box(b) => resolve_box(ball, b),
            Obstacle::MovingBlock(block) => resolve_moving_block(ball, block),
            Obstacle::RotatingPlank(plank) => resolve_plank(ball, plank),
            Obstacle::Ramp(ramp) => {
                report.on_ramp |= resolve_ramp(ball, ramp);
                false
            }
            // Ponds only change friction
            Obstacle::Water(_) => false,
        };
        if hit {
            log::trace!("Ball contact with {} at {:?}", obstacle.name(), ball.pos);
            report.hits += 1;
        }
    }
    report
}
