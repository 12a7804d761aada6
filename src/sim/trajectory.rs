//! Aim preview: forward-simulate a candidate shot without touching live state

use glam::Vec3;

use super::motion::decay_velocity;
use crate::consts::*;

/// Predicted ball path for a shot from `start` with `velocity`
///
/// Uses default friction everywhere (ponds are not considered). The first
/// point is `start`; at most [`PREVIEW_SAMPLES`] points are returned and the
/// path ends early once the ball would come to rest.
pub fn preview(start: Vec3, velocity: Vec3) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(PREVIEW_SAMPLES);
    let mut pos = start;
    let mut vel = velocity;
    points.push(pos);

    while points.len() < PREVIEW_SAMPLES {
        if vel.length_squared() < STATIONARY_EPSILON {
            break;
        }
        vel = decay_velocity(vel, FRICTION, PREVIEW_DT);
        pos += vel * PREVIEW_DT;
        points.push(pos);
    }

    points
}
