//! Aim gesture: pointer down, drag, release
//!
//! The player pulls back from the ball; the shot goes the opposite way with
//! strength proportional to the (clamped) drag length.

use glam::Vec3;

use crate::consts::*;
use crate::horizontal;

/// Pointer gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AimState {
    #[default]
    Idle,
    /// Dragging. Positions are world-space points on the ground plane.
    Aiming { anchor: Vec3, current: Vec3 },
}

/// Initial ball velocity for a drag from `anchor` to `release`
pub fn shot_velocity(anchor: Vec3, release: Vec3) -> Vec3 {
    horizontal(anchor - release).clamp_length_max(MAX_DRAG) * SHOT_POWER
}

impl AimState {
    #[inline]
    pub fn is_aiming(&self) -> bool {
        matches!(self, AimState::Aiming { .. })
    }

    pub fn begin(&mut self, at: Vec3) {
        *self = AimState::Aiming {
            anchor: at,
            current: at,
        };
    }

    pub fn drag(&mut self, to: Vec3) {
        if let AimState::Aiming { current, .. } = self {
            *current = to;
        }
    }

    /// Finish the gesture, returning the shot velocity if one was in progress
    pub fn release(&mut self, at: Vec3) -> Option<Vec3> {
        let AimState::Aiming { anchor, .. } = *self else {
            return None;
        };
        *self = AimState::Idle;
        Some(shot_velocity(anchor, at))
    }

    /// Shot the current drag would produce, for the preview
    pub fn candidate_velocity(&self) -> Option<Vec3> {
        match *self {
            AimState::Aiming { anchor, current } => Some(shot_velocity(anchor, current)),
            AimState::Idle => None,
        }
    }

    /// Drop any gesture in progress without shooting
    pub fn clear(&mut self) {
        *self = AimState::Idle;
    }
}
