//! Hole entry and the scripted sink animation
//!
//! `Idle -> Sinking -> Done`. Leaving `Idle` is the one-shot latch: only
//! [`HoleState::reset`] puts the machine back to `Idle`, so entry and
//! completion each fire at most once per level load.

use glam::Vec3;

use super::state::Ball;
use crate::consts::*;
use crate::{horizontal, smoothstep};

/// Ball position and scale along an active sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkSequence {
    /// Seconds since the ball entered the hole
    pub elapsed: f32,
    pub start: Vec3,
    pub end: Vec3,
}

impl SinkSequence {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            elapsed: 0.0,
            start,
            end,
        }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        (self.elapsed / SINK_DURATION).clamp(0.0, 1.0)
    }

    /// Eased position and ball scale at the current progress
    pub fn sample(&self) -> (Vec3, f32) {
        let eased = smoothstep(self.progress());
        let pos = self.start.lerp(self.end, eased);
        let scale = 1.0 - (1.0 - SINK_MIN_SCALE) * eased;
        (pos, scale)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= SINK_DURATION
    }
}

/// What the hole did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStep {
    /// Nothing happened
    None,
    /// Ball just dropped in; a sink started
    Entered,
    /// Sink in progress
    Sinking,
    /// Sink finished this frame
    Completed,
}

/// Hole state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HoleState {
    /// Armed, waiting for the ball
    #[default]
    Idle,
    Sinking(SinkSequence),
    /// Hole completed; stays here until reset
    Done,
}

impl HoleState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, HoleState::Idle)
    }

    #[inline]
    pub fn is_sinking(&self) -> bool {
        matches!(self, HoleState::Sinking(_))
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, HoleState::Done)
    }

    /// Where the ball comes to rest inside the hole
    pub fn sink_target(hole: Vec3) -> Vec3 {
        hole - Vec3::Y * SINK_DEPTH
    }

    /// Start a sink if the machine is armed and the ball is over the hole
    pub fn try_enter(&mut self, ball: &mut Ball, hole: Vec3) -> bool {
        if !self.is_idle() {
            return false;
        }
        if horizontal(ball.pos - hole).length() >= HOLE_RADIUS {
            return false;
        }

        ball.vel = Vec3::ZERO;
        *self = HoleState::Sinking(SinkSequence::new(ball.pos, Self::sink_target(hole)));
        true
    }

    /// Advance an active sink, driving the ball's position and scale
    ///
    /// Returns true exactly once, on the frame the sink completes.
    pub fn advance(&mut self, ball: &mut Ball, dt: f32) -> bool {
        let HoleState::Sinking(seq) = self else {
            return false;
        };

        seq.elapsed += dt;
        if seq.is_finished() {
            // Snap so the resting pose is exact
            ball.pos = seq.end;
            ball.scale = SINK_MIN_SCALE;
            ball.vel = Vec3::ZERO;
            *self = HoleState::Done;
            return true;
        }

        let (pos, scale) = seq.sample();
        ball.pos = pos;
        ball.scale = scale;
        false
    }

    /// Run one frame of the machine: entry check or sink advance
    pub fn step(&mut self, ball: &mut Ball, hole: Vec3, dt: f32) -> SinkStep {
        match *self {
            HoleState::Idle => {
                if self.try_enter(ball, hole) {
                    SinkStep::Entered
                } else {
                    SinkStep::None
                }
            }
            HoleState::Sinking(_) => {
                if self.advance(ball, dt) {
                    SinkStep::Completed
                } else {
                    SinkStep::Sinking
                }
            }
            HoleState::Done => SinkStep::None,
        }
    }

    /// Re-arm the machine, dropping any sink in progress
    pub fn reset(&mut self) {
        *self = HoleState::Idle;
    }
}
