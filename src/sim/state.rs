//! Simulation state and core types
//!
//! Everything the per-frame step mutates is owned by [`GameState`].

use glam::Vec3;

use super::aim::AimState;
use super::obstacle::Obstacle;
use super::particles::ConfettiPool;
use super::sink::HoleState;
use super::trajectory;
use crate::consts::*;
use crate::levels::LevelDef;

/// The golf ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Render scale (1.0 normally, shrinks while sinking)
    pub scale: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            scale: 1.0,
            radius: BALL_RADIUS,
        }
    }

    /// Put the ball back on the tee, at rest and full size
    pub fn respawn(&mut self, spawn: Vec3) {
        self.pos = spawn;
        self.vel = Vec3::ZERO;
        self.scale = 1.0;
    }

    pub fn is_resting(&self) -> bool {
        self.vel.length_squared() < STATIONARY_EPSILON
    }
}

/// Things the host needs to react to (sounds, counters, UI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A shot was released (one stroke)
    ShotTaken { power: f32 },
    /// Ball bounced off the course edge
    WallBounce,
    /// Ball started touching a solid obstacle
    ObstacleHit,
    /// Ball dropped into the hole; the sink animation started
    HoleEntered { position: Vec3 },
    /// Sink animation finished. Fires once until the level is reset.
    HoleCompleted,
}

/// Complete simulation state for the loaded level
#[derive(Debug, Clone)]
pub struct GameState {
    /// Immutable snapshot the level was built from
    pub level: LevelDef,
    /// Live obstacles (time-driven transforms advance every frame)
    pub obstacles: Vec<Obstacle>,
    pub ball: Ball,
    pub hole: HoleState,
    pub aim: AimState,
    /// Simulation seconds since the level was (re)loaded
    pub elapsed: f32,
    /// Visual confetti (not gameplay-affecting)
    pub confetti: ConfettiPool,
    /// Spawn confetti on hole entry
    pub confetti_enabled: bool,
    /// Ball was in solid contact last frame
    pub(crate) touching: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh state for a level snapshot
    pub fn new(level: LevelDef, seed: u64) -> Self {
        let mut state = Self {
            ball: Ball::new(level.spawn),
            obstacles: Vec::new(),
            level,
            hole: HoleState::Idle,
            aim: AimState::Idle,
            elapsed: 0.0,
            confetti: ConfettiPool::new(CONFETTI_CAPACITY, seed),
            confetti_enabled: true,
            touching: false,
            events: Vec::new(),
        };
        state.rebuild();
        state
    }

    /// Switch to another level (next level, menu)
    pub fn load_level(&mut self, level: LevelDef) {
        log::info!("Loading level {} ({} obstacles)", level.id, level.obstacles.len());
        self.level = level;
        self.rebuild();
    }

    /// Retry the current level: re-arm the hole and put the ball on the tee
    pub fn reset(&mut self) {
        log::info!("Resetting level {}", self.level.id);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.obstacles = self.level.obstacles.clone();
        self.elapsed = 0.0;
        self.touching = false;
        for obstacle in &mut self.obstacles {
            obstacle.animate(0.0, 0.0);
        }
        self.ball.respawn(self.level.spawn);
        self.hole.reset();
        self.aim.clear();
        self.confetti.clear();
    }

    /// Course half-extent; the ball stays within `[-limit, limit]` per axis
    #[inline]
    pub fn limit(&self) -> f32 {
        self.level.half_extent
    }

    /// Predicted path of the shot currently being aimed
    pub fn preview(&self) -> Option<Vec<Vec3>> {
        self.aim
            .candidate_velocity()
            .map(|vel| trajectory::preview(self.ball.pos, vel))
    }

    /// Camera/orbit input must be ignored while this is true
    pub fn controls_locked(&self) -> bool {
        self.aim.is_aiming()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels;

    #[test]
    fn test_new_state_starts_on_tee() {
        let level = levels::level(1);
        let state = GameState::new(level.clone(), 1);
        assert_eq!(state.ball.pos, level.spawn);
        assert_eq!(state.ball.scale, 1.0);
        assert!(state.hole.is_idle());
        assert_eq!(state.obstacles.len(), level.obstacles.len());
        assert!(state.preview().is_none());
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut state = GameState::new(levels::level(2), 1);
        state.ball.pos = Vec3::new(1.0, BALL_RADIUS, 1.0);
        state.ball.vel = Vec3::new(3.0, 0.0, 0.0);
        state.ball.scale = 0.3;
        state.hole = HoleState::Done;
        state.elapsed = 12.0;

        state.reset();
        assert_eq!(state.ball.pos, state.level.spawn);
        assert_eq!(state.ball.vel, Vec3::ZERO);
        assert_eq!(state.ball.scale, 1.0);
        assert!(state.hole.is_idle());
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_load_level_swaps_snapshot() {
        let mut state = GameState::new(levels::level(1), 1);
        state.load_level(levels::level(3));
        assert_eq!(state.level.id, 3);
        assert_eq!(state.ball.pos, state.level.spawn);
    }

    #[test]
    fn test_preview_while_aiming() {
        let mut state = GameState::new(levels::level(1), 1);
        let at = state.ball.pos;
        state.aim.begin(at);
        state.aim.drag(at + Vec3::new(0.0, 0.0, 1.0));
        assert!(state.controls_locked());

        let points = state.preview().expect("aiming");
        assert_eq!(points[0], state.ball.pos);
        assert!(points.len() > 1);
        // Preview never moves the live ball
        assert_eq!(state.ball.pos, at);
    }
}
