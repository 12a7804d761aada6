//! Per-frame simulation step
//!
//! Order each frame: input -> obstacle animation -> ball motion and course
//! walls -> obstacle contacts -> hole -> confetti.

use glam::Vec3;

use super::collision::resolve_obstacles;
use super::motion::{bounce_off_bounds, friction_at, integrate};
use super::sink::SinkStep;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer pressed at this ground-plane point
    pub pointer_down: Option<Vec3>,
    /// Latest drag position
    pub pointer_move: Option<Vec3>,
    /// Pointer released at this ground-plane point
    pub pointer_up: Option<Vec3>,
    /// Retry the level
    pub reset: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.reset {
        state.reset();
    }

    apply_aim(state, input);

    // Obstacles are level ambience: they move even while the ball sinks
    state.elapsed += dt;
    let elapsed = state.elapsed;
    for obstacle in &mut state.obstacles {
        obstacle.animate(elapsed, dt);
    }

    // Once the hole has the ball, only the sink drives it
    if state.hole.is_idle() {
        step_ball(state, dt);
    }

    let hole = state.level.hole;
    match state.hole.step(&mut state.ball, hole, dt) {
        SinkStep::Entered => {
            log::info!("Ball in the hole on level {}", state.level.id);
            state.aim.clear();
            if state.confetti_enabled {
                let spawned = state.confetti.spawn(hole, CONFETTI_BURST);
                log::debug!("Confetti burst: {} pieces", spawned);
            }
            state.push_event(GameEvent::HoleEntered { position: hole });
        }
        SinkStep::Completed => {
            log::info!("Hole complete on level {}", state.level.id);
            state.push_event(GameEvent::HoleCompleted);
        }
        SinkStep::None | SinkStep::Sinking => {}
    }

    state.confetti.step(dt);
}

/// Feed pointer events through the aim gesture
///
/// Ignored once the hole has taken the ball; velocity is frozen then.
fn apply_aim(state: &mut GameState, input: &TickInput) {
    if !state.hole.is_idle() {
        state.aim.clear();
        return;
    }

    if let Some(at) = input.pointer_down {
        state.aim.begin(at);
    }
    if let Some(at) = input.pointer_move {
        state.aim.drag(at);
    }
    let released = input.pointer_up.and_then(|at| state.aim.release(at));
    if let Some(vel) = released {
        state.ball.vel = vel;
        let power = vel.length();
        log::info!("Shot on level {} with power {:.2}", state.level.id, power);
        state.push_event(GameEvent::ShotTaken { power });
    }
}

/// Friction, walls, obstacles and ground contact for a free ball
fn step_ball(state: &mut GameState, dt: f32) {
    let friction = friction_at(state.ball.pos, &state.obstacles);
    integrate(&mut state.ball, dt, friction);

    let limit = state.limit();
    if bounce_off_bounds(&mut state.ball, limit) {
        log::debug!("Wall bounce at {:?}", state.ball.pos);
        state.push_event(GameEvent::WallBounce);
    }

    // One knock per contact, not one per frame of it
    let report = resolve_obstacles(&mut state.ball, &mut state.obstacles);
    let touching = report.hits > 0;
    if touching && !state.touching {
        state.push_event(GameEvent::ObstacleHit);
    }
    state.touching = touching;

    // Off every ramp the ball rolls on the ground plane
    if !report.on_ramp {
        state.ball.pos.y = state.ball.radius;
        state.ball.vel.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelDef;
    use crate::sim::obstacle::{MovingBlock, Obstacle, OscillationAxis, Ramp, RotatingPlank, StaticBox};
    use crate::sim::sink::HoleState;

    const DT: f32 = 1.0 / 60.0;

    /// Empty course with the hole at the origin
    fn open_course() -> LevelDef {
        LevelDef {
            id: 1,
            half_extent: 6.0,
            hole: Vec3::ZERO,
            spawn: Vec3::new(0.0, BALL_RADIUS, 4.0),
            obstacles: Vec::new(),
        }
    }

    fn count(state: &GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
        state.events().iter().filter(|e| pred(*e)).count()
    }

    fn shoot(state: &mut GameState, drag: Vec3) {
        let at = state.ball.pos;
        tick(
            state,
            &TickInput {
                pointer_down: Some(at),
                ..Default::default()
            },
            DT,
        );
        tick(
            state,
            &TickInput {
                pointer_up: Some(at + drag),
                ..Default::default()
            },
            DT,
        );
    }

    #[test]
    fn test_shot_counts_one_stroke() {
        let mut state = GameState::new(open_course(), 1);
        // Pull back toward +z, ball heads to -z
        shoot(&mut state, Vec3::new(0.0, 0.0, 1.0));

        assert_eq!(count(&state, |e| matches!(e, GameEvent::ShotTaken { .. })), 1);
        assert!(state.ball.vel.z < 0.0);
    }

    #[test]
    fn test_putt_sinks_and_completes_once() {
        let mut state = GameState::new(open_course(), 1);
        shoot(&mut state, Vec3::new(0.0, 0.0, 1.2));

        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), DT);
        }

        assert_eq!(count(&state, |e| matches!(e, GameEvent::HoleEntered { .. })), 1);
        assert_eq!(count(&state, |e| *e == GameEvent::HoleCompleted), 1);
        assert!(state.hole.is_done());
        assert_eq!(state.ball.pos, HoleState::sink_target(Vec3::ZERO));
        assert_eq!(state.ball.scale, SINK_MIN_SCALE);
    }

    #[test]
    fn test_jittering_near_hole_completes_once() {
        let mut state = GameState::new(open_course(), 1);
        // Hover the ball around the rim for many frames
        for i in 0..300 {
            if state.hole.is_idle() {
                let r = if i % 2 == 0 { HOLE_RADIUS - 0.01 } else { HOLE_RADIUS + 0.01 };
                state.ball.pos = Vec3::new(r, BALL_RADIUS, 0.0);
            }
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(count(&state, |e| *e == GameEvent::HoleCompleted), 1);

        // Re-armed by a reset, fires exactly once more
        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        state.ball.pos = Vec3::new(0.1, BALL_RADIUS, 0.0);
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(count(&state, |e| *e == GameEvent::HoleCompleted), 2);
    }

    #[test]
    fn test_aim_ignored_while_sinking() {
        let mut state = GameState::new(open_course(), 1);
        state.ball.pos = Vec3::new(0.1, BALL_RADIUS, 0.0);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.hole.is_sinking());

        let input = TickInput {
            pointer_down: Some(Vec3::ZERO),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.aim.is_aiming());

        let input = TickInput {
            pointer_up: Some(Vec3::new(0.0, 0.0, 3.0)),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.ball.vel, Vec3::ZERO);
        assert_eq!(count(&state, |e| matches!(e, GameEvent::ShotTaken { .. })), 0);
    }

    #[test]
    fn test_obstacles_animate_during_sink() {
        let mut level = open_course();
        level.obstacles = vec![
            Obstacle::RotatingPlank(RotatingPlank::new(
                Vec3::new(4.0, 0.3, -4.0),
                Vec3::new(1.0, 0.3, 0.1),
                2.0,
            )),
            Obstacle::MovingBlock(MovingBlock::new(
                Vec3::new(-4.0, 0.3, -4.0),
                OscillationAxis::X,
                1.0,
                3.0,
            )),
        ];
        let mut state = GameState::new(level, 1);
        state.ball.pos = Vec3::new(0.1, BALL_RADIUS, 0.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.hole.is_sinking());

        let Obstacle::RotatingPlank(plank) = &state.obstacles[0] else {
            panic!("expected plank");
        };
        assert!((plank.yaw - 2.0 * 30.0 * DT).abs() < 1e-4);
        let Obstacle::MovingBlock(block) = &state.obstacles[1] else {
            panic!("expected block");
        };
        assert_eq!(block.position, block.position_at(state.elapsed));
    }

    #[test]
    fn test_confetti_burst_on_entry() {
        let mut state = GameState::new(open_course(), 9);
        state.ball.pos = Vec3::new(0.1, BALL_RADIUS, 0.0);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.confetti.active_count() > 0);

        let mut quiet = GameState::new(open_course(), 9);
        quiet.confetti_enabled = false;
        quiet.ball.pos = Vec3::new(0.1, BALL_RADIUS, 0.0);
        tick(&mut quiet, &TickInput::default(), DT);
        assert_eq!(quiet.confetti.active_count(), 0);
        assert!(quiet.hole.is_sinking());
    }

    #[test]
    fn test_wall_bounce_event() {
        let mut state = GameState::new(open_course(), 1);
        state.ball.pos = Vec3::new(5.95, BALL_RADIUS, 3.0);
        state.ball.vel = Vec3::new(4.0, 0.0, 0.0);
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.ball.pos.x, 6.0);
        assert!(state.ball.vel.x < 0.0);
        assert_eq!(count(&state, |e| *e == GameEvent::WallBounce), 1);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(open_course(), 1);
        shoot(&mut state, Vec3::new(1.0, 0.0, 0.0));
        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_reset_mid_sink_cancels_completion() {
        let mut state = GameState::new(open_course(), 1);
        state.ball.pos = Vec3::new(0.1, BALL_RADIUS, 0.0);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.hole.is_sinking());

        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), DT);
        }

        assert!(state.hole.is_idle());
        assert_eq!(state.ball.pos, state.level.spawn);
        assert_eq!(state.ball.scale, 1.0);
        assert_eq!(count(&state, |e| *e == GameEvent::HoleCompleted), 0);
    }

    #[test]
    fn test_ball_settles_to_ground_past_ramp() {
        let mut level = open_course();
        level.obstacles = vec![Obstacle::Ramp(Ramp::new(Vec3::new(3.0, 0.0, 0.0), 2.0, 2.0, 1.0))];
        let mut state = GameState::new(level, 1);
        state.ball.pos = Vec3::new(3.0, BALL_RADIUS, -3.0);
        state.ball.vel = Vec3::new(0.0, 0.0, 6.0);

        let mut max_y = state.ball.pos.y;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
            max_y = max_y.max(state.ball.pos.y);
            if state.ball.pos.z > 2.5 {
                break;
            }
        }

        assert!(state.ball.pos.z > 2.5);
        assert!(max_y > 1.0);
        assert_eq!(state.ball.pos.y, BALL_RADIUS);
        assert_eq!(state.ball.vel.y, 0.0);
    }

    #[test]
    fn test_obstacle_hit_once_per_contact() {
        let mut level = open_course();
        level.obstacles = vec![Obstacle::Box(StaticBox::new(
            Vec3::new(3.0, 0.5, 0.0),
            Vec3::new(1.0, 0.5, 1.0),
        ))];
        let mut state = GameState::new(level, 1);
        // Overlapping at rest: pushed out over several frames of contact
        state.ball.pos = Vec3::new(4.1, BALL_RADIUS, 0.0);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.ball.pos.x > 4.2);
        assert_eq!(count(&state, |e| *e == GameEvent::ObstacleHit), 1);

        // Rolling back in is a new contact
        state.ball.vel = Vec3::new(-3.0, 0.0, 0.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(count(&state, |e| *e == GameEvent::ObstacleHit), 2);
    }
}
