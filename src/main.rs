//! Putt Physics entry point
//!
//! The web build is driven from JavaScript through `putt_physics::web`.
//! Natively this runs a headless round: every level is putted straight at
//! the hole until it drops or the stroke limit runs out.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use putt_physics::levels::{self, LEVEL_COUNT};
    use putt_physics::sim::GameState;

    env_logger::init();
    log::info!("Putt Physics (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let seed = 2024;
    let mut total = 0;
    for id in 1..=LEVEL_COUNT {
        let mut state = GameState::new(levels::level(id), seed);
        let strokes = play_level(&mut state);
        total += strokes;
        println!("Level {}: {} strokes", id, strokes);
    }
    println!("Total: {} strokes", total);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

/// Putt at the hole until it drops; returns the strokes used
#[cfg(not(target_arch = "wasm32"))]
fn play_level(state: &mut putt_physics::sim::GameState) -> u32 {
    use putt_physics::consts::*;
    use putt_physics::horizontal;
    use putt_physics::sim::{GameEvent, TickInput, tick};

    const DT: f32 = 1.0 / 60.0;
    const MAX_STROKES: u32 = 10;
    const MAX_FRAMES_PER_STROKE: u32 = 60 * 20;

    let mut strokes = 0;
    while strokes < MAX_STROKES {
        // Pull back away from the hole, hard enough to roll a bit past it
        let to_hole = horizontal(state.level.hole - state.ball.pos);
        let roll = (2.0 * FRICTION * to_hole.length()).sqrt() * 1.2;
        let drag = to_hole.normalize_or_zero() * (roll / SHOT_POWER);
        let at = state.ball.pos;

        let aim = TickInput {
            pointer_down: Some(at),
            ..Default::default()
        };
        tick(state, &aim, DT);
        let release = TickInput {
            pointer_up: Some(at - drag),
            ..Default::default()
        };
        tick(state, &release, DT);

        for _ in 0..MAX_FRAMES_PER_STROKE {
            tick(state, &TickInput::default(), DT);
            if state.ball.is_resting() && state.hole.is_idle() {
                break;
            }
            if state.hole.is_done() {
                break;
            }
        }

        for event in state.drain_events() {
            match event {
                GameEvent::ShotTaken { .. } => strokes += 1,
                GameEvent::HoleCompleted => {
                    log::info!("Level {} holed in {}", state.level.id, strokes);
                    return strokes;
                }
                _ => {}
            }
        }
        log::debug!("Ball resting at {:?}", state.ball.pos);
    }
    log::warn!("Level {} not holed after {} strokes", state.level.id, strokes);
    strokes
}
