//! Browser bindings
//!
//! The page owns rendering, camera and HUD. It feeds frame deltas and
//! ground-projected pointer positions in, and reads transforms back out.

use glam::Vec3;
use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::MAX_FRAME_DT;
use crate::levels;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Obstacle, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Putt Physics starting...");
}

/// Obstacle kind codes in `obstacle_transforms`
const KIND_BOX: f32 = 0.0;
const KIND_MOVING_BLOCK: f32 = 1.0;
const KIND_ROTATING_PLANK: f32 = 2.0;
const KIND_RAMP: f32 = 3.0;
const KIND_WATER: f32 = 4.0;

/// Simulation handle exported to JavaScript
#[wasm_bindgen]
pub struct GolfSim {
    state: GameState,
    input: TickInput,
    audio: AudioManager,
    settings: Settings,
    on_complete: Option<Function>,
    on_stroke: Option<Function>,
}

#[wasm_bindgen]
impl GolfSim {
    #[wasm_bindgen(constructor)]
    pub fn new(level_id: u32) -> GolfSim {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        let mut state = GameState::new(levels::level(level_id), seed);
        state.confetti_enabled = settings.effective_confetti();
        let mut audio = AudioManager::new();
        audio.set_volume(settings.effective_volume());

        log::info!("Level {} loaded with seed: {}", state.level.id, seed);
        GolfSim {
            state,
            input: TickInput::default(),
            audio,
            settings,
            on_complete: None,
            on_stroke: None,
        }
    }

    /// Called once each time a hole finishes sinking
    pub fn set_on_complete(&mut self, callback: Function) {
        self.on_complete = Some(callback);
    }

    /// Called once per released shot
    pub fn set_on_stroke(&mut self, callback: Function) {
        self.on_stroke = Some(callback);
    }

    /// Advance one rendered frame (`dt` in seconds)
    pub fn step(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, dt);

        for event in self.state.drain_events() {
            self.dispatch(&event);
        }
    }

    pub fn pointer_down(&mut self, x: f32, z: f32) {
        self.input.pointer_down = Some(Vec3::new(x, 0.0, z));
    }

    pub fn pointer_move(&mut self, x: f32, z: f32) {
        self.input.pointer_move = Some(Vec3::new(x, 0.0, z));
    }

    pub fn pointer_up(&mut self, x: f32, z: f32) {
        self.input.pointer_up = Some(Vec3::new(x, 0.0, z));
    }

    /// Retry the current level
    pub fn reset(&mut self) {
        self.input = TickInput::default();
        self.state.reset();
    }

    pub fn load_level(&mut self, level_id: u32) {
        self.input = TickInput::default();
        self.state.load_level(levels::level(level_id));
    }

    /// Advance to the next level, returning its id
    pub fn next_level(&mut self) -> u32 {
        let id = levels::next_level(self.state.level.id);
        self.load_level(id);
        id
    }

    pub fn level_id(&self) -> u32 {
        self.state.level.id
    }

    pub fn course_half_extent(&self) -> f32 {
        self.state.limit()
    }

    pub fn hole_position(&self) -> Vec<f32> {
        self.state.level.hole.to_array().to_vec()
    }

    pub fn ball_position(&self) -> Vec<f32> {
        self.state.ball.pos.to_array().to_vec()
    }

    pub fn ball_scale(&self) -> f32 {
        self.state.ball.scale
    }

    pub fn ball_resting(&self) -> bool {
        self.state.ball.is_resting()
    }

    pub fn is_sinking(&self) -> bool {
        self.state.hole.is_sinking()
    }

    /// Camera/orbit controls should ignore input while aiming
    pub fn controls_locked(&self) -> bool {
        self.state.controls_locked()
    }

    /// Flattened `[x, y, z, ...]` aim preview (empty when not aiming)
    pub fn preview(&self) -> Vec<f32> {
        if !self.settings.trajectory_preview {
            return Vec::new();
        }
        self.state
            .preview()
            .map(|points| flatten(&points))
            .unwrap_or_default()
    }

    /// Flattened `[x, y, z, ...]` of every active confetti piece
    pub fn confetti_positions(&self) -> Vec<f32> {
        let points: Vec<Vec3> = self.state.confetti.iter_active().map(|p| p.pos).collect();
        flatten(&points)
    }

    /// Five floats per obstacle: `[kind, x, y, z, yaw]`
    pub fn obstacle_transforms(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.state.obstacles.len() * 5);
        for obstacle in &self.state.obstacles {
            let (kind, pos, yaw) = match obstacle {
                Obstacle::Box(b) => (KIND_BOX, b.center, 0.0),
                Obstacle::MovingBlock(block) => (KIND_MOVING_BLOCK, block.position, 0.0),
                Obstacle::RotatingPlank(plank) => (KIND_ROTATING_PLANK, plank.center, plank.yaw),
                Obstacle::Ramp(ramp) => (KIND_RAMP, ramp.center, 0.0),
                Obstacle::Water(pond) => (KIND_WATER, pond.center, 0.0),
            };
            out.extend_from_slice(&[kind, pos.x, pos.y, pos.z, yaw]);
        }
        out
    }

    /// Level snapshot as JSON (for the page to build meshes)
    pub fn level_json(&self) -> String {
        self.state.level.to_json().unwrap_or_default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.apply_settings();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.master_volume = volume.clamp(0.0, 1.0);
        self.apply_settings();
    }

    pub fn set_confetti(&mut self, enabled: bool) {
        self.settings.confetti = enabled;
        self.apply_settings();
    }

    pub fn set_trajectory_preview(&mut self, enabled: bool) {
        self.settings.trajectory_preview = enabled;
        self.apply_settings();
    }
}

impl GolfSim {
    fn apply_settings(&mut self) {
        self.audio.set_volume(self.settings.effective_volume());
        self.state.confetti_enabled = self.settings.effective_confetti();
        self.settings.save();
    }

    /// Side effects for one simulation event. Nothing here can fail the frame.
    fn dispatch(&self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.audio.play(effect);
        }
        match event {
            GameEvent::ShotTaken { .. } => invoke(&self.on_stroke),
            GameEvent::HoleCompleted => invoke(&self.on_complete),
            _ => {}
        }
    }
}

fn invoke(callback: &Option<Function>) {
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("Callback threw: {:?}", e);
        }
    }
}

fn flatten(points: &[Vec3]) -> Vec<f32> {
    points.iter().flat_map(|p| p.to_array()).collect()
}
