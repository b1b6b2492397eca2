//! Per-frame physics for the character
//!
//! The engine calls these in order once per animation frame: horizontal
//! control, jump/elevator input, integration, bounds, floor collision.

use tracing::debug;

use crate::character::CharacterState;
use crate::config::EngineConfig;
use crate::input::InputEvents;
use crate::layout::{self, FloorSet, Metrics};

/// Keeps feet resting exactly on a line from rounding into the next row
const LINE_EPSILON: f64 = 0.5;

/// What the jump/down input did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAction {
    None,
    Jump,
    DoubleJump,
    Drop,
    /// Asked the lift for another floor from inside the shaft
    CallFloor(i32),
}

/// Rate limit for lift calls made from inside the shaft
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCooldown {
    last_ms: Option<f64>,
}

impl CallCooldown {
    /// Fires (and restarts the cooldown) when at least `cooldown_ms` passed
    pub fn try_fire(&mut self, now_ms: f64, cooldown_ms: f64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms - last < cooldown_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }
}

/// Whether `x` is inside the lift shaft band
pub fn in_shaft(x: f64, config: &EngineConfig) -> bool {
    x < config.shaft_boundary_x
}

/// Step 1: walk/run, or drift to the shaft centre while riding
pub fn apply_horizontal(state: &mut CharacterState, input: &InputEvents, config: &EngineConfig) {
    if state.is_riding() {
        state.pos.x += (config.shaft_x - state.pos.x) * config.shaft_pull;
        state.vel.x = 0.0;
        return;
    }

    if input.left {
        state.vel.x -= config.acceleration;
        state.facing_right = false;
    }
    if input.right {
        state.vel.x += config.acceleration;
        state.facing_right = true;
    }

    state.vel.x = state.vel.x.clamp(-config.max_speed, config.max_speed);
    state.vel.x *= if input.left || input.right { config.moving_friction } else { config.idle_friction };
    if state.vel.x.abs() < config.velocity_epsilon {
        state.vel.x = 0.0;
    }
}

/// Step 2: jumps and drops on the facade, lift calls inside the shaft
pub fn apply_vertical_input(
    state: &mut CharacterState,
    input: &InputEvents,
    floors: &FloorSet,
    cooldown: &mut CallCooldown,
    now_ms: f64,
    config: &EngineConfig,
) -> VerticalAction {
    if state.is_riding() {
        return VerticalAction::None;
    }

    if in_shaft(state.pos.x, config) {
        let Some(current) = state.current_floor else {
            return VerticalAction::None;
        };
        let wanted = if input.jump_pressed {
            floors.above(current)
        } else if input.down_pressed {
            floors.below(current)
        } else {
            None
        };
        return match wanted {
            Some(floor) if cooldown.try_fire(now_ms, config.elevator_call_cooldown_ms) => {
                debug!(from = current, to = floor, "elevator call");
                VerticalAction::CallFloor(floor)
            }
            _ => VerticalAction::None,
        };
    }

    if input.jump_pressed {
        if state.is_grounded {
            state.vel.y = config.jump_force;
            state.is_grounded = false;
            state.jumps_used = 1;
            return VerticalAction::Jump;
        }
        if state.jumps_used < 2 {
            state.vel.y = config.double_jump_force;
            state.jumps_used = 2;
            return VerticalAction::DoubleJump;
        }
        return VerticalAction::None;
    }

    if input.down && state.is_grounded {
        state.ignore_collision_frames = config.drop_ignore_frames;
        state.is_grounded = false;
        state.vel.y = config.drop_velocity;
        return VerticalAction::Drop;
    }

    VerticalAction::None
}

/// Step 3: gravity and velocity (not while riding)
pub fn integrate(state: &mut CharacterState, config: &EngineConfig) {
    if state.is_riding() {
        return;
    }
    state.vel.y += config.gravity;
    state.pos.x += state.vel.x;
    state.pos.y += state.vel.y;
}

/// Step 4: keep the character inside the level regardless of floor lines
pub fn clamp_bounds(state: &mut CharacterState, floors: &FloorSet, level_width: f64, config: &EngineConfig) {
    if state.pos.x < config.min_x {
        state.pos.x = config.min_x;
        state.vel.x = 0.0;
    }
    let max_right = (level_width - config.character_width() - config.right_margin).max(config.min_x);
    if state.pos.x > max_right {
        state.pos.x = max_right;
        state.vel.x = 0.0;
    }

    if state.pos.y < 0.0 {
        state.pos.y = 0.0;
        state.vel.y = 0.0;
    }

    if state.is_riding() {
        return;
    }
    let metrics = Metrics::from(config);
    let hard_floor = (layout::total_level_height(floors, &metrics) - metrics.feet_offset).max(0.0);
    if state.pos.y > hard_floor {
        state.land(hard_floor);
    }
}

/// Step 5: land on the floor line the feet crossed since `prev_y`.
///
/// Returns the floor when it differs from the one the character was on.
pub fn resolve_floor_collision(
    state: &mut CharacterState,
    prev_y: f64,
    floors: &FloorSet,
    config: &EngineConfig,
) -> Option<i32> {
    if state.is_riding() {
        return None;
    }
    if state.ignore_collision_frames > 0 {
        state.ignore_collision_frames -= 1;
        state.is_grounded = false;
        return None;
    }
    if state.vel.y < 0.0 || floors.is_empty() {
        state.is_grounded = false;
        return None;
    }

    let metrics = Metrics::from(config);
    let relative_feet = state.pos.y + metrics.feet_offset - metrics.header_height;
    let prev_relative_feet = prev_y + metrics.feet_offset - metrics.header_height;

    let line = ((prev_relative_feet - LINE_EPSILON) / metrics.floor_height).ceil() * metrics.floor_height;
    let max_line = floors.len() as f64 * metrics.floor_height;
    if line > max_line || relative_feet < line {
        state.is_grounded = false;
        return None;
    }

    state.land(line + metrics.header_height - metrics.feet_offset);

    let landed = layout::floor_line_to_floor(floors, line, metrics.floor_height)?;
    if state.current_floor == Some(landed) {
        return None;
    }
    debug!(floor = landed, previous = ?state.current_floor, "landed on floor");
    state.current_floor = Some(landed);
    Some(landed)
}
