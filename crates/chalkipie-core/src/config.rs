//! Engine tuning constants
//!
//! Every number the simulation depends on lives here so the host page can
//! override any of them with a partial JSON document.

use serde::{Deserialize, Serialize};

use crate::easing::{CubicBezier, LIFT_EASE};
use crate::error::ConfigError;

/// Lift car motion, shared by the lift widget's CSS transition and the
/// character's ride interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LiftMotion {
    pub duration_ms: f64,
    pub easing: CubicBezier,
}

impl Default for LiftMotion {
    fn default() -> Self {
        Self {
            duration_ms: 800.0,
            easing: LIFT_EASE,
        }
    }
}

impl LiftMotion {
    /// Value for the lift car's `transition` CSS property
    pub fn css_transition(&self) -> String {
        format!("transform {}ms {}", self.duration_ms, self.easing.css())
    }

    /// Eased progress (0..=1) after `elapsed_ms`
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.easing.evaluate(elapsed_ms / self.duration_ms)
    }
}

/// All tuning constants for layout, physics, lift riding and the camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    // Layout
    pub floor_height: f64,
    pub header_height: f64,
    pub sprite_scale: f64,
    pub base_width: f64,
    pub base_height: f64,
    pub base_feet_offset: f64,

    // Physics
    pub gravity: f64,
    pub jump_force: f64,
    pub double_jump_force: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub idle_friction: f64,
    pub moving_friction: f64,
    pub velocity_epsilon: f64,
    pub drop_velocity: f64,
    pub drop_ignore_frames: u32,

    // Horizontal bounds and the lift shaft
    pub min_x: f64,
    pub right_margin: f64,
    pub spawn_x: f64,
    pub shaft_boundary_x: f64,
    pub shaft_x: f64,
    pub shaft_pull: f64,
    pub shaft_width: f64,

    // Lift riding
    pub lift: LiftMotion,
    pub elevator_call_cooldown_ms: f64,
    pub settle_buffer_ms: f64,

    // Camera
    pub vertical_bias: f64,
    pub scroll_damping: f64,
    pub scroll_threshold_x: f64,
    pub scroll_threshold_y: f64,

    // Door slots along each floor
    pub door_first_x: f64,
    pub door_spacing: f64,
    pub door_width: f64,
    pub proximity_radius: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            floor_height: 450.0,
            header_height: 70.0,
            sprite_scale: 1.8,
            base_width: 30.0,
            base_height: 80.0,
            base_feet_offset: 62.0,

            gravity: 1.2,
            jump_force: -28.0,
            double_jump_force: -22.0,
            max_speed: 12.0,
            acceleration: 2.0,
            idle_friction: 0.82,
            moving_friction: 0.95,
            velocity_epsilon: 0.1,
            drop_velocity: 8.0,
            drop_ignore_frames: 10,

            min_x: -140.0,
            right_margin: 20.0,
            spawn_x: 200.0,
            shaft_boundary_x: -40.0,
            shaft_x: -80.0,
            shaft_pull: 0.1,
            shaft_width: 160.0,

            lift: LiftMotion::default(),
            elevator_call_cooldown_ms: 500.0,
            settle_buffer_ms: 100.0,

            vertical_bias: 40.0,
            scroll_damping: 0.1,
            scroll_threshold_x: 5.0,
            scroll_threshold_y: 1.0,

            door_first_x: 120.0,
            door_spacing: 260.0,
            door_width: 200.0,
            proximity_radius: 90.0,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn character_width(&self) -> f64 {
        self.base_width * self.sprite_scale
    }

    pub fn character_height(&self) -> f64 {
        self.base_height * self.sprite_scale
    }

    /// Distance from the sprite's top-left anchor down to its feet
    pub fn feet_offset(&self) -> f64 {
        self.base_feet_offset * self.sprite_scale
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("floorHeight", self.floor_height),
            ("spriteScale", self.sprite_scale),
            ("baseWidth", self.base_width),
            ("baseHeight", self.base_height),
            ("gravity", self.gravity),
            ("maxSpeed", self.max_speed),
            ("acceleration", self.acceleration),
            ("lift.durationMs", self.lift.duration_ms),
            ("doorSpacing", self.door_spacing),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let unit = [
            ("idleFriction", self.idle_friction),
            ("movingFriction", self.moving_friction),
            ("shaftPull", self.shaft_pull),
            ("scrollDamping", self.scroll_damping),
        ];
        for (field, value) in unit {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if self.header_height < 0.0 {
            return Err(ConfigError::OutOfRange { field: "headerHeight", value: self.header_height });
        }
        if self.base_feet_offset < 0.0 || self.base_feet_offset > self.base_height {
            return Err(ConfigError::OutOfRange { field: "baseFeetOffset", value: self.base_feet_offset });
        }
        if self.jump_force >= 0.0 {
            return Err(ConfigError::OutOfRange { field: "jumpForce", value: self.jump_force });
        }
        if self.double_jump_force >= 0.0 {
            return Err(ConfigError::OutOfRange { field: "doubleJumpForce", value: self.double_jump_force });
        }
        // The shaft snap point has to be inside the shaft and reachable
        if self.shaft_x >= self.shaft_boundary_x || self.shaft_x < self.min_x {
            return Err(ConfigError::OutOfRange { field: "shaftX", value: self.shaft_x });
        }

        self.lift.easing.validate()
    }
}
